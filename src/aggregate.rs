// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::models::{Bank, Category, Fiado, Transaction, TransactionType, OVERDUE_DAYS};

pub const OTHER_LABEL: &str = "Other";

/// `a / b`, or zero when `b` is zero.
pub fn safe_div(a: Decimal, b: Decimal) -> Decimal {
    a.checked_div(b).unwrap_or(Decimal::ZERO)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn day(d: NaiveDate) -> Self {
        Self::new(d, d)
    }

    /// Monday through Sunday of the week containing `d`.
    pub fn week_of(d: NaiveDate) -> Self {
        let back = d.weekday().num_days_from_monday() as u64;
        let start = d - Days::new(back);
        Self::new(start, start + Days::new(6))
    }

    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = last_day_of_month(year, month)?;
        Some(Self::new(start, end))
    }

    pub fn month_of(d: NaiveDate) -> Self {
        let start = d.with_day(1).unwrap_or(d);
        let end = last_day_of_month(d.year(), d.month()).unwrap_or(d);
        Self::new(start, end)
    }

    pub fn contains(&self, d: NaiveDate) -> bool {
        self.start <= d && d <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    Yesterday,
    Week,
    Month,
    Custom(DateRange),
}

impl Period {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" | "hoje" => Some(Self::Today),
            "yesterday" | "ontem" => Some(Self::Yesterday),
            "week" | "semana" => Some(Self::Week),
            "month" | "mes" | "mês" => Some(Self::Month),
            _ => None,
        }
    }

    pub fn range(&self, today: NaiveDate) -> DateRange {
        match self {
            Self::Today => DateRange::day(today),
            Self::Yesterday => DateRange::day(today.pred_opt().unwrap_or(today)),
            Self::Week => DateRange::week_of(today),
            Self::Month => DateRange::month_of(today),
            Self::Custom(r) => *r,
        }
    }
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    last_day_of_month(year, month).map(|d| d.day()).unwrap_or(0)
}

pub fn in_range<'a>(
    transactions: &'a [Transaction],
    range: DateRange,
) -> impl Iterator<Item = &'a Transaction> + Clone + 'a {
    transactions.iter().filter(move |t| range.contains(t.date))
}

pub fn revenue<'a>(txs: impl IntoIterator<Item = &'a Transaction>) -> Decimal {
    txs.into_iter()
        .filter(|t| t.kind == TransactionType::Income)
        .map(|t| t.amount)
        .sum()
}

pub fn cost<'a>(txs: impl IntoIterator<Item = &'a Transaction>) -> Decimal {
    txs.into_iter()
        .filter(|t| t.kind == TransactionType::Expense)
        .map(|t| t.amount)
        .sum()
}

/// Money in minus money out. Also used as "profit": there is no accrual here.
pub fn cash_flow<'a>(txs: impl IntoIterator<Item = &'a Transaction>) -> Decimal {
    txs.into_iter().map(Transaction::signed_amount).sum()
}

pub fn projection(revenue: Decimal, days_elapsed: u32, days_in_month: u32) -> Decimal {
    if days_elapsed == 0 {
        return Decimal::ZERO;
    }
    safe_div(revenue, Decimal::from(days_elapsed)) * Decimal::from(days_in_month)
}

/// Days of `month` already lived as of `today`: all of them for a past month,
/// none for a future one.
pub fn days_elapsed(month: DateRange, today: NaiveDate) -> u32 {
    if today < month.start {
        0
    } else if today > month.end {
        month.end.day()
    } else {
        today.day()
    }
}

pub fn total_pending(fiados: &[Fiado]) -> Decimal {
    fiados.iter().filter(|f| !f.is_paid).map(|f| f.amount).sum()
}

pub fn overdue_fiados(fiados: &[Fiado], today: NaiveDate) -> Vec<&Fiado> {
    fiados.iter().filter(|f| f.is_overdue(today)).collect()
}

pub fn total_overdue(fiados: &[Fiado], today: NaiveDate) -> Decimal {
    overdue_fiados(fiados, today).iter().map(|f| f.amount).sum()
}

pub fn top_pending(fiados: &[Fiado], limit: usize) -> Vec<&Fiado> {
    let mut open: Vec<&Fiado> = fiados.iter().filter(|f| !f.is_paid).collect();
    open.sort_by(|a, b| b.amount.cmp(&a.amount));
    open.truncate(limit);
    open
}

pub fn overdue_alert(fiados: &[Fiado], today: NaiveDate) -> Option<String> {
    let n = overdue_fiados(fiados, today).len();
    (n > 0).then(|| {
        format!(
            "{} customer(s) pending for more than {} days",
            n, OVERDUE_DAYS
        )
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryLine {
    pub category_id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
    pub amount: Decimal,
    pub share_pct: Decimal,
}

fn category_label(categories: &[Category], id: &str) -> String {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| OTHER_LABEL.to_string())
}

fn finish_breakdown(mut lines: Vec<CategoryLine>) -> Vec<CategoryLine> {
    let total: Decimal = lines.iter().map(|l| l.amount).sum();
    for l in &mut lines {
        l.share_pct = safe_div(l.amount, total) * Decimal::ONE_HUNDRED;
    }
    lines.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.label.cmp(&b.label)));
    lines
}

pub fn category_breakdown<'a>(
    txs: impl IntoIterator<Item = &'a Transaction>,
    categories: &[Category],
) -> Vec<CategoryLine> {
    let mut sums: BTreeMap<&str, Decimal> = BTreeMap::new();
    for t in txs.into_iter().filter(|t| t.is_paid) {
        *sums.entry(t.category_id.as_str()).or_default() += t.amount;
    }
    let lines = sums
        .into_iter()
        .map(|(id, amount)| CategoryLine {
            category_id: id.to_string(),
            label: category_label(categories, id),
            kind: None,
            amount,
            share_pct: Decimal::ZERO,
        })
        .collect();
    finish_breakdown(lines)
}

pub fn category_type_breakdown<'a>(
    txs: impl IntoIterator<Item = &'a Transaction>,
    categories: &[Category],
) -> Vec<CategoryLine> {
    let mut sums: BTreeMap<(&str, TransactionType), Decimal> = BTreeMap::new();
    for t in txs.into_iter().filter(|t| t.is_paid) {
        *sums.entry((t.category_id.as_str(), t.kind)).or_default() += t.amount;
    }
    let lines = sums
        .into_iter()
        .map(|((id, kind), amount)| CategoryLine {
            category_id: id.to_string(),
            label: category_label(categories, id),
            kind: Some(kind),
            amount,
            share_pct: Decimal::ZERO,
        })
        .collect();
    finish_breakdown(lines)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankBalance {
    pub bank_id: String,
    pub name: String,
    pub color: String,
    pub balance: Decimal,
}

pub fn bank_balance(bank: &Bank, transactions: &[Transaction]) -> Decimal {
    bank.initial_balance
        + transactions
            .iter()
            .filter(|t| t.is_paid && t.bank_id == bank.id)
            .map(Transaction::signed_amount)
            .sum::<Decimal>()
}

pub fn bank_balances(banks: &[Bank], transactions: &[Transaction]) -> Vec<BankBalance> {
    banks
        .iter()
        .map(|b| BankBalance {
            bank_id: b.id.clone(),
            name: b.name.clone(),
            color: b.color.clone(),
            balance: bank_balance(b, transactions),
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnitSales {
    pub units: u64,
    pub revenue: Decimal,
    pub cost: Decimal,
    pub average_ticket: Decimal,
    pub unit_profit: Decimal,
}

pub fn is_product_category(category: &Category, keyword: &str) -> bool {
    category.name.to_lowercase().contains(&keyword.to_lowercase())
}

/// Units and per-unit economics of transactions whose category name contains
/// `keyword`, case-insensitively.
pub fn unit_sales<'a>(
    txs: impl IntoIterator<Item = &'a Transaction>,
    categories: &[Category],
    keyword: &str,
) -> UnitSales {
    let matching: HashMap<&str, bool> = categories
        .iter()
        .map(|c| (c.id.as_str(), is_product_category(c, keyword)))
        .collect();
    let product: Vec<&Transaction> = txs
        .into_iter()
        .filter(|t| matching.get(t.category_id.as_str()).copied().unwrap_or(false))
        .collect();

    let units: u64 = product.iter().map(|t| u64::from(t.quantity.unwrap_or(0))).sum();
    let revenue = revenue(product.iter().copied());
    let cost = cost(product.iter().copied());
    let units_dec = Decimal::from(units);
    UnitSales {
        units,
        revenue,
        cost,
        average_ticket: safe_div(revenue, units_dec),
        unit_profit: safe_div(revenue - cost, units_dec),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyFlow {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

pub fn daily_series(transactions: &[Transaction], range: DateRange) -> Vec<DailyFlow> {
    let mut rows: BTreeMap<NaiveDate, DailyFlow> = range
        .days()
        .map(|date| {
            (
                date,
                DailyFlow {
                    date,
                    income: Decimal::ZERO,
                    expense: Decimal::ZERO,
                },
            )
        })
        .collect();
    for t in in_range(transactions, range) {
        if let Some(row) = rows.get_mut(&t.date) {
            match t.kind {
                TransactionType::Income => row.income += t.amount,
                TransactionType::Expense => row.expense += t.amount,
            }
        }
    }
    rows.into_values().collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub period: DateRange,
    pub cash: Decimal,
    pub profit: Decimal,
    pub cost: Decimal,
    pub sold: Decimal,
    pub month: DateRange,
    pub month_revenue: Decimal,
    pub month_expenses: Decimal,
    pub projection: Decimal,
    pub total_pending: Decimal,
    pub total_overdue: Decimal,
    pub overdue_count: usize,
    pub units: UnitSales,
}

impl Dashboard {
    pub fn compute(
        transactions: &[Transaction],
        categories: &[Category],
        fiados: &[Fiado],
        period: DateRange,
        month: DateRange,
        today: NaiveDate,
        keyword: &str,
    ) -> Self {
        let window = in_range(transactions, period);
        let month_txs = in_range(transactions, month);
        let month_revenue = revenue(month_txs.clone());
        let cash = cash_flow(window.clone());
        Dashboard {
            period,
            cash,
            profit: cash,
            cost: cost(window.clone()),
            sold: revenue(window.clone()),
            month,
            month_revenue,
            month_expenses: cost(month_txs),
            projection: projection(
                month_revenue,
                days_elapsed(month, today),
                month.end.day(),
            ),
            total_pending: total_pending(fiados),
            total_overdue: total_overdue(fiados, today),
            overdue_count: overdue_fiados(fiados, today).len(),
            units: unit_sales(window, categories, keyword),
        }
    }
}

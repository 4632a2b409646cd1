// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use hora_do_frango::aggregate::{
    Dashboard, DateRange, OTHER_LABEL, Period, bank_balance, cash_flow, category_breakdown,
    category_type_breakdown, cost, daily_series, days_elapsed, in_range, is_product_category,
    overdue_alert, projection, revenue, top_pending, total_overdue, total_pending, unit_sales,
};
use hora_do_frango::models::{
    Bank, Category, Fiado, Transaction, TransactionType, default_categories,
};
use rust_decimal::Decimal;
use TransactionType::{Expense, Income};

fn d(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(id: &str, date: &str, amount: &str, kind: TransactionType, bank: &str, cat: &str) -> Transaction {
    Transaction {
        id: id.into(),
        date: day(date),
        description: format!("tx {}", id),
        amount: d(amount),
        kind,
        bank_id: bank.into(),
        category_id: cat.into(),
        is_paid: true,
        quantity: None,
    }
}

fn fiado(id: &str, date: &str, amount: &str, paid: bool) -> Fiado {
    Fiado {
        id: id.into(),
        customer_name: format!("customer {}", id),
        amount: d(amount),
        date: day(date),
        is_paid: paid,
        notes: None,
    }
}

fn categories() -> Vec<Category> {
    vec![
        Category { id: "c1".into(), name: "Venda".into() },
        Category { id: "c4".into(), name: "Fornecedor".into() },
        Category { id: "c9".into(), name: "Frango Assado".into() },
    ]
}

#[test]
fn bank_balance_counts_only_paid_movements() {
    let bank = Bank {
        id: "b1".into(),
        name: "Caixa".into(),
        color: "#000".into(),
        initial_balance: d("100"),
    };
    let mut txs = vec![tx("t1", "2026-10-01", "50", Income, "b1", "c1")];
    assert_eq!(bank_balance(&bank, &txs), d("150"));

    let mut unpaid = tx("t2", "2026-10-02", "30", Expense, "b1", "c4");
    unpaid.is_paid = false;
    txs.push(unpaid);
    assert_eq!(bank_balance(&bank, &txs), d("150"));

    txs.push(tx("t3", "2026-10-03", "20", Expense, "b1", "c4"));
    txs.push(tx("t4", "2026-10-03", "999", Income, "other", "c1"));
    assert_eq!(bank_balance(&bank, &txs), d("130"));
}

#[test]
fn cash_flow_is_income_minus_expense_within_period() {
    let txs = vec![
        tx("t1", "2026-10-12", "200", Income, "1", "c1"),
        tx("t2", "2026-10-13", "80", Expense, "1", "c4"),
        tx("t3", "2026-10-19", "500", Income, "1", "c1"),
        tx("t4", "2026-10-11", "40", Expense, "1", "c4"),
    ];
    let week = Period::Week.range(day("2026-10-14"));
    assert_eq!(cash_flow(in_range(&txs, week)), d("120"));
    assert_eq!(revenue(in_range(&txs, week)), d("200"));
    assert_eq!(cost(in_range(&txs, week)), d("80"));
    assert_eq!(cash_flow(&txs), d("580"));
}

#[test]
fn week_runs_monday_to_sunday() {
    let wed = day("2026-10-14");
    assert_eq!(DateRange::week_of(wed), DateRange::new(day("2026-10-12"), day("2026-10-18")));
    let sunday = day("2026-10-18");
    assert_eq!(DateRange::week_of(sunday).start, day("2026-10-12"));
    let monday = day("2026-10-12");
    assert_eq!(DateRange::week_of(monday).end, day("2026-10-18"));
}

#[test]
fn named_periods_resolve_against_today() {
    let today = day("2026-03-01");
    assert_eq!(Period::Today.range(today), DateRange::day(today));
    assert_eq!(Period::Yesterday.range(today), DateRange::day(day("2026-02-28")));
    assert_eq!(
        Period::Month.range(today),
        DateRange::new(day("2026-03-01"), day("2026-03-31"))
    );
    assert_eq!(Period::parse("semana"), Some(Period::Week));
    assert_eq!(Period::parse("fortnight"), None);
    assert_eq!(DateRange::month(2024, 2).unwrap().end, day("2024-02-29"));
    assert!(DateRange::month(2024, 13).is_none());
}

#[test]
fn projection_extrapolates_and_guards_zero_days() {
    assert_eq!(projection(d("300"), 10, 31), d("930"));
    assert_eq!(projection(d("300"), 0, 31), Decimal::ZERO);

    let oct = DateRange::month(2026, 10).unwrap();
    assert_eq!(days_elapsed(oct, day("2026-10-14")), 14);
    assert_eq!(days_elapsed(oct, day("2026-11-02")), 31);
    assert_eq!(days_elapsed(oct, day("2026-09-30")), 0);
}

#[test]
fn pending_and_overdue_use_one_threshold() {
    let today = day("2026-10-18");
    let fiados = vec![
        fiado("f1", "2026-09-08", "200", false), // 40 days
        fiado("f2", "2026-09-18", "50", false),  // exactly 30 days
        fiado("f3", "2026-10-10", "25", false),
        fiado("f4", "2026-08-01", "999", true),
    ];
    assert_eq!(total_pending(&fiados), d("275"));
    assert_eq!(total_overdue(&fiados, today), d("200"));
    assert!(fiados[0].is_overdue(today));
    assert!(!fiados[1].is_overdue(today));
    assert_eq!(
        overdue_alert(&fiados, today).unwrap(),
        "1 customer(s) pending for more than 30 days"
    );
    assert!(overdue_alert(&fiados[1..], today).is_none());

    let top = top_pending(&fiados, 2);
    assert_eq!(top.iter().map(|f| f.id.as_str()).collect::<Vec<_>>(), ["f1", "f2"]);
}

#[test]
fn category_breakdown_sorts_and_shares_add_up() {
    let mut unpaid = tx("t5", "2026-10-01", "1000", Income, "1", "c1");
    unpaid.is_paid = false;
    let txs = vec![
        tx("t1", "2026-10-01", "300", Income, "1", "c1"),
        tx("t2", "2026-10-01", "100", Expense, "1", "c4"),
        tx("t3", "2026-10-01", "50", Income, "1", "ghost"),
        tx("t4", "2026-10-02", "200", Expense, "1", "c1"),
        unpaid,
    ];
    let lines = category_breakdown(&txs, &categories());
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].label, "Venda");
    assert_eq!(lines[0].amount, d("500"));
    assert_eq!(lines[2].label, OTHER_LABEL);

    let total: Decimal = lines.iter().map(|l| l.share_pct).sum();
    assert!((total - Decimal::ONE_HUNDRED).abs() < d("0.0001"));

    let nothing: Vec<Transaction> = Vec::new();
    let empty = category_breakdown(&nothing, &categories());
    assert!(empty.is_empty());
}

#[test]
fn breakdown_by_type_keeps_income_and_expense_apart() {
    let txs = vec![
        tx("t1", "2026-10-01", "300", Income, "1", "c1"),
        tx("t2", "2026-10-01", "200", Expense, "1", "c1"),
    ];
    let lines = category_type_breakdown(&txs, &categories());
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].kind, Some(Income));
    assert_eq!(lines[1].kind, Some(Expense));
    assert_eq!(lines[0].share_pct, d("60"));
    assert_eq!(lines[1].share_pct, d("40"));
}

#[test]
fn unit_sales_match_category_keyword_case_insensitively() {
    let mut sale = tx("t1", "2026-10-14", "140", Income, "1", "c9");
    sale.quantity = Some(4);
    let mut purchase = tx("t2", "2026-10-14", "60", Expense, "1", "c9");
    purchase.quantity = Some(0);
    let other = tx("t3", "2026-10-14", "500", Income, "1", "c1");
    let txs = vec![sale, purchase, other];

    let u = unit_sales(&txs, &categories(), "FRANGO");
    assert_eq!(u.units, 4);
    assert_eq!(u.revenue, d("140"));
    assert_eq!(u.cost, d("60"));
    assert_eq!(u.average_ticket, d("35"));
    assert_eq!(u.unit_profit, d("20"));

    let none = unit_sales(&txs, &categories(), "pizza");
    assert_eq!(none.units, 0);
    assert_eq!(none.average_ticket, Decimal::ZERO);
}

#[test]
fn daily_series_fills_every_day_of_the_window() {
    let txs = vec![
        tx("t1", "2026-10-12", "10", Income, "1", "c1"),
        tx("t2", "2026-10-12", "4", Expense, "1", "c4"),
        tx("t3", "2026-10-15", "7", Income, "1", "c1"),
    ];
    let rows = daily_series(&txs, DateRange::week_of(day("2026-10-14")));
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0].income, d("10"));
    assert_eq!(rows[0].expense, d("4"));
    assert_eq!(rows[3].income, d("7"));
    assert_eq!(rows[6].income, Decimal::ZERO);
}

#[test]
fn dashboard_combines_window_and_month_figures() {
    let today = day("2026-10-10");
    let mut sale = tx("t1", "2026-10-10", "100", Income, "1", "c9");
    sale.quantity = Some(2);
    let txs = vec![
        sale,
        tx("t2", "2026-10-10", "30", Expense, "1", "c4"),
        tx("t3", "2026-10-02", "200", Income, "1", "c1"),
        tx("t4", "2026-09-30", "999", Income, "1", "c1"),
    ];
    let fiados = vec![fiado("f1", "2026-08-01", "80", false)];
    let dash = Dashboard::compute(
        &txs,
        &categories(),
        &fiados,
        Period::Today.range(today),
        DateRange::month_of(today),
        today,
        "frango",
    );
    assert_eq!(dash.cash, d("70"));
    assert_eq!(dash.profit, dash.cash);
    assert_eq!(dash.cost, d("30"));
    assert_eq!(dash.sold, d("100"));
    assert_eq!(dash.month_revenue, d("300"));
    assert_eq!(dash.month_expenses, d("30"));
    assert_eq!(dash.projection, d("930"));
    assert_eq!(dash.total_overdue, d("80"));
    assert_eq!(dash.overdue_count, 1);
    assert_eq!(dash.units.units, 2);
}

#[test]
fn product_keyword_needs_a_matching_category() {
    assert!(default_categories().iter().all(|c| !is_product_category(c, "frango")));
    let cats = categories();
    let matched: Vec<&str> = cats
        .iter()
        .filter(|c| is_product_category(c, "frango"))
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(matched, ["c9"]);
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month boundary detection and the closing snapshot of the ended month.

use chrono::{Datelike, NaiveDateTime};
use rust_decimal::Decimal;

use crate::aggregate::{cost, revenue, safe_div};
use crate::models::{MonthHistory, Transaction, month_year_label};

/// True when `now` sits in a different calendar month than `last_check`.
pub fn month_changed(last_check: NaiveDateTime, now: NaiveDateTime) -> bool {
    last_check.month() != now.month() || last_check.year() != now.year()
}

/// Totals over every transaction dated in the given month. Raw transactions
/// are only read.
pub fn summarize_month(transactions: &[Transaction], year: i32, month: u32) -> (Decimal, Decimal) {
    let in_month = || {
        transactions
            .iter()
            .filter(move |t| t.date.year() == year && t.date.month() == month)
    };
    (revenue(in_month()), cost(in_month()))
}

/// Returns the snapshot to append if a boundary was crossed since
/// `last_check`. The snapshot covers `last_check`'s month only.
pub fn check(
    transactions: &[Transaction],
    last_check: NaiveDateTime,
    now: NaiveDateTime,
) -> Option<MonthHistory> {
    if !month_changed(last_check, now) {
        return None;
    }
    let (total_sold, total_cost) = summarize_month(transactions, last_check.year(), last_check.month());
    let profit = total_sold - total_cost;
    let margin = safe_div(profit, total_sold) * Decimal::ONE_HUNDRED;
    Some(MonthHistory {
        month_year: month_year_label(last_check),
        total_sold,
        total_cost,
        profit,
        margin,
    })
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{overdue_alert, overdue_fiados};
use crate::store::Ledger;
use crate::utils::{fmt_money, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;

/// (issue, detail) pairs: overdue fiados first, then dangling references.
pub fn issues(ledger: &Ledger, today: NaiveDate) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    for f in overdue_fiados(&ledger.fiados, today) {
        rows.push(vec![
            "overdue_fiado".into(),
            format!("{} owes {} since {}", f.customer_name, fmt_money(&f.amount), f.date),
        ]);
    }

    for t in &ledger.transactions {
        if ledger.bank(&t.bank_id).is_none() {
            rows.push(vec![
                "txn_unknown_bank".into(),
                format!("{} {} ({})", t.date, t.description, t.bank_id),
            ]);
        }
        if ledger.category(&t.category_id).is_none() {
            rows.push(vec![
                "txn_unknown_category".into(),
                format!("{} {} ({})", t.date, t.description, t.category_id),
            ]);
        }
    }
    rows
}

pub fn handle(ledger: &Ledger, today: NaiveDate) -> Result<()> {
    let rows = issues(ledger, today);
    if let Some(msg) = overdue_alert(&ledger.fiados, today) {
        println!("⚠ {}", msg);
    }
    if rows.is_empty() {
        println!("✅ alerts: nothing to report");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{category_breakdown, category_type_breakdown, daily_series, in_range};
use crate::commands::resolve_window;
use crate::store::Store;
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("categories", sub)) => categories(store, sub)?,
        Some(("series", sub)) => series(store, sub)?,
        Some(("history", sub)) => history(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn categories(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = store.ledger();
    let window = resolve_window(sub, store.today())?;
    let txs = in_range(&ledger.transactions, window);
    let data = if sub.get_flag("by-type") {
        category_type_breakdown(txs, &ledger.categories)
    } else {
        category_breakdown(txs, &ledger.categories)
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|l| {
                vec![
                    l.label.clone(),
                    l.kind.map(|k| k.label().to_string()).unwrap_or_default(),
                    fmt_money(&l.amount),
                    fmt_pct(&l.share_pct),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Type", "Amount", "Share"], rows));
    }
    Ok(())
}

fn series(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let window = resolve_window(sub, store.today())?;
    let data = daily_series(&store.ledger().transactions, window);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|d| {
                vec![
                    d.date.format("%a %Y-%m-%d").to_string(),
                    fmt_money(&d.income),
                    fmt_money(&d.expense),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Day", "In", "Out"], rows));
    }
    Ok(())
}

fn history(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = &store.ledger().history;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), data)? {
        let rows = data
            .iter()
            .rev()
            .map(|h| {
                vec![
                    h.month_year.clone(),
                    fmt_money(&h.total_sold),
                    fmt_money(&h.total_cost),
                    fmt_money(&h.profit),
                    fmt_pct(&h.margin),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Sold", "Cost", "Profit", "Margin"], rows)
        );
    }
    Ok(())
}

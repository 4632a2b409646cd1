// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{Dashboard, DateRange, is_product_category, overdue_alert, top_pending};
use crate::commands::resolve_window;
use crate::config::Config;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::{Context, Result};

const TOP_PENDING: usize = 8;

pub fn compute(store: &Store, sub: &clap::ArgMatches, cfg: &Config) -> Result<Dashboard> {
    let today = store.today();
    let window = resolve_window(sub, today)?;
    let month = match sub.get_one::<String>("month") {
        Some(m) => {
            let (y, mo) = parse_month(m)?;
            DateRange::month(y, mo).with_context(|| format!("Invalid month '{}'", m))?
        }
        None => DateRange::month_of(today),
    };
    let ledger = store.ledger();
    Ok(Dashboard::compute(
        &ledger.transactions,
        &ledger.categories,
        &ledger.fiados,
        window,
        month,
        today,
        &cfg.product_keyword,
    ))
}

pub fn handle(store: &Store, sub: &clap::ArgMatches, cfg: &Config) -> Result<()> {
    let d = compute(store, sub, cfg)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &d)? {
        return Ok(());
    }

    let window = format!("{} .. {}", d.period.start, d.period.end);
    let month = d.month.start.format("%m/%Y").to_string();
    let rows = vec![
        vec![format!("Cash ({})", window), fmt_money(&d.cash)],
        vec![format!("Profit ({})", window), fmt_money(&d.profit)],
        vec![format!("Cost ({})", window), fmt_money(&d.cost)],
        vec![format!("Sold ({})", window), fmt_money(&d.sold)],
        vec![
            format!("Units of '{}' ({})", cfg.product_keyword, window),
            d.units.units.to_string(),
        ],
        vec!["Average ticket".into(), fmt_money(&d.units.average_ticket)],
        vec!["Profit per unit".into(), fmt_money(&d.units.unit_profit)],
        vec![format!("Revenue {}", month), fmt_money(&d.month_revenue)],
        vec![format!("Expenses {}", month), fmt_money(&d.month_expenses)],
        vec![format!("Projection {}", month), fmt_money(&d.projection)],
        vec!["Fiados pending".into(), fmt_money(&d.total_pending)],
        vec![
            format!("Fiados overdue ({})", d.overdue_count),
            fmt_money(&d.total_overdue),
        ],
    ];
    println!("{}", pretty_table(&["Figure", "Value"], rows));

    let ledger = store.ledger();
    if !ledger
        .categories
        .iter()
        .any(|c| is_product_category(c, &cfg.product_keyword))
    {
        println!(
            "No category name contains '{}'; unit figures stay at zero until one does \
             (e.g. `hdf category add --name Frango`) or HDF_PRODUCT_KEYWORD is changed.",
            cfg.product_keyword
        );
    }
    let top: Vec<Vec<String>> = top_pending(&ledger.fiados, TOP_PENDING)
        .into_iter()
        .map(|f| vec![f.customer_name.clone(), f.date.to_string(), fmt_money(&f.amount)])
        .collect();
    if !top.is_empty() {
        println!("{}", pretty_table(&["Owes", "Since", "Amount"], top));
    }
    if let Some(msg) = overdue_alert(&ledger.fiados, store.today()) {
        println!("⚠ {}", msg);
    }
    Ok(())
}

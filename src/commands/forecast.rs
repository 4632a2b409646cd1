// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::required;
use crate::forecast::{ForecastInput, MarginHealth, month_overhead, month_units_sold, simulate};
use crate::store::Store;
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

/// Reads the simulation inputs; overhead and units come from this month.
pub fn input_from_args(store: &Store, sub: &clap::ArgMatches) -> Result<ForecastInput> {
    let today = store.today();
    let txs = &store.ledger().transactions;
    let opt_decimal = |name: &str| -> Result<_> {
        sub.get_one::<String>(name)
            .map(|s| parse_decimal(s))
            .transpose()
    };
    Ok(ForecastInput {
        lot_cost: parse_decimal(required(sub, "lot-cost")?)?,
        units_per_lot: sub.get_one::<u32>("units-per-lot").copied().unwrap_or(0),
        selling_price: parse_decimal(required(sub, "price")?)?,
        target_qty: sub.get_one::<u32>("target-qty").copied().unwrap_or(0),
        target_revenue: opt_decimal("target-revenue")?,
        target_profit: opt_decimal("target-profit")?,
        dilute_overhead: sub.get_flag("with-overhead"),
        overhead: month_overhead(txs, today),
        units_sold_this_month: month_units_sold(txs, today),
    })
}

pub fn handle(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let input = input_from_args(store, sub)?;
    let f = simulate(&input);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &f)? {
        return Ok(());
    }
    let health = match f.health {
        MarginHealth::None => "no margin",
        MarginHealth::Low => "low margin",
        MarginHealth::Healthy => "healthy margin",
    };
    let mut rows = vec![
        vec!["Overhead this month".into(), fmt_money(&input.overhead)],
        vec!["Unit cost".into(), fmt_money(&f.unit_cost)],
        vec!["Unit profit".into(), fmt_money(&f.unit_profit)],
        vec!["Margin".into(), format!("{} ({})", fmt_pct(&f.margin_pct), health)],
        vec!["Lots to buy".into(), f.lots_to_buy.to_string()],
        vec!["Units bought".into(), f.total_units.to_string()],
        vec!["Purchase cost".into(), fmt_money(&f.total_cost)],
        vec!["Break-even units".into(), f.break_even_qty.to_string()],
    ];
    if let Some(q) = f.qty_for_target_revenue {
        rows.push(vec!["Units for target revenue".into(), q.to_string()]);
    }
    if let Some(q) = f.qty_for_target_profit {
        rows.push(vec!["Units for target profit".into(), q.to_string()]);
    }
    println!("{}", pretty_table(&["Simulation", "Value"], rows));
    Ok(())
}

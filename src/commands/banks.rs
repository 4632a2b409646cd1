// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::bank_balances;
use crate::commands::required;
use crate::store::Store;
use crate::utils::{fmt_money, id_for_bank, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            let color = required(sub, "color")?;
            let initial = parse_decimal(required(sub, "initial")?)?;
            let bank = store.add_bank(name, color, initial)?;
            println!("Added bank '{}' ({}, opening {})", bank.name, bank.color, fmt_money(&initial));
        }
        Some(("list", sub)) => {
            let ledger = store.ledger();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ledger.banks)? {
                let data = ledger
                    .banks
                    .iter()
                    .map(|b| {
                        vec![
                            b.id.clone(),
                            b.name.clone(),
                            b.color.clone(),
                            fmt_money(&b.initial_balance),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Id", "Name", "Color", "Opening"], data));
            }
        }
        Some(("rm", sub)) => {
            let name = required(sub, "name")?;
            let id = id_for_bank(store.ledger(), name)?;
            store.remove_bank(&id)?;
            println!("Removed bank '{}'", name);
        }
        Some(("balances", sub)) => balances(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn balances(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = store.ledger();
    let data = bank_balances(&ledger.banks, &ledger.transactions);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|b| vec![b.name.clone(), fmt_money(&b.balance)])
            .collect();
        println!("{}", pretty_table(&["Bank", "Balance"], rows));
    }
    Ok(())
}

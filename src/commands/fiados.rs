// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::required;
use crate::models::{Fiado, NewFiado};
use crate::store::Store;
use crate::utils::{fmt_money, id_for_bank, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Result, bail};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let date = match sub.get_one::<String>("date") {
                Some(d) => parse_date(d)?,
                None => store.today(),
            };
            let f = store.add_fiado(NewFiado {
                customer_name: required(sub, "customer")?.to_string(),
                amount: parse_decimal(required(sub, "amount")?)?,
                date,
                notes: sub.get_one::<String>("notes").cloned(),
            })?;
            println!(
                "Fiado for '{}' of {} on {} (id: {})",
                f.customer_name,
                fmt_money(&f.amount),
                f.date,
                f.id
            );
        }
        Some(("list", sub)) => list(store, sub)?,
        Some(("pay", sub)) => {
            let id = required(sub, "id")?;
            let bank_id = id_for_bank(store.ledger(), required(sub, "bank")?)?;
            match store.pay_fiado(id, &bank_id)? {
                Some(p) => println!(
                    "Received {} from '{}' (transaction {})",
                    fmt_money(&p.transaction.amount),
                    p.fiado.customer_name,
                    p.transaction.id
                ),
                None => println!("No fiado with id '{}'", id),
            }
        }
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            if !store.remove_fiado(id)? {
                bail!("Fiado '{}' not found", id);
            }
            println!("Removed fiado {}", id);
        }
        _ => {}
    }
    Ok(())
}

/// Newest entries first, optionally unpaid only.
pub fn visible_fiados<'a>(fiados: &'a [Fiado], pending_only: bool) -> Vec<&'a Fiado> {
    fiados
        .iter()
        .rev()
        .filter(|f| !pending_only || !f.is_paid)
        .collect()
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let today = store.today();
    let data = visible_fiados(&store.ledger().fiados, sub.get_flag("pending"));
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|f| {
                let status = if f.is_paid {
                    "paid"
                } else if f.is_overdue(today) {
                    "OVERDUE"
                } else {
                    "open"
                };
                vec![
                    f.id.clone(),
                    f.date.to_string(),
                    f.customer_name.clone(),
                    fmt_money(&f.amount),
                    status.to_string(),
                    f.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Customer", "Amount", "Status", "Notes"], rows)
        );
    }
    Ok(())
}

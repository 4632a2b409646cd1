// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::DateRange;
use crate::commands::required;
use crate::models::{NewTransaction, TransactionType};
use crate::store::Store;
use crate::utils::{
    bank_label, category_label, fmt_money, id_for_bank, id_for_category, maybe_print_json,
    parse_date, parse_decimal, parse_month, pretty_table,
};
use anyhow::{Context, Result, bail};
use serde::Serialize;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            if !store.remove_transaction(id)? {
                bail!("Transaction '{}' not found", id);
            }
            println!("Removed transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => store.today(),
    };
    let description = required(sub, "desc")?.to_string();
    let amount = parse_decimal(required(sub, "amount")?)?;
    let type_raw = required(sub, "type")?;
    let kind = TransactionType::parse(type_raw)
        .with_context(|| format!("Unknown type '{}', expected income|expense", type_raw))?;
    let bank_name = required(sub, "bank")?;
    let bank_id = id_for_bank(store.ledger(), bank_name)?;
    let category_id = id_for_category(store.ledger(), required(sub, "category")?)?;

    let t = store.add_transaction(NewTransaction {
        date,
        description,
        amount,
        kind,
        bank_id,
        category_id,
        is_paid: !sub.get_flag("unpaid"),
        quantity: sub.get_one::<u32>("qty").copied(),
    })?;
    println!(
        "Recorded {} {} on {} '{}' (bank: {}, id: {})",
        kind.label(),
        fmt_money(&t.amount),
        t.date,
        t.description,
        bank_name,
        t.id
    );
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.description.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.bank.clone(),
                    r.category.clone(),
                    if r.paid { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Type", "Amount", "Bank", "Category", "Paid"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub kind: String,
    pub amount: String,
    pub bank: String,
    pub category: String,
    pub paid: bool,
    pub quantity: Option<u32>,
}

/// Most recent first: by date, then by reverse insertion order.
pub fn query_rows(store: &Store, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let ledger = store.ledger();
    let month = match sub.get_one::<String>("month") {
        Some(m) => {
            let (y, mo) = parse_month(m)?;
            Some(DateRange::month(y, mo).with_context(|| format!("Invalid month '{}'", m))?)
        }
        None => None,
    };
    let bank_id = match sub.get_one::<String>("bank") {
        Some(b) => Some(id_for_bank(ledger, b)?),
        None => None,
    };
    let category_id = match sub.get_one::<String>("category") {
        Some(c) => Some(id_for_category(ledger, c)?),
        None => None,
    };

    let mut picked: Vec<_> = ledger
        .transactions
        .iter()
        .enumerate()
        .filter(|(_, t)| month.is_none_or(|r| r.contains(t.date)))
        .filter(|(_, t)| bank_id.as_ref().is_none_or(|b| &t.bank_id == b))
        .filter(|(_, t)| category_id.as_ref().is_none_or(|c| &t.category_id == c))
        .collect();
    picked.sort_by(|(ia, a), (ib, b)| b.date.cmp(&a.date).then(ib.cmp(ia)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        picked.truncate(*limit);
    }

    Ok(picked
        .into_iter()
        .map(|(_, t)| TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            description: t.description.clone(),
            kind: t.kind.label().to_string(),
            amount: format!("{:.2}", t.amount),
            bank: bank_label(ledger, &t.bank_id),
            category: category_label(ledger, &t.category_id),
            paid: t.is_paid,
            quantity: t.quantity,
        })
        .collect())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::aggregate::OTHER_LABEL;
use crate::store::Ledger;

pub const UNKNOWN_BANK_LABEL: &str = "Unknown";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// `YYYY-MM` to (year, month).
pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let d = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok((chrono::Datelike::year(&d), chrono::Datelike::month(&d)))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .replace(',', ".")
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("R$ {:.2}", d.round_dp(2))
}

pub fn fmt_pct(d: &Decimal) -> String {
    format!("{:.1}%", d.round_dp(1))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn id_for_bank(ledger: &Ledger, name: &str) -> Result<String> {
    let name = name.trim();
    ledger
        .banks
        .iter()
        .find(|b| b.name.eq_ignore_ascii_case(name) || b.id == name)
        .map(|b| b.id.clone())
        .ok_or_else(|| anyhow!("Bank '{}' not found", name))
}

pub fn id_for_category(ledger: &Ledger, name: &str) -> Result<String> {
    let name = name.trim();
    ledger
        .categories
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name) || c.id == name)
        .map(|c| c.id.clone())
        .ok_or_else(|| anyhow!("Category '{}' not found", name))
}

pub fn bank_label(ledger: &Ledger, id: &str) -> String {
    ledger
        .bank(id)
        .map(|b| b.name.clone())
        .unwrap_or_else(|| UNKNOWN_BANK_LABEL.to_string())
}

pub fn category_label(ledger: &Ledger, id: &str) -> String {
    ledger
        .category(id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| OTHER_LABEL.to_string())
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

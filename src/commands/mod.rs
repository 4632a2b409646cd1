// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod alerts;
pub mod banks;
pub mod categories;
pub mod dashboard;
pub mod fiados;
pub mod forecast;
pub mod reports;
pub mod reset;
pub mod transactions;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::aggregate::{DateRange, Period};
use crate::utils::parse_date;

pub(crate) fn required<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    sub.get_one::<String>(name)
        .with_context(|| format!("--{} is required", name))
}

/// `--from/--to` when given, otherwise the named `--period` around `today`.
pub fn resolve_window(sub: &clap::ArgMatches, today: NaiveDate) -> Result<DateRange> {
    if let (Some(from), Some(to)) = (sub.get_one::<String>("from"), sub.get_one::<String>("to")) {
        return Ok(DateRange::new(parse_date(from)?, parse_date(to)?));
    }
    let name = sub
        .get_one::<String>("period")
        .map(String::as_str)
        .unwrap_or("today");
    let period = Period::parse(name).with_context(|| format!("Unknown period '{}'", name))?;
    Ok(period.range(today))
}

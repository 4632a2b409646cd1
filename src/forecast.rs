// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Purchase simulator: unit economics of buying lots and selling units.
//! Nothing here is persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::aggregate::{DateRange, cost, in_range, safe_div};
use crate::models::Transaction;

/// Margins under this percentage are flagged as low.
pub const LOW_MARGIN_PCT: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForecastInput {
    pub lot_cost: Decimal,
    pub units_per_lot: u32,
    pub selling_price: Decimal,
    pub target_qty: u32,
    pub target_revenue: Option<Decimal>,
    pub target_profit: Option<Decimal>,
    /// Spread this month's overhead over the units sold this month.
    pub dilute_overhead: bool,
    pub overhead: Decimal,
    pub units_sold_this_month: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginHealth {
    None,
    Low,
    Healthy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Forecast {
    pub unit_cost: Decimal,
    pub lots_to_buy: u64,
    pub total_units: u64,
    pub total_cost: Decimal,
    pub unit_profit: Decimal,
    pub margin_pct: Decimal,
    pub health: MarginHealth,
    pub break_even_qty: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty_for_target_revenue: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty_for_target_profit: Option<u64>,
}

/// Rounds up to a whole unit count; negatives clamp to zero.
fn ceil_units(d: Decimal) -> u64 {
    d.ceil().to_u64().unwrap_or(0)
}

/// This month's expenses, the fixed-cost base for break-even.
pub fn month_overhead(transactions: &[Transaction], today: NaiveDate) -> Decimal {
    cost(in_range(transactions, DateRange::month_of(today)))
}

/// Units recorded on any transaction this month.
pub fn month_units_sold(transactions: &[Transaction], today: NaiveDate) -> u64 {
    in_range(transactions, DateRange::month_of(today))
        .map(|t| u64::from(t.quantity.unwrap_or(0)))
        .sum()
}

pub fn simulate(input: &ForecastInput) -> Forecast {
    let units_per_lot = Decimal::from(input.units_per_lot);
    let mut unit_cost = safe_div(input.lot_cost, units_per_lot);
    if input.dilute_overhead && input.units_sold_this_month > 0 {
        unit_cost += safe_div(input.overhead, Decimal::from(input.units_sold_this_month));
    }

    let lots_to_buy = if input.units_per_lot == 0 {
        0
    } else {
        u64::from(input.target_qty.div_ceil(input.units_per_lot))
    };
    let total_units = lots_to_buy * u64::from(input.units_per_lot);
    let total_cost = Decimal::from(lots_to_buy) * input.lot_cost;

    let unit_profit = input.selling_price - unit_cost;
    let margin_pct = safe_div(unit_profit, input.selling_price) * Decimal::ONE_HUNDRED;
    let health = if margin_pct <= Decimal::ZERO {
        MarginHealth::None
    } else if margin_pct < LOW_MARGIN_PCT {
        MarginHealth::Low
    } else {
        MarginHealth::Healthy
    };

    let profitable = unit_profit > Decimal::ZERO;
    let break_even_qty = if profitable {
        ceil_units(safe_div(input.overhead, unit_profit))
    } else {
        0
    };
    let qty_for_target_revenue = input
        .target_revenue
        .map(|r| ceil_units(safe_div(r, input.selling_price)));
    let qty_for_target_profit = input.target_profit.map(|p| {
        if profitable {
            ceil_units(safe_div(p + input.overhead, unit_profit))
        } else {
            0
        }
    });

    Forecast {
        unit_cost,
        lots_to_buy,
        total_units,
        total_cost,
        unit_profit,
        margin_pct,
        health,
        break_even_qty,
        qty_for_target_revenue,
        qty_for_target_profit,
    }
}

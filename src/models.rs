// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category credited when a fiado is settled ("Venda").
pub const SALE_CATEGORY_ID: &str = "c1";

/// Unpaid fiados older than this many days are overdue.
pub const OVERDUE_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    pub id: String,
    pub name: String,
    pub color: String,
    pub initial_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" | "receita" => Some(Self::Income),
            "expense" | "out" | "despesa" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal, // always > 0, direction lives in `kind`
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub bank_id: String,
    pub category_id: String,
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl Transaction {
    /// Amount signed by direction: income positive, expense negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// Input for a new transaction; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionType,
    pub bank_id: String,
    pub category_id: String,
    pub is_paid: bool,
    pub quantity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fiado {
    pub id: String,
    pub customer_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Fiado {
    /// Unpaid and dated strictly before `today - OVERDUE_DAYS`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_paid && (today - self.date).num_days() > OVERDUE_DAYS
    }
}

#[derive(Debug, Clone)]
pub struct NewFiado {
    pub customer_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthHistory {
    pub month_year: String, // M/YYYY
    pub total_sold: Decimal,
    pub total_cost: Decimal,
    pub profit: Decimal,
    pub margin: Decimal, // percent of total_sold
}

pub fn month_year_label(at: NaiveDateTime) -> String {
    format!("{}/{}", at.month(), at.year())
}

pub fn default_banks() -> Vec<Bank> {
    [
        ("1", "Banco do Brasil", "#F7A823"),
        ("2", "Nubank", "#8A05BE"),
        ("3", "Dinheiro", "#4CAF50"),
        ("4", "Caixa", "#1A75CF"),
        ("5", "Santander", "#EC0000"),
        ("6", "Bradesco", "#FF4B4B"),
        ("7", "Itaú", "#FF7000"),
    ]
    .into_iter()
    .map(|(id, name, color)| Bank {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
        initial_balance: Decimal::ZERO,
    })
    .collect()
}

pub fn default_categories() -> Vec<Category> {
    [
        ("c1", "Venda"),
        ("c2", "Salário"),
        ("c3", "Aluguel"),
        ("c4", "Fornecedor"),
        ("c5", "Empresa"),
        ("c6", "Colaborador"),
        ("c7", "Casa"),
        ("c8", "Carro"),
    ]
    .into_iter()
    .map(|(id, name)| Category {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

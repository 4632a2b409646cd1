// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Errors raised by the ledger store.

use rust_decimal::Decimal;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The SQLite slot table could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A collection could not be encoded for storage.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Amounts are magnitudes; direction is carried by the transaction type.
    #[error("amount must be greater than zero, got {0}")]
    InvalidAmount(Decimal),

    #[error("{0} name must not be empty")]
    EmptyName(&'static str),

    /// Paid is terminal, settling twice would book the income twice.
    #[error("fiado '{0}' is already paid")]
    FiadoAlreadyPaid(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

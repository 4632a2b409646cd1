// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Settings read from `HDF_*` environment variables (and an optional `.env`).

use serde::Deserialize;
use std::path::PathBuf;

/// - `HDF_DB_PATH` (optional): database file, defaults to the platform data dir
/// - `HDF_PRODUCT_KEYWORD` (optional): category keyword counted as unit sales
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub db_path: Option<PathBuf>,

    #[serde(default = "default_product_keyword")]
    pub product_keyword: String,
}

fn default_product_keyword() -> String {
    "frango".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: None,
            product_keyword: default_product_keyword(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::prefixed("HDF_").from_env::<Config>()
    }
}

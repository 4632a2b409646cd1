// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("br.com.horadofrango", "HoraDoFrango", "hora-do-frango"));

pub const SLOT_BANKS: &str = "hdf_banks";
pub const SLOT_CATEGORIES: &str = "hdf_categories";
pub const SLOT_TRANSACTIONS: &str = "hdf_transactions";
pub const SLOT_FIADOS: &str = "hdf_fiados";
pub const SLOT_HISTORY: &str = "hdf_history";
pub const SLOT_LAST_CHECK: &str = "hdf_last_check";

/// Bumped when a slot document changes shape.
pub const SLOT_VERSION: u32 = 1;

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("hora-do-frango.sqlite"))
}

/// Opens the database at `path_override`, or at the platform data dir.
pub fn open_or_init(path_override: Option<&Path>) -> Result<Connection> {
    let path = match path_override {
        Some(p) => {
            if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Create data dir {}", parent.display()))?;
            }
            p.to_path_buf()
        }
        None => db_path()?,
    };
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS slots(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )
}

#[derive(Serialize)]
struct SlotOut<'a, T: Serialize> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct SlotIn<T> {
    #[allow(dead_code)]
    version: u32,
    data: T,
}

pub fn read_raw(conn: &Connection, key: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row("SELECT value FROM slots WHERE key=?1", params![key], |r| {
        r.get(0)
    })
    .optional()
}

/// Decodes a slot document, accepting both the versioned envelope and a bare
/// legacy value. Returns `None` when the slot is absent or unreadable.
pub fn read_slot<T: DeserializeOwned>(conn: &Connection, key: &str) -> rusqlite::Result<Option<T>> {
    let Some(raw) = read_raw(conn, key)? else {
        return Ok(None);
    };
    if let Ok(slot) = serde_json::from_str::<SlotIn<T>>(&raw) {
        return Ok(Some(slot.data));
    }
    match serde_json::from_str::<T>(&raw) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            tracing::warn!(slot = key, error = %e, "malformed slot, falling back to default");
            Ok(None)
        }
    }
}

pub fn write_slot<T: Serialize>(
    conn: &Connection,
    key: &str,
    value: &T,
) -> Result<(), crate::error::LedgerError> {
    let doc = serde_json::to_string(&SlotOut {
        version: SLOT_VERSION,
        data: value,
    })?;
    conn.execute(
        "INSERT INTO slots(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
        params![key, doc],
    )?;
    tracing::debug!(slot = key, bytes = doc.len(), "slot saved");
    Ok(())
}

pub fn clear_slots(conn: &Connection) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM slots", [])
}

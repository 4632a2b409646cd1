// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use hora_do_frango::{cli, commands, config::Config, db, store::Store};

fn main() -> Result<()> {
    // Logs go to stderr; RUST_LOG raises verbosity.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let cfg = Config::from_env().context("Invalid HDF_* environment settings")?;
    let db_override = matches
        .get_one::<PathBuf>("db")
        .cloned()
        .or_else(|| cfg.db_path.clone());

    let conn = db::open_or_init(db_override.as_deref())?;
    let mut store = Store::open(conn)?;
    tracing::debug!(
        transactions = store.ledger().transactions.len(),
        fiados = store.ledger().fiados.len(),
        "store loaded"
    );

    match matches.subcommand() {
        Some(("init", _)) => match &db_override {
            Some(p) => println!("Database initialized at {}", p.display()),
            None => println!("Database initialized at {}", db::db_path()?.display()),
        },
        Some(("bank", sub)) => commands::banks::handle(&mut store, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut store, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut store, sub)?,
        Some(("fiado", sub)) => commands::fiados::handle(&mut store, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&store, sub, &cfg)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("forecast", sub)) => commands::forecast::handle(&store, sub)?,
        Some(("alerts", _)) => commands::alerts::handle(store.ledger(), store.today())?,
        Some(("reset", sub)) => commands::reset::handle(&mut store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::required;
use crate::store::Store;
use crate::utils::{id_for_category, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let cat = store.add_category(required(sub, "name")?)?;
            println!("Added category '{}'", cat.name);
        }
        Some(("list", sub)) => {
            let categories = &store.ledger().categories;
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), categories)? {
                return Ok(());
            }
            let data = categories
                .iter()
                .map(|c| vec![c.id.clone(), c.name.clone()])
                .collect();
            println!("{}", pretty_table(&["Id", "Category"], data));
        }
        Some(("rm", sub)) => {
            let name = required(sub, "name")?;
            let id = id_for_category(store.ledger(), name)?;
            store.remove_category(&id)?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use anyhow::{Result, bail};

pub fn handle(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        bail!("Refusing to erase all data without --yes (this cannot be undone)");
    }
    store.reset_all_data()?;
    println!("All data erased; default banks and categories restored");
    Ok(())
}

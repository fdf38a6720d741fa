// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::{Ctx, json_flags};
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let (json_flag, jsonl_flag) = json_flags(sub);
        let categories = ctx.store.categories()?;
        if !maybe_print_json(json_flag, jsonl_flag, &categories)? {
            let rows = categories
                .iter()
                .map(|c| {
                    vec![
                        c.id.to_string(),
                        c.icon.clone(),
                        c.name.clone(),
                        c.name_te.clone(),
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["ID", "", "Category", "Telugu"], rows));
        }
    }
    Ok(())
}

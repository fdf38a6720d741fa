// Copyright (c) 2025 Soumyadip Sarkar.
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
        let profiles = ctx.store.profiles()?;
        if !maybe_print_json(json_flag, jsonl_flag, &profiles)? {
            let rows = profiles
                .iter()
                .map(|p| vec![p.id.to_string(), p.name.clone(), p.display_name.clone()])
                .collect();
            println!("{}", pretty_table(&["ID", "Name", "Display name"], rows));
        }
    }
    Ok(())
}

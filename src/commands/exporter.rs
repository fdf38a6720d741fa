// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};

use super::expenses::{expense_rows, filter_from_args};
use super::{Ctx, required};

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(ctx, sub),
        _ => Ok(()),
    }
}

fn export_expenses(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = required(sub, "out")?;
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let filter = filter_from_args(ctx.store, sub)?;
    let rows = expense_rows(ctx.store, &filter)?;

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)
            .with_context(|| format!("Could not create {}", out))?;
        wtr.write_record(["Date", "Profile", "Category", "Amount", "Note"])?;
        for r in &rows {
            wtr.write_record([
                r.date.to_string(),
                r.profile.clone(),
                r.category.clone(),
                r.amount.to_string(),
                r.note.clone().unwrap_or_default(),
            ])?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(out, serde_json::to_string_pretty(&rows)?)
            .with_context(|| format!("Could not write {}", out))?;
    }
    println!("Exported {} expenses to {}", rows.len(), out);
    Ok(())
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::{Ctx, json_flags, required};
use crate::models::NewBudget;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

/// Without `--profile` the budget covers the whole household; without
/// `--category` it covers every category.
fn set(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let profile = match sub.get_one::<String>("profile") {
        Some(p) => Some(ctx.store.find_profile(p)?),
        None => None,
    };
    let category = match sub.get_one::<String>("category") {
        Some(c) => Some(ctx.store.find_category(c)?),
        None => None,
    };
    let amount = parse_decimal(required(sub, "amount")?)?;
    let period = required(sub, "period")?.trim().to_lowercase();

    ctx.store.set_budget(&NewBudget {
        profile_id: profile.as_ref().map(|p| p.id),
        category_id: category.as_ref().map(|c| c.id),
        amount,
        period: period.clone(),
    })?;
    println!(
        "Budget set for {} / {} ({}) = {}",
        profile.map(|p| p.display_name).unwrap_or_else(|| "Family".into()),
        category.map(|c| c.name).unwrap_or_else(|| "All".into()),
        period,
        fmt_money(&amount)
    );
    Ok(())
}

fn list(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let budgets = ctx.store.budgets()?;
    if maybe_print_json(json_flag, jsonl_flag, &budgets)? {
        return Ok(());
    }
    let profiles = ctx.store.profiles()?;
    let categories = ctx.store.categories()?;
    let rows = budgets
        .iter()
        .map(|b| {
            let who = b
                .profile_id
                .and_then(|id| profiles.iter().find(|p| p.id == id))
                .map(|p| p.display_name.clone())
                .unwrap_or_else(|| "Family".into());
            let what = b
                .category_id
                .and_then(|id| categories.iter().find(|c| c.id == id))
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "All".into());
            vec![who, what, b.period.clone(), fmt_money(&b.amount)]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Profile", "Category", "Period", "Budget"], rows)
    );
    Ok(())
}

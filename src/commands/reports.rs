// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::{Ctx, json_flags};
use crate::stats::{dashboard_stats, family_overview};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn dashboard(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let profile = ctx.profile(sub)?;
    let period = ctx.period(sub);
    let stats = dashboard_stats(ctx.store, profile.as_ref().map(|p| p.id), period, ctx.today)?;
    if maybe_print_json(json_flag, jsonl_flag, &stats)? {
        return Ok(());
    }

    if let Some(p) = &profile {
        println!(
            "{} spent {} ({})",
            p.display_name,
            fmt_money(&stats.total_spent),
            period
        );
    }
    let top: Vec<String> = stats
        .top_categories
        .iter()
        .map(|c| format!("{} {}", c.icon, c.category))
        .collect();
    if !top.is_empty() {
        println!("Top: {}", top.join(", "));
    }

    let rows = stats
        .category_breakdown
        .iter()
        .map(|c| {
            vec![
                format!("{} {}", c.icon, c.category),
                c.category_te.clone(),
                fmt_money(&c.amount),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Telugu", "Spent"], rows));

    let trend = stats
        .weekly_trend
        .iter()
        .map(|d| vec![d.date.format("%a %d %b").to_string(), fmt_money(&d.amount)])
        .collect();
    println!("{}", pretty_table(&["Day", "Spent"], trend));
    Ok(())
}

pub fn family(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let period = ctx.period(sub);
    let overview = family_overview(ctx.store, period, ctx.today)?;
    if maybe_print_json(json_flag, jsonl_flag, &overview)? {
        return Ok(());
    }

    println!(
        "Family spent {} ({})",
        fmt_money(&overview.total_family),
        period
    );
    let people = overview
        .profile_spending
        .iter()
        .map(|p| vec![p.profile.clone(), fmt_money(&p.amount)])
        .collect();
    println!("{}", pretty_table(&["Profile", "Spent"], people));

    let cats = overview
        .top_categories
        .iter()
        .map(|c| vec![c.category.clone(), c.category_te.clone(), fmt_money(&c.amount)])
        .collect();
    println!("{}", pretty_table(&["Category", "Telugu", "Spent"], cats));
    Ok(())
}

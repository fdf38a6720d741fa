// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use super::{Ctx, json_flags, required};
use crate::billing::card_dashboard;
use crate::models::{CardUpdate, DEFAULT_CARD_COLOR, NewCard};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, parse_id, pretty_table};

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("update", sub)) => update(ctx, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(required(sub, "id")?)?;
            let detached = ctx.store.delete_card(id)?;
            println!(
                "Deleted card {}; {} expenses now show as cash",
                id, detached
            );
        }
        Some(("show", sub)) => show(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let profile = ctx.require_profile(sub)?;
    let card = NewCard {
        profile_id: profile.id,
        card_name: required(sub, "name")?.trim().to_string(),
        card_last_four: sub
            .get_one::<String>("last-four")
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        credit_limit: parse_decimal(required(sub, "limit")?)?,
        billing_day: sub
            .get_one::<u32>("billing-day")
            .copied()
            .ok_or_else(|| anyhow!("Missing required argument --billing-day"))?,
        card_color: sub
            .get_one::<String>("color")
            .cloned()
            .unwrap_or_else(|| DEFAULT_CARD_COLOR.to_string()),
    };
    let id = ctx.store.add_card(&card)?;
    println!(
        "Added card {} '{}' for {} (billing day {})",
        id, card.card_name, profile.display_name, card.billing_day
    );
    Ok(())
}

fn list(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let profile_id = match sub.get_one::<String>("profile") {
        Some(p) => Some(ctx.store.find_profile(p)?.id),
        None => None,
    };
    let cards = ctx.store.cards(profile_id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &cards)? {
        let profiles = ctx.store.profiles()?;
        let rows = cards
            .iter()
            .map(|c| {
                let owner = profiles
                    .iter()
                    .find(|p| p.id == c.profile_id)
                    .map(|p| p.display_name.clone())
                    .unwrap_or_default();
                vec![
                    c.id.to_string(),
                    c.card_name.clone(),
                    c.card_last_four.clone(),
                    owner,
                    fmt_money(&c.credit_limit),
                    c.billing_day.to_string(),
                    c.card_color.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Card", "Last four", "Profile", "Limit", "Billing day", "Color"],
                rows,
            )
        );
    }
    Ok(())
}

/// Fields not given on the command line keep their current values.
fn update(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required(sub, "id")?)?;
    let current = ctx.store.require_card(id)?;
    let update = CardUpdate {
        card_name: sub
            .get_one::<String>("name")
            .map(|s| s.trim().to_string())
            .unwrap_or(current.card_name),
        card_last_four: sub
            .get_one::<String>("last-four")
            .map(|s| s.trim().to_string())
            .unwrap_or(current.card_last_four),
        credit_limit: match sub.get_one::<String>("limit") {
            Some(s) => parse_decimal(s)?,
            None => current.credit_limit,
        },
        billing_day: sub
            .get_one::<u32>("billing-day")
            .copied()
            .unwrap_or(current.billing_day),
        card_color: sub
            .get_one::<String>("color")
            .cloned()
            .unwrap_or(current.card_color),
    };
    ctx.store.update_card(id, &update)?;
    println!("Updated card {} '{}'", id, update.card_name);
    Ok(())
}

fn show(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let id = parse_id(required(sub, "id")?)?;
    let dash = card_dashboard(ctx.store, id, ctx.today)?;
    if maybe_print_json(json_flag, jsonl_flag, &dash)? {
        return Ok(());
    }

    let info = &dash.card_info;
    let title = if info.card_last_four.is_empty() {
        info.card_name.clone()
    } else {
        format!("{} ••{}", info.card_name, info.card_last_four)
    };
    println!("{}", title);
    println!(
        "Cycle {} .. {}  spent {} of {}  available {}  utilization {}%",
        dash.cycle_start,
        dash.cycle_end,
        fmt_money(&dash.total_spent),
        fmt_money(&info.credit_limit),
        fmt_money(&dash.available_balance),
        dash.utilization
    );

    let cats = dash
        .category_breakdown
        .iter()
        .map(|c| vec![format!("{} {}", c.icon, c.category), fmt_money(&c.amount)])
        .collect();
    println!("{}", pretty_table(&["Category", "This cycle"], cats));

    let recent = dash
        .recent_transactions
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                format!("{} {}", t.icon, t.category),
                fmt_money(&t.amount),
                t.note.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Category", "Amount", "Note"], recent)
    );
    Ok(())
}

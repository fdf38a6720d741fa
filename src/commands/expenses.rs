// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{Ctx, json_flags, required};
use crate::error::SpendResult;
use crate::models::{ExpenseFilter, NewExpense};
use crate::store::ExpenseStore;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, parse_id, pretty_table};

/// Shown in place of a card name for expenses paid without a card.
pub const CASH: &str = "Cash";

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(required(sub, "id")?)?;
            ctx.store.delete_expense(id)?;
            println!("Deleted expense {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let profile = ctx.require_profile(sub)?;
    let category = ctx.store.find_category(required(sub, "category")?)?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => ctx.today,
    };
    let card_id = sub
        .get_one::<String>("card")
        .map(|s| parse_id(s))
        .transpose()?;
    let note = sub
        .get_one::<String>("note")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let id = ctx.store.add_expense(&NewExpense {
        profile_id: profile.id,
        category_id: category.id,
        amount,
        date,
        note,
        card_id,
    })?;
    println!(
        "Recorded expense {}: {} {} on {} for {}",
        id,
        category.icon,
        fmt_money(&amount),
        date,
        profile.display_name
    );
    Ok(())
}

fn list(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let filter = filter_from_args(ctx.store, sub)?;
    let data = expense_rows(ctx.store, &filter)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.to_string(),
                    r.profile.clone(),
                    format!("{} {}", r.icon, r.category),
                    fmt_money(&r.amount),
                    r.card.clone(),
                    r.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Profile", "Category", "Amount", "Paid with", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

/// Build an expense filter from `--profile`, `--card`, `--from`, `--to` and
/// `--limit`, whichever the subcommand defines.
pub fn filter_from_args(store: &dyn ExpenseStore, sub: &clap::ArgMatches) -> Result<ExpenseFilter> {
    let mut filter = ExpenseFilter::default();
    if let Some(p) = sub.get_one::<String>("profile") {
        filter.profile_id = Some(store.find_profile(p)?.id);
    }
    if let Ok(Some(card)) = sub.try_get_one::<String>("card") {
        filter.card_id = Some(parse_id(card)?);
    }
    filter.start = optional_date(sub, "from")?;
    filter.end = optional_date(sub, "to")?;
    if let Ok(Some(limit)) = sub.try_get_one::<usize>("limit") {
        filter.limit = Some(*limit);
    }
    Ok(filter)
}

fn optional_date(sub: &clap::ArgMatches, id: &str) -> Result<Option<NaiveDate>> {
    sub.get_one::<String>(id).map(|s| parse_date(s)).transpose()
}

/// One expense with its references resolved for display.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub date: NaiveDate,
    pub profile: String,
    pub category: String,
    pub icon: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub note: Option<String>,
    pub card: String,
}

/// Matching expenses, most recent first, with profile, category and card
/// names filled in. Expenses without a card show as [`CASH`].
pub fn expense_rows(store: &dyn ExpenseStore, filter: &ExpenseFilter) -> SpendResult<Vec<ExpenseRow>> {
    let expenses = store.expenses(filter)?;
    let profiles: HashMap<i64, String> = store
        .profiles()?
        .into_iter()
        .map(|p| (p.id, p.display_name))
        .collect();
    let categories: HashMap<i64, (String, String)> = store
        .categories()?
        .into_iter()
        .map(|c| (c.id, (c.name, c.icon)))
        .collect();
    let cards: HashMap<i64, String> = store
        .cards(None)?
        .into_iter()
        .map(|c| (c.id, c.card_name))
        .collect();

    Ok(expenses
        .into_iter()
        .map(|e| {
            let (category, icon) = categories.get(&e.category_id).cloned().unwrap_or_default();
            ExpenseRow {
                id: e.id,
                date: e.date,
                profile: profiles.get(&e.profile_id).cloned().unwrap_or_default(),
                category,
                icon,
                amount: e.amount,
                note: e.note,
                card: e
                    .card_id
                    .and_then(|id| cards.get(&id).cloned())
                    .unwrap_or_else(|| CASH.to_string()),
            }
        })
        .collect())
}

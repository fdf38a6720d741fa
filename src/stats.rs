// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spending aggregation: the per-profile dashboard and the family overview.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{SpendError, SpendResult};
use crate::models::{Category, Expense, ExpenseFilter};
use crate::period::{Period, dashboard_window, family_window, trailing_week};
use crate::store::ExpenseStore;

pub const DASHBOARD_TOP: usize = 3;
pub const FAMILY_TOP: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub category_te: String,
    pub icon: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
    pub category_breakdown: Vec<CategoryTotal>,
    pub top_categories: Vec<CategoryTotal>,
    pub weekly_trend: Vec<DailyTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileTotal {
    pub profile: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyCategoryTotal {
    pub category: String,
    pub category_te: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyOverview {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_family: Decimal,
    pub profile_spending: Vec<ProfileTotal>,
    pub top_categories: Vec<FamilyCategoryTotal>,
}

/// Sum of amounts. Overflowing `Decimal` is reported instead of panicking.
pub fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> SpendResult<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, a| acc.checked_add(a))
        .ok_or_else(|| SpendError::InvalidInput("spending total is too large to represent".into()))
}

pub fn total(expenses: &[Expense]) -> SpendResult<Decimal> {
    checked_sum(expenses.iter().map(|e| e.amount))
}

fn sum_by<K: Ord>(
    expenses: &[Expense],
    key: impl Fn(&Expense) -> K,
) -> SpendResult<BTreeMap<K, Decimal>> {
    let mut sums: BTreeMap<K, Decimal> = BTreeMap::new();
    for e in expenses {
        let slot = sums.entry(key(e)).or_insert(Decimal::ZERO);
        *slot = checked_sum([*slot, e.amount])?;
    }
    Ok(sums)
}

/// Per-category totals, largest first, categories without spend left out.
/// Equal totals keep category id order.
pub fn category_breakdown(
    expenses: &[Expense],
    categories: &[Category],
) -> SpendResult<Vec<CategoryTotal>> {
    let sums = sum_by(expenses, |e| e.category_id)?;
    let by_id: HashMap<i64, &Category> = categories.iter().map(|c| (c.id, c)).collect();

    let mut out = Vec::new();
    for (id, amount) in sums {
        if amount <= Decimal::ZERO {
            continue;
        }
        match by_id.get(&id) {
            Some(c) => out.push(CategoryTotal {
                category: c.name.clone(),
                category_te: c.name_te.clone(),
                icon: c.icon.clone(),
                amount,
            }),
            None => log::warn!("skipping spend of {} on unknown category {}", amount, id),
        }
    }
    out.sort_by(|a, b| b.amount.cmp(&a.amount));
    Ok(out)
}

fn daily_totals(expenses: &[Expense], today: NaiveDate) -> SpendResult<Vec<DailyTotal>> {
    trailing_week(today)
        .into_iter()
        .map(|date| {
            let amount = checked_sum(
                expenses
                    .iter()
                    .filter(|e| e.date == date)
                    .map(|e| e.amount),
            )?;
            Ok(DailyTotal { date, amount })
        })
        .collect()
}

/// Dashboard for one profile. `profile_id` is required; the trend always
/// covers the seven days ending `today`, whatever the period.
pub fn dashboard_stats(
    store: &dyn ExpenseStore,
    profile_id: Option<i64>,
    period: Period,
    today: NaiveDate,
) -> SpendResult<DashboardStats> {
    let profile_id = profile_id
        .ok_or_else(|| SpendError::InvalidInput("a profile is required for the dashboard".into()))?;
    store.profile(profile_id)?;

    let window = dashboard_window(period, today);
    log::debug!(
        "dashboard for profile {} over {} ({} .. {})",
        profile_id,
        period,
        window.start,
        window.end
    );
    let in_window = store
        .expenses(&ExpenseFilter::for_profile(profile_id).between(window.start, window.end))?;
    let categories = store.categories()?;

    let week = trailing_week(today);
    let trend_source =
        store.expenses(&ExpenseFilter::for_profile(profile_id).between(week[0], today))?;

    let breakdown = category_breakdown(&in_window, &categories)?;
    let top_categories = breakdown.iter().take(DASHBOARD_TOP).cloned().collect();
    Ok(DashboardStats {
        total_spent: total(&in_window)?,
        category_breakdown: breakdown,
        top_categories,
        weekly_trend: daily_totals(&trend_source, today)?,
    })
}

/// Household-wide totals over the family window for `period`.
pub fn family_overview(
    store: &dyn ExpenseStore,
    period: Period,
    today: NaiveDate,
) -> SpendResult<FamilyOverview> {
    let window = family_window(period, today);
    log::debug!(
        "family overview over {} ({} .. {})",
        period,
        window.start,
        window.end
    );
    let expenses = store.expenses(&ExpenseFilter::default().between(window.start, window.end))?;
    let profiles = store.profiles()?;
    let categories = store.categories()?;

    let per_profile = sum_by(&expenses, |e| e.profile_id)?;
    let mut profile_spending: Vec<ProfileTotal> = profiles
        .iter()
        .map(|p| ProfileTotal {
            profile: p.display_name.clone(),
            amount: per_profile.get(&p.id).copied().unwrap_or(Decimal::ZERO),
        })
        .collect();
    profile_spending.sort_by(|a, b| b.amount.cmp(&a.amount));

    let top_categories = category_breakdown(&expenses, &categories)?
        .into_iter()
        .take(FAMILY_TOP)
        .map(|c| FamilyCategoryTotal {
            category: c.category,
            category_te: c.category_te,
            amount: c.amount,
        })
        .collect();

    Ok(FamilyOverview {
        total_family: total(&expenses)?,
        profile_spending,
        top_categories,
    })
}

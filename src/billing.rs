// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Credit card billing cycles and the per-card dashboard.
//!
//! A cycle starts on the card's billing day and ends the day before the next
//! billing day. Billing days past the end of a short month are clamped to
//! that month's last day, so a card billed on the 31st starts its February
//! cycle on the 28th (29th in leap years).

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{SpendError, SpendResult};
use crate::models::{CreditCard, ExpenseFilter};
use crate::stats::{CategoryTotal, category_breakdown, total};
use crate::store::ExpenseStore;
use crate::utils::month_end;

pub const CARD_TOP_CATEGORIES: usize = 5;
pub const CARD_RECENT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BillingCycle {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BillingCycle {
    /// The cycle containing `today` for a card billed on `billing_day`.
    pub fn resolve(billing_day: u32, today: NaiveDate) -> SpendResult<Self> {
        if !(1..=31).contains(&billing_day) {
            return Err(SpendError::InvalidInput(format!(
                "billing day must be between 1 and 31, got {}",
                billing_day
            )));
        }
        let (y, m) = (today.year(), today.month());
        let this_month = anchor(y, m, billing_day)?;
        let cycle = if today >= this_month {
            let (ny, nm) = next_month(y, m);
            BillingCycle {
                start: this_month,
                end: day_before(anchor(ny, nm, billing_day)?)?,
            }
        } else {
            let (py, pm) = prev_month(y, m);
            BillingCycle {
                start: anchor(py, pm, billing_day)?,
                end: day_before(this_month)?,
            }
        };
        Ok(cycle)
    }
}

/// The billing date in the given month, clamped to the month's last day.
fn anchor(year: i32, month: u32, billing_day: u32) -> SpendResult<NaiveDate> {
    let last = month_end(year, month)?;
    Ok(last.with_day(billing_day.min(last.day())).unwrap_or(last))
}

fn day_before(d: NaiveDate) -> SpendResult<NaiveDate> {
    d.pred_opt()
        .ok_or_else(|| SpendError::InvalidInput(format!("no day before {}", d)))
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Percentage of the limit used, to one decimal place. Zero when the card
/// has no positive limit; an error when the ratio does not fit a `Decimal`.
pub fn utilization(spent: Decimal, credit_limit: Decimal) -> SpendResult<Decimal> {
    if credit_limit <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    spent
        .checked_div(credit_limit)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp(1))
        .ok_or_else(|| {
            SpendError::InvalidInput(format!(
                "utilization of {} against a limit of {} is out of range",
                spent, credit_limit
            ))
        })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardInfo {
    pub card_name: String,
    pub card_last_four: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub credit_limit: Decimal,
    pub billing_day: u32,
    pub card_color: String,
}

impl From<&CreditCard> for CardInfo {
    fn from(c: &CreditCard) -> Self {
        Self {
            card_name: c.card_name.clone(),
            card_last_four: c.card_last_four.clone(),
            credit_limit: c.credit_limit,
            billing_day: c.billing_day,
            card_color: c.card_color.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardTransaction {
    pub id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub category: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardDashboard {
    pub card_info: CardInfo,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub available_balance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub utilization: Decimal,
    pub cycle_start: NaiveDate,
    pub cycle_end: NaiveDate,
    pub category_breakdown: Vec<CategoryTotal>,
    pub recent_transactions: Vec<CardTransaction>,
}

pub fn card_dashboard(
    store: &dyn ExpenseStore,
    card_id: i64,
    today: NaiveDate,
) -> SpendResult<CardDashboard> {
    let card = store.require_card(card_id)?;
    let cycle = BillingCycle::resolve(card.billing_day, today)?;
    log::debug!(
        "card {} billing cycle {} .. {}",
        card_id,
        cycle.start,
        cycle.end
    );

    let in_cycle =
        store.expenses(&ExpenseFilter::for_card(card_id).between(cycle.start, cycle.end))?;
    let categories = store.categories()?;
    let spent = total(&in_cycle)?;
    let available_balance = card.credit_limit.checked_sub(spent).ok_or_else(|| {
        SpendError::InvalidInput(format!("available balance of card {} is out of range", card_id))
    })?;

    let recent = store.expenses(&ExpenseFilter::for_card(card_id).limit(CARD_RECENT))?;
    let recent_transactions = recent
        .into_iter()
        .map(|e| {
            let cat = categories.iter().find(|c| c.id == e.category_id);
            CardTransaction {
                id: e.id,
                amount: e.amount,
                date: e.date,
                note: e.note,
                category: cat.map(|c| c.name.clone()).unwrap_or_default(),
                icon: cat.map(|c| c.icon.clone()).unwrap_or_default(),
            }
        })
        .collect();

    Ok(CardDashboard {
        card_info: CardInfo::from(&card),
        total_spent: spent,
        available_balance,
        utilization: utilization(spent, card.credit_limit)?,
        cycle_start: cycle.start,
        cycle_end: cycle.end,
        category_breakdown: category_breakdown(&in_cycle, &categories)?
            .into_iter()
            .take(CARD_TOP_CATEGORIES)
            .collect(),
        recent_transactions,
    })
}

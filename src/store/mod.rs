// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Storage interface for profiles, categories, cards, expenses and budgets.
//!
//! Backends implement the row-level primitives. Validation, reference
//! checks, seeding and the card-delete cascade are provided methods so every
//! backend behaves the same way.

pub mod sqlite;
pub mod workbook;

pub use sqlite::SqliteStore;
pub use workbook::WorkbookStore;

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{SpendError, SpendResult};
use crate::models::{
    Budget, CardUpdate, Category, CreditCard, Expense, ExpenseFilter, NewBudget, NewCard,
    NewExpense, Profile,
};
use crate::seed;
use crate::settings::{Backend, Settings};

static LAST_FOUR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})?$").expect("valid regex"));
static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid regex"));

pub trait ExpenseStore {
    /// Human readable location of the data (file or directory).
    fn location(&self) -> String;

    fn profiles(&self) -> SpendResult<Vec<Profile>>;
    fn categories(&self) -> SpendResult<Vec<Category>>;
    fn insert_profiles(&self, rows: &[(&str, &str)]) -> SpendResult<()>;
    fn insert_categories(&self, rows: &[(&str, &str, &str)]) -> SpendResult<()>;

    /// Cards newest first, optionally limited to one profile.
    fn cards(&self, profile_id: Option<i64>) -> SpendResult<Vec<CreditCard>>;
    fn card(&self, id: i64) -> SpendResult<Option<CreditCard>>;
    fn insert_card(&self, card: &NewCard, created_at: NaiveDateTime) -> SpendResult<i64>;
    /// Returns false when no card has this id.
    fn update_card_row(&self, id: i64, update: &CardUpdate) -> SpendResult<bool>;
    fn remove_card(&self, id: i64) -> SpendResult<bool>;
    /// Null out `card_id` on every expense referencing the card.
    fn detach_card(&self, id: i64) -> SpendResult<usize>;

    /// Matching expenses, most recent first, truncated to `filter.limit`.
    fn expenses(&self, filter: &ExpenseFilter) -> SpendResult<Vec<Expense>>;
    fn insert_expense(&self, expense: &NewExpense, created_at: NaiveDateTime) -> SpendResult<i64>;
    fn remove_expense(&self, id: i64) -> SpendResult<bool>;

    fn budgets(&self) -> SpendResult<Vec<Budget>>;
    /// Insert or replace the amount for (profile, category, period).
    fn upsert_budget(&self, budget: &NewBudget) -> SpendResult<i64>;

    /// Write the seed profiles and categories into empty tables.
    /// Returns true when anything was written.
    fn ensure_seeded(&self) -> SpendResult<bool> {
        let mut seeded = false;
        if self.profiles()?.is_empty() {
            self.insert_profiles(seed::PROFILES)?;
            log::info!("seeded {} profiles into {}", seed::PROFILES.len(), self.location());
            seeded = true;
        }
        if self.categories()?.is_empty() {
            self.insert_categories(seed::CATEGORIES)?;
            log::info!(
                "seeded {} categories into {}",
                seed::CATEGORIES.len(),
                self.location()
            );
            seeded = true;
        }
        Ok(seeded)
    }

    fn profile(&self, id: i64) -> SpendResult<Profile> {
        self.profiles()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| SpendError::profile_not_found(id))
    }

    /// Look a profile up by id or by (case-insensitive) name.
    fn find_profile(&self, key: &str) -> SpendResult<Profile> {
        let key = key.trim();
        let id = key.parse::<i64>().ok();
        self.profiles()?
            .into_iter()
            .find(|p| {
                Some(p.id) == id
                    || p.name.eq_ignore_ascii_case(key)
                    || p.display_name.eq_ignore_ascii_case(key)
            })
            .ok_or_else(|| SpendError::profile_not_found(key))
    }

    /// Look a category up by id or by (case-insensitive) name.
    fn find_category(&self, key: &str) -> SpendResult<Category> {
        let key = key.trim();
        let id = key.parse::<i64>().ok();
        self.categories()?
            .into_iter()
            .find(|c| Some(c.id) == id || c.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| SpendError::category_not_found(key))
    }

    fn require_card(&self, id: i64) -> SpendResult<CreditCard> {
        self.card(id)?.ok_or_else(|| SpendError::card_not_found(id))
    }

    fn add_expense(&self, expense: &NewExpense) -> SpendResult<i64> {
        if expense.amount < Decimal::ZERO {
            return Err(SpendError::InvalidInput(format!(
                "amount must not be negative, got {}",
                expense.amount
            )));
        }
        self.profile(expense.profile_id)?;
        if !self.categories()?.iter().any(|c| c.id == expense.category_id) {
            return Err(SpendError::category_not_found(expense.category_id));
        }
        if let Some(card_id) = expense.card_id {
            self.require_card(card_id)?;
        }
        // Blank notes are stored as no note; worksheets cannot tell them apart.
        let expense = NewExpense {
            note: expense.note.clone().filter(|n| !n.trim().is_empty()),
            ..expense.clone()
        };
        let id = self.insert_expense(&expense, now())?;
        log::info!(
            "recorded expense {} of {} for profile {} on {}",
            id,
            expense.amount,
            expense.profile_id,
            expense.date
        );
        Ok(id)
    }

    fn delete_expense(&self, id: i64) -> SpendResult<()> {
        if !self.remove_expense(id)? {
            return Err(SpendError::expense_not_found(id));
        }
        log::info!("deleted expense {}", id);
        Ok(())
    }

    fn add_card(&self, card: &NewCard) -> SpendResult<i64> {
        validate_card_fields(
            &card.card_name,
            &card.card_last_four,
            card.credit_limit,
            card.billing_day,
            &card.card_color,
        )?;
        self.profile(card.profile_id)?;
        let id = self.insert_card(card, now())?;
        log::info!("added card {} '{}'", id, card.card_name);
        Ok(id)
    }

    fn update_card(&self, id: i64, update: &CardUpdate) -> SpendResult<()> {
        validate_card_fields(
            &update.card_name,
            &update.card_last_four,
            update.credit_limit,
            update.billing_day,
            &update.card_color,
        )?;
        if !self.update_card_row(id, update)? {
            return Err(SpendError::card_not_found(id));
        }
        log::info!("updated card {}", id);
        Ok(())
    }

    /// Delete a card. Expenses paid with it are kept and become cash
    /// expenses. References are detached before the card row goes, so a
    /// failure in between never leaves dangling card ids behind.
    fn delete_card(&self, id: i64) -> SpendResult<usize> {
        self.require_card(id)?;
        let detached = self.detach_card(id)?;
        self.remove_card(id)?;
        log::info!("deleted card {} ({} expenses detached)", id, detached);
        Ok(detached)
    }

    fn set_budget(&self, budget: &NewBudget) -> SpendResult<i64> {
        if budget.amount < Decimal::ZERO {
            return Err(SpendError::InvalidInput(format!(
                "budget amount must not be negative, got {}",
                budget.amount
            )));
        }
        if budget.period.trim().is_empty() {
            return Err(SpendError::InvalidInput("budget period is required".into()));
        }
        if let Some(pid) = budget.profile_id {
            self.profile(pid)?;
        }
        if let Some(cid) = budget.category_id {
            if !self.categories()?.iter().any(|c| c.id == cid) {
                return Err(SpendError::category_not_found(cid));
            }
        }
        self.upsert_budget(budget)
    }
}

pub fn validate_card_fields(
    name: &str,
    last_four: &str,
    credit_limit: Decimal,
    billing_day: u32,
    color: &str,
) -> SpendResult<()> {
    if name.trim().is_empty() {
        return Err(SpendError::InvalidInput("card name is required".into()));
    }
    if !LAST_FOUR.is_match(last_four) {
        return Err(SpendError::InvalidInput(format!(
            "last four digits must be exactly 4 digits, got '{}'",
            last_four
        )));
    }
    if credit_limit < Decimal::ZERO {
        return Err(SpendError::InvalidInput(format!(
            "credit limit must not be negative, got {}",
            credit_limit
        )));
    }
    if !(1..=31).contains(&billing_day) {
        return Err(SpendError::InvalidInput(format!(
            "billing day must be between 1 and 31, got {}",
            billing_day
        )));
    }
    if !HEX_COLOR.is_match(color) {
        return Err(SpendError::InvalidInput(format!(
            "card color must look like #RRGGBB, got '{}'",
            color
        )));
    }
    Ok(())
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Open the backend selected in the settings and make sure it is seeded.
pub fn open(settings: &Settings) -> anyhow::Result<Box<dyn ExpenseStore>> {
    let store: Box<dyn ExpenseStore> = match settings.storage.backend {
        Backend::Sqlite => {
            let path = match &settings.storage.path {
                Some(p) => p.clone(),
                None => crate::db::db_path()?,
            };
            Box::new(SqliteStore::open(&path)?)
        }
        Backend::Workbook => {
            let dir = match &settings.storage.path {
                Some(p) => p.clone(),
                None => crate::db::workbook_dir()?,
            };
            Box::new(WorkbookStore::open(&dir)?)
        }
    };
    store.ensure_seeded()?;
    log::debug!("opened {:?} store at {}", settings.storage.backend, store.location());
    Ok(store)
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spreadsheet-backed store: a directory holding one CSV worksheet per
//! entity. Every call reads the worksheet fresh from disk and every write
//! replaces the whole worksheet atomically.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::SpendResult;
use crate::models::{
    Budget, CardUpdate, Category, CreditCard, Expense, ExpenseFilter, NewBudget, NewCard,
    NewExpense, Profile, sort_recent_first,
};
use crate::store::ExpenseStore;

const PROFILES: &str = "profiles.csv";
const CATEGORIES: &str = "categories.csv";
const CARDS: &str = "credit_cards.csv";
const EXPENSES: &str = "expenses.csv";
const BUDGETS: &str = "budgets.csv";

pub struct WorkbookStore {
    dir: PathBuf,
}

impl WorkbookStore {
    pub fn open(dir: &Path) -> SpendResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn read<T: DeserializeOwned>(&self, sheet: &str) -> SpendResult<Vec<T>> {
        read_sheet(&self.dir.join(sheet))
    }

    fn write<T: Serialize>(&self, sheet: &str, rows: &[T]) -> SpendResult<()> {
        write_sheet_atomic(&self.dir.join(sheet), rows)
    }
}

/// Read every row of a worksheet; a missing worksheet is an empty one.
pub fn read_sheet<T: DeserializeOwned>(path: &Path) -> SpendResult<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut rows = Vec::new();
    for rec in rdr.deserialize() {
        rows.push(rec?);
    }
    Ok(rows)
}

/// Replace a worksheet: write a sibling temp file, then rename over it.
pub fn write_sheet_atomic<T: Serialize>(path: &Path, rows: &[T]) -> SpendResult<()> {
    let tmp = path.with_extension("csv.tmp");
    {
        let mut wtr = csv::Writer::from_path(&tmp)?;
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

impl ExpenseStore for WorkbookStore {
    fn location(&self) -> String {
        self.dir.display().to_string()
    }

    fn profiles(&self) -> SpendResult<Vec<Profile>> {
        let mut rows: Vec<Profile> = self.read(PROFILES)?;
        rows.sort_by_key(|p| p.id);
        Ok(rows)
    }

    fn categories(&self) -> SpendResult<Vec<Category>> {
        let mut rows: Vec<Category> = self.read(CATEGORIES)?;
        rows.sort_by_key(|c| c.id);
        Ok(rows)
    }

    fn insert_profiles(&self, rows: &[(&str, &str)]) -> SpendResult<()> {
        let mut sheet: Vec<Profile> = self.read(PROFILES)?;
        for (name, display) in rows {
            let id = next_id(sheet.iter().map(|p| p.id));
            sheet.push(Profile {
                id,
                name: name.to_string(),
                display_name: display.to_string(),
            });
        }
        self.write(PROFILES, &sheet)
    }

    fn insert_categories(&self, rows: &[(&str, &str, &str)]) -> SpendResult<()> {
        let mut sheet: Vec<Category> = self.read(CATEGORIES)?;
        for (name, name_te, icon) in rows {
            let id = next_id(sheet.iter().map(|c| c.id));
            sheet.push(Category {
                id,
                name: name.to_string(),
                name_te: name_te.to_string(),
                icon: icon.to_string(),
            });
        }
        self.write(CATEGORIES, &sheet)
    }

    fn cards(&self, profile_id: Option<i64>) -> SpendResult<Vec<CreditCard>> {
        let mut rows: Vec<CreditCard> = self.read(CARDS)?;
        rows.retain(|c| profile_id.is_none_or(|p| c.profile_id == p));
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(rows)
    }

    fn card(&self, id: i64) -> SpendResult<Option<CreditCard>> {
        let rows: Vec<CreditCard> = self.read(CARDS)?;
        Ok(rows.into_iter().find(|c| c.id == id))
    }

    fn insert_card(&self, card: &NewCard, created_at: NaiveDateTime) -> SpendResult<i64> {
        let mut sheet: Vec<CreditCard> = self.read(CARDS)?;
        let id = next_id(sheet.iter().map(|c| c.id));
        sheet.push(CreditCard {
            id,
            profile_id: card.profile_id,
            card_name: card.card_name.clone(),
            card_last_four: card.card_last_four.clone(),
            credit_limit: card.credit_limit,
            billing_day: card.billing_day,
            card_color: card.card_color.clone(),
            created_at,
        });
        self.write(CARDS, &sheet)?;
        Ok(id)
    }

    fn update_card_row(&self, id: i64, update: &CardUpdate) -> SpendResult<bool> {
        let mut sheet: Vec<CreditCard> = self.read(CARDS)?;
        let Some(card) = sheet.iter_mut().find(|c| c.id == id) else {
            return Ok(false);
        };
        card.card_name = update.card_name.clone();
        card.card_last_four = update.card_last_four.clone();
        card.credit_limit = update.credit_limit;
        card.billing_day = update.billing_day;
        card.card_color = update.card_color.clone();
        self.write(CARDS, &sheet)?;
        Ok(true)
    }

    fn remove_card(&self, id: i64) -> SpendResult<bool> {
        let mut sheet: Vec<CreditCard> = self.read(CARDS)?;
        let before = sheet.len();
        sheet.retain(|c| c.id != id);
        if sheet.len() == before {
            return Ok(false);
        }
        self.write(CARDS, &sheet)?;
        Ok(true)
    }

    fn detach_card(&self, id: i64) -> SpendResult<usize> {
        let mut sheet: Vec<Expense> = self.read(EXPENSES)?;
        let mut n = 0;
        for e in sheet.iter_mut().filter(|e| e.card_id == Some(id)) {
            e.card_id = None;
            n += 1;
        }
        if n > 0 {
            self.write(EXPENSES, &sheet)?;
        }
        Ok(n)
    }

    fn expenses(&self, filter: &ExpenseFilter) -> SpendResult<Vec<Expense>> {
        let mut rows: Vec<Expense> = self.read(EXPENSES)?;
        rows.retain(|e| filter.matches(e));
        sort_recent_first(&mut rows);
        if let Some(limit) = filter.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    fn insert_expense(&self, expense: &NewExpense, created_at: NaiveDateTime) -> SpendResult<i64> {
        let mut sheet: Vec<Expense> = self.read(EXPENSES)?;
        let id = next_id(sheet.iter().map(|e| e.id));
        sheet.push(Expense {
            id,
            profile_id: expense.profile_id,
            category_id: expense.category_id,
            amount: expense.amount,
            date: expense.date,
            note: expense.note.clone(),
            card_id: expense.card_id,
            created_at,
        });
        self.write(EXPENSES, &sheet)?;
        Ok(id)
    }

    fn remove_expense(&self, id: i64) -> SpendResult<bool> {
        let mut sheet: Vec<Expense> = self.read(EXPENSES)?;
        let before = sheet.len();
        sheet.retain(|e| e.id != id);
        if sheet.len() == before {
            return Ok(false);
        }
        self.write(EXPENSES, &sheet)?;
        Ok(true)
    }

    fn budgets(&self) -> SpendResult<Vec<Budget>> {
        let mut rows: Vec<Budget> = self.read(BUDGETS)?;
        rows.sort_by_key(|b| b.id);
        Ok(rows)
    }

    fn upsert_budget(&self, budget: &NewBudget) -> SpendResult<i64> {
        let mut sheet: Vec<Budget> = self.read(BUDGETS)?;
        let existing = sheet.iter_mut().find(|b| {
            b.profile_id == budget.profile_id
                && b.category_id == budget.category_id
                && b.period == budget.period
        });
        let id = match existing {
            Some(b) => {
                b.amount = budget.amount;
                b.id
            }
            None => {
                let id = next_id(sheet.iter().map(|b| b.id));
                sheet.push(Budget {
                    id,
                    profile_id: budget.profile_id,
                    category_id: budget.category_id,
                    amount: budget.amount,
                    period: budget.period.clone(),
                });
                id
            }
        };
        self.write(BUDGETS, &sheet)?;
        Ok(id)
    }
}

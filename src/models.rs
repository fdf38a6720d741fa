// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CARD_COLOR: &str = "#4A90E2";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub name_te: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: i64,
    pub profile_id: i64,
    pub card_name: String,
    pub card_last_four: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub credit_limit: Decimal,
    pub billing_day: u32,
    pub card_color: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub profile_id: i64,
    pub category_id: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub card_id: Option<i64>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub profile_id: Option<i64>,
    pub category_id: Option<i64>,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub period: String,
}

#[derive(Debug, Clone)]
pub struct NewExpense {
    pub profile_id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub card_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewCard {
    pub profile_id: i64,
    pub card_name: String,
    pub card_last_four: String,
    pub credit_limit: Decimal,
    pub billing_day: u32,
    pub card_color: String,
}

/// Fields replaced by a card update; the owning profile never changes.
#[derive(Debug, Clone)]
pub struct CardUpdate {
    pub card_name: String,
    pub card_last_four: String,
    pub credit_limit: Decimal,
    pub billing_day: u32,
    pub card_color: String,
}

#[derive(Debug, Clone)]
pub struct NewBudget {
    pub profile_id: Option<i64>,
    pub category_id: Option<i64>,
    pub amount: Decimal,
    pub period: String,
}

/// Expense selection. Date bounds are inclusive; results come back
/// most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub profile_id: Option<i64>,
    pub card_id: Option<i64>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn for_profile(profile_id: i64) -> Self {
        Self {
            profile_id: Some(profile_id),
            ..Self::default()
        }
    }

    pub fn for_card(card_id: i64) -> Self {
        Self {
            card_id: Some(card_id),
            ..Self::default()
        }
    }

    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, e: &Expense) -> bool {
        self.profile_id.is_none_or(|p| e.profile_id == p)
            && self.card_id.is_none_or(|c| e.card_id == Some(c))
            && self.start.is_none_or(|s| e.date >= s)
            && self.end.is_none_or(|d| e.date <= d)
    }
}

/// Recent-first ordering used by every expense listing.
pub fn sort_recent_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: i64, date: &str, created: &str) -> Expense {
        Expense {
            id,
            profile_id: 1,
            category_id: 1,
            amount: Decimal::ONE,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            note: None,
            card_id: None,
            created_at: NaiveDateTime::parse_from_str(created, "%Y-%m-%d %H:%M:%S").unwrap(),
        }
    }

    #[test]
    fn recent_first_orders_by_date_then_creation() {
        let mut v = vec![
            expense(1, "2024-03-01", "2024-03-01 09:00:00"),
            expense(2, "2024-03-02", "2024-03-02 08:00:00"),
            expense(3, "2024-03-01", "2024-03-05 09:00:00"),
        ];
        sort_recent_first(&mut v);
        let ids: Vec<i64> = v.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn filter_bounds_are_inclusive() {
        let e = expense(1, "2024-03-10", "2024-03-10 09:00:00");
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        assert!(ExpenseFilter::default().between(d("2024-03-10"), d("2024-03-10")).matches(&e));
        assert!(!ExpenseFilter::default().between(d("2024-03-11"), d("2024-03-20")).matches(&e));
        assert!(!ExpenseFilter::for_card(7).matches(&e));
    }
}

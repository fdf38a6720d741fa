// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use familyspend::models::NewExpense;
use familyspend::period::Period;
use familyspend::stats::{dashboard_stats, family_overview};
use familyspend::store::{ExpenseStore, SqliteStore, WorkbookStore};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::tempdir;

const DAD: i64 = 1;
const MOM: i64 = 2;
const RICE: i64 = 1;
const DAL: i64 = 2;
const OIL: i64 = 3;
const VEGETABLES: i64 = 4;
const FRUITS: i64 = 5;
const SNACKS: i64 = 7;
const CLEANING: i64 = 8;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn today() -> NaiveDate {
    d("2024-03-20")
}

fn spend(store: &dyn ExpenseStore, profile_id: i64, category_id: i64, amount: &str, date: &str) {
    store
        .add_expense(&NewExpense {
            profile_id,
            category_id,
            amount: dec(amount),
            date: d(date),
            note: None,
            card_id: None,
        })
        .unwrap();
}

fn household(store: &dyn ExpenseStore) {
    store.ensure_seeded().unwrap();
    spend(store, DAD, RICE, "100.00", "2024-03-20");
    spend(store, DAD, RICE, "50.25", "2024-03-17");
    spend(store, DAD, DAL, "200", "2024-03-05");
    spend(store, DAD, OIL, "30", "2024-02-25");
    spend(store, DAD, VEGETABLES, "0", "2024-03-18");
    spend(store, MOM, FRUITS, "75", "2024-03-19");
    // First day of the week, month and trailing-30-day windows.
    spend(store, DAD, SNACKS, "1.00", "2024-03-13");
    spend(store, DAD, FRUITS, "2.00", "2024-03-01");
    spend(store, DAD, CLEANING, "4.00", "2024-02-19");
    // One day before the trailing-30-day window.
    spend(store, DAD, CLEANING, "8.00", "2024-02-18");
}

fn sqlite() -> SqliteStore {
    SqliteStore::from_connection(Connection::open_in_memory().unwrap(), "test".into()).unwrap()
}

fn check_dashboard(store: &dyn ExpenseStore) {
    household(store);

    let week = dashboard_stats(store, Some(DAD), Period::Week, today()).unwrap();
    assert_eq!(week.total_spent, dec("151.25"));
    let names: Vec<&str> = week.category_breakdown.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["Rice", "Snacks"]);

    let month = dashboard_stats(store, Some(DAD), Period::Month, today()).unwrap();
    assert_eq!(month.total_spent, dec("353.25"));
    let names: Vec<&str> = month.category_breakdown.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["Dal", "Rice", "Fruits", "Snacks"]);
    assert_eq!(month.category_breakdown[1].amount, dec("150.25"));

    let default = dashboard_stats(store, Some(DAD), Period::parse("all"), today()).unwrap();
    assert_eq!(default.total_spent, dec("387.25"));
    assert_eq!(default.category_breakdown.len(), 6);
    let cleaning = default
        .category_breakdown
        .iter()
        .find(|c| c.category == "Cleaning")
        .unwrap();
    assert_eq!(cleaning.amount, dec("4.00"));
    assert_eq!(default.top_categories.len(), 3);
    assert!(default.category_breakdown.iter().all(|c| c.amount > Decimal::ZERO));
    assert_eq!(default.top_categories[2].category, "Oil");
    assert_eq!(default.top_categories[0].category_te, "పప్పు");

    let year = dashboard_stats(store, Some(DAD), Period::Year, today()).unwrap();
    assert_eq!(year.total_spent, dec("395.25"));

    // The trend ignores the period and always covers the last seven days.
    for stats in [&week, &month, &default, &year] {
        assert_eq!(stats.weekly_trend.len(), 7);
        assert_eq!(stats.weekly_trend[0].date, d("2024-03-14"));
        assert_eq!(stats.weekly_trend[6].date, today());
        assert_eq!(stats.weekly_trend[6].amount, dec("100.00"));
        assert_eq!(stats.weekly_trend[3].amount, dec("50.25"));
        assert_eq!(stats.weekly_trend[4].amount, Decimal::ZERO);
    }
}

fn check_family(store: &dyn ExpenseStore) {
    household(store);

    let month = family_overview(store, Period::Month, today()).unwrap();
    assert_eq!(month.total_family, dec("462.25"));
    let people: Vec<(&str, Decimal)> = month
        .profile_spending
        .iter()
        .map(|p| (p.profile.as_str(), p.amount))
        .collect();
    assert_eq!(
        people,
        vec![
            ("Dad", dec("387.25")),
            ("Mom", dec("75")),
            ("Chaithu", Decimal::ZERO),
            ("Harshith", Decimal::ZERO),
            ("Common", Decimal::ZERO),
        ]
    );
    let sum: Decimal = month.profile_spending.iter().map(|p| p.amount).sum();
    assert_eq!(sum, month.total_family);
    assert_eq!(month.top_categories.len(), 6);
    assert_eq!(month.top_categories[0].category, "Dal");
    assert_eq!(month.top_categories[2].category, "Fruits");
    assert_eq!(month.top_categories[2].amount, dec("77.00"));

    let week = family_overview(store, Period::Week, today()).unwrap();
    assert_eq!(week.total_family, dec("226.25"));

    let year = family_overview(store, Period::Year, today()).unwrap();
    assert_eq!(year, family_overview(store, Period::Default, today()).unwrap());
    assert_eq!(year.total_family, dec("470.25"));
}

#[test]
fn dashboard_over_sqlite() {
    check_dashboard(&sqlite());
}

#[test]
fn dashboard_over_workbook() {
    let dir = tempdir().unwrap();
    check_dashboard(&WorkbookStore::open(dir.path()).unwrap());
}

#[test]
fn family_overview_over_sqlite() {
    check_family(&sqlite());
}

#[test]
fn family_overview_over_workbook() {
    let dir = tempdir().unwrap();
    check_family(&WorkbookStore::open(dir.path()).unwrap());
}

#[test]
fn dashboard_needs_a_known_profile() {
    let store = sqlite();
    store.ensure_seeded().unwrap();
    let missing = dashboard_stats(&store, None, Period::Month, today()).unwrap_err();
    assert!(missing.is_invalid_input());
    let unknown = dashboard_stats(&store, Some(99), Period::Month, today()).unwrap_err();
    assert!(unknown.is_not_found());
}

#[test]
fn empty_household_reports_zeros() {
    let store = sqlite();
    store.ensure_seeded().unwrap();
    let stats = dashboard_stats(&store, Some(MOM), Period::Week, today()).unwrap();
    assert_eq!(stats.total_spent, Decimal::ZERO);
    assert!(stats.category_breakdown.is_empty());
    assert!(stats.weekly_trend.iter().all(|t| t.amount == Decimal::ZERO));

    let family = family_overview(&store, Period::Month, today()).unwrap();
    assert_eq!(family.profile_spending.len(), 5);
    assert!(family.top_categories.is_empty());
}

#[test]
fn repeated_reads_agree() {
    let store = sqlite();
    household(&store);
    let first = dashboard_stats(&store, Some(DAD), Period::Month, today()).unwrap();
    let second = dashboard_stats(&store, Some(DAD), Period::Month, today()).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_value(&first).unwrap()["total_spent"],
        serde_json::json!(353.25)
    );
}

fn check_overflow(store: &dyn ExpenseStore) {
    store.ensure_seeded().unwrap();
    let max = Decimal::MAX.to_string();
    spend(store, DAD, RICE, &max, "2024-03-18");
    spend(store, DAD, DAL, &max, "2024-03-19");

    let err = dashboard_stats(store, Some(DAD), Period::Week, today()).unwrap_err();
    assert!(err.is_invalid_input());
    let err = family_overview(store, Period::Week, today()).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn overflowing_totals_are_errors_over_sqlite() {
    check_overflow(&sqlite());
}

#[test]
fn overflowing_totals_are_errors_over_workbook() {
    let dir = tempdir().unwrap();
    check_overflow(&WorkbookStore::open(dir.path()).unwrap());
}

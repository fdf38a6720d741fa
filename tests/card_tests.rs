// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use familyspend::billing::card_dashboard;
use familyspend::commands::expenses::{CASH, expense_rows};
use familyspend::commands::{Ctx, cards};
use familyspend::models::{ExpenseFilter, NewCard, NewExpense};
use familyspend::settings::Defaults;
use familyspend::store::{ExpenseStore, SqliteStore, WorkbookStore};
use familyspend::cli;
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn sqlite() -> SqliteStore {
    SqliteStore::from_connection(Connection::open_in_memory().unwrap(), "test".into()).unwrap()
}

fn hdfc(store: &dyn ExpenseStore) -> i64 {
    store.ensure_seeded().unwrap();
    store
        .add_card(&NewCard {
            profile_id: 1,
            card_name: "HDFC Millennia".into(),
            card_last_four: "4321".into(),
            credit_limit: dec("10000"),
            billing_day: 10,
            card_color: "#4A90E2".into(),
        })
        .unwrap()
}

fn on_card(store: &dyn ExpenseStore, card: i64, category_id: i64, amount: &str, date: &str) -> i64 {
    store
        .add_expense(&NewExpense {
            profile_id: 1,
            category_id,
            amount: dec(amount),
            date: d(date),
            note: Some("swipe".into()),
            card_id: Some(card),
        })
        .unwrap()
}

fn check_card_dashboard(store: &dyn ExpenseStore) {
    let card = hdfc(store);
    on_card(store, card, 1, "2500", "2024-03-12");
    on_card(store, card, 2, "1000", "2024-03-09");
    on_card(store, card, 2, "500", "2024-03-15");

    let dash = card_dashboard(store, card, d("2024-03-15")).unwrap();
    assert_eq!((dash.cycle_start, dash.cycle_end), (d("2024-03-10"), d("2024-04-09")));
    assert_eq!(dash.total_spent, dec("3000"));
    assert_eq!(dash.available_balance, dec("7000"));
    assert_eq!(dash.utilization, dec("30.0"));
    assert_eq!(dash.card_info.card_last_four, "4321");

    let cats: Vec<(&str, Decimal)> = dash
        .category_breakdown
        .iter()
        .map(|c| (c.category.as_str(), c.amount))
        .collect();
    assert_eq!(cats, vec![("Rice", dec("2500")), ("Dal", dec("500"))]);

    // Recent transactions are not limited to the cycle.
    let dates: Vec<NaiveDate> = dash.recent_transactions.iter().map(|t| t.date).collect();
    assert_eq!(dates, vec![d("2024-03-15"), d("2024-03-12"), d("2024-03-09")]);
    assert_eq!(dash.recent_transactions[1].icon, "🍚");

    // Before the billing day the previous cycle applies.
    let earlier = card_dashboard(store, card, d("2024-03-09")).unwrap();
    assert_eq!((earlier.cycle_start, earlier.cycle_end), (d("2024-02-10"), d("2024-03-09")));
    assert_eq!(earlier.total_spent, dec("1000"));
}

fn check_card_delete(store: &dyn ExpenseStore) {
    let card = hdfc(store);
    on_card(store, card, 1, "120", "2024-03-12");
    on_card(store, card, 3, "80", "2024-03-13");

    assert_eq!(store.delete_card(card).unwrap(), 2);
    assert!(store.card(card).unwrap().is_none());
    assert!(card_dashboard(store, card, d("2024-03-15")).unwrap_err().is_not_found());
    assert!(store.delete_card(card).unwrap_err().is_not_found());

    let left = store.expenses(&ExpenseFilter::for_profile(1)).unwrap();
    assert_eq!(left.len(), 2);
    assert!(left.iter().all(|e| e.card_id.is_none()));

    let rows = expense_rows(store, &ExpenseFilter::default()).unwrap();
    assert!(rows.iter().all(|r| r.card == CASH));
}

#[test]
fn card_dashboard_over_sqlite() {
    check_card_dashboard(&sqlite());
}

#[test]
fn card_dashboard_over_workbook() {
    let dir = tempdir().unwrap();
    check_card_dashboard(&WorkbookStore::open(dir.path()).unwrap());
}

#[test]
fn deleting_a_card_keeps_its_expenses_in_sqlite() {
    let store = sqlite();
    check_card_delete(&store);
    let dangling: i64 = store
        .connection()
        .query_row(
            "SELECT COUNT(*) FROM expenses WHERE card_id IS NOT NULL",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(dangling, 0);
}

#[test]
fn deleting_a_card_keeps_its_expenses_in_workbook() {
    let dir = tempdir().unwrap();
    check_card_delete(&WorkbookStore::open(dir.path()).unwrap());
}

#[test]
fn expenses_cannot_reference_unknown_cards() {
    let store = sqlite();
    store.ensure_seeded().unwrap();
    let err = store
        .add_expense(&NewExpense {
            profile_id: 1,
            category_id: 1,
            amount: dec("10"),
            date: d("2024-03-01"),
            note: None,
            card_id: Some(42),
        })
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn card_with_zero_limit_has_zero_utilization() {
    let store = sqlite();
    store.ensure_seeded().unwrap();
    let card = store
        .add_card(&NewCard {
            profile_id: 2,
            card_name: "Store card".into(),
            card_last_four: String::new(),
            credit_limit: Decimal::ZERO,
            billing_day: 1,
            card_color: "#000000".into(),
        })
        .unwrap();
    on_card(&store, card, 1, "99.99", "2024-02-14");
    let dash = card_dashboard(&store, card, d("2024-02-20")).unwrap();
    assert_eq!((dash.cycle_start, dash.cycle_end), (d("2024-02-01"), d("2024-02-29")));
    assert_eq!(dash.utilization, Decimal::ZERO);
    assert_eq!(dash.available_balance, dec("-99.99"));
}

#[test]
fn tiny_limit_reports_an_error_instead_of_panicking() {
    let store = sqlite();
    store.ensure_seeded().unwrap();
    let card = store
        .add_card(&NewCard {
            profile_id: 1,
            card_name: "Prepaid".into(),
            card_last_four: String::new(),
            credit_limit: dec("0.0000000000000000000000001"),
            billing_day: 5,
            card_color: "#123456".into(),
        })
        .unwrap();
    on_card(&store, card, 1, "1000", "2024-03-10");

    let err = card_dashboard(&store, card, d("2024-03-15")).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn card_commands_add_and_update() {
    let store = sqlite();
    store.ensure_seeded().unwrap();
    let defaults = Defaults {
        profile: Some("mom".into()),
        period: "month".into(),
    };
    let ctx = Ctx::new(&store, &defaults, d("2024-03-15"));

    let matches = cli::build_cli().get_matches_from([
        "familyspend",
        "card",
        "add",
        "--name",
        "SBI SimplyClick",
        "--limit",
        "50000",
        "--billing-day",
        "31",
        "--last-four",
        "9876",
    ]);
    if let Some(("card", card_m)) = matches.subcommand() {
        cards::handle(&ctx, card_m).unwrap();
    } else {
        panic!("no card subcommand");
    }
    let added = store.cards(None).unwrap();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].profile_id, 2);
    assert_eq!(added[0].card_color, "#4A90E2");
    let id = added[0].id.to_string();

    let matches = cli::build_cli().get_matches_from([
        "familyspend",
        "card",
        "update",
        &id,
        "--limit",
        "60000",
    ]);
    if let Some(("card", card_m)) = matches.subcommand() {
        cards::handle(&ctx, card_m).unwrap();
    } else {
        panic!("no card subcommand");
    }
    let updated = store.require_card(added[0].id).unwrap();
    assert_eq!(updated.credit_limit, dec("60000"));
    assert_eq!(updated.card_name, "SBI SimplyClick");
    assert_eq!(updated.billing_day, 31);

    let matches = cli::build_cli().get_matches_from([
        "familyspend",
        "card",
        "update",
        &id,
        "--color",
        "red",
    ]);
    if let Some(("card", card_m)) = matches.subcommand() {
        assert!(cards::handle(&ctx, card_m).is_err());
    } else {
        panic!("no card subcommand");
    }
}

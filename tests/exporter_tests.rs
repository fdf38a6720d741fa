// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use familyspend::cli;
use familyspend::commands::{Ctx, exporter};
use familyspend::models::NewExpense;
use familyspend::settings::Defaults;
use familyspend::store::{ExpenseStore, SqliteStore};
use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn base_store() -> SqliteStore {
    let store =
        SqliteStore::from_connection(Connection::open_in_memory().unwrap(), "test".into())
            .unwrap();
    store.ensure_seeded().unwrap();
    for (profile_id, category_id, amount, date, note) in [
        (1, 1, "1200", "2025-01-02", Some("25kg, sona masoori")),
        (2, 5, "10.005", "2025-01-05", None),
        (1, 2, "340.75", "2025-02-01", Some("toor dal")),
    ] {
        store
            .add_expense(&NewExpense {
                profile_id,
                category_id,
                amount: amount.parse().unwrap(),
                date: d(date),
                note: note.map(str::to_string),
                card_id: None,
            })
            .unwrap();
    }
    store
}

fn export(store: &SqliteStore, args: &[&str]) -> anyhow::Result<()> {
    let defaults = Defaults {
        profile: Some("mom".into()),
        period: "month".into(),
    };
    let ctx = Ctx::new(store, &defaults, d("2025-02-10"));
    let mut argv = vec!["familyspend", "export", "expenses"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&ctx, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_expenses_writes_csv_recent_first() {
    let store = base_store();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("expenses.csv");
    let out_str = out_path.to_string_lossy().to_string();

    export(&store, &["--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Date,Profile,Category,Amount,Note",
            "2025-02-01,Dad,Dal,340.75,toor dal",
            "2025-01-05,Mom,Fruits,10.005,",
            "2025-01-02,Dad,Rice,1200,\"25kg, sona masoori\"",
        ]
    );
}

#[test]
fn export_expenses_filters_by_profile_and_dates() {
    let store = base_store();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("dad.json");
    let out_str = out_path.to_string_lossy().to_string();

    export(
        &store,
        &[
            "--format", "JSON", "--out", &out_str, "--profile", "dad", "--from", "2025-01-01",
            "--to", "2025-01-31",
        ],
    )
    .unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "id": 1,
                "date": "2025-01-02",
                "profile": "Dad",
                "category": "Rice",
                "icon": "🍚",
                "amount": 1200.0,
                "note": "25kg, sona masoori",
                "card": "Cash"
            }
        ])
    );
}

#[test]
fn export_expenses_rejects_unknown_format() {
    let store = base_store();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(export(&store, &["--format", "xml", "--out", &out_str]).is_err());
    assert!(!out_path.exists());
}

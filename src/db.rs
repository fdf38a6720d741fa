// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

pub(crate) static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "FamilySpend", "familyspend"));

fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.to_path_buf())
}

pub fn db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("familyspend.sqlite"))
}

pub fn workbook_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("workbook"))
}

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS profiles(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        display_name TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        name_te TEXT NOT NULL,
        icon TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS credit_cards(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        profile_id INTEGER NOT NULL,
        card_name TEXT NOT NULL,
        card_last_four TEXT NOT NULL DEFAULT '',
        credit_limit TEXT NOT NULL,
        billing_day INTEGER NOT NULL CHECK(billing_day BETWEEN 1 AND 31),
        card_color TEXT NOT NULL DEFAULT '#4A90E2',
        created_at TEXT NOT NULL,
        FOREIGN KEY(profile_id) REFERENCES profiles(id)
    );

    CREATE TABLE IF NOT EXISTS expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        profile_id INTEGER NOT NULL,
        category_id INTEGER NOT NULL,
        amount TEXT NOT NULL,
        date TEXT NOT NULL,
        note TEXT,
        card_id INTEGER,
        created_at TEXT NOT NULL,
        FOREIGN KEY(profile_id) REFERENCES profiles(id),
        FOREIGN KEY(category_id) REFERENCES categories(id),
        FOREIGN KEY(card_id) REFERENCES credit_cards(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
    CREATE INDEX IF NOT EXISTS idx_expenses_card ON expenses(card_id);

    -- NULL profile/category means "all"
    CREATE TABLE IF NOT EXISTS budgets(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        profile_id INTEGER,
        category_id INTEGER,
        amount TEXT NOT NULL,
        period TEXT NOT NULL,
        FOREIGN KEY(profile_id) REFERENCES profiles(id),
        FOREIGN KEY(category_id) REFERENCES categories(id)
    );
    "#,
    )
}

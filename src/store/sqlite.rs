// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::types::{Type, Value};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::db::init_schema;
use crate::error::SpendResult;
use crate::models::{
    Budget, CardUpdate, Category, CreditCard, Expense, ExpenseFilter, NewBudget, NewCard,
    NewExpense, Profile,
};
use crate::store::ExpenseStore;

pub struct SqliteStore {
    conn: Connection,
    location: String,
}

impl SqliteStore {
    pub fn open(path: &Path) -> SpendResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn, path.display().to_string())
    }

    pub fn in_memory() -> SpendResult<Self> {
        Self::from_connection(Connection::open_in_memory()?, ":memory:".to_string())
    }

    pub fn from_connection(conn: Connection, location: String) -> SpendResult<Self> {
        init_schema(&conn)?;
        Ok(Self { conn, location })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn decimal_at(r: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = r.get(idx)?;
    s.parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

const CARD_COLUMNS: &str = "id, profile_id, card_name, card_last_four, credit_limit, \
                            billing_day, card_color, created_at";

fn card_from_row(r: &Row) -> rusqlite::Result<CreditCard> {
    Ok(CreditCard {
        id: r.get(0)?,
        profile_id: r.get(1)?,
        card_name: r.get(2)?,
        card_last_four: r.get(3)?,
        credit_limit: decimal_at(r, 4)?,
        billing_day: r.get(5)?,
        card_color: r.get(6)?,
        created_at: r.get(7)?,
    })
}

impl ExpenseStore for SqliteStore {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn profiles(&self) -> SpendResult<Vec<Profile>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, display_name FROM profiles ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok(Profile {
                id: r.get(0)?,
                name: r.get(1)?,
                display_name: r.get(2)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn categories(&self) -> SpendResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, name_te, icon FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok(Category {
                id: r.get(0)?,
                name: r.get(1)?,
                name_te: r.get(2)?,
                icon: r.get(3)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn insert_profiles(&self, rows: &[(&str, &str)]) -> SpendResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO profiles(name, display_name) VALUES (?1, ?2)")?;
            for (name, display) in rows {
                stmt.execute(params![name, display])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn insert_categories(&self, rows: &[(&str, &str, &str)]) -> SpendResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO categories(name, name_te, icon) VALUES (?1, ?2, ?3)")?;
            for (name, name_te, icon) in rows {
                stmt.execute(params![name, name_te, icon])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn cards(&self, profile_id: Option<i64>) -> SpendResult<Vec<CreditCard>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM credit_cards WHERE (?1 IS NULL OR profile_id=?1)
             ORDER BY created_at DESC, id DESC",
            CARD_COLUMNS
        ))?;
        let rows = stmt.query_map(params![profile_id], card_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn card(&self, id: i64) -> SpendResult<Option<CreditCard>> {
        let card = self
            .conn
            .query_row(
                &format!("SELECT {} FROM credit_cards WHERE id=?1", CARD_COLUMNS),
                params![id],
                card_from_row,
            )
            .optional()?;
        Ok(card)
    }

    fn insert_card(&self, card: &NewCard, created_at: NaiveDateTime) -> SpendResult<i64> {
        self.conn.execute(
            "INSERT INTO credit_cards(profile_id, card_name, card_last_four, credit_limit,
                                      billing_day, card_color, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                card.profile_id,
                card.card_name,
                card.card_last_four,
                card.credit_limit.to_string(),
                card.billing_day,
                card.card_color,
                created_at
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_card_row(&self, id: i64, update: &CardUpdate) -> SpendResult<bool> {
        let n = self.conn.execute(
            "UPDATE credit_cards
             SET card_name=?1, card_last_four=?2, credit_limit=?3, billing_day=?4, card_color=?5
             WHERE id=?6",
            params![
                update.card_name,
                update.card_last_four,
                update.credit_limit.to_string(),
                update.billing_day,
                update.card_color,
                id
            ],
        )?;
        Ok(n > 0)
    }

    fn remove_card(&self, id: i64) -> SpendResult<bool> {
        let n = self
            .conn
            .execute("DELETE FROM credit_cards WHERE id=?1", params![id])?;
        Ok(n > 0)
    }

    fn detach_card(&self, id: i64) -> SpendResult<usize> {
        let n = self.conn.execute(
            "UPDATE expenses SET card_id=NULL WHERE card_id=?1",
            params![id],
        )?;
        Ok(n)
    }

    fn expenses(&self, filter: &ExpenseFilter) -> SpendResult<Vec<Expense>> {
        let mut sql = String::from(
            "SELECT id, profile_id, category_id, amount, date, note, card_id, created_at
             FROM expenses WHERE 1=1",
        );
        let mut values: Vec<Value> = Vec::new();
        if let Some(pid) = filter.profile_id {
            sql.push_str(" AND profile_id=?");
            values.push(Value::Integer(pid));
        }
        if let Some(cid) = filter.card_id {
            sql.push_str(" AND card_id=?");
            values.push(Value::Integer(cid));
        }
        if let Some(start) = filter.start {
            sql.push_str(" AND date>=?");
            values.push(Value::Text(start.to_string()));
        }
        if let Some(end) = filter.end {
            sql.push_str(" AND date<=?");
            values.push(Value::Text(end.to_string()));
        }
        sql.push_str(" ORDER BY date DESC, created_at DESC, id DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            values.push(Value::Integer(limit as i64));
        }
        log::debug!("expense query: {}", sql);

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(values), |r| {
            Ok(Expense {
                id: r.get(0)?,
                profile_id: r.get(1)?,
                category_id: r.get(2)?,
                amount: decimal_at(r, 3)?,
                date: r.get(4)?,
                note: r.get(5)?,
                card_id: r.get(6)?,
                created_at: r.get(7)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn insert_expense(&self, expense: &NewExpense, created_at: NaiveDateTime) -> SpendResult<i64> {
        self.conn.execute(
            "INSERT INTO expenses(profile_id, category_id, amount, date, note, card_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                expense.profile_id,
                expense.category_id,
                expense.amount.to_string(),
                expense.date,
                expense.note,
                expense.card_id,
                created_at
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn remove_expense(&self, id: i64) -> SpendResult<bool> {
        let n = self
            .conn
            .execute("DELETE FROM expenses WHERE id=?1", params![id])?;
        Ok(n > 0)
    }

    fn budgets(&self) -> SpendResult<Vec<Budget>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, profile_id, category_id, amount, period FROM budgets ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok(Budget {
                id: r.get(0)?,
                profile_id: r.get(1)?,
                category_id: r.get(2)?,
                amount: decimal_at(r, 3)?,
                period: r.get(4)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn upsert_budget(&self, budget: &NewBudget) -> SpendResult<i64> {
        let existing: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM budgets WHERE profile_id IS ?1 AND category_id IS ?2 AND period=?3",
                params![budget.profile_id, budget.category_id, budget.period],
                |r| r.get(0),
            )
            .optional()?;
        match existing {
            Some(id) => {
                self.conn.execute(
                    "UPDATE budgets SET amount=?1 WHERE id=?2",
                    params![budget.amount.to_string(), id],
                )?;
                Ok(id)
            }
            None => {
                self.conn.execute(
                    "INSERT INTO budgets(profile_id, category_id, amount, period)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        budget.profile_id,
                        budget.category_id,
                        budget.amount.to_string(),
                        budget.period
                    ],
                )?;
                Ok(self.conn.last_insert_rowid())
            }
        }
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error types shared by the stores, the aggregation engine and the
//! billing-cycle resolver.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpendError {
    /// A referenced record does not exist
    #[error("{entity} not found: {identifier}")]
    NotFound {
        entity: &'static str,
        identifier: String,
    },

    /// Missing or malformed caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The backing store could not be read or written
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl SpendError {
    pub fn profile_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity: "Profile",
            identifier: identifier.to_string(),
        }
    }

    pub fn category_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity: "Category",
            identifier: identifier.to_string(),
        }
    }

    pub fn card_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity: "Card",
            identifier: identifier.to_string(),
        }
    }

    pub fn expense_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity: "Expense",
            identifier: identifier.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<rusqlite::Error> for SpendError {
    fn from(err: rusqlite::Error) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

impl From<csv::Error> for SpendError {
    fn from(err: csv::Error) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

impl From<std::io::Error> for SpendError {
    fn from(err: std::io::Error) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

pub type SpendResult<T> = Result<T, SpendError>;

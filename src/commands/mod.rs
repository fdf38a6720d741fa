// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod cards;
pub mod categories;
pub mod expenses;
pub mod exporter;
pub mod profiles;
pub mod reports;

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use clap::ArgMatches;

use crate::models::Profile;
use crate::period::Period;
use crate::settings::Defaults;
use crate::store::ExpenseStore;

/// What every command handler needs: the open store, the configured
/// defaults and the date treated as today.
pub struct Ctx<'a> {
    pub store: &'a dyn ExpenseStore,
    pub defaults: &'a Defaults,
    pub today: NaiveDate,
}

impl<'a> Ctx<'a> {
    pub fn new(store: &'a dyn ExpenseStore, defaults: &'a Defaults, today: NaiveDate) -> Self {
        Self {
            store,
            defaults,
            today,
        }
    }

    /// `--profile` if given, else the configured default profile.
    pub fn profile(&self, sub: &ArgMatches) -> Result<Option<Profile>> {
        let key = sub
            .get_one::<String>("profile")
            .map(String::as_str)
            .or(self.defaults.profile.as_deref());
        match key {
            Some(k) => Ok(Some(self.store.find_profile(k)?)),
            None => Ok(None),
        }
    }

    pub fn require_profile(&self, sub: &ArgMatches) -> Result<Profile> {
        self.profile(sub)?
            .ok_or_else(|| anyhow!("No profile given; pass --profile or set defaults.profile"))
    }

    /// `--period` if given, else the configured default period.
    pub fn period(&self, sub: &ArgMatches) -> Period {
        let token = sub
            .get_one::<String>("period")
            .map(String::as_str)
            .unwrap_or(&self.defaults.period);
        Period::parse(token)
    }
}

pub(crate) fn required<'m>(sub: &'m ArgMatches, id: &str) -> Result<&'m str> {
    sub.get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("Missing required argument --{}", id))
}

pub(crate) fn json_flags(sub: &ArgMatches) -> (bool, bool) {
    (sub.get_flag("json"), sub.get_flag("jsonl"))
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reporting periods and the date windows they resolve to.
//!
//! The personal dashboard and the family overview read the same tokens
//! differently ("month" is calendar-to-date on the dashboard but the trailing
//! 30 days for the family), so each has its own resolver.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    Year,
    Default,
}

impl Period {
    /// Any unrecognised token falls back to `Default`.
    pub fn parse(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "week" => Period::Week,
            "month" => Period::Month,
            "year" => Period::Year,
            _ => Period::Default,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::Default => "default",
        };
        f.write_str(s)
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    fn trailing(today: NaiveDate, days: u64) -> Self {
        Self {
            start: today - Days::new(days),
            end: today,
        }
    }
}

/// Window for the per-profile dashboard.
pub fn dashboard_window(period: Period, today: NaiveDate) -> DateWindow {
    match period {
        Period::Week => DateWindow::trailing(today, 7),
        Period::Month => DateWindow {
            start: today.with_day(1).unwrap_or(today),
            end: today,
        },
        Period::Year => DateWindow {
            start: NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
            end: today,
        },
        Period::Default => DateWindow::trailing(today, 30),
    }
}

/// Window for the family overview. Only week and month are special; every
/// other period covers the trailing year.
pub fn family_window(period: Period, today: NaiveDate) -> DateWindow {
    match period {
        Period::Week => DateWindow::trailing(today, 7),
        Period::Month => DateWindow::trailing(today, 30),
        Period::Year | Period::Default => DateWindow::trailing(today, 365),
    }
}

/// The seven days ending today, oldest first.
pub fn trailing_week(today: NaiveDate) -> Vec<NaiveDate> {
    (0..7u64).rev().map(|i| today - Days::new(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parse_is_total() {
        assert_eq!(Period::parse("Week"), Period::Week);
        assert_eq!(Period::parse(" month "), Period::Month);
        assert_eq!(Period::parse("YEAR"), Period::Year);
        assert_eq!(Period::parse("quarter"), Period::Default);
        assert_eq!(Period::parse(""), Period::Default);
    }

    #[test]
    fn dashboard_windows() {
        let today = d(2024, 3, 15);
        assert_eq!(dashboard_window(Period::Week, today).start, d(2024, 3, 8));
        assert_eq!(dashboard_window(Period::Month, today).start, d(2024, 3, 1));
        assert_eq!(dashboard_window(Period::Year, today).start, d(2024, 1, 1));
        assert_eq!(dashboard_window(Period::Default, today).start, d(2024, 2, 14));
        for p in [Period::Week, Period::Month, Period::Year, Period::Default] {
            assert_eq!(dashboard_window(p, today).end, today);
        }
    }

    #[test]
    fn family_windows_diverge_from_dashboard() {
        let today = d(2024, 3, 15);
        assert_eq!(family_window(Period::Week, today).start, d(2024, 3, 8));
        assert_eq!(family_window(Period::Month, today).start, d(2024, 2, 14));
        assert_eq!(family_window(Period::Year, today).start, d(2023, 3, 16));
        assert_eq!(family_window(Period::Default, today).start, d(2023, 3, 16));
        assert_ne!(
            family_window(Period::Month, today),
            dashboard_window(Period::Month, today)
        );
    }

    #[test]
    fn trailing_week_spans_seven_days() {
        let days = trailing_week(d(2024, 3, 3));
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], d(2024, 2, 26));
        assert_eq!(days[6], d(2024, 3, 3));
    }
}

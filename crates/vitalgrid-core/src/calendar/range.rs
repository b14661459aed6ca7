// ABOUTME: Month normalization and query-range calculation for calendar renders
// ABOUTME: Computes the one-day lookback so sessions crossing midnight are not lost
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! Range calculation for monthly renders.
//!
//! Months are 0-indexed internally so navigation arithmetic (`month - 1`,
//! `month + 1`) wraps naturally into the adjacent year; the HTTP surface
//! converts from 1-12 at the boundary.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// A normalized calendar month.
///
/// Construction normalizes any out-of-range month index into the adjacent
/// year, so `CalendarMonth::new(2024, -1)` is December 2023 and
/// `CalendarMonth::new(2024, 12)` is January 2025.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarMonth {
    year: i32,
    month0: u32,
}

impl CalendarMonth {
    /// Build a month from a year and a 0-indexed month, wrapping overflow
    /// and underflow into the adjacent year.
    #[must_use]
    pub fn new(year: i32, month0: i32) -> Self {
        Self {
            year: year + month0.div_euclid(12),
            month0: month0.rem_euclid(12) as u32,
        }
    }

    /// Build from a 1-indexed month as used on the HTTP surface.
    /// Returns `None` when the month is outside 1-12.
    #[must_use]
    pub fn from_one_based(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then(|| Self {
            year,
            month0: month - 1,
        })
    }

    /// Target year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// 0-indexed month, 0-11.
    #[must_use]
    pub const fn month0(self) -> u32 {
        self.month0
    }

    /// The month before this one.
    #[must_use]
    pub fn prev(self) -> Self {
        Self::new(self.year, self.month0 as i32 - 1)
    }

    /// The month after this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self::new(self.year, self.month0 as i32 + 1)
    }

    /// First day of the month.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        // month0 is normalized to 0-11, so this cannot fail
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month (leap-aware).
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    /// Number of days in the month.
    #[must_use]
    pub fn num_days(self) -> u32 {
        self.last_day().day()
    }

    /// Whether `date` falls inside this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }

    /// Iterate the days of the month in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first_day();
        (0..self.num_days()).map(move |offset| first + Duration::days(i64::from(offset)))
    }

    /// The query and display range for a render of this month.
    #[must_use]
    pub fn range(self) -> MonthRange {
        let month_from = self.first_day();
        MonthRange {
            query_from: month_from - Duration::days(1),
            month_from,
            month_to: self.last_day(),
            num_days: self.num_days(),
        }
    }
}

/// Inclusive day range for one monthly render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthRange {
    /// First day to query: the last day of the previous month, a one-day
    /// lookback so a sleep session starting before midnight and ending
    /// inside the target month is captured.
    pub query_from: NaiveDate,
    /// First day of the target month
    pub month_from: NaiveDate,
    /// Last day of the target month
    pub month_to: NaiveDate,
    /// Number of days in the target month
    pub num_days: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn january_lookback_reaches_december_of_prior_year() {
        let range = CalendarMonth::new(2024, 0).range();
        assert_eq!(range.query_from, date("2023-12-31"));
        assert_eq!(range.month_from, date("2024-01-01"));
        assert_eq!(range.month_to, date("2024-01-31"));
        assert_eq!(range.num_days, 31);
    }

    #[test]
    fn leap_year_february() {
        assert_eq!(CalendarMonth::new(2024, 1).num_days(), 29);
        assert_eq!(CalendarMonth::new(2023, 1).num_days(), 28);
        assert_eq!(CalendarMonth::new(2100, 1).num_days(), 28);
        assert_eq!(CalendarMonth::new(2000, 1).num_days(), 29);
    }

    #[test]
    fn month_underflow_and_overflow_wrap() {
        assert_eq!(CalendarMonth::new(2024, -1), CalendarMonth::new(2023, 11));
        assert_eq!(CalendarMonth::new(2024, 12), CalendarMonth::new(2025, 0));
        assert_eq!(CalendarMonth::new(2024, -13), CalendarMonth::new(2022, 11));
    }

    #[test]
    fn prev_next_navigation_round_trips() {
        let month = CalendarMonth::new(2024, 0);
        assert_eq!(month.prev(), CalendarMonth::new(2023, 11));
        assert_eq!(month.prev().next(), month);
    }

    #[test]
    fn one_based_conversion_rejects_out_of_range() {
        assert_eq!(
            CalendarMonth::from_one_based(2024, 1),
            Some(CalendarMonth::new(2024, 0))
        );
        assert!(CalendarMonth::from_one_based(2024, 0).is_none());
        assert!(CalendarMonth::from_one_based(2024, 13).is_none());
    }

    #[test]
    fn days_iterates_the_whole_month() {
        let days: Vec<_> = CalendarMonth::new(2024, 1).days().collect();
        assert_eq!(days.len(), 29);
        assert_eq!(days[0], date("2024-02-01"));
        assert_eq!(days[28], date("2024-02-29"));
    }
}

// ABOUTME: Display formatting helpers shared by rendering surfaces
// ABOUTME: Zero-padded labels, no-data sentinels, and provider label prettifying
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

use std::fmt::Display;

use chrono::NaiveDate;

/// Sentinel shown for statistics with zero contributing inputs.
pub const NO_DATA: &str = "—";

/// Zero-padded `YYYY-MM-DD`.
#[must_use]
pub fn date_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Two-digit hour column label, `00` through `23`.
#[must_use]
pub fn hour_label(hour: u8) -> String {
    format!("{hour:02}")
}

/// Render an optional statistic, falling back to the no-data sentinel.
#[must_use]
pub fn stat_label<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| NO_DATA.to_owned(), |v| v.to_string())
}

/// Mean sleep hours with one decimal place, or the sentinel.
#[must_use]
pub fn sleep_hours_label(hours: Option<f64>) -> String {
    hours.map_or_else(|| NO_DATA.to_owned(), |h| format!("{h:.1}"))
}

/// Provider exercise labels use underscores; show them as words.
#[must_use]
pub fn exercise_type_label(kind: &str) -> String {
    kind.replace('_', " ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_zero_padded() {
        let date: NaiveDate = "2024-03-05".parse().unwrap();
        assert_eq!(date_label(date), "2024-03-05");
        assert_eq!(hour_label(7), "07");
        assert_eq!(hour_label(23), "23");
    }

    #[test]
    fn missing_stats_render_the_sentinel() {
        assert_eq!(stat_label::<u32>(None), NO_DATA);
        assert_eq!(stat_label(Some(57)), "57");
        assert_eq!(sleep_hours_label(None), NO_DATA);
        assert_eq!(sleep_hours_label(Some(7.25)), "7.2");
    }

    #[test]
    fn exercise_labels_drop_underscores() {
        assert_eq!(exercise_type_label("outdoor_running"), "outdoor running");
    }
}

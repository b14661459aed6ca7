// ABOUTME: Calendar view models and the per-month render pipeline
// ABOUTME: Ties range, bucketizer, and aggregator together into renderer-ready aggregates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! # Calendar rendering pipeline
//!
//! Single-pass, synchronous transform per render request: parse the fetched
//! wire records, bucket them, and reduce into per-cell / per-day view
//! models. The rendering surface is an external collaborator; it receives
//! pure data (categories, totals, breakdowns) and owns all visual encoding.

/// Per-cell and per-day reduction of bucketed records
pub mod aggregate;
/// Hourly bucketizer and already-hourly record merging
pub mod bucket;
/// Display formatting helpers (labels, sentinels)
pub mod format;
/// Render-generation guard for discarding stale results
pub mod generation;
/// Month normalization and query ranges
pub mod range;
/// Monthly trend statistics
pub mod trends;

pub use aggregate::{
    daily_heart_rate_stats, daily_step_totals, dominant_stage, group_exercise_by_date,
    resting_heart_rate, stage_breakdown, DailyHeartRate, ExerciseDay, StageMinutes,
};
pub use bucket::{
    bucketize_sleep, hour_floor, merge_hourly_heart_rate, merge_hourly_steps, HourBucket, HourKey,
    SessionSpan, StageFragment, HOUR_MS,
};
pub use generation::{RenderSequence, RenderTicket};
pub use range::{CalendarMonth, MonthRange};
pub use trends::{monthly_trends, MonthlyTrends};

use serde::Serialize;

use crate::models::{
    parse_exercise_sessions, parse_sleep_sessions, ExerciseSessionRecord, HourlyHeartRateRecord,
    HourlyStepRecord, SleepSessionRecord, StageKind,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Hours per calendar row.
pub const HOURS_PER_DAY: usize = 24;

/// The visible category of a sleep cell.
///
/// A bucket whose dominant stage is absent or `unknown` renders as generic
/// sleep rather than a specific stage; this changes the visible output
/// category and is required policy, not a rendering detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellCategory {
    /// Generic sleep, no usable stage data
    Sleep,
    /// A specific dominant stage
    Stage(StageKind),
}

impl CellCategory {
    /// Category for a bucket's fragments, applying the unknown-folds-to-sleep
    /// policy.
    #[must_use]
    pub fn for_fragments(fragments: &[StageFragment]) -> Self {
        match dominant_stage(fragments) {
            Some(kind) if kind != StageKind::Unknown => Self::Stage(kind),
            _ => Self::Sleep,
        }
    }

    /// Stable label used as the wire/CSS category name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Stage(kind) => kind.as_str(),
        }
    }
}

impl Serialize for CellCategory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One occupied cell of the sleep grid.
#[derive(Debug, Clone, Serialize)]
pub struct SleepCell {
    /// Visible category (dominant stage, or generic sleep)
    pub category: CellCategory,
    /// Sessions touching this hour, for tooltips
    pub sessions: Vec<SessionSpan>,
    /// Per-stage minutes, descending
    pub breakdown: Vec<StageMinutes>,
}

/// One calendar row: a date and its 24 hour cells.
#[derive(Debug, Clone, Serialize)]
pub struct SleepDay {
    /// Calendar date
    pub date: NaiveDate,
    /// Cells for hours 0-23; `None` where no session touches the hour
    pub cells: Vec<Option<SleepCell>>,
}

/// The month's sleep grid.
#[derive(Debug, Clone, Serialize)]
pub struct SleepCalendar {
    /// One row per day of the target month
    pub days: Vec<SleepDay>,
}

/// Build the sleep grid for a month from fetched wire records.
///
/// Records should cover the month plus the one-day lookback
/// ([`MonthRange::query_from`]); buckets falling outside the target month
/// are dropped here, after bucketing, so a session crossing midnight into
/// day one still colors its first-day hours.
#[must_use]
pub fn build_sleep_calendar(month: CalendarMonth, records: &[SleepSessionRecord]) -> SleepCalendar {
    let sessions = parse_sleep_sessions(records);
    let mut buckets = bucketize_sleep(&sessions);

    let days = month
        .days()
        .map(|date| {
            let cells = (0..HOURS_PER_DAY)
                .map(|hour| {
                    let key = HourKey {
                        date,
                        hour: hour as u8,
                    };
                    buckets.remove(&key).map(|bucket| SleepCell {
                        category: CellCategory::for_fragments(&bucket.fragments),
                        breakdown: stage_breakdown(&bucket.fragments),
                        sessions: bucket.sessions,
                    })
                })
                .collect();
            SleepDay { date, cells }
        })
        .collect();

    SleepCalendar { days }
}

/// Merged steps for one hour, after duplicate-key summing.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HourlySteps {
    /// Calendar date
    pub date: NaiveDate,
    /// Hour of day, 0-23
    pub hour: u8,
    /// Summed steps for the hour
    pub step_count: u64,
}

/// One bar of the monthly steps chart.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StepsDay {
    /// Calendar date
    pub date: NaiveDate,
    /// Total steps for the day; zero when no record exists
    pub total: u64,
}

/// The month's step chart data.
#[derive(Debug, Clone, Serialize)]
pub struct StepsCalendar {
    /// One entry per day of the target month
    pub days: Vec<StepsDay>,
    /// Largest daily total, floored at 1 so bar scaling never divides by zero
    pub max_total: u64,
    /// Merged hourly detail for drill-down rendering
    pub hours: Vec<HourlySteps>,
}

/// Build the daily step totals for a month.
#[must_use]
pub fn build_steps_calendar(month: CalendarMonth, records: &[HourlyStepRecord]) -> StepsCalendar {
    let merged = merge_hourly_steps(records);

    let mut daily: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for (key, count) in &merged {
        *daily.entry(key.date).or_default() += count;
    }

    let days: Vec<StepsDay> = month
        .days()
        .map(|date| StepsDay {
            date,
            total: daily.get(&date).copied().unwrap_or(0),
        })
        .collect();

    let max_total = days.iter().map(|d| d.total).max().unwrap_or(0).max(1);

    let hours = merged
        .into_iter()
        .map(|(key, step_count)| HourlySteps {
            date: key.date,
            hour: key.hour,
            step_count,
        })
        .collect();

    StepsCalendar {
        days,
        max_total,
        hours,
    }
}

/// Merged heart-rate display values for one hour.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HourlyHeartRate {
    /// Calendar date
    pub date: NaiveDate,
    /// Hour of day, 0-23
    pub hour: u8,
    /// Minimum BPM for the hour
    pub min_bpm: u32,
    /// Maximum BPM for the hour
    pub max_bpm: u32,
    /// Mean of merged per-record averages, rounded
    pub avg_bpm: u32,
}

/// One day of the heart-rate panel.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HeartRateDay {
    /// Calendar date
    pub date: NaiveDate,
    /// Daily stats; `None` when the day has no records
    pub stats: Option<DailyHeartRate>,
}

/// The month's heart-rate panel data.
#[derive(Debug, Clone, Serialize)]
pub struct HeartRateCalendar {
    /// One entry per day of the target month
    pub days: Vec<HeartRateDay>,
    /// Merged hourly detail for drill-down rendering
    pub hours: Vec<HourlyHeartRate>,
}

/// Build the heart-rate panel for a month.
#[must_use]
pub fn build_heart_rate_calendar(
    month: CalendarMonth,
    records: &[HourlyHeartRateRecord],
) -> HeartRateCalendar {
    let daily = daily_heart_rate_stats(records);
    let days = month
        .days()
        .map(|date| HeartRateDay {
            date,
            stats: daily.get(&date).copied(),
        })
        .collect();

    let hours = merge_hourly_heart_rate(records)
        .into_iter()
        .map(|(key, acc)| HourlyHeartRate {
            date: key.date,
            hour: key.hour,
            min_bpm: acc.min_bpm,
            max_bpm: acc.max_bpm,
            avg_bpm: acc.avg_bpm().round() as u32,
        })
        .collect();

    HeartRateCalendar { days, hours }
}

/// One exercise entry in a day's card list.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseEntry {
    /// Provider activity label
    pub exercise_type: String,
    /// Human-readable activity label (underscores as spaces)
    pub display_type: String,
    /// Session start
    pub start: chrono::NaiveDateTime,
    /// Provider-reported active duration
    pub duration_minutes: f64,
}

/// One date group of the exercise log.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseLogDay {
    /// Calendar date of the group
    pub date: NaiveDate,
    /// Sessions starting on this date, provider order
    pub sessions: Vec<ExerciseEntry>,
}

/// The month's exercise log, most recent date first.
///
/// An empty `days` list is the explicit empty state ("no exercise sessions
/// this month"), never an error.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseLog {
    /// Non-empty date groups, descending
    pub days: Vec<ExerciseLogDay>,
}

/// Build the exercise log from fetched wire records.
#[must_use]
pub fn build_exercise_log(records: &[ExerciseSessionRecord]) -> ExerciseLog {
    let sessions = parse_exercise_sessions(records);
    let days = group_exercise_by_date(&sessions)
        .into_iter()
        .map(|day| ExerciseLogDay {
            date: day.date,
            sessions: day
                .sessions
                .into_iter()
                .map(|s| ExerciseEntry {
                    display_type: format::exercise_type_label(&s.kind),
                    exercise_type: s.kind,
                    start: s.start,
                    duration_minutes: s.duration_minutes,
                })
                .collect(),
        })
        .collect();
    ExerciseLog { days }
}

/// Build the month's trend statistics from fetched wire records.
#[must_use]
pub fn build_monthly_trends(
    sleep: &[SleepSessionRecord],
    steps: &[HourlyStepRecord],
    heart_rate: &[HourlyHeartRateRecord],
    exercise: &[ExerciseSessionRecord],
) -> MonthlyTrends {
    monthly_trends(
        &parse_sleep_sessions(sleep),
        steps,
        heart_rate,
        &parse_exercise_sessions(exercise),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::SleepStageRecord;

    fn month() -> CalendarMonth {
        CalendarMonth::new(2024, 0)
    }

    fn midnight_session() -> SleepSessionRecord {
        SleepSessionRecord {
            sleep_start: "2024-01-01T23:30:00".into(),
            sleep_end: "2024-01-02T01:15:00".into(),
            stages: Some(vec![
                SleepStageRecord {
                    stage_type: "light".into(),
                    stage_start: "2024-01-01T23:30:00".into(),
                    stage_end: "2024-01-02T00:30:00".into(),
                },
                SleepStageRecord {
                    stage_type: "deep".into(),
                    stage_start: "2024-01-02T00:30:00".into(),
                    stage_end: "2024-01-02T01:15:00".into(),
                },
            ]),
        }
    }

    #[test]
    fn sleep_calendar_places_midnight_crossing_session() {
        let calendar = build_sleep_calendar(month(), &[midnight_session()]);
        assert_eq!(calendar.days.len(), 31);

        let day1 = &calendar.days[0];
        let day2 = &calendar.days[1];
        assert!(day1.cells[23].is_some());
        assert!(day2.cells[0].is_some());
        assert!(day2.cells[1].is_some());
        assert!(day2.cells[2].is_none());

        // hour 0 holds 30m light + 30m deep (tie keeps light, first seen);
        // hour 1 holds only the deep tail
        let hour0 = day2.cells[0].as_ref().unwrap();
        assert_eq!(hour0.category, CellCategory::Stage(StageKind::Light));
        let hour1 = day2.cells[1].as_ref().unwrap();
        assert_eq!(hour1.category, CellCategory::Stage(StageKind::Deep));
    }

    #[test]
    fn dominant_deep_in_midnight_hour_when_light_is_partial() {
        // light 23:40-00:15, deep 00:15-01:00: hour 0 has 15m light vs 45m deep
        let record = SleepSessionRecord {
            sleep_start: "2024-01-01T23:40:00".into(),
            sleep_end: "2024-01-02T01:00:00".into(),
            stages: Some(vec![
                SleepStageRecord {
                    stage_type: "light".into(),
                    stage_start: "2024-01-01T23:40:00".into(),
                    stage_end: "2024-01-02T00:15:00".into(),
                },
                SleepStageRecord {
                    stage_type: "deep".into(),
                    stage_start: "2024-01-02T00:15:00".into(),
                    stage_end: "2024-01-02T01:00:00".into(),
                },
            ]),
        };
        let calendar = build_sleep_calendar(month(), &[record]);
        let cell = calendar.days[1].cells[0].as_ref().unwrap();
        assert_eq!(cell.category, CellCategory::Stage(StageKind::Deep));
        assert_eq!(cell.breakdown[0].kind, StageKind::Deep);
        assert_eq!(cell.breakdown[0].minutes, 45);
    }

    #[test]
    fn unknown_dominant_stage_renders_generic_sleep() {
        let record = SleepSessionRecord {
            sleep_start: "2024-01-03T02:00:00".into(),
            sleep_end: "2024-01-03T03:00:00".into(),
            stages: Some(vec![SleepStageRecord {
                stage_type: "mystery".into(),
                stage_start: "2024-01-03T02:00:00".into(),
                stage_end: "2024-01-03T03:00:00".into(),
            }]),
        };
        let calendar = build_sleep_calendar(month(), &[record]);
        let cell = calendar.days[2].cells[2].as_ref().unwrap();
        assert_eq!(cell.category, CellCategory::Sleep);
    }

    #[test]
    fn stageless_session_renders_generic_sleep() {
        let record = SleepSessionRecord {
            sleep_start: "2024-01-05T01:00:00".into(),
            sleep_end: "2024-01-05T02:30:00".into(),
            stages: None,
        };
        let calendar = build_sleep_calendar(month(), &[record]);
        let cell = calendar.days[4].cells[1].as_ref().unwrap();
        assert_eq!(cell.category, CellCategory::Sleep);
        assert!(cell.breakdown.is_empty());
    }

    #[test]
    fn lookback_day_buckets_are_dropped_from_the_grid() {
        // Session entirely on Dec 31 (the lookback day): queried, bucketed,
        // but not a row of the January grid.
        let record = SleepSessionRecord {
            sleep_start: "2023-12-31T22:00:00".into(),
            sleep_end: "2023-12-31T23:30:00".into(),
            stages: None,
        };
        let calendar = build_sleep_calendar(month(), &[record]);
        assert!(calendar
            .days
            .iter()
            .all(|day| day.cells.iter().all(Option::is_none)));
    }

    #[test]
    fn steps_calendar_fills_missing_days_with_zero() {
        let records = vec![crate::models::HourlyStepRecord {
            date: "2024-01-10".parse().unwrap(),
            hour: 9,
            step_count: 4200,
        }];
        let calendar = build_steps_calendar(month(), &records);
        assert_eq!(calendar.days.len(), 31);
        assert_eq!(calendar.days[9].total, 4200);
        assert_eq!(calendar.days[0].total, 0);
        assert_eq!(calendar.max_total, 4200);
        assert_eq!(calendar.hours.len(), 1);
    }

    #[test]
    fn empty_steps_month_has_unit_max_for_bar_scaling() {
        let calendar = build_steps_calendar(month(), &[]);
        assert_eq!(calendar.max_total, 1);
        assert!(calendar.days.iter().all(|d| d.total == 0));
    }

    #[test]
    fn heart_rate_days_without_records_are_none() {
        let records = vec![crate::models::HourlyHeartRateRecord {
            date: "2024-01-02".parse().unwrap(),
            hour: 2,
            min_bpm: 48,
            max_bpm: 61,
            avg_bpm: 54,
            sample_count: 9,
        }];
        let calendar = build_heart_rate_calendar(month(), &records);
        assert!(calendar.days[0].stats.is_none());
        let stats = calendar.days[1].stats.unwrap();
        assert_eq!(stats.min_bpm, 48);
        assert_eq!(calendar.hours.len(), 1);
        assert_eq!(calendar.hours[0].avg_bpm, 54);
    }

    #[test]
    fn empty_exercise_month_is_the_empty_state() {
        let log = build_exercise_log(&[]);
        assert!(log.days.is_empty());
    }
}

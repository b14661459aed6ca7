// ABOUTME: Reduces bucketed entries into per-cell and per-day summary statistics
// ABOUTME: Dominant sleep stage, stage breakdowns, daily totals, and exercise grouping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! Aggregation over bucketed records.
//!
//! All functions here are pure, idempotent transforms: derived maps are
//! rebuilt from scratch per render pass, nothing is cached or mutated
//! across calls.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::bucket::StageFragment;
use crate::models::{ExerciseSession, HourlyHeartRateRecord, HourlyStepRecord, StageKind};

/// Round a millisecond duration to whole minutes, half up.
#[must_use]
pub const fn ms_to_minutes(ms: i64) -> i64 {
    (ms + 30_000) / 60_000
}

/// Total fragment duration per stage kind, in first-seen order.
///
/// First-seen order matters: it is the tie-break for [`dominant_stage`].
fn stage_totals(fragments: &[StageFragment]) -> Vec<(StageKind, i64)> {
    let mut totals: Vec<(StageKind, i64)> = Vec::new();
    for fragment in fragments {
        match totals.iter_mut().find(|(kind, _)| *kind == fragment.kind) {
            Some(entry) => entry.1 += fragment.duration_ms,
            None => totals.push((fragment.kind, fragment.duration_ms)),
        }
    }
    totals
}

/// The stage kind with the strictly greatest total fragment duration.
///
/// Ties keep the first kind encountered in fragment order; empty input
/// returns `None`. Order-independent for same-kind fragments since totals
/// are summed before comparison.
#[must_use]
pub fn dominant_stage(fragments: &[StageFragment]) -> Option<StageKind> {
    let mut best: Option<(StageKind, i64)> = None;
    for (kind, total) in stage_totals(fragments) {
        match best {
            Some((_, best_total)) if total <= best_total => {}
            _ => best = Some((kind, total)),
        }
    }
    best.map(|(kind, _)| kind)
}

/// Per-stage minutes for tooltip-style breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageMinutes {
    /// Stage type
    #[serde(rename = "stage_type")]
    pub kind: StageKind,
    /// Total minutes in this stage, rounded to nearest
    pub minutes: i64,
}

/// Sum fragment durations per stage kind and sort descending by total
/// duration. The sort is stable, so equal totals keep first-seen order.
#[must_use]
pub fn stage_breakdown(fragments: &[StageFragment]) -> Vec<StageMinutes> {
    let mut totals = stage_totals(fragments);
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
        .into_iter()
        .map(|(kind, ms)| StageMinutes {
            kind,
            minutes: ms_to_minutes(ms),
        })
        .collect()
}

/// Sum step counts across all hourly records sharing a date.
#[must_use]
pub fn daily_step_totals(records: &[HourlyStepRecord]) -> BTreeMap<NaiveDate, u64> {
    let mut totals: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.date).or_default() += u64::from(record.step_count);
    }
    totals
}

/// Daily heart-rate summary for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyHeartRate {
    /// Minimum of all hourly minimums
    pub min_bpm: u32,
    /// Maximum of all hourly maximums
    pub max_bpm: u32,
    /// Unweighted mean of the hourly averages, rounded to nearest
    pub avg_bpm: u32,
}

/// Per-day heart-rate stats: min of mins, max of maxes, and the unweighted
/// arithmetic mean of the hourly `avg_bpm` values.
#[must_use]
pub fn daily_heart_rate_stats(
    records: &[HourlyHeartRateRecord],
) -> BTreeMap<NaiveDate, DailyHeartRate> {
    #[derive(Clone, Copy)]
    struct DayAccumulator {
        min_bpm: u32,
        max_bpm: u32,
        avg_total: f64,
        count: u32,
    }

    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();
    for record in records {
        days.entry(record.date)
            .and_modify(|acc| {
                acc.min_bpm = acc.min_bpm.min(record.min_bpm);
                acc.max_bpm = acc.max_bpm.max(record.max_bpm);
                acc.avg_total += f64::from(record.avg_bpm);
                acc.count += 1;
            })
            .or_insert(DayAccumulator {
                min_bpm: record.min_bpm,
                max_bpm: record.max_bpm,
                avg_total: f64::from(record.avg_bpm),
                count: 1,
            });
    }

    days.into_iter()
        .map(|(date, acc)| {
            (
                date,
                DailyHeartRate {
                    min_bpm: acc.min_bpm,
                    max_bpm: acc.max_bpm,
                    // count is at least 1 by construction
                    avg_bpm: (acc.avg_total / f64::from(acc.count)).round() as u32,
                },
            )
        })
        .collect()
}

/// One day of exercise sessions, provider order preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDay {
    /// Calendar date of the sessions' local start instants
    pub date: NaiveDate,
    /// Sessions starting on this date, in provider return order
    pub sessions: Vec<ExerciseSession>,
}

/// Group exercise sessions by the calendar date of their start instant,
/// most recent date first. Sessions within a date keep provider order.
/// Empty input yields an empty grouping, never an error.
#[must_use]
pub fn group_exercise_by_date(sessions: &[ExerciseSession]) -> Vec<ExerciseDay> {
    let mut grouped: BTreeMap<NaiveDate, Vec<ExerciseSession>> = BTreeMap::new();
    for session in sessions {
        grouped
            .entry(session.start.date())
            .or_default()
            .push(session.clone());
    }
    grouped
        .into_iter()
        .rev()
        .map(|(date, sessions)| ExerciseDay { date, sessions })
        .collect()
}

/// Hours counted as night for resting heart rate: local midnight to 6am.
pub const RESTING_HOUR_END: u8 = 6;

/// Mean of the hourly `avg_bpm` values whose hour falls in `[0, 6)`,
/// rounded to nearest. `None` when no night-hour records exist; never a
/// division by zero.
#[must_use]
pub fn resting_heart_rate(records: &[HourlyHeartRateRecord]) -> Option<u32> {
    let night: Vec<f64> = records
        .iter()
        .filter(|r| r.hour < RESTING_HOUR_END)
        .map(|r| f64::from(r.avg_bpm))
        .collect();
    if night.is_empty() {
        return None;
    }
    let mean = night.iter().sum::<f64>() / night.len() as f64;
    Some(mean.round() as u32)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn frag(kind: StageKind, ms: i64) -> StageFragment {
        StageFragment {
            kind,
            duration_ms: ms,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn dominant_stage_empty_is_none() {
        assert_eq!(dominant_stage(&[]), None);
    }

    #[test]
    fn dominant_stage_picks_strictly_greatest_total() {
        let fragments = vec![
            frag(StageKind::Light, 10_000),
            frag(StageKind::Deep, 25_000),
            frag(StageKind::Light, 10_000),
        ];
        assert_eq!(dominant_stage(&fragments), Some(StageKind::Deep));
    }

    #[test]
    fn dominant_stage_tie_keeps_first_seen() {
        let fragments = vec![frag(StageKind::Rem, 20_000), frag(StageKind::Deep, 20_000)];
        assert_eq!(dominant_stage(&fragments), Some(StageKind::Rem));

        let reversed = vec![frag(StageKind::Deep, 20_000), frag(StageKind::Rem, 20_000)];
        assert_eq!(dominant_stage(&reversed), Some(StageKind::Deep));
    }

    #[test]
    fn dominant_stage_is_order_independent_for_same_kind() {
        let a = vec![
            frag(StageKind::Light, 5_000),
            frag(StageKind::Deep, 12_000),
            frag(StageKind::Light, 10_000),
        ];
        let b = vec![
            frag(StageKind::Light, 10_000),
            frag(StageKind::Light, 5_000),
            frag(StageKind::Deep, 12_000),
        ];
        assert_eq!(dominant_stage(&a), dominant_stage(&b));
        assert_eq!(dominant_stage(&a), Some(StageKind::Light));
    }

    #[test]
    fn breakdown_sorts_descending_and_rounds_minutes() {
        let fragments = vec![
            frag(StageKind::Light, 90_000),  // 1.5 min -> 2
            frag(StageKind::Deep, 150_000),  // 2.5 min -> 3
            frag(StageKind::Awake, 29_000),  // 0.48 min -> 0
        ];
        let breakdown = stage_breakdown(&fragments);
        assert_eq!(
            breakdown,
            vec![
                StageMinutes { kind: StageKind::Deep, minutes: 3 },
                StageMinutes { kind: StageKind::Light, minutes: 2 },
                StageMinutes { kind: StageKind::Awake, minutes: 0 },
            ]
        );
    }

    #[test]
    fn daily_step_totals_sum_shared_dates() {
        let records = vec![
            HourlyStepRecord { date: date("2024-01-01"), hour: 3, step_count: 100 },
            HourlyStepRecord { date: date("2024-01-01"), hour: 3, step_count: 50 },
        ];
        let totals = daily_step_totals(&records);
        assert_eq!(totals[&date("2024-01-01")], 150);
    }

    #[test]
    fn daily_heart_rate_stats_merge_across_hours() {
        let d = date("2024-01-01");
        let records = vec![
            HourlyHeartRateRecord { date: d, hour: 2, min_bpm: 50, max_bpm: 60, avg_bpm: 55, sample_count: 12 },
            HourlyHeartRateRecord { date: d, hour: 3, min_bpm: 45, max_bpm: 65, avg_bpm: 58, sample_count: 4 },
        ];
        let stats = daily_heart_rate_stats(&records);
        assert_eq!(
            stats[&d],
            DailyHeartRate { min_bpm: 45, max_bpm: 65, avg_bpm: 57 }
        );
    }

    #[test]
    fn resting_heart_rate_uses_night_hours_only() {
        let d = date("2024-01-01");
        let records = vec![
            HourlyHeartRateRecord { date: d, hour: 2, min_bpm: 50, max_bpm: 60, avg_bpm: 55, sample_count: 12 },
            HourlyHeartRateRecord { date: d, hour: 3, min_bpm: 45, max_bpm: 65, avg_bpm: 58, sample_count: 4 },
            HourlyHeartRateRecord { date: d, hour: 14, min_bpm: 70, max_bpm: 140, avg_bpm: 95, sample_count: 40 },
        ];
        assert_eq!(resting_heart_rate(&records), Some(57));
    }

    #[test]
    fn resting_heart_rate_without_night_records_is_none() {
        let d = date("2024-01-01");
        let records = vec![HourlyHeartRateRecord {
            date: d, hour: 14, min_bpm: 70, max_bpm: 140, avg_bpm: 95, sample_count: 40,
        }];
        assert_eq!(resting_heart_rate(&records), None);
        assert_eq!(resting_heart_rate(&[]), None);
    }

    #[test]
    fn exercise_grouping_is_descending_with_provider_order_in_day() {
        fn session(kind: &str, start: &str) -> ExerciseSession {
            ExerciseSession {
                kind: kind.into(),
                start: start.parse().unwrap(),
                end: start.parse::<chrono::NaiveDateTime>().unwrap() + chrono::Duration::hours(1),
                duration_minutes: 60.0,
            }
        }
        let sessions = vec![
            session("walking", "2024-03-01T08:00:00"),
            session("running", "2024-03-05T07:00:00"),
            session("cycling", "2024-03-01T18:00:00"),
        ];
        let grouped = group_exercise_by_date(&sessions);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].date, date("2024-03-05"));
        assert_eq!(grouped[1].date, date("2024-03-01"));
        let kinds: Vec<_> = grouped[1].sessions.iter().map(|s| s.kind.as_str()).collect();
        assert_eq!(kinds, vec!["walking", "cycling"]);
    }

    #[test]
    fn exercise_grouping_of_empty_input_is_empty() {
        assert!(group_exercise_by_date(&[]).is_empty());
    }

    #[test]
    fn ms_rounding_is_half_up() {
        assert_eq!(ms_to_minutes(0), 0);
        assert_eq!(ms_to_minutes(29_999), 0);
        assert_eq!(ms_to_minutes(30_000), 1);
        assert_eq!(ms_to_minutes(90_000), 2);
    }
}

// ABOUTME: Monthly trend statistics over the visible month's records
// ABOUTME: Every mean over a filtered subset is Option-guarded, never NaN or a fake zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

use serde::Serialize;

use crate::calendar::aggregate::{daily_step_totals, resting_heart_rate};
use crate::models::{ExerciseSession, HourlyHeartRateRecord, HourlyStepRecord, SleepSession};

/// Trend statistics for one visible month.
///
/// A statistic with zero contributing inputs is `None` (rendered as a
/// "no data" sentinel) rather than zero, so the display never implies a
/// real zero measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyTrends {
    /// Mean sleep session length in hours, one decimal place
    pub avg_sleep_hours: Option<f64>,
    /// Mean of per-day step totals, over days that have any record
    pub avg_daily_steps: Option<u64>,
    /// Mean `avg_bpm` over hours in `[0, 6)`, rounded
    pub resting_heart_rate: Option<u32>,
    /// Number of exercise sessions in range
    pub exercise_sessions: usize,
}

/// Compute the month's trend statistics from the already-fetched records.
#[must_use]
pub fn monthly_trends(
    sleep: &[SleepSession],
    steps: &[HourlyStepRecord],
    heart_rate: &[HourlyHeartRateRecord],
    exercise: &[ExerciseSession],
) -> MonthlyTrends {
    MonthlyTrends {
        avg_sleep_hours: avg_sleep_hours(sleep),
        avg_daily_steps: avg_daily_steps(steps),
        resting_heart_rate: resting_heart_rate(heart_rate),
        exercise_sessions: exercise.len(),
    }
}

/// Mean of `end - start` across sessions, in hours, rounded to one decimal.
fn avg_sleep_hours(sessions: &[SleepSession]) -> Option<f64> {
    if sessions.is_empty() {
        return None;
    }
    let total_ms: i64 = sessions
        .iter()
        .map(|s| s.duration().num_milliseconds())
        .sum();
    let hours = total_ms as f64 / sessions.len() as f64 / 3_600_000.0;
    Some((hours * 10.0).round() / 10.0)
}

/// Mean of per-day totals across days that have any step record. Days with
/// zero records are excluded from the denominator.
fn avg_daily_steps(records: &[HourlyStepRecord]) -> Option<u64> {
    let totals = daily_step_totals(records);
    if totals.is_empty() {
        return None;
    }
    let sum: u64 = totals.values().sum();
    Some((sum as f64 / totals.len() as f64).round() as u64)
}

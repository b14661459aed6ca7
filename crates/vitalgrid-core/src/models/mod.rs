// ABOUTME: Wire records and parsed domain models for VitalGrid health data
// ABOUTME: Re-exports sleep, steps, heart-rate, and exercise types plus insert summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! # Data Models
//!
//! Wire records mirror the upload protocol exactly (`sleep_start`,
//! `step_count`, `min_bpm`, ...); field names must not change, the mobile
//! sync client and any existing frontend depend on them. Timestamps are
//! ISO-8601 local time with no offset, carried as strings on the wire and
//! parsed per record into [`chrono::NaiveDateTime`] so a single malformed
//! record can be skipped without failing the whole payload.

mod exercise;
mod heart_rate;
mod sleep;
mod steps;

pub use exercise::{
    parse_exercise_sessions, ExerciseBulkRequest, ExerciseSession, ExerciseSessionRecord,
};
pub use heart_rate::{HeartRateBulkRequest, HourlyHeartRateRecord};
pub use sleep::{
    parse_local_timestamp, parse_sleep_sessions, SleepBulkRequest, SleepSession,
    SleepSessionRecord, SleepStage, SleepStageRecord, StageKind,
};
pub use steps::{HourlyStepRecord, StepsBulkRequest};

use serde::{Deserialize, Serialize};

/// Result of a bulk insert: how many records were written and how many
/// were dropped as duplicates (or failed validation).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InsertSummary {
    /// Number of records written
    pub inserted: u64,
    /// Number of records dropped
    pub skipped: u64,
}

impl InsertSummary {
    /// Fold another summary into this one.
    pub fn merge(&mut self, other: Self) {
        self.inserted += other.inserted;
        self.skipped += other.skipped;
    }
}

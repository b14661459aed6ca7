// ABOUTME: Exercise session models for the monthly activity log
// ABOUTME: Wire records with provider type labels and per-record fallible parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::RecordError;
use crate::models::sleep::parse_local_timestamp;

/// Wire record for one exercise session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSessionRecord {
    /// Provider activity label, e.g. `outdoor_running`
    pub exercise_type: String,
    /// Session start, ISO-8601 local time
    pub exercise_start: String,
    /// Session end, ISO-8601 local time
    pub exercise_end: String,
    /// Provider-reported active duration
    pub duration_minutes: f64,
}

/// Bulk upload body for `POST /api/exercise`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseBulkRequest {
    /// Sessions to insert
    pub sessions: Vec<ExerciseSessionRecord>,
}

/// A parsed exercise session.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSession {
    /// Provider activity label
    pub kind: String,
    /// Session start
    pub start: NaiveDateTime,
    /// Session end
    pub end: NaiveDateTime,
    /// Provider-reported active duration
    pub duration_minutes: f64,
}

impl ExerciseSession {
    /// Parse a wire record; fails on malformed timestamps.
    pub fn from_record(record: &ExerciseSessionRecord) -> Result<Self, RecordError> {
        let start = parse_local_timestamp("exercise_start", &record.exercise_start)?;
        let end = parse_local_timestamp("exercise_end", &record.exercise_end)?;
        Ok(Self {
            kind: record.exercise_type.clone(),
            start,
            end,
            duration_minutes: record.duration_minutes,
        })
    }
}

/// Parse a batch of wire sessions, logging and dropping the ones that fail.
/// Provider return order is preserved for the survivors.
#[must_use]
pub fn parse_exercise_sessions(records: &[ExerciseSessionRecord]) -> Vec<ExerciseSession> {
    records
        .iter()
        .filter_map(|record| match ExerciseSession::from_record(record) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("skipping malformed exercise session: {e}");
                None
            }
        })
        .collect()
}

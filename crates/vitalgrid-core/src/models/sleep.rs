// ABOUTME: Sleep session and stage models for calendar bucketing
// ABOUTME: Wire records, StageKind enum, and per-record fallible parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::RecordError;

/// Wire record for one sleep stage nested in a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SleepStageRecord {
    /// Stage type as reported by the provider (light, deep, rem, awake, ...)
    pub stage_type: String,
    /// Stage start, ISO-8601 local time
    pub stage_start: String,
    /// Stage end, ISO-8601 local time
    pub stage_end: String,
}

/// Wire record for one sleep session.
///
/// `stages` is present only when the caller asked for `include_stages=true`;
/// stages need not tile the session exactly, gaps and overlaps are tolerated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SleepSessionRecord {
    /// Session start, ISO-8601 local time
    pub sleep_start: String,
    /// Session end, ISO-8601 local time
    pub sleep_end: String,
    /// Nested stage records, if requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<SleepStageRecord>>,
}

/// Bulk upload body for `POST /api/sleep`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepBulkRequest {
    /// Sessions to insert
    pub sessions: Vec<SleepSessionRecord>,
}

/// Types of sleep stages.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Light sleep - easy to wake from
    Light,
    /// Deep sleep - restorative, hard to wake from
    Deep,
    /// REM sleep - dreaming, memory consolidation
    Rem,
    /// Awake while in bed
    Awake,
    /// Anything the provider reports that we do not recognize
    Unknown,
}

impl StageKind {
    /// Parse a provider stage label; unrecognized labels map to `Unknown`
    /// rather than failing the record.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label {
            "light" => Self::Light,
            "deep" => Self::Deep,
            "rem" => Self::Rem,
            "awake" => Self::Awake,
            _ => Self::Unknown,
        }
    }

    /// Stable lowercase label, matching the wire `stage_type` values.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Deep => "deep",
            Self::Rem => "rem",
            Self::Awake => "awake",
            Self::Unknown => "unknown",
        }
    }
}

/// A parsed sleep stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepStage {
    /// Stage type
    pub kind: StageKind,
    /// Stage start
    pub start: NaiveDateTime,
    /// Stage end
    pub end: NaiveDateTime,
}

/// A parsed sleep session with its nested stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SleepSession {
    /// When sleep started
    pub start: NaiveDateTime,
    /// When sleep ended
    pub end: NaiveDateTime,
    /// Parsed stages; empty when the provider reported none
    pub stages: Vec<SleepStage>,
}

/// Parse an ISO-8601 local timestamp (no offset), e.g. `2024-01-01T23:30:00`.
pub fn parse_local_timestamp(
    field: &'static str,
    value: &str,
) -> Result<NaiveDateTime, RecordError> {
    value
        .parse::<NaiveDateTime>()
        .map_err(|_| RecordError::InvalidTimestamp {
            field,
            value: value.to_owned(),
        })
}

impl SleepSession {
    /// Parse a wire record.
    ///
    /// Fails on a malformed session timestamp or an empty interval. A
    /// malformed stage drops only that stage (with a warning), keeping the
    /// session so a generic sleep cell still renders.
    pub fn from_record(record: &SleepSessionRecord) -> Result<Self, RecordError> {
        let start = parse_local_timestamp("sleep_start", &record.sleep_start)?;
        let end = parse_local_timestamp("sleep_end", &record.sleep_end)?;
        if end <= start {
            return Err(RecordError::EmptyInterval { start, end });
        }

        let mut stages = Vec::new();
        for stage in record.stages.as_deref().unwrap_or_default() {
            match SleepStage::from_record(stage) {
                Ok(parsed) => stages.push(parsed),
                Err(e) => warn!("skipping malformed sleep stage: {e}"),
            }
        }

        Ok(Self { start, end, stages })
    }

    /// Session length.
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

impl SleepStage {
    /// Parse a wire stage record.
    pub fn from_record(record: &SleepStageRecord) -> Result<Self, RecordError> {
        let start = parse_local_timestamp("stage_start", &record.stage_start)?;
        let end = parse_local_timestamp("stage_end", &record.stage_end)?;
        Ok(Self {
            kind: StageKind::parse(&record.stage_type),
            start,
            end,
        })
    }
}

/// Parse a batch of wire sessions, logging and dropping the ones that fail.
///
/// This is the entry point for render passes: partial data must still
/// render, so one bad session never aborts the batch.
#[must_use]
pub fn parse_sleep_sessions(records: &[SleepSessionRecord]) -> Vec<SleepSession> {
    records
        .iter()
        .filter_map(|record| match SleepSession::from_record(record) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("skipping malformed sleep session: {e}");
                None
            }
        })
        .collect()
}

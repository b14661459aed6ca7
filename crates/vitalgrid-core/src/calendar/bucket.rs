// ABOUTME: Hourly bucketizer walking sleep intervals into (date, hour) buckets
// ABOUTME: Computes per-bucket stage-overlap fragments and merges already-hourly records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! Hourly bucketing.
//!
//! Sleep sessions span multiple hours and are walked hour by hour with
//! half-open semantics: a session ending exactly on an hour boundary does
//! not claim a bucket for the boundary hour. Step and heart-rate records
//! arrive already keyed by `(date, hour)` and only need merging when the
//! provider reports several segments for the same key.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;
use tracing::warn;

use crate::models::{HourlyHeartRateRecord, HourlyStepRecord, SleepSession, StageKind};

/// Milliseconds in one hour; the upper bound for any stage fragment.
pub const HOUR_MS: i64 = 3_600_000;

/// Bucket key: one hour of one calendar day. Unique per render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct HourKey {
    /// Calendar date
    pub date: NaiveDate,
    /// Hour of day, 0-23
    pub hour: u8,
}

/// The raw interval of a session touching a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSpan {
    /// Session start
    pub start: NaiveDateTime,
    /// Session end
    pub end: NaiveDateTime,
}

/// The portion of one sleep stage falling inside one hourly bucket.
///
/// Duration is always in `(0, HOUR_MS]`; zero or negative overlaps are
/// never emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageFragment {
    /// Stage type
    pub kind: StageKind,
    /// Overlap with the bucket's hour window, in milliseconds
    pub duration_ms: i64,
}

/// One hourly bucket: the sessions touching this hour and the stage
/// fragments overlapping it.
#[derive(Debug, Clone, Default)]
pub struct HourBucket {
    /// Sessions whose interval touches this hour
    pub sessions: Vec<SessionSpan>,
    /// Stage overlaps with this hour, in emission order
    pub fragments: Vec<StageFragment>,
}

/// Truncate a timestamp down to the top of its hour.
#[must_use]
pub fn hour_floor(ts: NaiveDateTime) -> NaiveDateTime {
    ts.date().and_hms_opt(ts.hour(), 0, 0).unwrap_or(ts)
}

/// Walk each session hour by hour and assign it to `(date, hour)` buckets.
///
/// The cursor starts at the session start truncated to the top of its hour
/// and advances one hour at a time while `cursor < session.end`. For every
/// visited hour, each nested stage contributes a fragment equal to its
/// overlap with the `[hour_start, hour_start + 1h)` window, when positive.
/// Sessions without stages still occupy buckets so they render as generic
/// sleep.
#[must_use]
pub fn bucketize_sleep(sessions: &[SleepSession]) -> BTreeMap<HourKey, HourBucket> {
    let mut buckets: BTreeMap<HourKey, HourBucket> = BTreeMap::new();

    for session in sessions {
        if session.end <= session.start {
            warn!(
                "skipping sleep session with non-positive interval: {} -> {}",
                session.start, session.end
            );
            continue;
        }

        let span = SessionSpan {
            start: session.start,
            end: session.end,
        };

        let mut cursor = hour_floor(session.start);
        while cursor < session.end {
            let hour_end = cursor + Duration::hours(1);
            let key = HourKey {
                date: cursor.date(),
                hour: cursor.hour() as u8,
            };
            let bucket = buckets.entry(key).or_default();
            bucket.sessions.push(span);

            for stage in &session.stages {
                let overlap_start = cursor.max(stage.start);
                let overlap_end = hour_end.min(stage.end);
                let overlap = (overlap_end - overlap_start).num_milliseconds();
                if overlap > 0 {
                    bucket.fragments.push(StageFragment {
                        kind: stage.kind,
                        duration_ms: overlap,
                    });
                }
            }

            cursor = hour_end;
        }
    }

    buckets
}

/// Merge already-hourly step records: records sharing a `(date, hour)` key
/// have their counts summed.
#[must_use]
pub fn merge_hourly_steps(records: &[HourlyStepRecord]) -> BTreeMap<HourKey, u64> {
    let mut merged: BTreeMap<HourKey, u64> = BTreeMap::new();
    for record in records {
        let key = HourKey {
            date: record.date,
            hour: record.hour,
        };
        *merged.entry(key).or_default() += u64::from(record.step_count);
    }
    merged
}

/// Accumulated heart-rate statistics for one `(date, hour)` key.
#[derive(Debug, Clone, Copy)]
pub struct HeartRateAccumulator {
    /// Minimum of all merged `min_bpm` values
    pub min_bpm: u32,
    /// Maximum of all merged `max_bpm` values
    pub max_bpm: u32,
    /// Total raw samples behind the merged records
    pub sample_count: u32,
    avg_total: f64,
    record_count: u32,
}

impl HeartRateAccumulator {
    fn from_record(record: &HourlyHeartRateRecord) -> Self {
        Self {
            min_bpm: record.min_bpm,
            max_bpm: record.max_bpm,
            sample_count: record.sample_count,
            avg_total: f64::from(record.avg_bpm),
            record_count: 1,
        }
    }

    fn merge(&mut self, record: &HourlyHeartRateRecord) {
        self.min_bpm = self.min_bpm.min(record.min_bpm);
        self.max_bpm = self.max_bpm.max(record.max_bpm);
        self.sample_count += record.sample_count;
        self.avg_total += f64::from(record.avg_bpm);
        self.record_count += 1;
    }

    /// Unweighted arithmetic mean of the merged per-record averages.
    #[must_use]
    pub fn avg_bpm(&self) -> f64 {
        // record_count is at least 1 by construction
        self.avg_total / f64::from(self.record_count)
    }
}

/// Merge already-hourly heart-rate records sharing a `(date, hour)` key.
#[must_use]
pub fn merge_hourly_heart_rate(
    records: &[HourlyHeartRateRecord],
) -> BTreeMap<HourKey, HeartRateAccumulator> {
    let mut merged: BTreeMap<HourKey, HeartRateAccumulator> = BTreeMap::new();
    for record in records {
        let key = HourKey {
            date: record.date,
            hour: record.hour,
        };
        merged
            .entry(key)
            .and_modify(|acc| acc.merge(record))
            .or_insert_with(|| HeartRateAccumulator::from_record(record));
    }
    merged
}

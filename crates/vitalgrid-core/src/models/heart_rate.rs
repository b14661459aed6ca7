// ABOUTME: Pre-aggregated hourly heart-rate records from the mobile provider
// ABOUTME: Carries min/max/avg BPM and the sample count behind each read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One provider-aggregated hour of heart-rate data.
///
/// When multiple records share a `(date, hour)` key they are merged by
/// taking the global min of mins, the global max of maxes, and the
/// unweighted arithmetic mean of the per-record averages. `sample_count`
/// is carried along (and summed on merge) but deliberately does not weight
/// the average; see the design notes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HourlyHeartRateRecord {
    /// Calendar date, `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Hour of day, 0-23
    pub hour: u8,
    /// Lowest BPM observed in the hour
    pub min_bpm: u32,
    /// Highest BPM observed in the hour
    pub max_bpm: u32,
    /// Provider-computed average BPM for the hour
    pub avg_bpm: u32,
    /// Number of raw samples behind this record
    pub sample_count: u32,
}

/// Bulk upload body for `POST /api/heartrate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartRateBulkRequest {
    /// Records to insert
    pub records: Vec<HourlyHeartRateRecord>,
}

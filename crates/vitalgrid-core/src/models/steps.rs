// ABOUTME: Hourly step count records as reported by the mobile provider
// ABOUTME: One record per provider segment; duplicate (date, hour) keys are summed downstream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One provider-reported hourly step segment.
///
/// Multiple records may share a `(date, hour)` key; the bucketizer sums
/// them when merging.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HourlyStepRecord {
    /// Calendar date, `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Hour of day, 0-23
    pub hour: u8,
    /// Steps counted in this segment
    pub step_count: u32,
}

/// Bulk upload body for `POST /api/steps`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepsBulkRequest {
    /// Records to insert
    pub records: Vec<HourlyStepRecord>,
}

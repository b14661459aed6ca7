// ABOUTME: Per-record error types for malformed provider data
// ABOUTME: Drives the log-and-skip policy so one bad record never aborts a render
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! Record-level errors.
//!
//! A malformed or missing timestamp fails only the affected record or
//! session during bucketing; callers log the error and continue so that
//! partial data still renders.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Error raised while parsing a single wire record into a domain type.
#[derive(Debug, Error)]
pub enum RecordError {
    /// A timestamp field was missing or did not parse as ISO-8601 local time.
    #[error("invalid timestamp in `{field}`: {value:?}")]
    InvalidTimestamp {
        /// Wire field name that failed to parse
        field: &'static str,
        /// The raw value as received
        value: String,
    },

    /// An interval's end was not strictly after its start.
    #[error("interval end {end} is not after start {start}")]
    EmptyInterval {
        /// Interval start
        start: NaiveDateTime,
        /// Interval end
        end: NaiveDateTime,
    },
}

// ABOUTME: Core types and calendar aggregation logic for the VitalGrid health mirror
// ABOUTME: Foundation crate with wire models, month ranges, bucketizer, and aggregator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

#![deny(unsafe_code)]

//! # VitalGrid Core
//!
//! Foundation crate for the VitalGrid health data mirror. It converts
//! irregular, possibly overlapping raw health records (sleep sessions with
//! nested stages, hourly step and heart-rate records, exercise sessions)
//! into fixed hourly and daily buckets suitable for calendar-grid rendering.
//!
//! The crate is a pure, synchronous transform: no I/O, no persisted state.
//! Every derived structure is rebuilt from scratch per render pass.
//!
//! ## Modules
//!
//! - **models**: Wire records (exact provider field names) and parsed domain types
//! - **errors**: Per-record parse errors for the log-and-skip policy
//! - **calendar**: Month ranges, hourly bucketizer, aggregator, trends, and view models

/// Per-record error types for malformed provider data
pub mod errors;

/// Wire records and parsed domain models for the four health data kinds
pub mod models;

/// Month ranges, hourly bucketing, aggregation, and calendar view models
pub mod calendar;

pub use errors::RecordError;
pub use models::{
    ExerciseBulkRequest, ExerciseSession, ExerciseSessionRecord, HeartRateBulkRequest,
    HourlyHeartRateRecord, HourlyStepRecord, InsertSummary, SleepBulkRequest, SleepSession,
    SleepSessionRecord, SleepStage, SleepStageRecord, StageKind, StepsBulkRequest,
};

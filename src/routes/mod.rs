// ABOUTME: HTTP route assembly for the VitalGrid REST API
// ABOUTME: Raw record endpoints, calendar aggregation endpoints, and health checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! # HTTP Routes
//!
//! The API has three surfaces:
//!
//! - **Raw records** (`/api/sleep`, `/api/steps`, `/api/heartrate`,
//!   `/api/exercise`): bulk uploads from the mobile companion and
//!   range reads, exact provider field names on the wire
//! - **Calendar** (`/api/calendar/{year}/{month}/...`): aggregated
//!   month views built by `vitalgrid-core`
//! - **Health** (`/health`): liveness and storage connectivity

pub mod calendar;
pub mod exercise;
pub mod health;
pub mod heart_rate;
pub mod sleep;
pub mod steps;

use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use axum::Router;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use vitalgrid_core::models::parse_local_timestamp;

/// One end of a session range query: either a calendar day or an exact
/// local timestamp. The frontend sends `YYYY-MM-DD`; full timestamps are
/// accepted for callers that want sub-day precision.
#[derive(Debug, Clone, Copy)]
enum RangeBound {
    Day(NaiveDate),
    Instant(NaiveDateTime),
}

impl RangeBound {
    fn parse(field: &'static str, value: &str) -> AppResult<Self> {
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Ok(Self::Day(date));
        }
        Ok(Self::Instant(parse_local_timestamp(field, value)?))
    }

    fn start(self) -> NaiveDateTime {
        match self {
            Self::Day(date) => date.and_time(NaiveTime::MIN),
            Self::Instant(ts) => ts,
        }
    }

    /// Exclusive upper bound: a day covers everything before the next
    /// day's midnight, an instant is used as-is.
    fn exclusive_end(self) -> NaiveDateTime {
        match self {
            Self::Day(date) => (date + Duration::days(1)).and_time(NaiveTime::MIN),
            Self::Instant(ts) => ts,
        }
    }
}

/// Parse a session range query into a half-open `[start, end)` window.
pub(crate) fn parse_session_window(
    from: &str,
    to: &str,
) -> AppResult<(NaiveDateTime, NaiveDateTime)> {
    let from = RangeBound::parse("from", from)?;
    let to = RangeBound::parse("to", to)?;

    if to.start() < from.start() {
        return Err(AppError::invalid_input("'to' must not precede 'from'"));
    }

    Ok((from.start(), to.exclusive_end()))
}

/// Build the complete API router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(sleep::SleepRoutes::routes(resources.clone()))
        .merge(steps::StepsRoutes::routes(resources.clone()))
        .merge(heart_rate::HeartRateRoutes::routes(resources.clone()))
        .merge(exercise::ExerciseRoutes::routes(resources.clone()))
        .merge(calendar::CalendarRoutes::routes(resources.clone()))
        .merge(health::HealthRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ABOUTME: Monthly calendar aggregation endpoints for sleep, steps, heart rate, exercise
// ABOUTME: Fetches records through the configured data source and renders core view models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! Calendar aggregation endpoints
//!
//! `GET /api/calendar/{year}/{month}/{kind}` with a 1-12 month. Each
//! response carries a monotonically increasing `generation` so a renderer
//! navigating quickly between months can discard responses that arrive
//! out of order; requests are never cancelled, the latest one simply wins.

use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use vitalgrid_core::calendar::{
    build_exercise_log, build_heart_rate_calendar, build_monthly_trends, build_sleep_calendar,
    build_steps_calendar, CalendarMonth, ExerciseLog, HeartRateCalendar, MonthRange, MonthlyTrends,
    RenderTicket, SleepCalendar, StepsCalendar,
};

/// Calendar endpoints
pub struct CalendarRoutes;

impl CalendarRoutes {
    /// Build the calendar sub-router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/calendar/:year/:month/sleep", get(sleep_calendar))
            .route("/api/calendar/:year/:month/steps", get(steps_calendar))
            .route(
                "/api/calendar/:year/:month/heartrate",
                get(heart_rate_calendar),
            )
            .route("/api/calendar/:year/:month/exercise", get(exercise_log))
            .route("/api/calendar/:year/:month/trends", get(trends))
            .with_state(resources)
    }
}

/// Envelope for every calendar response
#[derive(Debug, Serialize)]
pub struct CalendarResponse<T> {
    /// Render generation; a renderer keeps only the highest value seen
    pub generation: u64,
    /// Target year
    pub year: i32,
    /// Target month, 1-12
    pub month: u32,
    /// Queried and displayed day range
    pub range: MonthRange,
    /// The aggregated view model
    pub data: T,
}

#[derive(Debug, Deserialize)]
struct SleepCalendarQuery {
    /// Stage detail is on by default; `include_stages=false` renders the
    /// whole grid as generic sleep
    #[serde(default = "default_true")]
    include_stages: bool,
}

const fn default_true() -> bool {
    true
}

fn resolve_month(year: i32, month: u32) -> AppResult<CalendarMonth> {
    CalendarMonth::from_one_based(year, month)
        .ok_or_else(|| AppError::value_out_of_range(format!("month must be 1-12, got {month}")))
}

impl<T> CalendarResponse<T> {
    /// Stamp a finished render. `ticket` must have been taken before the
    /// records were fetched so a render overtaken mid-flight is visible.
    fn assemble(resources: &ServerResources, ticket: RenderTicket, month: CalendarMonth, data: T) -> Self {
        if !resources.renders.is_current(ticket) {
            // A newer render began while this one was being built; the
            // stamp below lets the client drop this response.
            debug!(generation = ticket.value(), "calendar render superseded");
        }
        Self {
            generation: ticket.value(),
            year: month.year(),
            month: month.month0() + 1,
            range: month.range(),
            data,
        }
    }
}

async fn sleep_calendar(
    State(resources): State<Arc<ServerResources>>,
    Path((year, month)): Path<(i32, u32)>,
    Query(query): Query<SleepCalendarQuery>,
) -> AppResult<Json<CalendarResponse<SleepCalendar>>> {
    let month = resolve_month(year, month)?;
    let ticket = resources.renders.begin();
    let range = month.range();

    let records = resources
        .source
        .sleep_sessions(range.query_from, range.month_to, query.include_stages)
        .await?;

    let data = build_sleep_calendar(month, &records);
    Ok(Json(CalendarResponse::assemble(&resources, ticket, month, data)))
}

async fn steps_calendar(
    State(resources): State<Arc<ServerResources>>,
    Path((year, month)): Path<(i32, u32)>,
) -> AppResult<Json<CalendarResponse<StepsCalendar>>> {
    let month = resolve_month(year, month)?;
    let ticket = resources.renders.begin();
    let range = month.range();

    let records = resources
        .source
        .hourly_steps(range.month_from, range.month_to)
        .await?;

    let data = build_steps_calendar(month, &records);
    Ok(Json(CalendarResponse::assemble(&resources, ticket, month, data)))
}

async fn heart_rate_calendar(
    State(resources): State<Arc<ServerResources>>,
    Path((year, month)): Path<(i32, u32)>,
) -> AppResult<Json<CalendarResponse<HeartRateCalendar>>> {
    let month = resolve_month(year, month)?;
    let ticket = resources.renders.begin();
    let range = month.range();

    let records = resources
        .source
        .hourly_heart_rate(range.month_from, range.month_to)
        .await?;

    let data = build_heart_rate_calendar(month, &records);
    Ok(Json(CalendarResponse::assemble(&resources, ticket, month, data)))
}

async fn exercise_log(
    State(resources): State<Arc<ServerResources>>,
    Path((year, month)): Path<(i32, u32)>,
) -> AppResult<Json<CalendarResponse<ExerciseLog>>> {
    let month = resolve_month(year, month)?;
    let ticket = resources.renders.begin();
    let range = month.range();

    let records = resources
        .source
        .exercise_sessions(range.month_from, range.month_to)
        .await?;

    let data = build_exercise_log(&records);
    Ok(Json(CalendarResponse::assemble(&resources, ticket, month, data)))
}

async fn trends(
    State(resources): State<Arc<ServerResources>>,
    Path((year, month)): Path<(i32, u32)>,
) -> AppResult<Json<CalendarResponse<MonthlyTrends>>> {
    let month = resolve_month(year, month)?;
    let ticket = resources.renders.begin();
    let range = month.range();

    // Stage detail is not needed for trend statistics
    let sleep = resources
        .source
        .sleep_sessions(range.query_from, range.month_to, false)
        .await?;
    let steps = resources
        .source
        .hourly_steps(range.month_from, range.month_to)
        .await?;
    let heart_rate = resources
        .source
        .hourly_heart_rate(range.month_from, range.month_to)
        .await?;
    let exercise = resources
        .source
        .exercise_sessions(range.month_from, range.month_to)
        .await?;

    let data = build_monthly_trends(&sleep, &steps, &heart_rate, &exercise);
    Ok(Json(CalendarResponse::assemble(&resources, ticket, month, data)))
}

// ABOUTME: Raw hourly step endpoints for bulk upload and range reads
// ABOUTME: Per-record hour validation with log-and-skip on out-of-range values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! Step record endpoints

use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use vitalgrid_core::{HourlyStepRecord, InsertSummary, StepsBulkRequest};

/// Step endpoints
pub struct StepsRoutes;

impl StepsRoutes {
    /// Build the steps sub-router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/steps", post(upload).get(list))
            .with_state(resources)
    }
}

#[derive(Debug, Deserialize)]
struct DateRangeQuery {
    from: NaiveDate,
    to: NaiveDate,
}

async fn upload(
    State(resources): State<Arc<ServerResources>>,
    Json(body): Json<StepsBulkRequest>,
) -> AppResult<(StatusCode, Json<InsertSummary>)> {
    let mut summary = InsertSummary::default();
    let mut records = Vec::with_capacity(body.records.len());

    for record in body.records {
        if record.hour > 23 {
            warn!(
                date = %record.date,
                hour = record.hour,
                "skipping step record with out-of-range hour"
            );
            summary.skipped += 1;
            continue;
        }
        records.push(record);
    }

    summary.merge(resources.database.insert_hourly_steps(&records).await?);

    info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        "step upload processed"
    );

    Ok((StatusCode::CREATED, Json(summary)))
}

async fn list(
    State(resources): State<Arc<ServerResources>>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<HourlyStepRecord>>> {
    if query.to < query.from {
        return Err(AppError::invalid_input("'to' must not precede 'from'"));
    }

    let records = resources
        .database
        .hourly_steps_in_range(query.from, query.to)
        .await?;

    Ok(Json(records))
}

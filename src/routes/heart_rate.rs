// ABOUTME: Raw hourly heart-rate endpoints for bulk upload and range reads
// ABOUTME: Per-record validation of hour range and bpm ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! Heart-rate record endpoints

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
use vitalgrid_core::{HeartRateBulkRequest, HourlyHeartRateRecord, InsertSummary};

/// Heart-rate endpoints
pub struct HeartRateRoutes;

impl HeartRateRoutes {
    /// Build the heart-rate sub-router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/heartrate", post(upload).get(list))
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
    Json(body): Json<HeartRateBulkRequest>,
) -> AppResult<(StatusCode, Json<InsertSummary>)> {
    let mut summary = InsertSummary::default();
    let mut records = Vec::with_capacity(body.records.len());

    for record in body.records {
        if record.hour > 23 || record.min_bpm > record.max_bpm {
            warn!(
                date = %record.date,
                hour = record.hour,
                min_bpm = record.min_bpm,
                max_bpm = record.max_bpm,
                "skipping inconsistent heart-rate record"
            );
            summary.skipped += 1;
            continue;
        }
        records.push(record);
    }

    summary.merge(
        resources
            .database
            .insert_hourly_heart_rate(&records)
            .await?,
    );

    info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        "heart-rate upload processed"
    );

    Ok((StatusCode::CREATED, Json(summary)))
}

async fn list(
    State(resources): State<Arc<ServerResources>>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<HourlyHeartRateRecord>>> {
    if query.to < query.from {
        return Err(AppError::invalid_input("'to' must not precede 'from'"));
    }

    let records = resources
        .database
        .hourly_heart_rate_in_range(query.from, query.to)
        .await?;

    Ok(Json(records))
}

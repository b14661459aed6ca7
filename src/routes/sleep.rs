// ABOUTME: Raw sleep session endpoints for bulk upload and range reads
// ABOUTME: Per-record validation with log-and-skip on malformed sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! Sleep record endpoints

use crate::errors::AppResult;
use crate::resources::ServerResources;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use vitalgrid_core::{InsertSummary, SleepBulkRequest, SleepSession, SleepSessionRecord};

/// Sleep endpoints
pub struct SleepRoutes;

impl SleepRoutes {
    /// Build the sleep sub-router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/sleep", post(upload).get(list))
            .with_state(resources)
    }
}

#[derive(Debug, Deserialize)]
struct SleepRangeQuery {
    from: String,
    to: String,
    #[serde(default)]
    include_stages: bool,
}

async fn upload(
    State(resources): State<Arc<ServerResources>>,
    Json(body): Json<SleepBulkRequest>,
) -> AppResult<(StatusCode, Json<InsertSummary>)> {
    let mut summary = InsertSummary::default();
    let mut sessions = Vec::with_capacity(body.sessions.len());

    // Malformed sessions are skipped, not rejected: one bad record from a
    // provider must not block the rest of the upload window.
    for record in &body.sessions {
        match SleepSession::from_record(record) {
            Ok(session) => sessions.push(session),
            Err(e) => {
                warn!("skipping malformed sleep session in upload: {e}");
                summary.skipped += 1;
            }
        }
    }

    summary.merge(resources.database.insert_sleep_sessions(&sessions).await?);

    info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        "sleep upload processed"
    );

    Ok((StatusCode::CREATED, Json(summary)))
}

async fn list(
    State(resources): State<Arc<ServerResources>>,
    Query(query): Query<SleepRangeQuery>,
) -> AppResult<Json<Vec<SleepSessionRecord>>> {
    let (from, to) = super::parse_session_window(&query.from, &query.to)?;

    let sessions = resources
        .database
        .sleep_sessions_in_range(from, to, query.include_stages)
        .await?;

    Ok(Json(sessions))
}

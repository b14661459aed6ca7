// ABOUTME: Raw exercise session endpoints for bulk upload and range reads
// ABOUTME: Per-record timestamp parsing with log-and-skip on malformed sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! Exercise record endpoints

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
use vitalgrid_core::{ExerciseBulkRequest, ExerciseSession, ExerciseSessionRecord, InsertSummary};

/// Exercise endpoints
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Build the exercise sub-router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/exercise", post(upload).get(list))
            .with_state(resources)
    }
}

#[derive(Debug, Deserialize)]
struct ExerciseRangeQuery {
    from: String,
    to: String,
}

async fn upload(
    State(resources): State<Arc<ServerResources>>,
    Json(body): Json<ExerciseBulkRequest>,
) -> AppResult<(StatusCode, Json<InsertSummary>)> {
    let mut summary = InsertSummary::default();
    let mut sessions = Vec::with_capacity(body.sessions.len());

    for record in &body.sessions {
        match ExerciseSession::from_record(record) {
            Ok(session) => sessions.push(session),
            Err(e) => {
                warn!("skipping malformed exercise session in upload: {e}");
                summary.skipped += 1;
            }
        }
    }

    summary.merge(
        resources
            .database
            .insert_exercise_sessions(&sessions)
            .await?,
    );

    info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        "exercise upload processed"
    );

    Ok((StatusCode::CREATED, Json(summary)))
}

async fn list(
    State(resources): State<Arc<ServerResources>>,
    Query(query): Query<ExerciseRangeQuery>,
) -> AppResult<Json<Vec<ExerciseSessionRecord>>> {
    let (from, to) = super::parse_session_window(&query.from, &query.to)?;

    let sessions = resources
        .database
        .exercise_sessions_in_range(from, to)
        .await?;

    Ok(Json(sessions))
}

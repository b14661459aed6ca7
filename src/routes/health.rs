// ABOUTME: Health check endpoint exposing service and storage status
// ABOUTME: Returns 200 when healthy, 503 when a component check fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! Health endpoint

use crate::health::{HealthResponse, HealthStatus};
use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Health endpoints
pub struct HealthRoutes;

impl HealthRoutes {
    /// Build the health sub-router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(check))
            .with_state(resources)
    }
}

async fn check(
    State(resources): State<Arc<ServerResources>>,
) -> (StatusCode, Json<HealthResponse>) {
    let response = resources.health.check().await;

    let status = match response.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(response))
}

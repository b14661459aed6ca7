// ABOUTME: Server health monitoring and system status checks for operational visibility
// ABOUTME: Database connectivity probe and structured health responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! Health check endpoints and monitoring utilities

use crate::database::Database;
use serde::{Deserialize, Serialize};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::error;

/// Overall health status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: HealthStatus,
    /// Service information
    pub service: ServiceInfo,
    /// Individual component checks
    pub checks: Vec<ComponentHealth>,
    /// Response timestamp, seconds since the epoch
    pub timestamp: u64,
}

/// Service information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Service name
    pub name: String,
    /// Service version
    pub version: String,
    /// Service uptime in seconds
    pub uptime_seconds: u64,
}

/// Individual component health status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component name
    pub name: String,
    /// Component status
    pub status: HealthStatus,
    /// Status description
    pub message: String,
    /// Check duration in milliseconds
    pub duration_ms: u64,
}

/// Health checker for the VitalGrid server
pub struct HealthChecker {
    start_time: Instant,
    database: Database,
}

impl HealthChecker {
    /// Create a new health checker
    #[must_use]
    pub fn new(database: Database) -> Self {
        Self {
            start_time: Instant::now(),
            database,
        }
    }

    /// Run all component checks and report overall status
    pub async fn check(&self) -> HealthResponse {
        let database = self.check_database().await;

        let status = if database.status == HealthStatus::Healthy {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        HealthResponse {
            status,
            service: ServiceInfo {
                name: "vitalgrid-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                uptime_seconds: self.start_time.elapsed().as_secs(),
            },
            checks: vec![database],
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
        }
    }

    async fn check_database(&self) -> ComponentHealth {
        let started = Instant::now();

        let result = sqlx::query("SELECT 1")
            .execute(self.database.pool())
            .await;

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match result {
            Ok(_) => ComponentHealth {
                name: "database".into(),
                status: HealthStatus::Healthy,
                message: "connection ok".into(),
                duration_ms,
            },
            Err(e) => {
                error!("database health check failed: {e}");
                ComponentHealth {
                    name: "database".into(),
                    status: HealthStatus::Unhealthy,
                    message: e.to_string(),
                    duration_ms,
                }
            }
        }
    }
}

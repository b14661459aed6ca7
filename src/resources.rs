// ABOUTME: Shared server resources threaded through every route handler
// ABOUTME: Bundles database, data source, render sequence, and config behind one Arc
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! # Shared Server Resources
//!
//! All route handlers receive one `Arc<ServerResources>`; per-handler
//! cloning of pools or configs is not allowed.

use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::fetch::{HealthDataSource, HttpDataSource};
use crate::health::HealthChecker;
use std::sync::Arc;
use tracing::info;
use vitalgrid_core::calendar::RenderSequence;

/// Container for all shared server dependencies
pub struct ServerResources {
    /// Local health-data storage, target of all uploads
    pub database: Database,
    /// Source calendar reads go through: the local database, or an
    /// upstream instance when one is configured
    pub source: Arc<dyn HealthDataSource>,
    /// Monotonic sequence stamped onto calendar responses so renderers
    /// can discard stale ones
    pub renders: RenderSequence,
    /// Health checker probing storage connectivity
    pub health: HealthChecker,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create server resources, selecting the calendar data source from
    /// the configured upstream URL.
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        let source: Arc<dyn HealthDataSource> = match &config.upstream_url {
            Some(url) => {
                info!(upstream.url = %url, "calendar reads served from upstream instance");
                Arc::new(HttpDataSource::new(url.clone()))
            }
            None => Arc::new(database.clone()),
        };

        Self {
            health: HealthChecker::new(database.clone()),
            database,
            source,
            renders: RenderSequence::new(),
            config: Arc::new(config),
        }
    }
}

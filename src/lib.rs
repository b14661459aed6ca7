// ABOUTME: Main library entry point for the VitalGrid health data mirror
// ABOUTME: REST API over SQLite storage plus monthly calendar aggregation endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

#![deny(unsafe_code)]

//! # VitalGrid Server
//!
//! Backend for the VitalGrid health data mirror. A mobile sync client
//! uploads sleep, step, heart-rate, and exercise records in bulk; this
//! server stores them in SQLite and serves both the raw records and
//! monthly calendar-style aggregates (hourly sleep grid, daily step bars,
//! daily heart-rate ranges, exercise log, trend statistics) computed by
//! the `vitalgrid-core` crate.
//!
//! ## Architecture
//!
//! - **config**: Environment-based server configuration
//! - **database**: SQLite storage with inline migrations (sqlx)
//! - **fetch**: The `HealthDataSource` collaborator the aggregation
//!   pipeline reads from (local database or a remote upstream mirror)
//! - **routes**: Axum REST routes for raw records and calendar aggregates
//! - **health**: Service health endpoint with a database check
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use vitalgrid::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("VitalGrid configured with HTTP port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Environment-based configuration management
pub mod config;

/// SQLite storage with inline migrations and per-resource queries
pub mod database;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// The injected data-fetch collaborator for calendar renders
pub mod fetch;

/// Health check endpoint and database monitoring
pub mod health;

/// Logging configuration and structured logging setup
pub mod logging;

/// Shared server resources passed to all route handlers
pub mod resources;

/// HTTP REST routes for raw records and calendar aggregates
pub mod routes;

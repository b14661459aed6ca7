// ABOUTME: Configuration management module for centralized server settings and parameters
// ABOUTME: Handles environment configs and runtime options for the VitalGrid server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors
//! Configuration module for the VitalGrid server
//!
//! Centralized configuration management:
//!
//! - **Environment**: Server configuration from environment variables

/// Environment and server configuration
pub mod environment;

pub use environment::{Environment, LogLevel, ServerConfig};

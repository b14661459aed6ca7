// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! Environment-based configuration management for production deployment

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use tracing::{info, warn};

/// Default HTTP port when `VITALGRID_HTTP_PORT` is unset
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default SQLite database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/vitalgrid.db";

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for deployment-specific behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Complete server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the HTTP API listens on
    pub http_port: u16,
    /// SQLite database URL
    pub database_url: String,
    /// Log level for application logs
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Optional upstream VitalGrid instance to mirror data from.
    /// When unset, all reads come from the local database.
    pub upstream_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            log_level: LogLevel::Info,
            environment: Environment::Development,
            upstream_url: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a set environment variable fails to parse
    pub fn from_env() -> Result<Self> {
        let http_port = match env::var("VITALGRID_HTTP_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("invalid VITALGRID_HTTP_PORT value: {value}"))?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        let log_level = env::var("RUST_LOG")
            .map(|level| LogLevel::from_str_or_default(&level))
            .unwrap_or_default();

        let environment = env::var("ENVIRONMENT")
            .map(|value| Environment::from_str_or_default(&value))
            .unwrap_or_default();

        let upstream_url = env::var("VITALGRID_UPSTREAM_URL")
            .ok()
            .filter(|value| !value.trim().is_empty());

        let config = Self {
            http_port,
            database_url,
            log_level,
            environment,
            upstream_url,
        };

        config.validate()?;
        config.log_summary();

        Ok(config)
    }

    /// Validate the configuration for obvious misconfigurations
    ///
    /// # Errors
    ///
    /// Returns an error when a value cannot be used to start the server
    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            anyhow::bail!("DATABASE_URL must not be empty");
        }

        if let Some(url) = &self.upstream_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("VITALGRID_UPSTREAM_URL must be an http(s) URL, got: {url}");
            }
        }

        if self.environment.is_production() && self.database_url.contains(":memory:") {
            warn!("running production environment with an in-memory database");
        }

        Ok(())
    }

    /// Log a configuration summary at startup
    fn log_summary(&self) {
        info!(
            http.port = self.http_port,
            database.url = %self.database_url,
            log.level = %self.log_level,
            environment = %self.environment,
            upstream.configured = self.upstream_url.is_some(),
            "Server configuration loaded"
        );
    }
}

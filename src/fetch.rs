// ABOUTME: Health-data source abstraction over local storage and upstream mirrors
// ABOUTME: HealthDataSource trait, Database impl, and reqwest-backed HTTP source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! # Health Data Sources
//!
//! Calendar rendering reads raw records through the [`HealthDataSource`]
//! trait. The default source is the local [`Database`]; when an upstream
//! VitalGrid instance is configured, [`HttpDataSource`] reads from its raw
//! REST endpoints instead, so a read replica can serve calendars without
//! receiving uploads itself.

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveTime};
use std::sync::OnceLock;
use std::time::Duration as StdDuration;
use tracing::debug;
use vitalgrid_core::{ExerciseSessionRecord, HourlyHeartRateRecord, HourlyStepRecord, SleepSessionRecord};

/// Shared HTTP client for upstream requests.
///
/// Connection pooling matters here: calendar rendering issues one request
/// per data kind, and a fresh client per request would redo TLS setup.
static HTTP_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

const HTTP_TIMEOUT: StdDuration = StdDuration::from_secs(30);

fn shared_client() -> &'static reqwest::Client {
    HTTP_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    })
}

/// Expand an inclusive day range into the half-open datetime window the
/// session storage queries expect.
fn day_window(from: NaiveDate, to: NaiveDate) -> (chrono::NaiveDateTime, chrono::NaiveDateTime) {
    (
        from.and_time(NaiveTime::MIN),
        (to + Duration::days(1)).and_time(NaiveTime::MIN),
    )
}

/// Read access to raw health records for a time window.
#[async_trait]
pub trait HealthDataSource: Send + Sync {
    /// Sleep sessions starting on a day in `from..=to`.
    async fn sleep_sessions(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        include_stages: bool,
    ) -> AppResult<Vec<SleepSessionRecord>>;

    /// Hourly step records with `from <= date <= to`.
    async fn hourly_steps(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<HourlyStepRecord>>;

    /// Hourly heart-rate records with `from <= date <= to`.
    async fn hourly_heart_rate(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<HourlyHeartRateRecord>>;

    /// Exercise sessions starting on a day in `from..=to`.
    async fn exercise_sessions(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ExerciseSessionRecord>>;
}

#[async_trait]
impl HealthDataSource for Database {
    async fn sleep_sessions(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        include_stages: bool,
    ) -> AppResult<Vec<SleepSessionRecord>> {
        let (start, end) = day_window(from, to);
        self.sleep_sessions_in_range(start, end, include_stages)
            .await
            .map_err(|e| AppError::database(e.to_string()))
    }

    async fn hourly_steps(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<HourlyStepRecord>> {
        self.hourly_steps_in_range(from, to)
            .await
            .map_err(|e| AppError::database(e.to_string()))
    }

    async fn hourly_heart_rate(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<HourlyHeartRateRecord>> {
        self.hourly_heart_rate_in_range(from, to)
            .await
            .map_err(|e| AppError::database(e.to_string()))
    }

    async fn exercise_sessions(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ExerciseSessionRecord>> {
        let (start, end) = day_window(from, to);
        self.exercise_sessions_in_range(start, end)
            .await
            .map_err(|e| AppError::database(e.to_string()))
    }
}

/// Reads raw records from another VitalGrid instance over its REST API.
pub struct HttpDataSource {
    base_url: String,
}

impl HttpDataSource {
    /// Create a source pointing at `base_url`, e.g. `https://vitalgrid.example.com`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{path}", self.base_url);
        debug!(upstream.url = %url, "fetching upstream records");

        let response = shared_client()
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::external_service("upstream", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "upstream",
                format!("{path} returned status {}", response.status()),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::external_service("upstream", e.to_string()))
    }
}

#[async_trait]
impl HealthDataSource for HttpDataSource {
    async fn sleep_sessions(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        include_stages: bool,
    ) -> AppResult<Vec<SleepSessionRecord>> {
        self.get_json(
            "/api/sleep",
            &[
                ("from", from.to_string()),
                ("to", to.to_string()),
                ("include_stages", include_stages.to_string()),
            ],
        )
        .await
    }

    async fn hourly_steps(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<HourlyStepRecord>> {
        self.get_json(
            "/api/steps",
            &[("from", from.to_string()), ("to", to.to_string())],
        )
        .await
    }

    async fn hourly_heart_rate(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<HourlyHeartRateRecord>> {
        self.get_json(
            "/api/heartrate",
            &[("from", from.to_string()), ("to", to.to_string())],
        )
        .await
    }

    async fn exercise_sessions(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ExerciseSessionRecord>> {
        self.get_json(
            "/api/exercise",
            &[("from", from.to_string()), ("to", to.to_string())],
        )
        .await
    }
}

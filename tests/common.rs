// ABOUTME: Shared helpers for integration tests
// ABOUTME: Builds a router over a temporary SQLite database and decodes JSON bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

//! Shared test utilities for VitalGrid integration tests

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use serde_json::Value;
use std::sync::{Arc, Once};
use tempfile::TempDir;
use tower::ServiceExt;
use vitalgrid::config::environment::ServerConfig;
use vitalgrid::database::Database;
use vitalgrid::resources::ServerResources;
use vitalgrid::routes;

static INIT_LOGGING: Once = Once::new();

/// Initialize test logging once per process
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });
}

/// A router backed by a fresh temporary database
pub struct TestServer {
    pub router: Router,
    // Held so the database file outlives the test
    _data_dir: TempDir,
}

/// Build a server over an empty temporary SQLite database
pub async fn test_server() -> TestServer {
    init_test_logging();

    let data_dir = tempfile::tempdir().expect("create temp dir");
    let database_url = format!("sqlite:{}", data_dir.path().join("test.db").display());

    let database = Database::new(&database_url)
        .await
        .expect("open test database");

    let config = ServerConfig {
        database_url,
        ..ServerConfig::default()
    };

    TestServer {
        router: routes::router(Arc::new(ServerResources::new(database, config))),
        _data_dir: data_dir,
    }
}

impl TestServer {
    /// Issue a GET request
    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Issue a POST request with a JSON body
    pub async fn post_json(&self, uri: &str, body: &Value) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

/// Decode a response body as JSON
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

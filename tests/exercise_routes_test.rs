// ABOUTME: Integration tests for the raw exercise endpoints
// ABOUTME: Covers bulk upload, duplicate skipping, malformed records, and range reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{body_json, test_server};
use serde_json::json;

fn sessions() -> serde_json::Value {
    json!({
        "sessions": [
            {
                "exercise_type": "outdoor_running",
                "exercise_start": "2024-03-05T07:00:00",
                "exercise_end": "2024-03-05T07:45:00",
                "duration_minutes": 45.0
            },
            {
                "exercise_type": "walking",
                "exercise_start": "2024-03-06T18:00:00",
                "exercise_end": "2024-03-06T18:30:00",
                "duration_minutes": 30.0
            }
        ]
    })
}

#[tokio::test]
async fn upload_and_read_back() {
    let server = test_server().await;

    let response = server.post_json("/api/exercise", &sessions()).await;
    assert_eq!(response.status(), 201);
    let summary = body_json(response).await;
    assert_eq!(summary["inserted"], 2);
    assert_eq!(summary["skipped"], 0);

    let response = server
        .get("/api/exercise?from=2024-03-01T00:00:00&to=2024-04-01T00:00:00")
        .await;
    let records = body_json(response).await;
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["exercise_type"], "outdoor_running");
    assert_eq!(records[0]["duration_minutes"], 45.0);
}

#[tokio::test]
async fn reupload_skips_duplicates() {
    let server = test_server().await;

    server.post_json("/api/exercise", &sessions()).await;
    let summary = body_json(server.post_json("/api/exercise", &sessions()).await).await;
    assert_eq!(summary["inserted"], 0);
    assert_eq!(summary["skipped"], 2);
}

#[tokio::test]
async fn malformed_session_is_skipped_not_rejected() {
    let server = test_server().await;

    let body = json!({
        "sessions": [
            {
                "exercise_type": "cycling",
                "exercise_start": "garbage",
                "exercise_end": "2024-03-05T09:00:00",
                "duration_minutes": 60.0
            }
        ]
    });

    let response = server.post_json("/api/exercise", &body).await;
    assert_eq!(response.status(), 201);
    let summary = body_json(response).await;
    assert_eq!(summary["inserted"], 0);
    assert_eq!(summary["skipped"], 1);
}

#[tokio::test]
async fn list_accepts_date_only_range() {
    let server = test_server().await;
    server.post_json("/api/exercise", &sessions()).await;

    // 'to' covers the whole named day, so the evening walk on the 6th
    // is inside from=2024-03-05&to=2024-03-06.
    let response = server.get("/api/exercise?from=2024-03-05&to=2024-03-06").await;
    assert_eq!(response.status(), 200);

    let records = body_json(response).await;
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["exercise_type"], "walking");
}

#[tokio::test]
async fn date_only_range_excludes_later_days() {
    let server = test_server().await;
    server.post_json("/api/exercise", &sessions()).await;

    let response = server.get("/api/exercise?from=2024-03-05&to=2024-03-05").await;
    let records = body_json(response).await;
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["exercise_type"], "outdoor_running");
}

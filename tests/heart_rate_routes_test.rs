// ABOUTME: Integration tests for the raw heart-rate endpoints
// ABOUTME: Covers bulk upload, duplicate skipping, consistency validation, and range reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{body_json, test_server};
use serde_json::json;

#[tokio::test]
async fn upload_and_read_back() {
    let server = test_server().await;

    let body = json!({
        "records": [
            {
                "date": "2024-03-10", "hour": 2,
                "min_bpm": 48, "max_bpm": 62, "avg_bpm": 54, "sample_count": 12
            }
        ]
    });

    let response = server.post_json("/api/heartrate", &body).await;
    assert_eq!(response.status(), 201);
    let summary = body_json(response).await;
    assert_eq!(summary["inserted"], 1);

    let response = server
        .get("/api/heartrate?from=2024-03-01&to=2024-03-31")
        .await;
    let records = body_json(response).await;
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["min_bpm"], 48);
    assert_eq!(records[0]["max_bpm"], 62);
    assert_eq!(records[0]["sample_count"], 12);
}

#[tokio::test]
async fn inconsistent_record_is_skipped() {
    let server = test_server().await;

    let body = json!({
        "records": [
            {
                "date": "2024-03-10", "hour": 3,
                "min_bpm": 70, "max_bpm": 60, "avg_bpm": 65, "sample_count": 5
            },
            {
                "date": "2024-03-10", "hour": 4,
                "min_bpm": 50, "max_bpm": 60, "avg_bpm": 55, "sample_count": 5
            }
        ]
    });

    let summary = body_json(server.post_json("/api/heartrate", &body).await).await;
    assert_eq!(summary["inserted"], 1);
    assert_eq!(summary["skipped"], 1);
}

#[tokio::test]
async fn duplicate_hours_are_skipped() {
    let server = test_server().await;

    let record = json!({
        "date": "2024-03-10", "hour": 2,
        "min_bpm": 48, "max_bpm": 62, "avg_bpm": 54, "sample_count": 12
    });
    let body = json!({ "records": [record] });

    server.post_json("/api/heartrate", &body).await;
    let summary = body_json(server.post_json("/api/heartrate", &body).await).await;
    assert_eq!(summary["inserted"], 0);
    assert_eq!(summary["skipped"], 1);
}

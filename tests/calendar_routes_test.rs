// ABOUTME: Integration tests for the monthly calendar aggregation endpoints
// ABOUTME: Covers the sleep grid, step bars, heart-rate panel, exercise log, and trends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{body_json, test_server, TestServer};
use serde_json::json;

async fn seed_january(server: &TestServer) {
    // One session crossing midnight into Jan 2
    let sleep = json!({
        "sessions": [
            {
                "sleep_start": "2024-01-01T23:30:00",
                "sleep_end": "2024-01-02T01:15:00",
                "stages": [
                    {
                        "stage_type": "light",
                        "stage_start": "2024-01-01T23:30:00",
                        "stage_end": "2024-01-02T00:30:00"
                    },
                    {
                        "stage_type": "deep",
                        "stage_start": "2024-01-02T00:30:00",
                        "stage_end": "2024-01-02T01:15:00"
                    }
                ]
            }
        ]
    });
    assert_eq!(server.post_json("/api/sleep", &sleep).await.status(), 201);

    let steps = json!({
        "records": [
            { "date": "2024-01-10", "hour": 9, "step_count": 4200 },
            { "date": "2024-01-10", "hour": 17, "step_count": 1800 },
            { "date": "2024-01-11", "hour": 8, "step_count": 3000 }
        ]
    });
    assert_eq!(server.post_json("/api/steps", &steps).await.status(), 201);

    let heart_rate = json!({
        "records": [
            {
                "date": "2024-01-05", "hour": 2,
                "min_bpm": 50, "max_bpm": 60, "avg_bpm": 55, "sample_count": 10
            },
            {
                "date": "2024-01-05", "hour": 3,
                "min_bpm": 45, "max_bpm": 65, "avg_bpm": 58, "sample_count": 10
            }
        ]
    });
    assert_eq!(
        server.post_json("/api/heartrate", &heart_rate).await.status(),
        200
    );

    let exercise = json!({
        "sessions": [
            {
                "exercise_type": "outdoor_running",
                "exercise_start": "2024-01-08T07:00:00",
                "exercise_end": "2024-01-08T07:45:00",
                "duration_minutes": 45.0
            }
        ]
    });
    assert_eq!(
        server.post_json("/api/exercise", &exercise).await.status(),
        200
    );
}

#[tokio::test]
async fn sleep_grid_places_midnight_crossing_session() {
    let server = test_server().await;
    seed_january(&server).await;

    let response = server.get("/api/calendar/2024/1/sleep").await;
    assert_eq!(response.status(), 200);

    let body = body_json(response).await;
    assert_eq!(body["year"], 2024);
    assert_eq!(body["month"], 1);
    assert_eq!(body["range"]["query_from"], "2023-12-31");

    let days = body["data"]["days"].as_array().unwrap();
    assert_eq!(days.len(), 31);

    // Jan 1: hour 23 occupied; Jan 2: hours 0 and 1 occupied
    assert_eq!(days[0]["cells"][23]["category"], "light");
    // hour 0 is 30m light + 30m deep: the tie keeps the first stage seen
    assert_eq!(days[1]["cells"][0]["category"], "light");
    assert_eq!(days[1]["cells"][1]["category"], "deep");
    assert!(days[1]["cells"][2].is_null());
}

#[tokio::test]
async fn steps_calendar_returns_daily_totals() {
    let server = test_server().await;
    seed_january(&server).await;

    let body = body_json(server.get("/api/calendar/2024/1/steps").await).await;
    let days = body["data"]["days"].as_array().unwrap();
    assert_eq!(days.len(), 31);
    assert_eq!(days[9]["total"], 6000);
    assert_eq!(days[10]["total"], 3000);
    assert_eq!(days[0]["total"], 0);
    assert_eq!(body["data"]["max_total"], 6000);
}

#[tokio::test]
async fn heart_rate_calendar_returns_daily_stats() {
    let server = test_server().await;
    seed_january(&server).await;

    let body = body_json(server.get("/api/calendar/2024/1/heartrate").await).await;
    let days = body["data"]["days"].as_array().unwrap();
    assert!(days[0]["stats"].is_null());
    assert_eq!(days[4]["stats"]["min_bpm"], 45);
    assert_eq!(days[4]["stats"]["max_bpm"], 65);
}

#[tokio::test]
async fn exercise_log_groups_by_date() {
    let server = test_server().await;
    seed_january(&server).await;

    let body = body_json(server.get("/api/calendar/2024/1/exercise").await).await;
    let days = body["data"]["days"].as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"], "2024-01-08");
    assert_eq!(days[0]["sessions"][0]["exercise_type"], "outdoor_running");
    assert_eq!(days[0]["sessions"][0]["display_type"], "outdoor running");
}

#[tokio::test]
async fn empty_exercise_month_is_the_empty_state() {
    let server = test_server().await;

    let response = server.get("/api/calendar/2024/6/exercise").await;
    assert_eq!(response.status(), 200);

    let body = body_json(response).await;
    assert_eq!(body["data"]["days"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn trends_reports_resting_heart_rate_from_night_hours() {
    let server = test_server().await;
    seed_january(&server).await;

    let body = body_json(server.get("/api/calendar/2024/1/trends").await).await;
    let data = &body["data"];
    // (55 + 58) / 2 rounds to 57
    assert_eq!(data["resting_heart_rate"], 57);
    assert_eq!(data["exercise_sessions"], 1);
    // one 1h45m session
    assert_eq!(data["avg_sleep_hours"], 1.8);
    assert_eq!(data["avg_daily_steps"], 4500);
}

#[tokio::test]
async fn trends_on_empty_month_uses_no_data_sentinels() {
    let server = test_server().await;

    let body = body_json(server.get("/api/calendar/2024/6/trends").await).await;
    let data = &body["data"];
    assert!(data["avg_sleep_hours"].is_null());
    assert!(data["avg_daily_steps"].is_null());
    assert!(data["resting_heart_rate"].is_null());
    assert_eq!(data["exercise_sessions"], 0);
}

#[tokio::test]
async fn month_out_of_range_is_rejected() {
    let server = test_server().await;

    let response = server.get("/api/calendar/2024/13/sleep").await;
    assert_eq!(response.status(), 400);

    let error = body_json(response).await;
    assert_eq!(error["error"]["code"], "VALUE_OUT_OF_RANGE");

    let response = server.get("/api/calendar/2024/0/steps").await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn generation_increases_across_renders() {
    let server = test_server().await;

    let first = body_json(server.get("/api/calendar/2024/1/steps").await).await;
    let second = body_json(server.get("/api/calendar/2024/2/steps").await).await;

    assert!(second["generation"].as_u64() > first["generation"].as_u64());
}

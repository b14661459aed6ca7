// ABOUTME: Exercise session storage keyed on the (start, end) interval
// ABOUTME: Idempotent bulk inserts and half-open range reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! Exercise session storage operations

use super::sleep::format_wire_timestamp;
use super::Database;
use anyhow::Result;
use chrono::NaiveDateTime;
use sqlx::Row;
use vitalgrid_core::{ExerciseSession, ExerciseSessionRecord, InsertSummary};

impl Database {
    /// Insert exercise sessions, skipping any (start, end) already stored.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn insert_exercise_sessions(
        &self,
        sessions: &[ExerciseSession],
    ) -> Result<InsertSummary> {
        let mut summary = InsertSummary::default();

        for session in sessions {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO exercise_sessions \
                 (exercise_type, exercise_start, exercise_end, duration_minutes) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(&session.kind)
            .bind(session.start)
            .bind(session.end)
            .bind(session.duration_minutes)
            .execute(self.pool())
            .await?;

            if result.rows_affected() > 0 {
                summary.inserted += 1;
            } else {
                summary.skipped += 1;
            }
        }

        Ok(summary)
    }

    /// Fetch exercise sessions starting inside `[from, to)`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn exercise_sessions_in_range(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<ExerciseSessionRecord>> {
        let rows = sqlx::query(
            "SELECT exercise_type, exercise_start, exercise_end, duration_minutes \
             FROM exercise_sessions \
             WHERE exercise_start >= ? AND exercise_start < ? \
             ORDER BY exercise_start ASC",
        )
        .bind(from)
        .bind(to)
        .fetch_all(self.pool())
        .await?;

        let mut sessions = Vec::with_capacity(rows.len());

        for row in rows {
            let exercise_type: String = row.try_get("exercise_type")?;
            let start: NaiveDateTime = row.try_get("exercise_start")?;
            let end: NaiveDateTime = row.try_get("exercise_end")?;
            let duration_minutes: f64 = row.try_get("duration_minutes")?;

            sessions.push(ExerciseSessionRecord {
                exercise_type,
                exercise_start: format_wire_timestamp(start),
                exercise_end: format_wire_timestamp(end),
                duration_minutes,
            });
        }

        Ok(sessions)
    }
}

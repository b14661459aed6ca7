// ABOUTME: Sleep session storage with per-session stage rows
// ABOUTME: Idempotent inserts keyed on the (start, end) interval
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! Sleep session storage operations

use super::Database;
use anyhow::Result;
use chrono::NaiveDateTime;
use sqlx::Row;
use vitalgrid_core::{InsertSummary, SleepSession, SleepSessionRecord, SleepStageRecord};

/// Wire timestamp format, ISO-8601 local time without offset
pub(crate) const WIRE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub(crate) fn format_wire_timestamp(ts: NaiveDateTime) -> String {
    ts.format(WIRE_TIMESTAMP_FORMAT).to_string()
}

impl Database {
    /// Insert sleep sessions, skipping any already stored.
    ///
    /// A session that matches an existing (start, end) pair is counted as
    /// skipped and its stages are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn insert_sleep_sessions(&self, sessions: &[SleepSession]) -> Result<InsertSummary> {
        let mut summary = InsertSummary::default();

        for session in sessions {
            let session_id: Option<i64> = sqlx::query_scalar(
                "INSERT OR IGNORE INTO sleep_sessions (sleep_start, sleep_end) \
                 VALUES (?, ?) RETURNING id",
            )
            .bind(session.start)
            .bind(session.end)
            .fetch_optional(self.pool())
            .await?;

            let Some(session_id) = session_id else {
                summary.skipped += 1;
                continue;
            };

            for stage in &session.stages {
                sqlx::query(
                    "INSERT INTO sleep_stages (session_id, stage_type, stage_start, stage_end) \
                     VALUES (?, ?, ?, ?)",
                )
                .bind(session_id)
                .bind(stage.kind.as_str())
                .bind(stage.start)
                .bind(stage.end)
                .execute(self.pool())
                .await?;
            }

            summary.inserted += 1;
        }

        Ok(summary)
    }

    /// Fetch sleep sessions starting inside `[from, to)`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn sleep_sessions_in_range(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        include_stages: bool,
    ) -> Result<Vec<SleepSessionRecord>> {
        let rows = sqlx::query(
            "SELECT id, sleep_start, sleep_end FROM sleep_sessions \
             WHERE sleep_start >= ? AND sleep_start < ? \
             ORDER BY sleep_start ASC",
        )
        .bind(from)
        .bind(to)
        .fetch_all(self.pool())
        .await?;

        let mut sessions = Vec::with_capacity(rows.len());

        for row in rows {
            let id: i64 = row.try_get("id")?;
            let start: NaiveDateTime = row.try_get("sleep_start")?;
            let end: NaiveDateTime = row.try_get("sleep_end")?;

            let stages = if include_stages {
                Some(self.stages_for_session(id).await?)
            } else {
                None
            };

            sessions.push(SleepSessionRecord {
                sleep_start: format_wire_timestamp(start),
                sleep_end: format_wire_timestamp(end),
                stages,
            });
        }

        Ok(sessions)
    }

    async fn stages_for_session(&self, session_id: i64) -> Result<Vec<SleepStageRecord>> {
        let rows = sqlx::query(
            "SELECT stage_type, stage_start, stage_end FROM sleep_stages \
             WHERE session_id = ? ORDER BY stage_start ASC",
        )
        .bind(session_id)
        .fetch_all(self.pool())
        .await?;

        let mut stages = Vec::with_capacity(rows.len());

        for row in rows {
            let stage_type: String = row.try_get("stage_type")?;
            let start: NaiveDateTime = row.try_get("stage_start")?;
            let end: NaiveDateTime = row.try_get("stage_end")?;

            stages.push(SleepStageRecord {
                stage_type,
                stage_start: format_wire_timestamp(start),
                stage_end: format_wire_timestamp(end),
            });
        }

        Ok(stages)
    }
}

// ABOUTME: Hourly step count storage keyed on (date, hour)
// ABOUTME: Idempotent bulk inserts and inclusive date-range reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! Hourly step storage operations

use super::Database;
use anyhow::Result;
use chrono::NaiveDate;
use sqlx::Row;
use vitalgrid_core::{HourlyStepRecord, InsertSummary};

impl Database {
    /// Insert hourly step records, skipping any (date, hour) already stored.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn insert_hourly_steps(
        &self,
        records: &[HourlyStepRecord],
    ) -> Result<InsertSummary> {
        let mut summary = InsertSummary::default();

        for record in records {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO steps_hourly (date, hour, step_count) VALUES (?, ?, ?)",
            )
            .bind(record.date)
            .bind(i64::from(record.hour))
            .bind(i64::from(record.step_count))
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

    /// Fetch hourly step records with `from <= date <= to`, in (date, hour) order.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn hourly_steps_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<HourlyStepRecord>> {
        let rows = sqlx::query(
            "SELECT date, hour, step_count FROM steps_hourly \
             WHERE date >= ? AND date <= ? \
             ORDER BY date ASC, hour ASC",
        )
        .bind(from)
        .bind(to)
        .fetch_all(self.pool())
        .await?;

        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            let date: NaiveDate = row.try_get("date")?;
            let hour: i64 = row.try_get("hour")?;
            let step_count: i64 = row.try_get("step_count")?;

            records.push(HourlyStepRecord {
                date,
                hour: u8::try_from(hour)?,
                step_count: u32::try_from(step_count)?,
            });
        }

        Ok(records)
    }
}

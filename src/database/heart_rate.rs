// ABOUTME: Hourly heart-rate summary storage keyed on (date, hour)
// ABOUTME: Idempotent bulk inserts and inclusive date-range reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! Hourly heart-rate storage operations

use super::Database;
use anyhow::Result;
use chrono::NaiveDate;
use sqlx::Row;
use vitalgrid_core::{HourlyHeartRateRecord, InsertSummary};

impl Database {
    /// Insert hourly heart-rate records, skipping any (date, hour) already stored.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn insert_hourly_heart_rate(
        &self,
        records: &[HourlyHeartRateRecord],
    ) -> Result<InsertSummary> {
        let mut summary = InsertSummary::default();

        for record in records {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO heart_rate_hourly \
                 (date, hour, min_bpm, max_bpm, avg_bpm, sample_count) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(record.date)
            .bind(i64::from(record.hour))
            .bind(i64::from(record.min_bpm))
            .bind(i64::from(record.max_bpm))
            .bind(i64::from(record.avg_bpm))
            .bind(i64::from(record.sample_count))
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

    /// Fetch hourly heart-rate records with `from <= date <= to`, in (date, hour) order.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn hourly_heart_rate_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<HourlyHeartRateRecord>> {
        let rows = sqlx::query(
            "SELECT date, hour, min_bpm, max_bpm, avg_bpm, sample_count FROM heart_rate_hourly \
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
            let min_bpm: i64 = row.try_get("min_bpm")?;
            let max_bpm: i64 = row.try_get("max_bpm")?;
            let avg_bpm: i64 = row.try_get("avg_bpm")?;
            let sample_count: i64 = row.try_get("sample_count")?;

            records.push(HourlyHeartRateRecord {
                date,
                hour: u8::try_from(hour)?,
                min_bpm: u32::try_from(min_bpm)?,
                max_bpm: u32::try_from(max_bpm)?,
                avg_bpm: u32::try_from(avg_bpm)?,
                sample_count: u32::try_from(sample_count)?,
            });
        }

        Ok(records)
    }
}

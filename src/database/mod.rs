// ABOUTME: Database management for health-data storage in SQLite
// ABOUTME: Connection pooling, schema migrations, and per-domain storage modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! # Database Management
//!
//! SQLite-backed storage for mirrored health data. The schema keeps raw
//! records exactly as providers report them: sleep sessions with their
//! stages, hourly step and heart-rate buckets, and exercise sessions.
//! Natural-key UNIQUE constraints make every insert idempotent so the
//! mobile uploader can re-send overlapping windows freely.

pub mod exercise;
pub mod heart_rate;
pub mod sleep;
pub mod steps;

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool};
use tracing::info;

/// Database manager for health-data storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Access the underlying connection pool
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails
    pub async fn migrate(&self) -> Result<()> {
        // WAL keeps the uploader and calendar reads from blocking each other
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&self.pool)
            .await?;

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS sleep_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                sleep_start TEXT NOT NULL,
                sleep_end TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                UNIQUE(sleep_start, sleep_end)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_sleep_sessions_start ON sleep_sessions(sleep_start)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS sleep_stages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id INTEGER NOT NULL,
                stage_type TEXT NOT NULL,
                stage_start TEXT NOT NULL,
                stage_end TEXT NOT NULL,
                FOREIGN KEY (session_id) REFERENCES sleep_sessions (id) ON DELETE CASCADE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_sleep_stages_session ON sleep_stages(session_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS steps_hourly (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                hour INTEGER NOT NULL,
                step_count INTEGER NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                UNIQUE(date, hour)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS heart_rate_hourly (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                hour INTEGER NOT NULL,
                min_bpm INTEGER NOT NULL,
                max_bpm INTEGER NOT NULL,
                avg_bpm INTEGER NOT NULL,
                sample_count INTEGER NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                UNIQUE(date, hour)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercise_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                exercise_type TEXT NOT NULL,
                exercise_start TEXT NOT NULL,
                exercise_end TEXT NOT NULL,
                duration_minutes REAL NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                UNIQUE(exercise_start, exercise_end)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_exercise_sessions_start \
             ON exercise_sessions(exercise_start)",
        )
        .execute(&self.pool)
        .await?;

        info!("Database migrations completed");

        Ok(())
    }
}

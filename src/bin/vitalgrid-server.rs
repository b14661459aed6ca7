// ABOUTME: Main VitalGrid server binary serving the health-data REST API
// ABOUTME: Loads configuration, opens storage, and runs the axum HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! VitalGrid server entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use vitalgrid::config::environment::ServerConfig;
use vitalgrid::database::Database;
use vitalgrid::logging;
use vitalgrid::resources::ServerResources;
use vitalgrid::routes;

#[derive(Parser)]
#[command(
    name = "vitalgrid-server",
    about = "Self-hosted mirror and calendar view for wearable health data",
    version
)]
struct Args {
    /// Port for the HTTP API (overrides VITALGRID_HTTP_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Database URL (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

/// Create the parent directory for a `sqlite:` file URL so first startup
/// does not fail on a missing data directory.
fn ensure_database_directory(database_url: &str) -> Result<()> {
    let Some(path) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    if path.contains(":memory:") {
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating database directory {}", parent.display()))?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env().context("failed to initialize logging")?;

    let mut config = ServerConfig::from_env().context("failed to load configuration")?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    ensure_database_directory(&config.database_url)?;

    let database = Database::new(&config.database_url)
        .await
        .context("failed to open database")?;

    let http_port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, config));
    let router = routes::router(resources);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", http_port))
        .await
        .with_context(|| format!("failed to bind port {http_port}"))?;

    info!(port = http_port, "VitalGrid server listening");

    axum::serve(listener, router)
        .await
        .context("HTTP server terminated")?;

    Ok(())
}

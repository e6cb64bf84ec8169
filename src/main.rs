// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! SEA Catering API Server
//!
//! Serves the meal plan catalog, customer subscriptions, testimonials and
//! the admin dashboard.

use sea_catering::{
    config::{Config, StorageBackend},
    db::{FirestoreDb, MemoryDb, Store},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        storage = ?config.storage,
        production = config.production,
        "Starting SEA Catering API"
    );

    let db: Arc<dyn Store> = match config.storage {
        StorageBackend::Firestore => Arc::new(FirestoreDb::new(&config.gcp_project_id).await?),
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Arc::new(MemoryDb::new())
        }
    };

    let state = Arc::new(AppState::new(config.clone(), db));

    if let Some(admin) = &config.admin_bootstrap {
        state.auth.bootstrap_admin(admin).await?;
    }

    // Build router
    let app = sea_catering::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sea_catering=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Carelogd: personal health record API server.

pub mod auth;
pub mod config;
pub mod directory;
pub mod error;
pub mod records;
pub mod registry;
pub mod state;
pub mod token;
pub mod transport;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::state::AppState;
use crate::transport::build_router;

/// Run the API server until shutdown.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(config));
    let router = build_router(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("carelogd listening on {addr}");
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

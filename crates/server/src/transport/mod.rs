// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP transport for the carelog API.

pub mod auth;
pub mod http_auth;
pub mod http_records;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// `GET /api/v1/health` — liveness probe, no auth.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Build the axum `Router` with all API routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health (no auth)
        .route("/api/v1/health", get(health))
        // Auth (credential- or refresh-token-authenticated in the body)
        .route("/api/v1/auth/register", post(http_auth::register))
        .route("/api/v1/auth/login", post(http_auth::login))
        .route("/api/v1/auth/refresh", post(http_auth::refresh))
        .route("/api/v1/auth/logout", post(http_auth::logout))
        // Account
        .route("/api/v1/account/me", get(http_auth::me))
        // Profiles
        .route(
            "/api/v1/profiles",
            get(http_records::list_profiles).post(http_records::create_profile),
        )
        .route(
            "/api/v1/profiles/{id}",
            get(http_records::get_profile)
                .put(http_records::update_profile)
                .delete(http_records::delete_profile),
        )
        .route("/api/v1/profiles/{id}/settings", put(http_records::update_profile_settings))
        // Vitals
        .route(
            "/api/v1/profiles/{id}/vitals",
            get(http_records::list_vitals).post(http_records::create_vital),
        )
        .route("/api/v1/profiles/{id}/vitals/{vital_id}", delete(http_records::delete_vital))
        // Middleware: request-id runs outermost, then the bearer gate.
        .layer(middleware::from_fn_with_state(state.clone(), auth::auth_layer))
        .layer(middleware::from_fn(auth::request_id_layer))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP handlers for the auth endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;
use crate::transport::auth::{AuthedAccount, RequestId};

/// Request body for `POST /api/v1/auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Request body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /api/v1/auth/refresh` and `/auth/logout`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

fn looks_like_email(email: &str) -> bool {
    email.contains('@') && email.contains('.')
}

fn validate_register(req: &RegisterRequest) -> Result<(), &'static str> {
    if !looks_like_email(&req.email) {
        return Err("email must be a valid email address");
    }
    if req.password.chars().count() < 6 {
        return Err("password must be at least 6 characters");
    }
    if req.name.trim().chars().count() < 2 {
        return Err("name must be at least 2 characters");
    }
    Ok(())
}

/// `POST /api/v1/auth/register` — create an account and a first session.
pub async fn register(
    State(s): State<Arc<AppState>>,
    Extension(rid): Extension<RequestId>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    if let Err(msg) = validate_register(&req) {
        return ApiError::Validation.to_http_response(msg, Some(&rid.0));
    }
    match s.auth.register(&req.email, &req.password, &req.name).await {
        Ok(session) => (StatusCode::CREATED, Json(session)).into_response(),
        Err(e) => e.respond(Some(&rid.0)),
    }
}

/// `POST /api/v1/auth/login` — authenticate and issue a fresh pair.
pub async fn login(
    State(s): State<Arc<AppState>>,
    Extension(rid): Extension<RequestId>,
    Json(req): Json<LoginRequest>,
) -> Response {
    match s.auth.login(&req.email, &req.password).await {
        Ok(session) => Json(session).into_response(),
        Err(e) => e.respond(Some(&rid.0)),
    }
}

/// `POST /api/v1/auth/refresh` — rotate a refresh token.
pub async fn refresh(
    State(s): State<Arc<AppState>>,
    Extension(rid): Extension<RequestId>,
    Json(req): Json<RefreshTokenRequest>,
) -> Response {
    match s.auth.refresh(&req.refresh_token).await {
        Ok(pair) => Json(pair).into_response(),
        Err(e) => e.respond(Some(&rid.0)),
    }
}

/// `POST /api/v1/auth/logout` — revoke a refresh token. Always succeeds.
pub async fn logout(
    State(s): State<Arc<AppState>>,
    Json(req): Json<RefreshTokenRequest>,
) -> Response {
    s.auth.logout(&req.refresh_token).await;
    Json(serde_json::json!({ "message": "Logged out successfully" })).into_response()
}

/// `GET /api/v1/account/me` — resolve the calling account.
pub async fn me(
    State(s): State<Arc<AppState>>,
    Extension(rid): Extension<RequestId>,
    Extension(caller): Extension<AuthedAccount>,
) -> Response {
    match s.auth.get_account_by_id(&caller.0).await {
        Some(account) => Json(account).into_response(),
        None => ApiError::AccountNotFound.respond(Some(&rid.0)),
    }
}

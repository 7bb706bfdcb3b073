// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request-id and bearer-token middleware.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Per-request id, inserted before routing and echoed in `X-Request-ID`
/// and in every error envelope.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// The authenticated caller's account id, inserted by [`auth_layer`].
#[derive(Debug, Clone)]
pub struct AuthedAccount(pub String);

/// Axum middleware that tags every request and response with a request id.
pub async fn request_id_layer(mut req: Request<axum::body::Body>, next: Next) -> Response {
    let id = uuid::Uuid::new_v4().to_string();
    req.extensions_mut().insert(RequestId(id.clone()));

    let mut resp = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        resp.headers_mut().insert("x-request-id", value);
    }
    resp
}

/// Extract the bearer token from HTTP headers.
fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;
    header.strip_prefix("Bearer ").ok_or(ApiError::Unauthorized)
}

/// Axum middleware that enforces bearer access-token authentication.
///
/// Exempt: `/api/v1/health` and the `/api/v1/auth/` endpoints (register,
/// login, refresh, logout authenticate by credentials or refresh token in
/// the body). Everything else is rejected before any handler runs.
pub async fn auth_layer(
    state: State<Arc<AppState>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let path = req.uri().path();
    if path == "/api/v1/health" || path.starts_with("/api/v1/auth/") {
        return next.run(req).await;
    }

    let request_id = req.extensions().get::<RequestId>().map(|r| r.0.clone());
    let token = match bearer_token(req.headers()) {
        Ok(token) => token,
        Err(code) => {
            return code.to_http_response(
                "Missing or invalid authorization header",
                request_id.as_deref(),
            );
        }
    };

    match state.auth.authenticate_access(token) {
        Ok(account_id) => {
            req.extensions_mut().insert(AuthedAccount(account_id));
            next.run(req).await
        }
        Err(code) => {
            code.to_http_response("Invalid or expired token", request_id.as_deref())
        }
    }
}

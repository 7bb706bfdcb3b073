// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for cross-crate spec tests: an in-process server on an
//! ephemeral port, plus token forgery for expiry scenarios.

use std::sync::Arc;

use carelogd::config::ServerConfig;
use carelogd::state::AppState;
use carelogd::token::{TokenClaims, TokenKind};
use carelogd::transport::build_router;

/// Signing secret shared between the spec server and forged tokens.
pub const JWT_SECRET: &str = "spec-secret";

/// A real carelogd instance serving on a random local port.
pub struct SpecServer {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl SpecServer {
    pub async fn start() -> anyhow::Result<Self> {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            jwt_secret: JWT_SECRET.into(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 604_800,
        };
        let state = Arc::new(AppState::new(config));
        let router = build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Ok(Self { base_url: format!("http://{addr}/api/v1"), handle })
    }
}

impl Drop for SpecServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Forge an access token for `account_id` that expired an hour ago. Signed
/// with the spec server's secret, so only the expiry check can reject it.
pub fn expired_access_token(account_id: &str) -> anyhow::Result<String> {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let claims = TokenClaims {
        sub: account_id.to_owned(),
        kind: TokenKind::Access,
        iat: now.saturating_sub(7200),
        exp: now.saturating_sub(3600),
        jti: uuid::Uuid::new_v4().simple().to_string(),
    };
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )?;
    Ok(token)
}

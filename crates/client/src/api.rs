// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for the carelog API.
//!
//! Thin `reqwest` wrapper. Server rejections are surfaced as a typed
//! [`ApiError`] parsed from the error envelope; transport failures are
//! sanitized so no internal detail leaks to callers.

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Account as the server serializes it. Settings stay an opaque blob on the
/// device — the client never interprets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub settings: serde_json::Value,
    #[serde(default)]
    pub created_at: u64,
}

/// An access + refresh token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of register or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub account: Account,
    pub tokens: TokenPair,
}

/// A failed API call: the HTTP status and error code when the server
/// answered, or a sanitized transport failure when it did not.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: Option<u16>,
    pub code: Option<String>,
    pub message: String,
}

impl ApiError {
    /// True for 401-class rejections — the trigger for the bootstrap
    /// refresh-and-retry path.
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    fn network(err: &reqwest::Error) -> Self {
        Self {
            status: err.status().map(|s| s.as_u16()),
            code: Some("NETWORK_ERROR".to_owned()),
            message: "Network error. Please check your connection and try again.".to_owned(),
        }
    }

    fn from_response(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct Envelope {
            error: EnvelopeBody,
        }
        #[derive(Deserialize)]
        struct EnvelopeBody {
            code: String,
            message: String,
        }

        match serde_json::from_str::<Envelope>(body) {
            Ok(env) => Self {
                status: Some(status),
                code: Some(env.error.code),
                message: env.error.message,
            },
            Err(_) => Self {
                status: Some(status),
                code: None,
                message: format!("Request failed with status {status}"),
            },
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, self.status) {
            (Some(code), Some(status)) => write!(f, "{code} ({status}): {}", self.message),
            _ => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Client for the carelog REST API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` includes the API prefix, e.g. `http://127.0.0.1:3000/api/v1`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthSession, ApiError> {
        self.post(
            "/auth/register",
            &serde_json::json!({ "email": email, "password": password, "name": name }),
            None,
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        self.post(
            "/auth/login",
            &serde_json::json!({ "email": email, "password": password }),
            None,
        )
        .await
    }

    /// Exchange a refresh token for a new pair. The old token is dead after
    /// a success.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        self.post("/auth/refresh", &serde_json::json!({ "refreshToken": refresh_token }), None)
            .await
    }

    pub async fn logout(&self, refresh_token: &str) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .post("/auth/logout", &serde_json::json!({ "refreshToken": refresh_token }), None)
            .await?;
        Ok(())
    }

    pub async fn get_me(&self, access_token: &str) -> Result<Account, ApiError> {
        self.get("/account/me", Some(access_token)).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
        bearer: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut req = self.http.post(format!("{}{path}", self.base_url)).json(body);
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }
        Self::execute(req).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut req = self.http.get(format!("{}{path}", self.base_url));
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }
        Self::execute(req).await
    }

    async fn execute<T: DeserializeOwned>(req: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let resp = req.send().await.map_err(|e| ApiError::network(&e))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status.as_u16(), &body));
        }
        resp.json::<T>().await.map_err(|e| ApiError::network(&e))
    }
}

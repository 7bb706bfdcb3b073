// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error codes for the carelog API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiError {
    Validation,
    EmailAlreadyExists,
    InvalidCredentials,
    InvalidToken,
    Unauthorized,
    AccountNotFound,
    ProfileNotFound,
    VitalNotFound,
    Internal,
}

impl ApiError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::EmailAlreadyExists => 409,
            Self::InvalidCredentials => 401,
            Self::InvalidToken => 401,
            Self::Unauthorized => 401,
            Self::AccountNotFound => 404,
            Self::ProfileNotFound => 404,
            Self::VitalNotFound => 404,
            Self::Internal => 500,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::VitalNotFound => "VITAL_NOT_FOUND",
            Self::Internal => "INTERNAL_ERROR",
        }
    }

    /// Default human-readable message for this code. Handlers may override
    /// (e.g. validation failures carry the specific field complaint).
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Validation => "Invalid input",
            Self::EmailAlreadyExists => "Email already registered",
            Self::InvalidCredentials => "Invalid email or password",
            Self::InvalidToken => "Invalid or expired refresh token",
            Self::Unauthorized => "Missing or invalid authorization header",
            Self::AccountNotFound => "Account not found",
            Self::ProfileNotFound => "Profile not found",
            Self::VitalNotFound => "Vital entry not found",
            Self::Internal => "An internal error occurred",
        }
    }

    pub fn to_error_body(
        &self,
        message: impl Into<String>,
        request_id: Option<&str>,
    ) -> ErrorBody {
        ErrorBody {
            code: self.as_str().to_owned(),
            message: message.into(),
            request_id: request_id.map(str::to_owned),
        }
    }

    /// Build the full HTTP error response with the given message.
    pub fn to_http_response(
        &self,
        message: impl Into<String>,
        request_id: Option<&str>,
    ) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse { error: self.to_error_body(message, request_id) };
        (status, Json(body)).into_response()
    }

    /// Build the HTTP error response with this code's default message.
    pub fn respond(&self, request_id: Option<&str>) -> Response {
        self.to_http_response(self.default_message(), request_id)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level error response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error body with machine-readable code and human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(rename = "requestId", default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

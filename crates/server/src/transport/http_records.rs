// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP handlers for the profile and vitals records.
//!
//! Every handler resolves the caller from the bearer middleware and goes
//! through the profile ownership gate; misses are 404s.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use crate::error::ApiError;
use crate::records::{
    CreateProfileInput, CreateVitalInput, ProfileSettingsInput, UpdateProfileInput, VitalsQuery,
};
use crate::state::AppState;
use crate::transport::auth::{AuthedAccount, RequestId};

/// `GET /api/v1/profiles` — list the caller's profiles.
pub async fn list_profiles(
    State(s): State<Arc<AppState>>,
    Extension(caller): Extension<AuthedAccount>,
) -> Response {
    Json(s.profiles.list(&caller.0).await).into_response()
}

/// `POST /api/v1/profiles` — create a profile owned by the caller.
pub async fn create_profile(
    State(s): State<Arc<AppState>>,
    Extension(rid): Extension<RequestId>,
    Extension(caller): Extension<AuthedAccount>,
    Json(input): Json<CreateProfileInput>,
) -> Response {
    if input.full_name.trim().chars().count() < 2 {
        return ApiError::Validation
            .to_http_response("fullName must be at least 2 characters", Some(&rid.0));
    }
    let profile = s.profiles.create(&caller.0, input).await;
    (StatusCode::CREATED, Json(profile)).into_response()
}

/// `GET /api/v1/profiles/{id}`
pub async fn get_profile(
    State(s): State<Arc<AppState>>,
    Extension(rid): Extension<RequestId>,
    Extension(caller): Extension<AuthedAccount>,
    Path(profile_id): Path<String>,
) -> Response {
    match s.profiles.owned(&caller.0, &profile_id).await {
        Ok(profile) => Json(profile).into_response(),
        Err(e) => e.respond(Some(&rid.0)),
    }
}

/// `PUT /api/v1/profiles/{id}`
pub async fn update_profile(
    State(s): State<Arc<AppState>>,
    Extension(rid): Extension<RequestId>,
    Extension(caller): Extension<AuthedAccount>,
    Path(profile_id): Path<String>,
    Json(input): Json<UpdateProfileInput>,
) -> Response {
    match s.profiles.update(&caller.0, &profile_id, input).await {
        Ok(profile) => Json(profile).into_response(),
        Err(e) => e.respond(Some(&rid.0)),
    }
}

/// `PUT /api/v1/profiles/{id}/settings`
pub async fn update_profile_settings(
    State(s): State<Arc<AppState>>,
    Extension(rid): Extension<RequestId>,
    Extension(caller): Extension<AuthedAccount>,
    Path(profile_id): Path<String>,
    Json(input): Json<ProfileSettingsInput>,
) -> Response {
    match s.profiles.update_settings(&caller.0, &profile_id, input).await {
        Ok(profile) => Json(profile).into_response(),
        Err(e) => e.respond(Some(&rid.0)),
    }
}

/// `DELETE /api/v1/profiles/{id}`
pub async fn delete_profile(
    State(s): State<Arc<AppState>>,
    Extension(rid): Extension<RequestId>,
    Extension(caller): Extension<AuthedAccount>,
    Path(profile_id): Path<String>,
) -> Response {
    match s.profiles.delete(&caller.0, &profile_id).await {
        Ok(()) => Json(serde_json::json!({ "deleted": true })).into_response(),
        Err(e) => e.respond(Some(&rid.0)),
    }
}

/// `GET /api/v1/profiles/{id}/vitals`
pub async fn list_vitals(
    State(s): State<Arc<AppState>>,
    Extension(rid): Extension<RequestId>,
    Extension(caller): Extension<AuthedAccount>,
    Path(profile_id): Path<String>,
    Query(query): Query<VitalsQuery>,
) -> Response {
    if let Err(e) = s.profiles.owned(&caller.0, &profile_id).await {
        return e.respond(Some(&rid.0));
    }
    Json(s.vitals.list(&profile_id, &query).await).into_response()
}

/// `POST /api/v1/profiles/{id}/vitals`
pub async fn create_vital(
    State(s): State<Arc<AppState>>,
    Extension(rid): Extension<RequestId>,
    Extension(caller): Extension<AuthedAccount>,
    Path(profile_id): Path<String>,
    Json(input): Json<CreateVitalInput>,
) -> Response {
    if let Err(e) = s.profiles.owned(&caller.0, &profile_id).await {
        return e.respond(Some(&rid.0));
    }
    if input.kind.is_empty() || input.unit.is_empty() {
        return ApiError::Validation.to_http_response("type and unit are required", Some(&rid.0));
    }
    let entry = s.vitals.create(&profile_id, input).await;
    (StatusCode::CREATED, Json(entry)).into_response()
}

/// `DELETE /api/v1/profiles/{id}/vitals/{vitalId}`
pub async fn delete_vital(
    State(s): State<Arc<AppState>>,
    Extension(rid): Extension<RequestId>,
    Extension(caller): Extension<AuthedAccount>,
    Path((profile_id, vital_id)): Path<(String, String)>,
) -> Response {
    if let Err(e) = s.profiles.owned(&caller.0, &profile_id).await {
        return e.respond(Some(&rid.0));
    }
    match s.vitals.delete(&profile_id, &vital_id).await {
        Ok(()) => Json(serde_json::json!({ "deleted": true })).into_response(),
        Err(e) => e.respond(Some(&rid.0)),
    }
}

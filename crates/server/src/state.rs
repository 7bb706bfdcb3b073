// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::auth::AuthService;
use crate::config::ServerConfig;
use crate::records::{ProfileStore, VitalStore};
use crate::token::TokenCodec;

/// Shared server state. Owns every store; nothing lives in module globals,
/// so tests can build as many isolated instances as they like.
pub struct AppState {
    pub config: ServerConfig,
    pub auth: AuthService,
    pub profiles: ProfileStore,
    pub vitals: VitalStore,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let codec = TokenCodec::new(
            &config.jwt_secret,
            config.access_ttl_secs,
            config.refresh_ttl_secs,
        );
        Self {
            config,
            auth: AuthService::new(codec),
            profiles: ProfileStore::new(),
            vitals: VitalStore::new(),
        }
    }
}

/// Return current epoch millis.
pub fn epoch_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

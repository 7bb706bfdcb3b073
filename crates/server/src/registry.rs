// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Refresh token registry: the server-side record of live refresh tokens.
//!
//! A refresh token is only good while its row is here. Rotation and logout
//! remove rows; there is no background expiry sweep — expired tokens are
//! rejected by signature verification and their rows are inert.

use std::collections::HashMap;

use tokio::sync::RwLock;

/// Live refresh tokens, token -> owning account id.
#[derive(Default)]
pub struct RefreshTokenRegistry {
    tokens: RwLock<HashMap<String, String>>,
}

impl RefreshTokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, token: &str, account_id: &str) {
        self.tokens.write().await.insert(token.to_owned(), account_id.to_owned());
    }

    /// Remove a token. Idempotent: revoking an absent token is not an error.
    pub async fn revoke(&self, token: &str) {
        self.tokens.write().await.remove(token);
    }

    pub async fn owner_of(&self, token: &str) -> Option<String> {
        self.tokens.read().await.get(token).cloned()
    }

    /// Atomically retire `old` and register `new` for the same owner.
    ///
    /// The remove and insert happen under a single write guard, so two
    /// concurrent rotations presenting the same `old` token race safely:
    /// exactly one claims the row and wins, the other sees `None`.
    pub async fn rotate(&self, old: &str, new: &str) -> Option<String> {
        let mut tokens = self.tokens.write().await;
        let owner = tokens.remove(old)?;
        tokens.insert(new.to_owned(), owner.clone());
        Some(owner)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

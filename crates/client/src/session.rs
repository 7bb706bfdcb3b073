// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The device's current session: token pair + cached account.
//!
//! An explicit value with an explicit lifecycle — created at app start,
//! torn down on sign-out. Only this type touches the session keys in
//! durable storage.

use crate::api::{Account, TokenPair};
use crate::storage::SecureStorage;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Device session state. Mutated only through its methods; destroyed on
/// logout or an unrecoverable refresh failure.
pub struct SessionClient {
    storage: SecureStorage,
    access_token: Option<String>,
    refresh_token: Option<String>,
    account: Option<Account>,
    is_hydrated: bool,
}

impl SessionClient {
    pub fn new(storage: SecureStorage) -> Self {
        Self {
            storage,
            access_token: None,
            refresh_token: None,
            account: None,
            is_hydrated: false,
        }
    }

    /// Load persisted tokens. Best-effort: a storage failure degrades to
    /// "no session" rather than raising.
    pub fn hydrate(&mut self) {
        self.access_token = self.storage.get(ACCESS_TOKEN_KEY).ok().flatten();
        self.refresh_token = self.storage.get(REFRESH_TOKEN_KEY).ok().flatten();
        self.is_hydrated = true;
    }

    /// Persist a new pair, then publish it to memory.
    ///
    /// Storage is written first so a crash mid-write never leaves memory
    /// ahead of what survives a restart.
    pub fn set_tokens(&mut self, pair: &TokenPair) -> anyhow::Result<()> {
        self.storage.set_many(&[
            (ACCESS_TOKEN_KEY, pair.access_token.as_str()),
            (REFRESH_TOKEN_KEY, pair.refresh_token.as_str()),
        ])?;
        self.access_token = Some(pair.access_token.clone());
        self.refresh_token = Some(pair.refresh_token.clone());
        Ok(())
    }

    pub fn set_account(&mut self, account: Account) {
        self.account = Some(account);
    }

    /// Drop both token keys and the cached account. Safe to call when the
    /// session is already empty; storage trouble does not keep a doomed
    /// session alive in memory.
    pub fn clear_session(&mut self) {
        if let Err(e) = self.storage.delete_many(&[ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY]) {
            tracing::warn!(err = %e, "failed to clear persisted session");
        }
        self.access_token = None;
        self.refresh_token = None;
        self.account = None;
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Both tokens, when the stored session is complete.
    pub fn token_pair(&self) -> Option<TokenPair> {
        match (&self.access_token, &self.refresh_token) {
            (Some(access), Some(refresh)) => Some(TokenPair {
                access_token: access.clone(),
                refresh_token: refresh.clone(),
            }),
            _ => None,
        }
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn is_hydrated(&self) -> bool {
        self.is_hydrated
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

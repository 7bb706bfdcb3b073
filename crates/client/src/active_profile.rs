// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Device-local "active profile" selection.
//!
//! A back-reference into server-side profile data, persisted under its own
//! key, independent of the session. It may point at a profile that no
//! longer exists — consumers must treat it as a hint, not a fact.

use crate::storage::SecureStorage;

pub const ACTIVE_PROFILE_KEY: &str = "active_profile_id";

pub struct ActiveProfileStore {
    storage: SecureStorage,
    active_profile_id: Option<String>,
}

impl ActiveProfileStore {
    pub fn new(storage: SecureStorage) -> Self {
        Self { storage, active_profile_id: None }
    }

    /// Best-effort load; absence or storage failure is just "no selection".
    pub fn hydrate(&mut self) {
        self.active_profile_id = self.storage.get(ACTIVE_PROFILE_KEY).ok().flatten();
    }

    pub fn active_profile_id(&self) -> Option<&str> {
        self.active_profile_id.as_deref()
    }

    pub fn set_active(&mut self, profile_id: Option<&str>) -> anyhow::Result<()> {
        match profile_id {
            Some(id) => self.storage.set(ACTIVE_PROFILE_KEY, id)?,
            None => self.storage.delete(ACTIVE_PROFILE_KEY)?,
        }
        self.active_profile_id = profile_id.map(str::to_owned);
        Ok(())
    }

    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.set_active(None)
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Account directory: identity storage keyed by id and case-insensitive email.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::ApiError;
use crate::state::epoch_ms;

/// A registered account. The login secret is never part of this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub email: String,
    pub name: String,
    pub settings: AccountSettings,
    /// Creation time, epoch milliseconds.
    pub created_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSettings {
    pub language: String,
    pub timezone: String,
    pub notification_preferences: NotificationPreferences,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub appointments: bool,
    pub medications: bool,
    pub reports: bool,
    pub security: bool,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            language: "en".to_owned(),
            timezone: "UTC".to_owned(),
            notification_preferences: NotificationPreferences {
                appointments: true,
                medications: true,
                reports: true,
                security: true,
            },
        }
    }
}

#[derive(Default)]
struct Indexes {
    by_id: HashMap<String, Account>,
    /// Lowercased email -> account id.
    by_email: HashMap<String, String>,
}

/// In-memory identity store. Both indexes live behind one lock so `create`
/// is atomic with respect to the uniqueness check.
#[derive(Default)]
pub struct AccountDirectory {
    inner: RwLock<Indexes>,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account. Fails with `EmailAlreadyExists` when the email is
    /// already taken under case-insensitive comparison.
    pub async fn create(&self, email: &str, name: &str) -> Result<Account, ApiError> {
        let key = email.to_lowercase();
        let mut inner = self.inner.write().await;
        if inner.by_email.contains_key(&key) {
            return Err(ApiError::EmailAlreadyExists);
        }

        let account = Account {
            id: format!("acc_{}", uuid::Uuid::new_v4().simple()),
            email: email.to_owned(),
            name: name.to_owned(),
            settings: AccountSettings::default(),
            created_at: epoch_ms(),
        };
        inner.by_email.insert(key, account.id.clone());
        inner.by_id.insert(account.id.clone(), account.clone());
        Ok(account)
    }

    pub async fn find_by_email(&self, email: &str) -> Option<Account> {
        let inner = self.inner.read().await;
        let id = inner.by_email.get(&email.to_lowercase())?;
        inner.by_id.get(id).cloned()
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Account> {
        self.inner.read().await.by_id.get(id).cloned()
    }
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;

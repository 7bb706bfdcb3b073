// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record stores: person profiles and their vitals.
//!
//! Uniform in-memory CRUD behind the authorization gate. Ownership misses
//! are reported as not-found, never as forbidden, so a non-owner learns
//! nothing about whether a record exists.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::ApiError;
use crate::state::epoch_ms;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub relation: String,
    pub phone: String,
}

/// A person a caregiver account keeps records for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonProfile {
    pub id: String,
    pub account_id: String,
    pub full_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub relation_to_account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    pub allergies: Vec<String>,
    pub chronic_conditions: Vec<String>,
    pub emergency_contacts: Vec<EmergencyContact>,
    pub emergency_access_enabled: bool,
    pub doctor_sharing_enabled: bool,
    /// Epoch milliseconds.
    pub last_updated_at: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileInput {
    pub full_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub relation_to_account: String,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub emergency_contacts: Vec<EmergencyContact>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub relation_to_account: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub allergies: Option<Vec<String>>,
    #[serde(default)]
    pub chronic_conditions: Option<Vec<String>>,
    #[serde(default)]
    pub emergency_contacts: Option<Vec<EmergencyContact>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettingsInput {
    pub emergency_access_enabled: bool,
    pub doctor_sharing_enabled: bool,
}

/// In-memory profile table keyed by profile id.
#[derive(Default)]
pub struct ProfileStore {
    inner: RwLock<HashMap<String, PersonProfile>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self, account_id: &str) -> Vec<PersonProfile> {
        let inner = self.inner.read().await;
        let mut profiles: Vec<PersonProfile> =
            inner.values().filter(|p| p.account_id == account_id).cloned().collect();
        profiles.sort_by(|a, b| a.id.cmp(&b.id));
        profiles
    }

    pub async fn create(&self, account_id: &str, input: CreateProfileInput) -> PersonProfile {
        let profile = PersonProfile {
            id: format!("prof_{}", uuid::Uuid::new_v4().simple()),
            account_id: account_id.to_owned(),
            full_name: input.full_name,
            date_of_birth: input.date_of_birth,
            gender: input.gender,
            relation_to_account: input.relation_to_account,
            blood_type: input.blood_type,
            height_cm: input.height_cm,
            weight_kg: input.weight_kg,
            allergies: Vec::new(),
            chronic_conditions: Vec::new(),
            emergency_contacts: input.emergency_contacts,
            emergency_access_enabled: false,
            doctor_sharing_enabled: false,
            last_updated_at: epoch_ms(),
        };
        self.inner.write().await.insert(profile.id.clone(), profile.clone());
        profile
    }

    /// The ownership gate: resolve a profile the caller is allowed to see.
    /// Absent and foreign-owned both come back `ProfileNotFound`.
    pub async fn owned(&self, account_id: &str, profile_id: &str) -> Result<PersonProfile, ApiError> {
        self.inner
            .read()
            .await
            .get(profile_id)
            .filter(|p| p.account_id == account_id)
            .cloned()
            .ok_or(ApiError::ProfileNotFound)
    }

    pub async fn update(
        &self,
        account_id: &str,
        profile_id: &str,
        input: UpdateProfileInput,
    ) -> Result<PersonProfile, ApiError> {
        let mut inner = self.inner.write().await;
        let profile = inner
            .get_mut(profile_id)
            .filter(|p| p.account_id == account_id)
            .ok_or(ApiError::ProfileNotFound)?;

        if let Some(v) = input.full_name {
            profile.full_name = v;
        }
        if let Some(v) = input.date_of_birth {
            profile.date_of_birth = v;
        }
        if let Some(v) = input.gender {
            profile.gender = v;
        }
        if let Some(v) = input.relation_to_account {
            profile.relation_to_account = v;
        }
        if let Some(v) = input.blood_type {
            profile.blood_type = Some(v);
        }
        if let Some(v) = input.height_cm {
            profile.height_cm = Some(v);
        }
        if let Some(v) = input.weight_kg {
            profile.weight_kg = Some(v);
        }
        if let Some(v) = input.allergies {
            profile.allergies = v;
        }
        if let Some(v) = input.chronic_conditions {
            profile.chronic_conditions = v;
        }
        if let Some(v) = input.emergency_contacts {
            profile.emergency_contacts = v;
        }
        profile.last_updated_at = epoch_ms();
        Ok(profile.clone())
    }

    pub async fn update_settings(
        &self,
        account_id: &str,
        profile_id: &str,
        input: ProfileSettingsInput,
    ) -> Result<PersonProfile, ApiError> {
        let mut inner = self.inner.write().await;
        let profile = inner
            .get_mut(profile_id)
            .filter(|p| p.account_id == account_id)
            .ok_or(ApiError::ProfileNotFound)?;

        profile.emergency_access_enabled = input.emergency_access_enabled;
        profile.doctor_sharing_enabled = input.doctor_sharing_enabled;
        profile.last_updated_at = epoch_ms();
        Ok(profile.clone())
    }

    pub async fn delete(&self, account_id: &str, profile_id: &str) -> Result<(), ApiError> {
        let mut inner = self.inner.write().await;
        match inner.get(profile_id) {
            Some(p) if p.account_id == account_id => {
                inner.remove(profile_id);
                Ok(())
            }
            _ => Err(ApiError::ProfileNotFound),
        }
    }
}

/// A single vital measurement. `value` is either a number or a structured
/// reading such as `{ "systolic": 120, "diastolic": 80 }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalEntry {
    pub id: String,
    pub profile_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: serde_json::Value,
    pub unit: String,
    /// Epoch milliseconds.
    pub recorded_at: u64,
    /// Epoch milliseconds.
    pub created_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVitalInput {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: serde_json::Value,
    pub unit: String,
    pub recorded_at: u64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query parameters for listing vitals.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VitalsQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub from: Option<u64>,
    pub to: Option<u64>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VitalsPage {
    pub items: Vec<VitalEntry>,
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
}

/// In-memory vitals table, profile id -> entries.
#[derive(Default)]
pub struct VitalStore {
    inner: RwLock<HashMap<String, Vec<VitalEntry>>>,
}

impl VitalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, profile_id: &str, input: CreateVitalInput) -> VitalEntry {
        let entry = VitalEntry {
            id: format!("vit_{}", uuid::Uuid::new_v4().simple()),
            profile_id: profile_id.to_owned(),
            kind: input.kind,
            value: input.value,
            unit: input.unit,
            recorded_at: input.recorded_at,
            created_at: epoch_ms(),
            notes: input.notes,
        };
        self.inner.write().await.entry(profile_id.to_owned()).or_default().push(entry.clone());
        entry
    }

    /// List entries newest-first, filtered by type and recorded-at range,
    /// paginated.
    pub async fn list(&self, profile_id: &str, query: &VitalsQuery) -> VitalsPage {
        let inner = self.inner.read().await;
        let mut items: Vec<VitalEntry> = inner
            .get(profile_id)
            .map(|v| v.as_slice())
            .unwrap_or_default()
            .iter()
            .filter(|e| query.kind.as_deref().is_none_or(|k| e.kind == k))
            .filter(|e| query.from.is_none_or(|from| e.recorded_at >= from))
            .filter(|e| query.to.is_none_or(|to| e.recorded_at <= to))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

        let total = items.len();
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(20).clamp(1, 100);
        let items = items.into_iter().skip((page - 1) * limit).take(limit).collect();
        VitalsPage { items, meta: PageMeta { page, limit, total } }
    }

    pub async fn delete(&self, profile_id: &str, vital_id: &str) -> Result<(), ApiError> {
        let mut inner = self.inner.write().await;
        let entries = inner.get_mut(profile_id).ok_or(ApiError::VitalNotFound)?;
        let before = entries.len();
        entries.retain(|e| e.id != vital_id);
        if entries.len() == before {
            return Err(ApiError::VitalNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;

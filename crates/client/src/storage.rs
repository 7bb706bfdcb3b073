// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable device storage: a JSON key-value file with atomic writes.

use std::collections::HashMap;
use std::path::PathBuf;

/// Resolve the state directory for device data.
///
/// Checks `CARELOG_STATE_DIR`, then `$XDG_STATE_HOME/carelog`,
/// then `$HOME/.local/state/carelog`.
pub fn state_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CARELOG_STATE_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join("carelog");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local/state/carelog");
    }
    PathBuf::from(".carelog")
}

/// File-backed key-value store for the device's secure state.
///
/// One JSON object per file. Every mutation rewrites the whole file via
/// tmp + rename, so readers never observe a torn write.
#[derive(Debug, Clone)]
pub struct SecureStorage {
    path: PathBuf,
}

impl SecureStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the default store under [`state_dir`].
    pub fn open_default() -> Self {
        Self::new(state_dir().join("session.json"))
    }

    pub fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    pub fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.set_many(&[(key, value)])
    }

    /// Write several keys in one atomic file update.
    pub fn set_many(&self, entries: &[(&str, &str)]) -> anyhow::Result<()> {
        let mut map = self.read_all().unwrap_or_default();
        for (key, value) in entries {
            map.insert((*key).to_owned(), (*value).to_owned());
        }
        self.write_all(&map)
    }

    pub fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.delete_many(&[key])
    }

    /// Remove several keys in one atomic file update. Absent keys are fine.
    pub fn delete_many(&self, keys: &[&str]) -> anyhow::Result<()> {
        let mut map = self.read_all().unwrap_or_default();
        for key in keys {
            map.remove(*key);
        }
        self.write_all(&map)
    }

    fn read_all(&self) -> anyhow::Result<HashMap<String, String>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save the full map atomically (write tmp + rename).
    ///
    /// Uses a unique temp filename (PID + counter) to avoid corruption when
    /// concurrent saves race on the same `.tmp` file.
    fn write_all(&self, map: &HashMap<String, String>) -> anyhow::Result<()> {
        use std::sync::atomic::{AtomicU32, Ordering};
        static COUNTER: AtomicU32 = AtomicU32::new(0);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(map)?;
        let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_name = format!(
            "{}.{}.{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy(),
            std::process::id(),
            seq,
        );
        let tmp_path = self.path.with_file_name(tmp_name);
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;

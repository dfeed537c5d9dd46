//! Snapshots of configuration state and their portable encoding.
//!
//! Responsibilities:
//! - Capture the store into a `Snapshot` (full closed set or set-only view).
//! - Encode a snapshot as JSON and decode it back, rejecting unknown keys.
//! - Read and atomically write snapshot files.
//!
//! Does NOT handle:
//! - Applying a snapshot to the store or scoping that application (see `config`).
//!
//! Invariants:
//! - Decoding accepts only recognized keys in their own section and values their slot decodes.
//! - Encoding is deterministic: keys are sorted, absent values are `null`.
//! - `decode(encode(s)) == s` for every captured snapshot.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, FormatError};
use crate::registry::Slot;
use crate::store::Store;

/// Which part of the state `Config::state` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateQuery {
    /// Leave out settings that have no environment variable.
    pub env_only: bool,
    /// Report only keys that are currently set.
    pub if_set: bool,
}

impl StateQuery {
    /// Every recognized key, set or not.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn env_only(mut self) -> Self {
        self.env_only = true;
        self
    }

    pub fn if_set(mut self) -> Self {
        self.if_set = true;
        self
    }
}

/// Point-in-time capture of configuration state.
///
/// `environment` is keyed by environment variable name, `direct` by setter name.
/// A `None` value means the key is absent and its built-in default applies.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    #[serde(default)]
    environment: BTreeMap<String, Option<String>>,
    #[serde(default)]
    direct: BTreeMap<String, Option<String>>,
}

/// A key whose value differs between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotChange {
    pub key: String,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl Snapshot {
    pub fn capture(store: &Store, query: StateQuery) -> Self {
        let mut snapshot = Snapshot::default();
        for slot in Slot::ALL {
            if query.env_only && !slot.is_env() {
                continue;
            }
            let value = store.read(*slot);
            if query.if_set && value.is_none() {
                continue;
            }
            snapshot.section_mut(*slot).insert(slot.key().to_string(), value);
        }
        snapshot
    }

    fn section_mut(&mut self, slot: Slot) -> &mut BTreeMap<String, Option<String>> {
        if slot.is_env() {
            &mut self.environment
        } else {
            &mut self.direct
        }
    }

    /// Value recorded for `key`; `None` when the key is missing or recorded as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.environment
            .get(key)
            .or_else(|| self.direct.get(key))
            .and_then(|value| value.as_deref())
    }

    /// Whether `key` is part of the snapshot, set or not.
    pub fn contains_key(&self, key: &str) -> bool {
        self.environment.contains_key(key) || self.direct.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.environment.len() + self.direct.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Environment entries first, then direct entries, each sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.environment
            .iter()
            .chain(self.direct.iter())
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    /// The value every recognized slot takes when this snapshot is loaded.
    ///
    /// Slots the snapshot does not mention map to `None`.
    pub(crate) fn slot_values(&self) -> impl Iterator<Item = (Slot, Option<String>)> + '_ {
        Slot::ALL.iter().map(|slot| {
            let section = if slot.is_env() {
                &self.environment
            } else {
                &self.direct
            };
            (*slot, section.get(slot.key()).cloned().flatten())
        })
    }

    /// Keys whose values differ between `self` (before) and `other` (after).
    pub fn diff(&self, other: &Snapshot) -> Vec<SnapshotChange> {
        let mut keys: Vec<&str> = self.iter().chain(other.iter()).map(|(key, _)| key).collect();
        keys.sort_unstable();
        keys.dedup();
        keys.into_iter()
            .filter_map(|key| {
                let before = self.get(key);
                let after = other.get(key);
                (before != after).then(|| SnapshotChange {
                    key: key.to_string(),
                    before: before.map(str::to_string),
                    after: after.map(str::to_string),
                })
            })
            .collect()
    }

    pub fn encode(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Encode)
    }

    pub fn decode(payload: &str) -> Result<Snapshot, ConfigError> {
        let snapshot: Snapshot = serde_json::from_str(payload)
            .map_err(|source| FormatError::InvalidString { source })?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let sections = [(&self.environment, true), (&self.direct, false)];
        for (section, env) in sections {
            for (key, value) in section {
                let slot = Slot::from_key(key)
                    .filter(|slot| slot.is_env() == env)
                    .ok_or_else(|| FormatError::UnknownKey(key.clone()))?;
                if let Some(raw) = value {
                    slot.decode(raw)?;
                }
            }
        }
        Ok(())
    }

    /// Read and decode a snapshot file.
    ///
    /// Any failure to read or parse the file is reported as `FormatError::InvalidFile`
    /// with the I/O or JSON error as its source;
    /// unknown keys and invalid values keep their specific errors.
    pub fn read_file(path: &Path) -> Result<Snapshot, ConfigError> {
        let invalid_file = |source: Box<dyn std::error::Error + Send + Sync>| {
            FormatError::InvalidFile {
                path: path.to_path_buf(),
                source,
            }
        };
        let content = std::fs::read_to_string(path).map_err(|e| invalid_file(e.into()))?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|e| invalid_file(e.into()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Encode and write the snapshot, replacing `path` atomically.
    pub fn write_file(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.encode()?;
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, path)?;

        tracing::debug!(path = %path.display(), keys = self.len(), "Config saved atomically");
        Ok(())
    }
}

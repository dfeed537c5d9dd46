//! Environment backends for the store.
//!
//! Responsibilities:
//! - Define the `EnvBackend` trait (get/set/unset/enumerate).
//! - Provide the in-memory backend used by every shipped store.
//! - Read recognized variables from the real process environment for seeding.
//!
//! Does NOT handle:
//! - Writing to the real process environment. The store never does that.
//!
//! Invariants:
//! - Empty or whitespace-only process variables are treated as unset.
//! - Values read from the process environment are trimmed and stored canonically.

use std::collections::BTreeMap;
use std::fmt;

use crate::registry::Slot;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Mutable key/value state behind a `Store`.
///
/// Implementations are always accessed under the store's lock, so they need no
/// synchronization of their own.
pub trait EnvBackend: Send + fmt::Debug {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn unset(&mut self, key: &str);
    /// Every key currently present, recognized or not.
    fn present_keys(&self) -> Vec<String>;
}

/// In-memory backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a backend holding every recognized variable currently set in the process environment.
    ///
    /// Values are stored in their canonical encoding (`markdown` becomes `MARKDOWN`,
    /// `+07` becomes `7`). Values that do not decode for their key are skipped with a
    /// warning rather than failing startup.
    pub fn from_process_env() -> Self {
        let mut vars = BTreeMap::new();
        for slot in Slot::ALL.iter().filter(|slot| slot.is_env()) {
            let Some(raw) = env_var_or_none(slot.key()) else {
                continue;
            };
            match slot.decode(&raw).and_then(|value| slot.encode(&value)) {
                Ok(Some(canonical)) => {
                    vars.insert(slot.key().to_string(), canonical);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(key = %slot, error = %e, "Ignoring invalid environment value");
                }
            }
        }
        tracing::debug!(count = vars.len(), "Seeded configuration from process environment");
        Self { vars }
    }
}

impl EnvBackend for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.vars.insert(key.to_string(), value);
    }

    fn unset(&mut self, key: &str) {
        self.vars.remove(key);
    }

    fn present_keys(&self) -> Vec<String> {
        self.vars.keys().cloned().collect()
    }
}

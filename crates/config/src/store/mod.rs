//! Process-wide configuration store.
//!
//! Responsibilities:
//! - Hold the current value of every recognized key (environment-backed and direct).
//! - Expose the get/set/unset/keys contract renderers read from at render time.
//! - Serialize scopes across threads with a re-entrant scope lock.
//!
//! Does NOT handle:
//! - Validation (see `registry`); the store stores strings it is given.
//! - Capturing or restoring pre-images (see `scope`).
//!
//! Invariants:
//! - Mutations are visible to every holder of the store immediately.
//! - `Store::global()` is seeded once from the real process environment and never
//!   writes back to it.
//! - A thread holding the scope lock may write freely; writers on other threads wait
//!   until every scope on the holding thread has exited.

mod env;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::{Mutex, ReentrantMutex, ReentrantMutexGuard};

pub use env::{EnvBackend, MemoryEnv, env_var_or_none};

use crate::registry::Slot;

struct StoreState {
    env: Box<dyn EnvBackend>,
    direct: BTreeMap<&'static str, String>,
}

/// Shared configuration state.
pub struct Store {
    state: Mutex<StoreState>,
    scope_lock: ReentrantMutex<()>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Store")
            .field("env", &state.env)
            .field("direct", &state.direct)
            .finish()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// An empty store; every key reads as its built-in default.
    pub fn new() -> Self {
        Self::with_backend(MemoryEnv::new())
    }

    pub fn with_backend(backend: impl EnvBackend + 'static) -> Self {
        Self {
            state: Mutex::new(StoreState {
                env: Box::new(backend),
                direct: BTreeMap::new(),
            }),
            scope_lock: ReentrantMutex::new(()),
        }
    }

    /// A store seeded with the recognized variables of the current process environment.
    pub fn from_process_env() -> Self {
        Self::with_backend(MemoryEnv::from_process_env())
    }

    /// The process-wide store, created and seeded on first use.
    pub fn global() -> Arc<Store> {
        static GLOBAL: OnceLock<Arc<Store>> = OnceLock::new();
        GLOBAL
            .get_or_init(|| Arc::new(Store::from_process_env()))
            .clone()
    }

    /// Current value of an environment key.
    pub fn get(&self, key: &str) -> Option<String> {
        self.state.lock().env.get(key)
    }

    pub fn set(&self, key: &str, value: impl Into<String>) {
        let _scope = self.scope_lock.lock();
        self.state.lock().env.set(key, value.into());
    }

    pub fn unset(&self, key: &str) {
        let _scope = self.scope_lock.lock();
        self.state.lock().env.unset(key);
    }

    /// Recognized environment keys currently present.
    pub fn keys(&self) -> BTreeSet<String> {
        self.state
            .lock()
            .env
            .present_keys()
            .into_iter()
            .filter(|key| Slot::from_key(key).is_some_and(Slot::is_env))
            .collect()
    }

    /// Current value of a slot, environment-backed or direct.
    pub fn read(&self, slot: Slot) -> Option<String> {
        let state = self.state.lock();
        if slot.is_env() {
            state.env.get(slot.key())
        } else {
            state.direct.get(slot.key()).cloned()
        }
    }

    /// Set or remove a slot. `None` removes the key.
    pub fn write(&self, slot: Slot, value: Option<String>) {
        let _scope = self.scope_lock.lock();
        let mut state = self.state.lock();
        tracing::trace!(key = %slot, value = ?value, "Writing config key");
        match (slot.is_env(), value) {
            (true, Some(value)) => state.env.set(slot.key(), value),
            (true, None) => state.env.unset(slot.key()),
            (false, Some(value)) => {
                state.direct.insert(slot.key(), value);
            }
            (false, None) => {
                state.direct.remove(slot.key());
            }
        }
    }

    /// Remove every recognized key, environment-backed and direct.
    pub fn clear(&self) {
        let _scope = self.scope_lock.lock();
        let mut state = self.state.lock();
        for slot in Slot::ALL.iter().filter(|slot| slot.is_env()) {
            state.env.unset(slot.key());
        }
        state.direct.clear();
        tracing::debug!("Restored all config keys to defaults");
    }

    /// Hold the scope lock; re-entrant on the owning thread.
    pub(crate) fn lock_scope(&self) -> ReentrantMutexGuard<'_, ()> {
        self.scope_lock.lock()
    }
}

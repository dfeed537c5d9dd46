//! Scoped activation of configuration.
//!
//! Responsibilities:
//! - Capture the pre-image of every key a scope is about to touch.
//! - Restore exactly those pre-images when the scope ends, however it ends.
//! - Provide the guard (`Scope`) and wrapped-call (`Decorated`) adapters.
//!
//! Does NOT handle:
//! - Validating values (done before a scope is entered, see `registry`).
//!
//! Invariants:
//! - A frame records the first pre-image seen for each key; later writes in the same
//!   scope never overwrite it.
//! - Restoration runs in `Drop`, so it happens on normal exit, `?` propagation, and
//!   panic unwinding alike.
//! - Scopes on one thread must end in LIFO order. Lexically nested guards satisfy this.

use parking_lot::ReentrantMutexGuard;

use crate::config::{Config, Setters};
use crate::error::ConfigError;
use crate::registry::{ConfigOption, OptionValue, Slot};
use crate::snapshot::{Snapshot, StateQuery};
use crate::store::Store;

/// Pre-images captured on scope entry.
#[derive(Debug, Default)]
struct ScopeFrame {
    saved: Vec<(Slot, Option<String>)>,
}

impl ScopeFrame {
    fn capture(&mut self, store: &Store, slot: Slot) {
        if !self.saved.iter().any(|(saved, _)| *saved == slot) {
            self.saved.push((slot, store.read(slot)));
        }
    }

    fn restore(self, store: &Store) {
        for (slot, value) in self.saved.into_iter().rev() {
            store.write(slot, value);
        }
    }
}

/// An active configuration scope.
///
/// Created by [`Config::scope`] or the scoped load methods. While the guard lives,
/// other threads cannot write to the store; dropping it puts every touched key back.
/// Setters called on the guard apply immediately and are reverted with the rest.
///
/// The guard holds the store's scope lock until it is dropped. A scoped body that
/// starts another thread, has it write configuration to the same store, and then
/// joins it will deadlock. Do such writes on the scoping thread.
#[must_use = "the scope ends as soon as the guard is dropped"]
pub struct Scope<'a> {
    store: &'a Store,
    frame: ScopeFrame,
    _lock: ReentrantMutexGuard<'a, ()>,
}

impl<'a> Scope<'a> {
    pub(crate) fn enter(
        store: &'a Store,
        restore_defaults: bool,
        writes: impl IntoIterator<Item = (Slot, Option<String>)>,
    ) -> Self {
        let lock = store.lock_scope();
        let writes: Vec<_> = writes.into_iter().collect();

        let mut frame = ScopeFrame::default();
        if restore_defaults {
            for slot in Slot::ALL {
                frame.capture(store, *slot);
            }
        }
        for (slot, _) in &writes {
            frame.capture(store, *slot);
        }

        if restore_defaults {
            store.clear();
        }
        for (slot, value) in writes {
            store.write(slot, value);
        }

        tracing::debug!(
            captured = frame.saved.len(),
            restore_defaults,
            "Entered config scope"
        );

        Self {
            store,
            frame,
            _lock: lock,
        }
    }

    pub fn store(&self) -> &Store {
        self.store
    }

    pub fn state(&self, query: StateQuery) -> Snapshot {
        Snapshot::capture(self.store, query)
    }

    fn write(&mut self, slot: Slot, value: Option<String>) {
        self.frame.capture(self.store, slot);
        self.store.write(slot, value);
    }
}

impl Setters for Scope<'_> {
    fn set_option_value(
        &mut self,
        option: ConfigOption,
        value: OptionValue,
    ) -> Result<&mut Self, ConfigError> {
        let (slot, raw) = option.encode(&value)?;
        self.write(slot, raw);
        Ok(self)
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        let frame = std::mem::take(&mut self.frame);
        let restored = frame.saved.len();
        frame.restore(self.store);
        tracing::debug!(restored, "Exited config scope");
    }
}

/// A function that runs inside its own scope on every call.
///
/// Built by [`Config::wrap`]. The wrapped config's pending options are read-only, so
/// repeated calls observe identical settings and leave nothing behind.
///
/// The wrapped function takes a single argument. Pass `()` for a function with no
/// arguments and a tuple for several:
///
/// ```
/// # use polars_config::Config;
/// let cfg = Config::new().with_option("verbose", true).unwrap();
/// let ping = cfg.wrap(|()| "pong");
/// let add = cfg.wrap(|(a, b): (i32, i32)| a + b);
/// assert_eq!(ping.call(()), "pong");
/// assert_eq!(add.call((2, 3)), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Decorated<F> {
    config: Config,
    func: F,
}

impl<F> Decorated<F> {
    pub(crate) fn new(config: Config, func: F) -> Self {
        Self { config, func }
    }

    pub fn call<A, R>(&self, args: A) -> R
    where
        F: Fn(A) -> R,
    {
        let _scope = self.config.scope();
        (self.func)(args)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    fn write(store: &Store, slot: Slot, value: &str) {
        store.write(slot, Some(value.to_string()));
    }

    #[test]
    fn test_frame_keeps_first_pre_image() {
        let store = Store::new();
        write(&store, Slot::Verbose, "0");
        {
            let mut scope = Scope::enter(&store, false, [(Slot::Verbose, Some("1".to_string()))]);
            scope.set_verbose(Some(false)).unwrap();
            scope.set_verbose(None).unwrap();
            assert_eq!(store.get(POLARS_VERBOSE), None);
        }
        assert_eq!(store.get(POLARS_VERBOSE).as_deref(), Some("0"));
    }

    #[test]
    fn test_absent_keys_are_removed_again() {
        let store = Store::new();
        {
            let _scope = Scope::enter(&store, false, [(Slot::FmtMaxCols, Some("3".to_string()))]);
            assert_eq!(store.get(POLARS_FMT_MAX_COLS).as_deref(), Some("3"));
        }
        assert_eq!(store.get(POLARS_FMT_MAX_COLS), None);
    }

    #[test]
    fn test_restore_defaults_on_enter_clears_then_restores_everything() {
        let store = Store::new();
        write(&store, Slot::Verbose, "1");
        write(&store, Slot::FloatPrecision, "4");
        {
            let _scope = Scope::enter(&store, true, []);
            assert!(store.keys().is_empty());
            assert_eq!(store.read(Slot::FloatPrecision), None);
        }
        assert_eq!(store.get(POLARS_VERBOSE).as_deref(), Some("1"));
        assert_eq!(store.read(Slot::FloatPrecision).as_deref(), Some("4"));
    }

    #[test]
    fn test_nested_scopes_restore_in_lifo_order() {
        let store = Store::new();
        write(&store, Slot::TableFormatting, "ASCII_MARKDOWN");
        {
            let _outer = Scope::enter(
                &store,
                false,
                [(Slot::TableFormatting, Some("NOTHING".to_string()))],
            );
            {
                let _inner = Scope::enter(
                    &store,
                    false,
                    [
                        (Slot::TableFormatting, Some("MARKDOWN".to_string())),
                        (Slot::Verbose, Some("1".to_string())),
                    ],
                );
                assert_eq!(store.get(POLARS_FMT_TABLE_FORMATTING).as_deref(), Some("MARKDOWN"));
            }
            assert_eq!(store.get(POLARS_FMT_TABLE_FORMATTING).as_deref(), Some("NOTHING"));
            assert_eq!(store.get(POLARS_VERBOSE), None);
        }
        assert_eq!(
            store.get(POLARS_FMT_TABLE_FORMATTING).as_deref(),
            Some("ASCII_MARKDOWN")
        );
    }

    #[test]
    fn test_scope_restores_after_panic() {
        let store = Store::new();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _scope = Scope::enter(&store, false, [(Slot::Verbose, Some("1".to_string()))]);
            panic!("body failed");
        }));
        assert!(result.is_err());
        assert_eq!(store.get(POLARS_VERBOSE), None);
    }

    #[test]
    fn test_setter_error_leaves_scope_usable() {
        let store = Store::new();
        let mut scope = Scope::enter(&store, false, []);
        assert!(scope.set_streaming_chunk_size(Some(0)).is_err());
        scope.set_streaming_chunk_size(Some(8)).unwrap();
        assert_eq!(store.get(POLARS_STREAMING_CHUNK_SIZE).as_deref(), Some("8"));
        drop(scope);
        assert_eq!(store.get(POLARS_STREAMING_CHUNK_SIZE), None);
    }

    #[test]
    fn test_other_thread_writes_wait_for_scope_to_end() {
        use std::sync::mpsc;
        use std::time::Duration;

        let store = Store::new();
        let (done_tx, done_rx) = mpsc::channel();
        std::thread::scope(|threads| {
            let scope = Scope::enter(&store, false, [(Slot::Verbose, Some("1".to_string()))]);
            threads.spawn(|| {
                store.write(Slot::FmtMaxRows, Some("4".to_string()));
                done_tx.send(()).unwrap();
            });

            assert!(done_rx.recv_timeout(Duration::from_millis(100)).is_err());
            assert_eq!(store.get(POLARS_FMT_MAX_ROWS), None);
            drop(scope);
            done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        });

        assert_eq!(store.get(POLARS_VERBOSE), None);
        assert_eq!(store.get(POLARS_FMT_MAX_ROWS).as_deref(), Some("4"));
    }
}

//! The `Config` object.
//!
//! Responsibilities:
//! - Collect and validate a set of pending options.
//! - Activate them through a scope (`scope`, `wrap`, `run`) or permanently (`apply`).
//! - Inspect, save, load, and reset the state of the store it is bound to.
//!
//! Does NOT handle:
//! - Pre-image capture and restoration (see `scope`).
//! - The snapshot wire format (see `snapshot`).
//!
//! Invariants:
//! - Every pending option has been validated when it is recorded, so entering a
//!   scope cannot fail.
//! - Pending options are never modified by entering or leaving a scope.
//! - Two configs are equal when their pending options and apply mode are equal;
//!   the order options were supplied in does not matter.

mod setters;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

pub use setters::Setters;

use crate::error::ConfigError;
use crate::registry::{ConfigOption, OptionValue, Slot};
use crate::scope::{Decorated, Scope};
use crate::snapshot::{Snapshot, SnapshotChange, StateQuery};
use crate::store::Store;

/// When fluent setters on a `Config` take effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyMode {
    /// Setters write straight through to the store.
    #[default]
    Immediate,
    /// Setters only record the value; it is applied when a scope is entered.
    OnEnter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    value: OptionValue,
    raw: Option<String>,
}

/// A set of options that can be activated for a bounded region of execution.
///
/// ```ignore
/// let cfg = Config::new().with_option("tbl_rows", 2)?;
/// {
///     let _scope = cfg.scope();
///     // POLARS_FMT_MAX_ROWS is "2" here
/// }
/// // and back to whatever it was before here
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pending: BTreeMap<ConfigOption, Pending>,
    mode: ApplyMode,
    restore_defaults_on_enter: bool,
    store: Arc<Store>,
}

impl PartialEq for Config {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode && self.pending == other.pending
    }
}

impl Eq for Config {}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// An empty config bound to the process-wide store.
    pub fn new() -> Self {
        Self::with_store(Store::global())
    }

    pub fn with_store(store: Arc<Store>) -> Self {
        Self {
            pending: BTreeMap::new(),
            mode: ApplyMode::default(),
            restore_defaults_on_enter: false,
            store,
        }
    }

    /// Build a config from `(name, value)` pairs, validating each one.
    ///
    /// The first unknown name or out-of-domain value aborts construction.
    pub fn from_options<I, K, V>(options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<OptionValue>,
    {
        options
            .into_iter()
            .try_fold(Self::new(), |config, (name, value)| {
                config.with_option(name.as_ref(), value)
            })
    }

    /// Record one pending option.
    ///
    /// Options recorded this way are applied when a scope is entered (or on `apply`),
    /// whatever the apply mode.
    pub fn with_option(
        mut self,
        name: &str,
        value: impl Into<OptionValue>,
    ) -> Result<Self, ConfigError> {
        let option = ConfigOption::from_name(name)?;
        self.record(option, value.into())?;
        Ok(self)
    }

    /// Defer fluent setters until a scope is entered.
    pub fn apply_on_context_enter(mut self, on_enter: bool) -> Self {
        self.mode = if on_enter {
            ApplyMode::OnEnter
        } else {
            ApplyMode::Immediate
        };
        self
    }

    /// Clear every recognized key before applying pending options on scope entry.
    pub fn restore_defaults_on_enter(mut self, restore: bool) -> Self {
        self.restore_defaults_on_enter = restore;
        self
    }

    /// Bind the same pending options to another store.
    pub fn bind(mut self, store: Arc<Store>) -> Self {
        self.store = store;
        self
    }

    pub fn mode(&self) -> ApplyMode {
        self.mode
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Pending options with their canonical values, in option order.
    pub fn pending(&self) -> impl Iterator<Item = (ConfigOption, &OptionValue)> {
        self.pending
            .iter()
            .map(|(option, pending)| (*option, &pending.value))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn record(&mut self, option: ConfigOption, value: OptionValue) -> Result<(), ConfigError> {
        let value = option.normalize(value)?;
        let (_, raw) = option.encode(&value)?;
        self.pending.insert(option, Pending { value, raw });
        Ok(())
    }

    fn writes(&self) -> impl Iterator<Item = (Slot, Option<String>)> + '_ {
        self.pending
            .iter()
            .map(|(option, pending)| (option.slot(), pending.raw.clone()))
    }

    /// Enter a scope with this config's options applied.
    ///
    /// Everything the scope touches is restored when the returned guard is dropped.
    pub fn scope(&self) -> Scope<'_> {
        Scope::enter(&self.store, self.restore_defaults_on_enter, self.writes())
    }

    /// Run `f` inside a scope of this config.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        let _scope = self.scope();
        f()
    }

    /// Wrap `func` so that every call runs inside its own scope of this config.
    pub fn wrap<F>(&self, func: F) -> Decorated<F> {
        Decorated::new(self.clone(), func)
    }

    /// Apply pending options permanently.
    pub fn apply(&self) {
        let _lock = self.store.lock_scope();
        if self.restore_defaults_on_enter {
            self.store.clear();
        }
        for (slot, raw) in self.writes() {
            self.store.write(slot, raw);
        }
        tracing::debug!(options = self.pending.len(), "Applied config permanently");
    }

    /// Current state of the store.
    pub fn state(&self, query: StateQuery) -> Snapshot {
        Snapshot::capture(&self.store, query)
    }

    /// Changes to the store since `since` was captured.
    pub fn diff(&self, since: &Snapshot) -> Vec<SnapshotChange> {
        since.diff(&self.state(StateQuery::all()))
    }

    /// Serialize the full current state.
    pub fn save(&self) -> Result<String, ConfigError> {
        self.state(StateQuery::all()).encode()
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        self.state(StateQuery::all()).write_file(path.as_ref())
    }

    /// Replace the store's state with a saved one, permanently.
    pub fn load(&self, payload: &str) -> Result<(), ConfigError> {
        let snapshot = Snapshot::decode(payload)?;
        self.replace_state(&snapshot);
        Ok(())
    }

    /// Replace the store's state with a saved one until the returned scope is dropped.
    pub fn load_scoped(&self, payload: &str) -> Result<Scope<'_>, ConfigError> {
        let snapshot = Snapshot::decode(payload)?;
        Ok(Scope::enter(&self.store, false, snapshot.slot_values()))
    }

    pub fn load_from_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let snapshot = Snapshot::read_file(path.as_ref())?;
        self.replace_state(&snapshot);
        Ok(())
    }

    pub fn load_from_file_scoped(&self, path: impl AsRef<Path>) -> Result<Scope<'_>, ConfigError> {
        let snapshot = Snapshot::read_file(path.as_ref())?;
        Ok(Scope::enter(&self.store, false, snapshot.slot_values()))
    }

    /// Remove every recognized key so all options fall back to built-in defaults.
    pub fn restore_defaults(&self) {
        self.store.clear();
    }

    fn replace_state(&self, snapshot: &Snapshot) {
        let _lock = self.store.lock_scope();
        for (slot, raw) in snapshot.slot_values() {
            self.store.write(slot, raw);
        }
        tracing::debug!(keys = snapshot.len(), "Loaded config state");
    }
}

impl Setters for Config {
    fn set_option_value(
        &mut self,
        option: ConfigOption,
        value: OptionValue,
    ) -> Result<&mut Self, ConfigError> {
        match self.mode {
            ApplyMode::OnEnter => self.record(option, value)?,
            ApplyMode::Immediate => {
                let (slot, raw) = option.encode(&value)?;
                self.store.write(slot, raw);
            }
        }
        Ok(self)
    }
}

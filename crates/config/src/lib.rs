//! Scoped configuration management for Polars.
//!
//! This crate holds the process-wide option store renderers and the query engine
//! read from, and the `Config` object used to change it for a bounded region of
//! execution, save it, and load it back.

pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod registry;
pub mod scope;
pub mod snapshot;
pub mod store;

pub use config::{ApplyMode, Config, Setters};
pub use display::{
    EngineSettings, Limit, NumberSettings, TableSettings, Truncation, issue_unstable_warning,
};
pub use error::{ConfigError, FormatError};
pub use registry::{
    CellAlignment, ConfigOption, EngineAffinity, FloatFormat, OptionValue, Slot, TableFormat,
};
pub use scope::{Decorated, Scope};
pub use snapshot::{Snapshot, SnapshotChange, StateQuery};
pub use store::{EnvBackend, MemoryEnv, Store, env_var_or_none};

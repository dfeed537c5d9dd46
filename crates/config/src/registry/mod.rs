//! Option registry: the static table of recognized settings.
//!
//! Responsibilities:
//! - Map public option names to the keys they write (`option.rs`).
//! - Define the closed set of recognized keys with their encoders/decoders (`slot.rs`).
//! - Define the enumerated value vocabularies (`vocab.rs`).
//!
//! Does NOT handle:
//! - Any mutable state. Everything here is immutable and defined at compile time.

mod option;
mod slot;
mod value;
mod vocab;

pub use option::ConfigOption;
pub use slot::{Backing, Slot, ValueKind, Vocabulary};
pub use value::OptionValue;
pub use vocab::{CellAlignment, EngineAffinity, FloatFormat, TableFormat};

//! The closed set of recognized keys.
//!
//! Responsibilities:
//! - Enumerate every key the manager owns, environment-backed or not.
//! - Encode a validated `OptionValue` into the stored string form and decode it back.
//!
//! Does NOT handle:
//! - Public option names and their expansion into key writes (see `option.rs`).
//! - Reading or writing the store (see `store`).
//!
//! Invariants:
//! - Every key is unique and `Slot::ALL` lists each slot exactly once.
//! - Booleans are stored as `"1"` / `"0"`.
//! - Enumerated values are stored in their canonical spelling.
//! - For every slot and every accepted value `v`, `decode(encode(v)) == v`.

use std::fmt;

use super::value::OptionValue;
use super::vocab::{CellAlignment, EngineAffinity, FloatFormat, TableFormat};
use crate::constants::*;
use crate::error::ConfigError;

/// Where a slot's value lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    /// A recognized environment variable.
    Env,
    /// Engine state that has no environment variable; addressed by setter name.
    Direct,
}

/// Closed vocabulary a `ValueKind::Choice` slot draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    TableFormat,
    Alignment,
    EngineAffinity,
    FloatFormat,
}

impl Vocabulary {
    fn canonical(self, raw: &str) -> Result<&'static str, ConfigError> {
        Ok(match self {
            Vocabulary::TableFormat => raw.parse::<TableFormat>()?.as_str(),
            Vocabulary::Alignment => raw.parse::<CellAlignment>()?.as_str(),
            Vocabulary::EngineAffinity => raw.parse::<EngineAffinity>()?.as_str(),
            Vocabulary::FloatFormat => raw.parse::<FloatFormat>()?.as_str(),
        })
    }
}

/// Value domain of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Flag,
    /// Integer, optionally bounded below. `what` names the domain in errors.
    Int {
        min: Option<i64>,
        what: &'static str,
    },
    Choice(Vocabulary),
    /// Exactly one character.
    Char { what: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    AutoStructify,
    EngineAffinity,
    FmtMaxCols,
    FmtMaxRows,
    FmtStrLen,
    TableCellAlignment,
    TableCellListLen,
    TableCellNumericAlignment,
    TableDataframeShapeBelow,
    TableFormatting,
    TableHideColumnDataTypes,
    TableHideColumnNames,
    TableHideColumnSeparator,
    TableHideDataframeShapeInformation,
    TableInlineColumnDataType,
    TableRoundedCorners,
    StreamingChunkSize,
    TableWidth,
    Verbose,
    WarnUnstable,
    FloatFormat,
    FloatPrecision,
    ThousandsSeparator,
    DecimalSeparator,
    TrimDecimalZeros,
}

impl Slot {
    /// Every slot, environment-backed ones first, each group sorted by key.
    pub const ALL: &'static [Slot] = &[
        Slot::AutoStructify,
        Slot::EngineAffinity,
        Slot::FmtMaxCols,
        Slot::FmtMaxRows,
        Slot::FmtStrLen,
        Slot::TableCellAlignment,
        Slot::TableCellListLen,
        Slot::TableCellNumericAlignment,
        Slot::TableDataframeShapeBelow,
        Slot::TableFormatting,
        Slot::TableHideColumnDataTypes,
        Slot::TableHideColumnNames,
        Slot::TableHideColumnSeparator,
        Slot::TableHideDataframeShapeInformation,
        Slot::TableInlineColumnDataType,
        Slot::TableRoundedCorners,
        Slot::StreamingChunkSize,
        Slot::TableWidth,
        Slot::Verbose,
        Slot::WarnUnstable,
        Slot::DecimalSeparator,
        Slot::FloatPrecision,
        Slot::FloatFormat,
        Slot::ThousandsSeparator,
        Slot::TrimDecimalZeros,
    ];

    /// Environment variable name, or setter name for direct slots.
    pub fn key(self) -> &'static str {
        match self {
            Slot::AutoStructify => POLARS_AUTO_STRUCTIFY,
            Slot::EngineAffinity => POLARS_ENGINE_AFFINITY,
            Slot::FmtMaxCols => POLARS_FMT_MAX_COLS,
            Slot::FmtMaxRows => POLARS_FMT_MAX_ROWS,
            Slot::FmtStrLen => POLARS_FMT_STR_LEN,
            Slot::TableCellAlignment => POLARS_FMT_TABLE_CELL_ALIGNMENT,
            Slot::TableCellListLen => POLARS_FMT_TABLE_CELL_LIST_LEN,
            Slot::TableCellNumericAlignment => POLARS_FMT_TABLE_CELL_NUMERIC_ALIGNMENT,
            Slot::TableDataframeShapeBelow => POLARS_FMT_TABLE_DATAFRAME_SHAPE_BELOW,
            Slot::TableFormatting => POLARS_FMT_TABLE_FORMATTING,
            Slot::TableHideColumnDataTypes => POLARS_FMT_TABLE_HIDE_COLUMN_DATA_TYPES,
            Slot::TableHideColumnNames => POLARS_FMT_TABLE_HIDE_COLUMN_NAMES,
            Slot::TableHideColumnSeparator => POLARS_FMT_TABLE_HIDE_COLUMN_SEPARATOR,
            Slot::TableHideDataframeShapeInformation => {
                POLARS_FMT_TABLE_HIDE_DATAFRAME_SHAPE_INFORMATION
            }
            Slot::TableInlineColumnDataType => POLARS_FMT_TABLE_INLINE_COLUMN_DATA_TYPE,
            Slot::TableRoundedCorners => POLARS_FMT_TABLE_ROUNDED_CORNERS,
            Slot::StreamingChunkSize => POLARS_STREAMING_CHUNK_SIZE,
            Slot::TableWidth => POLARS_TABLE_WIDTH,
            Slot::Verbose => POLARS_VERBOSE,
            Slot::WarnUnstable => POLARS_WARN_UNSTABLE,
            Slot::FloatFormat => "set_fmt_float",
            Slot::FloatPrecision => "set_float_precision",
            Slot::ThousandsSeparator => "set_thousands_separator",
            Slot::DecimalSeparator => "set_decimal_separator",
            Slot::TrimDecimalZeros => "set_trim_decimal_zeros",
        }
    }

    pub fn backing(self) -> Backing {
        match self {
            Slot::FloatFormat
            | Slot::FloatPrecision
            | Slot::ThousandsSeparator
            | Slot::DecimalSeparator
            | Slot::TrimDecimalZeros => Backing::Direct,
            _ => Backing::Env,
        }
    }

    pub fn is_env(self) -> bool {
        self.backing() == Backing::Env
    }

    pub fn kind(self) -> ValueKind {
        match self {
            Slot::AutoStructify
            | Slot::TableDataframeShapeBelow
            | Slot::TableHideColumnDataTypes
            | Slot::TableHideColumnNames
            | Slot::TableHideColumnSeparator
            | Slot::TableHideDataframeShapeInformation
            | Slot::TableInlineColumnDataType
            | Slot::TableRoundedCorners
            | Slot::Verbose
            | Slot::WarnUnstable
            | Slot::TrimDecimalZeros => ValueKind::Flag,
            Slot::FmtMaxCols | Slot::FmtMaxRows | Slot::TableCellListLen | Slot::TableWidth => {
                ValueKind::Int {
                    min: None,
                    what: "integer",
                }
            }
            Slot::FmtStrLen => ValueKind::Int {
                min: Some(1),
                what: "length",
            },
            Slot::StreamingChunkSize => ValueKind::Int {
                min: Some(1),
                what: "number of rows per chunk",
            },
            Slot::FloatPrecision => ValueKind::Int {
                min: Some(0),
                what: "float precision",
            },
            Slot::EngineAffinity => ValueKind::Choice(Vocabulary::EngineAffinity),
            Slot::TableFormatting => ValueKind::Choice(Vocabulary::TableFormat),
            Slot::TableCellAlignment | Slot::TableCellNumericAlignment => {
                ValueKind::Choice(Vocabulary::Alignment)
            }
            Slot::FloatFormat => ValueKind::Choice(Vocabulary::FloatFormat),
            Slot::ThousandsSeparator => ValueKind::Char {
                what: "thousands separator",
            },
            Slot::DecimalSeparator => ValueKind::Char {
                what: "decimal separator",
            },
        }
    }

    /// Look up a slot by environment variable name or direct setter name.
    pub fn from_key(key: &str) -> Option<Slot> {
        Slot::ALL.iter().copied().find(|slot| slot.key() == key)
    }

    /// Recognized environment variable names, sorted.
    pub fn env_keys() -> impl Iterator<Item = &'static str> {
        Slot::ALL
            .iter()
            .filter(|slot| slot.is_env())
            .map(|slot| slot.key())
    }

    /// Validate `value` and produce the stored string, or `None` to remove the key.
    pub fn encode(self, value: &OptionValue) -> Result<Option<String>, ConfigError> {
        if value.is_unset() {
            return Ok(None);
        }
        let encoded = match (self.kind(), value) {
            (ValueKind::Flag, OptionValue::Bool(flag)) => {
                (if *flag { "1" } else { "0" }).to_string()
            }
            (ValueKind::Int { min, what }, OptionValue::Int(n)) => {
                check_min(*n, min, what)?;
                n.to_string()
            }
            (ValueKind::Choice(vocab), OptionValue::Str(raw)) => vocab.canonical(raw)?.to_string(),
            (ValueKind::Char { what }, OptionValue::Str(raw)) => {
                check_single_char(raw, what)?;
                raw.clone()
            }
            (kind, other) => return Err(ConfigError::invalid(kind.describe(), other)),
        };
        Ok(Some(encoded))
    }

    /// Decode a stored string back into a typed value, rejecting anything `encode` would not produce.
    pub fn decode(self, raw: &str) -> Result<OptionValue, ConfigError> {
        match self.kind() {
            ValueKind::Flag => match raw {
                "1" => Ok(OptionValue::Bool(true)),
                "0" => Ok(OptionValue::Bool(false)),
                _ => Err(ConfigError::invalid("flag", raw)),
            },
            ValueKind::Int { min, what } => {
                let n: i64 = raw.parse().map_err(|_| ConfigError::invalid(what, raw))?;
                check_min(n, min, what)?;
                Ok(OptionValue::Int(n))
            }
            ValueKind::Choice(vocab) => Ok(OptionValue::Str(vocab.canonical(raw)?.to_string())),
            ValueKind::Char { what } => {
                check_single_char(raw, what)?;
                Ok(OptionValue::Str(raw.to_string()))
            }
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl ValueKind {
    fn describe(self) -> &'static str {
        match self {
            ValueKind::Flag => "flag",
            ValueKind::Int { what, .. } => what,
            ValueKind::Choice(Vocabulary::TableFormat) => "table format name",
            ValueKind::Choice(Vocabulary::Alignment) => "alignment",
            ValueKind::Choice(Vocabulary::EngineAffinity) => "engine",
            ValueKind::Choice(Vocabulary::FloatFormat) => "float format",
            ValueKind::Char { what } => what,
        }
    }
}

fn check_min(n: i64, min: Option<i64>, what: &'static str) -> Result<(), ConfigError> {
    match min {
        Some(min) if n < min => Err(ConfigError::invalid(what, n)),
        _ => Ok(()),
    }
}

fn check_single_char(raw: &str, what: &'static str) -> Result<(), ConfigError> {
    if raw.chars().count() == 1 {
        Ok(())
    } else {
        Err(ConfigError::invalid(what, raw))
    }
}

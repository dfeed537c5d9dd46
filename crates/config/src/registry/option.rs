//! Public option names and how they expand into slot writes.
//!
//! Responsibilities:
//! - Resolve an option name (or its setter name) to a `ConfigOption`.
//! - Validate and canonicalize a raw `OptionValue` for an option.
//! - Expand a validated value into the list of `(Slot, Option<String>)` writes it causes.
//!
//! Does NOT handle:
//! - Applying writes to the store (see `config` and `scope`).
//!
//! Invariants:
//! - Unknown names are always an error, never silently ignored.
//! - Validation happens here, eagerly, before any state is touched.

use std::fmt;

use super::slot::Slot;
use super::value::OptionValue;
use super::vocab::TableFormat;
use crate::error::ConfigError;

/// A named, user-facing configuration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigOption {
    TblCols,
    TblRows,
    TblFormatting,
    TblRoundedCorners,
    AsciiTables,
    TblCellAlignment,
    TblCellNumericAlignment,
    TblHideColumnNames,
    TblHideColumnDataTypes,
    TblHideDtypeSeparator,
    TblHideDataframeShape,
    TblDataframeShapeBelow,
    TblColumnDataTypeInline,
    TblWidthChars,
    FmtStrLengths,
    FmtTableCellListLen,
    Verbose,
    StreamingChunkSize,
    EngineAffinity,
    WarnUnstable,
    AutoStructify,
    FmtFloat,
    FloatPrecision,
    ThousandsSeparator,
    DecimalSeparator,
    TrimDecimalZeros,
}

/// What an option writes when applied.
#[derive(Debug, Clone, Copy)]
enum Target {
    /// Exactly one slot, with the slot's own encoding.
    Slot(Slot),
    /// `true` selects the condensed ASCII preset, `false` the condensed UTF8 preset.
    AsciiTables,
    /// `true` means `","`, `false` removes the separator, a string must be one character.
    ThousandsSeparator,
}

struct OptionInfo {
    name: &'static str,
    setter: &'static str,
    target: Target,
}

impl ConfigOption {
    pub const ALL: &'static [ConfigOption] = &[
        ConfigOption::TblCols,
        ConfigOption::TblRows,
        ConfigOption::TblFormatting,
        ConfigOption::TblRoundedCorners,
        ConfigOption::AsciiTables,
        ConfigOption::TblCellAlignment,
        ConfigOption::TblCellNumericAlignment,
        ConfigOption::TblHideColumnNames,
        ConfigOption::TblHideColumnDataTypes,
        ConfigOption::TblHideDtypeSeparator,
        ConfigOption::TblHideDataframeShape,
        ConfigOption::TblDataframeShapeBelow,
        ConfigOption::TblColumnDataTypeInline,
        ConfigOption::TblWidthChars,
        ConfigOption::FmtStrLengths,
        ConfigOption::FmtTableCellListLen,
        ConfigOption::Verbose,
        ConfigOption::StreamingChunkSize,
        ConfigOption::EngineAffinity,
        ConfigOption::WarnUnstable,
        ConfigOption::AutoStructify,
        ConfigOption::FmtFloat,
        ConfigOption::FloatPrecision,
        ConfigOption::ThousandsSeparator,
        ConfigOption::DecimalSeparator,
        ConfigOption::TrimDecimalZeros,
    ];

    fn info(self) -> OptionInfo {
        let (name, setter, target) = match self {
            ConfigOption::TblCols => ("tbl_cols", "set_tbl_cols", Target::Slot(Slot::FmtMaxCols)),
            ConfigOption::TblRows => ("tbl_rows", "set_tbl_rows", Target::Slot(Slot::FmtMaxRows)),
            ConfigOption::TblFormatting => (
                "tbl_formatting",
                "set_tbl_formatting",
                Target::Slot(Slot::TableFormatting),
            ),
            ConfigOption::TblRoundedCorners => (
                "tbl_rounded_corners",
                "set_tbl_rounded_corners",
                Target::Slot(Slot::TableRoundedCorners),
            ),
            ConfigOption::AsciiTables => ("ascii_tables", "set_ascii_tables", Target::AsciiTables),
            ConfigOption::TblCellAlignment => (
                "tbl_cell_alignment",
                "set_tbl_cell_alignment",
                Target::Slot(Slot::TableCellAlignment),
            ),
            ConfigOption::TblCellNumericAlignment => (
                "tbl_cell_numeric_alignment",
                "set_tbl_cell_numeric_alignment",
                Target::Slot(Slot::TableCellNumericAlignment),
            ),
            ConfigOption::TblHideColumnNames => (
                "tbl_hide_column_names",
                "set_tbl_hide_column_names",
                Target::Slot(Slot::TableHideColumnNames),
            ),
            ConfigOption::TblHideColumnDataTypes => (
                "tbl_hide_column_data_types",
                "set_tbl_hide_column_data_types",
                Target::Slot(Slot::TableHideColumnDataTypes),
            ),
            ConfigOption::TblHideDtypeSeparator => (
                "tbl_hide_dtype_separator",
                "set_tbl_hide_dtype_separator",
                Target::Slot(Slot::TableHideColumnSeparator),
            ),
            ConfigOption::TblHideDataframeShape => (
                "tbl_hide_dataframe_shape",
                "set_tbl_hide_dataframe_shape",
                Target::Slot(Slot::TableHideDataframeShapeInformation),
            ),
            ConfigOption::TblDataframeShapeBelow => (
                "tbl_dataframe_shape_below",
                "set_tbl_dataframe_shape_below",
                Target::Slot(Slot::TableDataframeShapeBelow),
            ),
            ConfigOption::TblColumnDataTypeInline => (
                "tbl_column_data_type_inline",
                "set_tbl_column_data_type_inline",
                Target::Slot(Slot::TableInlineColumnDataType),
            ),
            ConfigOption::TblWidthChars => (
                "tbl_width_chars",
                "set_tbl_width_chars",
                Target::Slot(Slot::TableWidth),
            ),
            ConfigOption::FmtStrLengths => (
                "fmt_str_lengths",
                "set_fmt_str_lengths",
                Target::Slot(Slot::FmtStrLen),
            ),
            ConfigOption::FmtTableCellListLen => (
                "fmt_table_cell_list_len",
                "set_fmt_table_cell_list_len",
                Target::Slot(Slot::TableCellListLen),
            ),
            ConfigOption::Verbose => ("verbose", "set_verbose", Target::Slot(Slot::Verbose)),
            ConfigOption::StreamingChunkSize => (
                "streaming_chunk_size",
                "set_streaming_chunk_size",
                Target::Slot(Slot::StreamingChunkSize),
            ),
            ConfigOption::EngineAffinity => (
                "engine_affinity",
                "set_engine_affinity",
                Target::Slot(Slot::EngineAffinity),
            ),
            // The toggle has no `set_` prefix.
            ConfigOption::WarnUnstable => (
                "warn_unstable",
                "warn_unstable",
                Target::Slot(Slot::WarnUnstable),
            ),
            ConfigOption::AutoStructify => (
                "auto_structify",
                "set_auto_structify",
                Target::Slot(Slot::AutoStructify),
            ),
            ConfigOption::FmtFloat => ("fmt_float", "set_fmt_float", Target::Slot(Slot::FloatFormat)),
            ConfigOption::FloatPrecision => (
                "float_precision",
                "set_float_precision",
                Target::Slot(Slot::FloatPrecision),
            ),
            ConfigOption::ThousandsSeparator => (
                "thousands_separator",
                "set_thousands_separator",
                Target::ThousandsSeparator,
            ),
            ConfigOption::DecimalSeparator => (
                "decimal_separator",
                "set_decimal_separator",
                Target::Slot(Slot::DecimalSeparator),
            ),
            ConfigOption::TrimDecimalZeros => (
                "trim_decimal_zeros",
                "set_trim_decimal_zeros",
                Target::Slot(Slot::TrimDecimalZeros),
            ),
        };
        OptionInfo {
            name,
            setter,
            target,
        }
    }

    /// Keyword name, e.g. `tbl_cols`.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Setter name, e.g. `set_tbl_cols`.
    pub fn setter_name(self) -> &'static str {
        self.info().setter
    }

    /// Resolve an option by keyword name or setter name.
    pub fn from_name(name: &str) -> Result<ConfigOption, ConfigError> {
        ConfigOption::ALL
            .iter()
            .copied()
            .find(|option| {
                let info = option.info();
                info.name == name || info.setter == name
            })
            .ok_or_else(|| ConfigError::UnknownOption(name.to_string()))
    }

    /// The slot this option writes.
    pub fn slot(self) -> Slot {
        match self.info().target {
            Target::Slot(slot) => slot,
            Target::AsciiTables => Slot::TableFormatting,
            Target::ThousandsSeparator => Slot::ThousandsSeparator,
        }
    }

    /// Validate `value` and return its canonical form.
    ///
    /// Canonical values compare equal when they would produce identical writes,
    /// which is what `Config` equality relies on.
    pub fn normalize(self, value: OptionValue) -> Result<OptionValue, ConfigError> {
        match self.info().target {
            Target::Slot(slot) => match slot.encode(&value)? {
                Some(raw) => slot.decode(&raw),
                None => Ok(OptionValue::Unset),
            },
            Target::ThousandsSeparator => {
                let (_, raw) = self.encode(&value)?;
                Ok(raw.map_or(OptionValue::Unset, OptionValue::Str))
            }
            Target::AsciiTables => {
                self.encode(&value)?;
                Ok(value)
            }
        }
    }

    /// Validate `value` and produce the write it causes (`None` removes the key).
    pub fn encode(self, value: &OptionValue) -> Result<(Slot, Option<String>), ConfigError> {
        let slot = self.slot();
        let raw = match (self.info().target, value) {
            (Target::Slot(slot), value) => slot.encode(value)?,
            (_, OptionValue::Unset) => None,
            (Target::AsciiTables, OptionValue::Bool(ascii)) => Some(
                if *ascii {
                    TableFormat::AsciiFullCondensed
                } else {
                    TableFormat::Utf8FullCondensed
                }
                .as_str()
                .to_string(),
            ),
            (Target::ThousandsSeparator, OptionValue::Bool(true)) => Some(",".to_string()),
            (Target::ThousandsSeparator, OptionValue::Bool(false)) => None,
            (Target::ThousandsSeparator, OptionValue::Str(_)) => slot.encode(value)?,
            (_, other) => return Err(ConfigError::invalid("flag", other)),
        };
        Ok((slot, raw))
    }
}

impl fmt::Display for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

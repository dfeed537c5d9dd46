//! Typed setters shared by `Config` and `Scope`.
//!
//! Every setter validates its value before touching any state and returns
//! `&mut Self`, so calls chain with `?`. Passing `None` removes the key, which
//! brings back the built-in default.

use crate::error::ConfigError;
use crate::registry::{ConfigOption, OptionValue};

/// Fluent, validated writes to individual options.
///
/// Implementors decide where a validated value goes: a `Config` either writes
/// through to its store or records it as pending, a `Scope` writes through and
/// remembers the pre-image.
pub trait Setters {
    /// Write one already-resolved option.
    fn set_option_value(
        &mut self,
        option: ConfigOption,
        value: OptionValue,
    ) -> Result<&mut Self, ConfigError>;

    /// Write an option addressed by keyword name (`tbl_rows`) or setter name (`set_tbl_rows`).
    fn set_option(
        &mut self,
        name: &str,
        value: impl Into<OptionValue>,
    ) -> Result<&mut Self, ConfigError> {
        let option = ConfigOption::from_name(name)?;
        self.set_option_value(option, value.into())
    }

    /// Maximum number of columns shown. Negative shows all.
    fn set_tbl_cols(&mut self, n: Option<i64>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::TblCols, n.into())
    }

    /// Maximum number of rows shown. Negative shows all.
    fn set_tbl_rows(&mut self, n: Option<i64>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::TblRows, n.into())
    }

    /// Table style preset, plus whether to round its corners.
    ///
    /// The preset name is checked first; an unknown name leaves both keys untouched.
    fn set_tbl_formatting(
        &mut self,
        format: Option<&str>,
        rounded_corners: Option<bool>,
    ) -> Result<&mut Self, ConfigError> {
        let format = ConfigOption::TblFormatting.normalize(format.into())?;
        self.set_option_value(ConfigOption::TblFormatting, format)?
            .set_option_value(ConfigOption::TblRoundedCorners, rounded_corners.into())
    }

    fn set_tbl_rounded_corners(&mut self, active: Option<bool>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::TblRoundedCorners, active.into())
    }

    /// `true` selects `ASCII_FULL_CONDENSED`, `false` selects `UTF8_FULL_CONDENSED`.
    fn set_ascii_tables(&mut self, active: Option<bool>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::AsciiTables, active.into())
    }

    fn set_tbl_cell_alignment(&mut self, alignment: Option<&str>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::TblCellAlignment, alignment.into())
    }

    fn set_tbl_cell_numeric_alignment(
        &mut self,
        alignment: Option<&str>,
    ) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::TblCellNumericAlignment, alignment.into())
    }

    fn set_tbl_hide_column_names(&mut self, active: Option<bool>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::TblHideColumnNames, active.into())
    }

    fn set_tbl_hide_column_data_types(
        &mut self,
        active: Option<bool>,
    ) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::TblHideColumnDataTypes, active.into())
    }

    fn set_tbl_hide_dtype_separator(
        &mut self,
        active: Option<bool>,
    ) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::TblHideDtypeSeparator, active.into())
    }

    fn set_tbl_hide_dataframe_shape(
        &mut self,
        active: Option<bool>,
    ) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::TblHideDataframeShape, active.into())
    }

    fn set_tbl_dataframe_shape_below(
        &mut self,
        active: Option<bool>,
    ) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::TblDataframeShapeBelow, active.into())
    }

    fn set_tbl_column_data_type_inline(
        &mut self,
        active: Option<bool>,
    ) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::TblColumnDataTypeInline, active.into())
    }

    /// Maximum table width in characters.
    fn set_tbl_width_chars(&mut self, width: Option<i64>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::TblWidthChars, width.into())
    }

    /// Number of characters shown for string values. Must be positive.
    fn set_fmt_str_lengths(&mut self, n: Option<i64>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::FmtStrLengths, n.into())
    }

    /// Number of list elements shown inside one cell. Negative shows all.
    fn set_fmt_table_cell_list_len(&mut self, n: Option<i64>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::FmtTableCellListLen, n.into())
    }

    fn set_verbose(&mut self, active: Option<bool>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::Verbose, active.into())
    }

    /// Rows per chunk for the streaming engine. Must be at least 1.
    fn set_streaming_chunk_size(&mut self, size: Option<i64>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::StreamingChunkSize, size.into())
    }

    fn set_engine_affinity(&mut self, engine: Option<&str>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::EngineAffinity, engine.into())
    }

    /// Enable or disable warnings for unstable functionality.
    fn warn_unstable(&mut self, active: Option<bool>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::WarnUnstable, active.into())
    }

    fn set_auto_structify(&mut self, active: Option<bool>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::AutoStructify, active.into())
    }

    fn set_fmt_float(&mut self, format: Option<&str>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::FmtFloat, format.into())
    }

    fn set_float_precision(&mut self, precision: Option<i64>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::FloatPrecision, precision.into())
    }

    /// Digit-group separator. Accepts a single character, or `true` as shorthand for `","`.
    fn set_thousands_separator(
        &mut self,
        separator: impl Into<OptionValue>,
    ) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::ThousandsSeparator, separator.into())
    }

    fn set_decimal_separator(&mut self, separator: Option<&str>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::DecimalSeparator, separator.into())
    }

    fn set_trim_decimal_zeros(&mut self, active: Option<bool>) -> Result<&mut Self, ConfigError> {
        self.set_option_value(ConfigOption::TrimDecimalZeros, active.into())
    }
}

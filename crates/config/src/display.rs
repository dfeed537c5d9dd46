//! Typed, read-only views of the store for renderers.
//!
//! Responsibilities:
//! - Resolve the current value of display and engine settings, falling back to
//!   built-in defaults for absent keys.
//! - Plan head/tail truncation of rows and columns.
//! - Emit unstable-functionality warnings when enabled.
//!
//! Does NOT handle:
//! - Drawing tables; renderers consume these settings at render time.
//!
//! Invariants:
//! - Views never mutate the store.
//! - A stored value that does not decode for its key is ignored (with a warning)
//!   and the default is used instead.

use crate::constants::{DEFAULT_CELL_LIST_LEN, DEFAULT_MAX_COLS, DEFAULT_MAX_ROWS, DEFAULT_STR_LEN};
use crate::registry::{CellAlignment, EngineAffinity, FloatFormat, OptionValue, Slot, TableFormat};
use crate::store::Store;

/// How many items may be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Unlimited,
    Max(usize),
}

impl From<i64> for Limit {
    /// Negative settings mean "show everything".
    fn from(n: i64) -> Self {
        usize::try_from(n).map_or(Limit::Unlimited, Limit::Max)
    }
}

impl From<usize> for Limit {
    fn from(n: usize) -> Self {
        Limit::Max(n)
    }
}

/// Which items of a sequence are shown, and whether an ellipsis sits between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    pub head: usize,
    pub tail: usize,
    pub elided: bool,
}

impl Truncation {
    /// Split `limit` visible items of `total` into a head of `ceil(limit / 2)`
    /// and a tail of `floor(limit / 2)`.
    pub fn plan(total: usize, limit: impl Into<Limit>) -> Self {
        match limit.into() {
            Limit::Max(max) if total > max => Self {
                head: max.div_ceil(2),
                tail: max / 2,
                elided: true,
            },
            _ => Self {
                head: total,
                tail: 0,
                elided: false,
            },
        }
    }

    pub fn visible(&self) -> usize {
        self.head + self.tail
    }

    /// The items to draw, with `None` where the ellipsis goes.
    pub fn select<'a, T>(&self, items: &'a [T]) -> Vec<Option<&'a T>> {
        let head = self.head.min(items.len());
        let tail_start = items.len().saturating_sub(self.tail).max(head);
        let mut out: Vec<_> = items[..head].iter().map(Some).collect();
        if self.elided {
            out.push(None);
        }
        out.extend(items[tail_start..].iter().map(Some));
        out
    }
}

/// Table layout settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSettings {
    pub max_cols: Limit,
    pub max_rows: Limit,
    pub str_len: usize,
    pub cell_list_len: Limit,
    pub format: TableFormat,
    pub rounded_corners: bool,
    pub cell_alignment: Option<CellAlignment>,
    pub numeric_alignment: Option<CellAlignment>,
    pub hide_column_names: bool,
    pub hide_column_data_types: bool,
    pub hide_dtype_separator: bool,
    pub hide_dataframe_shape: bool,
    pub dataframe_shape_below: bool,
    pub column_data_type_inline: bool,
    pub width: Option<usize>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            max_cols: Limit::Max(DEFAULT_MAX_COLS),
            max_rows: Limit::Max(DEFAULT_MAX_ROWS),
            str_len: DEFAULT_STR_LEN,
            cell_list_len: Limit::Max(DEFAULT_CELL_LIST_LEN),
            format: TableFormat::default(),
            rounded_corners: false,
            cell_alignment: None,
            numeric_alignment: None,
            hide_column_names: false,
            hide_column_data_types: false,
            hide_dtype_separator: false,
            hide_dataframe_shape: false,
            dataframe_shape_below: false,
            column_data_type_inline: false,
            width: None,
        }
    }
}

impl TableSettings {
    pub fn from_store(store: &Store) -> Self {
        let defaults = Self::default();
        Self {
            max_cols: int(store, Slot::FmtMaxCols).map_or(defaults.max_cols, Limit::from),
            max_rows: int(store, Slot::FmtMaxRows).map_or(defaults.max_rows, Limit::from),
            str_len: int(store, Slot::FmtStrLen)
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(defaults.str_len),
            cell_list_len: int(store, Slot::TableCellListLen)
                .map_or(defaults.cell_list_len, Limit::from),
            format: choice(store, Slot::TableFormatting).unwrap_or(defaults.format),
            rounded_corners: flag(store, Slot::TableRoundedCorners),
            cell_alignment: choice(store, Slot::TableCellAlignment),
            numeric_alignment: choice(store, Slot::TableCellNumericAlignment),
            hide_column_names: flag(store, Slot::TableHideColumnNames),
            hide_column_data_types: flag(store, Slot::TableHideColumnDataTypes),
            hide_dtype_separator: flag(store, Slot::TableHideColumnSeparator),
            hide_dataframe_shape: flag(store, Slot::TableHideDataframeShapeInformation),
            dataframe_shape_below: flag(store, Slot::TableDataframeShapeBelow),
            column_data_type_inline: flag(store, Slot::TableInlineColumnDataType),
            width: int(store, Slot::TableWidth).and_then(|n| usize::try_from(n).ok()),
        }
    }

    pub fn columns(&self, total: usize) -> Truncation {
        Truncation::plan(total, self.max_cols)
    }

    pub fn rows(&self, total: usize) -> Truncation {
        Truncation::plan(total, self.max_rows)
    }

    /// Cut `value` to `str_len` characters, marking the cut with the format's ellipsis.
    pub fn truncate_str(&self, value: &str) -> String {
        match value.char_indices().nth(self.str_len) {
            Some((end, _)) => format!("{}{}", &value[..end], self.format.ellipsis()),
            None => value.to_string(),
        }
    }
}

/// Query engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineSettings {
    pub verbose: bool,
    pub streaming_chunk_size: Option<usize>,
    pub engine_affinity: EngineAffinity,
    pub warn_unstable: bool,
    pub auto_structify: bool,
}

impl EngineSettings {
    pub fn from_store(store: &Store) -> Self {
        Self {
            verbose: flag(store, Slot::Verbose),
            streaming_chunk_size: int(store, Slot::StreamingChunkSize)
                .and_then(|n| usize::try_from(n).ok()),
            engine_affinity: choice(store, Slot::EngineAffinity).unwrap_or_default(),
            warn_unstable: flag(store, Slot::WarnUnstable),
            auto_structify: flag(store, Slot::AutoStructify),
        }
    }
}

/// Float rendering settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberSettings {
    pub float_format: FloatFormat,
    pub precision: Option<usize>,
    pub thousands_separator: Option<char>,
    pub decimal_separator: char,
    pub trim_decimal_zeros: bool,
}

impl Default for NumberSettings {
    fn default() -> Self {
        Self {
            float_format: FloatFormat::default(),
            precision: None,
            thousands_separator: None,
            decimal_separator: '.',
            trim_decimal_zeros: false,
        }
    }
}

impl NumberSettings {
    pub fn from_store(store: &Store) -> Self {
        let defaults = Self::default();
        Self {
            float_format: choice(store, Slot::FloatFormat).unwrap_or(defaults.float_format),
            precision: int(store, Slot::FloatPrecision).and_then(|n| usize::try_from(n).ok()),
            thousands_separator: text(store, Slot::ThousandsSeparator)
                .and_then(|s| s.chars().next()),
            decimal_separator: text(store, Slot::DecimalSeparator)
                .and_then(|s| s.chars().next())
                .unwrap_or(defaults.decimal_separator),
            trim_decimal_zeros: flag(store, Slot::TrimDecimalZeros),
        }
    }

    /// Insert the thousands separator into a run of integer digits.
    pub fn group_digits(&self, digits: &str) -> String {
        let Some(sep) = self.thousands_separator else {
            return digits.to_string();
        };
        let len = digits.chars().count();
        let mut out = String::with_capacity(digits.len() + len / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(sep);
            }
            out.push(c);
        }
        out
    }
}

/// Warn about use of unstable functionality, if such warnings are enabled.
///
/// Returns whether the warning was emitted.
pub fn issue_unstable_warning(store: &Store, message: &str) -> bool {
    if !flag(store, Slot::WarnUnstable) {
        return false;
    }
    tracing::warn!(target: "polars_config::unstable", "{message}");
    true
}

fn stored(store: &Store, slot: Slot) -> Option<OptionValue> {
    let raw = store.read(slot)?;
    match slot.decode(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key = %slot, error = %e, "Ignoring invalid stored value");
            None
        }
    }
}

fn flag(store: &Store, slot: Slot) -> bool {
    matches!(stored(store, slot), Some(OptionValue::Bool(true)))
}

fn int(store: &Store, slot: Slot) -> Option<i64> {
    match stored(store, slot)? {
        OptionValue::Int(n) => Some(n),
        _ => None,
    }
}

fn text(store: &Store, slot: Slot) -> Option<String> {
    match stored(store, slot)? {
        OptionValue::Str(s) => Some(s),
        _ => None,
    }
}

fn choice<T: std::str::FromStr>(store: &Store, slot: Slot) -> Option<T> {
    text(store, slot).and_then(|s| s.parse().ok())
}

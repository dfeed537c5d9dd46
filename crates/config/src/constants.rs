//! Centralized constants for the configuration manager.
//!
//! This module holds the recognized environment variable names and the
//! built-in defaults a renderer falls back to when a key is absent.

// =============================================================================
// Recognized Environment Variables
// =============================================================================

pub const POLARS_AUTO_STRUCTIFY: &str = "POLARS_AUTO_STRUCTIFY";
pub const POLARS_ENGINE_AFFINITY: &str = "POLARS_ENGINE_AFFINITY";
pub const POLARS_FMT_MAX_COLS: &str = "POLARS_FMT_MAX_COLS";
pub const POLARS_FMT_MAX_ROWS: &str = "POLARS_FMT_MAX_ROWS";
pub const POLARS_FMT_STR_LEN: &str = "POLARS_FMT_STR_LEN";
pub const POLARS_FMT_TABLE_CELL_ALIGNMENT: &str = "POLARS_FMT_TABLE_CELL_ALIGNMENT";
pub const POLARS_FMT_TABLE_CELL_LIST_LEN: &str = "POLARS_FMT_TABLE_CELL_LIST_LEN";
pub const POLARS_FMT_TABLE_CELL_NUMERIC_ALIGNMENT: &str = "POLARS_FMT_TABLE_CELL_NUMERIC_ALIGNMENT";
pub const POLARS_FMT_TABLE_DATAFRAME_SHAPE_BELOW: &str = "POLARS_FMT_TABLE_DATAFRAME_SHAPE_BELOW";
pub const POLARS_FMT_TABLE_FORMATTING: &str = "POLARS_FMT_TABLE_FORMATTING";
pub const POLARS_FMT_TABLE_HIDE_COLUMN_DATA_TYPES: &str = "POLARS_FMT_TABLE_HIDE_COLUMN_DATA_TYPES";
pub const POLARS_FMT_TABLE_HIDE_COLUMN_NAMES: &str = "POLARS_FMT_TABLE_HIDE_COLUMN_NAMES";
pub const POLARS_FMT_TABLE_HIDE_COLUMN_SEPARATOR: &str = "POLARS_FMT_TABLE_HIDE_COLUMN_SEPARATOR";
pub const POLARS_FMT_TABLE_HIDE_DATAFRAME_SHAPE_INFORMATION: &str =
    "POLARS_FMT_TABLE_HIDE_DATAFRAME_SHAPE_INFORMATION";
pub const POLARS_FMT_TABLE_INLINE_COLUMN_DATA_TYPE: &str =
    "POLARS_FMT_TABLE_INLINE_COLUMN_DATA_TYPE";
pub const POLARS_FMT_TABLE_ROUNDED_CORNERS: &str = "POLARS_FMT_TABLE_ROUNDED_CORNERS";
pub const POLARS_STREAMING_CHUNK_SIZE: &str = "POLARS_STREAMING_CHUNK_SIZE";
pub const POLARS_TABLE_WIDTH: &str = "POLARS_TABLE_WIDTH";
pub const POLARS_VERBOSE: &str = "POLARS_VERBOSE";
pub const POLARS_WARN_UNSTABLE: &str = "POLARS_WARN_UNSTABLE";

// =============================================================================
// Table Display Defaults
// =============================================================================

/// Default maximum number of columns shown before truncating.
pub const DEFAULT_MAX_COLS: usize = 8;

/// Default maximum number of rows shown before truncating.
pub const DEFAULT_MAX_ROWS: usize = 8;

/// Default number of characters shown for string values.
pub const DEFAULT_STR_LEN: usize = 30;

/// Default number of list elements shown inside a single cell.
pub const DEFAULT_CELL_LIST_LEN: usize = 3;

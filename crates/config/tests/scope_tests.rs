//! Integration tests for scoped activation.
//!
//! These tests drive the public `Config` API end to end and verify that every
//! way of ending a scope leaves the store exactly as it was found.
//!
//! Test coverage:
//! - Guard scopes, closures, and wrapped functions
//! - Nested and overlapping scopes of different configs
//! - Deferred versus immediate setters
//! - Restore-defaults-on-enter
//! - The process-wide store (serialized)

use std::sync::Arc;

use polars_config::constants::*;
use polars_config::{
    Config, ConfigError, OptionValue, Setters, StateQuery, Store, TableFormat, TableSettings,
};
use serial_test::serial;

fn isolated() -> Config {
    Config::with_store(Arc::new(Store::new()))
}

#[test]
fn test_scope_applies_and_restores() {
    let cfg = isolated()
        .with_option("tbl_rows", 2)
        .unwrap()
        .with_option("verbose", true)
        .unwrap();
    let store = Arc::clone(cfg.store());
    store.set(POLARS_FMT_MAX_ROWS, "20");

    {
        let _scope = cfg.scope();
        assert_eq!(store.get(POLARS_FMT_MAX_ROWS).as_deref(), Some("2"));
        assert_eq!(store.get(POLARS_VERBOSE).as_deref(), Some("1"));
    }

    assert_eq!(store.get(POLARS_FMT_MAX_ROWS).as_deref(), Some("20"));
    assert_eq!(store.get(POLARS_VERBOSE), None);
}

#[test]
fn test_scope_restores_when_body_returns_error() {
    let cfg = isolated().with_option("tbl_cols", 1).unwrap();

    fn body(cfg: &Config) -> Result<(), ConfigError> {
        let mut scope = cfg.scope();
        scope.set_tbl_formatting(Some("NOPE"), None)?;
        Ok(())
    }

    assert!(body(&cfg).is_err());
    assert_eq!(cfg.store().get(POLARS_FMT_MAX_COLS), None);
}

#[test]
fn test_nested_scopes_restore_outer_values() {
    let outer = isolated()
        .with_option("tbl_formatting", "ASCII_FULL")
        .unwrap()
        .with_option("tbl_rows", 5)
        .unwrap();
    let inner = isolated()
        .bind(Arc::clone(outer.store()))
        .with_option("tbl_formatting", "MARKDOWN")
        .unwrap();
    let store = Arc::clone(outer.store());

    {
        let _outer = outer.scope();
        {
            let _inner = inner.scope();
            assert_eq!(store.get(POLARS_FMT_TABLE_FORMATTING).as_deref(), Some("MARKDOWN"));
            assert_eq!(store.get(POLARS_FMT_MAX_ROWS).as_deref(), Some("5"));
        }
        assert_eq!(store.get(POLARS_FMT_TABLE_FORMATTING).as_deref(), Some("ASCII_FULL"));
    }
    assert_eq!(store.get(POLARS_FMT_TABLE_FORMATTING), None);
    assert_eq!(store.get(POLARS_FMT_MAX_ROWS), None);
}

#[test]
fn test_scoped_nothing_formatting_restores_previous_style() {
    let store = Arc::new(Store::new());
    let mut base = Config::with_store(Arc::clone(&store));
    base.set_tbl_formatting(Some("ASCII_MARKDOWN"), None).unwrap();

    let plain = Config::with_store(Arc::clone(&store))
        .with_option("tbl_formatting", "NOTHING")
        .unwrap();
    plain.run(|| {
        assert_eq!(TableSettings::from_store(&store).format, TableFormat::Nothing);
    });

    assert_eq!(
        TableSettings::from_store(&store).format,
        TableFormat::AsciiMarkdown
    );
}

#[test]
fn test_wrapped_function_is_reusable_and_leaves_nothing_behind() {
    let cfg = isolated()
        .with_option("tbl_cols", 2)
        .unwrap()
        .with_option("fmt_str_lengths", 5)
        .unwrap();
    let store = Arc::clone(cfg.store());
    let wrapped = cfg.wrap(|columns: usize| TableSettings::from_store(&store).columns(columns));

    let first = wrapped.call(4);
    let second = wrapped.call(4);

    assert_eq!(first, second);
    assert_eq!(first.visible(), 2);
    assert!(first.elided);
    assert!(cfg.state(StateQuery::all().if_set()).is_empty());
    assert_eq!(wrapped.config(), &cfg);
}

#[test]
fn test_wrapped_functions_take_unit_or_tuple_arguments() {
    let cfg = isolated().with_option("tbl_rows", 6).unwrap();
    let store = Arc::clone(cfg.store());

    let rows = cfg.wrap(|()| store.get(POLARS_FMT_MAX_ROWS));
    assert_eq!(rows.call(()).as_deref(), Some("6"));

    let plan = cfg.wrap(|(columns, rows): (usize, usize)| {
        let settings = TableSettings::from_store(&store);
        (settings.columns(columns), settings.rows(rows))
    });
    let (columns, rows) = plan.call((3, 10));
    assert!(!columns.elided);
    assert_eq!(rows.visible(), 6);
    assert_eq!(store.get(POLARS_FMT_MAX_ROWS), None);
}

#[test]
fn test_negative_column_limit_shows_all() {
    let cfg = isolated().with_option("tbl_cols", -1).unwrap();
    let plan = cfg.run(|| TableSettings::from_store(cfg.store()).columns(4));
    assert_eq!(plan.visible(), 4);
    assert!(!plan.elided);
}

#[test]
fn test_deferred_setters_apply_only_inside_scope() {
    let mut cfg = isolated().apply_on_context_enter(true);
    cfg.set_tbl_cols(Some(3))
        .unwrap()
        .set_ascii_tables(Some(true))
        .unwrap();
    let store = Arc::clone(cfg.store());
    assert!(store.keys().is_empty());

    {
        let _scope = cfg.scope();
        assert_eq!(store.get(POLARS_FMT_MAX_COLS).as_deref(), Some("3"));
        assert_eq!(
            store.get(POLARS_FMT_TABLE_FORMATTING).as_deref(),
            Some("ASCII_FULL_CONDENSED")
        );
    }
    assert!(store.keys().is_empty());
}

#[test]
fn test_setters_on_scope_are_reverted() {
    let cfg = isolated();
    let store = Arc::clone(cfg.store());
    store.set(POLARS_FMT_STR_LEN, "12");

    {
        let mut scope = cfg.scope();
        scope
            .set_fmt_str_lengths(Some(50))
            .unwrap()
            .set_thousands_separator(true)
            .unwrap()
            .set_option("set_decimal_separator", ",")
            .unwrap();
        assert_eq!(store.get(POLARS_FMT_STR_LEN).as_deref(), Some("50"));
        let state = scope.state(StateQuery::all().if_set());
        assert_eq!(state.get("set_thousands_separator"), Some(","));
        assert_eq!(state.get("set_decimal_separator"), Some(","));
    }

    assert_eq!(store.get(POLARS_FMT_STR_LEN).as_deref(), Some("12"));
    assert_eq!(cfg.state(StateQuery::all().if_set()).len(), 1);
}

#[test]
fn test_restore_defaults_on_enter_starts_from_a_clean_slate() {
    let cfg = isolated()
        .restore_defaults_on_enter(true)
        .with_option("verbose", true)
        .unwrap();
    let store = Arc::clone(cfg.store());
    store.set(POLARS_FMT_MAX_COLS, "100");
    store.set(POLARS_FMT_TABLE_FORMATTING, "MARKDOWN");

    cfg.run(|| {
        let keys: Vec<_> = store.keys().into_iter().collect();
        assert_eq!(keys, vec![POLARS_VERBOSE.to_string()]);
    });

    assert_eq!(store.get(POLARS_FMT_MAX_COLS).as_deref(), Some("100"));
    assert_eq!(store.get(POLARS_FMT_TABLE_FORMATTING).as_deref(), Some("MARKDOWN"));
    assert_eq!(store.get(POLARS_VERBOSE), None);
}

#[test]
fn test_invalid_inputs_are_rejected_before_any_change() {
    let cfg = isolated();

    let err = cfg.clone().with_option("tbl_formatting", "NOPE").unwrap_err();
    assert!(err.to_string().contains("invalid table format name: 'NOPE'"));

    assert!(matches!(
        cfg.clone().with_option("streaming_chunk_size", 0),
        Err(ConfigError::InvalidValue { .. })
    ));
    assert!(matches!(
        cfg.clone().with_option("fmt_str_lengths", -2),
        Err(ConfigError::InvalidValue { .. })
    ));
    assert!(matches!(
        cfg.clone().with_option("not_an_option", 1),
        Err(ConfigError::UnknownOption(_))
    ));
    assert!(matches!(
        cfg.clone().with_option("set_decimal_separator", ".."),
        Err(ConfigError::InvalidValue { .. })
    ));

    assert!(cfg.store().keys().is_empty());
}

#[test]
fn test_equality_is_order_independent() {
    let store = Arc::new(Store::new());
    let a = Config::with_store(Arc::clone(&store))
        .with_option("tbl_rows", 10)
        .unwrap()
        .with_option("set_fmt_float", "full")
        .unwrap();
    let b = Config::with_store(Arc::new(Store::new()))
        .with_option("fmt_float", "FULL")
        .unwrap()
        .with_option("tbl_rows", OptionValue::Int(10))
        .unwrap();
    assert_eq!(a, b);
    assert_ne!(a, b.clone().with_option("tbl_rows", 11).unwrap());
}

#[test]
#[serial]
fn test_global_store_scope_restores() {
    let cfg = Config::new().with_option("tbl_width_chars", 120).unwrap();
    let before = cfg.state(StateQuery::all());

    cfg.run(|| {
        assert_eq!(
            Store::global().get(POLARS_TABLE_WIDTH).as_deref(),
            Some("120")
        );
    });

    assert!(cfg.diff(&before).is_empty());
}

#[test]
#[serial]
fn test_global_store_scope_blocks_other_threads() {
    let cfg = Config::new().with_option("tbl_hide_column_names", true).unwrap();
    let before = Store::global().get(POLARS_FMT_TABLE_HIDE_COLUMN_NAMES);

    let scope = cfg.scope();
    let writer = std::thread::spawn(|| {
        let mut other = Config::new();
        other.set_tbl_hide_column_names(Some(false)).unwrap();
        other.set_tbl_hide_column_names(None).unwrap();
    });
    std::thread::sleep(std::time::Duration::from_millis(50));
    assert_eq!(
        Store::global().get(POLARS_FMT_TABLE_HIDE_COLUMN_NAMES).as_deref(),
        Some("1")
    );
    drop(scope);
    writer.join().unwrap();

    // The other thread ran after the scope ended and unset the key.
    assert_eq!(Store::global().get(POLARS_FMT_TABLE_HIDE_COLUMN_NAMES), None);
    if let Some(value) = before {
        Store::global().set(POLARS_FMT_TABLE_HIDE_COLUMN_NAMES, value);
    }
}

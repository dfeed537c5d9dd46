//! Architecture tests for file size limits.
//!
//! - Files >500 LOC require justification (warning logged)
//! - Files >800 LOC are presumed mis-scoped (test failure)
//!
//! Walks every .rs file under crates/ and checks its line count.

mod common;

use std::fs;
use std::path::Path;

const WARNING_THRESHOLD: usize = 500;
const FAILURE_THRESHOLD: usize = 800;

/// Files excluded from size checks with justification.
///
/// Each entry is a (path_suffix, justification) tuple matched against the end of the path.
const EXCLUDED_FILES: &[(&str, &str)] = &[];

#[test]
fn file_size_limits() {
    let workspace_root = common::workspace_root();
    let crates_dir = workspace_root.join("crates");
    assert!(
        crates_dir.exists(),
        "crates/ directory not found at {:?}",
        crates_dir
    );

    let rust_files = common::rust_files(&workspace_root);
    let mut failures = Vec::new();
    let mut warnings = Vec::new();

    for file_path in &rust_files {
        let loc = count_loc(file_path);
        let relative_path = file_path.strip_prefix(&workspace_root).unwrap_or(file_path);
        let relative_str = relative_path.to_string_lossy().to_string();

        let is_excluded = EXCLUDED_FILES
            .iter()
            .any(|(suffix, _)| relative_str.ends_with(suffix));

        if loc > FAILURE_THRESHOLD && !is_excluded {
            failures.push((relative_str, loc));
        } else if loc > WARNING_THRESHOLD {
            warnings.push((relative_str, loc));
        }
    }

    for (path, loc) in &warnings {
        eprintln!("[architecture] {path}: {loc} LOC exceeds {WARNING_THRESHOLD}");
    }

    assert!(
        failures.is_empty(),
        "Files exceeding {} LOC (refactor or add to EXCLUDED_FILES with a justification):\n{}",
        FAILURE_THRESHOLD,
        failures
            .iter()
            .map(|(path, loc)| format!("  - {path}: {loc} lines"))
            .collect::<Vec<_>>()
            .join("\n")
    );

    eprintln!(
        "[architecture] Checked {} Rust files for size limits.",
        rust_files.len()
    );
}

/// Count lines of code, skipping blank lines, line comments, and doc comments.
fn count_loc(path: &Path) -> usize {
    let content = fs::read_to_string(path).expect("Failed to read file");
    let mut in_block_comment = false;

    content
        .lines()
        .map(str::trim)
        .filter(|line| {
            if line.starts_with("/*") {
                in_block_comment = true;
            }
            if in_block_comment {
                if line.ends_with("*/") {
                    in_block_comment = false;
                }
                return false;
            }
            !line.is_empty() && !line.starts_with("//")
        })
        .count()
}

#[test]
fn test_count_loc_skips_comments_and_blanks() {
    let temp_dir = tempfile::tempdir().unwrap();
    let test_file = temp_dir.path().join("sample.rs");

    fs::write(
        &test_file,
        r#"//! Module documentation

/// Function documentation
fn main() {
    let x = 5; // inline comment

    /* block
       comment */
    println!("{x}");
}
"#,
    )
    .unwrap();

    // fn main() {, let x = 5;, println!(...);, }
    assert_eq!(count_loc(&test_file), 4);
}

#[test]
fn test_excluded_files_list_is_consistent() {
    for (pattern, justification) in EXCLUDED_FILES {
        assert!(!pattern.is_empty(), "Excluded file pattern must not be empty");
        assert!(
            !justification.is_empty(),
            "Justification for '{}' must not be empty",
            pattern
        );
    }
}

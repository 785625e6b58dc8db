//! Common assertion helpers for test output validation

#![allow(dead_code)]

use predicates::prelude::*;

/// Creates a predicate that checks for the missing context error
pub fn context_missing() -> impl Predicate<str> {
    predicates::str::contains(".agent not found").and(predicates::str::contains("skillsmith init"))
}

/// Creates a predicate that checks for a saved snapshot report
pub fn snapshot_saved(file_count: usize) -> impl Predicate<str> {
    predicates::str::contains("Snapshot saved:")
        .and(predicates::str::contains(format!("Files: {file_count}")))
}

/// Creates a predicate that checks for a snapshot file name
pub fn has_snapshot_name() -> impl Predicate<str> {
    predicates::str::is_match(r"\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2}\.zip").unwrap()
}

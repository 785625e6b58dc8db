//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`SkillsmithError`] which covers every failure the snapshot
//! store, archive codec, catalog loader and configuration layer can surface. It uses
//! `thiserror` for ergonomic error definitions and includes constructors for the
//! common failure scenarios.
//!
//! # Public API
//! - [`SkillsmithError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, SkillsmithError>`
//!
//! # Error Categories
//! - **Snapshots**: storage failures, unknown snapshot references, corrupt archives
//! - **Context layout**: missing `.agent/` directory
//! - **Catalog and configuration**: unreadable or malformed JSON files
//!
//! Repository inspection failures are intentionally absent: branch detection never
//! raises and degrades to "no signal" instead.

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for skillsmith
#[derive(Error, Debug)]
pub enum SkillsmithError {
    // Context layout errors
    #[error("{} not found. Run: skillsmith init", path.display())]
    ContextNotFound { path: PathBuf },

    // Snapshot errors
    #[error("Storage failure at '{}': {source}", path.display())]
    StorageFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Snapshot not found: {}", path.display())]
    SnapshotNotFound { path: PathBuf },

    #[error("Archive '{}' is corrupt: {reason}", path.display())]
    ArchiveCorrupt { path: PathBuf, reason: String },

    // Catalog errors
    #[error("Skill catalog not found or empty at '{}'", path.display())]
    CatalogUnavailable { path: PathBuf },

    // Configuration errors
    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read config file '{}': {source}", path.display())]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // Watch loop errors
    #[error("Failed to install interrupt handler: {0}")]
    SignalHandler(#[from] ctrlc::Error),

    // Environment diagnostics
    #[error("{failed} doctor check(s) failed")]
    DoctorChecksFailed { failed: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using SkillsmithError
pub type Result<T> = std::result::Result<T, SkillsmithError>;

impl SkillsmithError {
    /// Create a missing context directory error
    pub fn context_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ContextNotFound { path: path.into() }
    }

    /// Create a storage failure error
    pub fn storage_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageFailure {
            path: path.into(),
            source,
        }
    }

    /// Create a snapshot not found error
    pub fn snapshot_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SnapshotNotFound { path: path.into() }
    }

    /// Create an archive corrupt error
    pub fn archive_corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ArchiveCorrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a catalog unavailable error
    pub fn catalog_unavailable(path: impl Into<PathBuf>) -> Self {
        Self::CatalogUnavailable { path: path.into() }
    }

    /// Create a config read failed error
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

//! Core functionality for the skillsmith tool.
//!
//! This module provides the building blocks the commands are assembled from:
//! archiving, the snapshot store, repository sampling, the drift monitor,
//! configuration, the skill catalog and console output.

pub mod archive;
pub mod catalog;
pub mod config;
pub mod dirs;
pub mod error;
pub mod git;
pub mod monitor;
pub mod output;
pub mod snapshot;
pub mod state;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{Result, SkillsmithError};

// === Snapshots ===
// Timestamped zip archives of the context directory
pub use archive::{archive_entries, create_archive, extract_all, read_note, ArchiveEntry};
pub use snapshot::{SavedSnapshot, Snapshot, SnapshotStore};

// === Repository sampling ===
// Branch, state file age and installed skills, read once per poll
pub use git::{BranchInspector, GitInspector};
pub use state::{RepositorySampler, RepositoryState, StateSampler};

// === Drift monitoring ===
pub use monitor::{DriftEvent, DriftMonitor, MonitorConfig, MonitorState};

// === Configuration and catalog ===
pub use catalog::{Catalog, CatalogFilter, CatalogProvider, CatalogSkill, JsonCatalog};
pub use config::{Settings, WatchSettings};

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{
    print_detail, print_error, print_info, print_section_header, print_success,
    ConsoleReporter, Level, Reporter,
};

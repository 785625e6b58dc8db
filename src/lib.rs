//! Skillsmith - keep an agent's persisted context in step with the repository it works on.
//!
//! This library provides the core functionality behind the `skillsmith` CLI: a drift
//! monitor that notices branch switches, stale state files and skill set changes, and a
//! snapshot store that checkpoints and restores the `.agent/` context directory.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Snapshot archiving, listing and restoration
//! - Repository state sampling and drift monitoring
//! - Skill catalog loading and filtering
//! - Error handling and result types
//! - Console output helpers

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Drift monitoring
    DriftEvent,
    DriftMonitor,
    MonitorConfig,
    MonitorState,
    RepositorySampler,
    RepositoryState,
    StateSampler,
    BranchInspector,
    GitInspector,

    // Snapshots
    SavedSnapshot,
    Snapshot,
    SnapshotStore,

    // Catalog and configuration
    Catalog,
    CatalogProvider,
    JsonCatalog,
    Settings,

    // Output
    ConsoleReporter,
    Level,
    Reporter,

    // Error handling
    Result,
    SkillsmithError,
};

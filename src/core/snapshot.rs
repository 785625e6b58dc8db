//! Timestamped snapshots of the agent context directory.
//!
//! The [`SnapshotStore`] owns the `snapshots/` namespace inside the context root.
//! Every save writes one zip archive named after the local time at second
//! resolution (`YYYY-MM-DD_HH-MM-SS.zip`), so file names sort chronologically.
//! Two saves within the same second share a name and the later one replaces the
//! earlier archive.
//!
//! # Public API
//! - [`Snapshot`]: Descriptor of one archive in the namespace
//! - [`SavedSnapshot`]: A fresh snapshot plus the number of files it holds
//! - [`SnapshotStore`]: List, save, find and restore operations

use crate::core::archive;
use crate::core::error::{Result, SkillsmithError};
use chrono::{Local, NaiveDateTime};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the snapshot namespace inside the context root
pub const SNAPSHOTS_DIR: &str = "snapshots";

/// Extension used for snapshot archives
pub const SNAPSHOT_EXTENSION: &str = "zip";

/// Timestamp layout of snapshot file names
pub const SNAPSHOT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub filename: String,
    pub path: PathBuf,
    /// Archive comment; empty when absent or unreadable
    pub note: String,
    pub size_bytes: u64,
}

impl Snapshot {
    fn from_path(path: PathBuf) -> Result<Self> {
        let size_bytes = fs::metadata(&path)
            .map_err(|e| SkillsmithError::storage_failure(&path, e))?
            .len();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let note = archive::read_note(&path);

        Ok(Self {
            filename,
            path,
            note,
            size_bytes,
        })
    }

    /// Archive size in kibibytes, for display
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSnapshot {
    pub snapshot: Snapshot,
    pub file_count: usize,
}

pub struct SnapshotStore {
    context_root: PathBuf,
    namespace: PathBuf,
}

impl SnapshotStore {
    pub fn new(context_root: impl Into<PathBuf>) -> Self {
        let context_root = context_root.into();
        let namespace = context_root.join(SNAPSHOTS_DIR);
        Self {
            context_root,
            namespace,
        }
    }

    pub fn context_root(&self) -> &Path {
        &self.context_root
    }

    pub fn namespace(&self) -> &Path {
        &self.namespace
    }

    /// Snapshot file name for a given local timestamp
    pub fn filename_for(timestamp: NaiveDateTime) -> String {
        format!(
            "{}.{SNAPSHOT_EXTENSION}",
            timestamp.format(SNAPSHOT_TIMESTAMP_FORMAT)
        )
    }

    /// All snapshots in the namespace, newest first. A missing namespace yields
    /// an empty list.
    pub fn list(&self) -> Result<Vec<Snapshot>> {
        let entries = match fs::read_dir(&self.namespace) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(SkillsmithError::storage_failure(&self.namespace, e)),
        };

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SkillsmithError::storage_failure(&self.namespace, e))?;
            let path = entry.path();
            let is_archive = path
                .extension()
                .is_some_and(|ext| ext == SNAPSHOT_EXTENSION);
            if is_archive && path.is_file() {
                paths.push(path);
            }
        }

        paths.sort_by(|a, b| b.file_name().cmp(&a.file_name()));

        paths.into_iter().map(Snapshot::from_path).collect()
    }

    /// Saves a snapshot stamped with the current local time.
    pub fn save(&self, note: &str) -> Result<SavedSnapshot> {
        self.save_at(note, Local::now().naive_local())
    }

    /// Saves a snapshot stamped with `timestamp`. An existing snapshot with the
    /// same second-resolution name is overwritten.
    pub fn save_at(&self, note: &str, timestamp: NaiveDateTime) -> Result<SavedSnapshot> {
        fs::create_dir_all(&self.namespace)
            .map_err(|e| SkillsmithError::storage_failure(&self.namespace, e))?;

        let archive_path = self.namespace.join(Self::filename_for(timestamp));
        let created =
            archive::create_archive(&self.context_root, &[SNAPSHOTS_DIR], note, &archive_path)?;

        log::debug!(
            "Saved snapshot {} with {} file(s)",
            created.path.display(),
            created.file_count
        );

        Ok(SavedSnapshot {
            snapshot: Snapshot::from_path(created.path)?,
            file_count: created.file_count,
        })
    }

    /// Resolves a restore reference: absolute paths are used as-is, anything
    /// else is looked up inside the namespace.
    pub fn resolve(&self, reference: &str) -> PathBuf {
        let candidate = Path::new(reference);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.namespace.join(candidate)
        }
    }

    /// Looks up the snapshot named by `reference` without touching the context.
    pub fn find(&self, reference: &str) -> Result<Snapshot> {
        let path = self.resolve(reference);
        if !path.is_file() {
            return Err(SkillsmithError::snapshot_not_found(path));
        }
        Snapshot::from_path(path)
    }

    /// Expands `snapshot` over the context root and returns the number of
    /// files written.
    ///
    /// Extraction is not transactional: on a corrupt archive, files already
    /// written stay in place.
    pub fn extract(&self, snapshot: &Snapshot) -> Result<usize> {
        let destination = self.context_root.parent().ok_or_else(|| {
            SkillsmithError::storage_failure(
                &self.context_root,
                io::Error::new(io::ErrorKind::InvalidInput, "context root has no parent"),
            )
        })?;

        let written = archive::extract_all(&snapshot.path, destination)?;
        log::debug!(
            "Restored {} file(s) from {} into {}",
            written,
            snapshot.filename,
            destination.display()
        );
        Ok(written)
    }

    /// Restores the snapshot named by `reference` over the context root.
    pub fn restore(&self, reference: &str) -> Result<Snapshot> {
        let snapshot = self.find(reference)?;
        self.extract(&snapshot)?;
        Ok(snapshot)
    }
}

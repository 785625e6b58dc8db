//! Point-in-time samples of the repository signals the drift monitor tracks.
//!
//! A [`RepositoryState`] holds three signals read in one go: the checked-out
//! branch, the age of the tracked state file, and the installed skill set.
//! Samples are never cached or mutated; the monitor takes a fresh one per tick.
//!
//! # Public API
//! - [`RepositoryState`]: One immutable sample
//! - [`StateSampler`]: Seam the drift monitor polls
//! - [`RepositorySampler`]: Filesystem and git backed sampler

use crate::core::git::BranchInspector;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File whose presence marks a directory below the skills root as a skill
pub const SKILL_MARKER: &str = "SKILL.md";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RepositoryState {
    pub branch: Option<String>,
    pub state_age_hours: Option<f64>,
    /// `None` when the skills root could not be scanned this tick
    pub skill_ids: Option<BTreeSet<String>>,
}

/// Produces one [`RepositoryState`] per call.
pub trait StateSampler {
    fn sample(&mut self) -> RepositoryState;
}

pub struct RepositorySampler<I: BranchInspector> {
    workdir: PathBuf,
    state_path: PathBuf,
    skills_root: PathBuf,
    inspector: I,
}

impl<I: BranchInspector> RepositorySampler<I> {
    pub fn new(
        workdir: impl Into<PathBuf>,
        state_path: impl Into<PathBuf>,
        skills_root: impl Into<PathBuf>,
        inspector: I,
    ) -> Self {
        Self {
            workdir: workdir.into(),
            state_path: state_path.into(),
            skills_root: skills_root.into(),
            inspector,
        }
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    pub fn branch(&self) -> Option<String> {
        self.inspector.current_branch(&self.workdir)
    }

    pub fn skill_set(&self) -> io::Result<BTreeSet<String>> {
        scan_skills(&self.skills_root)
    }

    pub fn state_age(&self) -> Option<f64> {
        state_age_hours(&self.state_path, Utc::now())
    }
}

impl<I: BranchInspector> StateSampler for RepositorySampler<I> {
    fn sample(&mut self) -> RepositoryState {
        let skill_ids = match self.skill_set() {
            Ok(skills) => Some(skills),
            Err(e) => {
                log::warn!(
                    "Could not scan skills in {}: {e}",
                    self.skills_root.display()
                );
                None
            }
        };

        RepositoryState {
            branch: self.branch(),
            state_age_hours: self.state_age(),
            skill_ids,
        }
    }
}

/// Identifiers of every direct subdirectory of `skills_root` that contains a
/// [`SKILL_MARKER`] file. A missing skills root is an empty set.
pub fn scan_skills(skills_root: &Path) -> io::Result<BTreeSet<String>> {
    let entries = match fs::read_dir(skills_root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
        Err(e) => return Err(e),
    };

    let mut skills = BTreeSet::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.join(SKILL_MARKER).is_file() {
            skills.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }

    Ok(skills)
}

/// Hours elapsed between the last modification of `path` and `now`, or `None`
/// when the file does not exist or its timestamp is unavailable.
pub fn state_age_hours(path: &Path, now: DateTime<Utc>) -> Option<f64> {
    let modified = match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => DateTime::<Utc>::from(modified),
        Err(e) => {
            if e.kind() != io::ErrorKind::NotFound {
                log::debug!("Cannot read mtime of {}: {e}", path.display());
            }
            return None;
        }
    };

    let elapsed = now.signed_duration_since(modified);
    Some(elapsed.num_milliseconds() as f64 / 3_600_000.0)
}

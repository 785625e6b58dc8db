//! Branch detection for the working repository.
//!
//! This module wraps the `git2` library behind the [`BranchInspector`] trait so the
//! drift monitor can ask "which branch is checked out?" without caring how the
//! answer is produced. Inspection is best-effort: every failure collapses to
//! `None`, and a lookup that does not finish within its timeout is abandoned.
//!
//! # Public API
//! - [`BranchInspector`]: Seam consumed by the repository state sampler
//! - [`GitInspector`]: `git2`-backed implementation with a bounded wait
//! - [`GitRepo`]: Thin repository handle used by the inspector

use git2::Repository;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Default upper bound for a single branch lookup
pub const DEFAULT_INSPECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Reports the current version-control branch of a working directory.
pub trait BranchInspector {
    /// Returns the branch name, or `None` when it cannot be determined.
    /// Implementations must never panic or block indefinitely.
    fn current_branch(&self, workdir: &Path) -> Option<String>;
}

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, git2::Error> {
        let repo = Repository::discover(path)?;
        Ok(GitRepo { repo })
    }

    /// Current branch name, or `detached at <hash>` for a detached HEAD.
    /// Fails on an unborn branch (no commits yet).
    pub fn get_current_branch(&self) -> Result<String, git2::Error> {
        let head = self.repo.head()?;

        if head.is_branch() {
            if let Some(branch_name) = head.shorthand() {
                return Ok(branch_name.to_string());
            }
        }

        match head.target() {
            Some(oid) => Ok(format!("detached at {}", &oid.to_string()[..7])),
            None => Err(git2::Error::from_str("HEAD does not point to a commit")),
        }
    }
}

/// [`BranchInspector`] backed by `git2`, run on a helper thread so a slow
/// repository cannot stall the caller past `timeout`.
#[derive(Debug, Clone)]
pub struct GitInspector {
    timeout: Duration,
}

impl GitInspector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for GitInspector {
    fn default() -> Self {
        Self::new(DEFAULT_INSPECT_TIMEOUT)
    }
}

impl BranchInspector for GitInspector {
    fn current_branch(&self, workdir: &Path) -> Option<String> {
        let (tx, rx) = mpsc::channel();
        let workdir: PathBuf = workdir.to_path_buf();

        let spawned = thread::Builder::new()
            .name("branch-inspector".to_string())
            .spawn(move || {
                let branch = GitRepo::open(&workdir).and_then(|repo| repo.get_current_branch());
                // The receiver is gone once the caller has timed out.
                let _ = tx.send(branch);
            });

        if let Err(e) = spawned {
            log::debug!("Could not spawn branch inspector: {e}");
            return None;
        }

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(branch)) => Some(branch),
            Ok(Err(e)) => {
                log::debug!("Branch lookup failed: {}", e.message());
                None
            }
            Err(e) => {
                log::warn!("Branch lookup abandoned after {:?}: {e}", self.timeout);
                None
            }
        }
    }
}

//! Git repository and agent context setup utilities
//!
//! Provides functions for creating temporary repositories with an `.agent/`
//! context directory and for running the skillsmith binary inside them.

#![allow(dead_code)]

use assert_cmd::prelude::*;
use skillsmith::core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Test repository setup result containing both the temporary directory
/// and the repository path. The TempDir must be kept alive for the duration
/// of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn agent(&self) -> PathBuf {
        self.path.join(".agent")
    }

    pub fn snapshots(&self) -> PathBuf {
        self.agent().join("snapshots")
    }

    /// A skillsmith command running inside the repository, isolated from the
    /// user's real configuration directory.
    pub fn skillsmith(&self) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("skillsmith")?;
        cmd.current_dir(&self.path)
            .env("XDG_CONFIG_HOME", self.temp_dir.path().join(".test-config"))
            .env_remove("RUST_LOG");
        Ok(cmd)
    }
}

fn git(repo_path: &Path, args: &[&str]) -> Result<()> {
    Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()?;
    Ok(())
}

/// Sets up a fresh git repository on branch `main` with one commit
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let repo_path = temp_dir.path().join("project");
    fs::create_dir_all(&repo_path)?;

    git(&repo_path, &["init"])?;
    git(&repo_path, &["config", "user.name", "Test User"])?;
    git(&repo_path, &["config", "user.email", "test@example.com"])?;
    git(&repo_path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;

    create_file(&repo_path, "README.md", "project\n")?;
    git(&repo_path, &["add", "README.md"])?;
    git(&repo_path, &["commit", "-m", "Initial commit"])?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
    })
}

/// Sets up a repository with an `.agent/` directory holding a state file and
/// the given skills
pub fn setup_repo_with_context(skills: &[&str]) -> Result<TestRepo> {
    let repo = setup_test_repo()?;
    create_file(&repo.path, ".agent/STATE.md", "# Current task\nparser rewrite\n")?;
    fs::create_dir_all(repo.agent().join("skills"))?;
    for skill in skills {
        add_skill(&repo.path, skill)?;
    }
    Ok(repo)
}

/// Creates a file (and its parent directories) with the given content
pub fn create_file(repo_path: &Path, relative: &str, content: &str) -> Result<()> {
    let path = repo_path.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn read_file(repo_path: &Path, relative: &str) -> Result<String> {
    Ok(fs::read_to_string(repo_path.join(relative))?)
}

/// Installs a skill directory with its marker file
pub fn add_skill(repo_path: &Path, name: &str) -> Result<()> {
    create_file(
        repo_path,
        &format!(".agent/skills/{name}/SKILL.md"),
        &format!("# {name}\n"),
    )
}

/// Names of the snapshot archives currently on disk
pub fn snapshot_files(repo: &TestRepo) -> Result<Vec<String>> {
    let dir = repo.snapshots();
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    Ok(names)
}

use assert_cmd::prelude::*;
use predicates::prelude::*;

mod common;
use common::{assertions, repository::*};

#[cfg(test)]
mod snapshot_command_tests {
    use super::*;

    #[test]
    fn test_snapshot_requires_context_directory() -> anyhow::Result<()> {
        let repo = setup_test_repo()?;

        repo.skillsmith()?
            .arg("snapshot")
            .assert()
            .failure()
            .stdout(assertions::context_missing());

        Ok(())
    }

    #[test]
    fn test_snapshot_saves_archive() -> anyhow::Result<()> {
        let repo = setup_repo_with_context(&["rust", "react"])?;

        repo.skillsmith()?
            .arg("snapshot")
            .assert()
            .success()
            .stdout(assertions::snapshot_saved(3))
            .stdout(assertions::has_snapshot_name());

        let files = snapshot_files(&repo)?;
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with(".zip"));

        Ok(())
    }

    #[test]
    fn test_snapshot_note_is_listed() -> anyhow::Result<()> {
        let repo = setup_repo_with_context(&["rust"])?;

        repo.skillsmith()?
            .args(["snapshot", "-n", "before refactor"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Note: before refactor"));

        repo.skillsmith()?
            .args(["snapshot", "--list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Snapshots:"))
            .stdout(predicate::str::contains("before refactor"))
            .stdout(predicate::str::contains(" KB"))
            .stdout(assertions::has_snapshot_name());

        Ok(())
    }

    #[test]
    fn test_snapshot_list_when_empty() -> anyhow::Result<()> {
        let repo = setup_repo_with_context(&[])?;

        repo.skillsmith()?
            .args(["snapshot", "--list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No snapshots found."));

        assert!(!repo.snapshots().exists());

        Ok(())
    }

    #[test]
    fn test_snapshot_restore_brings_back_context() -> anyhow::Result<()> {
        let repo = setup_repo_with_context(&["rust"])?;

        repo.skillsmith()?.arg("snapshot").assert().success();
        let snapshot = snapshot_files(&repo)?.remove(0);

        create_file(&repo.path, ".agent/STATE.md", "overwritten\n")?;
        std::fs::remove_dir_all(repo.agent().join("skills/rust"))?;

        repo.skillsmith()?
            .args(["snapshot", "--restore", snapshot.as_str()])
            .assert()
            .success()
            .stdout(predicate::str::contains(format!("Restoring {snapshot}")))
            .stdout(predicate::str::contains(format!("Restored {snapshot}")));

        assert_eq!(
            read_file(&repo.path, ".agent/STATE.md")?,
            "# Current task\nparser rewrite\n"
        );
        assert!(repo.agent().join("skills/rust/SKILL.md").is_file());

        Ok(())
    }

    #[test]
    fn test_snapshot_restore_missing_reference() -> anyhow::Result<()> {
        let repo = setup_repo_with_context(&["rust"])?;

        repo.skillsmith()?
            .args(["snapshot", "--restore", "missing.zip"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Snapshot not found:"))
            .stdout(predicate::str::contains("missing.zip"));

        assert_eq!(
            read_file(&repo.path, ".agent/STATE.md")?,
            "# Current task\nparser rewrite\n"
        );
        assert!(snapshot_files(&repo)?.is_empty());

        Ok(())
    }
}

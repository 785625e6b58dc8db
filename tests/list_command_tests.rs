use assert_cmd::prelude::*;
use predicates::prelude::*;

mod common;
use common::{fixtures::*, repository::*};

#[cfg(test)]
mod list_command_tests {
    use super::*;

    #[test]
    fn test_list_shows_all_skills() -> anyhow::Result<()> {
        let repo = create_repo_with_catalog()?;

        repo.skillsmith()?
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("Available Skills (catalog)"))
            .stdout(predicate::str::contains("react-patterns"))
            .stdout(predicate::str::contains("rust-errors"))
            .stdout(predicate::str::contains("threat-model"))
            .stdout(predicate::str::contains("react, frontend, typescript, hooks +1"))
            .stdout(predicate::str::contains("Showing 3 skill(s)."));

        Ok(())
    }

    #[test]
    fn test_list_filters_by_tag_case_insensitively() -> anyhow::Result<()> {
        let repo = create_repo_with_catalog()?;

        repo.skillsmith()?
            .args(["list", "--tag", "FRONTEND"])
            .assert()
            .success()
            .stdout(predicate::str::contains("tag: FRONTEND"))
            .stdout(predicate::str::contains("react-patterns"))
            .stdout(predicate::str::contains("threat-model"))
            .stdout(predicate::str::contains("rust-errors").not())
            .stdout(predicate::str::contains("Showing 2 skill(s)."));

        Ok(())
    }

    #[test]
    fn test_list_filters_by_category() -> anyhow::Result<()> {
        let repo = create_repo_with_catalog()?;

        repo.skillsmith()?
            .args(["list", "--category", "security"])
            .assert()
            .success()
            .stdout(predicate::str::contains("threat-model"))
            .stdout(predicate::str::contains("Showing 1 skill(s)."));

        Ok(())
    }

    #[test]
    fn test_list_categories_and_popular_tags() -> anyhow::Result<()> {
        let repo = create_repo_with_catalog()?;

        repo.skillsmith()?
            .args(["list", "--list-categories"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Available Categories"))
            .stdout(predicate::str::contains("- development"))
            .stdout(predicate::str::contains("- security"))
            .stdout(predicate::str::contains("- frontend  (2 skills)"));

        Ok(())
    }

    #[test]
    fn test_list_reads_catalog_from_flag() -> anyhow::Result<()> {
        let repo = setup_repo_with_context(&[])?;
        create_file(&repo.path, "shared/skills.json", CATALOG_JSON)?;

        repo.skillsmith()?
            .args(["list", "--catalog", "shared/skills.json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Showing 3 skill(s)."));

        Ok(())
    }

    #[test]
    fn test_list_without_catalog_fails() -> anyhow::Result<()> {
        let repo = setup_repo_with_context(&[])?;

        repo.skillsmith()?
            .arg("list")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Skill catalog not found or empty"));

        Ok(())
    }
}

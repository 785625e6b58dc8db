//! Test data for catalog scenarios

#![allow(dead_code)]

use super::repository::*;
use skillsmith::core::error::Result;

pub const CATALOG_JSON: &str = r#"{
    "categories": ["development", "security"],
    "skills": {
        "react-patterns": {
            "category": "development",
            "tags": ["react", "frontend", "typescript", "hooks", "testing"],
            "description": "Component and hook patterns for large React codebases"
        },
        "rust-errors": {
            "category": "development",
            "tags": ["rust", "errors"],
            "description": "Error handling with thiserror and anyhow"
        },
        "threat-model": {
            "category": "security",
            "tags": ["review", "frontend"],
            "description": "Threat modelling checklist"
        }
    }
}"#;

/// Scenario: repository with a context directory and the sample catalog at
/// `.agent/catalog.json`
pub fn create_repo_with_catalog() -> Result<TestRepo> {
    let repo = setup_repo_with_context(&[])?;
    create_file(&repo.path, ".agent/catalog.json", CATALOG_JSON)?;
    Ok(repo)
}

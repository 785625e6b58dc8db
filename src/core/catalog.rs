//! Skill catalog loading and filtering.
//!
//! The catalog is a JSON document mapping skill names to their category, tags and
//! description. Its schema is not validated: unknown fields are ignored and
//! missing ones default to empty values.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Characters of a description shown before it is cut off
pub const DESCRIPTION_LIMIT: usize = 72;

/// Tags shown per row before the remainder is summarised as `+N`
pub const TAG_LIMIT: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogSkill {
    pub category: String,
    pub tags: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub categories: Vec<String>,
    pub skills: BTreeMap<String, CatalogSkill>,
}

/// Source of the skill catalog. `None` means the catalog is unavailable.
pub trait CatalogProvider {
    fn load(&self) -> Option<Catalog>;
}

/// Catalog read from a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogProvider for JsonCatalog {
    fn load(&self) -> Option<Catalog> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                log::debug!("Cannot read catalog {}: {e}", self.path.display());
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                log::warn!("Ignoring malformed catalog {}: {e}", self.path.display());
                None
            }
        }
    }
}

/// Row filters for [`Catalog::filter`]
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Exact category match
    pub category: Option<String>,
    /// Case-insensitive tag match
    pub tag: Option<String>,
}

impl CatalogFilter {
    pub fn matches(&self, skill: &CatalogSkill) -> bool {
        if let Some(category) = &self.category {
            if &skill.category != category {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            let tag = tag.to_lowercase();
            if !skill.tags.iter().any(|t| t.to_lowercase() == tag) {
                return false;
            }
        }
        true
    }
}

impl Catalog {
    /// Skills passing `filter`, sorted by name
    pub fn filter<'a>(
        &'a self,
        filter: &'a CatalogFilter,
    ) -> impl Iterator<Item = (&'a String, &'a CatalogSkill)> + 'a {
        self.skills
            .iter()
            .filter(move |(_, skill)| filter.matches(skill))
    }

    /// The `limit` most used tags with their counts, most frequent first and
    /// alphabetical among equals.
    pub fn popular_tags(&self, limit: usize) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for skill in self.skills.values() {
            for tag in &skill.tags {
                *counts.entry(tag.as_str()).or_default() += 1;
            }
        }

        let mut tags: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        tags.truncate(limit);
        tags
    }
}

/// First [`TAG_LIMIT`] tags joined with commas, plus `+N` for the rest
pub fn summarize_tags(tags: &[String]) -> String {
    let mut summary = tags
        .iter()
        .take(TAG_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if tags.len() > TAG_LIMIT {
        summary.push_str(&format!(" +{}", tags.len() - TAG_LIMIT));
    }
    summary
}

/// Description cut to [`DESCRIPTION_LIMIT`] characters with a trailing `...`
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_LIMIT {
        let cut: String = description.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{cut}...")
    } else {
        description.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CATALOG: &str = r#"{
        "categories": ["development", "security"],
        "skills": {
            "react-patterns": {
                "category": "development",
                "tags": ["React", "frontend"],
                "description": "Component patterns"
            },
            "audit": {
                "category": "security",
                "tags": ["review", "frontend"],
                "description": "Security review checklist",
                "extra": "ignored"
            },
            "bare": {}
        }
    }"#;

    fn catalog() -> Catalog {
        serde_json::from_str(CATALOG).unwrap()
    }

    fn names(catalog: &Catalog, filter: &CatalogFilter) -> Vec<String> {
        catalog.filter(filter).map(|(name, _)| name.clone()).collect()
    }

    #[test]
    fn test_missing_fields_default() {
        let catalog = catalog();
        assert_eq!(catalog.skills["bare"], CatalogSkill::default());
    }

    #[test]
    fn test_unfiltered_listing_is_sorted_by_name() {
        let catalog = catalog();
        assert_eq!(
            names(&catalog, &CatalogFilter::default()),
            vec!["audit", "bare", "react-patterns"]
        );
    }

    #[test]
    fn test_category_and_tag_filters() {
        let catalog = catalog();

        let by_category = CatalogFilter {
            category: Some("security".to_string()),
            tag: None,
        };
        assert_eq!(names(&catalog, &by_category), vec!["audit"]);

        let by_tag = CatalogFilter {
            category: None,
            tag: Some("react".to_string()),
        };
        assert_eq!(names(&catalog, &by_tag), vec!["react-patterns"]);

        let both = CatalogFilter {
            category: Some("development".to_string()),
            tag: Some("review".to_string()),
        };
        assert!(names(&catalog, &both).is_empty());
    }

    #[test]
    fn test_popular_tags_by_frequency_then_name() {
        let tags = catalog().popular_tags(2);
        assert_eq!(
            tags,
            vec![("frontend".to_string(), 2), ("React".to_string(), 1)]
        );
    }

    #[test]
    fn test_summarize_tags() {
        let tags: Vec<String> = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(summarize_tags(&tags), "a, b, c, d +2");
        assert_eq!(summarize_tags(&tags[..2]), "a, b");
    }

    #[test]
    fn test_truncate_description() {
        let long = "x".repeat(80);
        assert_eq!(truncate_description(&long), format!("{}...", "x".repeat(72)));
        assert_eq!(truncate_description("short"), "short");
    }

    #[test]
    fn test_json_catalog_unavailable() {
        let dir = TempDir::new().unwrap();
        let missing = JsonCatalog::new(dir.path().join("catalog.json"));
        assert!(missing.load().is_none());

        let broken_path = dir.path().join("broken.json");
        std::fs::write(&broken_path, "[1, 2").unwrap();
        assert!(JsonCatalog::new(broken_path).load().is_none());
    }

    #[test]
    fn test_json_catalog_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, CATALOG).unwrap();

        let catalog = JsonCatalog::new(&path).load().unwrap();
        assert_eq!(catalog.categories, vec!["development", "security"]);
        assert_eq!(catalog.skills.len(), 3);
    }
}

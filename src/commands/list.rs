use crate::core::{
    catalog::{summarize_tags, truncate_description, CatalogFilter, CatalogProvider, JsonCatalog},
    config::{Settings, CONTEXT_DIR},
    error::{Result, SkillsmithError},
    print_section_header,
};
use clap::Parser;
use colored::*;
use std::env;
use std::path::{Path, PathBuf};

/// How many tags `--list-categories` shows
const POPULAR_TAG_COUNT: usize = 20;

#[derive(Parser, Debug, Default)]
pub struct ListArgs {
    /// Filter by category (e.g. development, security, data-ai)
    #[arg(long)]
    pub category: Option<String>,

    /// Filter by tag, case-insensitive (e.g. react, python, aws)
    #[arg(long)]
    pub tag: Option<String>,

    /// Show all available categories and popular tags
    #[arg(long)]
    pub list_categories: bool,

    /// Skill catalog JSON to read [default: .agent/catalog.json]
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

/// Catalog location: flag, then config, then the context directory
pub fn catalog_path(workdir: &Path, args: &ListArgs, settings: &Settings) -> PathBuf {
    args.catalog
        .clone()
        .or_else(|| settings.catalog_path.clone())
        .map(|path| workdir.join(path))
        .unwrap_or_else(|| workdir.join(CONTEXT_DIR).join("catalog.json"))
}

pub fn execute_list(args: ListArgs, settings: &Settings) -> Result<()> {
    let current_dir = env::current_dir()?;
    let catalog = JsonCatalog::new(catalog_path(&current_dir, &args, settings));
    run_list(&catalog, catalog.path(), &args)
}

/// Prints the catalog served by `provider`; `source` names it in errors.
pub fn run_list(provider: &dyn CatalogProvider, source: &Path, args: &ListArgs) -> Result<()> {
    let catalog = provider
        .load()
        .filter(|catalog| args.list_categories || !catalog.skills.is_empty())
        .ok_or_else(|| SkillsmithError::catalog_unavailable(source))?;

    if args.list_categories {
        print_section_header("Available Categories");
        for category in &catalog.categories {
            println!("  - {}", category.cyan());
        }

        print_section_header("Popular Tags (use with --tag)");
        for (tag, count) in catalog.popular_tags(POPULAR_TAG_COUNT) {
            println!(
                "  - {}  {}",
                tag.cyan(),
                format!("({count} skills)").bright_black()
            );
        }

        println!(
            "\n{}\n",
            "Filter with: skillsmith list --category <name>  or  skillsmith list --tag <name>"
                .bright_black()
        );
        return Ok(());
    }

    let filter = CatalogFilter {
        category: args.category.clone(),
        tag: args.tag.clone(),
    };

    let mut title = "Available Skills (catalog)".to_string();
    if let Some(category) = &filter.category {
        title.push_str(&format!(" - category: {category}"));
    }
    if let Some(tag) = &filter.tag {
        title.push_str(&format!(" - tag: {tag}"));
    }

    let rows: Vec<(String, String, String, String)> = catalog
        .filter(&filter)
        .map(|(name, skill)| {
            (
                name.clone(),
                skill.category.clone(),
                summarize_tags(&skill.tags),
                truncate_description(&skill.description),
            )
        })
        .collect();

    print_section_header(&title);

    let name_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(0).max(5);
    let category_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(0).max(8);
    let tags_width = rows.iter().map(|r| r.2.len()).max().unwrap_or(0).max(4);

    println!(
        "  {:<name_width$}  {:<category_width$}  {:<tags_width$}  {}",
        "Skill".magenta().bold(),
        "Category".magenta().bold(),
        "Tags".magenta().bold(),
        "Description".magenta().bold()
    );
    for (name, category, tags, description) in &rows {
        println!(
            "  {:<name_width$}  {:<category_width$}  {:<tags_width$}  {}",
            name.cyan(),
            category.magenta(),
            tags.bright_black(),
            description.white()
        );
    }

    println!(
        "\n{}\n",
        format!("Showing {} skill(s).", rows.len()).bright_black()
    );

    Ok(())
}

use crate::core::{
    config::CONTEXT_DIR,
    error::{Result, SkillsmithError},
    print_detail, print_info, print_section_header, print_success,
    snapshot::{SavedSnapshot, SnapshotStore},
};
use clap::Parser;
use colored::*;
use std::env;
use std::path::Path;

#[derive(Parser, Debug, Default)]
pub struct SnapshotArgs {
    /// Optional note to embed in the snapshot
    #[arg(short, long, default_value = "")]
    pub note: String,

    /// List existing snapshots
    #[arg(long)]
    pub list: bool,

    /// Restore a snapshot by file name (or absolute path)
    #[arg(long, value_name = "SNAPSHOT")]
    pub restore: Option<String>,
}

pub fn execute_snapshot(args: SnapshotArgs) -> Result<()> {
    let current_dir = env::current_dir()?;
    run_snapshot(&current_dir, args)
}

/// Runs the snapshot command against the `.agent/` directory below `workdir`.
pub fn run_snapshot(workdir: &Path, args: SnapshotArgs) -> Result<()> {
    let context_root = workdir.join(CONTEXT_DIR);
    if !context_root.is_dir() {
        return Err(SkillsmithError::context_not_found(context_root));
    }

    let store = SnapshotStore::new(context_root);

    if args.list {
        return list_snapshots(&store);
    }

    if let Some(reference) = args.restore {
        return restore_snapshot(&store, &reference);
    }

    let saved = store.save(&args.note)?;
    print_saved(&saved, &args.note);
    Ok(())
}

fn list_snapshots(store: &SnapshotStore) -> Result<()> {
    let snapshots = store.list()?;

    if snapshots.is_empty() {
        print_info("No snapshots found.");
        return Ok(());
    }

    print_section_header(&format!("Snapshots: {}", store.namespace().display()));

    let name_width = snapshots
        .iter()
        .map(|s| s.filename.len())
        .max()
        .unwrap_or(0);

    println!(
        "  {:<name_width$}  {:>10}  {}",
        "File".white(),
        "Size".white(),
        "Note".white()
    );
    for snapshot in &snapshots {
        println!(
            "  {:<name_width$}  {:>10}  {}",
            snapshot.filename.cyan(),
            format!("{:.1} KB", snapshot.size_kb()),
            snapshot.note.bright_black()
        );
    }
    println!();

    Ok(())
}

fn restore_snapshot(store: &SnapshotStore, reference: &str) -> Result<()> {
    let snapshot = store.find(reference)?;
    println!("\n{}", format!("Restoring {} ...", snapshot.filename).yellow());

    store.extract(&snapshot)?;
    print_success(&format!("Restored {}", snapshot.filename));
    Ok(())
}

fn print_saved(saved: &SavedSnapshot, note: &str) {
    let snapshot = &saved.snapshot;
    print_success(&format!("Snapshot saved: {}", snapshot.filename.bold()));
    print_detail(
        "Files",
        &format!(
            "{}  |  Size: {:.1} KB",
            saved.file_count,
            snapshot.size_kb()
        ),
    );
    if !note.is_empty() {
        print_detail("Note", note);
    }
    print_detail("Path", &snapshot.path.display().to_string());
    println!();
}

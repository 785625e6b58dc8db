//! Zip archive codec for directory trees.
//!
//! Maps a directory tree on disk to a single deflate-compressed zip archive and
//! back. Entry names are relative to the *parent* of the archived root, so an
//! archive of `/work/.agent` contains `.agent/STATE.md` and extracting it into
//! `/work` reconstructs the directory under its own name.
//!
//! # Public API
//! - [`archive_entries`]: Filtered, path-ordered traversal of a source tree
//! - [`create_archive`]: Write an archive with an optional archive-level note
//! - [`read_note`]: Best-effort read of the archive comment
//! - [`extract_all`]: Expand every entry into a destination directory
//!
//! Only files (including symlinks to files) are stored; empty directories are
//! not preserved.

use crate::core::error::{Result, SkillsmithError};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// A file selected for archiving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Absolute path on disk
    pub source: PathBuf,
    /// Name stored in the archive, `/`-separated
    pub name: String,
}

/// Result of a successful [`create_archive`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedArchive {
    pub path: PathBuf,
    pub file_count: usize,
}

/// Walks `source_root` in path order and yields every file whose path below
/// the root does not contain one of the `exclude` component names.
///
/// Excluded directories are pruned, not descended into. Symlinked files count
/// as files; symlinked directories are not followed.
pub fn archive_entries<'a>(
    source_root: &'a Path,
    exclude: &'a [&'a str],
) -> impl Iterator<Item = io::Result<ArchiveEntry>> + 'a {
    let name_base = source_root.parent().unwrap_or(source_root);

    WalkDir::new(source_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| !is_excluded(source_root, entry.path(), exclude))
        .filter_map(move |entry| match entry {
            // Symlinks to files are archived with the target's contents
            Ok(entry) if entry.path().is_file() => {
                let source = entry.into_path();
                let name = archive_name(name_base, &source)?;
                Some(Ok(ArchiveEntry { source, name }))
            }
            Ok(_) => None,
            Err(e) => Some(Err(io::Error::from(e))),
        })
}

fn is_excluded(source_root: &Path, path: &Path, exclude: &[&str]) -> bool {
    let Ok(relative) = path.strip_prefix(source_root) else {
        return false;
    };

    relative.components().any(|component| match component {
        Component::Normal(name) => exclude.iter().any(|ex| name == *ex),
        _ => false,
    })
}

fn archive_name(base: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Archives `source_root` into `archive_path`, replacing any existing file.
///
/// A non-empty `note` is stored as the archive comment. An empty source tree
/// produces a valid archive with zero entries. On failure nothing is written at
/// `archive_path` and a previous archive there is left intact.
pub fn create_archive(
    source_root: &Path,
    exclude: &[&str],
    note: &str,
    archive_path: &Path,
) -> Result<CreatedArchive> {
    write_archive(archive_entries(source_root, exclude), note, archive_path)
}

fn write_archive(
    entries: impl Iterator<Item = io::Result<ArchiveEntry>>,
    note: &str,
    archive_path: &Path,
) -> Result<CreatedArchive> {
    let storage_err = |e: io::Error| SkillsmithError::storage_failure(archive_path, e);

    // Built next to the target so the final rename stays on one filesystem
    let staging_dir = archive_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let staging = NamedTempFile::new_in(staging_dir).map_err(storage_err)?;

    let mut writer = ZipWriter::new(staging);
    if !note.is_empty() {
        writer.set_comment(note.to_string());
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut file_count = 0;

    for entry in entries {
        let entry = entry.map_err(storage_err)?;
        let contents = fs::read(&entry.source)
            .map_err(|e| SkillsmithError::storage_failure(&entry.source, e))?;

        writer
            .start_file(entry.name.clone(), options)
            .map_err(|e| storage_err(e.into()))?;
        writer.write_all(&contents).map_err(storage_err)?;

        log::debug!("Archived {} as {}", entry.source.display(), entry.name);
        file_count += 1;
    }

    let staging = writer.finish().map_err(|e| storage_err(e.into()))?;
    staging
        .persist(archive_path)
        .map_err(|e| storage_err(e.error))?;

    Ok(CreatedArchive {
        path: archive_path.to_path_buf(),
        file_count,
    })
}

/// Returns the archive comment, or an empty string when it is absent or the
/// archive cannot be read.
pub fn read_note(archive_path: &Path) -> String {
    let archive = File::open(archive_path)
        .map_err(zip::result::ZipError::from)
        .and_then(ZipArchive::new);

    match archive {
        Ok(archive) => String::from_utf8_lossy(archive.comment()).into_owned(),
        Err(e) => {
            log::debug!("Could not read note from {}: {e}", archive_path.display());
            String::new()
        }
    }
}

/// Expands every entry of `archive_path` below `destination`, creating
/// directories as needed. Existing files are overwritten; when two entries map
/// to the same path the later one wins.
///
/// Files written before a failure stay on disk. Returns the number of files
/// written.
pub fn extract_all(archive_path: &Path, destination: &Path) -> Result<usize> {
    let corrupt = |reason: String| SkillsmithError::archive_corrupt(archive_path, reason);

    let file = File::open(archive_path).map_err(|e| corrupt(e.to_string()))?;
    let mut archive = ZipArchive::new(file).map_err(|e| corrupt(e.to_string()))?;
    let mut written = 0;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| corrupt(e.to_string()))?;
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| corrupt(format!("unsafe entry name '{}'", entry.name())))?;
        let target = destination.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| SkillsmithError::storage_failure(&target, e))?;
            continue;
        }

        let mut contents = Vec::new();
        entry
            .read_to_end(&mut contents)
            .map_err(|e| corrupt(format!("cannot decode '{}': {e}", entry.name())))?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SkillsmithError::storage_failure(parent, e))?;
        }
        fs::write(&target, contents).map_err(|e| SkillsmithError::storage_failure(&target, e))?;
        written += 1;
    }

    Ok(written)
}

use crate::core::{
    config::{Settings, CONTEXT_DIR, SKILLS_DIR},
    error::{Result, SkillsmithError},
    output::{ConsoleReporter, Level, Reporter},
    print_section_header, print_success,
    snapshot::SnapshotStore,
    state::{scan_skills, state_age_hours},
};
use chrono::Utc;
use std::env;
use std::path::{Path, PathBuf};

const BIN_NAME: &str = "skillsmith";

pub fn execute_doctor(settings: &Settings) -> Result<()> {
    let current_dir = env::current_dir()?;
    run_doctor(&current_dir, settings, &ConsoleReporter::new())
}

/// Checks the executable's reachability and the context layout below
/// `workdir`. Fails if any check failed.
pub fn run_doctor(workdir: &Path, settings: &Settings, reporter: &dyn Reporter) -> Result<()> {
    let mut failed = 0;

    print_section_header("Executable PATH");
    if !check_path(reporter) {
        failed += 1;
    }

    print_section_header("Agent context");
    failed += check_context(workdir, settings, reporter);

    if failed > 0 {
        return Err(SkillsmithError::DoctorChecksFailed { failed });
    }

    print_success("All checks passed\n");
    Ok(())
}

fn check_path(reporter: &dyn Reporter) -> bool {
    if let Ok(found) = which::which(BIN_NAME) {
        reporter.emit(
            Level::Ok,
            &format!("'{BIN_NAME}' command is on your PATH ({})", found.display()),
        );
        return true;
    }

    reporter.emit(Level::Error, &format!("'{BIN_NAME}' is NOT on your PATH"));

    let expected = expected_install_dir();
    match &expected {
        Some(dir) => reporter.emit(Level::Info, &format!("Expected location: {}", dir.display())),
        None => reporter.emit(Level::Info, "Expected location: unknown"),
    }

    let dir = expected
        .map(|d| d.display().to_string())
        .unwrap_or_else(|| "<install dir>".to_string());
    let tip = if cfg!(windows) {
        format!("Tip: run this to fix permanently: setx PATH \"%PATH%;{dir}\"")
    } else {
        format!("Tip: add this to your shell profile: export PATH=\"$PATH:{dir}\"")
    };
    reporter.emit(Level::Warn, &tip);

    false
}

fn expected_install_dir() -> Option<PathBuf> {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// Returns the number of failed checks
fn check_context(workdir: &Path, settings: &Settings, reporter: &dyn Reporter) -> usize {
    let context_root = workdir.join(CONTEXT_DIR);
    if !context_root.is_dir() {
        reporter.emit(
            Level::Error,
            &format!(
                "{} not found. Run: skillsmith init",
                context_root.display()
            ),
        );
        return 1;
    }
    reporter.emit(
        Level::Ok,
        &format!("Context directory: {}", context_root.display()),
    );

    let mut failed = 0;

    let state_path = workdir.join(&settings.watch.state_file);
    match state_age_hours(&state_path, Utc::now()) {
        Some(age) if age > settings.watch.stale_hours => reporter.emit(
            Level::Warn,
            &format!(
                "{} is stale ({age:.1}h old > {}h limit)",
                state_path.display(),
                settings.watch.stale_hours
            ),
        ),
        Some(age) => reporter.emit(
            Level::Ok,
            &format!("{} updated {age:.1}h ago", state_path.display()),
        ),
        None => {
            reporter.emit(
                Level::Error,
                &format!("State file missing: {}", state_path.display()),
            );
            failed += 1;
        }
    }

    let skills_root = context_root.join(SKILLS_DIR);
    match scan_skills(&skills_root) {
        Ok(skills) => reporter.emit(
            Level::Ok,
            &format!("{} skill(s) installed in {}", skills.len(), skills_root.display()),
        ),
        Err(e) => {
            reporter.emit(
                Level::Error,
                &format!("Cannot read {}: {e}", skills_root.display()),
            );
            failed += 1;
        }
    }

    let store = SnapshotStore::new(&context_root);
    match store.list() {
        Ok(snapshots) => {
            let latest = snapshots
                .first()
                .map(|s| format!(", latest {}", s.filename))
                .unwrap_or_default();
            reporter.emit(
                Level::Ok,
                &format!("{} snapshot(s){latest}", snapshots.len()),
            );
        }
        Err(e) => {
            reporter.emit(Level::Error, &e.to_string());
            failed += 1;
        }
    }

    failed
}

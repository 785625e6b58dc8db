use crate::core::{
    config::{Settings, WatchSettings, CONTEXT_DIR, SKILLS_DIR},
    error::Result,
    git::GitInspector,
    monitor::{DriftMonitor, MonitorConfig},
    output::{ConsoleReporter, Level, Reporter},
    state::RepositorySampler,
};
use clap::Parser;
use colored::*;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug, Default)]
pub struct WatchArgs {
    /// Poll interval in seconds [default: 30]
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Path to the state file to monitor [default: .agent/STATE.md]
    #[arg(long, value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Hours before the state file is considered stale [default: 24]
    #[arg(long, value_name = "HOURS")]
    pub stale_hours: Option<f64>,

    /// Stop after this many polls instead of running until interrupted
    #[arg(long, value_name = "N")]
    pub ticks: Option<u64>,
}

impl WatchArgs {
    /// Command-line values layered over the configured ones
    pub fn resolve(&self, configured: &WatchSettings) -> Result<WatchSettings> {
        let settings = WatchSettings {
            interval_secs: self.interval.unwrap_or(configured.interval_secs),
            state_file: self
                .state_file
                .clone()
                .unwrap_or_else(|| configured.state_file.clone()),
            stale_hours: self.stale_hours.unwrap_or(configured.stale_hours),
        };
        settings.validate()?;
        Ok(settings)
    }
}

pub fn execute_watch(args: WatchArgs, settings: &Settings) -> Result<()> {
    let current_dir = env::current_dir()?;
    let watch = args.resolve(&settings.watch)?;

    let stop = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&stop);
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))?;

    run_watch(&current_dir, &watch, args.ticks, &stop);
    Ok(())
}

/// Watches `workdir` until `stop` is raised or `max_ticks` polls have run.
pub fn run_watch(
    workdir: &Path,
    watch: &WatchSettings,
    max_ticks: Option<u64>,
    stop: &AtomicBool,
) {
    let state_path = workdir.join(&watch.state_file);
    let skills_root = workdir.join(CONTEXT_DIR).join(SKILLS_DIR);
    let state_label = state_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| watch.state_file.display().to_string());

    print_banner(&state_path, watch);

    let sampler =
        RepositorySampler::new(workdir, &state_path, skills_root, GitInspector::default());
    let reporter = ConsoleReporter::with_timestamps();
    if let Some(branch) = sampler.branch() {
        reporter.emit(Level::Info, &format!("Branch: {branch}"));
    }

    let config = MonitorConfig {
        interval: Duration::from_secs(watch.interval_secs),
        stale_hours: watch.stale_hours,
        state_label,
        max_ticks,
    };
    let mut monitor = DriftMonitor::new(sampler, config);
    monitor.run(&reporter, stop);

    log::debug!("Watch loop ended after {} tick(s)", monitor.ticks());
    println!("\n{}", "Watch stopped.".bright_black());
}

fn print_banner(state_path: &Path, watch: &WatchSettings) {
    println!(
        "\n{} - monitoring context drift",
        "skillsmith watch".cyan().bold()
    );
    println!(
        "  State file:  {}",
        state_path.display().to_string().bright_black()
    );
    println!("  Poll:        every {}s", watch.interval_secs);
    println!("  Stale after: {}h", watch.stale_hours);
    println!("  Press {} to stop.\n", "Ctrl+C".bold());
}

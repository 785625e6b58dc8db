use clap::{Parser, Subcommand};
use skillsmith::commands::*;
use skillsmith::core::{
    config::Settings,
    error::Result,
    print_error,
};
use std::env;

#[derive(Parser)]
#[command(name = "skillsmith")]
#[command(about = "Keep your agent context in sync with your repository")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save, list or restore snapshots of your .agent/ context
    Snapshot(SnapshotArgs),
    /// Watch for context drift and keep your agent state fresh
    Watch(WatchArgs),
    /// List available skills from the catalog
    List(ListArgs),
    /// Diagnose your installation and context layout
    Doctor,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = run(cli.command) {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Snapshot(args) => execute_snapshot(args),
        Commands::Watch(args) => execute_watch(args, &Settings::load()?),
        Commands::List(args) => execute_list(args, &Settings::load()?),
        Commands::Doctor => execute_doctor(&Settings::load()?),
    }
}

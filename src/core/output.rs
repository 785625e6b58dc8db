//! Unified output formatting utilities for consistent CLI presentation.
//!
//! This module provides standardized formatting functions for all skillsmith output,
//! ensuring consistent colors, spacing, and message structure across commands.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, yellow for warnings, green for success
//! - **Leveled lines**: Long-running commands report through a [`Reporter`]
//! - **User-friendly formatting**: Clear visual hierarchy and readable output

use chrono::Local;
use colored::*;

/// Severity of a reported line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Ok,
    Warn,
    Error,
}

impl Level {
    fn tag(self) -> ColoredString {
        match self {
            Level::Info => "[..]".bright_black(),
            Level::Ok => "[OK]".green(),
            Level::Warn => "[!!]".yellow(),
            Level::Error => "[--]".red(),
        }
    }
}

/// Sink for single-line, leveled status messages. Fire-and-forget.
pub trait Reporter {
    fn emit(&self, level: Level, text: &str);
}

/// Reporter printing to stdout, optionally prefixing each line with the local
/// wall-clock time.
#[derive(Debug, Default, Clone)]
pub struct ConsoleReporter {
    timestamps: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timestamps() -> Self {
        Self { timestamps: true }
    }
}

impl Reporter for ConsoleReporter {
    fn emit(&self, level: Level, text: &str) {
        let text = match level {
            Level::Info => text.bright_black(),
            _ => text.white(),
        };

        if self.timestamps {
            let now = Local::now().format("%H:%M:%S").to_string();
            println!(
                "{} {} {}",
                format!("[{now}]").bright_black(),
                level.tag(),
                text
            );
        } else {
            println!("{} {}", level.tag(), text);
        }
    }
}

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a success message with consistent styling
///
/// # Format
/// ```text
///
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

/// Formats and prints an informational message with consistent styling
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header with consistent styling
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// Prints an indented `label: value` detail line with a muted value
pub fn print_detail(label: &str, value: &str) {
    println!("     {} {}", format!("{label}:").white(), value.bright_black());
}

//! Output formatting and display utilities
//!
//! Provides colored, formatted output for the CLI

use colored::Colorize;

use crate::store::{BundleStatus, DataStreamStatus};

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{} {}", "⚠".yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", msg.bold().underline());
}

/// Counts of records stored by a parse run
#[derive(Debug, Default, Clone, Copy)]
pub struct ParseSummary {
    pub profiles: usize,
    pub rules: usize,
    pub variables: usize,
}

/// Print the outcome of a parse run
pub fn print_parse_result(status: &BundleStatus, summary: &ParseSummary) {
    header(&format!("Bundle: {}/{}", status.namespace, status.name));

    println!("  {} {}", "content:".dimmed(), status.content_file);
    println!("  {} {}", "profiles:".dimmed(), summary.profiles);
    println!("  {} {}", "rules:".dimmed(), summary.rules);
    println!("  {} {}", "variables:".dimmed(), summary.variables);
    println!();

    match status.data_stream_status {
        DataStreamStatus::Valid => success("Data stream is valid"),
        DataStreamStatus::Invalid => {
            let reason = status.error_message.as_deref().unwrap_or("unknown error");
            error(&format!("Data stream is invalid: {}", reason));
        }
    }
}

/// Print a JSON report
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), serde_json::Error> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a YAML document
pub fn print_yaml<T: serde::Serialize>(value: &T) -> Result<(), serde_yaml::Error> {
    let yaml = serde_yaml::to_string(value)?;
    print!("{}", yaml);
    Ok(())
}

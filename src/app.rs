// Declare modules
pub mod cli;
pub mod config;
pub mod consolidator;
pub mod error;
pub mod filters;
pub mod models;
pub mod paths;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;

use self::cli::Cli;
use self::config::resolve_config;
use self::consolidator::consolidate;
use self::paths::display_path;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();
    init_logger(args.quiet);

    // 2. Resolve source and target against the working directory
    let current_dir = env::current_dir().context("Failed to get current directory")?;

    // 3. Resolve Configuration
    let config = resolve_config(args, &current_dir)?;
    log::debug!("Resolved configuration: {:?}", config);

    // 4. Consolidate
    let report = consolidate(
        &config.source,
        &config.target,
        &config.filter,
        config.on_copy_error,
    )?;

    // 5. Summarize
    for failure in &report.failed {
        log::error!(
            "Not copied: {} -> {} ({})",
            display_path(&failure.source),
            display_path(&failure.target),
            failure.reason
        );
    }
    if report.failed.is_empty() {
        log::info!(
            "File consolidation completed successfully! Copied {} files into {}",
            report.copied.len(),
            display_path(&config.target)
        );
    } else {
        log::warn!(
            "File consolidation finished: copied {} files into {}, {} failed",
            report.copied.len(),
            display_path(&config.target),
            report.failed.len()
        );
    }

    Ok(())
}

fn init_logger(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

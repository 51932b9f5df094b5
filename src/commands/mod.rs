//! Command implementations for proofwatch.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the config and diff loading they share.

mod analyze;
mod report;
mod split;

#[cfg(test)]
mod tests;

use std::path::Path;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::{ProofwatchError, Result};

pub use analyze::{cmd_analyze, run_analyze};
pub use report::{
    ReportSources, build_report, cmd_report, open_issues, post_report, truncate_chars,
};
pub use split::{cmd_split, run_split};

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Analyze(args) => cmd_analyze(&config, &args),
        Command::Split(args) => cmd_split(&args),
        Command::Report(args) => cmd_report(&config, &args),
    }
}

/// Load the configuration file (or defaults) and apply environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_env()?;
    Ok(config)
}

/// Read a diff file. A missing file is a user error.
pub fn read_diff(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        ProofwatchError::UserError(format!(
            "failed to read diff '{}': {}",
            path.display(),
            e
        ))
    })
}

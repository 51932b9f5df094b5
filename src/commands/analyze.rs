//! Implementation of the `proofwatch analyze` command.

use std::path::{Path, PathBuf};

use crate::cli::{AnalyzeArgs, DEFAULT_DIFF_PATH, OutputFormat};
use crate::config::{Config, parse_keyword_list};
use crate::diff::DiffAnalyzer;
use crate::error::{ProofwatchError, Result};
use crate::git;
use crate::report::{format_marker_section, format_metrics_table, format_text};

use super::read_diff;

/// Execute the `proofwatch analyze` command in the current directory.
pub fn cmd_analyze(config: &Config, args: &AnalyzeArgs) -> Result<()> {
    let output = run_analyze(config, args, Path::new("."))?;
    print!("{}", output);
    Ok(())
}

/// Analyze the requested diff and render it in the requested format.
///
/// Relative diff paths and `--base` resolve against `cwd`.
pub fn run_analyze(config: &Config, args: &AnalyzeArgs, cwd: &Path) -> Result<String> {
    let config = with_overrides(config, args)?;

    let diff = match &args.base {
        Some(base) => git::diff_against(cwd, base)?,
        None => {
            let path = args
                .diff
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DIFF_PATH));
            read_diff(&cwd.join(path))?
        }
    };

    let analyzer = DiffAnalyzer::from_config(&config)?;
    let analysis = analyzer.analyze(&diff);

    match args.format {
        OutputFormat::Text => Ok(format_text(&analysis)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&analysis).map_err(|e| {
                ProofwatchError::UserError(format!("failed to serialize analysis: {}", e))
            })?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Markdown => Ok(format!(
            "{}\n---\n\n{}",
            format_metrics_table(&analysis.stats),
            format_marker_section(&analysis.markers, &[], &config.marker_token)
        )),
    }
}

/// Apply `--keywords` and `--extension` on top of the loaded configuration.
fn with_overrides(config: &Config, args: &AnalyzeArgs) -> Result<Config> {
    let mut config = config.clone();

    if !args.keywords.is_empty() {
        config.marker_keywords = parse_keyword_list(&args.keywords.join(","));
    }
    if let Some(extension) = &args.extension {
        config.target_extension = extension.clone();
    }

    config.validate()?;
    Ok(config)
}

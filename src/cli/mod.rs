//! CLI argument parsing for proofwatch.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Default location of the diff when neither `--diff` nor `--base` is given.
pub const DEFAULT_DIFF_PATH: &str = "pr.diff";

/// Proofwatch: track `sorry` placeholders across a pull request diff.
///
/// Reads a unified diff, reports which incomplete-proof markers were added,
/// removed, or moved, and renders the pull request summary comment.
#[derive(Parser, Debug)]
#[command(name = "proofwatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// YAML configuration file. Defaults apply when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for proofwatch.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a diff for added, removed, and affected markers.
    Analyze(AnalyzeArgs),

    /// List the per-file sections of a diff.
    Split(SplitArgs),

    /// Build the pull request summary comment.
    ///
    /// Prints the comment, or upserts it on the pull request with `--post`.
    Report(ReportArgs),
}

/// Output format for `analyze`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

/// Arguments for the `analyze` command.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Diff file to read.
    #[arg(long, conflicts_with = "base")]
    pub diff: Option<PathBuf>,

    /// Compute the diff with `git diff <BASE>..HEAD` in the current directory.
    #[arg(long)]
    pub base: Option<String>,

    /// Declaration keywords, overriding the configuration.
    #[arg(long, value_delimiter = ',')]
    pub keywords: Vec<String>,

    /// Target file extension without the dot (e.g. `lean`).
    #[arg(long)]
    pub extension: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the `split` command.
#[derive(Parser, Debug)]
pub struct SplitArgs {
    /// Diff file to read.
    #[arg(long, default_value = DEFAULT_DIFF_PATH)]
    pub diff: PathBuf,
}

/// Arguments for the `report` command.
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Diff file to read.
    #[arg(long, default_value = DEFAULT_DIFF_PATH)]
    pub diff: PathBuf,

    /// File holding a pre-written overview, used instead of generating one.
    #[arg(long, conflicts_with = "generate")]
    pub summary: Option<PathBuf>,

    /// JSON array of open issues (`[{"number": 1, "body": "..."}]`).
    #[arg(long)]
    pub issues: Option<PathBuf>,

    /// Generate per-file summaries and the overview with the configured generator.
    #[arg(long)]
    pub generate: bool,

    /// Upsert the comment on the pull request through `gh`.
    #[arg(long, requires_all = ["repo", "pr"])]
    pub post: bool,

    /// Repository as `owner/name`.
    #[arg(long)]
    pub repo: Option<String>,

    /// Pull request number.
    #[arg(long)]
    pub pr: Option<u64>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

//! Git command runner for proofwatch.
//!
//! Used to obtain the diff locally (`analyze --base <rev>`) instead of reading
//! a `pr.diff` file prepared by CI.

use crate::error::{ProofwatchError, Result};
use std::path::Path;
use std::process::{Command, Output};

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command, untrimmed.
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Run a git command with the specified working directory.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(ProofwatchError::GitError)` - On spawn failure or non-zero exit code
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let cwd = cwd.as_ref();

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            ProofwatchError::GitError(format!(
                "failed to execute git {}: {}",
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let error_msg = if git_output.stderr.is_empty() {
            git_output.stdout.trim().to_string()
        } else {
            git_output.stderr.clone()
        };

        Err(ProofwatchError::GitError(format!(
            "git {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            exit_code,
            error_msg
        )))
    }
}

/// Unified diff of `HEAD` against `base`, as `git diff {base}..HEAD` prints it.
pub fn diff_against<P: AsRef<Path>>(cwd: P, base: &str) -> Result<String> {
    let range = format!("{}..HEAD", base);
    let output = run_git(cwd, &["diff", "--no-color", "--no-ext-diff", &range])?;
    tracing::debug!(range = %range, bytes = output.stdout.len(), "collected diff from git");
    Ok(output.stdout)
}

//! `Forge` implementation on top of the GitHub CLI (`gh`).
//!
//! Authentication is whatever `gh` is configured with (`GH_TOKEN` /
//! `GITHUB_TOKEN` in CI).

use std::process::Command;

use serde::de::DeserializeOwned;

use super::{Comment, Forge, Issue, PullRequest};
use crate::error::{ProofwatchError, Result};

/// A pull request addressed through `gh`.
#[derive(Debug, Clone)]
pub struct GhForge {
    repo: String,
    pr_number: u64,
    program: String,
}

impl GhForge {
    /// `repo` is `owner/name`.
    pub fn new(repo: impl Into<String>, pr_number: u64) -> Result<Self> {
        let repo = repo.into();
        match repo.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {}
            _ => {
                return Err(ProofwatchError::UserError(format!(
                    "invalid repository '{}': expected 'owner/name'",
                    repo
                )));
            }
        }

        Ok(Self {
            repo,
            pr_number,
            program: "gh".to_string(),
        })
    }

    /// Use a different executable in place of `gh`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| {
                ProofwatchError::ForgeError(format!(
                    "failed to execute {} {}: {}\n\
                     Fix: install the GitHub CLI and authenticate it.",
                    self.program,
                    args.first().unwrap_or(&""),
                    e
                ))
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if output.status.success() {
            return Ok(stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(ProofwatchError::ForgeError(format!(
            "{} {} failed (exit code {}): {}",
            self.program,
            args.first().unwrap_or(&""),
            output.status.code().unwrap_or(-1),
            if stderr.is_empty() {
                stdout.trim()
            } else {
                stderr.as_str()
            }
        )))
    }

    fn run_json<T: DeserializeOwned>(&self, args: &[&str]) -> Result<T> {
        let stdout = self.run(args)?;
        serde_json::from_str(&stdout).map_err(|e| {
            ProofwatchError::ForgeError(format!("unexpected output from {}: {}", self.program, e))
        })
    }
}

impl Forge for GhForge {
    fn pull_request(&self) -> Result<PullRequest> {
        let number = self.pr_number.to_string();
        self.run_json(&[
            "pr", "view", &number, "--repo", &self.repo, "--json", "title,body",
        ])
    }

    fn list_open_issues(&self, label: &str) -> Result<Vec<Issue>> {
        self.run_json(&[
            "issue", "list", "--repo", &self.repo, "--state", "open", "--label", label,
            "--limit", "1000", "--json", "number,body",
        ])
    }

    fn list_comments(&self) -> Result<Vec<Comment>> {
        let path = format!("repos/{}/issues/{}/comments", self.repo, self.pr_number);
        let stdout = self.run(&["api", "--paginate", &path])?;
        parse_paginated(&stdout)
    }

    fn create_comment(&self, body: &str) -> Result<()> {
        let path = format!("repos/{}/issues/{}/comments", self.repo, self.pr_number);
        let field = format!("body={}", body);
        self.run(&["api", "-X", "POST", &path, "-f", &field])?;
        Ok(())
    }

    fn edit_comment(&self, comment_id: u64, body: &str) -> Result<()> {
        let path = format!("repos/{}/issues/comments/{}", self.repo, comment_id);
        let field = format!("body={}", body);
        self.run(&["api", "-X", "PATCH", &path, "-f", &field])?;
        Ok(())
    }
}

/// `gh api --paginate` prints one JSON array per page back to back.
pub(super) fn parse_paginated<T: DeserializeOwned>(stdout: &str) -> Result<Vec<T>> {
    let mut items = Vec::new();
    for page in serde_json::Deserializer::from_str(stdout).into_iter::<Vec<T>>() {
        let page = page.map_err(|e| {
            ProofwatchError::ForgeError(format!("unexpected output from gh api: {}", e))
        })?;
        items.extend(page);
    }
    Ok(items)
}

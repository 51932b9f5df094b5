//! Config loading, environment overrides, and validation.

use super::model::Config;
use super::types::{
    ENV_GENERATOR_COMMAND, ENV_KEYWORDS, ENV_MODEL, ENV_STYLE_GUIDE_PATH, parse_keyword_list,
};
use crate::diff::MarkerSyntax;
use crate::error::{ProofwatchError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(ProofwatchError::UserError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ProofwatchError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
            ProofwatchError::UserError(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            ProofwatchError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = lookup(ENV_KEYWORDS) {
            self.marker_keywords = parse_keyword_list(&raw);
        }
        if let Some(model) = lookup(ENV_MODEL) {
            self.model = model.trim().to_string();
        }
        if let Some(path) = lookup(ENV_STYLE_GUIDE_PATH) {
            self.style_guide_path = Some(path);
        }
        if let Some(command) = lookup(ENV_GENERATOR_COMMAND) {
            self.generator_command = Some(command);
        }

        self.validate()
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `marker_keywords` must be non-empty with non-empty entries
    /// - `marker_token`, `comment_opener`, `definition_operator` must be non-empty
    /// - `target_extension` must be non-empty and have no leading dot
    /// - `max_diff_chars` and `generator_timeout_seconds` must be positive
    pub fn validate(&self) -> Result<()> {
        if self.marker_keywords.is_empty() {
            return Err(invalid("marker_keywords must not be empty"));
        }
        if self.marker_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(invalid("marker_keywords entries must be non-empty"));
        }

        for (name, value) in [
            ("marker_token", &self.marker_token),
            ("comment_opener", &self.comment_opener),
            ("definition_operator", &self.definition_operator),
            ("target_extension", &self.target_extension),
        ] {
            if value.is_empty() {
                return Err(invalid(&format!("{} must not be empty", name)));
            }
        }

        if self.target_extension.starts_with('.') {
            return Err(invalid(&format!(
                "target_extension must not have a leading dot (found '{}'). Use '{}' instead.",
                self.target_extension,
                self.target_extension.trim_start_matches('.')
            )));
        }

        if self.max_diff_chars == 0 {
            return Err(invalid("max_diff_chars must be greater than 0"));
        }
        if self.generator_timeout_seconds == 0 {
            return Err(invalid("generator_timeout_seconds must be greater than 0"));
        }

        Ok(())
    }

    /// Token conventions used by the diff analyzer.
    pub fn marker_syntax(&self) -> MarkerSyntax {
        MarkerSyntax {
            marker_token: self.marker_token.clone(),
            comment_opener: self.comment_opener.clone(),
            definition_operator: self.definition_operator.clone(),
            target_extension: self.target_extension.clone(),
        }
    }
}

fn invalid(message: &str) -> ProofwatchError {
    ProofwatchError::UserError(format!("config validation failed: {}", message))
}

//! Error types for the proofwatch CLI.
//!
//! The diff engine itself never fails on malformed input; these errors cover
//! the orchestration around it (reading inputs, config, git, forge, LLM).

use crate::exit_codes;
use thiserror::Error;

/// Main error type for proofwatch operations.
#[derive(Error, Debug)]
pub enum ProofwatchError {
    /// User provided invalid arguments, configuration, or unreadable input.
    #[error("{0}")]
    UserError(String),

    /// Git operation failed.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// Forge (issue/comment API) operation failed.
    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    /// Text generation failed where no degraded output is acceptable.
    #[error("Text generation failed: {0}")]
    GeneratorError(String),
}

impl ProofwatchError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProofwatchError::UserError(_) => exit_codes::USER_ERROR,
            ProofwatchError::GitError(_) => exit_codes::GIT_FAILURE,
            ProofwatchError::ForgeError(_) => exit_codes::FORGE_FAILURE,
            ProofwatchError::GeneratorError(_) => exit_codes::GENERATOR_FAILURE,
        }
    }
}

/// Result type alias for proofwatch operations.
pub type Result<T> = std::result::Result<T, ProofwatchError>;

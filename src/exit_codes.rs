//! Exit code constants for the proofwatch CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable input, invalid config)
//! - 3: Git operation failure
//! - 4: Forge (`gh`) failure
//! - 5: Text generation failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable diff, or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Git operation failure: `git diff` could not produce the diff.
pub const GIT_FAILURE: i32 = 3;

/// Forge failure: listing issues or creating/editing the PR comment failed.
pub const FORGE_FAILURE: i32 = 4;

/// Text generation failure that could not be degraded into the report.
pub const GENERATOR_FAILURE: i32 = 5;

//! Error types for the kerf CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! The classifier itself has no failure mode (malformed diff text degrades to
//! an empty classification) and the cache absorbs retrieval failures, so these
//! variants cover the CLI and collaborator layers only.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for kerf operations.
///
/// Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum KerfError {
    /// User provided invalid arguments or the system is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// Configuration file could not be read, parsed, or validated.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Git operation failed.
    #[error("Git operation failed: {0}")]
    GitError(String),
}

impl KerfError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            KerfError::UserError(_) => exit_codes::USER_ERROR,
            KerfError::ConfigError(_) => exit_codes::CONFIG_FAILURE,
            KerfError::GitError(_) => exit_codes::GIT_FAILURE,
        }
    }
}

/// Result type alias for kerf operations.
pub type Result<T> = std::result::Result<T, KerfError>;

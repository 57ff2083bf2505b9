//! Exit code constants for the kerf CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid state)
//! - 2: Configuration failure (unreadable or invalid `.kerf.yaml`)
//! - 3: Git operation failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid state, or not inside a repository.
pub const USER_ERROR: i32 = 1;

/// Configuration failure: config file could not be read, parsed, or validated.
pub const CONFIG_FAILURE: i32 = 2;

/// Git operation failure: rev-parse, diff, or status invocation errors.
pub const GIT_FAILURE: i32 = 3;

//! Repository context resolution for kerf.
//!
//! Finds the git repository root from any working directory and resolves
//! the path of the optional project configuration file. All commands go
//! through this module so they behave the same no matter which subdirectory
//! they are invoked from.

use crate::error::{KerfError, Result};
use crate::git;
use std::env;
use std::path::{Path, PathBuf};

/// Name of the project configuration file at the repository root.
pub const CONFIG_FILE_NAME: &str = ".kerf.yaml";

/// Resolved repository paths for kerf operations.
#[derive(Debug, Clone)]
pub struct RepoContext {
    /// Absolute path to the repository root.
    pub repo_root: PathBuf,
}

impl RepoContext {
    /// Resolve the context from the current working directory.
    ///
    /// # Returns
    ///
    /// * `Ok(RepoContext)` - Successfully resolved context
    /// * `Err(KerfError::UserError)` - If not in a git repository
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            KerfError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Self::resolve_from(&cwd)
    }

    /// Resolve the context from a specific directory.
    ///
    /// This is useful for testing or when the working directory is known.
    pub fn resolve_from<P: AsRef<Path>>(cwd: P) -> Result<Self> {
        let repo_root = git::get_repo_root(cwd)?;
        Ok(Self { repo_root })
    }

    /// Path to the project configuration file (which may not exist).
    pub fn config_path(&self) -> PathBuf {
        self.repo_root.join(CONFIG_FILE_NAME)
    }
}

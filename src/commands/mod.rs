//! Command implementations for kerf.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the base-resolution helper every command shares.

mod files;
mod marks;
mod watch;

use crate::cli::Command;
use crate::config::Config;
use crate::context::RepoContext;
use crate::error::{KerfError, Result};
use crate::git;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Files(args) => files::cmd_files(args),
        Command::Marks(args) => marks::cmd_marks(args),
        Command::Watch(args) => watch::cmd_watch(args),
    }
}

/// Resolve the effective base revision to a commit id.
///
/// Precedence: `--base` flag, then `.kerf.yaml`, whose default is HEAD.
/// The returned id is a full sha so the cache key is stable even when the
/// configured name is a moving branch.
pub(crate) fn resolve_base(
    ctx: &RepoContext,
    config: &Config,
    flag: Option<&str>,
) -> Result<String> {
    let rev = flag.unwrap_or(&config.base);
    if rev.is_empty() {
        return Err(KerfError::UserError(
            "base revision is empty. Set `base` in .kerf.yaml or pass --base.".to_string(),
        ));
    }
    git::resolve_revision(&ctx.repo_root, rev)
}

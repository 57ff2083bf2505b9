//! Implementation of the `kerf watch` command.
//!
//! `watch` polls the repository and prints a classification summary line
//! for each changed file. The configured base expression is re-resolved
//! every tick, so when it moves (a commit lands, a branch is rebased, the
//! checkout changes) the cache invalidates wholesale and the full listing
//! is reprinted.
//!
//! Between base moves, entries follow the cache contract: a file's summary
//! is computed once per base and working-tree edits to an already-reported
//! file are not re-classified until the base moves or the process restarts.

use crate::cache::ChangeCache;
use crate::classify::{ChangeKind, LineChange};
use crate::cli::WatchArgs;
use crate::config::{Config, PathMatcher};
use crate::context::RepoContext;
use crate::error::Result;
use crate::git::{self, GitDiffSource};
use std::collections::HashSet;
use std::thread;
use std::time::Duration;

pub fn cmd_watch(args: WatchArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let config = Config::load(ctx.config_path())?;
    let matcher = config.matcher()?;

    let interval_ms = args.interval_ms.unwrap_or(config.watch_interval_ms).max(50);
    let rev = args.base.clone().unwrap_or_else(|| config.base.clone());

    let cache = ChangeCache::new(GitDiffSource::new(ctx.repo_root.clone()));
    let mut seen: HashSet<String> = HashSet::new();

    eprintln!("kerf watch started");
    eprintln!("  repo:     {}", ctx.repo_root.display());
    eprintln!("  base:     {}", rev);
    eprintln!("  interval: {}ms", interval_ms);
    eprintln!();

    loop {
        if let Err(err) = tick(&ctx, &cache, &matcher, &rev, &mut seen) {
            // A transient failure (mid-rebase, base briefly unresolvable)
            // should not kill the loop.
            eprintln!("Warning: {}", err);
        }

        if args.once {
            break;
        }

        thread::sleep(Duration::from_millis(interval_ms));
    }

    Ok(())
}

/// One poll iteration: re-resolve the base, invalidate on movement, and
/// print a summary for every newly seen changed file.
fn tick(
    ctx: &RepoContext,
    cache: &ChangeCache<GitDiffSource>,
    matcher: &PathMatcher,
    rev: &str,
    seen: &mut HashSet<String>,
) -> Result<()> {
    let base = git::resolve_revision(&ctx.repo_root, rev)?;

    if cache.set_base(&base) {
        // Everything cached was relative to the previous base.
        seen.clear();
        println!("base {} ({})", rev, short_sha(&base));
    }

    for file in git::changed_files(&ctx.repo_root, &base)? {
        if !matcher.is_match(&file.path) {
            continue;
        }
        if seen.insert(file.path.clone()) {
            let changes = cache.get(&file.path);
            println!(
                "{}  {}  {}",
                file.status.letter(),
                file.path,
                summarize(&changes)
            );
        }
    }

    Ok(())
}

/// Compact per-file summary: added and modified line counts, deletion
/// marker count.
fn summarize(changes: &[LineChange]) -> String {
    let mut added = 0;
    let mut modified = 0;
    let mut deleted = 0;

    for change in changes {
        match change.kind {
            ChangeKind::Added => added += change.end_line - change.start_line + 1,
            ChangeKind::Modified => modified += change.end_line - change.start_line + 1,
            ChangeKind::Deleted => deleted += 1,
        }
    }

    format!("+{} ~{} -{}", added, modified, deleted)
}

fn short_sha(sha: &str) -> &str {
    &sha[..sha.len().min(12)]
}

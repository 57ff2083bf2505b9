//! Implementation of the `kerf files` command.

use crate::cli::FilesArgs;
use crate::config::{Config, PathMatcher};
use crate::context::RepoContext;
use crate::error::{KerfError, Result};
use crate::git::{self, ChangedFile};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub fn cmd_files(args: FilesArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;
    run(&ctx, &args)
}

fn run(ctx: &RepoContext, args: &FilesArgs) -> Result<()> {
    let config = Config::load(ctx.config_path())?;
    let matcher = config.matcher()?;
    let base = super::resolve_base(ctx, &config, args.base.as_deref())?;

    let files = collect(ctx, &matcher, &base)?;

    if args.json {
        println!("{}", render_json(&base, &files)?);
    } else {
        print!("{}", render_text(&files));
    }

    Ok(())
}

/// Enumerate changed files under the base, filtered by the config globs.
fn collect(ctx: &RepoContext, matcher: &PathMatcher, base: &str) -> Result<Vec<ChangedFile>> {
    let files = git::changed_files(&ctx.repo_root, base)?;
    Ok(files
        .into_iter()
        .filter(|f| matcher.is_match(&f.path))
        .collect())
}

fn render_text(files: &[ChangedFile]) -> String {
    if files.is_empty() {
        return "No changed files.\n".to_string();
    }

    let mut out = String::new();
    for file in files {
        match &file.old_path {
            Some(old_path) => {
                out.push_str(&format!(
                    "{}  {} -> {}\n",
                    file.status.letter(),
                    old_path,
                    file.path
                ));
            }
            None => {
                out.push_str(&format!("{}  {}\n", file.status.letter(), file.path));
            }
        }
    }
    out
}

/// JSON report for the `--json` flag.
#[derive(Debug, Serialize)]
struct FilesReport<'a> {
    base: &'a str,
    computed_at: DateTime<Utc>,
    files: &'a [ChangedFile],
}

fn render_json(base: &str, files: &[ChangedFile]) -> Result<String> {
    let report = FilesReport {
        base,
        computed_at: Utc::now(),
        files,
    };
    serde_json::to_string_pretty(&report)
        .map_err(|e| KerfError::UserError(format!("failed to serialize report to JSON: {}", e)))
}

//! Implementation of the `kerf marks` command.
//!
//! Classification happens through the cache even though a one-shot command
//! only benefits when a path is requested twice; the command is the same
//! code path an embedding consumer would use.

use crate::cache::ChangeCache;
use crate::classify::{ChangeKind, LineChange};
use crate::cli::MarksArgs;
use crate::config::Config;
use crate::context::RepoContext;
use crate::error::{KerfError, Result};
use crate::git::{self, FileStatus, GitDiffSource};
use crate::overlay::{DisplayRange, display_ranges, gutter_marks};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub fn cmd_marks(args: MarksArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;
    run(&ctx, &args)
}

fn run(ctx: &RepoContext, args: &MarksArgs) -> Result<()> {
    let config = Config::load(ctx.config_path())?;
    let base = super::resolve_base(ctx, &config, args.base.as_deref())?;

    let explicit = !args.paths.is_empty();
    let paths = if explicit {
        args.paths.iter().map(|p| git::normalize_path(p)).collect()
    } else {
        // Deleted files have no working-tree document to mark.
        let matcher = config.matcher()?;
        git::changed_files(&ctx.repo_root, &base)?
            .into_iter()
            .filter(|f| f.status != FileStatus::Deleted && matcher.is_match(&f.path))
            .map(|f| f.path)
            .collect::<Vec<_>>()
    };

    if args.gutter {
        let cache = ChangeCache::with_base(GitDiffSource::new(ctx.repo_root.clone()), &base);
        for path in &paths {
            let changes = cache.get(path);
            print!("{}", render_gutter(ctx, path, &changes));
        }
        return Ok(());
    }

    let marks = collect_marks(ctx, &base, &paths);

    if args.json {
        println!("{}", render_json(&base, &marks)?);
    } else {
        print!("{}", render_text(&marks, explicit));
    }

    Ok(())
}

/// Classified changes plus display ranges for one file.
#[derive(Debug, Serialize)]
struct FileMarks {
    path: String,
    changes: Vec<LineChange>,
    display: Vec<DisplayRange>,
}

/// Classify each path and clip against the file currently on disk.
fn collect_marks(ctx: &RepoContext, base: &str, paths: &[String]) -> Vec<FileMarks> {
    let cache = ChangeCache::with_base(GitDiffSource::new(ctx.repo_root.clone()), base);

    paths
        .iter()
        .map(|path| {
            let changes = cache.get(path);
            let document_lines = count_lines(ctx, path);
            FileMarks {
                path: path.clone(),
                display: display_ranges(&changes, document_lines),
                changes: changes.to_vec(),
            }
        })
        .collect()
}

/// Line count of the working-tree file, 0 when missing or unreadable.
fn count_lines(ctx: &RepoContext, path: &str) -> usize {
    std::fs::read_to_string(ctx.repo_root.join(path))
        .map(|content| content.lines().count())
        .unwrap_or(0)
}

fn mark_symbol(kind: ChangeKind) -> char {
    match kind {
        ChangeKind::Added => '+',
        ChangeKind::Modified => '~',
        ChangeKind::Deleted => '-',
    }
}

/// File contents with a leading mark column, the terminal stand-in for an
/// editor's colored gutter bars.
fn render_gutter(ctx: &RepoContext, path: &str, changes: &[LineChange]) -> String {
    let content = std::fs::read_to_string(ctx.repo_root.join(path)).unwrap_or_default();
    let lines: Vec<&str> = content.lines().collect();
    let marks = gutter_marks(changes, lines.len());

    let mut out = String::new();
    out.push_str(path);
    out.push('\n');
    for (row, line) in lines.iter().enumerate() {
        let symbol = match marks[row] {
            Some(kind) => mark_symbol(kind),
            None => ' ',
        };
        out.push_str(&format!("{} {:>4}  {}\n", symbol, row + 1, line));
    }
    out
}

fn render_text(marks: &[FileMarks], explicit: bool) -> String {
    let mut out = String::new();

    for file in marks {
        if file.display.is_empty() {
            if explicit {
                out.push_str(&format!("{}: no changes\n", file.path));
            }
            continue;
        }

        out.push_str(&file.path);
        out.push('\n');
        for range in &file.display {
            // Display rows are 0-based; print editor-style 1-based lines.
            if range.start == range.end {
                out.push_str(&format!("  {} {}\n", mark_symbol(range.kind), range.start + 1));
            } else {
                out.push_str(&format!(
                    "  {} {}-{}\n",
                    mark_symbol(range.kind),
                    range.start + 1,
                    range.end + 1
                ));
            }
        }
    }

    if out.is_empty() {
        out.push_str("No changes.\n");
    }
    out
}

/// JSON report for the `--json` flag.
#[derive(Debug, Serialize)]
struct MarksReport<'a> {
    base: &'a str,
    computed_at: DateTime<Utc>,
    files: &'a [FileMarks],
}

fn render_json(base: &str, marks: &[FileMarks]) -> Result<String> {
    let report = MarksReport {
        base,
        computed_at: Utc::now(),
        files: marks,
    };
    serde_json::to_string_pretty(&report)
        .map_err(|e| KerfError::UserError(format!("failed to serialize report to JSON: {}", e)))
}

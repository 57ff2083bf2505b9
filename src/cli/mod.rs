//! CLI argument parsing for kerf.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};

/// Kerf: classifies changed lines against a git base revision.
///
/// Changes are reported in new-file coordinates as added, modified, and
/// deleted runs, the same shape an editor gutter overlay renders. The base
/// revision comes from `--base`, `.kerf.yaml`, or defaults to HEAD.
#[derive(Parser, Debug)]
#[command(name = "kerf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for kerf.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List files that changed relative to the base revision.
    ///
    /// Prints one status letter and path per line, filtered by the
    /// configured include/exclude globs.
    Files(FilesArgs),

    /// Show classified line changes for files.
    ///
    /// With no paths, classifies every changed file. Output is a per-file
    /// gutter summary, or a JSON report with --json.
    Marks(MarksArgs),

    /// Poll the repository and reprint classifications when they change.
    ///
    /// Re-resolves the base revision every tick; when it moves (commit,
    /// checkout, rebase), the cache is invalidated and everything is
    /// re-rendered.
    Watch(WatchArgs),
}

/// Arguments for the `files` command.
#[derive(Parser, Debug)]
pub struct FilesArgs {
    /// Base revision to diff against (overrides config).
    #[arg(long)]
    pub base: Option<String>,

    /// Emit a JSON report instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `marks` command.
#[derive(Parser, Debug)]
pub struct MarksArgs {
    /// Repo-relative paths to classify. Empty means all changed files.
    pub paths: Vec<String>,

    /// Base revision to diff against (overrides config).
    #[arg(long)]
    pub base: Option<String>,

    /// Emit a JSON report instead of text.
    #[arg(long)]
    pub json: bool,

    /// Print the file contents with a mark column instead of a summary.
    #[arg(long, conflicts_with = "json")]
    pub gutter: bool,
}

/// Arguments for the `watch` command.
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Base revision to diff against (overrides config).
    #[arg(long)]
    pub base: Option<String>,

    /// Poll interval in milliseconds (overrides config).
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Run a single iteration and exit.
    #[arg(long)]
    pub once: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_files() {
        let cli = Cli::try_parse_from(["kerf", "files"]).unwrap();
        if let Command::Files(args) = cli.command {
            assert!(args.base.is_none());
            assert!(!args.json);
        } else {
            panic!("Expected Files command");
        }
    }

    #[test]
    fn parse_files_with_base_and_json() {
        let cli = Cli::try_parse_from(["kerf", "files", "--base", "origin/main", "--json"]).unwrap();
        if let Command::Files(args) = cli.command {
            assert_eq!(args.base, Some("origin/main".to_string()));
            assert!(args.json);
        } else {
            panic!("Expected Files command");
        }
    }

    #[test]
    fn parse_marks_without_paths() {
        let cli = Cli::try_parse_from(["kerf", "marks"]).unwrap();
        if let Command::Marks(args) = cli.command {
            assert!(args.paths.is_empty());
        } else {
            panic!("Expected Marks command");
        }
    }

    #[test]
    fn parse_marks_with_paths() {
        let cli = Cli::try_parse_from(["kerf", "marks", "src/lib.rs", "src/main.rs"]).unwrap();
        if let Command::Marks(args) = cli.command {
            assert_eq!(args.paths, vec!["src/lib.rs", "src/main.rs"]);
            assert!(!args.json);
            assert!(!args.gutter);
        } else {
            panic!("Expected Marks command");
        }
    }

    #[test]
    fn parse_marks_gutter_conflicts_with_json() {
        let cli = Cli::try_parse_from(["kerf", "marks", "src/lib.rs", "--gutter"]).unwrap();
        if let Command::Marks(args) = cli.command {
            assert!(args.gutter);
        } else {
            panic!("Expected Marks command");
        }

        let result = Cli::try_parse_from(["kerf", "marks", "src/lib.rs", "--gutter", "--json"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_watch_defaults() {
        let cli = Cli::try_parse_from(["kerf", "watch"]).unwrap();
        if let Command::Watch(args) = cli.command {
            assert!(args.base.is_none());
            assert!(args.interval_ms.is_none());
            assert!(!args.once);
        } else {
            panic!("Expected Watch command");
        }
    }

    #[test]
    fn parse_watch_once_with_interval() {
        let cli = Cli::try_parse_from(["kerf", "watch", "--interval-ms", "250", "--once"]).unwrap();
        if let Command::Watch(args) = cli.command {
            assert_eq!(args.interval_ms, Some(250));
            assert!(args.once);
        } else {
            panic!("Expected Watch command");
        }
    }
}

//! Git command runner for kerf.
//!
//! Provides a safe wrapper around git commands with captured stdout/stderr
//! and structured error handling. All git operations should go through this
//! module.
//!
//! The diff-facing helpers compare the working tree against a base revision
//! (not a commit range): gutter marks describe what the editor would show
//! for the files currently on disk. Note that untracked files do not appear
//! in `git diff <base>` output until they are staged.

use crate::cache::DiffSource;
use crate::error::{KerfError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    /// Create a new GitOutput from raw output bytes.
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Returns true if stdout is empty.
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }
}

/// Run a git command with the specified working directory.
///
/// # Arguments
///
/// * `cwd` - The working directory to run the command in
/// * `args` - The git command arguments (without "git" prefix)
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(KerfError::GitError)` - On non-zero exit code
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let cwd = cwd.as_ref();

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            KerfError::GitError(format!(
                "failed to execute git {}: {}",
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let error_msg = if git_output.stderr.is_empty() {
            git_output.stdout.clone()
        } else {
            git_output.stderr.clone()
        };

        Err(KerfError::GitError(format!(
            "git {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            exit_code,
            error_msg
        )))
    }
}

/// Get the repository root directory using `git rev-parse --show-toplevel`.
///
/// This works correctly from any location within a git repository.
///
/// # Returns
///
/// * `Ok(PathBuf)` - The absolute path to the repository root
/// * `Err(KerfError::UserError)` - If not inside a git repository
pub fn get_repo_root<P: AsRef<Path>>(cwd: P) -> Result<PathBuf> {
    let output = run_git_for_repo_detection(cwd.as_ref(), &["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(&output.stdout))
}

/// Internal helper that returns a UserError instead of GitError for repo detection.
/// This ensures "not in a git repo" is a clean user error (exit 1) not a git error (exit 3).
fn run_git_for_repo_detection<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let cwd = cwd.as_ref();

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            KerfError::UserError(format!("failed to execute git: {} (is git installed?)", e))
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        // Check if this is a "not a git repository" error
        let stderr = &git_output.stderr;
        if stderr.contains("not a git repository") || stderr.contains("fatal:") {
            Err(KerfError::UserError(
                "not inside a git repository. Run this command from within a git repository."
                    .to_string(),
            ))
        } else {
            Err(KerfError::UserError(format!(
                "git command failed: {}",
                if stderr.is_empty() {
                    &git_output.stdout
                } else {
                    stderr
                }
            )))
        }
    }
}

/// Resolve a revision expression to a full commit id.
///
/// The resolved id is what the classification cache uses as its base
/// identifier, so a branch name that moves between invocations is detected
/// as a base change.
///
/// # Arguments
///
/// * `cwd` - Any directory within the repository
/// * `rev` - Revision expression (branch, tag, sha, `HEAD~2`, ...)
///
/// # Returns
///
/// * `Ok(String)` - The full commit sha
/// * `Err(KerfError::GitError)` - Unknown or non-commit revision
pub fn resolve_revision<P: AsRef<Path>>(cwd: P, rev: &str) -> Result<String> {
    if rev.is_empty() {
        return Err(KerfError::UserError(
            "base revision is empty. Set `base` in .kerf.yaml or pass --base.".to_string(),
        ));
    }

    let target = format!("{}^{{commit}}", rev);
    let output = run_git(&cwd, &["rev-parse", "--verify", "--quiet", &target])
        .map_err(|_| KerfError::GitError(format!("unknown revision '{}'", rev)))?;

    Ok(output.stdout)
}

/// Get the raw unified diff between the base revision and the working tree
/// for a single file.
///
/// Returns an empty string when the file is unchanged. The output is fed
/// verbatim to the classifier.
pub fn diff_text<P: AsRef<Path>>(cwd: P, base: &str, path: &str) -> Result<String> {
    let output = run_git(&cwd, &["diff", base, "--", path])?;
    Ok(output.stdout)
}

/// Status of a changed file, as reported by `git diff --name-status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl FileStatus {
    /// Map a `--name-status` letter to a status.
    ///
    /// Copies count as additions and type changes as modifications; letters
    /// with no useful gutter interpretation (unmerged, broken) yield `None`
    /// and the entry is skipped.
    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' | 'C' => Some(FileStatus::Added),
            'M' | 'T' => Some(FileStatus::Modified),
            'D' => Some(FileStatus::Deleted),
            'R' => Some(FileStatus::Renamed),
            _ => None,
        }
    }

    /// Single-letter form used by the text output of `kerf files`.
    pub fn letter(&self) -> char {
        match self {
            FileStatus::Added => 'A',
            FileStatus::Modified => 'M',
            FileStatus::Deleted => 'D',
            FileStatus::Renamed => 'R',
        }
    }
}

/// One entry from the changed-files enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Change status relative to the base revision.
    pub status: FileStatus,
    /// Repository-relative path (forward slashes) in the working tree.
    pub path: String,
    /// Previous path for renames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_path: Option<String>,
}

/// Enumerate files that differ between the base revision and the working tree.
///
/// Runs `git diff --name-status -M {base}` and returns repo-relative paths
/// with forward slashes. Rename detection is requested explicitly so the
/// result does not depend on the repository's `diff.renames` setting.
pub fn changed_files<P: AsRef<Path>>(cwd: P, base: &str) -> Result<Vec<ChangedFile>> {
    let output = run_git(&cwd, &["diff", "--name-status", "-M", base])?;

    if output.is_empty() {
        return Ok(Vec::new());
    }

    Ok(parse_name_status(&output.stdout))
}

/// Parse `--name-status` output lines.
///
/// Each line is `<letter>[score]\t<path>` or, for renames and copies,
/// `<letter><score>\t<old>\t<new>`. Unrecognized lines are skipped.
fn parse_name_status(output: &str) -> Vec<ChangedFile> {
    let mut files = Vec::new();

    for line in output.lines() {
        let mut fields = line.split('\t');
        let Some(status_field) = fields.next() else {
            continue;
        };
        let Some(letter) = status_field.chars().next() else {
            continue;
        };
        let Some(status) = FileStatus::from_letter(letter) else {
            continue;
        };

        let Some(first_path) = fields.next() else {
            continue;
        };

        // Renames and copies carry two paths; the second is the current one.
        if let Some(second_path) = fields.next() {
            files.push(ChangedFile {
                status,
                path: normalize_path(second_path),
                old_path: Some(normalize_path(first_path)),
            });
        } else {
            files.push(ChangedFile {
                status,
                path: normalize_path(first_path),
                old_path: None,
            });
        }
    }

    files
}

/// Normalize a file path to use forward slashes.
///
/// This ensures consistent path format for glob matching and cache keys,
/// regardless of the platform where the diff was generated.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Production [`DiffSource`] backed by the local git repository.
#[derive(Debug, Clone)]
pub struct GitDiffSource {
    repo_root: PathBuf,
}

impl GitDiffSource {
    pub fn new(repo_root: PathBuf) -> Self {
        Self { repo_root }
    }
}

impl DiffSource for GitDiffSource {
    fn diff_text(&self, base: &str, path: &str) -> Result<String> {
        diff_text(&self.repo_root, base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_test_repo, git, head_sha};
    use tempfile::TempDir;

    #[test]
    fn test_run_git_success() {
        let temp_dir = create_test_repo();
        let result = run_git(temp_dir.path(), &["status", "--porcelain"]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_run_git_failure_returns_git_error() {
        let temp_dir = create_test_repo();
        let result = run_git(temp_dir.path(), &["checkout", "nonexistent-branch"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, KerfError::GitError(_)));
    }

    #[test]
    fn test_get_repo_root_from_subdirectory() {
        let temp_dir = create_test_repo();
        let subdir = temp_dir.path().join("subdir").join("nested");
        std::fs::create_dir_all(&subdir).unwrap();

        let root = get_repo_root(&subdir).unwrap();
        let expected = temp_dir.path().canonicalize().unwrap();
        assert_eq!(root.canonicalize().unwrap(), expected);
    }

    #[test]
    fn test_get_repo_root_outside_repo_returns_user_error() {
        let temp_dir = TempDir::new().unwrap(); // Not a git repo
        let result = get_repo_root(temp_dir.path());
        assert!(result.is_err());
        let err = result.unwrap_err();
        // Should be UserError (exit 1), not GitError (exit 3)
        assert!(matches!(err, KerfError::UserError(_)));
        assert!(err.to_string().contains("not inside a git repository"));
    }

    #[test]
    fn test_resolve_revision_head() {
        let temp_dir = create_test_repo();
        let sha = resolve_revision(temp_dir.path(), "HEAD").unwrap();
        assert_eq!(sha.len(), 40);
        assert!(sha.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(sha, head_sha(temp_dir.path()));
    }

    #[test]
    fn test_resolve_revision_unknown_rev() {
        let temp_dir = create_test_repo();
        let result = resolve_revision(temp_dir.path(), "no-such-branch");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, KerfError::GitError(_)));
        assert!(err.to_string().contains("no-such-branch"));
    }

    #[test]
    fn test_resolve_revision_empty_is_user_error() {
        let temp_dir = create_test_repo();
        let result = resolve_revision(temp_dir.path(), "");
        assert!(matches!(result.unwrap_err(), KerfError::UserError(_)));
    }

    #[test]
    fn test_diff_text_unchanged_file_is_empty() {
        let temp_dir = create_test_repo();
        let text = diff_text(temp_dir.path(), "HEAD", "README.md").unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn test_diff_text_modified_file_has_hunks() {
        let temp_dir = create_test_repo();
        std::fs::write(temp_dir.path().join("README.md"), "# Changed\n").unwrap();

        let text = diff_text(temp_dir.path(), "HEAD", "README.md").unwrap();
        assert!(text.contains("@@"));
        assert!(text.contains("-# Test"));
        assert!(text.contains("+# Changed"));
    }

    #[test]
    fn test_changed_files_modified_and_deleted() {
        let temp_dir = create_test_repo();
        std::fs::write(temp_dir.path().join("README.md"), "# Changed\n").unwrap();
        std::fs::remove_file(temp_dir.path().join("src/lib.rs")).unwrap();

        let files = changed_files(temp_dir.path(), "HEAD").unwrap();

        assert!(files.contains(&ChangedFile {
            status: FileStatus::Modified,
            path: "README.md".to_string(),
            old_path: None,
        }));
        assert!(files.contains(&ChangedFile {
            status: FileStatus::Deleted,
            path: "src/lib.rs".to_string(),
            old_path: None,
        }));
    }

    #[test]
    fn test_changed_files_staged_new_file() {
        let temp_dir = create_test_repo();
        std::fs::write(temp_dir.path().join("new.rs"), "pub fn hello() {}\n").unwrap();
        // Untracked files are invisible to `git diff <base>` until staged.
        git(temp_dir.path(), &["add", "new.rs"]);

        let files = changed_files(temp_dir.path(), "HEAD").unwrap();
        assert!(files.contains(&ChangedFile {
            status: FileStatus::Added,
            path: "new.rs".to_string(),
            old_path: None,
        }));
    }

    #[test]
    fn test_parse_name_status_basic() {
        let files = parse_name_status("M\tsrc/lib.rs\nA\tsrc/new.rs\nD\told.txt");
        assert_eq!(files.len(), 3);
        assert_eq!(files[0].status, FileStatus::Modified);
        assert_eq!(files[0].path, "src/lib.rs");
        assert_eq!(files[1].status, FileStatus::Added);
        assert_eq!(files[2].status, FileStatus::Deleted);
    }

    #[test]
    fn test_parse_name_status_rename_with_score() {
        let files = parse_name_status("R095\tsrc/old_name.rs\tsrc/new_name.rs");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].status, FileStatus::Renamed);
        assert_eq!(files[0].path, "src/new_name.rs");
        assert_eq!(files[0].old_path, Some("src/old_name.rs".to_string()));
    }

    #[test]
    fn test_parse_name_status_skips_unknown_letters() {
        let files = parse_name_status("U\tconflicted.rs\nM\tsrc/lib.rs");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "src/lib.rs");
    }

    #[test]
    fn test_parse_name_status_empty() {
        assert!(parse_name_status("").is_empty());
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("src/lib.rs"), "src/lib.rs");
        assert_eq!(normalize_path("src\\lib.rs"), "src/lib.rs");
        assert_eq!(normalize_path("src\\nested\\file.rs"), "src/nested/file.rs");
    }

    #[test]
    fn test_git_diff_source_reads_working_tree() {
        let temp_dir = create_test_repo();
        std::fs::write(temp_dir.path().join("README.md"), "# Changed\n").unwrap();

        let source = GitDiffSource::new(temp_dir.path().to_path_buf());
        let text = source.diff_text("HEAD", "README.md").unwrap();
        assert!(text.contains("+# Changed"));
    }
}

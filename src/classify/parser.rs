//! Core diff classification logic.

use super::api::{ChangeKind, LineChange};
use super::helpers::parse_hunk_header;

/// Classify the lines of a unified diff into change records.
///
/// The input is the raw diff output for one file (as produced by
/// `git diff <base> -- <path>`). Records are emitted in diff order, which
/// for well-formed input means non-decreasing `start_line`.
///
/// This is a best-effort structural scan, not a validating parser: an empty
/// diff, text that is malformed before the first hunk header, or a diff with
/// no change lines all yield an empty result.
///
/// # Arguments
///
/// * `diff_text` - Raw unified diff output for a single file
///
/// # Returns
///
/// Classified line ranges in new-file coordinates.
pub fn classify_unified_diff(diff_text: &str) -> Vec<LineChange> {
    let mut changes = Vec::new();
    let lines: Vec<&str> = diff_text.lines().collect();

    // Cursor into the new file. Only a hunk header gives it a real value;
    // it advances as new-file lines are accounted for and is never
    // decremented between headers.
    let mut new_line: usize = 0;
    let mut in_hunk = false;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        // A new file section ends any hunk in progress. The classifier is
        // fed one file per call, but this keeps the cursor sane if a
        // multi-file diff slips through.
        if line.starts_with("diff ") {
            in_hunk = false;
            i += 1;
            continue;
        }

        if line.starts_with("@@") {
            if let Some(new_start) = parse_hunk_header(line) {
                new_line = new_start;
                in_hunk = true;
            }
            i += 1;
            continue;
        }

        // Everything before the first hunk header is file-identity metadata.
        if !in_hunk {
            i += 1;
            continue;
        }

        if line.starts_with('-') {
            // A removed run, possibly paired with the added run that
            // directly follows it (no intervening context line).
            let (removed, after_removed) = scan_run(&lines, i, b'-');
            let (added, after_added) = scan_run(&lines, after_removed, b'+');
            i = after_added;

            if added == 0 {
                // Pure removal: nothing in the new file to span, so record
                // a zero-width marker at the cursor and leave it in place.
                changes.push(LineChange {
                    kind: ChangeKind::Deleted,
                    start_line: new_line,
                    end_line: new_line,
                });
            } else {
                // Paired remove+add at the same position is an edit up to
                // the common length; the length mismatch is surfaced as a
                // residual pure add or a deletion marker.
                let paired = removed.min(added);
                changes.push(LineChange {
                    kind: ChangeKind::Modified,
                    start_line: new_line,
                    end_line: new_line + paired - 1,
                });

                if added > removed {
                    changes.push(LineChange {
                        kind: ChangeKind::Added,
                        start_line: new_line + paired,
                        end_line: new_line + added - 1,
                    });
                } else if removed > added {
                    changes.push(LineChange {
                        kind: ChangeKind::Deleted,
                        start_line: new_line + paired,
                        end_line: new_line + paired,
                    });
                }

                new_line += added;
            }
            continue;
        }

        if line.starts_with('+') {
            // Standalone insertion: no removed run in front of it.
            let (added, after_added) = scan_run(&lines, i, b'+');
            i = after_added;

            changes.push(LineChange {
                kind: ChangeKind::Added,
                start_line: new_line,
                end_line: new_line + added - 1,
            });
            new_line += added;
            continue;
        }

        if line.starts_with(' ') {
            // Context line: present in both versions.
            new_line += 1;
        }
        // Anything else ("\ No newline at end of file", stray metadata) is
        // inert: no record, no cursor movement.
        i += 1;
    }

    changes
}

/// Count a run of consecutive lines starting with `prefix`.
///
/// Returns the run length and the index of the first line past the run.
/// "\ No newline at end of file" markers are skipped without breaking the
/// run: only a context line (or a header) separates a removed run from the
/// added run that pairs with it.
fn scan_run(lines: &[&str], mut i: usize, prefix: u8) -> (usize, usize) {
    let mut count = 0;
    while i < lines.len() {
        match lines[i].as_bytes().first() {
            Some(&b) if b == prefix => {
                count += 1;
                i += 1;
            }
            Some(&b'\\') => i += 1,
            _ => break,
        }
    }
    (count, i)
}

//! Public types for line-change classification.

use serde::{Deserialize, Serialize};

/// Semantic category of a classified run of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Lines that exist in the new file with no old-file counterpart.
    Added,
    /// Lines paired with removed lines at the same position (an edit).
    Modified,
    /// Removed content with no new-file counterpart, recorded as a
    /// zero-width marker adjacent to a new-file line.
    Deleted,
}

/// A classified contiguous run of lines in the new version of a file.
///
/// `start_line` and `end_line` are 1-based, inclusive, in new-file
/// coordinates. For `Added` and `Modified`, `start_line <= end_line`. For
/// `Deleted` the record is a zero-width marker: `start_line == end_line`
/// names the new-file line adjacent to which the removal occurred, and the
/// marker never spans more than that single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChange {
    pub kind: ChangeKind,
    pub start_line: usize,
    pub end_line: usize,
}

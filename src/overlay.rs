//! Mapping classified ranges onto the current document.
//!
//! Classification is anchored to the new-file numbering of the diff, but
//! the file on disk may have been edited again since the diff was computed.
//! This adapter converts 1-based inclusive records into 0-based display
//! rows clipped to the document's current length, which is the contract a
//! rendering layer needs: never a row outside the document.

use crate::classify::{ChangeKind, LineChange};
use serde::Serialize;

/// A display-ready range: 0-based inclusive rows in the current document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayRange {
    pub kind: ChangeKind,
    pub start: usize,
    pub end: usize,
}

/// Convert classified records into clipped display ranges.
///
/// Rules:
/// - `Added`/`Modified` ranges are clipped to the last row; records that
///   start past the end of the document are dropped.
/// - `Deleted` markers are clamped onto the nearest existing row (a marker
///   at new-file line 0, from a whole-file deletion, lands on row 0; a
///   marker past the end lands on the last row).
/// - An empty document has nothing to mark.
pub fn display_ranges(changes: &[LineChange], document_lines: usize) -> Vec<DisplayRange> {
    let mut ranges = Vec::new();
    if document_lines == 0 {
        return ranges;
    }
    let last = document_lines - 1;

    for change in changes {
        let start = change.start_line.saturating_sub(1);
        match change.kind {
            ChangeKind::Deleted => {
                let row = start.min(last);
                ranges.push(DisplayRange {
                    kind: ChangeKind::Deleted,
                    start: row,
                    end: row,
                });
            }
            kind => {
                if start > last {
                    continue;
                }
                let end = change.end_line.saturating_sub(1).min(last);
                ranges.push(DisplayRange { kind, start, end });
            }
        }
    }

    ranges
}

/// Per-row mark column for terminal rendering.
///
/// Returns one slot per document row. Rows covered by several ranges keep
/// the more specific signal: a concrete `Added`/`Modified` mark is never
/// overwritten by a zero-width `Deleted` marker that happens to share the
/// row.
pub fn gutter_marks(changes: &[LineChange], document_lines: usize) -> Vec<Option<ChangeKind>> {
    let mut marks = vec![None; document_lines];

    for range in display_ranges(changes, document_lines) {
        for slot in &mut marks[range.start..=range.end] {
            if range.kind == ChangeKind::Deleted && slot.is_some() {
                continue;
            }
            *slot = Some(range.kind);
        }
    }

    marks
}

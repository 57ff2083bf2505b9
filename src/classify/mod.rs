//! Line-change classification for gutter overlays.
//!
//! This module turns raw unified-diff text into an ordered sequence of
//! [`LineChange`] records anchored to the *new* file's line numbering.
//!
//! Unified diffs represent an edited line as a removal immediately followed
//! by an addition at the same position. Classifying those independently
//! would mark the line as both wholly removed and wholly added, so paired
//! removed/added runs are merged up to their common length and reported as
//! `Modified`; any surplus surfaces as a residual `Added` range or a
//! zero-width `Deleted` marker. The pairing is by position and count, never
//! by content similarity.
//!
//! The scan is deterministic and best-effort: malformed input yields fewer
//! or no records, never an error.

mod api;
mod helpers;
mod parser;


// Re-export public API
pub use api::{ChangeKind, LineChange};
pub use parser::classify_unified_diff;

//! Helper functions for unified-diff scanning.

/// Parse a hunk header line, returning the new-file start line.
///
/// Format: "@@ -old_start,old_len +new_start,new_len @@" or "@@ -old_start +new_start @@"
/// Also handles: "@@ -old_start,old_len +new_start,new_len @@ section heading"
///
/// The old-file fields are validated for shape but discarded: classification
/// is anchored entirely to new-file coordinates. Returns None if parsing
/// fails, in which case the caller leaves the cursor untouched.
pub(super) fn parse_hunk_header(line: &str) -> Option<usize> {
    // Remove leading "@@ " and trailing " @@" (with optional section text)
    let line = line.strip_prefix("@@ ")?;

    let end_marker = line.find(" @@")?;
    let range_part = &line[..end_marker];

    let parts: Vec<&str> = range_part.split_whitespace().collect();
    if parts.len() < 2 {
        return None;
    }

    let old_part = parts[0].strip_prefix('-')?;
    let new_part = parts[1].strip_prefix('+')?;

    // A malformed old range means this is not a real hunk header.
    parse_range_start(old_part)?;
    parse_range_start(new_part)
}

/// Parse the start line from a range specification.
///
/// Format: "start" or "start,len"
fn parse_range_start(range: &str) -> Option<usize> {
    let start_str = if let Some(comma_pos) = range.find(',') {
        &range[..comma_pos]
    } else {
        range
    };

    start_str.parse().ok()
}

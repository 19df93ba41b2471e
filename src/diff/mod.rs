// src/diff/mod.rs

//! Rendering old vs. new content as a unified diff for the mail body.

use chrono::{DateTime, Local};
use similar::TextDiff;

pub mod strip;

pub use strip::strip_markup;

/// Lines of unchanged context around each change.
pub const CONTEXT_LINES: usize = 1;

/// Format of the timestamps in the `---` / `+++` header lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const OLD_LABEL: &str = "OLD";
pub const NEW_LABEL: &str = "NEW";

/// Unified diff of `old` against `new`, line by line.
///
/// The header reads `--- OLD\t(<old_time>)` / `+++ NEW\t(<new_time>)`.
/// Identical inputs produce an empty string.
pub fn unified_diff(
    old: &str,
    new: &str,
    old_time: &DateTime<Local>,
    new_time: &DateTime<Local>,
) -> String {
    let old_header = format!("{OLD_LABEL}\t({})", old_time.format(TIMESTAMP_FORMAT));
    let new_header = format!("{NEW_LABEL}\t({})", new_time.format(TIMESTAMP_FORMAT));

    let diff = TextDiff::from_lines(old, new);
    diff.unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(&old_header, &new_header)
        .to_string()
}

/// Mail body for a change at `url`: a one-line banner, then the diff.
pub fn render_body(url: &str, diff_text: &str) -> String {
    format!("Change at {url} - diff follows:\n\n{diff_text}")
}

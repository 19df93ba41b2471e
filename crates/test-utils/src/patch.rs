//! Minimal unified-diff applier, used to check that rendered diffs carry
//! enough information to rebuild the new text from the old one.

const NO_NEWLINE_MARKER: char = '\\';

/// Apply `diff` (as produced by `wcc::diff::unified_diff`) to `old`.
///
/// Panics on malformed input; this is a test helper.
pub fn apply_unified_diff(old: &str, diff: &str) -> String {
    let old_lines: Vec<&str> = old.split_inclusive('\n').collect();
    let mut out = String::new();
    let mut cursor = 0usize;
    let mut in_hunk = false;
    let mut last_op = ' ';

    for line in diff.split_inclusive('\n') {
        if line.starts_with("@@") {
            let start = hunk_old_start(line);
            while cursor < start {
                out.push_str(old_lines[cursor]);
                cursor += 1;
            }
            in_hunk = true;
            continue;
        }
        if !in_hunk {
            // `---` / `+++` header lines.
            continue;
        }

        let mut chars = line.chars();
        let op = chars.next().expect("empty diff line");
        let text = chars.as_str();
        match op {
            ' ' => {
                out.push_str(text);
                cursor += 1;
            }
            '-' => cursor += 1,
            '+' => out.push_str(text),
            NO_NEWLINE_MARKER => {
                if last_op != '-' && out.ends_with('\n') {
                    out.pop();
                }
            }
            other => panic!("unexpected diff line prefix {other:?} in {line:?}"),
        }
        last_op = op;
    }

    while cursor < old_lines.len() {
        out.push_str(old_lines[cursor]);
        cursor += 1;
    }
    out
}

/// Zero-based index of the first old line covered by a hunk header like
/// `@@ -3,4 +3,5 @@`.
fn hunk_old_start(header: &str) -> usize {
    let old_range = header
        .split_whitespace()
        .nth(1)
        .and_then(|r| r.strip_prefix('-'))
        .expect("hunk header without old range");

    let (start, len) = match old_range.split_once(',') {
        Some((start, len)) => (start, len),
        None => (old_range, "1"),
    };
    let start: usize = start.parse().expect("bad hunk start");
    let len: usize = len.parse().expect("bad hunk length");

    // An empty range names the line *before* the insertion point.
    if len == 0 { start } else { start - 1 }
}

//! Line preprocessor.
//!
//! Normalizes raw source lines before markup scanning, in two passes:
//!
//! 1. Per-line cleanup: strip leading whitespace, drop blank lines and
//!    `#` comment lines, strip `<!-- -->` block comments (which may span
//!    any number of lines).
//! 2. Logical-line merging: a line that ends in the middle of a quote or
//!    a tag is joined with the following line (with a single space) until
//!    it is balanced, reconstructing values and tags that were split
//!    across physical lines.

use crate::scan::is_escaped;
use crate::ScanError;

/// Whether a line is balanced at its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Balance {
    Closed,
    Open,
}

/// Clean raw lines into balanced logical lines.
pub fn clean(lines: &[String]) -> Result<Vec<String>, ScanError> {
    merge_logical_lines(strip_comments(lines))
}

/// Pass 1: whitespace, `#` comments, block comments.
///
/// The `#` check deliberately precedes block-comment stripping, so a `#`
/// line inside an open block comment is dropped whole, including any
/// `-->` it may carry.
fn strip_comments(lines: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut in_block = false;

    for raw in lines {
        let line = raw.trim_start_matches([' ', '\t']);
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (stripped, still_in_block) = strip_block_comments(line, in_block);
        in_block = still_in_block;

        let stripped = stripped.trim_start_matches([' ', '\t']);
        if !stripped.is_empty() {
            out.push(stripped.to_string());
        }
    }

    out
}

/// Remove every block-comment section from one line.
///
/// `in_block` is the carried state from the previous line; the returned
/// flag is the state after this line.
fn strip_block_comments(line: &str, mut in_block: bool) -> (String, bool) {
    let mut out = String::new();
    let mut rest = line;

    loop {
        if in_block {
            match rest.find("-->") {
                Some(pos) => {
                    rest = &rest[pos + 3..];
                    in_block = false;
                }
                None => return (out, true),
            }
        } else {
            match rest.find("<!--") {
                Some(pos) => {
                    out.push_str(&rest[..pos]);
                    rest = &rest[pos + 4..];
                    in_block = true;
                }
                None => {
                    out.push_str(rest);
                    return (out, false);
                }
            }
        }
    }
}

/// Pass 2: merge any line that ends mid-quote or mid-tag with the next.
fn merge_logical_lines(mut lines: Vec<String>) -> Result<Vec<String>, ScanError> {
    let mut i = 0;
    while i < lines.len() {
        match line_balance(&lines[i])? {
            Balance::Closed => i += 1,
            Balance::Open => {
                if i + 1 >= lines.len() {
                    return Err(ScanError::Unterminated(lines[i].clone()));
                }
                let next = lines.remove(i + 1);
                let line = &mut lines[i];
                line.push(' ');
                line.push_str(&next);
            }
        }
    }
    Ok(lines)
}

/// Scan one line, tracking double-quote, single-quote and tag-open state,
/// and reject misplaced carets along the way.
fn line_balance(line: &str) -> Result<Balance, ScanError> {
    let bytes = line.as_bytes();

    let mut dq = false;
    let mut sq = false;
    let mut tag = false;

    for i in 0..bytes.len() {
        let b = bytes[i];

        if b == b'"' && !sq && !is_escaped(line, i) {
            dq = !dq;
        }

        if b == b'\'' && !dq && !is_escaped(line, i) {
            sq = !sq;
        }

        if b == b'<' && !dq && !sq {
            if tag {
                return Err(ScanError::MisplacedOpeningCaret(line.to_string()));
            }
            tag = true;
        }

        if b == b'>' && !dq && !sq {
            if !tag {
                return Err(ScanError::MisplacedClosingCaret(line.to_string()));
            }
            tag = false;
        }
    }

    if dq || sq || tag {
        Ok(Balance::Open)
    } else {
        Ok(Balance::Closed)
    }
}

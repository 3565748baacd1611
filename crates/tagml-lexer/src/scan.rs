//! Quote-sensitive search primitives.
//!
//! Every other search in the lexer and parser is built on
//! [`find_unquoted`]: a character search that ignores occurrences of the
//! needle inside single- or double-quoted regions. Quote kinds do not nest
//! with each other; once a double-quoted region is open, single quotes are
//! literal, and vice versa. A quote only toggles its region when it is not
//! escaped.
//!
//! All significant characters (quotes, carets, `=`, whitespace, the
//! backslash) are ASCII, so the scan operates on bytes; multi-byte UTF-8
//! sequences can never produce a false match.

use crate::ScanError;

/// How carets are treated while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretMode {
    /// `<` and `>` are ordinary characters.
    Ignore,
    /// The haystack is a markup literal: `<` while a tag is already open,
    /// or `>` while none is (both outside quotes), is a structural error.
    Validate,
}

/// Whether the character at `index` is escaped.
///
/// Escaping is decided by the parity of the contiguous run of backslashes
/// immediately before `index`: an odd run means escaped.
pub fn is_escaped(haystack: &str, index: usize) -> bool {
    let bytes = haystack.as_bytes();
    let mut run = 0;
    while run < index && bytes[index - 1 - run] == b'\\' {
        run += 1;
    }
    run % 2 == 1
}

/// Find the first occurrence of `needle` at or after `from` that is not
/// inside a quoted region.
///
/// Searching *for* a quote character reports the first unescaped
/// occurrence that is not hidden inside the other kind of quote. In
/// [`CaretMode::Validate`] the search fails on misplaced carets, but a
/// caret that is itself the needle is still reported.
pub fn find_unquoted(
    haystack: &str,
    needle: char,
    from: usize,
    mode: CaretMode,
) -> Result<Option<usize>, ScanError> {
    debug_assert!(needle.is_ascii());
    let needle = needle as u8;
    let bytes = haystack.as_bytes();

    let mut dq = false;
    let mut sq = false;
    let mut tag = false;

    for i in from..bytes.len() {
        let b = bytes[i];

        if b == b'"' && !sq && !is_escaped(haystack, i) {
            if needle == b'"' {
                return Ok(Some(i));
            }
            dq = !dq;
        }

        if b == b'\'' && !dq && !is_escaped(haystack, i) {
            if needle == b'\'' {
                return Ok(Some(i));
            }
            sq = !sq;
        }

        if b == b'<' && !dq && !sq {
            if tag && mode == CaretMode::Validate {
                return Err(ScanError::MisplacedOpeningCaret(haystack.to_string()));
            }
            tag = true;
        }

        if b == b'>' && !dq && !sq {
            if !tag && mode == CaretMode::Validate {
                return Err(ScanError::MisplacedClosingCaret(haystack.to_string()));
            }
            tag = false;
        }

        if !dq && !sq && b == needle {
            return Ok(Some(i));
        }
    }

    Ok(None)
}

/// Position of the next whitespace character at or after `from`, ignoring
/// whitespace inside quoted regions. Quote state starts fresh at `from`.
pub fn next_space(haystack: &str, from: usize) -> Option<usize> {
    let bytes = haystack.as_bytes();

    let mut dq = false;
    let mut sq = false;

    for i in from..bytes.len() {
        let b = bytes[i];

        if b == b'"' && !sq && !is_escaped(haystack, i) {
            dq = !dq;
        }
        if b == b'\'' && !dq && !is_escaped(haystack, i) {
            sq = !sq;
        }
        if !dq && !sq && b.is_ascii_whitespace() {
            return Some(i);
        }
    }

    None
}

/// Position of the next non-whitespace character at or after `from`, or
/// `haystack.len()` if only whitespace remains.
pub fn next_non_space(haystack: &str, from: usize) -> usize {
    let bytes = haystack.as_bytes();
    let mut i = from;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

//! Cursor-context helpers for provider guards.

use crate::parser::{ScanOptions, scan};

fn is_symbol_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn is_sigil(b: u8) -> bool {
    b == b'@' || b == b'.'
}

/// Extract the `@variable` or `.mixin` token at a cursor position.
///
/// `line` and `column` are 0-indexed, the column a byte offset within the
/// line. Returns `None` when the position is past the line, inside a
/// comment, or not on (or immediately after) a sigil-prefixed token.
pub fn symbol_at_position(text: &str, line: usize, column: usize) -> Option<String> {
    let mut line_start = 0;
    for _ in 0..line {
        line_start += text[line_start..].find('\n')? + 1;
    }
    let line_end = text[line_start..]
        .find('\n')
        .map_or(text.len(), |rel| line_start + rel);

    let offset = line_start + column;
    if offset > line_end {
        return None;
    }

    let bytes = text.as_bytes();

    // Walk left over identifier bytes to find where the token starts.
    let mut start = offset;
    while start > line_start && is_symbol_byte(bytes[start - 1]) {
        start -= 1;
    }

    let sigil = if start > line_start && is_sigil(bytes[start - 1]) {
        start - 1
    } else if offset < line_end && is_sigil(bytes[offset]) {
        offset
    } else {
        return None;
    };

    let mut end = sigil + 1;
    while end < line_end && is_symbol_byte(bytes[end]) {
        end += 1;
    }
    if end == sigil + 1 {
        return None;
    }

    let mask = scan(text, ScanOptions::LESS);
    if mask.is_comment(sigil) {
        return None;
    }

    Some(text[sigil..end].to_string())
}

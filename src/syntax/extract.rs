//! Variable and mixin extraction over comment-stripped text.

use smol_str::SmolStr;

use crate::base::Position;
use crate::parser::{ScanOptions, find_matching_brace, find_matching_paren, scan, strip_comments};

use super::{Mixin, Variable};

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Extract all `@name: value;` declarations from `text`.
///
/// Scanning is line-oriented: a declaration must close with `;` on the line
/// it starts on, and every declaration on a line is captured. The value is
/// the trimmed text between `:` and `;`, with no expression parsing.
pub fn extract_variables(text: &str) -> Vec<Variable> {
    let clean = strip_comments(text);
    let mut variables = Vec::new();

    for (line_idx, line) in clean.split('\n').enumerate() {
        let bytes = line.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] != b'@' {
                i += 1;
                continue;
            }
            let name_start = i;
            let mut j = i + 1;
            while j < bytes.len() && is_ident_byte(bytes[j]) {
                j += 1;
            }
            if j == i + 1 {
                i += 1;
                continue;
            }
            let mut k = j;
            while k < bytes.len() && (bytes[k] == b' ' || bytes[k] == b'\t') {
                k += 1;
            }
            if k >= bytes.len() || bytes[k] != b':' {
                i = j;
                continue;
            }
            let value_start = k + 1;
            let Some(rel) = line[value_start..].find(';') else {
                i = j;
                continue;
            };
            let value_end = value_start + rel;
            if value_end == value_start {
                // `@a:;` has no value text at all and is not a declaration.
                i = j;
                continue;
            }
            variables.push(Variable {
                name: SmolStr::new(&line[name_start..j]),
                value: line[value_start..value_end].trim().to_string(),
                position: Position::new(line_idx, name_start),
                source_file: None,
                owning_entry: None,
            });
            i = value_end + 1;
        }
    }

    variables
}

fn is_mixin_boundary(prev: u8) -> bool {
    prev.is_ascii_whitespace()
        || matches!(
            prev,
            b';' | b'{' | b'}' | b'(' | b')' | b',' | b'>' | b'+' | b'~'
        )
}

/// Extract all `.name(params) { ... }` mixin blocks from `text`.
///
/// A mixin start is recognized only at a token boundary, so dots inside
/// identifiers or numbers (`0.5px`, `a.b`) are skipped. The parameter list
/// may nest parentheses; the body runs through the brace matching the
/// opening one, or through end-of-text when the input is truncated.
pub fn extract_mixins(text: &str) -> Vec<Mixin> {
    let clean = strip_comments(text);
    let mask = scan(&clean, ScanOptions::LESS);
    let bytes = clean.as_bytes();
    let mut mixins = Vec::new();

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'.' || mask.is_string(i) {
            i += 1;
            continue;
        }
        if i > 0 && !is_mixin_boundary(bytes[i - 1]) {
            i += 1;
            continue;
        }
        let name_start = i;
        let mut j = i + 1;
        while j < bytes.len() && is_ident_byte(bytes[j]) {
            j += 1;
        }
        if j == i + 1 {
            i += 1;
            continue;
        }

        let mut k = j;
        while k < bytes.len() && bytes[k].is_ascii_whitespace() {
            k += 1;
        }

        let mut params = String::new();
        if k < bytes.len() && bytes[k] == b'(' {
            let Some(close) = find_matching_paren(&clean, &mask, k) else {
                i = j;
                continue;
            };
            params = clean[k + 1..close].trim().to_string();
            k = close + 1;
            while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
        }

        if k >= bytes.len() || bytes[k] != b'{' {
            i = j;
            continue;
        }

        // Truncated input keeps the body through end-of-text by design.
        let body_end = match find_matching_brace(&clean, &mask, k) {
            Some(close) => close + 1,
            None => clean.len(),
        };

        let prefix = &clean[..name_start];
        let line = prefix.matches('\n').count();
        let column = name_start - prefix.rfind('\n').map_or(0, |p| p + 1);

        mixins.push(Mixin {
            name: SmolStr::new(&clean[name_start..j]),
            params,
            body: clean[name_start..body_end].to_string(),
            position: Position::new(line, column),
            source_file: None,
            owning_entry: None,
        });

        // Resume right after the name so declarations nested in this body
        // are still reported as independent entries.
        i = j;
    }

    mixins
}

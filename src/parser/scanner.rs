//! Byte-classifying scanner over stylesheet or relaxed-JSON text.
//!
//! The scanner walks the input once and records, per byte, whether it lies
//! in code, a `//` line comment, a `/* */` block comment, or a quoted
//! string. Everything else in the crate is built on those classifications:
//! comment stripping preserves byte offsets by blanking comment bytes to
//! spaces, and cursor-context queries ask the mask directly.

/// Classification of a single input byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteKind {
    Code,
    LineComment,
    BlockComment,
    Str,
}

/// Scanner dialect options.
///
/// Less guards `//` so that protocol-relative URLs (`http://...`) in plain
/// code are not read as comments: a line comment only opens when the
/// preceding byte is whitespace or one of `{ ( ; ,` (start-of-text counts
/// as whitespace). JSONC has no such ambiguity and uses only double-quoted
/// strings.
#[derive(Clone, Copy, Debug)]
pub struct ScanOptions {
    /// Require a boundary byte before `//` for it to open a line comment.
    pub guarded_line_comments: bool,
    /// Treat single quotes as string delimiters (in addition to double).
    pub single_quote_strings: bool,
}

impl ScanOptions {
    /// Options for Less stylesheet text.
    pub const LESS: Self = Self {
        guarded_line_comments: true,
        single_quote_strings: true,
    };

    /// Options for JSON-with-comments configuration text.
    pub const JSONC: Self = Self {
        guarded_line_comments: false,
        single_quote_strings: false,
    };
}

/// Per-byte classification of one scanned text.
#[derive(Clone, Debug)]
pub struct ScanMask {
    kinds: Vec<ByteKind>,
}

impl ScanMask {
    /// Classification of the byte at `offset`; `None` past end-of-text.
    pub fn kind(&self, offset: usize) -> Option<ByteKind> {
        self.kinds.get(offset).copied()
    }

    /// True if the byte at `offset` lies inside a comment (markers included).
    pub fn is_comment(&self, offset: usize) -> bool {
        matches!(
            self.kind(offset),
            Some(ByteKind::LineComment) | Some(ByteKind::BlockComment)
        )
    }

    /// True if the byte at `offset` lies inside a quoted string.
    pub fn is_string(&self, offset: usize) -> bool {
        self.kind(offset) == Some(ByteKind::Str)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

fn is_line_comment_boundary(prev: u8) -> bool {
    prev.is_ascii_whitespace() || matches!(prev, b'{' | b'(' | b';' | b',')
}

/// Scan `text` and classify every byte.
pub fn scan(text: &str, opts: ScanOptions) -> ScanMask {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        Code,
        Single,
        Double,
        Line,
        Block,
    }

    let bytes = text.as_bytes();
    let mut kinds = vec![ByteKind::Code; bytes.len()];
    let mut state = State::Code;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();

        match state {
            State::Line => {
                if b == b'\n' || b == b'\r' {
                    state = State::Code;
                } else {
                    kinds[i] = ByteKind::LineComment;
                }
                i += 1;
            }
            State::Block => {
                kinds[i] = ByteKind::BlockComment;
                if b == b'*' && next == Some(b'/') {
                    kinds[i + 1] = ByteKind::BlockComment;
                    state = State::Code;
                    i += 2;
                } else {
                    i += 1;
                }
            }
            State::Single => {
                kinds[i] = ByteKind::Str;
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == b'\'' {
                    state = State::Code;
                }
                i += 1;
            }
            State::Double => {
                kinds[i] = ByteKind::Str;
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == b'"' {
                    state = State::Code;
                }
                i += 1;
            }
            State::Code => {
                if b == b'\'' && opts.single_quote_strings {
                    kinds[i] = ByteKind::Str;
                    state = State::Single;
                    escaped = false;
                    i += 1;
                } else if b == b'"' {
                    kinds[i] = ByteKind::Str;
                    state = State::Double;
                    escaped = false;
                    i += 1;
                } else if b == b'/' && next == Some(b'*') {
                    kinds[i] = ByteKind::BlockComment;
                    kinds[i + 1] = ByteKind::BlockComment;
                    state = State::Block;
                    i += 2;
                } else if b == b'/'
                    && next == Some(b'/')
                    && (!opts.guarded_line_comments
                        || i == 0
                        || is_line_comment_boundary(bytes[i - 1]))
                {
                    kinds[i] = ByteKind::LineComment;
                    kinds[i + 1] = ByteKind::LineComment;
                    state = State::Line;
                    i += 2;
                } else {
                    i += 1;
                }
            }
        }
    }

    ScanMask { kinds }
}

fn blank_comments(text: &str, mask: &ScanMask) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        if mask.is_comment(i) && c != '\n' && c != '\r' {
            // One space per byte keeps byte offsets of surrounding code stable.
            for _ in 0..c.len_utf8() {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Strip `//` and `/* */` comments from Less text.
///
/// Comment content is blanked to spaces rather than removed, and newlines
/// inside comments are preserved, so line/column positions of the
/// surrounding code are unaffected. Comment-like sequences inside quoted
/// strings are left alone.
pub fn strip_comments(text: &str) -> String {
    blank_comments(text, &scan(text, ScanOptions::LESS))
}

/// Strip comments and trailing commas from JSONC (JSON with comments) text.
///
/// tsconfig-style files tolerate both; `serde_json` tolerates neither. The
/// result parses as plain JSON when the input was well-formed JSONC.
pub fn strip_jsonc(text: &str) -> String {
    let stripped = blank_comments(text, &scan(text, ScanOptions::JSONC));
    strip_trailing_commas(&stripped)
}

fn strip_trailing_commas(text: &str) -> String {
    let mask = scan(text, ScanOptions::JSONC);
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        if c == ',' && !mask.is_string(i) {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if matches!(bytes.get(j), Some(&b'}') | Some(&b']')) {
                out.push(' ');
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Find the `}` matching the `{` at byte offset `open`, by depth counting.
///
/// Braces inside quoted strings are ignored via the mask. Returns `None`
/// when the input ends before the block closes (truncated fragment).
pub fn find_matching_brace(text: &str, mask: &ScanMask, open: usize) -> Option<usize> {
    find_matching(text, mask, open, b'{', b'}')
}

/// Find the `)` matching the `(` at byte offset `open`, by depth counting.
pub fn find_matching_paren(text: &str, mask: &ScanMask, open: usize) -> Option<usize> {
    find_matching(text, mask, open, b'(', b')')
}

fn find_matching(
    text: &str,
    mask: &ScanMask,
    open: usize,
    open_byte: u8,
    close_byte: u8,
) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &b) in text.as_bytes().iter().enumerate().skip(open) {
        if mask.is_string(i) || mask.is_comment(i) {
            continue;
        }
        if b == open_byte {
            depth += 1;
        } else if b == close_byte {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

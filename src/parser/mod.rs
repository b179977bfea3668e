//! Shared character scanner for the Less dialect and its config files.
//!
//! One tokenizing pass classifies every byte of the input as code, comment,
//! or string content. Symbol extraction, import-path extraction, and the
//! relaxed-JSON configuration reader all consume this single scanner, so
//! escape-handling edge cases cannot drift between copies.

mod scanner;

pub use scanner::{
    ByteKind, ScanMask, ScanOptions, find_matching_brace, find_matching_paren, scan,
    strip_comments, strip_jsonc,
};

//! Symbol data model and declaration extraction for the Less dialect.
//!
//! The extraction functions are deliberately not a stylesheet grammar: they
//! recognize variable declarations (`@name: value;`) and mixin blocks
//! (`.name(params) { ... }`) in comment-stripped text and nothing else.
//! Declarations nested inside other mixins' bodies are reported as
//! independent top-level entries, matching the dialect's flat declaration
//! visibility.

mod extract;

#[cfg(test)]
mod tests;

pub use extract::{extract_mixins, extract_variables};

use std::path::PathBuf;

use smol_str::SmolStr;

use crate::base::Position;

/// Kind of an indexed symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Variable,
    Mixin,
}

impl SymbolKind {
    pub fn display(self) -> &'static str {
        match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Mixin => "mixin",
        }
    }
}

/// A `@name: value;` declaration occurrence.
///
/// One `Variable` is produced per occurrence; duplicate names are kept in
/// storage and collapsed only in the cache's de-duplicated views. The parser
/// leaves `source_file` and `owning_entry` unset; the index engine stamps
/// the owning entry point and the symbol cache stamps the source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    /// Name including the leading `@` sigil.
    pub name: SmolStr,
    /// Trimmed raw right-hand side, unparsed.
    pub value: String,
    /// Declaration site of the `@` sigil.
    pub position: Position,
    pub source_file: Option<PathBuf>,
    pub owning_entry: Option<PathBuf>,
}

/// A `.name(params) { ... }` mixin block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mixin {
    /// Name including the leading `.`.
    pub name: SmolStr,
    /// Trimmed content of the parameter list. Empty both for `.m()` and for
    /// a parameterless `.m`; whether parentheses were present is not
    /// distinguished beyond the body text itself.
    pub params: String,
    /// Full signature-plus-braces substring, through the matching close
    /// brace or end-of-text for truncated input.
    pub body: String,
    /// Declaration site of the leading `.`.
    pub position: Position,
    pub source_file: Option<PathBuf>,
    pub owning_entry: Option<PathBuf>,
}

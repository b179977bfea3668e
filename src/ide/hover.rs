//! Hover information queries.

use std::path::PathBuf;

use smol_str::SmolStr;

use crate::base::Position;
use crate::syntax::SymbolKind;

use super::Analysis;

/// Result of a hover request: the raw declaration text of the first-writer
/// symbol with that name. Rendering is the presentation layer's concern.
#[derive(Clone, Debug)]
pub struct HoverResult {
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// The variable's raw value, or the mixin's full signature-plus-braces
    /// body.
    pub contents: String,
    pub source_file: Option<PathBuf>,
    pub position: Position,
}

/// Hover data for a sigil-prefixed symbol name (`@var` or `.mixin`).
pub fn hover(analysis: &Analysis<'_>, symbol: &str) -> Option<HoverResult> {
    if symbol.starts_with('@') {
        analysis.find_variable(symbol).map(|variable| HoverResult {
            name: variable.name.clone(),
            kind: SymbolKind::Variable,
            contents: variable.value.clone(),
            source_file: variable.source_file.clone(),
            position: variable.position,
        })
    } else if symbol.starts_with('.') {
        analysis.find_mixin(symbol).map(|mixin| HoverResult {
            name: mixin.name.clone(),
            kind: SymbolKind::Mixin,
            contents: mixin.body.clone(),
            source_file: mixin.source_file.clone(),
            position: mixin.position,
        })
    } else {
        None
    }
}

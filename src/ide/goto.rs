//! Go-to-definition queries.

use std::path::PathBuf;

use smol_str::SmolStr;

use crate::base::Position;
use crate::syntax::SymbolKind;

use super::Analysis;

/// A target location for go-to-definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoTarget {
    pub file: PathBuf,
    pub position: Position,
    pub name: SmolStr,
    pub kind: SymbolKind,
}

/// Declaration sites for a sigil-prefixed symbol name, every same-name
/// occurrence in document insertion order. Symbols without a recorded
/// source file cannot be navigated to and are skipped.
pub fn goto_definition(analysis: &Analysis<'_>, symbol: &str) -> Vec<GotoTarget> {
    if symbol.starts_with('@') {
        analysis
            .variables_named(symbol)
            .iter()
            .filter_map(|variable| {
                variable.source_file.clone().map(|file| GotoTarget {
                    file,
                    position: variable.position,
                    name: variable.name.clone(),
                    kind: SymbolKind::Variable,
                })
            })
            .collect()
    } else if symbol.starts_with('.') {
        analysis
            .mixins_named(symbol)
            .iter()
            .filter_map(|mixin| {
                mixin.source_file.clone().map(|file| GotoTarget {
                    file,
                    position: mixin.position,
                    name: mixin.name.clone(),
                    kind: SymbolKind::Mixin,
                })
            })
            .collect()
    } else {
        Vec::new()
    }
}

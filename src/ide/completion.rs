//! Completion candidate queries.

use std::path::PathBuf;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::syntax::{Mixin, SymbolKind, Variable};

use super::Analysis;

/// A completion candidate. Raw data only: the detail string is the
/// variable's raw value or the mixin's raw parameter list, for the
/// presentation layer to render.
#[derive(Clone, Debug)]
pub struct CompletionItem {
    pub label: SmolStr,
    pub kind: SymbolKind,
    pub detail: Option<String>,
    pub source_file: Option<PathBuf>,
    /// Entry point owning the declaration; an auto-import feature builds
    /// its import path from this.
    pub owning_entry: Option<PathBuf>,
}

impl CompletionItem {
    fn from_variable(variable: &Arc<Variable>) -> Self {
        Self {
            label: variable.name.clone(),
            kind: SymbolKind::Variable,
            detail: Some(variable.value.clone()),
            source_file: variable.source_file.clone(),
            owning_entry: variable.owning_entry.clone(),
        }
    }

    fn from_mixin(mixin: &Arc<Mixin>) -> Self {
        Self {
            label: mixin.name.clone(),
            kind: SymbolKind::Mixin,
            detail: (!mixin.params.is_empty()).then(|| mixin.params.clone()),
            source_file: mixin.source_file.clone(),
            owning_entry: mixin.owning_entry.clone(),
        }
    }
}

/// Completion candidates matching `prefix`, de-duplicated by name.
///
/// An empty prefix returns everything; a sigil-leading prefix (`@…`, `.…`)
/// naturally restricts the result to one symbol kind.
pub fn completions(analysis: &Analysis<'_>, prefix: &str) -> Vec<CompletionItem> {
    let mut items = Vec::new();
    for variable in analysis.unique_variables() {
        if variable.name.starts_with(prefix) {
            items.push(CompletionItem::from_variable(variable));
        }
    }
    for mixin in analysis.unique_mixins() {
        if mixin.name.starts_with(prefix) {
            items.push(CompletionItem::from_mixin(mixin));
        }
    }
    items
}

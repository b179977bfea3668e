//! Symbol cache with lazily rebuilt aggregate views.
//!
//! The cache owns per-file symbol records (replaced wholesale by index
//! diffs) and derives cross-file aggregates on demand: flat lists,
//! de-duplicated-by-name lists (first writer wins, in document insertion
//! order), and name → symbol indexes, each available globally or scoped to
//! one workspace root. Every mutation bumps a revision counter; derived
//! views are rebuilt on the next snapshot, and workspace-scoped views are
//! revalidated by revision without recomputing the global ones.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::normalize_path;
use crate::index::IndexDiff;
use crate::syntax::{Mixin, Variable};

/// One file's cached symbols.
#[derive(Clone, Debug)]
pub struct DocumentSymbols {
    pub variables: Vec<Arc<Variable>>,
    pub mixins: Vec<Arc<Mixin>>,
    pub version: u64,
    /// Workspace root the record was stamped with, when known. Scoped
    /// queries match on this exactly, falling back to path containment.
    pub workspace_root: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct DerivedSymbols {
    all_variables: Vec<Arc<Variable>>,
    all_mixins: Vec<Arc<Mixin>>,
    unique_variables: Vec<Arc<Variable>>,
    unique_mixins: Vec<Arc<Mixin>>,
    variable_by_name: FxHashMap<SmolStr, Arc<Variable>>,
    mixin_by_name: FxHashMap<SmolStr, Arc<Mixin>>,
    variables_by_name: FxHashMap<SmolStr, Vec<Arc<Variable>>>,
    mixins_by_name: FxHashMap<SmolStr, Vec<Arc<Mixin>>>,
}

/// Owns all cached symbol state. Mutate via [`SymbolCache::set_document`] /
/// [`SymbolCache::remove_document`] (or [`SymbolCache::apply_diff`]), then
/// take a consistent [`Analysis`] snapshot for querying.
#[derive(Debug, Default)]
pub struct SymbolCache {
    files: IndexMap<PathBuf, DocumentSymbols>,
    revision: u64,
    derived_dirty: bool,
    derived: DerivedSymbols,
    workspace_derived: FxHashMap<PathBuf, (u64, DerivedSymbols)>,
}

impl SymbolCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one file's record wholesale, stamping `source_file` on every
    /// symbol, and mark derived views dirty.
    pub fn set_document(
        &mut self,
        uri: &Path,
        variables: Vec<Variable>,
        mixins: Vec<Mixin>,
        version: u64,
        workspace_root: Option<&Path>,
    ) {
        let uri = normalize_path(uri);
        let variables = variables
            .into_iter()
            .map(|mut variable| {
                variable.source_file = Some(uri.clone());
                Arc::new(variable)
            })
            .collect();
        let mixins = mixins
            .into_iter()
            .map(|mut mixin| {
                mixin.source_file = Some(uri.clone());
                Arc::new(mixin)
            })
            .collect();
        self.files.insert(
            uri,
            DocumentSymbols {
                variables,
                mixins,
                version,
                workspace_root: workspace_root.map(normalize_path),
            },
        );
        self.mark_dirty();
    }

    /// Delete one file's record. A miss is a no-op and does not dirty the
    /// derived views.
    pub fn remove_document(&mut self, uri: &Path) {
        if self.files.shift_remove(&normalize_path(uri)).is_some() {
            self.mark_dirty();
        }
    }

    /// Apply an index diff: upserts replace records, removals delete them.
    pub fn apply_diff(&mut self, diff: IndexDiff, workspace_root: Option<&Path>) {
        for (path, payload) in diff.upserts {
            self.set_document(
                &path,
                payload.variables,
                payload.mixins,
                payload.version,
                workspace_root,
            );
        }
        for path in &diff.removals {
            self.remove_document(path);
        }
    }

    pub fn document(&self, uri: &Path) -> Option<&DocumentSymbols> {
        self.files.get(&normalize_path(uri))
    }

    pub fn contains(&self, uri: &Path) -> bool {
        self.files.contains_key(&normalize_path(uri))
    }

    pub fn clear(&mut self) {
        if self.files.is_empty() {
            return;
        }
        self.files.clear();
        self.mark_dirty();
    }

    /// Number of cached file records.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Get a consistent snapshot for querying, optionally scoped to one
    /// workspace root. Dirty derived views are rebuilt first; a scoped view
    /// is rebuilt only when its revision is stale.
    pub fn analysis(&mut self, workspace_root: Option<&Path>) -> Analysis<'_> {
        if self.derived_dirty {
            self.derived = self.build_derived(None);
            self.derived_dirty = false;
            let revision = self.revision;
            self.workspace_derived
                .retain(|_, (cached_revision, _)| *cached_revision == revision);
        }

        let scoped_key = workspace_root.map(normalize_path);
        if let Some(key) = &scoped_key {
            let stale = self
                .workspace_derived
                .get(key)
                .is_none_or(|(cached_revision, _)| *cached_revision != self.revision);
            if stale {
                let derived = self.build_derived(Some(key.as_path()));
                self.workspace_derived
                    .insert(key.clone(), (self.revision, derived));
            }
        }

        let derived = scoped_key
            .as_ref()
            .and_then(|key| self.workspace_derived.get(key))
            .map(|(_, derived)| derived)
            .unwrap_or(&self.derived);
        Analysis { derived }
    }

    fn mark_dirty(&mut self) {
        self.revision += 1;
        self.derived_dirty = true;
    }

    fn build_derived(&self, root: Option<&Path>) -> DerivedSymbols {
        let mut derived = DerivedSymbols::default();
        for (path, document) in &self.files {
            if let Some(root) = root {
                if !document_in_workspace(path, document.workspace_root.as_deref(), root) {
                    continue;
                }
            }
            for variable in &document.variables {
                derived.all_variables.push(variable.clone());
                if !derived.variable_by_name.contains_key(&variable.name) {
                    derived
                        .variable_by_name
                        .insert(variable.name.clone(), variable.clone());
                    derived.unique_variables.push(variable.clone());
                }
                derived
                    .variables_by_name
                    .entry(variable.name.clone())
                    .or_default()
                    .push(variable.clone());
            }
            for mixin in &document.mixins {
                derived.all_mixins.push(mixin.clone());
                if !derived.mixin_by_name.contains_key(&mixin.name) {
                    derived
                        .mixin_by_name
                        .insert(mixin.name.clone(), mixin.clone());
                    derived.unique_mixins.push(mixin.clone());
                }
                derived
                    .mixins_by_name
                    .entry(mixin.name.clone())
                    .or_default()
                    .push(mixin.clone());
            }
        }
        derived
    }
}

/// A document belongs to a workspace root by exact stamped-root match when
/// stamped, else by path-prefix containment. A stamped nested root never
/// leaks into an ancestor root's scope.
fn document_in_workspace(path: &Path, stamped_root: Option<&Path>, root: &Path) -> bool {
    match stamped_root {
        Some(stamped) => stamped == root,
        None => path.starts_with(root),
    }
}

/// Read-only snapshot over the cache's derived views.
#[derive(Clone, Copy)]
pub struct Analysis<'a> {
    derived: &'a DerivedSymbols,
}

impl<'a> Analysis<'a> {
    /// Every variable occurrence, in document insertion order.
    pub fn all_variables(&self) -> &'a [Arc<Variable>] {
        &self.derived.all_variables
    }

    /// Every mixin occurrence, in document insertion order.
    pub fn all_mixins(&self) -> &'a [Arc<Mixin>] {
        &self.derived.all_mixins
    }

    /// De-duplicated variables: the first occurrence of each name wins.
    pub fn unique_variables(&self) -> &'a [Arc<Variable>] {
        &self.derived.unique_variables
    }

    /// De-duplicated mixins: the first occurrence of each name wins.
    pub fn unique_mixins(&self) -> &'a [Arc<Mixin>] {
        &self.derived.unique_mixins
    }

    pub fn find_variable(&self, name: &str) -> Option<&'a Arc<Variable>> {
        self.derived.variable_by_name.get(name)
    }

    pub fn find_mixin(&self, name: &str) -> Option<&'a Arc<Mixin>> {
        self.derived.mixin_by_name.get(name)
    }

    /// Every occurrence of one variable name, in document insertion order.
    pub fn variables_named(&self, name: &str) -> &'a [Arc<Variable>] {
        self.derived
            .variables_by_name
            .get(name)
            .map_or(&[], Vec::as_slice)
    }

    /// Every occurrence of one mixin name, in document insertion order.
    pub fn mixins_named(&self, name: &str) -> &'a [Arc<Mixin>] {
        self.derived
            .mixins_by_name
            .get(name)
            .map_or(&[], Vec::as_slice)
    }
}

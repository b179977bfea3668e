//! Index deltas produced by rebuild operations.

use std::path::PathBuf;

use indexmap::IndexMap;

use crate::syntax::{Mixin, Variable};

/// Per-file payload carried by an upsert: the file's symbols, each stamped
/// with its primary owning entry point, and the engine version at emission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilePayload {
    pub variables: Vec<Variable>,
    pub mixins: Vec<Mixin>,
    pub version: u64,
}

/// The sole output contract between the index engine and the symbol cache.
///
/// `upserts` replace a file's cached record wholesale; `removals` delete
/// records for files no entry point reaches any more.
#[derive(Clone, Debug, Default)]
pub struct IndexDiff {
    pub upserts: IndexMap<PathBuf, FilePayload>,
    pub removals: Vec<PathBuf>,
}

impl IndexDiff {
    pub fn is_empty(&self) -> bool {
        self.upserts.is_empty() && self.removals.is_empty()
    }
}

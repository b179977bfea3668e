#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use lesser::ide::SymbolCache;

/// A throwaway on-disk workspace for engine tests.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp workspace"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, content).expect("write fixture file");
        path
    }

    pub fn remove(&self, rel: &str) {
        fs::remove_file(self.path(rel)).expect("remove fixture file");
    }
}

/// Flatten a cache into comparable (file, name, declaration) triples,
/// sorted, for convergence assertions.
pub fn symbol_fingerprint(cache: &mut SymbolCache) -> Vec<(PathBuf, String, String)> {
    let analysis = cache.analysis(None);
    let mut entries: Vec<(PathBuf, String, String)> = Vec::new();
    for variable in analysis.all_variables() {
        entries.push((
            variable.source_file.clone().unwrap_or_default(),
            variable.name.to_string(),
            variable.value.clone(),
        ));
    }
    for mixin in analysis.all_mixins() {
        entries.push((
            mixin.source_file.clone().unwrap_or_default(),
            mixin.name.to_string(),
            mixin.body.clone(),
        ));
    }
    entries.sort();
    entries
}

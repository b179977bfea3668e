//! Circular-import checking over on-disk import edges.
//!
//! Used before inserting a new import: adding `@import target` to
//! `current_file` closes a cycle when `target` already (transitively)
//! imports `current_file`. The walk reads current file contents rather than
//! any index, so the answer is correct even for files the engine has not
//! indexed.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use crate::base::normalize_path;

use super::{AliasConfig, extract_import_paths, resolve_import_path};

/// Would importing `target_file` from `current_file` create a cycle?
///
/// Trivially true for a self-import. Unreadable files end the walk along
/// that edge, same as the resolver treats them.
pub fn would_create_circular_import(
    target_file: &Path,
    current_file: &Path,
    aliases: &AliasConfig,
) -> bool {
    let target = normalize_path(target_file);
    let needle = normalize_path(current_file);
    if target == needle {
        return true;
    }

    let mut visited: FxHashSet<PathBuf> = FxHashSet::default();
    let mut stack = vec![target];
    while let Some(file) = stack.pop() {
        if file == needle {
            return true;
        }
        if !visited.insert(file.clone()) {
            continue;
        }
        for import in read_resolved_imports(&file, aliases) {
            stack.push(import);
        }
    }
    false
}

fn read_resolved_imports(file: &Path, aliases: &AliasConfig) -> Vec<PathBuf> {
    if !file.is_file() {
        return Vec::new();
    }
    let Ok(content) = std::fs::read_to_string(file) else {
        return Vec::new();
    };
    extract_import_paths(&content)
        .iter()
        .filter_map(|raw| resolve_import_path(raw, file, aliases))
        .collect()
}

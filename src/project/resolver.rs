//! Import path extraction, resolution, and inversion.

use std::path::{Path, PathBuf};

use crate::base::constants::{LESS_EXTENSION, LESS_INDEX_FILE};
use crate::base::{append_extension, normalize_path, relative_path};
use crate::parser::strip_comments;

use super::AliasConfig;

/// Extract the quoted paths of all `@import` directives in document order,
/// duplicates included.
///
/// Recognizes `@import 'path';`, `@import "path";`, and the modifier form
/// `@import (reference) 'path';`. Modifiers are not interpreted. Comments
/// are stripped first with the shared scanner.
pub fn extract_import_paths(text: &str) -> Vec<String> {
    let clean = strip_comments(text);
    let bytes = clean.as_bytes();
    let mut paths = Vec::new();

    let mut i = 0;
    while let Some(found) = clean[i..].find("@import") {
        let start = i + found;
        let mut j = start + "@import".len();

        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }

        if j < bytes.len() && bytes[j] == b'(' {
            let Some(rel) = clean[j..].find(')') else {
                i = start + "@import".len();
                continue;
            };
            j += rel + 1;
            while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
        }

        if j < bytes.len() && (bytes[j] == b'\'' || bytes[j] == b'"') {
            let path_start = j + 1;
            let end = clean[path_start..]
                .find(['\'', '"'])
                .map(|rel| path_start + rel);
            if let Some(end) = end {
                if end > path_start {
                    paths.push(clean[path_start..end].to_string());
                }
                i = end + 1;
                continue;
            }
        }

        i = start + "@import".len();
    }

    paths
}

/// Resolve a raw import string to an existing file on disk.
///
/// Returns `None` for empty paths, protocol URLs, and protocol-relative
/// paths, and for anything that does not land on an existing regular file —
/// an unresolvable import is a normal outcome (external dependency), not an
/// error. Alias prefixes take precedence over relative/absolute resolution,
/// longest alias first.
pub fn resolve_import_path(
    raw_path: &str,
    current_file: &Path,
    aliases: &AliasConfig,
) -> Option<PathBuf> {
    let clean = raw_path.trim();
    if clean.is_empty() || clean.starts_with("//") {
        return None;
    }
    let lower = clean.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return None;
    }

    let mut entries: Vec<(&String, &PathBuf)> = aliases.iter().collect();
    entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    for (alias, dir) in entries {
        if clean == alias.as_str() {
            if let Some(found) = resolve_with_candidates(dir) {
                return Some(found);
            }
        } else if let Some(rest) = clean
            .strip_prefix(alias.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
        {
            if let Some(found) = resolve_with_candidates(&dir.join(rest)) {
                return Some(found);
            }
        }
    }

    if clean.starts_with("./") || clean.starts_with("../") {
        let base = match current_file.parent() {
            Some(dir) => dir.join(clean),
            None => PathBuf::from(clean),
        };
        if let Some(found) = resolve_with_candidates(&normalize_path(&base)) {
            return Some(found);
        }
    }

    if Path::new(clean).is_absolute() {
        if let Some(found) = resolve_with_candidates(Path::new(clean)) {
            return Some(found);
        }
    }

    None
}

/// Try the candidate files for a resolved base path: the literal path, then
/// (when it has no extension) the path with the dialect extension appended,
/// then the directory-default index file. First existing regular file wins.
fn resolve_with_candidates(base: &Path) -> Option<PathBuf> {
    let mut candidates = vec![base.to_path_buf()];
    if base.extension().is_none() {
        candidates.push(append_extension(base, LESS_EXTENSION));
        candidates.push(base.join(LESS_INDEX_FILE));
    }
    candidates
        .into_iter()
        .find(|candidate| candidate.is_file())
        .map(|candidate| normalize_path(&candidate))
}

/// Build the import string that would reach `target`: the longest alias
/// whose directory contains it, else a `./`-prefixed relative path from the
/// current file's directory (or from the workspace root when no current
/// file is given).
pub fn build_import_path(
    target: &Path,
    workspace_root: &Path,
    current_file: Option<&Path>,
    aliases: &AliasConfig,
) -> String {
    let target = normalize_path(target);

    let mut entries: Vec<(&String, &PathBuf)> = aliases.iter().collect();
    entries.sort_by(|a, b| b.1.as_os_str().len().cmp(&a.1.as_os_str().len()));
    for (alias, dir) in entries {
        if target == *dir {
            return alias.clone();
        }
        if let Ok(rest) = target.strip_prefix(dir) {
            return format!("{alias}/{}", forward_slashes(rest));
        }
    }

    let base_dir = current_file
        .and_then(Path::parent)
        .unwrap_or(workspace_root);
    let rel = forward_slashes(&relative_path(base_dir, &target));
    if rel.starts_with('.') {
        rel
    } else {
        format!("./{rel}")
    }
}

/// True iff some import in `document_text`, resolved from `current_file`,
/// reaches `target`.
pub fn has_imported_target(
    document_text: &str,
    target: &Path,
    current_file: &Path,
    aliases: &AliasConfig,
) -> bool {
    let target = normalize_path(target);
    extract_import_paths(document_text)
        .iter()
        .any(|raw| {
            resolve_import_path(raw, current_file, aliases)
                .is_some_and(|resolved| resolved == target)
        })
}

fn forward_slashes(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

//! Alias configuration loading from tsconfig/jsconfig path mappings.
//!
//! A workspace's import aliases come from `compilerOptions.baseUrl` +
//! `compilerOptions.paths` in its `tsconfig.json`/`jsconfig.json`, read as
//! relaxed JSON (comments and trailing commas tolerated). An `extends` chain
//! is merged base-first so that child files override identical alias keys;
//! cycles in the chain are broken by a visited set. A malformed file yields
//! an empty mapping for that file only.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use thiserror::Error;

use crate::base::constants::PATH_CONFIG_FILES;
use crate::base::{append_extension, normalize_path};
use crate::parser::strip_jsonc;

/// Alias prefix → absolute target directory, in configuration order.
pub type AliasConfig = IndexMap<String, PathBuf>;

/// Errors raised while reading one path-mapping configuration file.
///
/// Never escapes the loader: a failing file is logged at debug level and
/// contributes an empty mapping.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PathConfigFile {
    #[serde(default)]
    extends: Option<String>,
    #[serde(default)]
    compiler_options: Option<CompilerOptions>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    paths: Option<IndexMap<String, Vec<String>>>,
}

/// Per-workspace-root cache of loaded alias configurations.
///
/// Constructed explicitly and passed to whoever resolves imports; there is
/// no process-wide registry. The cache never invalidates itself — the
/// integration layer calls [`AliasRegistry::clear`] when it observes a
/// configuration file change.
#[derive(Debug, Default)]
pub struct AliasRegistry {
    cache: FxHashMap<PathBuf, AliasConfig>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The merged alias mapping for a workspace root, loading it on first
    /// access and serving the cached copy afterwards.
    pub fn alias_config(&mut self, workspace_root: &Path) -> &AliasConfig {
        let root = normalize_path(workspace_root);
        self.cache.entry(root).or_insert_with_key(|root| {
            let config = load_alias_config(root);
            tracing::debug!(
                root = %root.display(),
                aliases = config.len(),
                "loaded alias configuration"
            );
            config
        })
    }

    /// Drop the cached mapping for one root, or every root when `None`.
    pub fn clear(&mut self, workspace_root: Option<&Path>) {
        match workspace_root {
            Some(root) => {
                self.cache.remove(&normalize_path(root));
            }
            None => self.cache.clear(),
        }
    }
}

/// Load the merged alias mapping for a workspace root from its
/// path-mapping configuration files, later files overriding earlier ones.
pub fn load_alias_config(workspace_root: &Path) -> AliasConfig {
    let mut config = AliasConfig::new();
    for name in PATH_CONFIG_FILES {
        let path = workspace_root.join(name);
        if !path.is_file() {
            continue;
        }
        let mut visited = FxHashSet::default();
        config.extend(collect_from_config_file(&path, &mut visited));
    }
    config
}

fn collect_from_config_file(
    config_path: &Path,
    visited: &mut FxHashSet<PathBuf>,
) -> AliasConfig {
    let normalized = normalize_path(config_path);
    if !visited.insert(normalized.clone()) {
        return AliasConfig::new();
    }

    let parsed = match read_config_file(&normalized) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::debug!(
                config = %normalized.display(),
                %err,
                "ignoring unreadable path-mapping config"
            );
            return AliasConfig::new();
        }
    };

    let config_dir = normalized.parent().unwrap_or(Path::new("/")).to_path_buf();

    // Base configuration first; this file's own entries override it.
    let mut config = AliasConfig::new();
    if let Some(extends) = parsed.extends.as_deref() {
        if let Some(base) = resolve_extends_path(extends, &config_dir) {
            config = collect_from_config_file(&base, visited);
        }
    }

    let options = parsed.compiler_options.unwrap_or_default();
    let base_url = options.base_url.unwrap_or_else(|| ".".to_string());
    let base_dir = normalize_path(&config_dir.join(base_url));

    for (pattern, targets) in options.paths.unwrap_or_default() {
        let Some(target) = targets.first() else {
            continue;
        };
        let alias = pattern.strip_suffix("/*").unwrap_or(pattern.as_str());
        let target = target.strip_suffix("/*").unwrap_or(target.as_str());
        config.insert(alias.to_string(), normalize_path(&base_dir.join(target)));
    }

    config
}

fn read_config_file(path: &Path) -> Result<PathConfigFile, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&strip_jsonc(&text))?)
}

/// Resolve an `extends` reference: relative/absolute paths against the
/// config file's directory (with a `.json` fallback), bare specifiers by
/// probing `node_modules` from the config directory upward.
fn resolve_extends_path(raw: &str, config_dir: &Path) -> Option<PathBuf> {
    if raw.is_empty() {
        return None;
    }

    let mut candidates = Vec::new();
    if raw.starts_with('.') || Path::new(raw).is_absolute() {
        let abs = normalize_path(&config_dir.join(raw));
        candidates.push(abs.clone());
        candidates.push(append_extension(&abs, "json"));
    } else {
        for dir in config_dir.ancestors() {
            let base = dir.join("node_modules").join(raw);
            candidates.push(base.clone());
            candidates.push(append_extension(&base, "json"));
        }
    }

    candidates.into_iter().find(|candidate| candidate.is_file())
}

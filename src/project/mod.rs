//! Project-level configuration and import path resolution.
//!
//! Covers the path side of indexing: turning raw `@import` strings into
//! absolute files (alias mappings, relative and absolute forms, candidate
//! extensions), the inverse mapping used when inserting imports, loading
//! alias mappings from the workspace's tsconfig/jsconfig path configuration,
//! and checking whether a prospective import would close a cycle.

mod alias_config;
mod cycles;
mod resolver;

#[cfg(test)]
mod tests;

pub use alias_config::{AliasConfig, AliasRegistry, ConfigError, load_alias_config};
pub use cycles::would_create_circular_import;
pub use resolver::{
    build_import_path, extract_import_paths, has_imported_target, resolve_import_path,
};

//! Domain constants shared across the crate.

/// File extension of the stylesheet dialect (without the leading dot).
pub const LESS_EXTENSION: &str = "less";

/// Directory-default file name tried when an import resolves to a directory.
pub const LESS_INDEX_FILE: &str = "index.less";

/// Path-mapping configuration files read from a workspace root, in merge
/// order (later files override earlier ones).
pub const PATH_CONFIG_FILES: &[&str] = &["tsconfig.json", "jsconfig.json"];

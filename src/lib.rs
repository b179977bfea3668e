//! # lesser-base
//!
//! Core library for Less stylesheet parsing, import resolution, and
//! incremental symbol indexing.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide      → symbol cache + raw query results (completion, hover, goto-def)
//!   ↓
//! index    → index engine: per-entry import graphs, ownership, diffs
//!   ↓
//! project  → alias configuration, import path resolution, cycle checks
//!   ↓
//! syntax   → symbol data model, variable/mixin extraction
//!   ↓
//! parser   → shared character scanner (comments, strings, braces)
//!   ↓
//! base     → primitives (FileId, path interning, Position)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → project → index → ide)
// ============================================================================

/// Foundation types: FileId, path interning and normalization, Position
pub mod base;

/// Shared character scanner: comment/string classification, brace matching
pub mod parser;

/// Symbol data model and variable/mixin extraction
pub mod syntax;

/// Project configuration: alias mappings, import path resolution
pub mod project;

/// Index engine: per-entry import graphs, ownership, incremental diffs
pub mod index;

/// IDE surface: symbol cache, completion/hover/goto query results
pub mod ide;

// Re-export foundation types
pub use base::{FileId, PathInterner, Position, normalize_path};

// Re-export the primary operational types
pub use index::{FilePayload, IndexDiff, IndexEngine};
pub use syntax::{Mixin, SymbolKind, Variable};

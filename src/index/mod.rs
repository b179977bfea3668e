//! Incremental symbol index over per-entry-point import graphs.
//!
//! The engine owns, per configured entry point, the transitive closure of
//! imported files, and re-resolves ownership with targeted re-parses when a
//! single file changes. Its only output is the [`IndexDiff`] consumed by the
//! symbol cache.

mod diff;
mod engine;

pub use diff::{FilePayload, IndexDiff};
pub use engine::IndexEngine;

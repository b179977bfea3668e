//! IDE surface — symbol cache and raw query results.
//!
//! This module is the interface between the index engine's diffs and the
//! editor features. Design principles, in order:
//!
//! 1. **Raw data out**: results carry names, raw declaration text, and
//!    locations; markdown/color rendering belongs to the presentation layer.
//! 2. **No hidden lifecycle**: the [`SymbolCache`] is constructed explicitly
//!    and passed to whoever needs it — there is no process-wide singleton.
//! 3. **Consistent reads**: mutate the cache, then take an [`Analysis`]
//!    snapshot for querying; derived aggregates rebuild lazily.
//!
//! ```ignore
//! let mut cache = SymbolCache::new();
//! cache.apply_diff(engine.rebuild_all(), Some(workspace_root));
//!
//! let analysis = cache.analysis(Some(workspace_root));
//! let items = completions(&analysis, "@co");
//! let target = goto_definition(&analysis, "@color");
//! ```

mod cache;
mod completion;
mod context;
mod goto;
mod hover;


pub use cache::{Analysis, DocumentSymbols, SymbolCache};
pub use completion::{CompletionItem, completions};
pub use context::symbol_at_position;
pub use goto::{GotoTarget, goto_definition};
pub use hover::{HoverResult, hover};

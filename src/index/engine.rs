//! The index engine: graph maintenance, ownership, and rebuild operations.

use std::path::{Path, PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::constants::PATH_CONFIG_FILES;
use crate::base::{FileId, PathInterner, normalize_path};
use crate::project::{AliasConfig, extract_import_paths, resolve_import_path};
use crate::syntax::{extract_mixins, extract_variables, Mixin, Variable};

use super::{FilePayload, IndexDiff};

/// Parsed per-file state, kept while at least one entry point owns the file.
#[derive(Debug, Default)]
struct FileRecord {
    variables: Vec<Variable>,
    mixins: Vec<Mixin>,
    imports: Vec<FileId>,
}

/// Per-pass bookkeeping shared by the walks of one rebuild operation.
///
/// `parsed` doubles as the per-pass parse cache: a file reached from several
/// entry points within one pass is read and parsed exactly once. `touched`
/// collects every file whose membership or content this pass looked at.
#[derive(Default)]
struct RebuildPass {
    parsed: FxHashMap<FileId, bool>,
    touched: FxHashSet<FileId>,
}

/// Maintains, per configured entry point, the transitive closure of imported
/// files, with ownership tie-breaks and incremental re-walks keyed by a
/// single changed file.
///
/// The graph is keyed by interned [`FileId`]s and walked with an explicit
/// stack, so cycle detection is a set lookup and pathological import chains
/// cannot exhaust the call stack. Missing or unreadable files yield no
/// record; their import edges simply end there.
pub struct IndexEngine {
    workspace_root: PathBuf,
    aliases: AliasConfig,
    entries: Vec<FileId>,
    paths: PathInterner,
    entry_to_files: FxHashMap<FileId, FxHashSet<FileId>>,
    file_to_entries: FxHashMap<FileId, FxHashSet<FileId>>,
    file_data: FxHashMap<FileId, FileRecord>,
    version: u64,
}

impl IndexEngine {
    pub fn new(workspace_root: &Path, aliases: AliasConfig) -> Self {
        Self {
            workspace_root: normalize_path(workspace_root),
            aliases,
            entries: Vec::new(),
            paths: PathInterner::new(),
            entry_to_files: FxHashMap::default(),
            file_to_entries: FxHashMap::default(),
            file_data: FxHashMap::default(),
            version: 0,
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn set_workspace_root(&mut self, workspace_root: &Path) {
        self.workspace_root = normalize_path(workspace_root);
    }

    pub fn set_alias_config(&mut self, aliases: AliasConfig) {
        self.aliases = aliases;
    }

    /// Replace the entry point list (normalized, deduplicated,
    /// order-preserving). Does not rebuild anything by itself.
    pub fn set_entries(&mut self, entries: impl IntoIterator<Item = PathBuf>) {
        let mut seen = FxHashSet::default();
        let mut ids = Vec::new();
        for entry in entries {
            let id = self.paths.intern(&entry);
            if seen.insert(id) {
                ids.push(id);
            }
        }
        for &id in &ids {
            self.entry_to_files.entry(id).or_default();
        }
        self.entries = ids;
    }

    /// The configured entry points, in priority order.
    pub fn entries(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .map(|&id| self.paths.path(id).to_path_buf())
            .collect()
    }

    /// Everything the integration layer should watch: the entry points, all
    /// currently indexed files, and the workspace's path-mapping configs.
    pub fn watch_files(&self) -> Vec<PathBuf> {
        let mut seen = FxHashSet::default();
        let mut files = Vec::new();
        for &entry in &self.entries {
            let path = self.paths.path(entry).to_path_buf();
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
        let mut indexed: Vec<FileId> = self.file_data.keys().copied().collect();
        indexed.sort_unstable();
        for id in indexed {
            let path = self.paths.path(id).to_path_buf();
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
        for name in PATH_CONFIG_FILES {
            let path = self.workspace_root.join(name);
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
        files
    }

    /// Entry points whose current closure contains `changed_file`, plus the
    /// file itself when it is a configured entry. Configured order.
    pub fn affected_entries(&self, changed_file: &Path) -> Vec<PathBuf> {
        self.affected_entry_ids(changed_file)
            .into_iter()
            .map(|id| self.paths.path(id).to_path_buf())
            .collect()
    }

    fn affected_entry_ids(&self, changed_file: &Path) -> Vec<FileId> {
        // A path the interner has never seen is neither indexed nor an entry.
        let Some(id) = self.paths.get(changed_file) else {
            return Vec::new();
        };
        let owners = self.file_to_entries.get(&id);
        self.entries
            .iter()
            .copied()
            .filter(|&entry| entry == id || owners.is_some_and(|set| set.contains(&entry)))
            .collect()
    }

    /// Full rebuild: clear all graph state and re-walk every entry point.
    ///
    /// Emits an upsert for every owned file and a removal for every file
    /// that was indexed before but is unreachable now. This is the
    /// correctness baseline the incremental path must converge to.
    pub fn rebuild_all(&mut self) -> IndexDiff {
        self.version += 1;
        let previous: FxHashSet<FileId> = self.file_data.keys().copied().collect();
        self.entry_to_files.clear();
        self.file_to_entries.clear();
        self.file_data.clear();

        let entries = self.entries.clone();
        for &entry in &entries {
            self.entry_to_files.entry(entry).or_default();
        }

        let mut pass = RebuildPass::default();
        for &entry in &entries {
            self.walk_entry(entry, &mut pass);
        }

        let mut diff = IndexDiff::default();
        let mut owned: Vec<FileId> = self.file_data.keys().copied().collect();
        owned.sort_unstable();
        for file in owned {
            let Some(owner) = self.primary_owner(file) else {
                continue;
            };
            if let Some(payload) = self.build_payload(file, owner) {
                diff.upserts
                    .insert(self.paths.path(file).to_path_buf(), payload);
            }
        }

        let mut removed: Vec<FileId> = previous
            .into_iter()
            .filter(|file| !self.file_data.contains_key(file))
            .collect();
        removed.sort_unstable();
        diff.removals = removed
            .into_iter()
            .map(|file| self.paths.path(file).to_path_buf())
            .collect();

        tracing::debug!(
            files = self.file_data.len(),
            removals = diff.removals.len(),
            "full index rebuild"
        );
        diff
    }

    /// Incremental rebuild keyed by one changed file.
    ///
    /// Only entry points whose closure already contains the file (or the
    /// file itself as an entry) are re-walked. Files whose ownership and
    /// content are untouched are not re-emitted.
    pub fn rebuild_by_changed_file(&mut self, changed_file: &Path) -> IndexDiff {
        let affected = self.affected_entry_ids(changed_file);
        if affected.is_empty() {
            return IndexDiff::default();
        }
        tracing::debug!(
            changed = %changed_file.display(),
            entries = affected.len(),
            "incremental index rebuild"
        );
        self.rebuild_entries(&affected)
    }

    fn rebuild_entries(&mut self, affected: &[FileId]) -> IndexDiff {
        self.version += 1;
        let mut pass = RebuildPass::default();
        let mut old_primary: FxHashMap<FileId, FileId> = FxHashMap::default();

        // Retract the affected entries' previous ownership contributions,
        // remembering each touched file's pre-pass primary owner (the first
        // recording wins, before any owner sets shrink).
        for &entry in affected {
            let old_files = self
                .entry_to_files
                .insert(entry, FxHashSet::default())
                .unwrap_or_default();
            for file in old_files {
                pass.touched.insert(file);
                if let Some(owners) = self.file_to_entries.get_mut(&file) {
                    if let Some(primary) = Self::primary_of(&self.entries, owners) {
                        old_primary.entry(file).or_insert(primary);
                    }
                    owners.remove(&entry);
                    if owners.is_empty() {
                        self.file_to_entries.remove(&file);
                    }
                }
            }
        }

        for &entry in affected {
            self.walk_entry(entry, &mut pass);
        }

        let mut diff = IndexDiff::default();
        let mut touched: Vec<FileId> = pass.touched.iter().copied().collect();
        touched.sort_unstable();
        for file in touched {
            let has_owner = self
                .file_to_entries
                .get(&file)
                .is_some_and(|owners| !owners.is_empty());
            if !has_owner {
                self.file_to_entries.remove(&file);
                self.file_data.remove(&file);
                diff.removals.push(self.paths.path(file).to_path_buf());
                continue;
            }

            let Some(new_owner) = self.primary_owner(file) else {
                continue;
            };
            let reparsed = pass.parsed.contains_key(&file);
            if reparsed || old_primary.get(&file) != Some(&new_owner) {
                if let Some(payload) = self.build_payload(file, new_owner) {
                    diff.upserts
                        .insert(self.paths.path(file).to_path_buf(), payload);
                }
            }
        }
        diff
    }

    /// Pre-order walk from one entry following resolved import edges in
    /// declaration order, recording membership and ownership.
    fn walk_entry(&mut self, entry: FileId, pass: &mut RebuildPass) {
        let mut entry_files = FxHashSet::default();
        let mut visited = FxHashSet::default();
        let mut stack = vec![entry];

        while let Some(file) = stack.pop() {
            if !visited.insert(file) {
                continue;
            }
            if !self.ensure_parsed(file, pass) {
                continue;
            }
            entry_files.insert(file);
            pass.touched.insert(file);
            self.file_to_entries.entry(file).or_default().insert(entry);

            if let Some(record) = self.file_data.get(&file) {
                for &import in record.imports.iter().rev() {
                    stack.push(import);
                }
            }
        }

        self.entry_to_files.insert(entry, entry_files);
    }

    fn ensure_parsed(&mut self, file: FileId, pass: &mut RebuildPass) -> bool {
        if let Some(&present) = pass.parsed.get(&file) {
            return present;
        }
        let path = self.paths.path(file).to_path_buf();
        let present = match self.parse_file(&path) {
            Some(record) => {
                self.file_data.insert(file, record);
                true
            }
            None => false,
        };
        pass.parsed.insert(file, present);
        present
    }

    /// Read and parse one file from disk. Missing or unreadable files yield
    /// `None`: the import edge ends there, filesystem races are expected.
    fn parse_file(&mut self, path: &Path) -> Option<FileRecord> {
        if !path.is_file() {
            return None;
        }
        let content = std::fs::read_to_string(path).ok()?;
        let imports = extract_import_paths(&content)
            .iter()
            .filter_map(|raw| resolve_import_path(raw, path, &self.aliases))
            .map(|resolved| self.paths.intern(&resolved))
            .collect();
        tracing::trace!(file = %path.display(), "parsed stylesheet");
        Some(FileRecord {
            variables: extract_variables(&content),
            mixins: extract_mixins(&content),
            imports,
        })
    }

    fn primary_owner(&self, file: FileId) -> Option<FileId> {
        self.file_to_entries
            .get(&file)
            .and_then(|owners| Self::primary_of(&self.entries, owners))
    }

    /// Earliest configured entry present in the ownership set. The
    /// arbitrary-member fallback covers owner sets holding only
    /// no-longer-configured entries; not a supported steady state.
    fn primary_of(entries: &[FileId], owners: &FxHashSet<FileId>) -> Option<FileId> {
        if owners.is_empty() {
            return None;
        }
        entries
            .iter()
            .copied()
            .find(|entry| owners.contains(entry))
            .or_else(|| owners.iter().next().copied())
    }

    fn build_payload(&self, file: FileId, owner: FileId) -> Option<FilePayload> {
        let record = self.file_data.get(&file)?;
        let owner_path = self.paths.path(owner).to_path_buf();

        let variables = record
            .variables
            .iter()
            .cloned()
            .map(|mut variable| {
                variable.owning_entry = Some(owner_path.clone());
                variable
            })
            .collect();
        let mixins = record
            .mixins
            .iter()
            .cloned()
            .map(|mut mixin| {
                mixin.owning_entry = Some(owner_path.clone());
                mixin
            })
            .collect();

        Some(FilePayload {
            variables,
            mixins,
            version: self.version,
        })
    }
}

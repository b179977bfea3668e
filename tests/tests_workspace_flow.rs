#![allow(clippy::unwrap_used, clippy::expect_used)]

mod helpers;

use helpers::{Workspace, symbol_fingerprint};
use lesser::ide::{SymbolCache, completions, goto_definition, hover, symbol_at_position};
use lesser::project::{AliasConfig, load_alias_config};
use lesser::syntax::SymbolKind;
use lesser::IndexEngine;

fn themed_workspace() -> Workspace {
    let ws = Workspace::new();
    ws.write(
        "tsconfig.json",
        r#"{ "compilerOptions": { "baseUrl": ".", "paths": { "@/*": ["src/*"] } } }"#,
    );
    ws.write(
        "src/entry.less",
        "@import '@/theme/colors.less';\n@import './mixins.less';",
    );
    ws.write(
        "src/theme/colors.less",
        "@primary-color: #1890ff;\n@text-color: #333;",
    );
    ws.write("src/mixins.less", ".center() {\n display: flex;\n}");
    ws
}

fn build_engine(ws: &Workspace) -> IndexEngine {
    let mut engine = IndexEngine::new(ws.root(), load_alias_config(ws.root()));
    engine.set_entries([ws.path("src/entry.less")]);
    engine
}

#[test]
fn test_diff_feeds_cache_queries() {
    let ws = themed_workspace();
    let mut engine = build_engine(&ws);
    let mut cache = SymbolCache::new();
    cache.apply_diff(engine.rebuild_all(), Some(ws.root()));

    let analysis = cache.analysis(Some(ws.root()));

    let items = completions(&analysis, "@primary");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].label, "@primary-color");
    assert_eq!(items[0].owning_entry, Some(ws.path("src/entry.less")));

    let result = hover(&analysis, ".center").unwrap();
    assert_eq!(result.kind, SymbolKind::Mixin);
    assert_eq!(result.contents, ".center() {\n display: flex;\n}");

    let targets = goto_definition(&analysis, "@text-color");
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].file, ws.path("src/theme/colors.less"));
    assert_eq!(targets[0].position.line, 1);
}

#[test]
fn test_incremental_update_reaches_queries() {
    let ws = themed_workspace();
    let mut engine = build_engine(&ws);
    let mut cache = SymbolCache::new();
    cache.apply_diff(engine.rebuild_all(), Some(ws.root()));

    ws.write(
        "src/theme/colors.less",
        "@primary-color: rebeccapurple;\n@text-color: #333;",
    );
    cache.apply_diff(
        engine.rebuild_by_changed_file(&ws.path("src/theme/colors.less")),
        Some(ws.root()),
    );

    let analysis = cache.analysis(Some(ws.root()));
    assert_eq!(
        hover(&analysis, "@primary-color").unwrap().contents,
        "rebeccapurple"
    );
}

#[test]
fn test_incremental_converges_to_full_rebuild() {
    let ws = themed_workspace();
    let mut engine = build_engine(&ws);
    let mut incremental_cache = SymbolCache::new();
    incremental_cache.apply_diff(engine.rebuild_all(), Some(ws.root()));

    // Mutate one file: change a value, drop one import, add another.
    ws.write("src/extra.less", "@extra: 1;");
    ws.write(
        "src/entry.less",
        "@import '@/theme/colors.less';\n@import './extra.less';",
    );
    incremental_cache.apply_diff(
        engine.rebuild_by_changed_file(&ws.path("src/entry.less")),
        Some(ws.root()),
    );

    // A fresh engine's full rebuild over the same disk state is the
    // correctness baseline.
    let mut fresh_engine = build_engine(&ws);
    let mut full_cache = SymbolCache::new();
    full_cache.apply_diff(fresh_engine.rebuild_all(), Some(ws.root()));

    assert_eq!(
        symbol_fingerprint(&mut incremental_cache),
        symbol_fingerprint(&mut full_cache)
    );
}

#[test]
fn test_batched_changes_converge_in_any_order() {
    let run = |order: &[&str]| {
        // Re-create the original disk state for each run.
        let ws = themed_workspace();
        let mut engine = build_engine(&ws);
        let mut cache = SymbolCache::new();
        cache.apply_diff(engine.rebuild_all(), Some(ws.root()));

        ws.write("src/theme/colors.less", "@primary-color: #000;");
        ws.write("src/mixins.less", ".center() {\n display: grid;\n}\n.pad() { padding: 0; }");
        for rel in order {
            cache.apply_diff(engine.rebuild_by_changed_file(&ws.path(rel)), Some(ws.root()));
        }
        symbol_fingerprint(&mut cache)
            .into_iter()
            .map(|(path, name, text)| {
                // Compare on workspace-relative paths: each run uses its own
                // temp directory.
                let rel = path.strip_prefix(ws.root()).unwrap_or(&path).to_path_buf();
                (rel, name, text)
            })
            .collect::<Vec<_>>()
    };

    let forward = run(&["src/theme/colors.less", "src/mixins.less"]);
    let backward = run(&["src/mixins.less", "src/theme/colors.less"]);
    assert_eq!(forward, backward);
    assert!(forward.iter().any(|(_, name, _)| name == ".pad"));
}

#[test]
fn test_cursor_to_definition_flow() {
    let ws = themed_workspace();
    let mut engine = build_engine(&ws);
    let mut cache = SymbolCache::new();
    cache.apply_diff(engine.rebuild_all(), Some(ws.root()));

    // A document being edited references the indexed variable.
    let document = ".banner {\n color: @primary-color;\n}";
    let symbol = symbol_at_position(document, 1, 8).unwrap();
    assert_eq!(symbol, "@primary-color");

    let analysis = cache.analysis(Some(ws.root()));
    let targets = goto_definition(&analysis, &symbol);
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].file, ws.path("src/theme/colors.less"));
}

#[test]
fn test_multi_root_scoping_end_to_end() {
    let ws_a = themed_workspace();
    let ws_b = Workspace::new();
    ws_b.write("main.less", "@only-in-b: 1;");

    let mut cache = SymbolCache::new();

    let mut engine_a = build_engine(&ws_a);
    cache.apply_diff(engine_a.rebuild_all(), Some(ws_a.root()));

    let mut engine_b = IndexEngine::new(ws_b.root(), AliasConfig::new());
    engine_b.set_entries([ws_b.path("main.less")]);
    cache.apply_diff(engine_b.rebuild_all(), Some(ws_b.root()));

    let analysis_a = cache.analysis(Some(ws_a.root()));
    assert!(analysis_a.find_variable("@primary-color").is_some());
    assert!(analysis_a.find_variable("@only-in-b").is_none());

    let analysis_b = cache.analysis(Some(ws_b.root()));
    assert!(analysis_b.find_variable("@only-in-b").is_some());
    assert!(analysis_b.find_variable("@primary-color").is_none());

    let global = cache.analysis(None);
    assert!(global.find_variable("@primary-color").is_some());
    assert!(global.find_variable("@only-in-b").is_some());
}

use jsonseed::{RunConfig, RunContext, RunError, RunReport, execute, run};
use jsonseed_storage::{CollectionStore, InsertCall, MemoryStore, StoreConfig};
use jsonseed_template::{SeededEntropy, TemplateError, TemplateSource};
use jsonseed_types::SeedValue;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tempfile::TempDir;

fn context(store: MemoryStore, template: serde_json::Value) -> RunContext<MemoryStore> {
    RunContext::new(
        store,
        TemplateSource::from_value(SeedValue::from(template)),
        Box::new(SeededEntropy::new(11)),
    )
}

fn batch(size: usize) -> NonZeroUsize {
    NonZeroUsize::new(size).unwrap()
}

fn write_payload(dir: &TempDir, body: serde_json::Value) -> PathBuf {
    let path = dir.path().join("payload.json");
    fs::write(&path, body.to_string()).unwrap();
    path
}

fn store_config(connection_string: String) -> StoreConfig {
    StoreConfig {
        connection_string,
        database: "seed".to_string(),
        collection: "users".to_string(),
    }
}

// ── Cycles ───────────────────────────────────────────────────────

#[test]
fn repeat_zero_runs_once() {
    let mut ctx = context(MemoryStore::new(), json!({"n": "$randBetween(1;9)"}));
    let report = run(&mut ctx, batch(100), 0).unwrap();
    assert_eq!(report, RunReport { cycles: 1, chunks: 1, documents: 1 });
    assert_eq!(ctx.store().calls().len(), 1);
}

#[test]
fn repeat_two_runs_three_cycles() {
    let mut ctx = context(
        MemoryStore::new(),
        json!([{"n": "$randBetween(1;9)"}, {"n": 2}, {"n": 3}]),
    );
    let report = run(&mut ctx, batch(2), 2).unwrap();

    assert_eq!(report, RunReport { cycles: 3, chunks: 6, documents: 9 });
    let sizes: Vec<usize> = ctx.store().calls().iter().map(InsertCall::len).collect();
    assert_eq!(sizes, vec![2, 1, 2, 1, 2, 1]);
}

#[test]
fn each_cycle_expands_the_declared_template() {
    let mut ctx = context(
        MemoryStore::new(),
        json!({"n": "$randBetween(1;1000000)", "label": "n=$prop(n)"}),
    );
    run(&mut ctx, batch(1), 4).unwrap();

    let store = ctx.into_store();
    let docs = store.documents();
    assert_eq!(docs.len(), 5);
    for doc in &docs {
        let n = doc["n"].as_i64().unwrap();
        assert!((1..=1_000_000).contains(&n));
        assert_eq!(doc["label"], json!(format!("n={n}")));
    }
    let distinct: std::collections::HashSet<i64> =
        docs.iter().map(|d| d["n"].as_i64().unwrap()).collect();
    assert!(distinct.len() > 1);
}

#[test]
fn store_failure_aborts_later_cycles() {
    let mut ctx = context(MemoryStore::failing_after(2), json!({"n": 1}));
    let err = run(&mut ctx, batch(10), 5).unwrap_err();
    assert!(matches!(err, RunError::Storage(_)));
    assert_eq!(ctx.store().calls().len(), 2);
}

#[test]
fn malformed_token_aborts_before_any_insert() {
    let mut ctx = context(MemoryStore::new(), json!({"n": "$randBetween(9;1)"}));
    let err = run(&mut ctx, batch(10), 0).unwrap_err();
    assert!(matches!(err, RunError::Template(TemplateError::TokenSyntax { .. })));
    assert!(ctx.store().calls().is_empty());
}

#[test]
fn scalar_template_is_a_shape_error() {
    let mut ctx = context(MemoryStore::new(), json!("$randBetween(1;2)"));
    let err = run(&mut ctx, batch(10), 0).unwrap_err();
    assert!(matches!(err, RunError::PayloadShape("number")));
}

// ── End to end ───────────────────────────────────────────────────

#[test]
fn execute_seeds_duckdb_file() {
    let dir = TempDir::new().unwrap();
    let payload = write_payload(
        &dir,
        json!([
            {"name": "ada", "age": "$randBetween(30;40)", "tag": "user-$prop(name)"},
            {"name": "bob", "age": "$randBetween(30;40)", "tag": "user-$prop(name)"},
            {"name": "cy", "age": 5, "created": "$utcNow"}
        ]),
    );
    let db = dir.path().join("seed.duckdb");
    let config = RunConfig::new(store_config(format!("duckdb://{}", db.display())), &payload)
        .with_max_batch_size(2)
        .unwrap()
        .with_repeat(1)
        .with_seed(Some(3));

    let report = execute(&config).unwrap();
    assert_eq!(report, RunReport { cycles: 2, chunks: 4, documents: 6 });

    let store = CollectionStore::open(&db, "seed", "users").unwrap();
    let docs = store.documents().unwrap();
    assert_eq!(docs.len(), 6);
    assert_eq!(docs[0]["tag"], json!("user-ada"));
    assert_eq!(docs[1]["tag"], json!("user-bob"));
    assert!((30..=40).contains(&docs[0]["age"].as_i64().unwrap()));
    assert!(docs[2]["created"].is_string());
    assert!(docs.iter().all(|d| d["_id"].is_string()));
}

#[test]
fn execute_dry_run_persists_nothing() {
    let dir = TempDir::new().unwrap();
    let payload = write_payload(&dir, json!({"n": "$randBetween(1;2)"}));
    let config = RunConfig::new(store_config("memory://".to_string()), &payload);

    let report = execute(&config).unwrap();
    assert_eq!(report.documents, 1);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn opened_context_keeps_payload_path() {
    let dir = TempDir::new().unwrap();
    let payload = write_payload(&dir, json!({"n": 1}));
    let config = RunConfig::new(store_config("memory://".to_string()), &payload);

    let ctx = RunContext::open(&config).unwrap();
    assert_eq!(ctx.source().path(), payload.as_path());
    assert_eq!(ctx.source().template().get("n").unwrap().as_i64(), Some(1));
}

#[test]
fn missing_payload_fails_before_connecting() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("seed.duckdb");
    let config = RunConfig::new(
        store_config(db.display().to_string()),
        dir.path().join("missing.json"),
    );

    let err = execute(&config).unwrap_err();
    assert!(matches!(err, RunError::Template(TemplateError::Read { .. })));
    assert!(!db.exists());
}

#[test]
fn unsupported_scheme_is_a_storage_error() {
    let dir = TempDir::new().unwrap();
    let payload = write_payload(&dir, json!({"a": 1}));
    let config = RunConfig::new(store_config("mongodb://localhost".to_string()), &payload);
    assert!(matches!(execute(&config), Err(RunError::Storage(_))));
}

#[test]
fn seeded_runs_are_reproducible() {
    let template = json!([{"a": "$randBetween(1;1000)"}, {"a": "$randBetween(1;1000)"}]);
    let mut first = context(MemoryStore::new(), template.clone());
    let mut second = context(MemoryStore::new(), template);
    run(&mut first, batch(10), 1).unwrap();
    run(&mut second, batch(10), 1).unwrap();

    let values = |store: &MemoryStore| -> Vec<serde_json::Value> {
        store.documents().iter().map(|d| d["a"].clone()).collect()
    };
    assert_eq!(values(first.store()), values(second.store()));
}

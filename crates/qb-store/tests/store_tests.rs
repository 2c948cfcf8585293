//! Integration tests for both store adapters.

use futures::StreamExt;
use qb_core::{QuestionOption, QuestionRecord};
use qb_store::{DeleteOutcome, JsonlStore, MemoryStore, QuestionStore};
use serde_json::json;
use tempfile::TempDir;

fn record(title: &str, options: &[&str]) -> QuestionRecord {
    QuestionRecord::new(title).with_text_options(options.iter().copied())
}

// ============================================================
// MemoryStore
// ============================================================

#[tokio::test]
async fn test_memory_insert_and_get() {
    let store = MemoryStore::new();
    let question = record("什么是操作系统", &["A、管理硬件"]);
    store.insert("q1", &question).unwrap();

    let fetched = store.get_by_id("q1").await.unwrap().unwrap();
    assert_eq!(fetched, question);
    assert!(store.get_by_id("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_memory_delete_is_idempotent() {
    let store = MemoryStore::new();
    store.insert("q1", &record("题目", &[])).unwrap();

    assert_eq!(
        store.delete_by_id("q1").await.unwrap(),
        DeleteOutcome::Deleted
    );
    assert_eq!(
        store.delete_by_id("q1").await.unwrap(),
        DeleteOutcome::NotFound
    );
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_memory_bulk_index_assigns_ids() {
    let store = MemoryStore::new();
    let report = store
        .bulk_index(vec![record("题目一", &[]), record("题目二", &[])])
        .await
        .unwrap();

    assert_eq!(report.indexed, 2);
    assert_eq!(report.failed, 0);
    assert_eq!(store.count().await.unwrap(), 2);

    let ids: Vec<String> = store
        .scan_all()
        .map(|hit| hit.unwrap().id)
        .collect()
        .await;
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

#[tokio::test]
async fn test_memory_scan_preserves_insertion_order() {
    let store = MemoryStore::new();
    for id in ["q1", "q2", "q3"] {
        store.insert(id, &record(id, &[])).unwrap();
    }

    let ids: Vec<String> = store
        .scan_all()
        .map(|hit| hit.unwrap().id)
        .collect()
        .await;
    assert_eq!(ids, ["q1", "q2", "q3"]);
}

#[tokio::test]
async fn test_memory_scan_is_a_snapshot() {
    let store = MemoryStore::new();
    store.insert("q1", &record("题目", &[])).unwrap();

    let scan = store.scan_all();
    store.insert("q2", &record("另一题", &[])).unwrap();
    let ids: Vec<String> = scan.map(|hit| hit.unwrap().id).collect().await;
    assert_eq!(ids, ["q1"]);
}

#[tokio::test]
async fn test_memory_insert_raw_replaces_existing() {
    let store = MemoryStore::new();
    store.insert_raw("q1", json!({"title": "旧"}));
    store.insert_raw("q1", json!({"title": "新"}));

    assert_eq!(store.count().await.unwrap(), 1);
    let fetched = store.get_by_id("q1").await.unwrap().unwrap();
    assert_eq!(fetched.title.as_deref(), Some("新"));
}

// ============================================================
// JsonlStore
// ============================================================

#[tokio::test]
async fn test_jsonl_open_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = JsonlStore::open(dir.path().join("corpus.jsonl")).unwrap();
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_jsonl_roundtrip_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corpus.jsonl");

    let question = record("什么是操作系统", &["A、管理硬件", "B、运行程序"]);
    {
        let store = JsonlStore::open(&path).unwrap();
        let report = store.bulk_index(vec![question.clone()]).await.unwrap();
        assert_eq!(report.indexed, 1);
    }

    let reopened = JsonlStore::open(&path).unwrap();
    assert_eq!(reopened.count().await.unwrap(), 1);
    let hit = reopened.scan_all().next().await.unwrap().unwrap();
    let fetched = reopened.get_by_id(&hit.id).await.unwrap().unwrap();
    assert_eq!(fetched, question);
}

#[tokio::test]
async fn test_jsonl_delete_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corpus.jsonl");

    let store = JsonlStore::open(&path).unwrap();
    store
        .bulk_index(vec![record("题目一", &[]), record("题目二", &[])])
        .await
        .unwrap();
    let first_id = store.scan_all().next().await.unwrap().unwrap().id;

    assert_eq!(
        store.delete_by_id(&first_id).await.unwrap(),
        DeleteOutcome::Deleted
    );
    assert_eq!(
        store.delete_by_id(&first_id).await.unwrap(),
        DeleteOutcome::NotFound
    );

    let reopened = JsonlStore::open(&path).unwrap();
    assert_eq!(reopened.count().await.unwrap(), 1);
    assert!(reopened.get_by_id(&first_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_jsonl_skips_blank_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corpus.jsonl");
    std::fs::write(
        &path,
        "{\"id\":\"q1\",\"source\":{\"title\":\"题目\"}}\n\n{\"id\":\"q2\",\"source\":{\"title\":\"另一题\"}}\n",
    )
    .unwrap();

    let store = JsonlStore::open(&path).unwrap();
    assert_eq!(store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_jsonl_preserves_unknown_source_fields() {
    // Documents ride through deletion rewrites untouched, extra fields included.
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corpus.jsonl");
    std::fs::write(
        &path,
        "{\"id\":\"q1\",\"source\":{\"title\":\"题目\",\"custom\":123}}\n{\"id\":\"q2\",\"source\":{\"title\":\"另一题\"}}\n",
    )
    .unwrap();

    let store = JsonlStore::open(&path).unwrap();
    store.delete_by_id("q2").await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"custom\":123"));
    assert!(!content.contains("另一题"));
}

#[tokio::test]
async fn test_option_image_fallback_roundtrip() {
    let store = MemoryStore::new();
    let question = QuestionRecord::new("图片题").with_options(vec![
        QuestionOption::text("A、文字选项"),
        QuestionOption::image("images/option_b.png"),
    ]);
    store.insert("q1", &question).unwrap();

    let fetched = store.get_by_id("q1").await.unwrap().unwrap();
    assert_eq!(fetched.options[1].image.as_deref(), Some("images/option_b.png"));
    assert_eq!(fetched.options[1].is_image, Some(true));
}

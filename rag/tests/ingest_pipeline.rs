use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use httpmock::{Method::POST, MockServer};
use rag::{ingest_document, Config, IngestReport, RagError};
use serde_json::json;

fn config(db: &MockServer, ai: &MockServer) -> Config {
    let mut cfg = Config::new(&db.base_url(), "anon-key", "sk-test");
    cfg.openai_url = ai.base_url();
    cfg.embedding_dimension = 3;
    cfg.http_timeout = Duration::from_secs(5);
    cfg
}

/// Document written under a per-test temp dir, removed again on drop.
struct ScratchDoc {
    dir: PathBuf,
    path: PathBuf,
}

impl Drop for ScratchDoc {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

fn write_doc(case: &str, text: &str) -> ScratchDoc {
    let dir = std::env::temp_dir().join(format!("rag-ingest-{}-{}", std::process::id(), case));
    fs::create_dir_all(&dir).expect("create scratch dir");
    let path = dir.join("doc.txt");
    fs::write(&path, text).expect("write scratch doc");
    ScratchDoc { dir, path }
}

#[test]
fn embeds_once_and_inserts_every_chunk_in_one_request() {
    let db = MockServer::start();
    let ai = MockServer::start();

    // Out of order on purpose: vectors must be matched back by index.
    let embed = ai.mock(|when, then| {
        when.method(POST)
            .path("/embeddings")
            .header("authorization", "Bearer sk-test")
            .json_body(json!({
                "model": "text-embedding-ada-002",
                "input": ["A para.", "B para.", "C para."]
            }));
        then.status(200).json_body(json!({
            "data": [
                {"index": 1, "embedding": [0.0, 1.0, 0.0]},
                {"index": 0, "embedding": [1.0, 0.0, 0.0]},
                {"index": 2, "embedding": [0.0, 0.0, 1.0]}
            ]
        }));
    });
    let insert = db.mock(|when, then| {
        when.method(POST)
            .path("/rest/v1/taohuayuan_vectors")
            .header("apikey", "anon-key")
            .header("authorization", "Bearer anon-key")
            .header("prefer", "return=representation")
            .json_body(json!([
                {"content": "A para.", "embedding": [1.0, 0.0, 0.0], "source": "doc_chunk_1"},
                {"content": "B para.", "embedding": [0.0, 1.0, 0.0], "source": "doc_chunk_2"},
                {"content": "C para.", "embedding": [0.0, 0.0, 1.0], "source": "doc_chunk_3"}
            ]));
        then.status(201).json_body(json!([{"id": 1}, {"id": 2}, {"id": 3}]));
    });

    let doc = write_doc("happy", "A para.\n\n  B para.\n\n\n\nC para.\n");
    let report = ingest_document(&config(&db, &ai), &doc.path).expect("ingest should succeed");

    embed.assert();
    insert.assert();
    assert_eq!(report, IngestReport { chunks: 3, inserted: 3 });
}

#[test]
fn whitespace_document_aborts_before_any_request() {
    let db = MockServer::start();
    let ai = MockServer::start();
    let embed = ai.mock(|when, then| {
        when.method(POST).path("/embeddings");
        then.status(200).json_body(json!({"data": []}));
    });
    let insert = db.mock(|when, then| {
        when.method(POST).path("/rest/v1/taohuayuan_vectors");
        then.status(201).json_body(json!([]));
    });

    for (case, text) in [("empty", ""), ("blank", "   \n\n  ")] {
        let doc = write_doc(case, text);
        let err = ingest_document(&config(&db, &ai), &doc.path).expect_err("nothing to embed");
        assert!(matches!(err, RagError::EmptyDocument { .. }), "got {err}");
    }

    embed.assert_hits(0);
    insert.assert_hits(0);
}

#[test]
fn missing_file_is_reported_without_network_calls() {
    let db = MockServer::start();
    let ai = MockServer::start();
    let embed = ai.mock(|when, then| {
        when.method(POST).path("/embeddings");
        then.status(200);
    });

    let path = std::env::temp_dir().join("rag-ingest-definitely-missing").join("nope.txt");
    let err = ingest_document(&config(&db, &ai), &path).expect_err("missing file");

    assert!(matches!(err, RagError::DocumentRead { .. }), "got {err}");
    embed.assert_hits(0);
}

#[test]
fn embedding_failure_skips_the_insert() {
    let db = MockServer::start();
    let ai = MockServer::start();
    let embed = ai.mock(|when, then| {
        when.method(POST).path("/embeddings");
        then.status(429).body("quota exceeded");
    });
    let insert = db.mock(|when, then| {
        when.method(POST).path("/rest/v1/taohuayuan_vectors");
        then.status(201).json_body(json!([]));
    });

    let doc = write_doc("embed-fails", "A para.\n\nB para.");
    let err = ingest_document(&config(&db, &ai), &doc.path).expect_err("embedding should fail");

    assert_eq!(err.status().map(|s| s.as_u16()), Some(429));
    assert!(err.to_string().contains("quota exceeded"));
    embed.assert();
    insert.assert_hits(0);
}

#[test]
fn wrong_dimension_is_rejected_before_insert() {
    let db = MockServer::start();
    let ai = MockServer::start();
    ai.mock(|when, then| {
        when.method(POST).path("/embeddings");
        then.status(200)
            .json_body(json!({"data": [{"index": 0, "embedding": [0.5, 0.5]}]}));
    });
    let insert = db.mock(|when, then| {
        when.method(POST).path("/rest/v1/taohuayuan_vectors");
        then.status(201).json_body(json!([]));
    });

    let doc = write_doc("short-vector", "only paragraph");
    let err = ingest_document(&config(&db, &ai), &doc.path).expect_err("dimension mismatch");

    assert!(
        matches!(err, RagError::EmbeddingDimension { expected: 3, actual: 2, .. }),
        "got {err}"
    );
    insert.assert_hits(0);
}

#[test]
fn rejected_insert_reports_status_and_body_once() {
    let db = MockServer::start();
    let ai = MockServer::start();
    ai.mock(|when, then| {
        when.method(POST).path("/embeddings");
        then.status(200)
            .json_body(json!({"data": [{"index": 0, "embedding": [0.1, 0.2, 0.3]}]}));
    });
    let insert = db.mock(|when, then| {
        when.method(POST).path("/rest/v1/taohuayuan_vectors");
        then.status(401)
            .json_body(json!({"message": "new row violates row-level security policy"}));
    });

    let doc = write_doc("rls", "only paragraph");
    let err = ingest_document(&config(&db, &ai), &doc.path).expect_err("insert rejected");

    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
    assert!(err.to_string().contains("row-level security"));
    insert.assert();
}

#[test]
fn duplicate_embedding_indices_are_rejected() {
    let db = MockServer::start();
    let ai = MockServer::start();
    ai.mock(|when, then| {
        when.method(POST).path("/embeddings");
        then.status(200).json_body(json!({
            "data": [
                {"index": 0, "embedding": [1.0, 0.0, 0.0]},
                {"index": 0, "embedding": [0.0, 1.0, 0.0]}
            ]
        }));
    });
    let insert = db.mock(|when, then| {
        when.method(POST).path("/rest/v1/taohuayuan_vectors");
        then.status(201).json_body(json!([]));
    });

    let doc = write_doc("dup-index", "A para.\n\nB para.");
    let err = ingest_document(&config(&db, &ai), &doc.path).expect_err("indices must be 0..n");

    assert!(
        matches!(err, RagError::EmbeddingIndex { position: 1, index: 0 }),
        "got {err}"
    );
    insert.assert_hits(0);
}

#[test]
fn scratch_documents_are_cleaned_up() {
    let doc = write_doc("cleanup", "text");
    let dir = doc.dir.clone();
    assert!(dir.exists());
    drop(doc);
    assert!(!dir.exists());
}

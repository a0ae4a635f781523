mod build_prompt;
mod chunk_text;
mod config;
mod embed_chunks;
mod embed_query;
mod error;
mod generate;
mod http;
mod log_qa;
mod logging;
mod outcome;
mod repl;
mod retrieve_chunks;
mod store_supabase;

use std::fs;
use std::path::Path;

pub use build_prompt::{build_prompt_with_context, format_contexts, Message};
pub use chunk_text::chunk_text;
pub use config::{Config, ConfigError};
pub use error::RagError;
pub use logging::init_tracing;
pub use outcome::{Degradation, IngestReport, QueryOutcome, QueryStage, NO_CONTEXT_ANSWER};
pub use repl::run_repl;
pub use retrieve_chunks::RetrievedContext;
pub use store_supabase::{source_label, VectorRecord};

use embed_chunks::embed_texts;
use embed_query::{embed_query, QueryVector};
use generate::generate_answer;
use log_qa::{log_qa, QaLogEntry};
use retrieve_chunks::retrieve_top;
use store_supabase::{build_records, store_records};

/// Read, chunk, embed and insert one document. Aborts on the first failure; nothing is
/// written unless every earlier step succeeded.
pub fn ingest_document(cfg: &Config, path: &Path) -> Result<IngestReport, RagError> {
    let text = fs::read_to_string(path).map_err(|source| RagError::DocumentRead {
        path: path.to_path_buf(),
        source,
    })?;

    let chunks = chunk_text(&text);
    tracing::info!(chunks = chunks.len(), path = %path.display(), "text chunked");
    if chunks.is_empty() {
        return Err(RagError::EmptyDocument {
            path: path.to_path_buf(),
        });
    }

    let vectors = embed_texts(cfg, &chunks)?;
    let records = build_records(&source_base(path), chunks, vectors);
    let inserted = store_records(cfg, &records)?;

    Ok(IngestReport {
        chunks: records.len(),
        inserted,
    })
}

/// Label prefix for a document's chunks: its file stem.
fn source_base(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("document")
        .to_string()
}

/// Run one question through embed, retrieve, answer and log.
///
/// Upstream failures never escape: each stage falls back (no vector, no contexts, the
/// fixed no-context answer, or the error text as the answer) and records a
/// [`Degradation`]. A failed log write leaves the answer untouched.
pub fn answer_query(cfg: &Config, question: &str) -> QueryOutcome {
    let mut degradations = Vec::new();
    let mut degrade = |stage: QueryStage, reason: String| {
        degradations.push(Degradation { stage, reason });
    };

    let query_vec = match embed_query(cfg, question) {
        Ok(vector) => QueryVector::Embedded(vector),
        Err(err) => {
            tracing::warn!(error = %err, "query embedding failed, continuing without a vector");
            degrade(QueryStage::EmbeddingQuery, err.to_string());
            QueryVector::Unavailable
        }
    };

    let contexts = match &query_vec {
        QueryVector::Unavailable => Vec::new(),
        QueryVector::Embedded(vector) => match retrieve_top(cfg, vector) {
            Ok(contexts) => contexts,
            Err(err) => {
                tracing::warn!(error = %err, "similarity search failed");
                degrade(QueryStage::Retrieving, err.to_string());
                Vec::new()
            }
        },
    };
    tracing::debug!(contexts = contexts.len(), "retrieval finished");

    let answer = if contexts.is_empty() {
        degrade(QueryStage::Answering, "no contexts retrieved".to_string());
        NO_CONTEXT_ANSWER.to_string()
    } else {
        let messages = build_prompt_with_context(cfg, question, &contexts);
        match generate_answer(cfg, &messages) {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(error = %err, "chat completion failed");
                degrade(QueryStage::Answering, err.to_string());
                format!("Error generating chat completion: {}", err)
            }
        }
    };

    let entry = QaLogEntry {
        question,
        answer: &answer,
        contexts: &contexts,
    };
    if let Err(err) = log_qa(cfg, &entry) {
        tracing::warn!(error = %err, table = %cfg.log_table, "failed to store Q&A log");
        degrade(QueryStage::Logging, err.to_string());
    }

    QueryOutcome {
        answer,
        contexts,
        degradations,
    }
}

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::RagError;
use crate::http::{decode, send_json, supabase_headers, unexpected};

/// One row of the vector table.
#[derive(Clone, Debug, Serialize)]
pub struct VectorRecord {
    pub content: String,
    pub embedding: Vec<f32>,
    pub source: String,
}

/// Label for the 1-based `index`-th chunk of `base`.
pub fn source_label(base: &str, index: usize) -> String {
    format!("{}_chunk_{}", base, index)
}

/// Pair chunks with their embeddings, labelling them in order.
pub fn build_records(base: &str, chunks: Vec<String>, vectors: Vec<Vec<f32>>) -> Vec<VectorRecord> {
    chunks
        .into_iter()
        .zip(vectors)
        .enumerate()
        .map(|(idx, (content, embedding))| VectorRecord {
            content,
            embedding,
            source: source_label(base, idx + 1),
        })
        .collect()
}

/// Insert all records in a single write. Only `201 Created` counts as success; the
/// returned number is the length of the row array echoed back by PostgREST.
pub fn store_records(cfg: &Config, records: &[VectorRecord]) -> Result<usize, RagError> {
    let url = cfg.table_url(&cfg.vector_table);
    tracing::info!(count = records.len(), table = %cfg.vector_table, "inserting records");
    let headers = supabase_headers(cfg, Some("return=representation"))?;
    let resp = send_json(cfg, &url, headers, records)?;
    if resp.status.as_u16() != 201 {
        return Err(unexpected(&url, resp));
    }
    let rows: Vec<Value> = decode(&url, resp.body)?;
    Ok(rows.len())
}

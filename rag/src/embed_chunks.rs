use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::RagError;
use crate::http::{openai_headers, post_json};

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

/// Embed every text in one request. Vectors come back in input order.
pub fn embed_texts(cfg: &Config, texts: &[String]) -> Result<Vec<Vec<f32>>, RagError> {
    if texts.is_empty() {
        return Ok(vec![]);
    }
    tracing::info!(count = texts.len(), model = %cfg.embed_model, "generating embeddings");
    let url = format!("{}/embeddings", cfg.openai_url);
    let req = EmbedRequest {
        model: &cfg.embed_model,
        input: texts,
    };
    let res: EmbedResponse = post_json(cfg, &url, openai_headers(cfg)?, &req)?;
    let mut data = res.data;
    data.sort_by_key(|d| d.index);
    if let Some((position, d)) = data.iter().enumerate().find(|(i, d)| d.index != *i) {
        return Err(RagError::EmbeddingIndex {
            position,
            index: d.index,
        });
    }
    let vectors: Vec<Vec<f32>> = data.into_iter().map(|d| d.embedding).collect();
    check_vectors(cfg, texts.len(), &vectors)?;
    Ok(vectors)
}

fn check_vectors(cfg: &Config, expected: usize, vectors: &[Vec<f32>]) -> Result<(), RagError> {
    if vectors.len() != expected {
        return Err(RagError::EmbeddingCount {
            expected,
            actual: vectors.len(),
        });
    }
    if let Some((index, v)) = vectors
        .iter()
        .enumerate()
        .find(|(_, v)| v.len() != cfg.embedding_dimension)
    {
        return Err(RagError::EmbeddingDimension {
            index,
            expected: cfg.embedding_dimension,
            actual: v.len(),
        });
    }
    Ok(())
}

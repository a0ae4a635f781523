use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by the ingestion and query stages.
#[derive(Debug, Error)]
pub enum RagError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read document {}: {source}", path.display())]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("nothing to embed: {} contains no non-empty chunks", path.display())]
    EmptyDocument { path: PathBuf },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{method} {url} failed ({status}): {body}")]
    UnexpectedStatus {
        method: &'static str,
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("{url} returned an undecodable body: {source} | {body}")]
    Decode {
        url: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("embedding service returned {actual} vectors for {expected} inputs")]
    EmbeddingCount { expected: usize, actual: usize },

    #[error("embedding at position {position} carries index {index}")]
    EmbeddingIndex { position: usize, index: usize },

    #[error("embedding {index} has {actual} dimensions, expected {expected}")]
    EmbeddingDimension {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("chat completion returned no content")]
    EmptyCompletion,

    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),
}

impl RagError {
    /// HTTP status carried by the error, if the upstream answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }
}

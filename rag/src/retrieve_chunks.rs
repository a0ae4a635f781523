use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::RagError;
use crate::http::{post_json, supabase_headers};

/// A stored chunk returned by the similarity search, annotated with its score.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievedContext {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub similarity: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
    /// Any other columns the search function returns, kept for the QA log.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize)]
struct MatchRequest<'a> {
    query_embedding: &'a [f32],
    match_count: usize,
    match_threshold: f32,
}

/// Call the search function. Results are returned in the order the server ranked them.
pub fn retrieve_top(cfg: &Config, vector: &[f32]) -> Result<Vec<RetrievedContext>, RagError> {
    let url = cfg.rpc_url(&cfg.match_function);
    let req = MatchRequest {
        query_embedding: vector,
        match_count: cfg.top_k,
        match_threshold: cfg.match_threshold,
    };
    tracing::info!(match_count = cfg.top_k, function = %cfg.match_function, "searching similar chunks");
    post_json(cfg, &url, supabase_headers(cfg, None)?, &req)
}

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const VECTOR_TABLE: &str = "taohuayuan_vectors";
pub const LOG_TABLE: &str = "qa_logs";
pub const MATCH_FUNCTION: &str = "match_taohuayuan";
pub const EMBED_MODEL: &str = "text-embedding-ada-002";
pub const EMBEDDING_DIMENSION: usize = 1536;

const DEFAULT_CHAT_MODEL: &str = "gpt-4.1-mini";
const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";
const DEFAULT_DOCUMENT: &str = "TextFile/taohuayuan.txt";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an assistant who knows the prose piece \
\"The Peach Blossom Spring\" (Taohuayuan Ji) well. Answer only from the excerpts provided \
to you, concisely and accurately, in the language of the question. Never invent anything \
the excerpts do not contain. If the excerpts do not contain the answer, say plainly that \
it cannot be determined from the available excerpts.";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_key: String,
    pub openai_api_key: String,
    pub openai_url: String,
    pub chat_model: String,
    pub embed_model: String,
    pub embedding_dimension: usize,
    pub vector_table: String,
    pub log_table: String,
    pub match_function: String,
    pub document_path: PathBuf,
    pub top_k: usize,
    pub match_threshold: f32,
    pub temperature: f32,
    pub http_timeout: Duration,
    pub system_prompt: String,
}

impl Config {
    /// Config with every optional setting at its default.
    pub fn new(supabase_url: &str, supabase_key: &str, openai_api_key: &str) -> Self {
        Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_key: supabase_key.to_string(),
            openai_api_key: openai_api_key.to_string(),
            openai_url: DEFAULT_OPENAI_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embed_model: EMBED_MODEL.to_string(),
            embedding_dimension: EMBEDDING_DIMENSION,
            vector_table: VECTOR_TABLE.to_string(),
            log_table: LOG_TABLE.to_string(),
            match_function: MATCH_FUNCTION.to_string(),
            document_path: PathBuf::from(DEFAULT_DOCUMENT),
            top_k: 5,
            match_threshold: 0.0,
            temperature: 0.1,
            http_timeout: Duration::from_secs(120),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env if present so credentials work without manual `source .env`.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let required = ["SUPABASE_URL", "SUPABASE_KEY", "OPENAI_API_KEY"];
        let missing: Vec<&'static str> = required
            .iter()
            .copied()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let mut cfg = Self::new(
            &get("SUPABASE_URL").unwrap_or_default(),
            &get("SUPABASE_KEY").unwrap_or_default(),
            &get("OPENAI_API_KEY").unwrap_or_default(),
        );
        if let Some(model) = get("OPENAI_CHAT_MODEL") {
            cfg.chat_model = model;
        }
        if let Some(url) = get("OPENAI_BASE_URL") {
            cfg.openai_url = url.trim_end_matches('/').to_string();
        }
        if let Some(path) = get("RAG_DOCUMENT_PATH") {
            cfg.document_path = PathBuf::from(path);
        }
        if let Some(prompt) = get("RAG_SYSTEM_PROMPT") {
            cfg.system_prompt = prompt;
        }
        if let Some(top_k) = parse_var(&get, "RAG_TOP_K")? {
            cfg.top_k = top_k;
        }
        if let Some(threshold) = parse_var(&get, "RAG_MATCH_THRESHOLD")? {
            cfg.match_threshold = threshold;
        }
        if let Some(secs) = parse_var(&get, "RAG_HTTP_TIMEOUT_SECS")? {
            cfg.http_timeout = Duration::from_secs(secs);
        }
        Ok(cfg)
    }

    /// Base of the PostgREST data API.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.supabase_url)
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url(), table)
    }

    pub fn rpc_url(&self, function: &str) -> String {
        format!("{}/rpc/{}", self.rest_url(), function)
    }
}

fn parse_var<T, G>(get: &G, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key, value })
        })
        .transpose()
}

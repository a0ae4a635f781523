use serde::Serialize;

use crate::config::Config;
use crate::error::RagError;
use crate::http::{send_json, supabase_headers, unexpected};
use crate::retrieve_chunks::RetrievedContext;

/// Row appended to the QA log table. `created_at` is filled in by the database.
#[derive(Debug, Serialize)]
pub struct QaLogEntry<'a> {
    pub question: &'a str,
    pub answer: &'a str,
    pub contexts: &'a [RetrievedContext],
}

/// Append one entry. Any 2xx is success; the row is not echoed back.
pub fn log_qa(cfg: &Config, entry: &QaLogEntry<'_>) -> Result<(), RagError> {
    let url = cfg.table_url(&cfg.log_table);
    let resp = send_json(cfg, &url, supabase_headers(cfg, Some("return=minimal"))?, entry)?;
    if !resp.status.is_success() {
        return Err(unexpected(&url, resp));
    }
    Ok(())
}

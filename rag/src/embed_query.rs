use crate::config::Config;
use crate::embed_chunks::embed_texts;
use crate::error::RagError;

/// Query vector handed to retrieval. `Unavailable` marks a failed embedding call and is
/// never sent to the search function.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryVector {
    Embedded(Vec<f32>),
    Unavailable,
}

pub fn embed_query(cfg: &Config, text: &str) -> Result<Vec<f32>, RagError> {
    let vecs = embed_texts(cfg, &[text.to_string()])?;
    Ok(vecs.into_iter().next().unwrap_or_default())
}

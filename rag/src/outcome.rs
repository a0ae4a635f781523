use std::fmt;

use crate::retrieve_chunks::RetrievedContext;

/// Answer given when retrieval produced nothing to ground a reply on.
pub const NO_CONTEXT_ANSWER: &str =
    "Cannot be determined from the available excerpts: no relevant passages were retrieved from the vector store.";

/// Stage of the query pipeline, in the order they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryStage {
    EmbeddingQuery,
    Retrieving,
    Answering,
    Logging,
}

/// A stage that fell back instead of completing normally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Degradation {
    pub stage: QueryStage,
    pub reason: String,
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.stage, self.reason)
    }
}

/// Result of running one question through the query pipeline.
#[derive(Clone, Debug)]
pub struct QueryOutcome {
    pub answer: String,
    pub contexts: Vec<RetrievedContext>,
    pub degradations: Vec<Degradation>,
}

impl QueryOutcome {
    pub fn degraded_at(&self, stage: QueryStage) -> bool {
        self.degradations.iter().any(|d| d.stage == stage)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IngestReport {
    pub chunks: usize,
    pub inserted: usize,
}

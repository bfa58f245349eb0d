//! Index-backed retrieval stage

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::agent::Retriever;
use crate::domain::index::DocumentIndex;
use crate::domain::{Document, DomainError};

/// Retriever delegating to the injected document index
///
/// Top-k and similarity thresholds belong to the index itself; this
/// stage returns whatever ranked set the index yields.
#[derive(Debug)]
pub struct IndexRetriever {
    index: Arc<dyn DocumentIndex>,
}

impl IndexRetriever {
    pub fn new(index: Arc<dyn DocumentIndex>) -> Self {
        Self { index }
    }
}

#[async_trait]
impl Retriever for IndexRetriever {
    async fn retrieve(&self, question: &str) -> Result<Vec<Document>, DomainError> {
        let documents = self.index.search(question).await?;
        debug!(
            index = self.index.index_name(),
            count = documents.len(),
            "Retrieved candidates"
        );
        Ok(documents)
    }
}

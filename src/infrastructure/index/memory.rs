//! In-memory cosine-similarity index
//!
//! Holds embedded chunks for the lifetime of the process; persistence of
//! the index is out of scope.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::index::DocumentIndex;
use crate::domain::{Document, DomainError};

/// Index configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Number of candidates returned per search
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Minimum cosine similarity for a candidate to be returned
    #[serde(default)]
    pub similarity_threshold: f32,
}

fn default_top_k() -> usize {
    4
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            similarity_threshold: 0.0,
        }
    }
}

#[derive(Debug)]
struct IndexEntry {
    document: Document,
    embedding: Vec<f32>,
}

/// In-memory vector index over an injected embedding provider
#[derive(Debug)]
pub struct InMemoryVectorIndex {
    embedder: Arc<dyn EmbeddingProvider>,
    model: String,
    config: IndexConfig,
    entries: RwLock<Vec<IndexEntry>>,
}

impl InMemoryVectorIndex {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        model: impl Into<String>,
        config: IndexConfig,
    ) -> Self {
        Self {
            embedder,
            model: model.into(),
            config,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Embed and add documents to the index, returning the count added
    pub async fn add_documents(&self, documents: Vec<Document>) -> Result<usize, DomainError> {
        if documents.is_empty() {
            return Ok(0);
        }

        let inputs: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let request = EmbeddingRequest::batch(&self.model, inputs);
        let vectors = self.embedder.embed(request).await?.into_vectors();

        if vectors.len() != documents.len() {
            return Err(DomainError::index(format!(
                "Embedding count mismatch: {} documents, {} vectors",
                documents.len(),
                vectors.len()
            )));
        }

        let mut entries = self.entries.write().await;
        for (document, embedding) in documents.into_iter().zip(vectors) {
            entries.push(IndexEntry {
                document,
                embedding,
            });
        }

        Ok(entries.len())
    }

    /// Number of indexed documents
    pub async fn document_count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl DocumentIndex for InMemoryVectorIndex {
    async fn search(&self, query: &str) -> Result<Vec<Document>, DomainError> {
        let request = EmbeddingRequest::single(&self.model, query);
        let query_vector = self
            .embedder
            .embed(request)
            .await?
            .into_vectors()
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::index("Embedding provider returned no vector"))?;

        let entries = self.entries.read().await;

        let mut scored: Vec<(f32, &Document)> = entries
            .iter()
            .map(|entry| (cosine_similarity(&query_vector, &entry.embedding), &entry.document))
            .filter(|(score, _)| *score >= self.config.similarity_threshold)
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let results: Vec<Document> = scored
            .into_iter()
            .take(self.config.top_k)
            .map(|(score, document)| {
                let mut document = document.clone();
                document.score = score;
                document
            })
            .collect();

        debug!(query = %query, results = results.len(), "Index search complete");
        Ok(results)
    }

    fn index_name(&self) -> &'static str {
        "in_memory"
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

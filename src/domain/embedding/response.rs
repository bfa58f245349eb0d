use serde::{Deserialize, Serialize};

/// A single embedding vector with its input position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedding {
    index: usize,
    vector: Vec<f32>,
}

impl Embedding {
    pub fn new(index: usize, vector: Vec<f32>) -> Self {
        Self { index, vector }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    pub fn into_vector(self) -> Vec<f32> {
        self.vector
    }
}

/// Response from an embedding provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    model: String,
    embeddings: Vec<Embedding>,
}

impl EmbeddingResponse {
    pub fn new(model: impl Into<String>, embeddings: Vec<Embedding>) -> Self {
        Self {
            model: model.into(),
            embeddings,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn embeddings(&self) -> &[Embedding] {
        &self.embeddings
    }

    /// Consume the response, returning vectors in input order
    pub fn into_vectors(self) -> Vec<Vec<f32>> {
        let mut embeddings = self.embeddings;
        embeddings.sort_by_key(|e| e.index());
        embeddings.into_iter().map(Embedding::into_vector).collect()
    }
}

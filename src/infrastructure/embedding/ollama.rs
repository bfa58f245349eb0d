use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::embedding::{Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;
use crate::infrastructure::llm::HttpClientTrait;

const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Ollama embedding provider
///
/// The embeddings endpoint takes one input per call, so batches are
/// submitted sequentially.
#[derive(Debug)]
pub struct OllamaEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
}

impl<C: HttpClientTrait> OllamaEmbeddingProvider<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_OLLAMA_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn embeddings_url(&self) -> String {
        format!("{}/api/embeddings", self.base_url)
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OllamaEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let url = self.embeddings_url();
        let headers = vec![("Content-Type", "application/json")];
        let mut embeddings = Vec::with_capacity(request.inputs().len());

        for (idx, input) in request.inputs().iter().enumerate() {
            let body = serde_json::json!({
                "model": request.model(),
                "prompt": input,
            });

            let response = self
                .client
                .post_json(&url, headers.clone(), &body)
                .await?;

            let parsed: OllamaEmbeddingResponse =
                serde_json::from_value(response).map_err(|e| {
                    DomainError::provider(
                        "ollama",
                        format!("Failed to parse embedding response: {}", e),
                    )
                })?;

            embeddings.push(Embedding::new(idx, parsed.embedding));
        }

        Ok(EmbeddingResponse::new(request.model(), embeddings))
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }
}

#[derive(Debug, Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}

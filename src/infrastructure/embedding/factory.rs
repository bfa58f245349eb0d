use serde::Deserialize;
use std::sync::Arc;

use super::{OllamaEmbeddingProvider, OpenAiEmbeddingProvider};
use crate::domain::{DomainError, EmbeddingProvider};
use crate::infrastructure::llm::HttpClient;

/// Embedding provider configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EmbeddingProviderConfig {
    Ollama {
        #[serde(default)]
        base_url: Option<String>,
    },
    OpenAi {
        #[serde(default)]
        base_url: Option<String>,
    },
}

/// Factory for creating embedding providers
#[derive(Debug)]
pub struct EmbeddingProviderFactory;

impl EmbeddingProviderFactory {
    /// Create an embedding provider from configuration
    pub fn create(
        config: &EmbeddingProviderConfig,
    ) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        let http_client = HttpClient::new();

        match config {
            EmbeddingProviderConfig::Ollama { base_url } => Ok(match base_url {
                Some(url) => Arc::new(OllamaEmbeddingProvider::with_base_url(http_client, url)),
                None => Arc::new(OllamaEmbeddingProvider::new(http_client)),
            }),

            EmbeddingProviderConfig::OpenAi { base_url } => {
                let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
                    DomainError::configuration(
                        "OPENAI_API_KEY environment variable is required for the openai provider",
                    )
                })?;

                Ok(match base_url {
                    Some(url) => Arc::new(OpenAiEmbeddingProvider::with_base_url(
                        http_client,
                        api_key,
                        url,
                    )),
                    None => Arc::new(OpenAiEmbeddingProvider::new(http_client, api_key)),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ollama_embedding_provider() {
        let config = EmbeddingProviderConfig::Ollama { base_url: None };
        let provider = EmbeddingProviderFactory::create(&config).unwrap();
        assert_eq!(provider.provider_name(), "ollama");
    }
}

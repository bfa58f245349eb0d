use serde::Deserialize;
use std::sync::Arc;

use super::http_client::HttpClient;
use super::{OllamaProvider, OpenAiProvider};
use crate::domain::{DomainError, LlmProvider};

/// LLM provider configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LlmProviderConfig {
    Ollama {
        #[serde(default)]
        base_url: Option<String>,
    },
    OpenAi {
        #[serde(default)]
        base_url: Option<String>,
    },
}

/// Factory for creating LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create an LLM provider from configuration
    ///
    /// The OpenAI key is read from `OPENAI_API_KEY`; Ollama needs none.
    pub fn create(config: &LlmProviderConfig) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let http_client = HttpClient::new();

        match config {
            LlmProviderConfig::Ollama { base_url } => Ok(match base_url {
                Some(url) => Arc::new(OllamaProvider::with_base_url(http_client, url)),
                None => Arc::new(OllamaProvider::new(http_client)),
            }),

            LlmProviderConfig::OpenAi { base_url } => {
                let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
                    DomainError::configuration(
                        "OPENAI_API_KEY environment variable is required for the openai provider",
                    )
                })?;

                Ok(match base_url {
                    Some(url) => Arc::new(OpenAiProvider::with_base_url(http_client, api_key, url)),
                    None => Arc::new(OpenAiProvider::new(http_client, api_key)),
                })
            }
        }
    }

    /// Create an Ollama provider directly
    pub fn create_ollama(base_url: impl Into<String>) -> Arc<dyn LlmProvider> {
        Arc::new(OllamaProvider::with_base_url(HttpClient::new(), base_url))
    }

    /// Create an OpenAI provider directly
    pub fn create_openai(api_key: impl Into<String>) -> Arc<dyn LlmProvider> {
        Arc::new(OpenAiProvider::new(HttpClient::new(), api_key))
    }
}

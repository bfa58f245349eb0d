//! LLM provider implementations

mod factory;
pub mod http_client;
mod ollama;
mod openai;

pub use factory::{LlmProviderConfig, LlmProviderFactory};
pub use http_client::{HttpClient, HttpClientTrait};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

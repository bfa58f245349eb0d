use serde::Deserialize;

use crate::domain::agent::AgentConfig;
use crate::infrastructure::corpus::CorpusConfig;
use crate::infrastructure::embedding::EmbeddingProviderConfig;
use crate::infrastructure::index::IndexConfig;
use crate::infrastructure::llm::LlmProviderConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// LLM backend selection and model name
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(flatten)]
    pub provider: LlmProviderConfig,
    #[serde(default = "default_llm_model")]
    pub model: String,
}

/// Embedding backend selection and model name
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(flatten)]
    pub provider: EmbeddingProviderConfig,
    #[serde(default = "default_embedding_model")]
    pub model: String,
}

fn default_llm_model() -> String {
    "llama3".to_string()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            llm: LlmConfig::default(),
            embedding: EmbeddingConfig::default(),
            index: IndexConfig::default(),
            corpus: CorpusConfig::default(),
            agent: AgentConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderConfig::Ollama { base_url: None },
            model: default_llm_model(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderConfig::Ollama { base_url: None },
            model: default_embedding_model(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.llm.model, "llama3");
        assert_eq!(config.embedding.model, "nomic-embed-text");
        assert_eq!(config.agent.max_reformulations, 3);
        assert_eq!(config.index.top_k, 4);
    }

    #[test]
    fn test_llm_config_deserialization() {
        let config: LlmConfig = serde_json::from_str(
            r#"{"type": "openai", "model": "gpt-4o-mini", "base_url": "http://localhost:8080"}"#,
        )
        .unwrap();

        assert_eq!(config.model, "gpt-4o-mini");
        assert!(matches!(
            config.provider,
            LlmProviderConfig::OpenAi { base_url: Some(_) }
        ));
    }
}

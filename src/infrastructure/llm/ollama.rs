use async_trait::async_trait;
use serde::Deserialize;

use super::http_client::HttpClientTrait;
use crate::domain::llm::LlmResponseFormat;
use crate::domain::{
    DomainError, LlmProvider, LlmRequest, LlmResponse, Message,
    llm::{FinishReason, MessageRole, Usage},
};

const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Ollama API provider (local model server)
#[derive(Debug)]
pub struct OllamaProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
}

impl<C: HttpClientTrait> OllamaProvider<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_OLLAMA_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> serde_json::Value {
        let messages: Vec<OllamaMessage> = request
            .messages
            .iter()
            .map(OllamaMessage::from_domain)
            .collect();

        let mut body = serde_json::json!({
            "model": model,
            "messages": messages,
            "stream": false,
        });

        if request.response_format == LlmResponseFormat::JsonObject {
            body["format"] = serde_json::json!("json");
        }

        let mut options = serde_json::Map::new();
        if let Some(temp) = request.temperature {
            options.insert("temperature".to_string(), serde_json::json!(temp));
        }
        if let Some(max_tokens) = request.max_tokens {
            options.insert("num_predict".to_string(), serde_json::json!(max_tokens));
        }
        if !options.is_empty() {
            body["options"] = serde_json::Value::Object(options);
        }

        body
    }

    fn parse_response(&self, model: &str, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: OllamaResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("ollama", format!("Failed to parse response: {}", e))
        })?;

        let message = Message::assistant(response.message.content);
        let id = uuid::Uuid::new_v4().to_string();

        let mut llm_response = LlmResponse::new(id, model.to_string(), message);

        if let Some(reason) = response.done_reason {
            llm_response = llm_response.with_finish_reason(parse_finish_reason(&reason));
        }

        if let (Some(prompt), Some(completion)) =
            (response.prompt_eval_count, response.eval_count)
        {
            llm_response = llm_response.with_usage(Usage::new(prompt, completion));
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OllamaProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let url = self.chat_url();
        let body = self.build_request(model, &request);
        let headers = vec![("Content-Type", "application/json")];

        let response = self.client.post_json(&url, headers, &body).await?;

        self.parse_response(model, response)
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }
}

fn parse_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        _ => FinishReason::Stop,
    }
}

// Ollama API types

#[derive(Debug, serde::Serialize)]
struct OllamaMessage {
    role: String,
    content: String,
}

impl OllamaMessage {
    fn from_domain(message: &Message) -> Self {
        let role = match message.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };

        Self {
            role: role.to_string(),
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaResponseMessage,
    done_reason: Option<String>,
    prompt_eval_count: Option<u32>,
    eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;

    const TEST_URL: &str = "http://localhost:11434/api/chat";

    #[tokio::test]
    async fn test_ollama_chat() {
        let mock_response = serde_json::json!({
            "model": "llama3",
            "created_at": "2024-01-01T00:00:00Z",
            "message": {
                "role": "assistant",
                "content": "Hello! How can I help you?"
            },
            "done": true,
            "done_reason": "stop",
            "prompt_eval_count": 12,
            "eval_count": 9
        });

        let client = MockHttpClient::new().with_response(TEST_URL, mock_response);
        let provider = OllamaProvider::new(client);

        let request = LlmRequest::builder().user("Hello!").build();
        let response = provider.chat("llama3", request).await.unwrap();

        assert_eq!(response.model, "llama3");
        assert_eq!(response.content(), "Hello! How can I help you?");
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));

        let usage = response.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 12);
        assert_eq!(usage.completion_tokens, 9);
    }

    #[tokio::test]
    async fn test_ollama_error_handling() {
        let client = MockHttpClient::new().with_error(TEST_URL, "connection refused");
        let provider = OllamaProvider::new(client);

        let request = LlmRequest::builder().user("Hello!").build();
        let result = provider.chat("llama3", request).await;

        assert!(result.is_err());
    }

    #[test]
    fn test_build_request_json_format() {
        let client = MockHttpClient::new();
        let provider = OllamaProvider::new(client);

        let request = LlmRequest::builder()
            .user("Grade this")
            .temperature(0.0)
            .json_object()
            .build();
        let body = provider.build_request("llama3", &request);

        assert_eq!(body["format"], "json");
        assert_eq!(body["stream"], false);
        assert_eq!(body["options"]["temperature"], 0.0);
    }

    #[test]
    fn test_build_request_text_format_omits_format_field() {
        let client = MockHttpClient::new();
        let provider = OllamaProvider::new(client);

        let request = LlmRequest::builder().user("Answer this").build();
        let body = provider.build_request("llama3", &request);

        assert!(body.get("format").is_none());
    }

    #[test]
    fn test_custom_base_url_trailing_slash() {
        let client = MockHttpClient::new();
        let provider = OllamaProvider::with_base_url(client, "http://remote:11434/");

        assert_eq!(provider.chat_url(), "http://remote:11434/api/chat");
    }
}

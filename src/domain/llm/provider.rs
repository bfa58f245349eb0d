use async_trait::async_trait;
use std::fmt::Debug;

use super::{LlmRequest, LlmResponse};
use crate::domain::DomainError;

/// Trait for LLM providers (Ollama, OpenAI, etc.)
///
/// Both call shapes the engine needs go through `chat`: free-text
/// completion, and structured completion when the request carries
/// `LlmResponseFormat::JsonObject`.
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a chat completion request
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::llm::Message;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    pub struct MockLlmProvider {
        name: &'static str,
        responses: Mutex<VecDeque<LlmResponse>>,
        fallback: Option<LlmResponse>,
        error: Option<String>,
        call_count: AtomicUsize,
    }

    impl MockLlmProvider {
        pub fn new(name: &'static str) -> Self {
            Self {
                name,
                responses: Mutex::new(VecDeque::new()),
                fallback: None,
                error: None,
                call_count: AtomicUsize::new(0),
            }
        }

        /// Set a fixed response returned on every call
        pub fn with_response(mut self, response: LlmResponse) -> Self {
            self.fallback = Some(response);
            self
        }

        /// Set a fixed assistant-text response returned on every call
        pub fn with_content(self, content: impl Into<String>) -> Self {
            let content = content.into();
            self.with_response(LlmResponse::new(
                "mock-resp".to_string(),
                "mock-model".to_string(),
                Message::assistant(content),
            ))
        }

        /// Queue one response, consumed in call order before the fallback
        pub fn push_content(self, content: impl Into<String>) -> Self {
            let content = content.into();
            self.responses.lock().unwrap().push_back(LlmResponse::new(
                "mock-resp".to_string(),
                "mock-model".to_string(),
                Message::assistant(content),
            ));
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlmProvider {
        async fn chat(
            &self,
            _model: &str,
            _request: LlmRequest,
        ) -> Result<LlmResponse, DomainError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);

            if let Some(ref error) = self.error {
                return Err(DomainError::provider(self.name, error));
            }

            if let Some(queued) = self.responses.lock().unwrap().pop_front() {
                return Ok(queued);
            }

            self.fallback
                .clone()
                .ok_or_else(|| DomainError::provider(self.name, "No mock response configured"))
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }
    }
}

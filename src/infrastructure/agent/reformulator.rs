//! LLM-backed query reformulation stage

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::prompts::{REFORMULATE_SYSTEM, REFORMULATE_TEMPLATE, render};
use crate::domain::agent::QueryReformulator;
use crate::domain::llm::LlmRequest;
use crate::domain::{DomainError, LlmProvider};

/// Reformulator that asks the LLM for a recall-improving rewrite
///
/// Single-hypothesis: the rewrite fully replaces the prior question and
/// no history of earlier phrasings is kept.
#[derive(Debug)]
pub struct LlmQueryReformulator {
    provider: Arc<dyn LlmProvider>,
    model: String,
    max_reformulations: u32,
}

impl LlmQueryReformulator {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        model: impl Into<String>,
        max_reformulations: u32,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            max_reformulations,
        }
    }
}

#[async_trait]
impl QueryReformulator for LlmQueryReformulator {
    async fn reformulate(
        &self,
        question: &str,
        retry_count: u32,
    ) -> Result<(String, u32), DomainError> {
        // The router routes to generation before this is reachable; a
        // counter already at the bound must not trigger another rewrite.
        if retry_count >= self.max_reformulations {
            return Ok((question.to_string(), retry_count + 1));
        }

        let prompt = render(REFORMULATE_TEMPLATE, &[("question", question)]);
        let request = LlmRequest::builder()
            .system(REFORMULATE_SYSTEM)
            .user(prompt)
            .temperature(0.0)
            .build();

        let response = self.provider.chat(&self.model, request).await?;
        let rewritten = response.content().trim().to_string();

        debug!(original = %question, rewritten = %rewritten, "Question reformulated");
        Ok((rewritten, retry_count + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;

    #[tokio::test]
    async fn test_reformulate_rewrites_and_increments() {
        let provider =
            Arc::new(MockLlmProvider::new("mock").with_content("  What exactly is X?  "));
        let reformulator = LlmQueryReformulator::new(provider, "llama3", 3);

        let (question, count) = reformulator.reformulate("What is X?", 0).await.unwrap();

        assert_eq!(question, "What exactly is X?");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_reformulate_at_bound_is_a_noop() {
        let provider = Arc::new(MockLlmProvider::new("mock"));
        let reformulator = LlmQueryReformulator::new(provider.clone(), "llama3", 3);

        let (question, count) = reformulator.reformulate("What is X?", 3).await.unwrap();

        assert_eq!(question, "What is X?");
        assert_eq!(count, 4);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_reformulate_failure_propagates() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_error("model offline"));
        let reformulator = LlmQueryReformulator::new(provider, "llama3", 3);

        let result = reformulator.reformulate("What is X?", 0).await;

        assert!(result.is_err());
    }
}

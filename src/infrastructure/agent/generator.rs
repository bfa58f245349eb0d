//! LLM-backed answer generation stage

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::prompts::{GENERATE_TEMPLATE, render};
use crate::domain::agent::AnswerGenerator;
use crate::domain::llm::LlmRequest;
use crate::domain::{Document, DomainError, LlmProvider};

/// Generator that answers from the graded context
///
/// The instruction tells the model to state lack of knowledge rather
/// than fabricate, so an empty context still yields an answer. Raw text
/// comes back untouched; citations are rendered by the caller from the
/// documents it already holds.
#[derive(Debug)]
pub struct ContextAnswerGenerator {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl ContextAnswerGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    fn format_context(documents: &[Document]) -> String {
        documents
            .iter()
            .map(|d| d.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[async_trait]
impl AnswerGenerator for ContextAnswerGenerator {
    async fn generate(
        &self,
        question: &str,
        documents: &[Document],
    ) -> Result<String, DomainError> {
        let context = Self::format_context(documents);
        let prompt = render(
            GENERATE_TEMPLATE,
            &[("question", question), ("context", &context)],
        );

        let request = LlmRequest::builder().user(prompt).temperature(0.0).build();
        let response = self.provider.chat(&self.model, request).await?;

        debug!(context_documents = documents.len(), "Answer generated");
        Ok(response.content().to_string())
    }
}

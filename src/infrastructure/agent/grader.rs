//! LLM-backed relevance grading stage

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use serde::Deserialize;
use tracing::{debug, warn};

use super::prompts::{GRADE_TEMPLATE, render};
use crate::domain::agent::RelevanceGrader;
use crate::domain::llm::LlmRequest;
use crate::domain::{Document, DomainError, LlmProvider};

/// Binary outcome of one document's relevance judgment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GradeDecision {
    Relevant,
    NotRelevant,
}

/// Single-field judgment returned by the model
#[derive(Debug, Deserialize)]
struct GradeResponse {
    score: String,
}

/// Grader that asks the LLM for a yes/no judgment per document
///
/// Judgments are independent, so up to `concurrency` of them run at
/// once; results recombine in retrieval order. A judgment that fails or
/// cannot be parsed drops only its own document.
#[derive(Debug)]
pub struct LlmRelevanceGrader {
    provider: Arc<dyn LlmProvider>,
    model: String,
    concurrency: usize,
}

impl LlmRelevanceGrader {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            concurrency: 1,
        }
    }

    /// Set how many judgments run concurrently (clamped to at least 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    async fn judge(&self, question: &str, document: &Document) -> GradeDecision {
        let prompt = render(
            GRADE_TEMPLATE,
            &[("document", &document.content), ("question", question)],
        );

        let request = LlmRequest::builder()
            .user(prompt)
            .temperature(0.0)
            .json_object()
            .build();

        let response = match self.provider.chat(&self.model, request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(document = %document.id, error = %e, "Judgment failed, dropping document");
                return GradeDecision::NotRelevant;
            }
        };

        match parse_decision(response.content()) {
            Ok(decision) => decision,
            Err(e) => {
                warn!(document = %document.id, error = %e, "Unparseable judgment, dropping document");
                GradeDecision::NotRelevant
            }
        }
    }
}

#[async_trait]
impl RelevanceGrader for LlmRelevanceGrader {
    async fn grade(&self, question: &str, documents: Vec<Document>) -> Vec<Document> {
        let total = documents.len();

        // buffered preserves input order regardless of completion order
        let judged: Vec<(Document, GradeDecision)> = futures::stream::iter(documents)
            .map(|document| async move {
                let decision = self.judge(question, &document).await;
                (document, decision)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let survivors: Vec<Document> = judged
            .into_iter()
            .filter(|(_, decision)| *decision == GradeDecision::Relevant)
            .map(|(document, _)| document)
            .collect();

        debug!(kept = survivors.len(), total, "Grading pass complete");
        survivors
    }
}

fn parse_decision(content: &str) -> Result<GradeDecision, DomainError> {
    let json_str = extract_json(content).unwrap_or(content);

    let response: GradeResponse = serde_json::from_str(json_str)
        .map_err(|e| DomainError::validation(format!("Invalid judgment format: {}", e)))?;

    if response.score.eq_ignore_ascii_case("yes") {
        Ok(GradeDecision::Relevant)
    } else if response.score.eq_ignore_ascii_case("no") {
        Ok(GradeDecision::NotRelevant)
    } else {
        Err(DomainError::validation(format!(
            "Judgment score must be 'yes' or 'no', got '{}'",
            response.score
        )))
    }
}

/// Extract a JSON object from a string (handles markdown code blocks)
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

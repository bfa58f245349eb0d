//! Stage contracts for the traversal graph
//!
//! Each stage is an injected collaborator so the driver can be exercised
//! against fakes; implementations backed by the index and the LLM live in
//! the infrastructure layer.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::Document;
use crate::domain::DomainError;

/// Retrieval stage: question text to ranked candidate documents
#[async_trait]
pub trait Retriever: Send + Sync + Debug {
    /// Fetch candidates for the question; index errors propagate and are
    /// fatal for the traversal
    async fn retrieve(&self, question: &str) -> Result<Vec<Document>, DomainError>;
}

/// Grading stage: filter candidates to those judged relevant
///
/// Infallible at the pass level: a judgment that cannot be obtained or
/// parsed drops that document and nothing else. Surviving documents keep
/// their retrieval order.
#[async_trait]
pub trait RelevanceGrader: Send + Sync + Debug {
    async fn grade(&self, question: &str, documents: Vec<Document>) -> Vec<Document>;
}

/// Reformulation stage: rewrite the question for better recall
#[async_trait]
pub trait QueryReformulator: Send + Sync + Debug {
    /// Returns the new question and the incremented retry counter
    async fn reformulate(
        &self,
        question: &str,
        retry_count: u32,
    ) -> Result<(String, u32), DomainError>;
}

/// Generation stage: produce the final answer from question and context
#[async_trait]
pub trait AnswerGenerator: Send + Sync + Debug {
    async fn generate(
        &self,
        question: &str,
        documents: &[Document],
    ) -> Result<String, DomainError>;
}

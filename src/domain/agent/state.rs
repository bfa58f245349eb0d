//! Per-question session state

use serde::Serialize;

use crate::domain::Document;

/// Mutable state owned by one question's traversal
///
/// Created fresh per incoming question, threaded through the stage graph
/// and discarded once generation completes or the traversal aborts.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    /// Current query text; rewritten by reformulation
    pub question: String,
    /// Current candidate set; written by retrieval, filtered by grading
    pub documents: Vec<Document>,
    /// Final answer text; empty until generation runs
    pub generation: String,
    /// Number of reformulation attempts so far; only ever incremented
    pub retry_count: u32,
}

impl SessionState {
    /// Create fresh state for a new question
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            documents: Vec::new(),
            generation: String::new(),
            retry_count: 0,
        }
    }

    /// Whether the grading pass left any candidates standing
    pub fn has_documents(&self) -> bool {
        !self.documents.is_empty()
    }
}

//! Traversal error types

use thiserror::Error;

use super::Stage;
use crate::domain::DomainError;

/// Fatal errors aborting a single question's traversal
///
/// A `TraversalError` means generation never ran, which keeps "system
/// failure" distinguishable from a generated answer that states
/// uncertainty. Grading-item failures never surface here; they are
/// recovered inside the grading pass by dropping the affected document.
#[derive(Debug, Error)]
pub enum TraversalError {
    #[error("Retrieval failed: {0}")]
    Retrieval(#[source] DomainError),

    #[error("Reformulation failed: {0}")]
    Reformulation(#[source] DomainError),

    #[error("Generation failed: {0}")]
    Generation(#[source] DomainError),
}

impl TraversalError {
    /// Stage in which the traversal aborted
    pub fn stage(&self) -> Stage {
        match self {
            Self::Retrieval(_) => Stage::Retrieve,
            Self::Reformulation(_) => Stage::Reformulate,
            Self::Generation(_) => Stage::Generate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_stage() {
        let error = TraversalError::Retrieval(DomainError::index("backend down"));
        assert_eq!(error.stage(), Stage::Retrieve);
        assert_eq!(
            error.to_string(),
            "Retrieval failed: Index error: backend down"
        );
    }

    #[test]
    fn test_generation_error_stage() {
        let error = TraversalError::Generation(DomainError::provider("ollama", "timeout"));
        assert_eq!(error.stage(), Stage::Generate);
    }
}

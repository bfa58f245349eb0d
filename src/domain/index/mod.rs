//! Document index trait
//!
//! The index is an external collaborator: it owns its own top-k and
//! similarity configuration and returns a ranked candidate set.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::Document;
use crate::domain::DomainError;

/// Trait for similarity-search indexes over embedded documents
#[async_trait]
pub trait DocumentIndex: Send + Sync + Debug {
    /// Search the index, returning candidates ranked best-first
    async fn search(&self, query: &str) -> Result<Vec<Document>, DomainError>;

    /// Get the index backend name
    fn index_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::RwLock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock index for testing
    #[derive(Debug)]
    pub struct MockDocumentIndex {
        results: RwLock<Vec<Document>>,
        search_count: AtomicUsize,
        should_fail: RwLock<bool>,
    }

    impl MockDocumentIndex {
        pub fn new() -> Self {
            Self {
                results: RwLock::new(Vec::new()),
                search_count: AtomicUsize::new(0),
                should_fail: RwLock::new(false),
            }
        }

        /// Set fixed search results (returned regardless of query)
        pub fn with_results(self, results: Vec<Document>) -> Self {
            *self.results.write().unwrap() = results;
            self
        }

        /// Set whether searches should fail
        pub fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().unwrap() = fail;
        }

        /// Get the number of search calls
        pub fn search_count(&self) -> usize {
            self.search_count.load(Ordering::SeqCst)
        }
    }

    impl Default for MockDocumentIndex {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl DocumentIndex for MockDocumentIndex {
        async fn search(&self, _query: &str) -> Result<Vec<Document>, DomainError> {
            self.search_count.fetch_add(1, Ordering::SeqCst);

            if *self.should_fail.read().unwrap() {
                return Err(DomainError::index("Mock index configured to fail"));
            }

            Ok(self.results.read().unwrap().clone())
        }

        fn index_name(&self) -> &'static str {
            "mock"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_index_results() {
            let index = MockDocumentIndex::new()
                .with_results(vec![Document::new("doc-1", "content", 0.9)]);

            let results = index.search("anything").await.unwrap();

            assert_eq!(results.len(), 1);
            assert_eq!(index.search_count(), 1);
        }

        #[tokio::test]
        async fn test_mock_index_failure() {
            let index = MockDocumentIndex::new();
            index.set_should_fail(true);

            assert!(index.search("anything").await.is_err());
        }
    }
}

#[cfg(test)]
pub use mock::MockDocumentIndex;

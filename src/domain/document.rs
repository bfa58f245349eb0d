//! Retrieved document value type

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A retrieved text chunk with its location metadata
///
/// Documents are produced by the index and only ever filtered downstream,
/// never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier of the document/chunk
    pub id: String,
    /// Content text
    pub content: String,
    /// Similarity score (0.0 - 1.0, higher is more similar)
    pub score: f32,
    /// Document metadata, carrying at least a page/location identifier
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Source document reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Document {
    /// Create a new document
    pub fn new(id: impl Into<String>, content: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            score,
            metadata: HashMap::new(),
            source: None,
        }
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Set all metadata
    pub fn with_all_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the page/location identifier
    pub fn with_page(self, page: u64) -> Self {
        self.with_metadata("page", serde_json::json!(page))
    }

    /// Set source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the page/location identifier, if present
    pub fn page(&self) -> Option<u64> {
        self.metadata.get("page").and_then(|v| v.as_u64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new("doc-1", "Some content", 0.9)
            .with_page(4)
            .with_source("paper.md");

        assert_eq!(doc.id, "doc-1");
        assert_eq!(doc.content, "Some content");
        assert_eq!(doc.page(), Some(4));
        assert_eq!(doc.source.as_deref(), Some("paper.md"));
    }

    #[test]
    fn test_document_without_page() {
        let doc = Document::new("doc-1", "Some content", 0.5);
        assert!(doc.page().is_none());
    }

    #[test]
    fn test_document_serialization_skips_empty_metadata() {
        let doc = Document::new("doc-1", "text", 0.5);
        let json = serde_json::to_string(&doc).unwrap();
        assert!(!json.contains("metadata"));
        assert!(!json.contains("source"));
    }
}

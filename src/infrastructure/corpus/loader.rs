//! Corpus directory loading

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::chunker::chunk_paragraphs;
use crate::domain::{Document, DomainError};

/// Corpus configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusConfig {
    /// Directory holding `.txt`/`.md` source files
    #[serde(default = "default_path")]
    pub path: String,
    /// Maximum chunk size in bytes
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_path() -> String {
    "data/corpus".to_string()
}

fn default_chunk_size() -> usize {
    1200
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            chunk_size: default_chunk_size(),
        }
    }
}

/// Load every supported file under the corpus directory into documents
///
/// Each chunk becomes one `Document` with `source` set to the file name
/// and `metadata.page` set to the chunk ordinal within that file, which
/// is the locator surfaced in citations.
pub async fn load_corpus(config: &CorpusConfig) -> Result<Vec<Document>, DomainError> {
    let path = Path::new(&config.path);

    if !path.is_dir() {
        return Err(DomainError::configuration(format!(
            "Corpus directory not found: {}",
            config.path
        )));
    }

    let mut entries = tokio::fs::read_dir(path)
        .await
        .map_err(|e| DomainError::internal(format!("Failed to read corpus directory: {}", e)))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| DomainError::internal(format!("Failed to read corpus directory: {}", e)))?
    {
        let file_path = entry.path();
        let supported = file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext, "txt" | "md"));

        if supported {
            files.push(file_path);
        }
    }

    // Deterministic document ids across runs
    files.sort();

    let mut documents = Vec::new();
    for file_path in files {
        let content = tokio::fs::read_to_string(&file_path)
            .await
            .map_err(|e| {
                DomainError::internal(format!("Failed to read {}: {}", file_path.display(), e))
            })?;

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let chunks = chunk_paragraphs(&content, config.chunk_size);
        debug!(file = %file_name, chunks = chunks.len(), "Chunked corpus file");

        for (ordinal, chunk) in chunks.into_iter().enumerate() {
            let page = ordinal as u64;
            documents.push(
                Document::new(format!("{}#{}", file_name, page), chunk, 0.0)
                    .with_page(page)
                    .with_source(file_name.clone()),
            );
        }
    }

    info!(documents = documents.len(), path = %config.path, "Corpus loaded");
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn write_file(dir: &Path, name: &str, content: &str) {
        tokio::fs::write(dir.join(name), content).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_corpus_chunks_and_labels() {
        let dir = std::env::temp_dir().join(format!("corpus-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();

        write_file(&dir, "paper.md", "First paragraph.\n\nSecond paragraph.").await;
        write_file(&dir, "notes.txt", "Some notes.").await;
        write_file(&dir, "ignored.pdf", "binary").await;

        let config = CorpusConfig {
            path: dir.to_string_lossy().to_string(),
            chunk_size: 20,
        };

        let documents = load_corpus(&config).await.unwrap();

        // notes.txt sorts before paper.md; the pdf is skipped
        assert_eq!(documents.len(), 3);
        assert_eq!(documents[0].source.as_deref(), Some("notes.txt"));
        assert_eq!(documents[1].source.as_deref(), Some("paper.md"));
        assert_eq!(documents[1].page(), Some(0));
        assert_eq!(documents[2].page(), Some(1));
        assert_eq!(documents[2].id, "paper.md#1");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_directory_is_configuration_error() {
        let config = CorpusConfig {
            path: "/nonexistent/corpus/dir".to_string(),
            chunk_size: 1200,
        };

        let error = load_corpus(&config).await.unwrap_err();
        assert!(matches!(error, DomainError::Configuration { .. }));
    }
}

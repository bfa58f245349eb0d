//! Corpus loading and chunking

mod chunker;
mod loader;

pub use chunker::chunk_paragraphs;
pub use loader::{CorpusConfig, load_corpus};

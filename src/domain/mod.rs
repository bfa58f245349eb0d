//! Domain types and collaborator traits

pub mod agent;
pub mod document;
pub mod embedding;
pub mod error;
pub mod index;
pub mod llm;

pub use agent::{
    AgentConfig, AnswerGenerator, ChannelSink, EventSink, NullSink, QueryReformulator,
    RelevanceGrader, Retriever, Route, SessionState, Stage, StageEvent, TraversalDriver,
    TraversalError,
};
pub use document::Document;
pub use embedding::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
pub use error::DomainError;
pub use index::DocumentIndex;
pub use llm::{LlmProvider, LlmRequest, LlmResponse, Message};

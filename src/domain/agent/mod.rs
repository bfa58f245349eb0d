//! Corrective RAG agent engine
//!
//! The traversal state machine sequencing retrieval, relevance grading,
//! routing, bounded reformulation and generation for one question at a
//! time.

mod config;
mod driver;
mod error;
mod event;
mod router;
mod stage;
mod state;

pub use config::AgentConfig;
pub use driver::TraversalDriver;
pub use error::TraversalError;
pub use event::{ChannelSink, EventSink, NullSink, Stage, StageEvent};
pub use router::{Route, decide};
pub use stage::{AnswerGenerator, QueryReformulator, RelevanceGrader, Retriever};
pub use state::SessionState;

#[cfg(test)]
pub use event::recording::RecordingSink;
#[cfg(test)]
pub use stage::mock::{
    MockAnswerGenerator, MockQueryReformulator, MockRelevanceGrader, MockRetriever,
};

//! LLM- and index-backed implementations of the agent stage contracts

mod generator;
mod grader;
pub mod prompts;
mod reformulator;
mod retriever;

pub use generator::ContextAnswerGenerator;
pub use grader::LlmRelevanceGrader;
pub use reformulator::LlmQueryReformulator;
pub use retriever::IndexRetriever;

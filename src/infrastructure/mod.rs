//! Concrete collaborator implementations

pub mod agent;
pub mod corpus;
pub mod embedding;
pub mod index;
pub mod llm;
pub mod logging;

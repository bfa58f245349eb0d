//! CLI for the corrective RAG agent

pub mod ask;

use clap::{Parser, Subcommand};

/// Corrective RAG agent - retrieval with relevance grading and bounded
/// query reformulation
#[derive(Parser)]
#[command(name = "crag-agent")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Answer one question over the indexed corpus
    Ask(ask::AskArgs),
}

//! Corrective RAG agent
//!
//! Answers questions over an indexed corpus by looping retrieval,
//! per-document relevance grading and bounded query reformulation before
//! generating a final answer. The traversal engine lives in
//! [`domain::agent`]; index, embedding and LLM backends are injected
//! collaborators.

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use domain::agent::{AgentConfig, TraversalDriver};
use infrastructure::agent::{
    ContextAnswerGenerator, IndexRetriever, LlmQueryReformulator, LlmRelevanceGrader,
};
use infrastructure::corpus::load_corpus;
use infrastructure::embedding::EmbeddingProviderFactory;
use infrastructure::index::InMemoryVectorIndex;
use infrastructure::llm::LlmProviderFactory;

/// Build a ready-to-run agent from configuration
///
/// Creates the LLM and embedding providers, loads and embeds the corpus
/// into a fresh in-memory index, and wires the four stages into a
/// driver. Collaborators are initialized once here and shared
/// immutably; tests substitute fakes by constructing the driver
/// directly.
pub async fn create_agent(config: &AppConfig) -> anyhow::Result<TraversalDriver> {
    let llm_provider = LlmProviderFactory::create(&config.llm.provider)?;
    let embedding_provider = EmbeddingProviderFactory::create(&config.embedding.provider)?;

    info!(
        llm = llm_provider.provider_name(),
        model = %config.llm.model,
        embedding = embedding_provider.provider_name(),
        "Providers initialized"
    );

    let index = Arc::new(InMemoryVectorIndex::new(
        embedding_provider,
        &config.embedding.model,
        config.index.clone(),
    ));

    let documents = load_corpus(&config.corpus).await?;
    let indexed = index.add_documents(documents).await?;
    info!(indexed, "Corpus embedded and indexed");

    Ok(build_driver(
        index,
        llm_provider,
        &config.llm.model,
        config.agent.clone(),
    ))
}

/// Wire the stages into a driver around an existing index and provider
pub fn build_driver(
    index: Arc<InMemoryVectorIndex>,
    llm_provider: Arc<dyn domain::LlmProvider>,
    model: &str,
    agent_config: AgentConfig,
) -> TraversalDriver {
    let retriever = Arc::new(IndexRetriever::new(index));
    let grader = Arc::new(
        LlmRelevanceGrader::new(llm_provider.clone(), model)
            .with_concurrency(agent_config.grading_concurrency),
    );
    let reformulator = Arc::new(LlmQueryReformulator::new(
        llm_provider.clone(),
        model,
        agent_config.max_reformulations,
    ));
    let generator = Arc::new(ContextAnswerGenerator::new(llm_provider, model));

    TraversalDriver::new(retriever, grader, reformulator, generator, agent_config)
}

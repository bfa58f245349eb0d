//! Agent engine configuration

use serde::{Deserialize, Serialize};

/// Configuration for the traversal engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum reformulation attempts before generation is forced
    #[serde(default = "default_max_reformulations")]
    pub max_reformulations: u32,
    /// Concurrent relevance judgments within one grading pass
    ///
    /// The default of 1 serializes all LLM calls; raise it only when the
    /// model backend is provisioned for concurrent requests.
    #[serde(default = "default_grading_concurrency")]
    pub grading_concurrency: usize,
}

fn default_max_reformulations() -> u32 {
    3
}

fn default_grading_concurrency() -> usize {
    1
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_reformulations: default_max_reformulations(),
            grading_concurrency: default_grading_concurrency(),
        }
    }
}

impl AgentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reformulation bound
    pub fn with_max_reformulations(mut self, max: u32) -> Self {
        self.max_reformulations = max;
        self
    }

    /// Set the grading concurrency (clamped to at least 1)
    pub fn with_grading_concurrency(mut self, concurrency: usize) -> Self {
        self.grading_concurrency = concurrency.max(1);
        self
    }
}

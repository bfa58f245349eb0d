//! Traversal driver: the graph executor
//!
//! Runs one question through the stage graph
//! retrieve -> grade -> route -> {reformulate -> retrieve | generate}
//! until generation completes or a fatal stage error aborts the
//! traversal. Termination is guaranteed by the router's retry bound.

use std::sync::Arc;

use tracing::{Instrument, debug, info, warn};
use uuid::Uuid;

use super::error::TraversalError;
use super::event::{EventSink, Stage, StageEvent};
use super::router::{self, Route};
use super::stage::{AnswerGenerator, QueryReformulator, RelevanceGrader, Retriever};
use super::{AgentConfig, SessionState};

/// Explicit machine states; `Done` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverState {
    Retrieve,
    Grade,
    Route,
    Reformulate,
    Generate,
    Done,
}

/// Drives one traversal per call; stateless across questions
///
/// Collaborators are shared immutably, so any number of questions can
/// run concurrently against one driver, each with its own session state.
#[derive(Clone)]
pub struct TraversalDriver {
    retriever: Arc<dyn Retriever>,
    grader: Arc<dyn RelevanceGrader>,
    reformulator: Arc<dyn QueryReformulator>,
    generator: Arc<dyn AnswerGenerator>,
    config: AgentConfig,
}

impl TraversalDriver {
    pub fn new(
        retriever: Arc<dyn Retriever>,
        grader: Arc<dyn RelevanceGrader>,
        reformulator: Arc<dyn QueryReformulator>,
        generator: Arc<dyn AnswerGenerator>,
        config: AgentConfig,
    ) -> Self {
        Self {
            retriever,
            grader,
            reformulator,
            generator,
            config,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Run a question to completion
    ///
    /// Emits a `StageEvent` after every stage transition. On success the
    /// returned state carries the generation and the surviving document
    /// set; on error, generation never ran.
    pub async fn run(
        &self,
        question: impl Into<String>,
        sink: &dyn EventSink,
    ) -> Result<SessionState, TraversalError> {
        let traversal_id = Uuid::new_v4();
        let span = tracing::info_span!("traversal", id = %traversal_id);

        self.run_states(traversal_id, question.into(), sink)
            .instrument(span)
            .await
    }

    async fn run_states(
        &self,
        traversal_id: Uuid,
        question: String,
        sink: &dyn EventSink,
    ) -> Result<SessionState, TraversalError> {
        let mut state = SessionState::new(question);
        let mut current = DriverState::Retrieve;

        info!(question = %state.question, "Starting traversal");

        loop {
            match current {
                DriverState::Retrieve => {
                    state.documents = self
                        .retriever
                        .retrieve(&state.question)
                        .await
                        .map_err(TraversalError::Retrieval)?;

                    debug!(count = state.documents.len(), "Retrieved candidates");
                    sink.emit(StageEvent::new(traversal_id, Stage::Retrieve, state.clone()));
                    current = DriverState::Grade;
                }

                DriverState::Grade => {
                    let candidates = std::mem::take(&mut state.documents);
                    let total = candidates.len();
                    state.documents = self.grader.grade(&state.question, candidates).await;

                    debug!(
                        kept = state.documents.len(),
                        dropped = total - state.documents.len(),
                        "Graded candidates"
                    );
                    sink.emit(StageEvent::new(traversal_id, Stage::Grade, state.clone()));
                    current = DriverState::Route;
                }

                DriverState::Route => {
                    let route = router::decide(
                        &state.documents,
                        state.retry_count,
                        self.config.max_reformulations,
                    );

                    sink.emit(StageEvent::new(traversal_id, Stage::Route, state.clone()));
                    current = match route {
                        Route::Reformulate => DriverState::Reformulate,
                        Route::Generate => {
                            if !state.has_documents() {
                                warn!(
                                    retries = state.retry_count,
                                    "Generating without relevant context"
                                );
                            }
                            DriverState::Generate
                        }
                    };
                }

                DriverState::Reformulate => {
                    let (question, retry_count) = self
                        .reformulator
                        .reformulate(&state.question, state.retry_count)
                        .await
                        .map_err(TraversalError::Reformulation)?;

                    info!(attempt = retry_count, rewritten = %question, "Reformulated question");
                    state.question = question;
                    state.retry_count = retry_count;

                    sink.emit(StageEvent::new(
                        traversal_id,
                        Stage::Reformulate,
                        state.clone(),
                    ));
                    current = DriverState::Retrieve;
                }

                DriverState::Generate => {
                    state.generation = self
                        .generator
                        .generate(&state.question, &state.documents)
                        .await
                        .map_err(TraversalError::Generation)?;

                    sink.emit(StageEvent::new(traversal_id, Stage::Generate, state.clone()));
                    current = DriverState::Done;
                }

                DriverState::Done => {
                    info!(
                        retries = state.retry_count,
                        documents = state.documents.len(),
                        "Traversal complete"
                    );
                    sink.emit(StageEvent::new(traversal_id, Stage::Done, state.clone()));
                    return Ok(state);
                }
            }
        }
    }
}

impl std::fmt::Debug for TraversalDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraversalDriver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

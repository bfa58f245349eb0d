//! Routing decision after each grading pass

use serde::Serialize;

use crate::domain::Document;

/// Outcome of the routing decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Loop back: rewrite the question and retrieve again
    Reformulate,
    /// Proceed to answer generation
    Generate,
}

/// Decide whether to reformulate or generate
///
/// Reformulate only while the surviving document set is empty and the
/// retry budget is not exhausted. This is the sole loop-termination
/// guard: once `retry_count` reaches `max_retries` the traversal
/// proceeds to generation with whatever set it has, even an empty one.
pub fn decide(documents: &[Document], retry_count: u32, max_retries: u32) -> Route {
    if documents.is_empty() && retry_count < max_retries {
        Route::Reformulate
    } else {
        Route::Generate
    }
}

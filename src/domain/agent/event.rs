//! Stage transition events for progress streaming

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::SessionState;

/// Stages of the traversal state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Retrieve,
    Grade,
    Route,
    Reformulate,
    Generate,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Retrieve => "retrieve",
            Self::Grade => "grade",
            Self::Route => "route",
            Self::Reformulate => "reformulate",
            Self::Generate => "generate",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Snapshot emitted after each stage transition
#[derive(Debug, Clone, Serialize)]
pub struct StageEvent {
    /// Traversal this event belongs to
    pub traversal_id: Uuid,
    /// Stage that just completed
    pub stage: Stage,
    /// State as it stands after the stage ran
    pub state: SessionState,
    pub timestamp: DateTime<Utc>,
}

impl StageEvent {
    pub fn new(traversal_id: Uuid, stage: Stage, state: SessionState) -> Self {
        Self {
            traversal_id,
            stage,
            state,
            timestamp: Utc::now(),
        }
    }
}

/// Observation hook for stage transitions
///
/// Implementations must not block: the driver emits inline between
/// stages and the presentation layer consumes on its own schedule.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: StageEvent);
}

/// Sink that discards all events (batch mode)
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: StageEvent) {}
}

/// Sink that forwards events over an unbounded channel
///
/// Sending never blocks; events emitted after the receiver is dropped
/// are discarded.
#[derive(Debug)]
pub struct ChannelSink {
    tx: tokio::sync::mpsc::UnboundedSender<StageEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiver for the presentation layer
    pub fn new() -> (Self, tokio::sync::mpsc::UnboundedReceiver<StageEvent>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: StageEvent) {
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
pub mod recording {
    use super::*;
    use std::sync::Mutex;

    /// Sink that records emitted events for assertions
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        events: Mutex<Vec<StageEvent>>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<StageEvent> {
            self.events.lock().unwrap().clone()
        }

        pub fn stages(&self) -> Vec<Stage> {
            self.events.lock().unwrap().iter().map(|e| e.stage).collect()
        }
    }

    impl EventSink for RecordingSink {
        fn emit(&self, event: StageEvent) {
            self.events.lock().unwrap().push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Retrieve.to_string(), "retrieve");
        assert_eq!(Stage::Done.to_string(), "done");
    }

    #[tokio::test]
    async fn test_channel_sink_delivers_events() {
        let (sink, mut rx) = ChannelSink::new();
        let event = StageEvent::new(Uuid::new_v4(), Stage::Retrieve, SessionState::new("q"));

        sink.emit(event);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.stage, Stage::Retrieve);
        assert_eq!(received.state.question, "q");
    }

    #[test]
    fn test_channel_sink_ignores_dropped_receiver() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);

        // Must not panic or block
        sink.emit(StageEvent::new(
            Uuid::new_v4(),
            Stage::Done,
            SessionState::new("q"),
        ));
    }
}

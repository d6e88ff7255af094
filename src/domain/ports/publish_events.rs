//! Publish Event Port
//!
//! Provides an observable interface for the publish workflow.
//! Enables console progress, JSON event streams, and debugging.

use crate::domain::value_objects::PublishStage;

/// Event emitted during a publish run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishEvent {
    /// Publish started
    Started {
        target: String,
        instance: String,
        versioned_folder: String,
    },

    /// A command is about to run on the target
    CommandStarted { command: String },

    /// Mirror finished
    MirrorCompleted { transferred: usize, deleted: usize },

    /// No alias existed yet; nothing to remove
    AliasMissing { alias: String },

    /// The workflow reached a new stage
    StageCompleted { stage: PublishStage },

    /// Publish finished
    Completed { archive: String },

    /// Publish stopped; `stage` is the last stage reached
    Failed { stage: PublishStage, message: String },
}

/// Trait for receiving publish events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress lines in the terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait PublishEventSink: Send + Sync {
    /// Handle a publish event
    fn on_event(&self, event: PublishEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl PublishEventSink for NoopEventSink {
    fn on_event(&self, _event: PublishEvent) {}
}

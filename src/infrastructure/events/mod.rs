//! Event Sink Implementations
//!
//! Provides concrete implementations of PublishEventSink:
//! - ConsoleEventSink: Human-readable progress
//! - JsonEventSink: NDJSON output for CI/automation

mod console;
mod json;

pub use console::{ConsoleEventSink, Icons};
pub use json::JsonEventSink;

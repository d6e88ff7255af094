//! JSON Event Sink
//!
//! Outputs publish events as NDJSON for CI/automation consumption.

use crate::domain::ports::{PublishEvent, PublishEventSink};
use chrono::{SecondsFormat, Utc};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, mut event: serde_json::Value) {
        if let Some(object) = event.as_object_mut() {
            object.insert(
                "timestamp".to_string(),
                Utc::now()
                    .to_rfc3339_opts(SecondsFormat::Millis, true)
                    .into(),
            );
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl PublishEventSink for JsonEventSink {
    fn on_event(&self, event: PublishEvent) {
        let json = match event {
            PublishEvent::Started {
                target,
                instance,
                versioned_folder,
            } => {
                serde_json::json!({
                    "event": "start",
                    "command": "publish",
                    "target": target,
                    "instance": instance,
                    "versioned_folder": versioned_folder,
                })
            }

            PublishEvent::CommandStarted { command } => {
                serde_json::json!({
                    "event": "command",
                    "command": "publish",
                    "run": command,
                })
            }

            PublishEvent::MirrorCompleted {
                transferred,
                deleted,
            } => {
                serde_json::json!({
                    "event": "mirrored",
                    "command": "publish",
                    "transferred": transferred,
                    "deleted": deleted,
                })
            }

            PublishEvent::AliasMissing { alias } => {
                serde_json::json!({
                    "event": "alias_missing",
                    "command": "publish",
                    "alias": alias,
                })
            }

            PublishEvent::StageCompleted { stage } => {
                serde_json::json!({
                    "event": "stage",
                    "command": "publish",
                    "stage": stage,
                })
            }

            PublishEvent::Completed { archive } => {
                serde_json::json!({
                    "event": "complete",
                    "command": "publish",
                    "status": "success",
                    "archive": archive,
                })
            }

            PublishEvent::Failed { stage, message } => {
                serde_json::json!({
                    "event": "complete",
                    "command": "publish",
                    "status": "failed",
                    "stage": stage,
                    "error": message,
                })
            }
        };

        self.write_event(json);
    }
}

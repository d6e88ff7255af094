//! Publish Result
//!
//! Result types for publish operations.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::ports::MirrorReport;
use crate::domain::value_objects::PublishStage;

/// What happened to the `latest` alias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasOutcome {
    /// No alias existed; a new one was created
    Created,
    /// An existing alias was removed and recreated
    Replaced,
}

/// One step of the workflow, as it would be executed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedStep {
    /// Stage reached once this step (and its siblings) succeed
    pub stage: PublishStage,
    pub description: &'static str,
    pub command: String,
}

impl PlannedStep {
    pub fn new(stage: PublishStage, description: &'static str, command: impl Into<String>) -> Self {
        Self {
            stage,
            description,
            command: command.into(),
        }
    }
}

/// Result of a completed publish run
#[derive(Debug, Clone)]
pub struct PublishReport {
    pub target: String,
    pub instance: String,
    pub versioned_folder: String,
    pub latest_alias: String,
    pub archive_path: String,
    pub mirror: MirrorReport,
    pub alias: AliasOutcome,
    /// Always `Done` for a report; failures surface as errors
    pub stage: PublishStage,
    pub finished_at: DateTime<Utc>,
}

impl PublishReport {
    pub fn is_complete(&self) -> bool {
        self.stage == PublishStage::Done
    }

    pub fn has_changes(&self) -> bool {
        self.mirror.has_changes()
    }
}

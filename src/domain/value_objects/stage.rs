//! Publish stage value object
//!
//! The workflow is linear:
//! `Start -> DirectoryEnsured -> Synced -> AliasRepointed -> Packed -> Archived -> Done`

use serde::Serialize;
use std::fmt;

/// Last stage a publish run completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublishStage {
    #[default]
    Start,
    DirectoryEnsured,
    Synced,
    AliasRepointed,
    Packed,
    Archived,
    Done,
}

impl PublishStage {
    /// Stage that follows this one (`Done` is terminal)
    pub fn next(self) -> Self {
        match self {
            Self::Start => Self::DirectoryEnsured,
            Self::DirectoryEnsured => Self::Synced,
            Self::Synced => Self::AliasRepointed,
            Self::AliasRepointed => Self::Packed,
            Self::Packed => Self::Archived,
            Self::Archived | Self::Done => Self::Done,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::DirectoryEnsured => "directory_ensured",
            Self::Synced => "synced",
            Self::AliasRepointed => "alias_repointed",
            Self::Packed => "packed",
            Self::Archived => "archived",
            Self::Done => "done",
        }
    }

    /// Human-readable description for console output
    pub fn description(&self) -> &'static str {
        match self {
            Self::Start => "started",
            Self::DirectoryEnsured => "versioned folder ready",
            Self::Synced => "slides mirrored",
            Self::AliasRepointed => "latest alias repointed",
            Self::Packed => "snapshot folder copied",
            Self::Archived => "snapshot archived",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for PublishStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

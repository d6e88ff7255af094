//! Error types for deckpub
//!
//! Uses `thiserror` for library errors. The binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::SessionError;
use crate::domain::value_objects::PublishStage;

/// Result type alias for publish operations
pub type PublishResult<T> = Result<T, PublishError>;

/// Main error type for publish operations
#[derive(Error, Debug)]
pub enum PublishError {
    /// Instance label contains characters that cannot appear in a remote path
    #[error("invalid instance label '{label}': {reason}")]
    InvalidInstance { label: String, reason: String },

    /// Remote host or root path is unusable
    #[error("invalid remote target '{value}': {reason}")]
    InvalidTarget { value: String, reason: String },

    /// Exclusion entry that is not a plain file or directory name
    #[error("invalid exclusion '{name}': {reason}")]
    InvalidExclusion { name: String, reason: String },

    /// Local deck directory is missing or has no usable name
    #[error("source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Something other than a symbolic link sits where the alias goes
    #[error("'{path}' exists and is not a symbolic link; refusing to replace it")]
    AliasOccupied { path: String },

    /// A session or transfer failed
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The workflow stopped; `stage` is the last stage that completed
    #[error("publish stopped after stage '{stage}': {cause}")]
    Step {
        stage: PublishStage,
        cause: Box<PublishError>,
    },

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PublishError {
    /// Last completed stage, when the error came out of the workflow
    pub fn stage(&self) -> Option<PublishStage> {
        match self {
            Self::Step { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The underlying error, unwrapping the workflow stage wrapper
    pub fn root_cause(&self) -> &PublishError {
        match self {
            Self::Step { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}

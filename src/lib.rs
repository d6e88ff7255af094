//! deckpub - publish a static slide deck to a web server over SSH
//!
//! The publish workflow creates a versioned folder on the remote host,
//! mirrors the local deck into it, repoints a `latest` symbolic link and
//! leaves a gzip tarball snapshot next to the mirrored content.
//!
//! ## Layers
//!
//! - `domain` - value objects, the publish plan, ports and command builders
//! - `application` - the publish use case (the workflow state machine)
//! - `infrastructure` - ssh/local sessions, rsync/local mirrors, event sinks
//! - `config` - TOML configuration with environment overrides
//! - `presentation` - CLI definition and use case wiring

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{AliasOutcome, PlannedStep, PublishReport, PublishUseCase};
pub use config::{Config, ConfigWarning, Transport};
pub use domain::entities::PublishPlan;
pub use domain::value_objects::{ExclusionSet, InstanceLabel, PublishStage, RemoteTarget};
pub use error::{PublishError, PublishResult};

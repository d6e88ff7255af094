//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//!
//! ## Usage
//!
//! ```ignore
//! use deckpub::presentation::factory;
//!
//! let use_case = factory::create_publish_use_case(&config, &target, env)?;
//! let report = use_case.execute(&plan)?;
//! ```

pub mod cli;
pub mod factory;

pub use cli::{Cli, Commands, PlanArgs};
pub use factory::{create_publish_use_case, DynPublishUseCase};

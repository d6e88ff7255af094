//! Publish Module
//!
//! Orchestrates the publish flow.
//!
//! ## Structure
//!
//! - `result` - Result types (`PublishReport`, `AliasOutcome`, `PlannedStep`)
//! - `use_case` - Core use case logic (`PublishUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use deckpub::application::PublishUseCase;
//!
//! let use_case = PublishUseCase::new(session, mirror);
//! let report = use_case.execute(&plan)?;
//! ```

mod result;
mod use_case;

pub use result::{AliasOutcome, PlannedStep, PublishReport};
pub use use_case::PublishUseCase;

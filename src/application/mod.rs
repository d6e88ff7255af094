//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `PublishUseCase` - Ensure folder, mirror, repoint alias, snapshot

pub mod publish;

pub use publish::{AliasOutcome, PlannedStep, PublishReport, PublishUseCase};

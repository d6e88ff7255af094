//! Domain Layer
//!
//! The publish workflow's pure core - no process spawning, no file system.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (RemoteTarget, InstanceLabel, ExclusionSet, PublishStage)
//! - `entities/` - The derived PublishPlan
//! - `services/` - Remote shell command construction
//! - `ports/` - Interface definitions for infrastructure (sessions, mirrors, events)

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

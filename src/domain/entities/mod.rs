//! Domain Entities
//!
//! - `PublishPlan` - every path a publish run touches, derived from the instance label

mod publish_plan;

pub use publish_plan::{PublishPlan, ALIAS_SUFFIX, DEFAULT_PREFIX, DEFAULT_SOURCE};

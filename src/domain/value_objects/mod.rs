//! Domain Value Objects
//!
//! Immutable value types that represent publish concepts.

mod exclusions;
mod instance_label;
mod remote_target;
mod stage;

pub use exclusions::{ExclusionSet, DEFAULT_EXCLUSIONS};
pub(crate) use instance_label::validate_segment;
pub use instance_label::{InstanceLabel, DEFAULT_INSTANCE};
pub use remote_target::{
    RemoteTarget, DEFAULT_DISABLED_PUBKEY_ALGORITHMS, DEFAULT_HOST, DEFAULT_ROOT,
};
pub use stage::PublishStage;

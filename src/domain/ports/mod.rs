//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod mirror_transport;
pub mod publish_events;
pub mod remote_session;

pub use mirror_transport::{MirrorReport, MirrorRequest, MirrorTransport};
pub use publish_events::{NoopEventSink, PublishEvent, PublishEventSink};
pub use remote_session::{CommandOutput, RemoteCommand, RemoteSession, SessionEnv, SessionError};

//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `session/` - Remote sessions (ssh, local shell)
//! - `sync/` - Mirror transports (rsync, in-process local mirror)
//! - `events/` - Event sinks (console, NDJSON)

pub mod events;
pub mod session;
pub mod sync;

// Re-export for convenience
pub use events::{ConsoleEventSink, JsonEventSink};
pub use session::{LocalSession, SshOptions, SshSession};
pub use sync::{LocalMirror, RsyncMirror};

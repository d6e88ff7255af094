//! Mirror Transport Implementations
//!
//! - `RsyncMirror`: rsync over the session's ssh transport
//! - `LocalMirror`: in-process mirror into a local directory

mod itemize;
mod local;
mod rsync;

pub use itemize::parse_itemized;
pub use local::LocalMirror;
pub use rsync::RsyncMirror;

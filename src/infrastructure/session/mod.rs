//! Remote Session Implementations
//!
//! - `SshSession`: one `ssh` process per command over a shared master connection
//! - `LocalSession`: `sh -c` on this machine, for locally mounted web roots

mod local;
mod ssh;

pub use local::LocalSession;
pub use ssh::{SshOptions, SshSession};

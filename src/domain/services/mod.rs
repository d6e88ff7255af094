//! Domain Services
//!
//! Pure helpers with no I/O. `shell` builds the remote commands the
//! publish workflow issues, so planning and execution share one source.

pub mod shell;

pub use shell::shell_quote;

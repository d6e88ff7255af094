//! Local Session
//!
//! Runs commands through `sh -c` on this machine. Used for web roots that are
//! mounted locally and by the integration tests.

use std::process::{Command, Stdio};

use crate::domain::ports::{CommandOutput, RemoteCommand, RemoteSession, SessionError};

/// Session executing commands with the local shell
#[derive(Debug, Clone, Default)]
pub struct LocalSession;

impl LocalSession {
    pub fn new() -> Self {
        Self
    }
}

impl RemoteSession for LocalSession {
    fn display_name(&self) -> String {
        "localhost".to_string()
    }

    fn run(&self, command: &RemoteCommand) -> Result<CommandOutput, SessionError> {
        tracing::debug!(command = %command, "sh");

        let output = Command::new("sh")
            .arg("-c")
            .arg(command.to_string())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| SessionError::Spawn {
                program: "sh".to_string(),
                source,
            })?;

        Ok(output.into())
    }
}

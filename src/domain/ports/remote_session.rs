//! Remote Session Port
//!
//! Abstracts running shell commands on the web server. The publish use case
//! only sees this trait; `SshSession` and `LocalSession` implement it.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

use crate::domain::services::shell_quote;

/// A shell command line, optionally run from a working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommand {
    script: String,
    cwd: Option<String>,
}

impl RemoteCommand {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            cwd: None,
        }
    }

    /// Run the command from `dir` (`cd 'dir' && ...`)
    pub fn in_dir(mut self, dir: impl Into<String>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn cwd(&self) -> Option<&str> {
        self.cwd.as_deref()
    }
}

impl fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cwd {
            Some(dir) => write!(f, "cd {} && {}", shell_quote(dir), self.script),
            None => f.write_str(&self.script),
        }
    }
}

/// Exit status and captured output of one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Error during remote execution or transfer
#[derive(Debug, Error)]
pub enum SessionError {
    /// The local helper process (`ssh`, `rsync`, `sh`) could not be started
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// SSH could not reach or authenticate with the host
    #[error("connection to {host} failed: {stderr}")]
    Connection { host: String, stderr: String },

    /// The remote command ran and exited non-zero
    #[error("remote command `{command}` exited with {}: {stderr}", exit_label(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The mirror transfer failed
    #[error("{tool} exited with {}: {stderr}", exit_label(.code))]
    Transfer {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Local file system error
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SessionError {
    /// Failure for a command whose exit status was not acceptable
    pub fn command_failed(command: &RemoteCommand, output: &CommandOutput) -> Self {
        Self::CommandFailed {
            command: command.to_string(),
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}

/// Environment handed to every spawned ssh/rsync process.
///
/// The agent socket is an explicit value instead of whatever the child would
/// inherit, so a session behaves the same regardless of the caller's env.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionEnv {
    pub agent_socket: Option<PathBuf>,
}

impl SessionEnv {
    /// Environment forwarding the given agent socket; empty paths count as absent
    pub fn with_agent_socket(agent_socket: Option<PathBuf>) -> Self {
        Self {
            agent_socket: agent_socket.filter(|p| !p.as_os_str().is_empty()),
        }
    }

    /// Set or clear `SSH_AUTH_SOCK` on a child process
    pub fn apply(&self, cmd: &mut Command) {
        match &self.agent_socket {
            Some(socket) => {
                cmd.env("SSH_AUTH_SOCK", socket);
            }
            None => {
                cmd.env_remove("SSH_AUTH_SOCK");
            }
        }
    }
}

/// Trait for executing commands on the publish target
pub trait RemoteSession {
    /// Human-readable target name
    fn display_name(&self) -> String;

    /// Run a command and report its exit status without judging it.
    ///
    /// Only failures to execute at all (spawn, connection) are errors.
    fn run(&self, command: &RemoteCommand) -> Result<CommandOutput, SessionError>;

    /// Run a command; any non-zero exit is an error carrying the remote stderr
    fn run_checked(&self, command: &RemoteCommand) -> Result<CommandOutput, SessionError> {
        let output = self.run(command)?;
        if output.success() {
            Ok(output)
        } else {
            Err(SessionError::command_failed(command, &output))
        }
    }
}

impl<T: RemoteSession + ?Sized> RemoteSession for Box<T> {
    fn display_name(&self) -> String {
        (**self).display_name()
    }

    fn run(&self, command: &RemoteCommand) -> Result<CommandOutput, SessionError> {
        (**self).run(command)
    }
}

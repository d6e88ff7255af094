//! SSH Session
//!
//! Runs each remote command as its own `ssh` process. With multiplexing on,
//! the first command opens a master connection on a private control socket
//! and every later `ssh` (including rsync's transport) rides on it, so a
//! publish run authenticates exactly once.

use std::cell::Cell;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tempfile::TempDir;

use crate::domain::ports::{CommandOutput, RemoteCommand, RemoteSession, SessionEnv, SessionError};
use crate::domain::services::shell::shell_word;
use crate::domain::value_objects::RemoteTarget;

/// Seconds the master connection outlives its last client
const CONTROL_PERSIST_SECS: u64 = 60;

/// `ssh` exits with 255 when it could not connect or authenticate
const SSH_CONNECTION_FAILURE: i32 = 255;

/// Client options for one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshOptions {
    /// Removed from the client's public-key signature algorithm offer
    pub disabled_pubkey_algorithms: Vec<String>,
    pub connect_timeout: Option<u64>,
    /// Share one connection across every command of the session
    pub multiplex: bool,
}

impl SshOptions {
    pub fn for_target(target: &RemoteTarget) -> Self {
        Self {
            disabled_pubkey_algorithms: target.disabled_pubkey_algorithms().to_vec(),
            connect_timeout: None,
            multiplex: true,
        }
    }

    pub fn with_connect_timeout(mut self, secs: Option<u64>) -> Self {
        self.connect_timeout = secs;
        self
    }

    pub fn with_multiplex(mut self, multiplex: bool) -> Self {
        self.multiplex = multiplex;
        self
    }
}

impl Default for SshOptions {
    fn default() -> Self {
        Self::for_target(&RemoteTarget::default())
    }
}

/// Remote session over the system `ssh` client
pub struct SshSession {
    host: String,
    options: SshOptions,
    env: SessionEnv,
    /// Holds the control socket; removed when the session drops
    control_dir: Option<TempDir>,
    /// Set once a command ran, i.e. a master may be listening
    used: Cell<bool>,
}

impl SshSession {
    pub fn new(
        target: &RemoteTarget,
        options: SshOptions,
        env: SessionEnv,
    ) -> Result<Self, SessionError> {
        let control_dir = if options.multiplex {
            let dir = tempfile::Builder::new()
                .prefix("deckpub-ssh-")
                .tempdir()
                .map_err(|source| SessionError::Io {
                    path: std::env::temp_dir(),
                    source,
                })?;
            Some(dir)
        } else {
            None
        };

        Ok(Self {
            host: target.host().to_string(),
            options,
            env,
            control_dir,
            used: Cell::new(false),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn env(&self) -> &SessionEnv {
        &self.env
    }

    pub fn options(&self) -> &SshOptions {
        &self.options
    }

    /// Control socket of the shared master, when multiplexing
    pub fn control_path(&self) -> Option<PathBuf> {
        self.control_dir.as_ref().map(|dir| dir.path().join("master"))
    }

    /// Options passed to every `ssh` invocation (the host is not included)
    pub fn ssh_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if !self.options.disabled_pubkey_algorithms.is_empty() {
            args.push("-o".to_string());
            args.push(format!(
                "PubkeyAcceptedAlgorithms=-{}",
                self.options.disabled_pubkey_algorithms.join(",")
            ));
        }

        if let Some(secs) = self.options.connect_timeout {
            args.push("-o".to_string());
            args.push(format!("ConnectTimeout={}", secs));
        }

        if let Some(path) = self.control_path() {
            args.push("-o".to_string());
            args.push("ControlMaster=auto".to_string());
            args.push("-o".to_string());
            args.push(format!("ControlPath={}", path.display()));
            args.push("-o".to_string());
            args.push(format!("ControlPersist={}", CONTROL_PERSIST_SECS));
        }

        args
    }

    /// The `ssh` command line handed to rsync as its remote shell (`-e`)
    pub fn rsh_command(&self) -> String {
        std::iter::once("ssh".to_string())
            .chain(self.ssh_args().iter().map(|arg| shell_word(arg)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn ssh(&self) -> Command {
        let mut cmd = Command::new("ssh");
        cmd.args(self.ssh_args());
        self.env.apply(&mut cmd);
        cmd
    }
}

impl RemoteSession for SshSession {
    fn display_name(&self) -> String {
        self.host.clone()
    }

    fn run(&self, command: &RemoteCommand) -> Result<CommandOutput, SessionError> {
        tracing::debug!(host = %self.host, command = %command, "ssh");

        let output = self
            .ssh()
            .arg(&self.host)
            .arg(command.to_string())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| SessionError::Spawn {
                program: "ssh".to_string(),
                source,
            })?;
        self.used.set(true);

        let output = CommandOutput::from(output);
        if output.code == Some(SSH_CONNECTION_FAILURE) {
            return Err(SessionError::Connection {
                host: self.host.clone(),
                stderr: output.stderr.trim().to_string(),
            });
        }

        tracing::trace!(code = ?output.code, stderr = %output.stderr.trim(), "ssh finished");
        Ok(output)
    }
}

impl Drop for SshSession {
    fn drop(&mut self) {
        if !self.used.get() {
            return;
        }
        let Some(path) = self.control_path() else {
            return;
        };

        let mut cmd = Command::new("ssh");
        cmd.arg("-o")
            .arg(format!("ControlPath={}", path.display()))
            .arg("-O")
            .arg("exit")
            .arg(&self.host)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        self.env.apply(&mut cmd);

        if let Err(err) = cmd.status() {
            tracing::debug!(error = %err, "could not close ssh master");
        }
    }
}

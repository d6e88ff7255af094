//! Rsync Mirror
//!
//! Mirrors the deck with `rsync -pthrvz` over the session's ssh command line,
//! so the transfer reuses the multiplexed connection and the same
//! authentication options.

use std::process::{Command, Stdio};

use crate::domain::ports::{MirrorReport, MirrorRequest, MirrorTransport, SessionEnv, SessionError};
use crate::domain::services::shell::shell_word;
use crate::infrastructure::session::SshSession;

use super::itemize::parse_itemized;

/// Mirror transport using rsync
pub struct RsyncMirror {
    /// SSH identity the remote path is qualified with
    host: String,
    /// Remote shell passed as `-e`; rsync's default when `None`
    rsh: Option<String>,
    env: SessionEnv,
}

impl RsyncMirror {
    pub fn new(host: impl Into<String>, rsh: Option<String>, env: SessionEnv) -> Self {
        Self {
            host: host.into(),
            rsh,
            env,
        }
    }

    /// Rsync riding on the session's ssh options and environment
    pub fn for_session(session: &SshSession) -> Self {
        Self::new(
            session.host(),
            Some(session.rsh_command()),
            session.env().clone(),
        )
    }

    /// Arguments of the rsync invocation for `request`
    pub fn args(&self, request: &MirrorRequest) -> Vec<String> {
        let mut args = vec!["-pthrvz".to_string(), "--itemize-changes".to_string()];

        if request.delete_extraneous {
            args.push("--delete".to_string());
        }

        for name in request.exclusions.iter() {
            args.push("--exclude".to_string());
            args.push(name.to_string());
        }

        if let Some(rsh) = &self.rsh {
            args.push("-e".to_string());
            args.push(rsh.clone());
        }

        // No trailing slash: the deck directory itself lands in the remote folder
        let source = request.local_source.to_string_lossy();
        let trimmed = source.trim_end_matches('/');
        args.push(if trimmed.is_empty() {
            source.to_string()
        } else {
            trimmed.to_string()
        });
        args.push(format!("{}:{}", self.host, request.remote_dir));

        args
    }
}

impl MirrorTransport for RsyncMirror {
    fn name(&self) -> &'static str {
        "rsync"
    }

    fn describe(&self, request: &MirrorRequest) -> String {
        std::iter::once("rsync".to_string())
            .chain(self.args(request).iter().map(|arg| shell_word(arg)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn mirror(&self, request: &MirrorRequest) -> Result<MirrorReport, SessionError> {
        let mut cmd = Command::new("rsync");
        cmd.args(self.args(request)).stdin(Stdio::null());
        self.env.apply(&mut cmd);

        let output = cmd.output().map_err(|source| SessionError::Spawn {
            program: "rsync".to_string(),
            source,
        })?;

        if !output.status.success() {
            return Err(SessionError::Transfer {
                tool: "rsync".to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let report = parse_itemized(&String::from_utf8_lossy(&output.stdout));
        tracing::debug!(
            transferred = report.transferred.len(),
            deleted = report.deleted.len(),
            "rsync finished"
        );
        Ok(report)
    }
}

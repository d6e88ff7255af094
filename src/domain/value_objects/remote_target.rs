//! Remote target value object
//!
//! The web server a deck is published to: an SSH identity, the public-key
//! signature algorithms the client must not offer, and the base path that
//! holds every published deck.

use std::fmt;

use crate::error::{PublishError, PublishResult};

/// Default SSH identity
pub const DEFAULT_HOST: &str = "ec2-user@michel.albert.lu";

/// Default base path on the web server
pub const DEFAULT_ROOT: &str = "/var/www/html/shelf";

/// Signature algorithms the default host cannot negotiate
pub const DEFAULT_DISABLED_PUBKEY_ALGORITHMS: &[&str] = &["rsa-sha2-256", "rsa-sha2-512"];

/// Where and how to reach the web server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    /// SSH identity (`host` or `user@host`)
    host: String,
    /// Base path, absolute, without trailing slash (except `/` itself)
    root: String,
    /// Public-key signature algorithms removed from the client's offer
    disabled_pubkey_algorithms: Vec<String>,
}

impl RemoteTarget {
    pub fn new(
        host: impl Into<String>,
        root: impl Into<String>,
        disabled_pubkey_algorithms: Vec<String>,
    ) -> PublishResult<Self> {
        let host = host.into();
        let root = root.into();

        if host.trim().is_empty() {
            return Err(invalid(&host, "host must not be empty"));
        }
        if host.chars().any(char::is_whitespace) {
            return Err(invalid(&host, "host must not contain whitespace"));
        }
        if host.starts_with('-') {
            return Err(invalid(&host, "host must not start with '-'"));
        }
        if !root.starts_with('/') {
            return Err(invalid(&root, "root must be an absolute path"));
        }

        let trimmed = root.trim_end_matches('/');
        let root = if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        };

        let disabled_pubkey_algorithms = disabled_pubkey_algorithms
            .into_iter()
            .map(|alg| alg.trim().to_string())
            .filter(|alg| !alg.is_empty())
            .collect();

        Ok(Self {
            host,
            root,
            disabled_pubkey_algorithms,
        })
    }

    /// Full SSH identity as passed to `ssh`
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Login user, when the identity names one
    pub fn user(&self) -> Option<&str> {
        self.host.split_once('@').map(|(user, _)| user)
    }

    /// Host name without the user part
    pub fn hostname(&self) -> &str {
        self.host
            .rsplit_once('@')
            .map(|(_, host)| host)
            .unwrap_or(&self.host)
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn disabled_pubkey_algorithms(&self) -> &[String] {
        &self.disabled_pubkey_algorithms
    }
}

impl Default for RemoteTarget {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            root: DEFAULT_ROOT.to_string(),
            disabled_pubkey_algorithms: DEFAULT_DISABLED_PUBKEY_ALGORITHMS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.root)
    }
}

fn invalid(value: &str, reason: &str) -> PublishError {
    PublishError::InvalidTarget {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

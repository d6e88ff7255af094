//! Configuration type definitions

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::{PublishPlan, DEFAULT_PREFIX, DEFAULT_SOURCE};
use crate::domain::value_objects::{
    ExclusionSet, InstanceLabel, RemoteTarget, DEFAULT_DISABLED_PUBKEY_ALGORITHMS,
    DEFAULT_EXCLUSIONS, DEFAULT_HOST, DEFAULT_INSTANCE, DEFAULT_ROOT,
};
use crate::error::PublishResult;

use super::loader::{self, LoadedConfig};

/// How the target is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// `ssh` for commands, `rsync` for the mirror
    #[default]
    Ssh,
    /// The root is a local (or locally mounted) directory
    Local,
}

impl Transport {
    pub const VALID_VALUES: &'static [&'static str] = &["ssh", "local"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "ssh" => Some(Self::Ssh),
            "local" => Some(Self::Local),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ssh => "ssh",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `[target]`: the web server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_root")]
    pub root: String,

    #[serde(default = "default_disabled_pubkey_algorithms")]
    pub disabled_pubkey_algorithms: Vec<String>,

    #[serde(default)]
    pub transport: Transport,

    /// Share one ssh connection across the whole run
    #[serde(default = "default_true")]
    pub multiplex: bool,

    /// Seconds; ssh's own default when unset
    #[serde(default)]
    pub connect_timeout: Option<u64>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            root: default_root(),
            disabled_pubkey_algorithms: default_disabled_pubkey_algorithms(),
            transport: Transport::default(),
            multiplex: true,
            connect_timeout: None,
        }
    }
}

/// `[publish]`: what gets published and under which names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishConfig {
    #[serde(default = "default_instance")]
    pub instance: String,

    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Local deck directory; relative paths resolve against the working directory
    #[serde(default = "default_source")]
    pub source: PathBuf,

    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            instance: default_instance(),
            prefix: default_prefix(),
            source: default_source(),
            exclude: default_exclude(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_root() -> String {
    DEFAULT_ROOT.to_string()
}

fn default_disabled_pubkey_algorithms() -> Vec<String> {
    DEFAULT_DISABLED_PUBKEY_ALGORITHMS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_instance() -> String {
    DEFAULT_INSTANCE.to_string()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_source() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE)
}

fn default_exclude() -> Vec<String> {
    DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect()
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub publish: PublishConfig,
}

impl Config {
    /// Find and load the configuration file for a run.
    ///
    /// `explicit` (from `--config`) must exist; otherwise `./deckpub.toml`,
    /// then the user config file, then built-in defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> PublishResult<LoadedConfig> {
        loader::discover(explicit, cwd, loader::user_config_path())
    }

    /// Apply environment variable overrides (DECKPUB_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn instance(&self) -> PublishResult<InstanceLabel> {
        InstanceLabel::new(self.publish.instance.clone())
    }

    pub fn exclusions(&self) -> PublishResult<ExclusionSet> {
        ExclusionSet::new(&self.publish.exclude)
    }

    pub fn remote_target(&self) -> PublishResult<RemoteTarget> {
        RemoteTarget::new(
            self.target.host.clone(),
            self.target.root.clone(),
            self.target.disabled_pubkey_algorithms.clone(),
        )
    }

    /// Derive the publish plan; a relative source resolves against `base_dir`
    pub fn publish_plan(&self, base_dir: &Path) -> PublishResult<PublishPlan> {
        let target = self.remote_target()?;
        let source = if self.publish.source.is_absolute() {
            self.publish.source.clone()
        } else {
            base_dir.join(&self.publish.source)
        };

        let exclusions = self.exclusions()?;
        PublishPlan::new(self.instance()?, target.root(), source)?
            .with_prefix(self.publish.prefix.clone())
            .map(|plan| plan.with_exclusions(exclusions))
    }
}

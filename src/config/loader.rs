//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PublishError, PublishResult};

use super::env_validator::{levenshtein, EnvVarValidator};
use super::types::{Config, Transport};

/// Project config file, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "deckpub.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The unknown key
    pub key: String,
    pub file: PathBuf,
    /// 1-indexed line, when the key could be located
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// A configuration together with where it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    /// `None` when built-in defaults were used
    pub path: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PublishResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| PublishError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve the config file: explicit path, project file, user file, defaults
pub fn discover(
    explicit: Option<&Path>,
    cwd: &Path,
    user_config: Option<PathBuf>,
) -> PublishResult<LoadedConfig> {
    let candidate = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(PublishError::Config {
                    file: path.to_path_buf(),
                    message: "file not found".to_string(),
                });
            }
            Some(path.to_path_buf())
        }
        None => std::iter::once(cwd.join(CONFIG_FILE_NAME))
            .chain(user_config)
            .find(|path| path.is_file()),
    };

    match candidate {
        Some(path) => {
            let (config, warnings) = load_with_warnings(&path)?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(LoadedConfig {
                config,
                path: Some(path),
                warnings,
            })
        }
        None => {
            tracing::debug!("no config file found, using defaults");
            Ok(LoadedConfig::default())
        }
    }
}

/// Apply environment variable overrides (DECKPUB_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply overrides read through `lookup`
pub(crate) fn with_env_overrides_from(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Config {
    // DECKPUB_INSTANCE
    if let Some(instance) = lookup("DECKPUB_INSTANCE").filter(|v| !v.is_empty()) {
        config.publish.instance = instance;
    }

    // DECKPUB_HOST
    if let Some(host) = lookup("DECKPUB_HOST").filter(|v| !v.is_empty()) {
        config.target.host = host;
    }

    // DECKPUB_ROOT
    if let Some(root) = lookup("DECKPUB_ROOT").filter(|v| !v.is_empty()) {
        config.target.root = root;
    }

    // DECKPUB_TRANSPORT
    if let Some(transport) = lookup("DECKPUB_TRANSPORT") {
        let current = config.target.transport;
        config.target.transport = EnvVarValidator::new("DECKPUB_TRANSPORT", Transport::VALID_VALUES)
            .parse(&transport, Transport::parse, current);
    }

    config
}

/// `$XDG_CONFIG_HOME/deckpub/config.toml`, else the platform config dir
pub fn user_config_path() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("deckpub").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "target",
        "host",
        "root",
        "disabled_pubkey_algorithms",
        "transport",
        "multiplex",
        "connect_timeout",
        "publish",
        "instance",
        "prefix",
        "source",
        "exclude",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

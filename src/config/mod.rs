//! Configuration module for deckpub
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (DECKPUB_*)
//! 3. Config file (`--config`, `./deckpub.toml`, or `~/.config/deckpub/config.toml`)
//! 4. Built-in defaults (lowest priority)

mod env_validator;
mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use env_validator::{levenshtein, EnvVarValidator};
pub use loader::{user_config_path, ConfigWarning, LoadedConfig, CONFIG_FILE_NAME};
pub use types::{Config, PublishConfig, TargetConfig, Transport};

//! Command handlers for the deckpub binary

pub mod plan;
pub mod publish;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use deckpub::config::{Config, ConfigWarning};
use deckpub::presentation::PlanArgs;
use deckpub::{PublishPlan, RemoteTarget};

/// Everything a command needs once configuration is resolved
pub struct CommandContext {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub target: RemoteTarget,
    pub plan: PublishPlan,
}

/// Resolve config file, environment and CLI flags into a plan
pub fn load_context(args: &PlanArgs, config_path: Option<&Path>, json: bool) -> Result<CommandContext> {
    let cwd = std::env::current_dir().context("cannot determine the working directory")?;

    let loaded = Config::discover(config_path, &cwd)?;
    print_warnings(&loaded.warnings, json);

    let mut config = loaded.config.with_env_overrides();
    if let Some(instance) = &args.instance {
        config.publish.instance = instance.clone();
    }
    if let Some(source) = &args.source {
        config.publish.source = source.clone();
    }

    let target = config.remote_target()?;
    let plan = config.publish_plan(&cwd)?;

    Ok(CommandContext {
        config,
        config_path: loaded.path,
        target,
        plan,
    })
}

/// Write one NDJSON line to stdout
pub fn emit_json(value: &serde_json::Value) {
    println!("{}", value);
}

pub fn print_warnings(warnings: &[ConfigWarning], json: bool) {
    for warning in warnings {
        if json {
            emit_json(&serde_json::json!({
                "event": "warning",
                "kind": "unknown_config_key",
                "key": warning.key,
                "file": warning.file.display().to_string(),
                "line": warning.line,
                "suggestion": warning.suggestion,
            }));
            continue;
        }

        let location = match warning.line {
            Some(line) => format!("{}:{}", warning.file.display(), line),
            None => warning.file.display().to_string(),
        };
        let hint = warning
            .suggestion
            .as_ref()
            .map(|s| format!(" Did you mean '{}'?", s))
            .unwrap_or_default();
        eprintln!("Warning: unknown config key '{}' in {}.{}", warning.key, location, hint);
    }
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        emit_json(&serde_json::json!({
            "event": "error",
            "message": format!("{:#}", err),
        }));
        return;
    }

    eprintln!("Error: {:#}", err);
}

/// Whether the terminal can be expected to render non-ASCII icons
pub fn supports_unicode() -> bool {
    supports_unicode_with(|key| std::env::var(key).ok())
}

fn supports_unicode_with(get_env: impl Fn(&str) -> Option<String>) -> bool {
    let term = get_env("TERM").unwrap_or_default();
    if term.eq_ignore_ascii_case("dumb") {
        return false;
    }

    for key in ["LC_ALL", "LC_CTYPE", "LANG"] {
        if let Some(value) = get_env(key).filter(|v| !v.is_empty()) {
            let value = value.to_lowercase();
            return value.contains("utf-8") || value.contains("utf8");
        }
    }

    !cfg!(windows)
}

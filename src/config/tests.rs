//! Tests for the config module

use super::loader::{discover, load_with_warnings, with_env_overrides_from};
use super::types::*;
use crate::error::PublishError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.target.host, "ec2-user@michel.albert.lu");
    assert_eq!(config.target.root, "/var/www/html/shelf");
    assert_eq!(
        config.target.disabled_pubkey_algorithms,
        vec!["rsa-sha2-256", "rsa-sha2-512"]
    );
    assert_eq!(config.target.transport, Transport::Ssh);
    assert!(config.target.multiplex);
    assert_eq!(config.publish.instance, "2023");
    assert_eq!(config.publish.prefix, "python-advanced");
    assert_eq!(config.publish.exclude.len(), 12);
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[target]
host = "deploy@example.org"
root = "/srv/decks"
transport = "local"
connect_timeout = 15

[publish]
instance = "2024"
exclude = ["node_modules", "drafts"]
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.target.host, "deploy@example.org");
    assert_eq!(config.target.transport, Transport::Local);
    assert_eq!(config.target.connect_timeout, Some(15));
    assert_eq!(config.publish.instance, "2024");
    assert_eq!(config.publish.exclude, vec!["node_modules", "drafts"]);
    // Untouched fields keep their defaults
    assert_eq!(config.publish.prefix, "python-advanced");
    assert_eq!(config.target.disabled_pubkey_algorithms.len(), 2);
}

#[test]
fn test_unknown_keys_become_warnings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deckpub.toml");
    fs::write(&path, "[target]\nhots = \"x@y\"\n\n[publish]\ninstance = \"2023\"\n").unwrap();

    let (config, warnings) = load_with_warnings(&path).unwrap();

    assert_eq!(config.target.host, "ec2-user@michel.albert.lu");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "hots");
    assert_eq!(warnings[0].line, Some(2));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("host"));
}

#[test]
fn test_invalid_toml_is_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deckpub.toml");
    fs::write(&path, "[target\nhost = 1").unwrap();

    let err = load_with_warnings(&path).unwrap_err();
    assert!(matches!(err, PublishError::Config { .. }));
}

#[test]
fn test_env_overrides() {
    let config = with_env_overrides_from(
        Config::default(),
        env(&[
            ("DECKPUB_INSTANCE", "2025"),
            ("DECKPUB_HOST", "me@box"),
            ("DECKPUB_ROOT", "/tmp/shelf"),
            ("DECKPUB_TRANSPORT", "local"),
        ]),
    );

    assert_eq!(config.publish.instance, "2025");
    assert_eq!(config.target.host, "me@box");
    assert_eq!(config.target.root, "/tmp/shelf");
    assert_eq!(config.target.transport, Transport::Local);
}

#[test]
fn test_invalid_transport_env_keeps_file_value() {
    let mut config = Config::default();
    config.target.transport = Transport::Local;

    let config = with_env_overrides_from(config, env(&[("DECKPUB_TRANSPORT", "ftp")]));
    assert_eq!(config.target.transport, Transport::Local);
}

#[test]
fn test_empty_env_values_are_ignored() {
    let config = with_env_overrides_from(Config::default(), env(&[("DECKPUB_INSTANCE", "")]));
    assert_eq!(config.publish.instance, "2023");
}

#[test]
fn test_discover_prefers_project_file() {
    let dir = tempdir().unwrap();
    let user = dir.path().join("user.toml");
    fs::write(&user, "[publish]\ninstance = \"user\"\n").unwrap();
    fs::write(
        dir.path().join("deckpub.toml"),
        "[publish]\ninstance = \"project\"\n",
    )
    .unwrap();

    let loaded = discover(None, dir.path(), Some(user)).unwrap();

    assert_eq!(loaded.config.publish.instance, "project");
    assert_eq!(loaded.path, Some(dir.path().join("deckpub.toml")));
}

#[test]
fn test_discover_falls_back_to_user_file_then_defaults() {
    let dir = tempdir().unwrap();
    let user = dir.path().join("user.toml");
    fs::write(&user, "[publish]\ninstance = \"user\"\n").unwrap();

    let loaded = discover(None, dir.path(), Some(user)).unwrap();
    assert_eq!(loaded.config.publish.instance, "user");

    let loaded = discover(None, dir.path(), Some(dir.path().join("missing.toml"))).unwrap();
    assert_eq!(loaded.config, Config::default());
    assert!(loaded.path.is_none());
}

#[test]
fn test_discover_explicit_file_must_exist() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let err = discover(Some(missing.as_path()), dir.path(), None).unwrap_err();
    assert!(err.to_string().contains("file not found"));
}

#[test]
fn test_publish_plan_from_config() {
    let mut config = Config::default();
    config.publish.instance = "2024".to_string();

    let plan = config.publish_plan(Path::new("/home/me/course")).unwrap();

    assert_eq!(plan.local_source(), Path::new("/home/me/course/slides"));
    assert_eq!(
        plan.versioned_folder(),
        "/var/www/html/shelf/python-advanced-2024"
    );
    assert!(plan.exclusions().is_excluded("node_modules"));
}

#[test]
fn test_publish_plan_rejects_bad_instance() {
    let mut config = Config::default();
    config.publish.instance = "2023; rm -rf /".to_string();

    let err = config.publish_plan(Path::new("/tmp")).unwrap_err();
    assert!(matches!(err, PublishError::InvalidInstance { .. }));
}

#[test]
fn test_remote_target_requires_absolute_root() {
    let mut config = Config::default();
    config.target.root = "relative/path".to_string();

    assert!(matches!(
        config.remote_target(),
        Err(PublishError::InvalidTarget { .. })
    ));
}

#[test]
fn test_publish_plan_rejects_glob_exclusion() {
    let mut config = Config::default();
    config.publish.exclude = vec!["node_modules".to_string(), "*.map".to_string()];

    let err = config.publish_plan(Path::new("/tmp")).unwrap_err();
    assert!(matches!(err, PublishError::InvalidExclusion { ref name, .. } if name == "*.map"));
}

#[test]
fn test_configured_exclusions_replace_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deckpub.toml");
    fs::write(&path, "[publish]\nexclude = [\" drafts \", \"\"]\n").unwrap();

    let (config, warnings) = load_with_warnings(&path).unwrap();
    assert!(warnings.is_empty());
    let exclusions = config.exclusions().unwrap();
    assert_eq!(exclusions.iter().collect::<Vec<_>>(), vec!["drafts"]);
}

//! Common test utilities for deckpub CLI tests.
//!
//! `TestEnv` is an isolated environment: a project directory holding the
//! deck, a fake home (config dir, fake binaries on PATH), and helpers to run
//! the `deckpub` binary inside it.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Variables a developer's shell may carry that would leak into the tests
const SCRUBBED_ENV: &[&str] = &[
    "SSH_AUTH_SOCK",
    "DECKPUB_INSTANCE",
    "DECKPUB_HOST",
    "DECKPUB_ROOT",
    "DECKPUB_TRANSPORT",
    "DECKPUB_LOG",
];

/// Result of running a deckpub CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// stdout parsed as NDJSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l).unwrap_or_else(|e| panic!("not JSON ({e}): {l}"))
            })
            .collect()
    }
}

pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    bin_dir: PathBuf,
}

impl TestEnv {
    /// Environment with a `slides/` deck holding `index.html`, `css/` and `node_modules/`
    pub fn with_deck() -> Self {
        let env = Self::empty();
        env.write_project_file("slides/index.html", "<h1>Python advanced</h1>");
        env.write_project_file("slides/css/theme.css", "body {}");
        env.write_project_file("slides/node_modules/reveal/index.js", "module.exports = {}");
        env.write_project_file("slides/README.md", "# notes");
        env
    }

    pub fn empty() -> Self {
        let project_root = tempfile::tempdir().expect("project dir");
        let home_dir = tempfile::tempdir().expect("home dir");
        let bin_dir = home_dir.path().join("bin");
        fs::create_dir_all(&bin_dir).expect("bin dir");
        Self {
            project_root,
            home_dir,
            bin_dir,
        }
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Directory holding the fake binaries
    pub fn bin_path(&self) -> &Path {
        &self.bin_dir
    }

    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home_dir.path().join(relative)
    }

    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directories");
        }
        fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Project config publishing into a local directory under the fake home
    pub fn use_local_transport(&self) -> PathBuf {
        let root = self.home_path("www");
        fs::create_dir_all(&root).expect("web root");
        self.write_project_file(
            "deckpub.toml",
            &format!("[target]\ntransport = \"local\"\nroot = \"{}\"\n", root.display()),
        );
        root
    }

    /// Put an executable shell script named `name` first on PATH
    #[cfg(unix)]
    pub fn install_fake(&self, name: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin_dir.join(name);
        fs::write(&path, script).expect("fake binary");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let original_path = std::env::var("PATH").unwrap_or_default();

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_deckpub"));
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_path(".config"))
            .env("PATH", format!("{}:{}", self.bin_dir.display(), original_path))
            .env("LANG", "C");
        for key in SCRUBBED_ENV {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute deckpub");
        output_to_result(output)
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Names of the entries directly inside `dir`, sorted
pub fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("read_dir {}: {e}", dir.display()))
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

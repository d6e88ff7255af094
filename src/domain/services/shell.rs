//! Remote shell command construction
//!
//! Every command the publish workflow sends to the web server is built here.
//! Paths are single-quoted so that spaces and metacharacters stay inert.

use crate::domain::ports::RemoteCommand;

/// Single-quote `s` for a POSIX shell
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Quote only when the word would otherwise be split or expanded
pub fn shell_word(s: &str) -> String {
    let plain = !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ',' | ':' | '=' | '@' | '%' | '+')
        });
    if plain {
        s.to_string()
    } else {
        shell_quote(s)
    }
}

/// Create a directory and its parents; succeeds when it already exists
pub fn mkdir_p(path: &str) -> RemoteCommand {
    RemoteCommand::new(format!("mkdir -p {}", shell_quote(path)))
}

/// Exit 0 when `path` is a symbolic link, 1 otherwise
pub fn is_symlink(path: &str) -> RemoteCommand {
    RemoteCommand::new(format!("test -h {}", shell_quote(path)))
}

/// Exit 0 when anything exists at `path`, 1 otherwise
pub fn exists(path: &str) -> RemoteCommand {
    RemoteCommand::new(format!("test -e {}", shell_quote(path)))
}

/// Remove a symbolic link (never recursive)
pub fn remove_link(path: &str) -> RemoteCommand {
    RemoteCommand::new(format!("rm {}", shell_quote(path)))
}

/// Create `alias` as a symbolic link to `target`
pub fn link(target: &str, alias: &str) -> RemoteCommand {
    RemoteCommand::new(format!(
        "ln -s {} {}",
        shell_quote(target),
        shell_quote(alias)
    ))
}

/// Recursively copy `from` to `to`
pub fn copy_tree(from: &str, to: &str) -> RemoteCommand {
    RemoteCommand::new(format!("cp -r {} {}", shell_quote(from), shell_quote(to)))
}

/// Write a gzip tarball of `dir` to `archive`, overwriting it
pub fn tar_gz(archive: &str, dir: &str) -> RemoteCommand {
    RemoteCommand::new(format!(
        "tar czf {} {}",
        shell_quote(archive),
        shell_quote(dir)
    ))
}

/// Recursively remove `path`; succeeds when it does not exist
pub fn remove_tree(path: &str) -> RemoteCommand {
    RemoteCommand::new(format!("rm -rf {}", shell_quote(path)))
}

//! Local Mirror
//!
//! Mirrors the deck into a directory on this machine without rsync. Follows
//! rsync's rules for `-r --delete --exclude NAME`: the source directory lands
//! inside the destination folder, excluded names are neither copied nor
//! deleted at any depth, symbolic links in the source are skipped, and files
//! are rewritten only when their content differs.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use sha2::{Digest, Sha256};

use crate::domain::ports::{MirrorReport, MirrorRequest, MirrorTransport, SessionError};
use crate::domain::value_objects::ExclusionSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
    Other,
}

/// Mirror transport for locally reachable folders
#[derive(Debug, Clone, Default)]
pub struct LocalMirror;

impl LocalMirror {
    pub fn new() -> Self {
        Self
    }
}

impl MirrorTransport for LocalMirror {
    fn name(&self) -> &'static str {
        "local"
    }

    fn describe(&self, request: &MirrorRequest) -> String {
        let mut described = format!(
            "mirror {} into {}",
            request.local_source.display(),
            request.remote_dir
        );
        if request.delete_extraneous {
            described.push_str(" (delete extraneous)");
        }
        if !request.exclusions.is_empty() {
            let names: Vec<_> = request.exclusions.iter().collect();
            described.push_str(&format!(" excluding {}", names.join(", ")));
        }
        described
    }

    fn mirror(&self, request: &MirrorRequest) -> Result<MirrorReport, SessionError> {
        let source = request.local_source.as_path();
        let dir_name = source
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| io_error(source, io::ErrorKind::NotFound.into()))?;
        let dest = Path::new(&request.remote_dir).join(&dir_name);

        let wanted = scan(source, &request.exclusions, true)?;
        let mut report = MirrorReport::default();

        if dest.is_dir() && request.delete_extraneous {
            let present = scan(&dest, &request.exclusions, false)?;
            let mut removed: Vec<&Path> = Vec::new();
            for (rel, kind) in &present {
                if wanted.get(rel) == Some(kind) {
                    continue;
                }
                // Parents sort first; their contents went with them
                if removed.iter().any(|parent| rel.starts_with(parent)) {
                    continue;
                }
                remove_entry(&dest.join(rel), *kind)?;
                report.deleted.push(dir_name.join(rel));
                removed.push(rel.as_path());
            }
        }

        create_dir(&dest)?;
        for (rel, kind) in &wanted {
            let from = source.join(rel);
            let to = dest.join(rel);
            match kind {
                EntryKind::Dir => create_dir(&to)?,
                EntryKind::File => {
                    if copy_if_changed(&from, &to)? {
                        report.transferred.push(dir_name.join(rel));
                    }
                }
                EntryKind::Other => {}
            }
        }

        tracing::debug!(
            dest = %dest.display(),
            transferred = report.transferred.len(),
            deleted = report.deleted.len(),
            "local mirror finished"
        );
        Ok(report)
    }
}

/// Entries under `root` by relative path, excluded names pruned.
///
/// Source scans drop symbolic links and special files.
fn scan(
    root: &Path,
    exclusions: &ExclusionSet,
    regular_only: bool,
) -> Result<BTreeMap<PathBuf, EntryKind>, SessionError> {
    let excluded = exclusions.clone();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            entry.depth() == 0 || !excluded.is_excluded(&entry.file_name().to_string_lossy())
        })
        .build();

    let mut entries = BTreeMap::new();
    for entry in walker {
        let entry = entry.map_err(|err| io_error(root, io::Error::new(io::ErrorKind::Other, err)))?;
        if entry.depth() == 0 {
            continue;
        }

        let kind = match entry.file_type() {
            Some(t) if t.is_dir() => EntryKind::Dir,
            Some(t) if t.is_file() => EntryKind::File,
            _ => EntryKind::Other,
        };
        if regular_only && kind == EntryKind::Other {
            tracing::debug!(path = %entry.path().display(), "skipping non-regular file");
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| entry.path().to_path_buf());
        entries.insert(rel, kind);
    }
    Ok(entries)
}

/// Copy `from` over `to` unless both already hold the same bytes
fn copy_if_changed(from: &Path, to: &Path) -> Result<bool, SessionError> {
    match fs::symlink_metadata(to) {
        Ok(meta) if meta.is_file() => {
            if digest(from)? == digest(to)? {
                return Ok(false);
            }
        }
        Ok(meta) if meta.is_dir() => remove_entry(to, EntryKind::Dir)?,
        Ok(_) => remove_entry(to, EntryKind::Other)?,
        Err(_) => {}
    }

    fs::copy(from, to).map_err(|e| io_error(to, e))?;
    Ok(true)
}

fn digest(path: &Path) -> Result<Vec<u8>, SessionError> {
    let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
    Ok(Sha256::digest(&bytes).to_vec())
}

fn create_dir(path: &Path) -> Result<(), SessionError> {
    if let Ok(meta) = fs::symlink_metadata(path) {
        if meta.is_dir() {
            return Ok(());
        }
        remove_entry(path, EntryKind::File)?;
    }
    fs::create_dir_all(path).map_err(|e| io_error(path, e))
}

fn remove_entry(path: &Path, kind: EntryKind) -> Result<(), SessionError> {
    let result = match kind {
        EntryKind::Dir => fs::remove_dir_all(path),
        EntryKind::File | EntryKind::Other => fs::remove_file(path),
    };
    result.map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, source: io::Error) -> SessionError {
    SessionError::Io {
        path: path.to_path_buf(),
        source,
    }
}

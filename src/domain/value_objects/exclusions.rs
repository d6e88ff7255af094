//! Exclusion set value object
//!
//! Names that are never published. A name matches an entry of that name at
//! any depth, the way `rsync --exclude NAME` does.

use std::collections::BTreeSet;
use std::path::{Component, Path};

use crate::error::{PublishError, PublishResult};

/// Build artifacts, npm metadata, docs and the reveal.js asset folders
/// that live next to the slides but are not part of the deck.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "node_modules",
    "CONTRIBUTING.md",
    "LICENSE",
    "README.md",
    "css",
    "demo.html",
    "examples",
    "gulpfile.js",
    "js",
    "package-lock.json",
    "package.json",
    "test",
];

/// Characters rsync treats as anchors or wildcards in `--exclude`
const PATTERN_CHARS: &[char] = &['/', '*', '?', '[', '\\'];

/// Ordered set of excluded entry names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
}

impl ExclusionSet {
    /// Build a set from plain entry names; surrounding whitespace is trimmed
    /// and blank entries are dropped.
    ///
    /// rsync would anchor a name containing `/` and glob one containing
    /// `*`, `?` or `[`, while the local mirror compares names literally, so
    /// such names are rejected.
    pub fn new<I, S>(names: I) -> PublishResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            if let Some(bad) = name.chars().find(|c| PATTERN_CHARS.contains(c)) {
                return Err(PublishError::InvalidExclusion {
                    name: name.to_string(),
                    reason: format!("contains '{}'; exclusions are plain entry names", bad),
                });
            }
            set.insert(name.to_string());
        }
        Ok(Self { names: set })
    }

    /// Empty set (publish everything)
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Is an entry with this file name excluded?
    pub fn is_excluded(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Does any component of a relative path carry an excluded name?
    pub fn excludes_path(&self, path: &Path) -> bool {
        path.components().any(|c| match c {
            Component::Normal(name) => self.is_excluded(&name.to_string_lossy()),
            _ => false,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self {
            names: DEFAULT_EXCLUSIONS.iter().map(|n| n.to_string()).collect(),
        }
    }
}

//! Publish plan entity
//!
//! Every path a publish run touches, derived from the instance label, the
//! project prefix and the remote root. Read-only once built.

use std::path::{Path, PathBuf};

use crate::domain::ports::MirrorRequest;
use crate::domain::value_objects::{validate_segment, ExclusionSet, InstanceLabel};
use crate::error::{PublishError, PublishResult};

/// Folder name prefix shared by every published deck
pub const DEFAULT_PREFIX: &str = "python-advanced";

/// Local folder holding the deck
pub const DEFAULT_SOURCE: &str = "slides";

/// Suffix of the alias folder name; never usable as an instance label
pub const ALIAS_SUFFIX: &str = "latest";

/// Derived publish configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishPlan {
    instance: InstanceLabel,
    prefix: String,
    remote_root: String,
    local_source: PathBuf,
    exclusions: ExclusionSet,
}

impl PublishPlan {
    /// Build a plan with the default prefix and exclusions.
    ///
    /// `remote_root` is expected to be normalized already (see `RemoteTarget`).
    pub fn new(
        instance: InstanceLabel,
        remote_root: impl Into<String>,
        local_source: impl Into<PathBuf>,
    ) -> PublishResult<Self> {
        if instance.as_str() == ALIAS_SUFFIX {
            return Err(PublishError::InvalidInstance {
                label: instance.to_string(),
                reason: format!(
                    "'{}' names the alias, so the versioned folder would be the alias itself",
                    ALIAS_SUFFIX
                ),
            });
        }

        let local_source = local_source.into();
        if source_dir_name(&local_source).is_none() {
            return Err(PublishError::SourceNotFound { path: local_source });
        }

        Ok(Self {
            instance,
            prefix: DEFAULT_PREFIX.to_string(),
            remote_root: remote_root.into(),
            local_source,
            exclusions: ExclusionSet::default(),
        })
    }

    /// Replace the folder name prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> PublishResult<Self> {
        let prefix = prefix.into();
        validate_segment(&prefix).map_err(|reason| PublishError::InvalidTarget {
            value: prefix.clone(),
            reason: format!("prefix {}", reason),
        })?;
        self.prefix = prefix;
        Ok(self)
    }

    /// Replace the exclusion set
    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn instance(&self) -> &InstanceLabel {
        &self.instance
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn remote_root(&self) -> &str {
        &self.remote_root
    }

    pub fn local_source(&self) -> &Path {
        &self.local_source
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// `<prefix>-<instance>`, the versioned folder and snapshot name
    pub fn pack_name(&self) -> String {
        format!("{}-{}", self.prefix, self.instance)
    }

    /// `<root>/<prefix>-<instance>`
    pub fn versioned_folder(&self) -> String {
        remote_join(&self.remote_root, &self.pack_name())
    }

    /// `<root>/<prefix>-latest`
    pub fn latest_alias(&self) -> String {
        remote_join(&self.remote_root, &format!("{}-{}", self.prefix, ALIAS_SUFFIX))
    }

    /// `<prefix>-<instance>.tar.gz`
    pub fn archive_name(&self) -> String {
        format!("{}.tar.gz", self.pack_name())
    }

    /// `<versioned>/<prefix>-<instance>.tar.gz`
    pub fn archive_path(&self) -> String {
        remote_join(&self.versioned_folder(), &self.archive_name())
    }

    /// Name the mirrored deck gets inside the versioned folder
    pub fn synced_dir_name(&self) -> String {
        source_dir_name(&self.local_source).unwrap_or_default()
    }

    /// `<versioned>/<source dir name>`
    pub fn synced_dir(&self) -> String {
        remote_join(&self.versioned_folder(), &self.synced_dir_name())
    }

    /// Mirror request for this plan (deletions mirrored)
    pub fn mirror_request(&self) -> MirrorRequest {
        MirrorRequest {
            local_source: self.local_source.clone(),
            remote_dir: self.versioned_folder(),
            exclusions: self.exclusions.clone(),
            delete_extraneous: true,
        }
    }
}

/// Join a POSIX path and a single segment
pub(crate) fn remote_join(base: &str, name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), name)
}

fn source_dir_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
}

//! Mirror Transport Port
//!
//! One-way synchronization of the local deck into a remote folder.
//! The source directory is transferred *as a directory*: mirroring
//! `slides` into `/srv/deck-2023` yields `/srv/deck-2023/slides`, the way
//! rsync treats a source path without a trailing slash.

use std::path::PathBuf;

use crate::domain::value_objects::ExclusionSet;

use super::remote_session::SessionError;

/// What to mirror and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorRequest {
    /// Local deck directory
    pub local_source: PathBuf,
    /// Remote folder that receives the deck directory
    pub remote_dir: String,
    /// Names never transferred, never deleted on the receiving side
    pub exclusions: ExclusionSet,
    /// Delete receiving-side entries the source no longer has
    pub delete_extraneous: bool,
}

/// Changes made by one mirror run.
///
/// Paths are relative to `remote_dir` and start with the deck directory name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorReport {
    /// Files created or updated
    pub transferred: Vec<PathBuf>,
    /// Entries removed because the source no longer has them
    pub deleted: Vec<PathBuf>,
}

impl MirrorReport {
    /// Did the run change anything on the receiving side?
    pub fn has_changes(&self) -> bool {
        !self.transferred.is_empty() || !self.deleted.is_empty()
    }
}

/// Strategy for mirroring the deck to the target
pub trait MirrorTransport {
    /// Name of this transport (for logging)
    fn name(&self) -> &'static str;

    /// The command line (or equivalent) this transport would run
    fn describe(&self, request: &MirrorRequest) -> String;

    /// Perform the mirror
    fn mirror(&self, request: &MirrorRequest) -> Result<MirrorReport, SessionError>;
}

impl<T: MirrorTransport + ?Sized> MirrorTransport for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn describe(&self, request: &MirrorRequest) -> String {
        (**self).describe(request)
    }

    fn mirror(&self, request: &MirrorRequest) -> Result<MirrorReport, SessionError> {
        (**self).mirror(request)
    }
}

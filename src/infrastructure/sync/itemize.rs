//! Parser for `rsync --itemize-changes` output.
//!
//! An itemized line is `YXcstpoguax path`: `Y` is the update type, `X` the
//! file type, the rest attribute flags (9 columns on rsync 2.x, 11 on 3.x).
//! Deletions are reported as `*deleting   path`. Everything else rsync prints
//! with `-v` (file list banners, the transfer summary) is ignored.

use std::path::PathBuf;

use crate::domain::ports::MirrorReport;

const UPDATE_TYPES: &str = "<>ch.*";
const FILE_TYPES: &str = "fdLDS";

/// Build a report from rsync's stdout
pub fn parse_itemized(stdout: &str) -> MirrorReport {
    let mut report = MirrorReport::default();

    for line in stdout.lines() {
        if let Some(path) = line.strip_prefix("*deleting") {
            let path = path.trim_start().trim_end_matches('/');
            if !path.is_empty() {
                report.deleted.push(PathBuf::from(path));
            }
            continue;
        }

        let Some((flags, path)) = line.split_once(' ') else {
            continue;
        };
        if !is_item_flags(flags) || path.is_empty() {
            continue;
        }

        let mut chars = flags.chars();
        let update = chars.next();
        let kind = chars.next();
        if matches!(update, Some('<') | Some('>')) && kind == Some('f') {
            report.transferred.push(PathBuf::from(path));
        }
    }

    report
}

fn is_item_flags(flags: &str) -> bool {
    let mut chars = flags.chars();
    let (Some(update), Some(kind)) = (chars.next(), chars.next()) else {
        return false;
    };
    (9..=11).contains(&flags.len())
        && UPDATE_TYPES.contains(update)
        && FILE_TYPES.contains(kind)
}

//! Property tests for the local mirror: the receiving side ends up holding
//! exactly the non-excluded part of the source.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use tempfile::TempDir;

use deckpub::domain::ports::{MirrorRequest, MirrorTransport};
use deckpub::infrastructure::sync::LocalMirror;
use deckpub::ExclusionSet;

const EXCLUDED: &[&str] = &["node_modules", "css", "README.md"];

/// Relative file path -> content. Directory and file names never overlap.
fn tree() -> impl Strategy<Value = BTreeMap<PathBuf, String>> {
    let dir = prop::sample::select(vec!["a", "b", "css", "node_modules"]);
    let file = prop::sample::select(vec!["index.html", "notes.txt", "README.md"]);
    let path = (prop::collection::vec(dir, 0..3), file).prop_map(|(dirs, file)| {
        let mut path: PathBuf = dirs.into_iter().collect();
        path.push(file);
        path
    });
    prop::collection::btree_map(path, "[a-z]{0,8}", 0..12)
}

fn write_tree(root: &Path, files: &BTreeMap<PathBuf, String>) {
    fs::create_dir_all(root).unwrap();
    for (rel, content) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

fn read_tree(root: &Path) -> BTreeMap<PathBuf, String> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_path_buf();
                out.insert(rel, fs::read_to_string(&path).unwrap());
            }
        }
    }
    let mut out = BTreeMap::new();
    if root.is_dir() {
        walk(root, root, &mut out);
    }
    out
}

fn published(files: &BTreeMap<PathBuf, String>, exclusions: &ExclusionSet) -> BTreeMap<PathBuf, String> {
    files
        .iter()
        .filter(|(rel, _)| !exclusions.excludes_path(rel))
        .map(|(rel, content)| (rel.clone(), content.clone()))
        .collect()
}

fn request(source: &Path, dest: &Path, exclusions: &ExclusionSet) -> MirrorRequest {
    MirrorRequest {
        local_source: source.to_path_buf(),
        remote_dir: dest.to_string_lossy().into_owned(),
        exclusions: exclusions.clone(),
        delete_extraneous: true,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: after a mirror, the deck directory on the receiving side
    /// holds exactly the source files whose path has no excluded name.
    #[test]
    fn property_mirror_equals_source_minus_exclusions(files in tree()) {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("slides");
        let dest = dir.path().join("www");
        write_tree(&source, &files);
        let exclusions = ExclusionSet::new(EXCLUDED.iter().copied()).unwrap();

        LocalMirror::new().mirror(&request(&source, &dest, &exclusions)).unwrap();

        prop_assert_eq!(read_tree(&dest.join("slides")), published(&files, &exclusions));
    }

    /// PROPERTY: mirroring an unchanged source twice changes nothing the second time.
    #[test]
    fn property_mirror_is_idempotent(files in tree()) {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("slides");
        let dest = dir.path().join("www");
        write_tree(&source, &files);
        let exclusions = ExclusionSet::new(EXCLUDED.iter().copied()).unwrap();
        let req = request(&source, &dest, &exclusions);

        LocalMirror::new().mirror(&req).unwrap();
        let second = LocalMirror::new().mirror(&req).unwrap();

        prop_assert!(!second.has_changes(), "{:?}", second);
    }

    /// PROPERTY: replacing the source with another tree converges the
    /// receiving side onto the new tree.
    #[test]
    fn property_mirror_follows_source_changes(before in tree(), after in tree()) {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("slides");
        let dest = dir.path().join("www");
        let exclusions = ExclusionSet::new(EXCLUDED.iter().copied()).unwrap();
        let req = request(&source, &dest, &exclusions);

        write_tree(&source, &before);
        LocalMirror::new().mirror(&req).unwrap();

        fs::remove_dir_all(&source).unwrap();
        write_tree(&source, &after);
        LocalMirror::new().mirror(&req).unwrap();

        prop_assert_eq!(read_tree(&dest.join("slides")), published(&after, &exclusions));
    }
}

//! End-to-end publish into a local web root (`transport = "local"`)

#![cfg(unix)]

mod common;

use std::fs;
use std::process::Command;

use common::{entries, TestEnv};

#[test]
fn first_publish_lays_out_folder_alias_and_archive() {
    let env = TestEnv::with_deck();
    let root = env.use_local_transport();

    let result = env.run(&["publish"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("no previous alias"), "{}", result.stdout);
    assert!(result.stdout.contains("1 transferred, 0 deleted"), "{}", result.stdout);
    assert!(result.stdout.contains("created"), "{}", result.stdout);

    let folder = root.join("python-advanced-2023");
    assert_eq!(
        entries(&folder),
        vec!["python-advanced-2023.tar.gz", "slides"],
        "snapshot folder must be removed after archiving"
    );
    assert_eq!(entries(&folder.join("slides")), vec!["index.html"]);
    assert_eq!(
        fs::read_to_string(folder.join("slides/index.html")).unwrap(),
        "<h1>Python advanced</h1>"
    );

    let alias = root.join("python-advanced-latest");
    assert!(fs::symlink_metadata(&alias).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_link(&alias).unwrap(), folder);
}

#[test]
fn archive_holds_the_snapshot_folder() {
    let env = TestEnv::with_deck();
    let root = env.use_local_transport();

    let result = env.run(&["publish"]);
    assert!(result.success, "{}", result.combined_output());

    let archive = root.join("python-advanced-2023/python-advanced-2023.tar.gz");
    let listing = Command::new("tar").arg("tzf").arg(&archive).output().unwrap();
    assert!(listing.status.success());
    let listing = String::from_utf8_lossy(&listing.stdout);
    assert!(
        listing
            .lines()
            .any(|l| l.trim_end_matches('/') == "python-advanced-2023/index.html"),
        "{}",
        listing
    );
    assert!(!listing.contains("node_modules"), "{}", listing);
}

#[test]
fn republishing_repoints_and_mirrors_deletions() {
    let env = TestEnv::with_deck();
    let root = env.use_local_transport();
    env.write_project_file("slides/old.html", "old");

    let first = env.run(&["publish"]);
    assert!(first.success, "{}", first.combined_output());

    let synced = root.join("python-advanced-2023/slides");
    fs::remove_file(env.project_path("slides/old.html")).unwrap();
    // Excluded names on the target survive deletions
    fs::create_dir_all(synced.join("node_modules")).unwrap();
    fs::write(synced.join("node_modules/keep.js"), "").unwrap();

    let second = env.run(&["publish"]);

    assert!(second.success, "{}", second.combined_output());
    assert!(second.stdout.contains("repointed"), "{}", second.stdout);
    assert!(second.stdout.contains("0 transferred, 1 deleted"), "{}", second.stdout);
    assert!(!synced.join("old.html").exists());
    assert!(synced.join("node_modules/keep.js").exists());
    assert_eq!(
        fs::read_link(root.join("python-advanced-latest")).unwrap(),
        root.join("python-advanced-2023")
    );
}

#[test]
fn new_instance_moves_latest_alias() {
    let env = TestEnv::with_deck();
    let root = env.use_local_transport();

    assert!(env.run(&["publish"]).success);
    let result = env.run(&["publish", "--instance", "2024"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(root.join("python-advanced-2023/slides/index.html").exists());
    assert!(root.join("python-advanced-2024/python-advanced-2024.tar.gz").exists());
    assert_eq!(
        fs::read_link(root.join("python-advanced-latest")).unwrap(),
        root.join("python-advanced-2024")
    );
}

#[test]
fn latest_instance_leaves_live_alias_intact() {
    let env = TestEnv::with_deck();
    let root = env.use_local_transport();
    assert!(env.run(&["publish"]).success);

    let result = env.run(&["publish", "--instance", "latest"]);

    assert!(!result.success);
    assert!(
        result.stderr.contains("invalid instance label 'latest'"),
        "{}",
        result.stderr
    );
    let alias = root.join("python-advanced-latest");
    assert_eq!(fs::read_link(&alias).unwrap(), root.join("python-advanced-2023"));
    assert!(alias.join("slides/index.html").is_file());
}

#[test]
fn directory_at_alias_path_is_left_alone() {
    let env = TestEnv::with_deck();
    let root = env.use_local_transport();
    fs::create_dir_all(root.join("python-advanced-latest/precious")).unwrap();

    let result = env.run(&["publish"]);

    assert!(!result.success);
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("is not a symbolic link"), "{}", result.stderr);
    assert!(
        result.stderr.contains("publish stopped after stage 'synced'"),
        "{}",
        result.stderr
    );
    assert!(root.join("python-advanced-latest/precious").is_dir());
    assert!(!root
        .join("python-advanced-2023/python-advanced-2023.tar.gz")
        .exists());
}

#[test]
fn missing_source_fails_before_touching_the_root() {
    let env = TestEnv::empty();
    let root = env.use_local_transport();

    let result = env.run(&["publish"]);

    assert!(!result.success);
    assert!(result.stderr.contains("source directory not found"), "{}", result.stderr);
    assert!(entries(&root).is_empty());
}

#[test]
fn json_publish_emits_ndjson_events() {
    let env = TestEnv::with_deck();
    env.use_local_transport();

    let result = env.run(&["publish", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    let events = result.json_lines();
    let names: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
    assert_eq!(names.first(), Some(&"start"));
    assert!(names.contains(&"mirrored"));
    assert!(names.contains(&"alias_missing"));

    let last = events.last().unwrap();
    assert_eq!(last["event"], "complete");
    assert_eq!(last["status"], "success");
    assert!(last["archive"]
        .as_str()
        .unwrap()
        .ends_with("python-advanced-2023/python-advanced-2023.tar.gz"));
}

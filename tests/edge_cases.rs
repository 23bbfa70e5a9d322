//! Edge case and error handling tests for dirscribe


use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

use harness::{TestTree, expected_lines, scan_to_lines};

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_dirscribe"))
}

// ============================================================================
// Argument Validation
// ============================================================================

#[test]
fn test_no_arguments_prints_usage() {
    let work = TestTree::new();
    cli()
        .current_dir(work.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("USAGE"));
    assert_eq!(fs::read_dir(work.path()).unwrap().count(), 0);
}

#[test]
fn test_one_argument_prints_usage() {
    let work = TestTree::new();
    cli()
        .current_dir(work.path())
        .arg(".")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("USAGE"));
}

#[test]
fn test_three_arguments_prints_usage_and_writes_nothing() {
    let work = TestTree::new();
    cli()
        .current_dir(work.path())
        .args([".", "out.sh", "extra"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("USAGE"));
    assert!(!work.path().join("out.sh").exists());
}

#[test]
fn test_unknown_flag_prints_usage() {
    let work = TestTree::new();
    cli()
        .current_dir(work.path())
        .args(["--bogus", ".", "out.sh"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("USAGE"));
    assert!(!work.path().join("out.sh").exists());
}

#[test]
fn test_help_flag_is_a_usage_error() {
    let work = TestTree::new();
    cli()
        .current_dir(work.path())
        .arg("--help")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("USAGE"));
}

#[test]
fn test_version_flag_is_a_usage_error() {
    let work = TestTree::new();
    cli()
        .current_dir(work.path())
        .arg("--version")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("USAGE"));
}

#[test]
fn test_hyphen_named_source_is_accepted() {
    let work = TestTree::new();
    let source = work.add_dir_with_mode("-data", 0o750);
    cli()
        .current_dir(work.path())
        .args(["-data", "out.sh"])
        .assert()
        .success();

    let canonical = fs::canonicalize(&source).unwrap();
    let script = fs::read_to_string(work.path().join("out.sh")).unwrap();
    assert!(script.contains(&format!("chmod 0750 {}\n", canonical.display())));
}

#[test]
fn test_hyphen_named_output_is_accepted() {
    let work = TestTree::new();
    work.add_dir("src");
    cli()
        .current_dir(work.path())
        .args(["src", "-out.sh"])
        .assert()
        .success();
    assert!(work.path().join("-out.sh").exists());
}

// ============================================================================
// Source Path Validation
// ============================================================================

#[test]
fn test_missing_source_is_rejected() {
    let work = TestTree::new();
    cli()
        .current_dir(work.path())
        .args(["does-not-exist", "out.sh"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error - path not valid"));
    assert!(!work.path().join("out.sh").exists());
}

#[test]
fn test_dangling_symlink_source_is_rejected() {
    let work = TestTree::new();
    work.add_symlink("nowhere", "dangling");
    cli()
        .current_dir(work.path())
        .args(["dangling", "out.sh"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error - path not valid"));
}

#[test]
fn test_file_source_gives_empty_script() {
    let work = TestTree::new();
    work.add_file("plain.txt", "hello");
    cli()
        .current_dir(work.path())
        .args(["plain.txt", "out.sh"])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(work.path().join("out.sh")).unwrap(), "");
}

// ============================================================================
// Output Path Failures
// ============================================================================

#[test]
fn test_missing_output_parent_fails() {
    let tree = TestTree::new();
    let out = TestTree::new();
    let target = out.path().join("no/such/dir/out.sh");
    cli()
        .arg(tree.path())
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot write script"));
    assert!(!out.path().join("no").exists());
}

#[test]
fn test_output_is_a_directory_fails() {
    let tree = TestTree::new();
    let out = TestTree::new();
    cli()
        .arg(tree.path())
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("dirscribe: error:"));
}

// ============================================================================
// Symlink Edge Cases
// ============================================================================

#[test]
fn test_symlinked_directory_is_followed() {
    let tree = TestTree::new();
    let outside = TestTree::new();
    let target = outside.add_dir_with_mode("target", 0o711);
    outside.add_dir("target/child");
    tree.add_symlink(&target, "link");
    let out = TestTree::new();

    let lines = scan_to_lines(tree.path(), &out.path().join("s.sh"));
    let canonical = fs::canonicalize(&target).unwrap();
    assert!(lines.contains(&format!("mkdir -p {}", canonical.display())));
    assert!(lines.contains(&format!("chmod 0711 {}", canonical.display())));
    assert!(lines.contains(&format!("mkdir -p {}", canonical.join("child").display())));
}

#[test]
fn test_symlink_source_is_canonicalized() {
    let tree = TestTree::new();
    let real = tree.add_dir_with_mode("real", 0o755);
    let link = tree.add_symlink(&real, "alias");
    let out = TestTree::new();

    let lines = scan_to_lines(&link, &out.path().join("s.sh"));
    assert_eq!(lines, expected_lines(&real, "0755").to_vec());
}

#[test]
fn test_symlink_to_parent_no_infinite_loop() {
    let tree = TestTree::new();
    tree.add_dir("subdir");
    tree.add_symlink("..", "subdir/parent");
    let out = TestTree::new();

    let lines = scan_to_lines(tree.path(), &out.path().join("s.sh"));
    assert_eq!(lines.len(), 6, "root and subdir only: {lines:#?}");
}

#[test]
fn test_symlink_to_file_is_ignored() {
    let tree = TestTree::new();
    let file = tree.add_file("target.txt", "x");
    tree.add_symlink(&file, "link.txt");
    let out = TestTree::new();

    let lines = scan_to_lines(tree.path(), &out.path().join("s.sh"));
    assert_eq!(lines.len(), 3);
}

// ============================================================================
// Unusual Names and Permissions
// ============================================================================

#[test]
fn test_directory_with_space_is_quoted() {
    let tree = TestTree::new();
    let dir = tree.add_dir("with space");
    let out = TestTree::new();

    let lines = scan_to_lines(tree.path(), &out.path().join("s.sh"));
    let canonical = fs::canonicalize(&dir).unwrap();
    assert!(lines.contains(&format!("mkdir -p '{}'", canonical.display())));
}

#[test]
fn test_hidden_directories_included() {
    let tree = TestTree::new();
    let hidden = tree.add_dir(".config");
    let out = TestTree::new();

    let lines = scan_to_lines(tree.path(), &out.path().join("s.sh"));
    let canonical = fs::canonicalize(&hidden).unwrap();
    assert!(lines.contains(&format!("mkdir -p {}", canonical.display())));
}

#[test]
fn test_unreadable_directory_still_emitted() {
    let tree = TestTree::new();
    let locked = tree.add_dir("locked");
    tree.add_dir("locked/inner");
    tree.chmod("locked", 0o000);
    let out = TestTree::new();

    let lines = scan_to_lines(tree.path(), &out.path().join("s.sh"));
    let canonical = fs::canonicalize(&locked).unwrap();
    assert!(
        lines.contains(&format!("chmod 0000 {}", canonical.display())),
        "{lines:#?}"
    );
}

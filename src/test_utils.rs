//! Test utilities for building temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::os::unix::fs::{PermissionsExt, symlink};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// The tree is automatically cleaned up when dropped. Directories made
/// unreadable by a test are given their permissions back first so cleanup
/// can succeed.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the root of the tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Canonical form of the root, as it appears in generated scripts.
    pub fn canonical_path(&self) -> PathBuf {
        fs::canonicalize(self.dir.path()).expect("Failed to canonicalize temp dir")
    }

    /// Create a directory (and missing parents) below the root.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Create a directory and set its mode.
    pub fn add_dir_with_mode(&self, path: &str, mode: u32) -> PathBuf {
        let full_path = self.add_dir(path);
        set_mode(&full_path, mode);
        full_path
    }

    /// Add a regular file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Create a symlink at `link` (relative to the root) pointing at `target`.
    pub fn add_symlink(&self, target: impl AsRef<Path>, link: &str) -> PathBuf {
        let full_path = self.dir.path().join(link);
        symlink(target, &full_path).expect("Failed to create symlink");
        full_path
    }

    /// Set the mode of a path relative to the root.
    pub fn chmod(&self, path: &str, mode: u32) {
        set_mode(&self.dir.path().join(path), mode);
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestTree {
    fn drop(&mut self) {
        // Restore access everywhere so TempDir can remove the tree.
        restore_access(self.dir.path());
    }
}

fn set_mode(path: &Path, mode: u32) {
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).expect("Failed to set mode");
}

fn restore_access(path: &Path) {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return;
    };
    if !meta.is_dir() {
        return;
    }
    let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o755));
    if let Ok(entries) = fs::read_dir(path) {
        for entry in entries.flatten() {
            restore_access(&entry.path());
        }
    }
}

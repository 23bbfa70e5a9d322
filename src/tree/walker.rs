//! DirectoryWalker - pre-order traversal feeding a visitor

use std::path::{Path, PathBuf};

use ignore::{Walk, WalkBuilder};
use log::{debug, warn};

use crate::error::Result;

/// Receives every directory found by [`DirectoryWalker::walk`], parents first.
pub trait DirectoryVisitor {
    fn visit_directory(&mut self, path: &Path) -> Result<()>;
}

impl DirectoryVisitor for Vec<PathBuf> {
    fn visit_directory(&mut self, path: &Path) -> Result<()> {
        self.push(path.to_path_buf());
        Ok(())
    }
}

/// Sequential, top-down directory walker that follows directory symlinks.
///
/// Only the single-threaded `ignore::Walk` iterator is used: it yields a
/// directory before descending into it, which is what makes the generated
/// script replayable line by line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryWalker;

impl DirectoryWalker {
    pub fn new() -> Self {
        Self
    }

    fn build(&self, root: &Path) -> Walk {
        WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
    }

    /// Walk `root` and hand each directory (including `root`) to `visitor`.
    ///
    /// Unreadable entries and symlink loops are logged and skipped. The first
    /// error returned by the visitor stops the walk. Returns the number of
    /// directories visited.
    pub fn walk<V: DirectoryVisitor>(&self, root: &Path, visitor: &mut V) -> Result<usize> {
        let mut dir_count = 0;

        for result in self.build(root) {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping entry: {err}");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                continue;
            }

            debug!("visiting {}", entry.path().display());
            visitor.visit_directory(entry.path())?;
            dir_count += 1;
        }

        Ok(dir_count)
    }

    /// Collect the visited directories in traversal order.
    pub fn directories(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        self.walk(root, &mut dirs)?;
        Ok(dirs)
    }
}

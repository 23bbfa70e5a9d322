//! Directory tree walking logic
//!
//! Directories are visited top-down: a parent always reaches the visitor
//! before any of its descendants, and siblings arrive sorted by name.

mod walker;

pub use walker::{DirectoryVisitor, DirectoryWalker};

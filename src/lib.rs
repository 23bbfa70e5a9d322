//! dirscribe - turn a directory tree into a script that recreates it
//!
//! Every directory becomes three shell commands (`mkdir -p`, `chown -R`,
//! `chmod`) carrying the owner, group and mode it had at scan time.

pub mod commands;
pub mod error;
pub mod metadata;
pub mod scanner;
pub mod script;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use commands::CreationCommands;
pub use error::{Result, ScanError};
pub use metadata::{DirectoryRecord, permission_octal};
pub use scanner::{ScanConfig, ScanSummary, check_source, run, scan};
pub use script::{Script, resolve_output_path};
pub use tree::{DirectoryVisitor, DirectoryWalker};

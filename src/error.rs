//! Error types for scanning and script generation

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The source path does not exist (a dangling symlink counts as missing).
    #[error("Error - path not valid")]
    SourceNotFound { path: PathBuf },

    /// The directory's owner id has no entry in the user database.
    #[error("no user name for uid {uid} (owner of '{}')", .path.display())]
    UnknownUser { uid: u32, path: PathBuf },

    /// The directory's group id has no entry in the group database.
    #[error("no group name for gid {gid} (group of '{}')", .path.display())]
    UnknownGroup { gid: u32, path: PathBuf },

    /// The user or group database could not be queried.
    #[error("user/group lookup failed for '{}': {source}", .path.display())]
    Lookup {
        path: PathBuf,
        #[source]
        source: nix::Error,
    },

    #[error("cannot read metadata of '{}': {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write script to '{}': {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScanError>;

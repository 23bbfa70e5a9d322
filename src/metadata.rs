//! Ownership and permission metadata for a single directory
//!
//! A [`DirectoryRecord`] is read straight from the filesystem every time it is
//! needed; nothing here caches user or group lookups.

use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use nix::errno::Errno;
use nix::unistd::{Gid, Group, Uid, User};

use crate::error::{Result, ScanError};

/// Bits of `st_mode` that `chmod` can restore (permissions plus setuid, setgid
/// and sticky), i.e. everything except the file type.
pub const PERMISSION_MASK: u32 = 0o7777;

/// Owner, group and mode of one directory at scan time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
    /// Canonical absolute path of the directory.
    pub path: PathBuf,
    pub owner: String,
    pub group: String,
    /// Permission bits as a four-digit octal string, e.g. `0755`.
    pub mode: String,
}

impl DirectoryRecord {
    /// Canonicalize `path` (following symlinks) and read its metadata.
    ///
    /// Fails if the owner or group id cannot be resolved to a name.
    pub fn read(path: &Path) -> Result<Self> {
        let path = fs::canonicalize(path).map_err(|source| ScanError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;
        let meta = fs::metadata(&path).map_err(|source| ScanError::Metadata {
            path: path.clone(),
            source,
        })?;

        let owner = user_name(meta.uid(), &path)?;
        let group = group_name(meta.gid(), &path)?;

        Ok(Self {
            owner,
            group,
            mode: permission_octal(meta.mode()),
            path,
        })
    }
}

/// Render the permission bits of a raw `st_mode` as zero-padded octal.
pub fn permission_octal(mode: u32) -> String {
    format!("{:04o}", mode & PERMISSION_MASK)
}

/// Resolve a uid through the system user database.
///
/// `path` is only used to give the error some context.
pub fn user_name(uid: u32, path: &Path) -> Result<String> {
    match User::from_uid(Uid::from_raw(uid)) {
        Ok(Some(user)) => Ok(user.name),
        Ok(None) => Err(ScanError::UnknownUser {
            uid,
            path: path.to_path_buf(),
        }),
        Err(errno) if is_not_found(errno) => Err(ScanError::UnknownUser {
            uid,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(ScanError::Lookup {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Resolve a gid through the system group database.
pub fn group_name(gid: u32, path: &Path) -> Result<String> {
    match Group::from_gid(Gid::from_raw(gid)) {
        Ok(Some(group)) => Ok(group.name),
        Ok(None) => Err(ScanError::UnknownGroup {
            gid,
            path: path.to_path_buf(),
        }),
        Err(errno) if is_not_found(errno) => Err(ScanError::UnknownGroup {
            gid,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(ScanError::Lookup {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// getpwuid_r(3) lets implementations report a missing entry with these codes
// instead of a null result.
fn is_not_found(errno: Errno) -> bool {
    matches!(
        errno,
        Errno::ENOENT | Errno::ESRCH | Errno::EBADF | Errno::EPERM
    )
}

//! Shell command synthesis for one directory
//!
//! Commands are kept as raw bytes: a directory name that is not valid UTF-8
//! must reach the script unchanged or replaying it creates a different path.

use std::borrow::Cow;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::metadata::DirectoryRecord;

/// The three commands that recreate one directory, in replay order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationCommands {
    pub mkdir: Vec<u8>,
    pub chown: Vec<u8>,
    pub chmod: Vec<u8>,
}

impl CreationCommands {
    pub fn for_record(record: &DirectoryRecord) -> Self {
        Self::new(&record.path, &record.owner, &record.group, &record.mode)
    }

    /// Build the commands for `path` owned by `owner:group` with octal `mode`.
    ///
    /// `mkdir -p` lets every line be replayed even if some parent was never
    /// created by an earlier line.
    pub fn new(path: &Path, owner: &str, group: &str, mode: &str) -> Self {
        let target = quote_path(path);
        let owner_spec = format!("{owner}:{group}");
        let owner_spec = quote(owner_spec.as_bytes());
        Self {
            mkdir: command(&[b"mkdir", b"-p", &target[..]]),
            chown: command(&[b"chown", b"-R", &owner_spec[..], &target[..]]),
            chmod: command(&[b"chmod", mode.as_bytes(), &target[..]]),
        }
    }

    /// Lines in the order they must be executed.
    pub fn lines(&self) -> [&[u8]; 3] {
        [
            self.mkdir.as_slice(),
            self.chown.as_slice(),
            self.chmod.as_slice(),
        ]
    }

    pub fn into_lines(self) -> [Vec<u8>; 3] {
        [self.mkdir, self.chown, self.chmod]
    }
}

fn command(words: &[&[u8]]) -> Vec<u8> {
    words.join(&b' ')
}

/// Render a path as a single shell word, byte for byte.
pub fn quote_path(path: &Path) -> Cow<'_, [u8]> {
    quote(path.as_os_str().as_bytes())
}

/// Single-quote `word` unless it consists only of bytes the shell leaves
/// alone. Non-ASCII bytes always force quoting.
pub fn quote(word: &[u8]) -> Cow<'_, [u8]> {
    if !word.is_empty() && word.iter().copied().all(is_shell_safe) {
        return Cow::Borrowed(word);
    }
    let mut quoted = Vec::with_capacity(word.len() + 2);
    quoted.push(b'\'');
    for &byte in word {
        if byte == b'\'' {
            quoted.extend_from_slice(br"'\''");
        } else {
            quoted.push(byte);
        }
    }
    quoted.push(b'\'');
    Cow::Owned(quoted)
}

fn is_shell_safe(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'_' | b'@' | b'%' | b'+' | b'=' | b':' | b',' | b'.' | b'/' | b'-'
        )
}

//! Script assembly and output
//!
//! The script is built fully in memory and only written once the whole tree
//! has been scanned, so a failed scan never leaves a file behind.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::debug;
use path_clean::PathClean;
use regex::{Captures, Regex};

use crate::commands::CreationCommands;
use crate::error::{Result, ScanError};
use crate::metadata::DirectoryRecord;
use crate::tree::DirectoryVisitor;

/// `$NAME` or `${NAME}`
static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:(\w+)|\{([^}]*)\})").expect("ENV_VAR_PATTERN regex is invalid")
});

/// Ordered list of shell commands, one per line.
///
/// Lines are raw bytes so paths that are not UTF-8 survive unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    lines: Vec<Vec<u8>>,
    directories: usize,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one directory's commands, keeping their replay order.
    pub fn push(&mut self, commands: CreationCommands) {
        self.lines.extend(commands.into_lines());
        self.directories += 1;
    }

    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    /// Number of directories described.
    pub fn directories(&self) -> usize {
        self.directories
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Write every line, byte for byte, followed by `\n`.
    pub fn write<W: Write>(&self, mut out: W) -> io::Result<()> {
        for line in &self.lines {
            out.write_all(line)?;
            out.write_all(b"\n")?;
        }
        out.flush()
    }

    /// Create or truncate `path` and write the script into it.
    ///
    /// Parent directories are not created. If a write fails part way the file
    /// keeps whatever was already written.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let output_err = |source| ScanError::Output {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(output_err)?;
        self.write(BufWriter::new(file)).map_err(output_err)?;
        debug!("wrote {} lines to {}", self.lines.len(), path.display());
        Ok(())
    }
}

impl DirectoryVisitor for Script {
    fn visit_directory(&mut self, path: &Path) -> Result<()> {
        let record = DirectoryRecord::read(path)?;
        self.push(CreationCommands::for_record(&record));
        Ok(())
    }
}

/// Expand `$NAME` and `${NAME}` from the process environment.
///
/// References to unset variables are left as written.
pub fn expand_env_vars(input: &str) -> Cow<'_, str> {
    expand_vars_with(input, |name| std::env::var(name).ok())
}

/// Like [`expand_env_vars`] but with a caller-supplied lookup.
pub fn expand_vars_with<F>(input: &str, lookup: F) -> Cow<'_, str>
where
    F: Fn(&str) -> Option<String>,
{
    if !input.contains('$') {
        return Cow::Borrowed(input);
    }
    ENV_VAR_PATTERN.replace_all(input, |caps: &Captures| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map_or("", |m| m.as_str());
        lookup(name).unwrap_or_else(|| caps[0].to_string())
    })
}

/// Turn the user-supplied output argument into an absolute, normalized path.
///
/// Environment variables are expanded, the result is made absolute against
/// the current directory and cleaned lexically. When the parent directory
/// exists its symlinks are resolved too.
pub fn resolve_output_path(raw: &Path) -> Result<PathBuf> {
    let expanded = match raw.to_str() {
        Some(s) => PathBuf::from(expand_env_vars(s).as_ref()),
        None => raw.to_path_buf(),
    };

    let absolute = std::path::absolute(&expanded).map_err(|source| ScanError::Output {
        path: expanded.clone(),
        source,
    })?;
    let cleaned = absolute.clean();

    match (cleaned.parent(), cleaned.file_name()) {
        (Some(parent), Some(name)) => match fs::canonicalize(parent) {
            Ok(parent) => Ok(parent.join(name)),
            Err(_) => Ok(cleaned),
        },
        _ => Ok(cleaned),
    }
}

//! Scan orchestration: check the source, walk it, write the script

use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Result, ScanError};
use crate::script::{Script, resolve_output_path};
use crate::tree::DirectoryWalker;

/// Everything a scan needs, passed explicitly.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory tree to describe.
    pub source: PathBuf,
    /// Where the script goes, before environment expansion.
    pub output: PathBuf,
}

impl ScanConfig {
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub directories: usize,
    pub output: PathBuf,
}

/// Existence check only: files are accepted, dangling symlinks are not.
pub fn check_source(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ScanError::SourceNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Walk `source` and build the script for every directory in it.
///
/// Stops at the first directory whose metadata cannot be resolved.
pub fn scan(source: &Path) -> Result<Script> {
    let mut script = Script::new();
    let directories = DirectoryWalker::new().walk(source, &mut script)?;
    info!("scanned {directories} directories under {}", source.display());
    Ok(script)
}

/// Check, scan, then write. Nothing is written unless the scan succeeds.
pub fn run(config: &ScanConfig) -> Result<ScanSummary> {
    check_source(&config.source)?;
    let script = scan(&config.source)?;
    let output = resolve_output_path(&config.output)?;
    script.write_to(&output)?;

    Ok(ScanSummary {
        directories: script.directories(),
        output,
    })
}

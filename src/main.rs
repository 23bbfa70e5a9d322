//! CLI entry point for dirscribe

use std::path::PathBuf;
use std::process;

use clap::Parser;
use dirscribe::{ScanConfig, ScanError};

const USAGE: &str = "
USAGE:
    dirscribe [PATH TO FOLDER] [OUTPUT FILE]

Scans every folder starting at [PATH TO FOLDER] and writes shell commands
to [OUTPUT FILE] that recreate those directories with the same user, group
and permission bits.
";

/// Exactly two positionals. Help and version flags are disabled so that any
/// other argument count, `--help` included, ends in the usage text.
#[derive(Parser, Debug)]
#[command(name = "dirscribe")]
#[command(about = "Write a shell script that recreates a directory tree with its owners and modes")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Directory tree to scan
    #[arg(allow_hyphen_values = true)]
    source: PathBuf,

    /// Script to write ($VARS are expanded; existing content is replaced)
    #[arg(allow_hyphen_values = true)]
    output: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::try_parse().unwrap_or_else(|_| {
        println!("{USAGE}");
        process::exit(1);
    });

    let config = ScanConfig::new(args.source, args.output);
    match dirscribe::run(&config) {
        Ok(summary) => {
            log::info!(
                "wrote commands for {} directories to {}",
                summary.directories,
                summary.output.display()
            );
        }
        Err(e @ ScanError::SourceNotFound { .. }) => {
            println!("{e}");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("dirscribe: error: {e}");
            process::exit(1);
        }
    }
}

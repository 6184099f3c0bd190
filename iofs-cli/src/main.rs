// SPDX-License-Identifier: AGPL-3.0-or-later
//! iofs CLI
//!
//! Recursive file operations that keep going when something fails.

mod commands;

use clap::{Parser, Subcommand};
use console::style;
use iofs::{Iofs, IofsConfig, LocalBackend, DEFAULT_COPY_BUFFER_SIZE};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "iofs")]
#[command(author, version, about = "iofs - failure-masking file operations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Mode for directories created along the way (octal)
    #[arg(long, global = true, value_parser = parse_mode, default_value = "755")]
    dir_mode: u32,

    /// Copy buffer size in bytes
    #[arg(long, global = true, default_value_t = DEFAULT_COPY_BUFFER_SIZE)]
    buffer_size: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Display file contents
    Cat {
        /// File to display
        path: PathBuf,
    },

    /// List directory contents
    #[command(alias = "dir")]
    Ls {
        /// Directory to list (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Include every descendant
        #[arg(short, long)]
        recursive: bool,

        /// Long format with details
        #[arg(short, long)]
        long: bool,
    },

    /// Write data to a file, or print it when no file is given
    Echo {
        /// Text to write
        data: String,

        /// Target file
        file: Option<PathBuf>,

        /// Append instead of truncating
        #[arg(short, long)]
        append: bool,

        /// Text encoding (utf8, ascii, latin1, hex, base64, base64url, utf16le)
        #[arg(short, long)]
        encoding: Option<String>,
    },

    /// Copy files or directory trees
    Cp {
        /// Source path
        source: PathBuf,

        /// Destination path
        dest: PathBuf,
    },

    /// Move or rename files, across volumes if needed
    Mv {
        /// Source path
        source: PathBuf,

        /// Destination path
        dest: PathBuf,
    },

    /// Remove files or directory trees
    Rm {
        /// Path(s) to remove
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Show file or directory information
    Stat {
        /// Path to inspect
        path: PathBuf,

        /// Describe a symlink itself rather than its target
        #[arg(long)]
        no_follow: bool,
    },

    /// Create directories with their parents
    Mkdir {
        /// Directory path(s) to create
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Permission bits (octal)
        #[arg(short, long, value_parser = parse_mode)]
        mode: Option<u32>,
    },

    /// Change permission bits
    Chmod {
        /// Permission bits (octal)
        #[arg(value_parser = parse_mode)]
        mode: u32,

        /// Path to change
        path: PathBuf,
    },

    /// Change owner and group
    Chown {
        /// Path to change
        path: PathBuf,

        /// New owner id
        #[arg(short, long)]
        uid: Option<u32>,

        /// New group id
        #[arg(short, long)]
        gid: Option<u32>,
    },

    /// Exit successfully if the path exists
    Exists {
        /// Path to probe
        path: PathBuf,
    },

    /// Exit successfully if the path is accessible with the given mode
    Access {
        /// Path to probe
        path: PathBuf,

        /// Require read permission
        #[arg(short, long)]
        read: bool,

        /// Require write permission
        #[arg(short, long)]
        write: bool,

        /// Require execute permission
        #[arg(short = 'x', long)]
        execute: bool,
    },
}

fn parse_mode(s: &str) -> Result<u32, String> {
    let digits = s.strip_prefix("0o").unwrap_or(s);
    u32::from_str_radix(digits, 8).map_err(|e| format!("invalid octal mode '{s}': {e}"))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("IOFS_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = IofsConfig {
        dir_mode: cli.dir_mode,
        copy_buffer_size: cli.buffer_size,
    };
    let fs = match Iofs::with_config(LocalBackend::new(), config) {
        Ok(fs) => fs,
        Err(e) => {
            eprintln!("{} {e}", style("Error:").red().bold());
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Cat { path } => commands::cat(&fs, &path).await,
        Commands::Ls { path, recursive, long } => commands::ls(&fs, &path, recursive, long).await,
        Commands::Echo { data, file, append, encoding } => {
            commands::echo(&fs, data, file.as_deref(), append, encoding.as_deref()).await
        }
        Commands::Cp { source, dest } => commands::cp(&fs, &source, &dest).await,
        Commands::Mv { source, dest } => commands::mv(&fs, &source, &dest).await,
        Commands::Rm { paths } => commands::rm(&fs, &paths).await,
        Commands::Stat { path, no_follow } => commands::stat(&fs, &path, no_follow).await,
        Commands::Mkdir { paths, mode } => commands::mkdir(&fs, &paths, mode).await,
        Commands::Chmod { mode, path } => commands::chmod(&fs, &path, mode).await,
        Commands::Chown { path, uid, gid } => commands::chown(&fs, &path, uid, gid).await,
        Commands::Exists { path } => commands::exists(&fs, &path).await,
        Commands::Access { path, read, write, execute } => {
            commands::access(&fs, &path, read, write, execute).await
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e}", style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_every_subcommand_argument_has_help() {
        let cli = Cli::command();
        for sub in cli.get_subcommands() {
            for arg in sub.get_arguments() {
                assert!(
                    arg.get_help().is_some(),
                    "{} {} has no help text",
                    sub.get_name(),
                    arg.get_id()
                );
            }
        }
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("755"), Ok(0o755));
        assert_eq!(parse_mode("0o600"), Ok(0o600));
        assert!(parse_mode("9").is_err());
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//! CLI command implementations

use chrono::{DateTime, Utc};
use console::style;
use iofs::{
    AccessMode, CopyReport, Echoed, EntryKind, Iofs, IofsError, IofsResult, Outcome, StatResult,
    WriteOptions,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tabled::{Table, Tabled};

/// Format a timestamp for display
fn format_time(dt: Option<DateTime<Utc>>) -> String {
    dt.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format entry kind
fn format_kind(kind: EntryKind) -> String {
    match kind {
        EntryKind::Directory => style("d").cyan().to_string(),
        EntryKind::File => "-".to_string(),
        EntryKind::Symlink => style("l").magenta().to_string(),
        EntryKind::Socket => style("s").yellow().to_string(),
        EntryKind::Other => "?".to_string(),
        EntryKind::Absent => style("!").red().to_string(),
    }
}

fn to_stdout(data: &[u8]) -> IofsResult<()> {
    let mut out = std::io::stdout().lock();
    out.write_all(data)
        .and_then(|()| out.flush())
        .map_err(|e| IofsError::from_io(e, "<stdout>"))
}

fn report_failures(report: &CopyReport) {
    for (path, e) in &report.failures {
        eprintln!("{} {}: {e}", style("skipped").yellow(), path.display());
    }
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[derive(Tabled)]
struct LsEntry {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Permissions")]
    perms: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Modified")]
    modified: String,
    #[tabled(rename = "Path")]
    path: String,
}

impl LsEntry {
    fn new(path: &Path, stat: &StatResult) -> Self {
        let meta = stat.metadata();
        Self {
            kind: format_kind(stat.kind()),
            perms: meta
                .and_then(|m| m.permissions)
                .map(|p| p.symbolic())
                .unwrap_or_else(|| "---------".to_string()),
            size: meta
                .map(|m| bytesize::ByteSize(m.size).to_string())
                .unwrap_or_else(|| "-".to_string()),
            modified: format_time(meta.and_then(|m| m.modified)),
            path: path.display().to_string(),
        }
    }
}

/// Display file contents
pub async fn cat(fs: &Iofs, path: &Path) -> IofsResult<ExitCode> {
    let data = fs.cat(path).await.into_result()?;
    to_stdout(&data)?;
    Ok(ExitCode::SUCCESS)
}

/// List directory contents
pub async fn ls(fs: &Iofs, path: &Path, recursive: bool, long: bool) -> IofsResult<ExitCode> {
    let entries = fs.ls(path, recursive).await.into_result()?;

    if entries.is_empty() {
        println!("(empty directory)");
        return Ok(ExitCode::SUCCESS);
    }

    if long {
        let mut rows = Vec::with_capacity(entries.len());
        for entry in &entries {
            rows.push(LsEntry::new(entry, &fs.lstat(entry).await));
        }
        println!("{}", Table::new(rows));
    } else {
        for entry in entries {
            println!("{}", entry.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Write text to a file, or print it back
pub async fn echo(
    fs: &Iofs,
    data: String,
    file: Option<&Path>,
    append: bool,
    encoding: Option<&str>,
) -> IofsResult<ExitCode> {
    let options = WriteOptions::resolve(append, encoding)?;
    match fs.echo(data, file, options).await.into_result()? {
        Echoed::PassedThrough(data) => {
            let bytes = data.to_bytes(options.encoding)?;
            to_stdout(&bytes)?;
            println!();
        }
        Echoed::Written(n) => {
            if let Some(file) = file {
                println!("Wrote {} to {}", bytesize::ByteSize(n), file.display());
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Copy files or trees
pub async fn cp(fs: &Iofs, source: &Path, dest: &Path) -> IofsResult<ExitCode> {
    let report = fs.cp(source, dest).await.into_result()?;
    report_failures(&report);
    println!(
        "Copied {} -> {} ({} files, {} directories, {})",
        source.display(),
        dest.display(),
        report.files,
        report.directories,
        bytesize::ByteSize(report.bytes)
    );
    Ok(exit_code(report.is_complete()))
}

/// Move/rename files
pub async fn mv(fs: &Iofs, source: &Path, dest: &Path) -> IofsResult<ExitCode> {
    fs.mv(source, dest).await.into_result()?;
    println!("Moved {} -> {}", source.display(), dest.display());
    Ok(ExitCode::SUCCESS)
}

/// Remove files or trees
///
/// Every path is attempted; the exit status reports whether all of them went.
pub async fn rm(fs: &Iofs, paths: &[PathBuf]) -> IofsResult<ExitCode> {
    let mut ok = true;
    for path in paths {
        match fs.rm(path).await {
            Outcome::Success(()) => println!("Removed {}", path.display()),
            Outcome::Failure(e) => {
                eprintln!("{} {e}", style("Error:").red().bold());
                ok = false;
            }
        }
    }
    Ok(exit_code(ok))
}

/// Show file/directory information
pub async fn stat(fs: &Iofs, path: &Path, no_follow: bool) -> IofsResult<ExitCode> {
    let result = if no_follow {
        fs.lstat(path).await
    } else {
        fs.stat(path).await
    };

    let Some(meta) = result.metadata() else {
        return Err(IofsError::NotFound(path.to_path_buf()));
    };

    println!("  Path: {}", path.display());
    println!("  Type: {:?}", result.kind());
    println!("  Size: {} ({})", meta.size, bytesize::ByteSize(meta.size));
    if let Some(perms) = meta.permissions {
        println!("  Mode: {:o} ({})", perms.bits(), perms.symbolic());
    }
    if let (Some(uid), Some(gid)) = (meta.uid, meta.gid) {
        println!("  Owner: {uid}:{gid}");
    }
    if let Some(modified) = meta.modified {
        println!("  Modified: {modified}");
    }
    if let Some(accessed) = meta.accessed {
        println!("  Accessed: {accessed}");
    }
    if let Some(created) = meta.created {
        println!("  Created: {created}");
    }
    Ok(ExitCode::SUCCESS)
}

/// Create directories
pub async fn mkdir(fs: &Iofs, paths: &[PathBuf], mode: Option<u32>) -> IofsResult<ExitCode> {
    for path in paths {
        let outcome = match mode {
            Some(mode) => fs.mkdir_with_mode(path, mode).await,
            None => fs.mkdir(path).await,
        };
        outcome.into_result()?;
        println!("Created {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn chmod(fs: &Iofs, path: &Path, mode: u32) -> IofsResult<ExitCode> {
    fs.chmod(path, mode).await.into_result()?;
    Ok(ExitCode::SUCCESS)
}

pub async fn chown(fs: &Iofs, path: &Path, uid: Option<u32>, gid: Option<u32>) -> IofsResult<ExitCode> {
    fs.chown(path, uid, gid).await.into_result()?;
    Ok(ExitCode::SUCCESS)
}

pub async fn exists(fs: &Iofs, path: &Path) -> IofsResult<ExitCode> {
    Ok(exit_code(fs.exists(path).await))
}

pub async fn access(fs: &Iofs, path: &Path, read: bool, write: bool, execute: bool) -> IofsResult<ExitCode> {
    let mut mode = AccessMode::EXISTS;
    if read {
        mode = mode | AccessMode::READ;
    }
    if write {
        mode = mode | AccessMode::WRITE;
    }
    if execute {
        mode = mode | AccessMode::EXECUTE;
    }
    Ok(exit_code(fs.is(path, mode).await))
}

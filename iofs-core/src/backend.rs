// SPDX-License-Identifier: AGPL-3.0-or-later
//! Filesystem backend trait
//!
//! A backend is the thin layer of raw, per-entry OS calls. It reports every
//! failure as an error; masking, recursion and ancestor creation are layered
//! on top of it by the `iofs` crate.

use async_trait::async_trait;
use bytes::Bytes;
use std::ffi::OsString;
use std::path::Path;

use crate::{error::IofsResult, operations::AccessMode, StatResult};

/// Backend capabilities
///
/// Operations the backend cannot perform fail with
/// [`crate::IofsError::Unsupported`] before any call is made.
#[derive(Debug, Clone, Default)]
pub struct BackendCapabilities {
    /// `chmod` is available.
    pub permissions: bool,
    /// `chown` is available.
    pub ownership: bool,
    /// `rename` can move entries; without it `mv` always copies then deletes.
    pub atomic_rename: bool,
}

impl BackendCapabilities {
    pub fn local_filesystem() -> Self {
        Self {
            permissions: cfg!(unix),
            ownership: cfg!(unix),
            atomic_rename: true,
        }
    }
}

/// Raw filesystem primitives
#[async_trait]
pub trait FsBackend: Send + Sync {
    /// Name used in log output and diagnostics.
    fn id(&self) -> &str;
    fn capabilities(&self) -> &BackendCapabilities;

    /// Stat following symlinks. A missing path is an error here, not `Absent`.
    async fn stat(&self, path: &Path) -> IofsResult<StatResult>;

    /// Stat without following a final symlink.
    async fn lstat(&self, path: &Path) -> IofsResult<StatResult>;

    /// Names of the immediate children of `path`, in the order the OS yields
    /// them. Never contains `.` or `..`.
    async fn read_dir(&self, path: &Path) -> IofsResult<Vec<OsString>>;

    async fn read(&self, path: &Path) -> IofsResult<Bytes>;

    /// Write `data`, truncating unless `append` is set. Creates the file but
    /// not its parent.
    async fn write(&self, path: &Path, data: Bytes, append: bool) -> IofsResult<u64>;

    /// Stream `origin` into `target` through a buffer of `buffer_size` bytes.
    /// Returns the number of bytes copied.
    async fn copy_file(&self, origin: &Path, target: &Path, buffer_size: usize) -> IofsResult<u64>;

    async fn create_dir_all(&self, path: &Path, mode: u32) -> IofsResult<()>;

    /// Atomic rename. A rename across volumes fails with
    /// [`crate::IofsError::CrossDevice`].
    async fn rename(&self, origin: &Path, target: &Path) -> IofsResult<()>;

    async fn remove_file(&self, path: &Path) -> IofsResult<()>;
    async fn remove_dir_all(&self, path: &Path) -> IofsResult<()>;

    async fn set_mode(&self, path: &Path, mode: u32) -> IofsResult<()>;
    async fn chown(&self, path: &Path, uid: Option<u32>, gid: Option<u32>) -> IofsResult<()>;

    /// `Ok(())` when the calling process has `mode` access to `path`.
    async fn access(&self, path: &Path, mode: AccessMode) -> IofsResult<()>;
}

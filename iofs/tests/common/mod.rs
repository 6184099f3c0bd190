// SPDX-License-Identifier: AGPL-3.0-or-later
//! Shared fixtures for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use iofs::{AccessMode, BackendCapabilities, FsBackend, IofsError, IofsResult, LocalBackend, StatResult};
use std::ffi::OsString;
use std::path::Path;

/// Permission based checks are meaningless for root.
pub fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions.
    unsafe { libc::geteuid() == 0 }
}

/// Write a file, creating its parents.
pub fn put(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, data).unwrap();
}

/// Local backend whose renames always look like they cross a volume boundary.
pub struct CrossDeviceBackend {
    inner: LocalBackend,
}

impl CrossDeviceBackend {
    pub fn new() -> Self {
        Self { inner: LocalBackend::with_id("cross-device") }
    }
}

#[async_trait]
impl FsBackend for CrossDeviceBackend {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn capabilities(&self) -> &BackendCapabilities {
        self.inner.capabilities()
    }

    async fn stat(&self, path: &Path) -> IofsResult<StatResult> {
        self.inner.stat(path).await
    }

    async fn lstat(&self, path: &Path) -> IofsResult<StatResult> {
        self.inner.lstat(path).await
    }

    async fn read_dir(&self, path: &Path) -> IofsResult<Vec<OsString>> {
        self.inner.read_dir(path).await
    }

    async fn read(&self, path: &Path) -> IofsResult<Bytes> {
        self.inner.read(path).await
    }

    async fn write(&self, path: &Path, data: Bytes, append: bool) -> IofsResult<u64> {
        self.inner.write(path, data, append).await
    }

    async fn copy_file(&self, origin: &Path, target: &Path, buffer_size: usize) -> IofsResult<u64> {
        self.inner.copy_file(origin, target, buffer_size).await
    }

    async fn create_dir_all(&self, path: &Path, mode: u32) -> IofsResult<()> {
        self.inner.create_dir_all(path, mode).await
    }

    async fn rename(&self, origin: &Path, target: &Path) -> IofsResult<()> {
        Err(IofsError::CrossDevice {
            from: origin.to_path_buf(),
            to: target.to_path_buf(),
        })
    }

    async fn remove_file(&self, path: &Path) -> IofsResult<()> {
        self.inner.remove_file(path).await
    }

    async fn remove_dir_all(&self, path: &Path) -> IofsResult<()> {
        self.inner.remove_dir_all(path).await
    }

    async fn set_mode(&self, path: &Path, mode: u32) -> IofsResult<()> {
        self.inner.set_mode(path, mode).await
    }

    async fn chown(&self, path: &Path, uid: Option<u32>, gid: Option<u32>) -> IofsResult<()> {
        self.inner.chown(path, uid, gid).await
    }

    async fn access(&self, path: &Path, mode: AccessMode) -> IofsResult<()> {
        self.inner.access(path, mode).await
    }
}

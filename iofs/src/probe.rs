// SPDX-License-Identifier: AGPL-3.0-or-later
//! Stat probe: `stat`, `lstat`, `isdir`, `isfile`, `exists`, `is`

use crate::{AccessMode, FsBackend, Iofs, StatResult};
use std::path::Path;

impl<B: FsBackend> Iofs<B> {
    /// Stat `path`, following symlinks. Never fails: any error is `Absent`.
    pub async fn stat(&self, path: impl AsRef<Path>) -> StatResult {
        let path = path.as_ref();
        match self.backend.stat(path).await {
            Ok(stat) => stat,
            Err(e) => {
                tracing::trace!(path = %path.display(), error = %e, "stat collapsed to absent");
                StatResult::Absent
            }
        }
    }

    /// Like [`Iofs::stat`] but reports a symlink itself instead of its target.
    pub async fn lstat(&self, path: impl AsRef<Path>) -> StatResult {
        let path = path.as_ref();
        match self.backend.lstat(path).await {
            Ok(stat) => stat,
            Err(e) => {
                tracing::trace!(path = %path.display(), error = %e, "lstat collapsed to absent");
                StatResult::Absent
            }
        }
    }

    pub async fn isdir(&self, path: impl AsRef<Path>) -> bool {
        self.stat(path).await.is_directory()
    }

    pub async fn isfile(&self, path: impl AsRef<Path>) -> bool {
        self.stat(path).await.is_file()
    }

    pub async fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.is(path, AccessMode::EXISTS).await
    }

    /// Whether the current process has `mode` access to `path`.
    pub async fn is(&self, path: impl AsRef<Path>, mode: AccessMode) -> bool {
        self.backend.access(path.as_ref(), mode).await.is_ok()
    }
}

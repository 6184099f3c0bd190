// SPDX-License-Identifier: AGPL-3.0-or-later
//! Move with cross-device fallback

use crate::{mask, FsBackend, Iofs, IofsResult, Outcome};
use std::path::Path;

impl<B: FsBackend> Iofs<B> {
    /// Move or rename `origin` to `target`.
    ///
    /// Tries an atomic rename first, if the backend has one. When the two paths are on different
    /// volumes the move becomes a copy followed by removal of `origin`;
    /// `origin` is only removed once every entry was copied.
    pub async fn mv(&self, origin: impl AsRef<Path>, target: impl AsRef<Path>) -> Outcome {
        let (origin, target) = (origin.as_ref(), target.as_ref());
        tracing::debug!(from = %origin.display(), to = %target.display(), "mv");
        mask("mv", self.move_path(origin, target).await)
    }

    async fn move_path(&self, origin: &Path, target: &Path) -> IofsResult<()> {
        self.ensure_parent(target).await?;
        if !self.backend.capabilities().atomic_rename {
            return self.move_by_copy(origin, target).await;
        }
        match self.backend.rename(origin, target).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_cross_device() => {
                tracing::info!(
                    backend = self.backend.id(),
                    from = %origin.display(),
                    to = %target.display(),
                    "rename crossed devices, falling back to copy and delete"
                );
                self.move_by_copy(origin, target).await
            }
            Err(e) => Err(e),
        }
    }

    async fn move_by_copy(&self, origin: &Path, target: &Path) -> IofsResult<()> {
        let report = self.copy_checked(origin, target).await?;

        let failed = report.failures.len();
        if let Some((path, e)) = report.failures.into_iter().next() {
            tracing::warn!(
                from = %origin.display(),
                failed,
                first = %path.display(),
                "copy incomplete, keeping the original"
            );
            return Err(e);
        }
        self.remove(origin).await
    }
}

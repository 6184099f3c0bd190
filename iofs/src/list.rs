// SPDX-License-Identifier: AGPL-3.0-or-later
//! Directory lister

use crate::{mask, FsBackend, Iofs, IofsResult, Outcome};
use futures::future::{BoxFuture, FutureExt};
use iofs_core::path;
use std::path::{Path, PathBuf};

impl<B: FsBackend> Iofs<B> {
    /// List the children of `dir` as absolute paths.
    ///
    /// With `recursive`, every child directory's listing follows the
    /// immediate children, subtree by subtree in listing order. An unreadable
    /// subdirectory is logged and skipped. Symlinked directories are
    /// followed, so a link cycle does not terminate.
    pub async fn ls(&self, dir: impl AsRef<Path>, recursive: bool) -> Outcome<Vec<PathBuf>> {
        let dir = dir.as_ref();
        tracing::debug!(dir = %dir.display(), recursive, "ls");
        mask("ls", self.list(dir.to_path_buf(), recursive).await)
    }

    pub(crate) fn list(&self, dir: PathBuf, recursive: bool) -> BoxFuture<'_, IofsResult<Vec<PathBuf>>> {
        self.list_dir(dir, recursive).boxed()
    }

    async fn list_dir(&self, dir: PathBuf, recursive: bool) -> IofsResult<Vec<PathBuf>> {
        let base = path::absolute(&dir)?;
        let children = self
            .backend
            .read_dir(&base)
            .await?
            .into_iter()
            .map(|name| path::resolve(&base, name))
            .collect::<IofsResult<Vec<PathBuf>>>()?;

        if !recursive {
            return Ok(children);
        }

        let mut listing = children.clone();
        for child in children {
            if !self.isdir(&child).await {
                continue;
            }
            match self.list(child.clone(), true).await {
                Ok(nested) => listing.extend(nested),
                Err(e) => {
                    tracing::warn!(dir = %child.display(), error = %e, "skipping unreadable directory");
                }
            }
        }
        Ok(listing)
    }
}

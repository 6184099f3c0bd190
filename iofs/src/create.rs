// SPDX-License-Identifier: AGPL-3.0-or-later
//! Ancestor creation

use crate::{mask, FsBackend, Iofs, IofsResult, Outcome};
use iofs_core::path;
use std::path::Path;

impl<B: FsBackend> Iofs<B> {
    /// Create `dir` and every missing ancestor with the configured mode.
    /// Succeeds when the directory already exists.
    pub async fn mkdir(&self, dir: impl AsRef<Path>) -> Outcome {
        self.mkdir_with_mode(dir, self.config.dir_mode).await
    }

    pub async fn mkdir_with_mode(&self, dir: impl AsRef<Path>, mode: u32) -> Outcome {
        let dir = dir.as_ref();
        tracing::debug!(dir = %dir.display(), mode = format_args!("{mode:o}"), "mkdir");
        mask("mkdir", self.create_dirs(dir, mode).await)
    }

    pub(crate) async fn create_dirs(&self, dir: &Path, mode: u32) -> IofsResult<()> {
        path::require_non_empty(dir)?;
        self.backend.create_dir_all(dir, mode).await
    }

    /// Make sure the directory `target` will be written into exists.
    pub(crate) async fn ensure_parent(&self, target: &Path) -> IofsResult<()> {
        match path::parent_dir(target) {
            Some(parent) if !self.isdir(parent).await => {
                tracing::trace!(dir = %parent.display(), "creating missing ancestors");
                self.create_dirs(parent, self.config.dir_mode).await
            }
            _ => Ok(()),
        }
    }
}

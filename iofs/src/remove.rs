// SPDX-License-Identifier: AGPL-3.0-or-later
//! Delete

use crate::{mask, FsBackend, Iofs, IofsResult, Outcome};
use std::path::Path;

impl<B: FsBackend> Iofs<B> {
    /// Delete a file, or a directory together with everything below it.
    pub async fn rm(&self, path: impl AsRef<Path>) -> Outcome {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "rm");
        mask("rm", self.remove(path).await)
    }

    // lstat: a symlink is unlinked, never the tree it points at
    pub(crate) async fn remove(&self, path: &Path) -> IofsResult<()> {
        if self.lstat(path).await.is_directory() {
            self.backend.remove_dir_all(path).await
        } else {
            self.backend.remove_file(path).await
        }
    }
}

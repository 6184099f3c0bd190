// SPDX-License-Identifier: AGPL-3.0-or-later
//! Recursive copy

use crate::{mask, CopyReport, FsBackend, Iofs, IofsError, IofsResult, Outcome};
use futures::future::{BoxFuture, FutureExt};
use iofs_core::path;
use std::path::{Path, PathBuf};

impl<B: FsBackend> Iofs<B> {
    /// Copy a file or a whole directory tree from `origin` to `target`.
    ///
    /// Directories are mirrored child by child, one entry at a time. A child
    /// that fails is logged and recorded in [`CopyReport::failures`] while its
    /// siblings are still copied, and nothing already copied is rolled back.
    /// Success means the traversal completed.
    pub async fn cp(&self, origin: impl AsRef<Path>, target: impl AsRef<Path>) -> Outcome<CopyReport> {
        let (origin, target) = (origin.as_ref(), target.as_ref());
        tracing::debug!(from = %origin.display(), to = %target.display(), "cp");
        mask("cp", self.copy_checked(origin, target).await)
    }

    /// Copy after refusing targets that are, by name or by identity, the
    /// origin itself or inside it.
    pub(crate) async fn copy_checked(&self, origin: &Path, target: &Path) -> IofsResult<CopyReport> {
        check_copy_paths(origin, target)?;
        self.check_distinct_entries(origin, target).await?;
        self.copy_tree(origin.to_path_buf(), target.to_path_buf()).await
    }

    /// Reject a target that resolves to the same entry as `origin`, such as
    /// a symlink or hard link to it. Writing it would truncate the source.
    async fn check_distinct_entries(&self, origin: &Path, target: &Path) -> IofsResult<()> {
        let (origin_stat, target_stat) = (self.stat(origin).await, self.stat(target).await);
        if let (Some(o), Some(t)) = (origin_stat.metadata(), target_stat.metadata()) {
            if o.is_same_entry(t) {
                return Err(IofsError::Configuration(format!(
                    "{} is the same file as {}",
                    target.display(),
                    origin.display()
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn copy_tree(&self, origin: PathBuf, target: PathBuf) -> BoxFuture<'_, IofsResult<CopyReport>> {
        self.copy_entry(origin, target).boxed()
    }

    async fn copy_entry(&self, origin: PathBuf, target: PathBuf) -> IofsResult<CopyReport> {
        let mut report = CopyReport::default();

        if !self.isdir(&origin).await {
            self.check_distinct_entries(&origin, &target).await?;
            self.ensure_parent(&target).await?;
            report.bytes = self
                .backend
                .copy_file(&origin, &target, self.config.copy_buffer_size)
                .await?;
            report.files = 1;
            return Ok(report);
        }

        self.create_dirs(&target, self.config.dir_mode).await?;
        report.directories = 1;

        for child in self.list(origin, false).await? {
            let child_target = path::mirror(&child, &target)?;
            match self.copy_tree(child.clone(), child_target).await {
                Ok(nested) => report.merge(nested),
                Err(e) => {
                    tracing::warn!(path = %child.display(), error = %e, "copy failed, continuing with siblings");
                    report.failures.push((child, e));
                }
            }
        }
        Ok(report)
    }
}

/// Reject copies onto the origin itself or into its own subtree, which would
/// truncate the source or never terminate.
fn check_copy_paths(origin: &Path, target: &Path) -> IofsResult<()> {
    let origin_abs = path::absolute(origin)?;
    let target_abs = path::absolute(target)?;
    if origin_abs == target_abs {
        return Err(IofsError::Configuration(format!(
            "cannot copy {} onto itself",
            origin.display()
        )));
    }
    if target_abs.starts_with(&origin_abs) {
        return Err(IofsError::Configuration(format!(
            "cannot copy {} into its own subtree {}",
            origin.display(),
            target.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_copy_paths() {
        assert!(check_copy_paths(Path::new("/a/b"), Path::new("/a/c")).is_ok());
        assert!(check_copy_paths(Path::new("/a/b"), Path::new("/a/bc")).is_ok());
        assert!(check_copy_paths(Path::new("/a/b"), Path::new("/a/./b")).is_err());
        assert!(check_copy_paths(Path::new("/a/b"), Path::new("/a/b/c")).is_err());
        assert!(check_copy_paths(Path::new(""), Path::new("/a")).is_err());
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//! Lexical path helpers
//!
//! Nothing here touches the filesystem except [`absolute`], which reads the
//! current working directory for relative inputs.

use crate::error::{IofsError, IofsResult};
use std::path::{Component, Path, PathBuf};

/// Collapse `.` and `..` components without resolving symlinks.
///
/// `..` at the root stays at the root; leading `..` on a relative path is
/// kept, since there is nothing to pop.
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Make `path` absolute against the current directory and normalize it.
pub fn absolute(path: impl AsRef<Path>) -> IofsResult<PathBuf> {
    let path = path.as_ref();
    require_non_empty(path)?;
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    let cwd = std::env::current_dir().map_err(|e| IofsError::from_io(e, "."))?;
    Ok(normalize(cwd.join(path)))
}

/// Absolute path of entry `name` inside `dir`.
pub fn resolve(dir: impl AsRef<Path>, name: impl AsRef<Path>) -> IofsResult<PathBuf> {
    absolute(dir.as_ref().join(name))
}

/// The directory that has to exist before `path` can be written.
///
/// `None` for a bare file name (its parent is the current directory) and for
/// the filesystem root.
pub fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

/// `target/<name of child>`, used when mirroring a directory tree.
pub fn mirror(child: &Path, target: &Path) -> IofsResult<PathBuf> {
    let name = child.file_name().ok_or_else(|| {
        IofsError::Configuration(format!("{} has no file name", child.display()))
    })?;
    Ok(target.join(name))
}

/// Reject empty paths, which the OS would report with a confusing error.
pub fn require_non_empty(path: &Path) -> IofsResult<()> {
    if path.as_os_str().is_empty() {
        return Err(IofsError::Configuration("empty path".into()));
    }
    Ok(())
}

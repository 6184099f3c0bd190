// SPDX-License-Identifier: AGPL-3.0-or-later
//! Local filesystem backend

use async_trait::async_trait;
use bytes::Bytes;
use iofs_core::{
    backend::{BackendCapabilities, FsBackend},
    error::{IofsError, IofsResult},
    metadata::{Metadata, Permissions},
    operations::AccessMode,
    stat::{EntryKind, StatResult},
};
use std::ffi::OsString;
use std::io;
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufReader};

/// Local filesystem backend
pub struct LocalBackend {
    id: String,
    capabilities: BackendCapabilities,
}

impl LocalBackend {
    pub fn new() -> Self {
        Self::with_id("local")
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            capabilities: BackendCapabilities::local_filesystem(),
        }
    }

    /// Override what this backend advertises, e.g. to run on a mount without
    /// ownership support.
    pub fn with_capabilities(mut self, capabilities: BackendCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn stat_from_metadata(meta: &std::fs::Metadata) -> StatResult {
    let file_type = meta.file_type();
    let kind = if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else if file_type.is_symlink() {
        EntryKind::Symlink
    } else if is_socket(&file_type) {
        EntryKind::Socket
    } else {
        EntryKind::Other
    };

    let mut metadata = Metadata::new().with_size(meta.len());

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        metadata.permissions = Some(Permissions::new(meta.mode()));
        metadata.uid = Some(meta.uid());
        metadata.gid = Some(meta.gid());
        metadata.device = Some(meta.dev());
        metadata.inode = Some(meta.ino());
    }
    #[cfg(not(unix))]
    {
        let mode = if meta.permissions().readonly() { 0o444 } else { 0o666 };
        metadata.permissions = Some(Permissions::new(mode));
    }

    if let Ok(modified) = meta.modified() {
        metadata.modified = Some(modified.into());
    }
    if let Ok(accessed) = meta.accessed() {
        metadata.accessed = Some(accessed.into());
    }
    if let Ok(created) = meta.created() {
        metadata.created = Some(created.into());
    }

    StatResult::from_kind(kind, metadata)
}

#[cfg(unix)]
fn is_socket(file_type: &std::fs::FileType) -> bool {
    use std::os::unix::fs::FileTypeExt;
    file_type.is_socket()
}

#[cfg(not(unix))]
fn is_socket(_file_type: &std::fs::FileType) -> bool {
    false
}

fn is_exdev(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::EXDEV)
}

/// Run a blocking std call off the runtime threads.
async fn blocking<T, F>(path: &Path, f: F) -> IofsResult<T>
where
    F: FnOnce() -> io::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| IofsError::Io {
            path: path.to_path_buf(),
            source: io::Error::other(e),
        })?
        .map_err(|e| IofsError::from_io(e, path))
}

#[async_trait]
impl FsBackend for LocalBackend {
    fn id(&self) -> &str {
        &self.id
    }

    fn capabilities(&self) -> &BackendCapabilities {
        &self.capabilities
    }

    async fn stat(&self, path: &Path) -> IofsResult<StatResult> {
        let meta = fs::metadata(path)
            .await
            .map_err(|e| IofsError::from_io(e, path))?;
        Ok(stat_from_metadata(&meta))
    }

    async fn lstat(&self, path: &Path) -> IofsResult<StatResult> {
        let meta = fs::symlink_metadata(path)
            .await
            .map_err(|e| IofsError::from_io(e, path))?;
        Ok(stat_from_metadata(&meta))
    }

    async fn read_dir(&self, path: &Path) -> IofsResult<Vec<OsString>> {
        let err = |e| IofsError::from_io(e, path);
        let mut names = Vec::new();
        let mut read_dir = fs::read_dir(path).await.map_err(err)?;
        while let Some(entry) = read_dir.next_entry().await.map_err(err)? {
            names.push(entry.file_name());
        }
        Ok(names)
    }

    async fn read(&self, path: &Path) -> IofsResult<Bytes> {
        let data = fs::read(path)
            .await
            .map_err(|e| IofsError::from_io(e, path))?;
        Ok(Bytes::from(data))
    }

    async fn write(&self, path: &Path, data: Bytes, append: bool) -> IofsResult<u64> {
        let err = |e| IofsError::from_io(e, path);
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)
            .await
            .map_err(err)?;
        file.write_all(&data).await.map_err(err)?;
        file.flush().await.map_err(err)?;
        Ok(data.len() as u64)
    }

    async fn copy_file(&self, origin: &Path, target: &Path, buffer_size: usize) -> IofsResult<u64> {
        let source = fs::File::open(origin)
            .await
            .map_err(|e| IofsError::from_io(e, origin))?;
        let mut reader = BufReader::with_capacity(buffer_size, source);
        let mut dest = fs::File::create(target)
            .await
            .map_err(|e| IofsError::from_io(e, target))?;

        let copied = tokio::io::copy_buf(&mut reader, &mut dest)
            .await
            .map_err(|e| IofsError::from_io(e, origin))?;
        dest.flush().await.map_err(|e| IofsError::from_io(e, target))?;
        Ok(copied)
    }

    async fn create_dir_all(&self, path: &Path, mode: u32) -> IofsResult<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(mode);
        #[cfg(not(unix))]
        let _ = mode;
        builder
            .create(path)
            .await
            .map_err(|e| IofsError::from_io(e, path))
    }

    async fn rename(&self, origin: &Path, target: &Path) -> IofsResult<()> {
        match fs::rename(origin, target).await {
            Ok(()) => Ok(()),
            Err(e) if is_exdev(&e) => {
                tracing::debug!(from = %origin.display(), to = %target.display(), "rename crossed a device boundary");
                Err(IofsError::CrossDevice {
                    from: origin.to_path_buf(),
                    to: target.to_path_buf(),
                })
            }
            Err(e) => Err(IofsError::from_io(e, origin)),
        }
    }

    async fn remove_file(&self, path: &Path) -> IofsResult<()> {
        fs::remove_file(path)
            .await
            .map_err(|e| IofsError::from_io(e, path))
    }

    async fn remove_dir_all(&self, path: &Path) -> IofsResult<()> {
        fs::remove_dir_all(path)
            .await
            .map_err(|e| IofsError::from_io(e, path))
    }

    #[cfg(unix)]
    async fn set_mode(&self, path: &Path, mode: u32) -> IofsResult<()> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
            .await
            .map_err(|e| IofsError::from_io(e, path))
    }

    #[cfg(not(unix))]
    async fn set_mode(&self, _path: &Path, _mode: u32) -> IofsResult<()> {
        Err(IofsError::Unsupported("chmod on this platform".into()))
    }

    #[cfg(unix)]
    async fn chown(&self, path: &Path, uid: Option<u32>, gid: Option<u32>) -> IofsResult<()> {
        let owned = path.to_path_buf();
        blocking(path, move || std::os::unix::fs::chown(owned, uid, gid)).await
    }

    #[cfg(not(unix))]
    async fn chown(&self, _path: &Path, _uid: Option<u32>, _gid: Option<u32>) -> IofsResult<()> {
        Err(IofsError::Unsupported("chown on this platform".into()))
    }

    #[cfg(unix)]
    async fn access(&self, path: &Path, mode: AccessMode) -> IofsResult<()> {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| {
            IofsError::Configuration(format!("{} contains a NUL byte", path.display()))
        })?;

        let mut flags = libc::F_OK;
        if mode.contains(AccessMode::READ) {
            flags |= libc::R_OK;
        }
        if mode.contains(AccessMode::WRITE) {
            flags |= libc::W_OK;
        }
        if mode.contains(AccessMode::EXECUTE) {
            flags |= libc::X_OK;
        }

        blocking(path, move || {
            // SAFETY: c_path is a valid NUL-terminated string that outlives the call.
            if unsafe { libc::access(c_path.as_ptr(), flags) } == 0 {
                Ok(())
            } else {
                Err(io::Error::last_os_error())
            }
        })
        .await
    }

    #[cfg(not(unix))]
    async fn access(&self, path: &Path, mode: AccessMode) -> IofsResult<()> {
        let meta = fs::metadata(path)
            .await
            .map_err(|e| IofsError::from_io(e, path))?;
        if mode.contains(AccessMode::WRITE) && meta.permissions().readonly() {
            return Err(IofsError::PermissionDenied(path.to_path_buf()));
        }
        Ok(())
    }
}

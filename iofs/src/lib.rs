// SPDX-License-Identifier: AGPL-3.0-or-later
//! iofs
//!
//! Recursive, asynchronous file and directory operations that report failure
//! as values. Every operation re-probes the filesystem, creates missing
//! parent directories before it writes, and logs the cause of any failure it
//! masks.
//!
//! ```no_run
//! # async fn demo() {
//! use iofs::{Iofs, WriteOptions};
//! use std::path::Path;
//!
//! let fs = Iofs::local();
//! let out = Path::new("out/sub/file.txt");
//! assert!(fs.echo("hello", Some(out), WriteOptions::default()).await.is_success());
//! assert!(fs.isdir("out/sub").await);
//! # }
//! ```

mod copy;
mod create;
mod io;
mod list;
mod mv;
mod perms;
mod probe;
mod remove;

pub use iofs_core::{
    AccessMode, AppendOrEncoding, BackendCapabilities, CopyReport, EchoData, Echoed, Encoding,
    EntryKind, FsBackend, IofsConfig, IofsError, IofsResult, Metadata, Outcome, Permissions,
    StatResult, WriteOptions, DEFAULT_COPY_BUFFER_SIZE, DEFAULT_DIR_MODE,
};
pub use iofs_local::LocalBackend;

/// Path operations over a filesystem backend
///
/// Holds no state besides its configuration; the filesystem is the only
/// source of truth and nothing is cached between calls.
pub struct Iofs<B: FsBackend = LocalBackend> {
    backend: B,
    config: IofsConfig,
}

impl Iofs<LocalBackend> {
    /// Operations on the local filesystem with the default configuration.
    pub fn local() -> Self {
        Self::new(LocalBackend::new())
    }
}

impl<B: FsBackend> Iofs<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            config: IofsConfig::default(),
        }
    }

    pub fn with_config(backend: B, config: IofsConfig) -> IofsResult<Self> {
        config.validate()?;
        Ok(Self { backend, config })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &IofsConfig {
        &self.config
    }
}

/// Turn a result into an outcome, logging the failure it hides.
pub(crate) fn mask<T>(op: &'static str, result: IofsResult<T>) -> Outcome<T> {
    if let Err(e) = &result {
        tracing::warn!(op, error = %e, "operation failed");
    }
    result.into()
}

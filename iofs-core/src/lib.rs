// SPDX-License-Identifier: AGPL-3.0-or-later
//! iofs core
//!
//! Core traits and types shared by the filesystem backends and the masked
//! path operation layer.

pub mod backend;
pub mod encoding;
pub mod error;
pub mod metadata;
pub mod operations;
pub mod outcome;
pub mod path;
pub mod stat;

pub use backend::{BackendCapabilities, FsBackend};
pub use encoding::Encoding;
pub use error::{IofsError, IofsResult};
pub use metadata::{Metadata, Permissions};
pub use operations::{
    AccessMode, AppendOrEncoding, CopyReport, EchoData, Echoed, IofsConfig, WriteOptions,
    DEFAULT_COPY_BUFFER_SIZE, DEFAULT_DIR_MODE,
};
pub use outcome::Outcome;
pub use stat::{EntryKind, StatResult};

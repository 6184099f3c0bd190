// SPDX-License-Identifier: AGPL-3.0-or-later
//! Operation options and reports

use crate::encoding::Encoding;
use crate::error::{IofsError, IofsResult};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::ops::BitOr;
use std::path::PathBuf;

/// Default mode for directories created by `mkdir` and ancestor creation
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Default buffer size for streaming file copies
pub const DEFAULT_COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Per-instance configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IofsConfig {
    pub dir_mode: u32,
    pub copy_buffer_size: usize,
}

impl Default for IofsConfig {
    fn default() -> Self {
        Self {
            dir_mode: DEFAULT_DIR_MODE,
            copy_buffer_size: DEFAULT_COPY_BUFFER_SIZE,
        }
    }
}

impl IofsConfig {
    pub fn validate(&self) -> IofsResult<()> {
        if self.copy_buffer_size == 0 {
            return Err(IofsError::Configuration("copy_buffer_size must be non-zero".into()));
        }
        if self.dir_mode > 0o7777 {
            return Err(IofsError::Configuration(format!(
                "dir_mode {:o} has bits outside 0o7777",
                self.dir_mode
            )));
        }
        Ok(())
    }
}

/// The overloaded third argument of `echo`: either an append flag or an
/// encoding name given in its place
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOrEncoding {
    Append(bool),
    Encoding(String),
}

impl From<bool> for AppendOrEncoding {
    fn from(append: bool) -> Self {
        AppendOrEncoding::Append(append)
    }
}

impl From<&str> for AppendOrEncoding {
    fn from(encoding: &str) -> Self {
        AppendOrEncoding::Encoding(encoding.to_string())
    }
}

impl From<String> for AppendOrEncoding {
    fn from(encoding: String) -> Self {
        AppendOrEncoding::Encoding(encoding)
    }
}

/// Resolved `echo` write configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOptions {
    pub append: bool,
    pub encoding: Option<Encoding>,
}

impl WriteOptions {
    pub fn append() -> Self {
        Self { append: true, encoding: None }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Resolve the positional `(append, encoding)` pair.
    ///
    /// A non-empty string in the append position is the encoding, the
    /// trailing `encoding` is then ignored and append is off. An empty string
    /// counts as `append = false`.
    pub fn resolve(
        append: impl Into<AppendOrEncoding>,
        encoding: Option<&str>,
    ) -> IofsResult<Self> {
        match append.into() {
            AppendOrEncoding::Encoding(name) if !name.is_empty() => Ok(Self {
                append: false,
                encoding: Some(name.parse()?),
            }),
            AppendOrEncoding::Encoding(_) => Ok(Self {
                append: false,
                encoding: encoding.map(str::parse::<Encoding>).transpose()?,
            }),
            AppendOrEncoding::Append(append) => Ok(Self {
                append,
                encoding: encoding.map(str::parse::<Encoding>).transpose()?,
            }),
        }
    }
}

/// Data handed to `echo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EchoData {
    Text(String),
    Bytes(Bytes),
}

impl EchoData {
    /// Bytes to write. The encoding only applies to text; raw bytes are
    /// written as given.
    pub fn to_bytes(&self, encoding: Option<Encoding>) -> IofsResult<Bytes> {
        match self {
            EchoData::Text(text) => match encoding {
                Some(encoding) => encoding.encode(text).map(Bytes::from),
                None => Ok(Bytes::copy_from_slice(text.as_bytes())),
            },
            EchoData::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

impl From<&str> for EchoData {
    fn from(text: &str) -> Self {
        EchoData::Text(text.to_string())
    }
}

impl From<String> for EchoData {
    fn from(text: String) -> Self {
        EchoData::Text(text)
    }
}

impl From<Vec<u8>> for EchoData {
    fn from(bytes: Vec<u8>) -> Self {
        EchoData::Bytes(Bytes::from(bytes))
    }
}

impl From<&[u8]> for EchoData {
    fn from(bytes: &[u8]) -> Self {
        EchoData::Bytes(Bytes::copy_from_slice(bytes))
    }
}

impl From<Bytes> for EchoData {
    fn from(bytes: Bytes) -> Self {
        EchoData::Bytes(bytes)
    }
}

/// What `echo` did with its data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Echoed {
    /// No target file was given; the data comes back untouched.
    PassedThrough(EchoData),
    /// Number of bytes written to the target.
    Written(u64),
}

/// Access check mode for `is`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessMode(u8);

impl AccessMode {
    pub const EXISTS: AccessMode = AccessMode(0);
    pub const EXECUTE: AccessMode = AccessMode(1);
    pub const WRITE: AccessMode = AccessMode(2);
    pub const READ: AccessMode = AccessMode(4);

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn contains(&self, other: AccessMode) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for AccessMode {
    type Output = AccessMode;

    fn bitor(self, rhs: Self) -> Self::Output {
        AccessMode(self.0 | rhs.0)
    }
}

/// Summary of a (possibly recursive) copy
#[derive(Debug, Default)]
pub struct CopyReport {
    pub files: usize,
    pub directories: usize,
    pub bytes: u64,
    /// Entries that could not be copied; siblings were still attempted.
    pub failures: Vec<(PathBuf, IofsError)>,
}

impl CopyReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn merge(&mut self, other: CopyReport) {
        self.files += other.files;
        self.directories += other.directories;
        self.bytes += other.bytes;
        self.failures.extend(other.failures);
    }
}

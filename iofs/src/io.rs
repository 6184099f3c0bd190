// SPDX-License-Identifier: AGPL-3.0-or-later
//! Whole-file read and write: `cat`, `echo`

use crate::{mask, EchoData, Echoed, FsBackend, Iofs, IofsResult, Outcome, WriteOptions};
use bytes::Bytes;
use std::path::Path;

impl<B: FsBackend> Iofs<B> {
    /// Read the whole file into memory.
    pub async fn cat(&self, file: impl AsRef<Path>) -> Outcome<Bytes> {
        let file = file.as_ref();
        tracing::debug!(file = %file.display(), "cat");
        mask("cat", self.backend.read(file).await)
    }

    /// Write `data` to `file`, creating missing parent directories.
    ///
    /// Without a `file` nothing touches the filesystem and the data is handed
    /// back as [`Echoed::PassedThrough`].
    pub async fn echo(
        &self,
        data: impl Into<EchoData>,
        file: Option<&Path>,
        options: WriteOptions,
    ) -> Outcome<Echoed> {
        let data = data.into();
        let Some(file) = file else {
            return Outcome::Success(Echoed::PassedThrough(data));
        };
        tracing::debug!(
            file = %file.display(),
            append = options.append,
            encoding = options.encoding.map(|e| e.name()),
            "echo"
        );

        mask("echo", self.write_data(&data, file, options).await).map(Echoed::Written)
    }

    async fn write_data(&self, data: &EchoData, file: &Path, options: WriteOptions) -> IofsResult<u64> {
        let bytes = data.to_bytes(options.encoding)?;
        self.ensure_parent(file).await?;
        self.backend.write(file, bytes, options.append).await
    }
}

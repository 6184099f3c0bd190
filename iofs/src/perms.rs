// SPDX-License-Identifier: AGPL-3.0-or-later
//! Permission and ownership changes

use crate::{mask, FsBackend, Iofs, IofsError, Outcome};
use std::path::Path;

impl<B: FsBackend> Iofs<B> {
    pub async fn chmod(&self, path: impl AsRef<Path>, mode: u32) -> Outcome {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), mode = format_args!("{mode:o}"), "chmod");
        let result = if self.backend.capabilities().permissions {
            self.backend.set_mode(path, mode).await
        } else {
            Err(IofsError::Unsupported(format!("chmod on backend {}", self.backend.id())))
        };
        mask("chmod", result)
    }

    /// Change owner and group. `None` leaves that id unchanged.
    pub async fn chown(&self, path: impl AsRef<Path>, uid: Option<u32>, gid: Option<u32>) -> Outcome {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), ?uid, ?gid, "chown");
        let result = if self.backend.capabilities().ownership {
            self.backend.chown(path, uid, gid).await
        } else {
            Err(IofsError::Unsupported(format!("chown on backend {}", self.backend.id())))
        };
        mask("chown", result)
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//! File and directory metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata captured by a successful stat call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub size: u64,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub accessed: Option<DateTime<Utc>>,
    pub permissions: Option<Permissions>,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    /// Device and inode number, where the platform exposes them.
    pub device: Option<u64>,
    pub inode: Option<u64>,
}

/// Unix-style permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub mode: u32,
}

impl Permissions {
    pub fn new(mode: u32) -> Self {
        Self { mode }
    }

    /// Permission bits only, without the file type bits.
    pub fn bits(&self) -> u32 {
        self.mode & 0o7777
    }

    /// `rwxr-xr-x` style rendering of the permission bits.
    pub fn symbolic(&self) -> String {
        const FLAGS: [(u32, char); 9] = [
            (0o400, 'r'), (0o200, 'w'), (0o100, 'x'),
            (0o040, 'r'), (0o020, 'w'), (0o010, 'x'),
            (0o004, 'r'), (0o002, 'w'), (0o001, 'x'),
        ];
        FLAGS
            .iter()
            .map(|&(bit, c)| if self.mode & bit != 0 { c } else { '-' })
            .collect()
    }
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.permissions = Some(Permissions::new(mode));
        self
    }

    /// True when both sides name the same filesystem entry, e.g. through a
    /// symlink or a hard link. Unknown identities never match.
    pub fn is_same_entry(&self, other: &Metadata) -> bool {
        match (self.device, self.inode, other.device, other.inode) {
            (Some(d1), Some(i1), Some(d2), Some(i2)) => d1 == d2 && i1 == i2,
            _ => false,
        }
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//! Stat probe results

use crate::Metadata;
use serde::{Deserialize, Serialize};

/// Entry kind, including the "does not exist" case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Socket,
    /// FIFOs, block and character devices
    Other,
    Absent,
}

/// Outcome of probing a path
///
/// Exactly one variant holds at a time. Any failure of the underlying stat
/// call (missing path, permission denied, ...) is reported as `Absent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatResult {
    RegularFile(Metadata),
    Directory(Metadata),
    Symlink(Metadata),
    Socket(Metadata),
    Other(Metadata),
    Absent,
}

impl StatResult {
    pub fn kind(&self) -> EntryKind {
        match self {
            StatResult::RegularFile(_) => EntryKind::File,
            StatResult::Directory(_) => EntryKind::Directory,
            StatResult::Symlink(_) => EntryKind::Symlink,
            StatResult::Socket(_) => EntryKind::Socket,
            StatResult::Other(_) => EntryKind::Other,
            StatResult::Absent => EntryKind::Absent,
        }
    }

    pub fn from_kind(kind: EntryKind, metadata: Metadata) -> Self {
        match kind {
            EntryKind::File => StatResult::RegularFile(metadata),
            EntryKind::Directory => StatResult::Directory(metadata),
            EntryKind::Symlink => StatResult::Symlink(metadata),
            EntryKind::Socket => StatResult::Socket(metadata),
            EntryKind::Other => StatResult::Other(metadata),
            EntryKind::Absent => StatResult::Absent,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, StatResult::RegularFile(_))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, StatResult::Directory(_))
    }

    pub fn is_symlink(&self) -> bool {
        matches!(self, StatResult::Symlink(_))
    }

    pub fn is_socket(&self) -> bool {
        matches!(self, StatResult::Socket(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, StatResult::Absent)
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        match self {
            StatResult::RegularFile(m)
            | StatResult::Directory(m)
            | StatResult::Symlink(m)
            | StatResult::Socket(m)
            | StatResult::Other(m) => Some(m),
            StatResult::Absent => None,
        }
    }

    pub fn size(&self) -> Option<u64> {
        self.metadata().map(|m| m.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_is_neither_file_nor_directory() {
        let stat = StatResult::Absent;
        assert!(stat.is_absent());
        assert!(!stat.is_file());
        assert!(!stat.is_directory());
        assert!(!stat.is_symlink());
        assert!(!stat.is_socket());
        assert!(stat.metadata().is_none());
    }

    #[test]
    fn test_exactly_one_variant_holds() {
        let kinds = [
            EntryKind::File,
            EntryKind::Directory,
            EntryKind::Symlink,
            EntryKind::Socket,
            EntryKind::Other,
            EntryKind::Absent,
        ];
        for kind in kinds {
            let stat = StatResult::from_kind(kind, Metadata::new());
            assert_eq!(stat.kind(), kind);
            let held = [
                stat.is_file(),
                stat.is_directory(),
                stat.is_symlink(),
                stat.is_socket(),
                stat.is_absent(),
            ]
            .iter()
            .filter(|b| **b)
            .count();
            let expected = if kind == EntryKind::Other { 0 } else { 1 };
            assert_eq!(held, expected, "{kind:?}");
        }
    }

    #[test]
    fn test_size() {
        let stat = StatResult::RegularFile(Metadata::new().with_size(42));
        assert_eq!(stat.size(), Some(42));
        assert_eq!(StatResult::Absent.size(), None);
    }
}

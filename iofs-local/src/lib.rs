// SPDX-License-Identifier: AGPL-3.0-or-later
//! Local filesystem backend for iofs
//!
//! Implements the raw `FsBackend` primitives on top of `tokio::fs`, with
//! `libc` for `access(2)` and cross-device rename detection.

mod local;

pub use local::LocalBackend;

// SPDX-License-Identifier: AGPL-3.0-or-later
//! Masked operation results
//!
//! Every public operation reports failure as a value instead of propagating
//! it. Callers branch on [`Outcome::is_success`] (or convert back into a
//! `Result` with [`Outcome::into_result`] when they do want `?`).

use crate::error::{IofsError, IofsResult};

/// Result of a masked operation
#[derive(Debug)]
#[must_use]
pub enum Outcome<T = ()> {
    Success(T),
    Failure(IofsError),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Diagnostic detail for a failed operation.
    pub fn error(&self) -> Option<&IofsError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(e) => Some(e),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(v) => Some(v),
            Outcome::Failure(_) => None,
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Success(v) => Some(v),
            Outcome::Failure(_) => None,
        }
    }

    pub fn into_result(self) -> IofsResult<T> {
        match self {
            Outcome::Success(v) => Ok(v),
            Outcome::Failure(e) => Err(e),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(v) => Outcome::Success(f(v)),
            Outcome::Failure(e) => Outcome::Failure(e),
        }
    }
}

impl<T> From<IofsResult<T>> for Outcome<T> {
    fn from(result: IofsResult<T>) -> Self {
        match result {
            Ok(v) => Outcome::Success(v),
            Err(e) => Outcome::Failure(e),
        }
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later

mod common;

use iofs::{Iofs, IofsError};
use tempfile::tempdir;

#[tokio::test]
async fn mkdir_creates_every_missing_ancestor() {
    let dir = tempdir().unwrap();
    let leaf = dir.path().join("a/b/c");

    let fs = Iofs::local();
    assert!(fs.mkdir(&leaf).await.is_success());
    assert!(fs.isdir(dir.path().join("a")).await);
    assert!(fs.isdir(dir.path().join("a/b")).await);
    assert!(fs.isdir(&leaf).await);
}

#[tokio::test]
async fn mkdir_is_idempotent() {
    let dir = tempdir().unwrap();
    let leaf = dir.path().join("a/b/c");
    common::put(&leaf.join("keep.txt"), b"still here");

    let fs = Iofs::local();
    assert!(fs.mkdir(&leaf).await.is_success());
    assert!(fs.mkdir(&leaf).await.is_success());
    assert_eq!(std::fs::read(leaf.join("keep.txt")).unwrap(), b"still here");
}

#[cfg(unix)]
#[tokio::test]
async fn mkdir_with_mode_applies_mode() {
    let dir = tempdir().unwrap();
    let leaf = dir.path().join("private");

    let fs = Iofs::local();
    assert!(fs.mkdir_with_mode(&leaf, 0o700).await.is_success());
    let bits = fs.stat(&leaf).await.metadata().and_then(|m| m.permissions).map(|p| p.bits());
    assert_eq!(bits, Some(0o700));
}

#[tokio::test]
async fn mkdir_with_empty_path_is_a_configuration_error() {
    let outcome = Iofs::local().mkdir("").await;
    assert!(matches!(outcome.error(), Some(IofsError::Configuration(_))));
}

#[tokio::test]
async fn mkdir_fails_when_a_file_is_in_the_way() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("occupied");
    common::put(&file, b"");

    let fs = Iofs::local();
    assert!(fs.mkdir(&file).await.is_failure());
    assert!(fs.mkdir(file.join("below")).await.is_failure());
    assert!(fs.isfile(&file).await);
}

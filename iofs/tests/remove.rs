// SPDX-License-Identifier: AGPL-3.0-or-later

mod common;

use iofs::Iofs;
use tempfile::tempdir;

#[tokio::test]
async fn rm_removes_a_directory_and_every_descendant() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("doomed");
    common::put(&root.join("a"), b"a");
    common::put(&root.join("b/c"), b"c");
    common::put(&root.join("b/d/e"), b"e");

    let fs = Iofs::local();
    let descendants = fs.ls(&root, true).await.ok().unwrap();
    assert_eq!(descendants.len(), 5);

    assert!(fs.rm(&root).await.is_success());
    assert!(!fs.exists(&root).await);
    for path in descendants {
        assert!(!fs.exists(&path).await, "{} survived", path.display());
    }
}

#[tokio::test]
async fn rm_unlinks_a_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    common::put(&file, b"bye");

    let fs = Iofs::local();
    assert!(fs.rm(&file).await.is_success());
    assert!(fs.stat(&file).await.is_absent());
    assert!(fs.isdir(dir.path()).await);
}

#[tokio::test]
async fn rm_of_missing_path_fails() {
    let dir = tempdir().unwrap();
    let outcome = Iofs::local().rm(dir.path().join("missing")).await;
    assert!(outcome.is_failure());
    assert!(outcome.error().unwrap().is_not_found());
}

#[cfg(unix)]
#[tokio::test]
async fn rm_of_a_symlink_leaves_the_target_alone() {
    let dir = tempdir().unwrap();
    let real = dir.path().join("real");
    common::put(&real.join("kept.txt"), b"kept");
    let link = dir.path().join("link");
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let fs = Iofs::local();
    assert!(fs.isdir(&link).await);
    assert!(fs.rm(&link).await.is_success());
    assert!(fs.lstat(&link).await.is_absent());
    assert_eq!(fs.cat(real.join("kept.txt")).await.ok().unwrap().as_ref(), b"kept");
}

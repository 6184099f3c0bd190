// SPDX-License-Identifier: AGPL-3.0-or-later

mod common;

use iofs::{Iofs, IofsConfig, IofsError, LocalBackend};
use std::path::Path;
use tempfile::tempdir;

/// Relative path and content of every file below `root`, sorted.
async fn snapshot(fs: &Iofs, root: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files = Vec::new();
    for path in fs.ls(root, true).await.ok().unwrap() {
        if fs.isfile(&path).await {
            let rel = path.strip_prefix(root).unwrap().to_string_lossy().into_owned();
            files.push((rel, fs.cat(&path).await.ok().unwrap().to_vec()));
        }
    }
    files.sort();
    files
}

#[tokio::test]
async fn cp_copies_a_file_into_missing_parents() {
    let dir = tempdir().unwrap();
    let origin = dir.path().join("origin.txt");
    common::put(&origin, b"payload");
    let target = dir.path().join("new/nested/target.txt");

    let fs = Iofs::local();
    let report = fs.cp(&origin, &target).await.ok().unwrap();
    assert_eq!(report.files, 1);
    assert_eq!(report.bytes, 7);
    assert!(report.is_complete());

    assert_eq!(fs.cat(&target).await.ok(), fs.cat(&origin).await.ok());
    assert!(fs.exists(&origin).await);
}

#[tokio::test]
async fn cp_mirrors_a_directory_tree() {
    let dir = tempdir().unwrap();
    let origin = dir.path().join("tree");
    common::put(&origin.join("top.txt"), b"top");
    common::put(&origin.join("a/mid.txt"), b"mid");
    common::put(&origin.join("a/b/leaf.bin"), &[0, 1, 2, 255]);
    std::fs::create_dir_all(origin.join("empty")).unwrap();
    let target = dir.path().join("copy");

    let fs = Iofs::local();
    let report = fs.cp(&origin, &target).await.ok().unwrap();
    assert_eq!(report.files, 3);
    assert_eq!(report.directories, 4);
    assert_eq!(report.bytes, 10);

    assert_eq!(snapshot(&fs, &origin).await, snapshot(&fs, &target).await);
    assert!(fs.isdir(target.join("empty")).await);
}

#[tokio::test]
async fn cp_streams_files_larger_than_the_buffer() {
    let dir = tempdir().unwrap();
    let origin = dir.path().join("big.bin");
    let data: Vec<u8> = (0..100_000u32).map(|i| (i * 7 % 256) as u8).collect();
    common::put(&origin, &data);

    let config = IofsConfig { copy_buffer_size: 1024, ..Default::default() };
    let fs = Iofs::with_config(LocalBackend::new(), config).unwrap();
    let target = dir.path().join("out/big.bin");
    let report = fs.cp(&origin, &target).await.ok().unwrap();

    assert_eq!(report.bytes, data.len() as u64);
    assert_eq!(std::fs::read(&target).unwrap(), data);
}

#[cfg(unix)]
#[tokio::test]
async fn cp_keeps_going_past_an_unreadable_entry() {
    let dir = tempdir().unwrap();
    let origin = dir.path().join("dirA");
    common::put(&origin.join("one.txt"), b"1");
    common::put(&origin.join("two.txt"), b"2");
    std::os::unix::fs::symlink(dir.path().join("vanished"), origin.join("broken")).unwrap();
    let target = dir.path().join("dirB");

    let fs = Iofs::local();
    let outcome = fs.cp(&origin, &target).await;
    assert!(outcome.is_success());

    let report = outcome.ok().unwrap();
    assert_eq!(report.files, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, origin.join("broken"));

    assert_eq!(std::fs::read(target.join("one.txt")).unwrap(), b"1");
    assert_eq!(std::fs::read(target.join("two.txt")).unwrap(), b"2");
    assert!(fs.lstat(target.join("broken")).await.is_absent());
}

#[cfg(unix)]
#[tokio::test]
async fn cp_skips_files_without_read_permission() {
    use std::os::unix::fs::PermissionsExt;

    if common::is_root() {
        return;
    }
    let dir = tempdir().unwrap();
    let origin = dir.path().join("dirA");
    for name in ["a", "b", "secret"] {
        common::put(&origin.join(name), name.as_bytes());
    }
    std::fs::set_permissions(origin.join("secret"), std::fs::Permissions::from_mode(0o000)).unwrap();
    let target = dir.path().join("dirB");

    let fs = Iofs::local();
    let report = fs.cp(&origin, &target).await.ok().unwrap();
    assert_eq!(report.files, 2);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].1.is_permission_denied());
    assert!(fs.isfile(target.join("a")).await);
    assert!(fs.isfile(target.join("b")).await);
    assert!(!fs.exists(target.join("secret")).await);
}

#[cfg(unix)]
#[tokio::test]
async fn cp_refuses_links_to_the_origin() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a.txt");
    common::put(&file, b"precious");
    let soft = dir.path().join("soft.txt");
    std::os::unix::fs::symlink(&file, &soft).unwrap();
    let hard = dir.path().join("hard.txt");
    std::fs::hard_link(&file, &hard).unwrap();

    let fs = Iofs::local();
    for target in [&soft, &hard] {
        let outcome = fs.cp(&file, target).await;
        assert!(matches!(outcome.error(), Some(IofsError::Configuration(_))));
        assert_eq!(std::fs::read(&file).unwrap(), b"precious");
    }

    let tree = dir.path().join("tree");
    common::put(&tree.join("x"), b"x");
    let alias = dir.path().join("alias");
    std::os::unix::fs::symlink(&tree, &alias).unwrap();
    assert!(fs.cp(&tree, &alias).await.is_failure());
    assert_eq!(std::fs::read(tree.join("x")).unwrap(), b"x");
}

#[cfg(unix)]
#[tokio::test]
async fn cp_records_a_nested_link_back_to_the_source() {
    let dir = tempdir().unwrap();
    let origin = dir.path().join("src");
    common::put(&origin.join("keep.txt"), b"keep");
    let target = dir.path().join("dst");
    std::fs::create_dir_all(&target).unwrap();
    std::os::unix::fs::symlink(origin.join("keep.txt"), target.join("keep.txt")).unwrap();

    let report = Iofs::local().cp(&origin, &target).await.ok().unwrap();
    assert_eq!(report.failures.len(), 1);
    assert_eq!(std::fs::read(origin.join("keep.txt")).unwrap(), b"keep");
}

#[tokio::test]
async fn cp_of_missing_origin_fails() {
    let dir = tempdir().unwrap();
    let outcome = Iofs::local()
        .cp(dir.path().join("missing"), dir.path().join("target"))
        .await;
    assert!(outcome.is_failure());
    assert!(outcome.error().unwrap().is_not_found());
}

#[tokio::test]
async fn cp_refuses_to_copy_onto_or_into_itself() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("same.txt");
    common::put(&file, b"precious");
    let tree = dir.path().join("tree");
    common::put(&tree.join("x"), b"x");

    let fs = Iofs::local();
    let onto = fs.cp(&file, &file).await;
    assert!(matches!(onto.error(), Some(IofsError::Configuration(_))));
    assert_eq!(std::fs::read(&file).unwrap(), b"precious");

    let into = fs.cp(&tree, tree.join("inner")).await;
    assert!(matches!(into.error(), Some(IofsError::Configuration(_))));
    assert!(!fs.exists(tree.join("inner")).await);
}

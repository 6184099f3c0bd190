// SPDX-License-Identifier: AGPL-3.0-or-later
//! Fuzz target for lexical path resolution

#![no_main]

use iofs_core::path;
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let (left, right) = input.split_once('\n').unwrap_or((input, ""));

        let normal = path::normalize(left);
        // normalizing twice changes nothing
        assert_eq!(path::normalize(&normal), normal);

        let _ = path::absolute(left);
        let _ = path::parent_dir(Path::new(left));
        let _ = path::resolve(left, right);

        if let Ok(mirrored) = path::mirror(Path::new(left), Path::new(right)) {
            assert!(mirrored.starts_with(right));
        }
    }
});

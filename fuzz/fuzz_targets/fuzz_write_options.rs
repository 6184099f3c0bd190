// SPDX-License-Identifier: AGPL-3.0-or-later
//! Fuzz target for echo option resolution and text encoding

#![no_main]

use arbitrary::Arbitrary;
use iofs_core::{EchoData, WriteOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    append: Option<bool>,
    first: &'a str,
    encoding: Option<&'a str>,
    text: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let options = match input.append {
        Some(append) => WriteOptions::resolve(append, input.encoding),
        None => WriteOptions::resolve(input.first, input.encoding),
    };

    if let Ok(options) = options {
        let _ = EchoData::from(input.text).to_bytes(options.encoding);
    }
});

// SPDX-License-Identifier: AGPL-3.0-or-later
//! Text encodings accepted by `echo`

use crate::error::{IofsError, IofsResult};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Padding is optional on input for both base64 alphabets.
const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const BASE64: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const BASE64_URL: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Encoding used to turn text data into bytes before writing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Utf8,
    Ascii,
    Latin1,
    Hex,
    Base64,
    Base64Url,
    Utf16Le,
}

impl Encoding {
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin1",
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
            Encoding::Base64Url => "base64url",
            Encoding::Utf16Le => "utf16le",
        }
    }

    /// Encode `text` into the bytes that end up on disk.
    ///
    /// `ascii` and `latin1` keep the low eight bits of each character, so
    /// out-of-range characters are truncated rather than rejected. `hex` and
    /// the base64 variants decode the text into raw bytes.
    pub fn encode(&self, text: &str) -> IofsResult<Vec<u8>> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Ascii | Encoding::Latin1 => {
                Ok(text.chars().map(|c| (c as u32 & 0xff) as u8).collect())
            }
            Encoding::Hex => hex::decode(text)
                .map_err(|e| IofsError::Encoding(format!("invalid hex data: {e}"))),
            Encoding::Base64 => BASE64
                .decode(text)
                .map_err(|e| IofsError::Encoding(format!("invalid base64 data: {e}"))),
            Encoding::Base64Url => BASE64_URL
                .decode(text)
                .map_err(|e| IofsError::Encoding(format!("invalid base64url data: {e}"))),
            Encoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
        }
    }
}

impl FromStr for Encoding {
    type Err = IofsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "ascii" => Ok(Encoding::Ascii),
            "latin1" | "binary" => Ok(Encoding::Latin1),
            "hex" => Ok(Encoding::Hex),
            "base64" => Ok(Encoding::Base64),
            "base64url" => Ok(Encoding::Base64Url),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(Encoding::Utf16Le),
            other => Err(IofsError::Configuration(format!("unknown encoding: {other}"))),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

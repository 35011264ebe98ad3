// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::char::REPLACEMENT_CHARACTER;

use crate::error::{Error, Result};
use crate::types::StringEncoding;

/// Decodes raw bytes with no length adjustment and no null trimming.
pub fn decode_string(bytes: &[u8], encoding: StringEncoding) -> String {
    match encoding {
        StringEncoding::Utf8 => decode_utf8(bytes),
        StringEncoding::Unicode => decode_utf16(bytes),
        StringEncoding::Ascii => decode_ascii(bytes),
    }
}

/// Invalid sequences become U+FFFD.
#[inline]
pub fn decode_utf8(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Native-order UTF-16. Unpaired surrogates and a dangling odd byte become U+FFFD.
pub fn decode_utf16(bytes: &[u8]) -> String {
    let chunks = bytes.chunks_exact(2);
    let dangling = !chunks.remainder().is_empty();
    let units = chunks.map(|pair| u16::from_ne_bytes([pair[0], pair[1]]));
    let mut text: String = char::decode_utf16(units)
        .map(|c| c.unwrap_or(REPLACEMENT_CHARACTER))
        .collect();
    if dangling {
        text.push(REPLACEMENT_CHARACTER);
    }
    text
}

/// Bytes above `0x7F` become `?`.
pub fn decode_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect()
}

/// The decoded meaning of an FString length prefix.
///
/// A positive prefix counts UTF-8 bytes, a negative one counts UTF-16 code
/// units; both include one trailing null terminator that is consumed but not
/// returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FStringHeader {
    Empty,
    Utf8 { byte_len: usize },
    Utf16 { unit_count: usize },
}

impl FStringHeader {
    pub fn parse(prefix: i32) -> Result<FStringHeader> {
        match prefix {
            0 => Ok(FStringHeader::Empty),
            i32::MIN => Err(Error::corrupt_archive(
                "FString length prefix is i32::MIN and cannot be negated",
            )),
            n if n < 0 => Ok(FStringHeader::Utf16 {
                unit_count: n.unsigned_abs() as usize,
            }),
            n => Ok(FStringHeader::Utf8 {
                byte_len: n as usize,
            }),
        }
    }

    /// Bytes the payload occupies in the source, terminator included.
    #[inline]
    pub fn payload_len(self) -> Result<usize> {
        match self {
            FStringHeader::Empty => Ok(0),
            FStringHeader::Utf8 { byte_len } => Ok(byte_len),
            FStringHeader::Utf16 { unit_count } => unit_count.checked_mul(2).ok_or_else(|| {
                Error::corrupt_archive(format!("FString of {unit_count} UTF-16 units overflows"))
            }),
        }
    }

    /// Decodes `payload` (exactly [`payload_len`](Self::payload_len) bytes), dropping the terminator.
    pub fn decode(self, payload: &[u8]) -> String {
        match self {
            FStringHeader::Empty => String::new(),
            FStringHeader::Utf8 { byte_len } => {
                let text_len = byte_len.saturating_sub(1).min(payload.len());
                decode_utf8(&payload[..text_len])
            }
            FStringHeader::Utf16 { unit_count } => {
                let text_len = (unit_count.saturating_sub(1) * 2).min(payload.len());
                decode_utf16(&payload[..text_len])
            }
        }
    }
}

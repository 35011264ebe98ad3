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

use std::mem;

use zerocopy::IntoBytes;

use crate::error::{Error, Result};
use crate::types::FixedLayout;

/// Total byte size of `length` consecutive `T`s.
#[inline]
pub fn array_byte_len<T: FixedLayout>(length: usize) -> Result<usize> {
    length.checked_mul(mem::size_of::<T>()).ok_or_else(|| {
        Error::corrupt_archive(format!(
            "array of {} x {} bytes overflows usize",
            length,
            mem::size_of::<T>()
        ))
    })
}

/// Validates an `i32` count prefix. Counts are never negative, unlike FString lengths.
#[inline]
pub fn length_from_prefix(prefix: i32) -> Result<usize> {
    crate::ensure!(prefix >= 0, "negative length prefix {}", prefix);
    Ok(prefix as usize)
}

/// Reinterprets `bytes` as `length` consecutive values in one copy.
///
/// Returns `None` unless `bytes` holds exactly `length` values.
pub fn decode_array<T: FixedLayout>(bytes: &[u8], length: usize) -> Option<Vec<T>> {
    if length == 0 {
        return bytes.is_empty().then(Vec::new);
    }
    let mut values = vec![T::new_zeroed(); length];
    let dst = values.as_mut_slice().as_mut_bytes();
    if dst.len() != bytes.len() {
        return None;
    }
    dst.copy_from_slice(bytes);
    Some(values)
}

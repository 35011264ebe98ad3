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

use log::warn;

use crate::types::FixedLayout;

/// Copies `bytes` into a `T` with an unaligned read.
///
/// Returns `None` unless `bytes` is exactly `size_of::<T>()` long.
#[inline(always)]
pub fn decode_fixed<T: FixedLayout>(bytes: &[u8]) -> Option<T> {
    T::read_from_bytes(bytes).ok()
}

/// Booleans are stored as a 4-byte integer; anything nonzero is `true`.
#[inline(always)]
pub fn decode_bool(raw: i32) -> bool {
    if raw != 0 && raw != 1 {
        warn!("boolean stored as {}, reading as true", raw);
    }
    raw != 0
}

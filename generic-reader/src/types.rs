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

use std::io::SeekFrom;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::{Error, Result};

/// A value whose bytes can be reinterpreted straight from the source.
///
/// Implemented for every type `zerocopy` proves to be padding-free and valid
/// for any bit pattern: the integer and float primitives, arrays of them and
/// `#[repr(C)]` structs deriving `FromBytes`, `IntoBytes`, `Immutable` and
/// `KnownLayout`. Values are read in the host's native byte order.
pub trait FixedLayout: FromBytes + IntoBytes + Immutable + KnownLayout + Copy {}

impl<T> FixedLayout for T where T: FromBytes + IntoBytes + Immutable + KnownLayout + Copy {}

/// The reference point a seek offset is relative to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(i32)]
pub enum SeekOrigin {
    Begin = 0,
    Current = 1,
    End = 2,
}

impl SeekOrigin {
    /// Converts a raw origin as stored by foreign callers.
    pub fn from_raw(origin: i32) -> Result<SeekOrigin> {
        SeekOrigin::try_from(origin).map_err(|e| Error::invalid_seek_origin(e.number))
    }

    /// Builds the equivalent [`SeekFrom`]. `Begin` offsets below zero clamp to zero
    /// because `SeekFrom::Start` cannot express them.
    pub fn to_seek_from(self, offset: i64) -> SeekFrom {
        match self {
            SeekOrigin::Begin => SeekFrom::Start(offset.max(0) as u64),
            SeekOrigin::Current => SeekFrom::Current(offset),
            SeekOrigin::End => SeekFrom::End(offset),
        }
    }

    /// Splits a [`SeekFrom`] into an offset and origin.
    pub fn split(seek: SeekFrom) -> (i64, SeekOrigin) {
        match seek {
            SeekFrom::Start(offset) => (offset.min(i64::MAX as u64) as i64, SeekOrigin::Begin),
            SeekFrom::Current(offset) => (offset, SeekOrigin::Current),
            SeekFrom::End(offset) => (offset, SeekOrigin::End),
        }
    }
}

/// Text encodings understood by the plain string reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum StringEncoding {
    Utf8 = 0,
    /// UTF-16 in native byte order, two bytes per code unit.
    Unicode = 1,
    /// 7-bit ASCII; bytes above `0x7F` decode to `?`.
    Ascii = 2,
}

impl Default for StringEncoding {
    fn default() -> Self {
        StringEncoding::Utf8
    }
}

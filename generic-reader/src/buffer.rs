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

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::reader::{ensure_available, GenericReader};

#[inline(always)]
fn sub_range(start: usize, length: usize, len: usize) -> Result<usize> {
    match start.checked_add(length) {
        Some(end) if end <= len => Ok(end),
        _ => Err(Error::unexpected_end(
            length,
            i64::try_from(start).unwrap_or(i64::MAX),
        )),
    }
}

/// Zero-copy reader over a borrowed byte slice.
#[derive(Clone, Copy, Debug)]
pub struct SpanReader<'a> {
    bf: &'a [u8],
    cursor: i64,
}

impl<'a> SpanReader<'a> {
    pub fn new(bf: &'a [u8]) -> SpanReader<'a> {
        SpanReader { bf, cursor: 0 }
    }

    /// Borrows `len` bytes for the full lifetime of the underlying slice.
    #[inline(always)]
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        let start = ensure_available(self.cursor, len, self.bf.len() as i64)?;
        self.cursor += len as i64;
        Ok(&self.bf[start..start + len])
    }

    /// The unread tail, empty when the cursor is out of range.
    pub fn remaining_bytes(&self) -> &'a [u8] {
        match usize::try_from(self.cursor) {
            Ok(start) if start <= self.bf.len() => &self.bf[start..],
            _ => &[],
        }
    }

    /// A reader over `[start, start + length)` of this slice, with its own cursor.
    pub fn slice(&self, start: usize, length: usize) -> Result<SpanReader<'a>> {
        let end = sub_range(start, length, self.bf.len())?;
        Ok(SpanReader::new(&self.bf[start..end]))
    }

    pub fn get_slice(&self) -> &'a [u8] {
        self.bf
    }
}

impl<'a> GenericReader for SpanReader<'a> {
    #[inline(always)]
    fn position(&self) -> i64 {
        self.cursor
    }

    #[inline(always)]
    fn set_position(&mut self, position: i64) {
        self.cursor = position;
    }

    #[inline(always)]
    fn length(&self) -> i64 {
        self.bf.len() as i64
    }

    #[inline(always)]
    fn read_span(&mut self, len: usize) -> Result<&[u8]> {
        self.read_slice(len)
    }
}

impl<'a> From<&'a [u8]> for SpanReader<'a> {
    fn from(bf: &'a [u8]) -> Self {
        SpanReader::new(bf)
    }
}

/// Reader over an owned buffer that can be cheaply split into sub-readers.
///
/// Slices share the same storage; each has its own position and length.
///
/// ```rust
/// use generic_reader::{GenericReader, MemoryReader};
///
/// let reader = MemoryReader::new(vec![1, 0, 2, 0, 3, 0]);
/// let mut tail = reader.slice(2, 4).unwrap();
/// assert_eq!(tail.read::<[u8; 2]>().unwrap(), [2, 0]);
/// assert_eq!(tail.position(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct MemoryReader {
    bf: Arc<[u8]>,
    base: usize,
    len: usize,
    cursor: i64,
}

impl MemoryReader {
    pub fn new(bf: Vec<u8>) -> MemoryReader {
        Self::from_shared(bf.into())
    }

    pub fn from_shared(bf: Arc<[u8]>) -> MemoryReader {
        let len = bf.len();
        MemoryReader {
            bf,
            base: 0,
            len,
            cursor: 0,
        }
    }

    /// Copies `bf` into a new buffer.
    pub fn copy_from(bf: &[u8]) -> MemoryReader {
        Self::from_shared(Arc::from(bf))
    }

    /// A reader over `[start, start + length)` of this window sharing the same storage.
    pub fn slice(&self, start: usize, length: usize) -> Result<MemoryReader> {
        sub_range(start, length, self.len)?;
        Ok(MemoryReader {
            bf: Arc::clone(&self.bf),
            base: self.base + start,
            len: length,
            cursor: 0,
        })
    }

    /// The bytes of this window.
    pub fn get_slice(&self) -> &[u8] {
        &self.bf[self.base..self.base + self.len]
    }

    /// A borrowed reader over this window positioned at the same cursor.
    pub fn as_span(&self) -> SpanReader<'_> {
        SpanReader {
            bf: self.get_slice(),
            cursor: self.cursor,
        }
    }

    /// Whether `other` reads from the same allocation.
    pub fn shares_storage(&self, other: &MemoryReader) -> bool {
        Arc::ptr_eq(&self.bf, &other.bf)
    }
}

impl GenericReader for MemoryReader {
    #[inline(always)]
    fn position(&self) -> i64 {
        self.cursor
    }

    #[inline(always)]
    fn set_position(&mut self, position: i64) {
        self.cursor = position;
    }

    #[inline(always)]
    fn length(&self) -> i64 {
        self.len as i64
    }

    #[inline(always)]
    fn read_span(&mut self, len: usize) -> Result<&[u8]> {
        let start = self.base + ensure_available(self.cursor, len, self.len as i64)?;
        self.cursor += len as i64;
        Ok(&self.bf[start..start + len])
    }
}

impl From<Vec<u8>> for MemoryReader {
    fn from(bf: Vec<u8>) -> Self {
        MemoryReader::new(bf)
    }
}

impl From<Arc<[u8]>> for MemoryReader {
    fn from(bf: Arc<[u8]>) -> Self {
        MemoryReader::from_shared(bf)
    }
}

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

use std::io;

use log::trace;

use super::file::RandomAccess;
use crate::pool::PooledBuffer;

/// A single-region cache of file bytes.
///
/// Holds `arena[..filled]`, which mirrors the file range
/// `[start, start + filled)`. A miss replaces the whole range; nothing is
/// retained across refills.
#[derive(Debug)]
pub struct ReadAheadBuffer {
    arena: PooledBuffer,
    start: u64,
    filled: usize,
}

impl ReadAheadBuffer {
    pub fn new(arena: PooledBuffer) -> Self {
        ReadAheadBuffer {
            arena,
            start: 0,
            filled: 0,
        }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.arena.len()
    }

    /// The cached file range.
    #[inline(always)]
    pub fn cached_range(&self) -> std::ops::Range<u64> {
        self.start..self.start + self.filled as u64
    }

    #[inline(always)]
    pub fn covers(&self, offset: u64, len: usize) -> bool {
        offset >= self.start
            && offset
                .checked_add(len as u64)
                .is_some_and(|end| end <= self.start + self.filled as u64)
    }

    /// The cached bytes for `[offset, offset + len)`, if covered.
    #[inline(always)]
    pub fn window(&self, offset: u64, len: usize) -> Option<&[u8]> {
        if !self.covers(offset, len) {
            return None;
        }
        let begin = (offset - self.start) as usize;
        self.arena.get(begin..begin + len)
    }

    pub fn invalidate(&mut self) {
        self.filled = 0;
    }

    /// Replaces the cached range with bytes read from `source` at `offset`.
    ///
    /// Grows the arena to `len` if needed, then issues one positioned read of up
    /// to the full capacity. Further reads are issued only while fewer than
    /// `len` bytes have arrived. Returns the number of bytes now cached, which is
    /// below `len` only when the source ran out.
    pub fn refill<F: RandomAccess + ?Sized>(
        &mut self,
        source: &F,
        offset: u64,
        len: usize,
    ) -> io::Result<usize> {
        self.invalidate();
        self.arena.grow_to(len);
        self.start = offset;
        loop {
            let at = offset + self.filled as u64;
            match source.read_at(&mut self.arena[self.filled..], at) {
                Ok(0) => break,
                Ok(n) => {
                    self.filled += n;
                    if self.filled >= len {
                        break;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.invalidate();
                    return Err(e);
                }
            }
        }
        trace!(
            "read-ahead refill at {}: requested {}, cached {} of {}",
            offset,
            len,
            self.filled,
            self.capacity()
        );
        Ok(self.filled)
    }
}

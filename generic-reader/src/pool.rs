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

use std::cell::Cell;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use log::debug;

/// Number of segments in the pool. Using 16 segments to reduce contention.
const NUM_SEGMENTS: usize = 16;

/// Arenas kept per segment; extra returns are dropped.
const MAX_ARENAS_PER_SEGMENT: usize = 4;

/// Arenas larger than this are freed instead of pooled.
pub const MAX_RETAINED_CAPACITY: usize = 1 << 20;

/// Global counter to assign unique IDs to threads for segment selection.
static THREAD_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

thread_local! {
    /// Cached segment index for the current thread.
    static SEGMENT_INDEX: Cell<usize> = Cell::new(
        (THREAD_ID_COUNTER.fetch_add(1, Ordering::Relaxed) as usize) % NUM_SEGMENTS
    );
}

struct Segment {
    arenas: Mutex<Vec<Vec<u8>>>,
}

impl Segment {
    fn new() -> Self {
        Segment {
            arenas: Mutex::new(Vec::new()),
        }
    }

    #[inline(always)]
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vec<u8>>> {
        // a panic while holding the lock cannot leave a Vec<Vec<u8>> half-updated
        self.arenas.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A segmented pool of byte arenas shared by file readers.
///
/// Each thread is pinned to one segment, so readers on different threads
/// usually take different locks.
pub struct BufferPool {
    segments: [Segment; NUM_SEGMENTS],
}

impl BufferPool {
    pub fn new() -> Self {
        BufferPool {
            segments: std::array::from_fn(|_| Segment::new()),
        }
    }

    /// The process-wide pool used by readers configured with `pooled(true)`.
    pub fn shared() -> &'static BufferPool {
        static SHARED: OnceLock<BufferPool> = OnceLock::new();
        SHARED.get_or_init(BufferPool::new)
    }

    #[inline(always)]
    fn segment(&self) -> &Segment {
        let idx = SEGMENT_INDEX.with(|idx| idx.get());
        &self.segments[idx]
    }

    /// Rents an arena at least `min_capacity` bytes long.
    ///
    /// The arena goes back to this pool when the returned guard is dropped.
    pub fn rent(&'static self, min_capacity: usize) -> PooledBuffer {
        let mut bytes = self.segment().lock().pop().unwrap_or_else(|| {
            debug!("buffer pool miss, allocating {} bytes", min_capacity);
            Vec::with_capacity(min_capacity)
        });
        if bytes.len() < min_capacity {
            bytes.resize(min_capacity, 0);
        }
        PooledBuffer {
            bytes,
            pool: Some(self),
        }
    }

    fn give_back(&self, bytes: Vec<u8>) {
        if bytes.len() > MAX_RETAINED_CAPACITY {
            return;
        }
        let mut arenas = self.segment().lock();
        if arenas.len() < MAX_ARENAS_PER_SEGMENT {
            arenas.push(bytes);
        }
    }

    /// Number of idle arenas across all segments.
    pub fn idle_count(&self) -> usize {
        self.segments.iter().map(|s| s.lock().len()).sum()
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("idle", &self.idle_count())
            .finish()
    }
}

/// A byte arena that is either pooled or plainly owned.
///
/// A pooled arena returns to its pool exactly once, when the guard drops.
pub struct PooledBuffer {
    bytes: Vec<u8>,
    pool: Option<&'static BufferPool>,
}

impl PooledBuffer {
    /// A zero-filled arena owned outright; dropping it frees the memory.
    pub fn unpooled(capacity: usize) -> Self {
        PooledBuffer {
            bytes: vec![0; capacity],
            pool: None,
        }
    }

    pub fn is_pooled(&self) -> bool {
        self.pool.is_some()
    }

    /// Grows the arena to at least `len` bytes. Never shrinks.
    pub fn grow_to(&mut self, len: usize) {
        if self.bytes.len() < len {
            self.bytes.resize(len, 0);
        }
    }
}

impl Deref for PooledBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl DerefMut for PooledBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.take() {
            pool.give_back(std::mem::take(&mut self.bytes));
        }
    }
}

impl fmt::Debug for PooledBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("len", &self.bytes.len())
            .field("pooled", &self.is_pooled())
            .finish()
    }
}

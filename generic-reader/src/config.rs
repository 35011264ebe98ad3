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

use crate::pool::{BufferPool, PooledBuffer};

/// Read-ahead capacity used when none is configured.
pub const DEFAULT_READ_AHEAD_CAPACITY: usize = 4096;

/// Configuration for buffered readers.
///
/// ```rust
/// use generic_reader::config::ReaderConfig;
///
/// let config = ReaderConfig::new().read_ahead_capacity(64 * 1024).pooled(false);
/// assert_eq!(config.get_read_ahead_capacity(), 64 * 1024);
/// assert!(!config.is_pooled());
/// ```
#[derive(Clone, Debug)]
pub struct ReaderConfig {
    /// Minimum bytes fetched per refill of the read-ahead buffer.
    pub read_ahead_capacity: usize,
    /// Pool the read-ahead arena is rented from, or `None` to allocate privately.
    pub pool: Option<&'static BufferPool>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            read_ahead_capacity: DEFAULT_READ_AHEAD_CAPACITY,
            pool: Some(BufferPool::shared()),
        }
    }
}

impl ReaderConfig {
    /// Creates a new ReaderConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the read-ahead capacity. Zero is bumped to one byte.
    pub fn read_ahead_capacity(mut self, capacity: usize) -> Self {
        self.read_ahead_capacity = capacity.max(1);
        self
    }

    /// Rents arenas from the shared pool (`true`) or allocates privately (`false`).
    pub fn pooled(mut self, pooled: bool) -> Self {
        self.pool = pooled.then(BufferPool::shared);
        self
    }

    /// Rents arenas from a specific pool.
    pub fn with_pool(mut self, pool: &'static BufferPool) -> Self {
        self.pool = Some(pool);
        self
    }

    #[inline(always)]
    pub fn get_read_ahead_capacity(&self) -> usize {
        self.read_ahead_capacity
    }

    #[inline(always)]
    pub fn is_pooled(&self) -> bool {
        self.pool.is_some()
    }

    /// Allocates an arena of at least `capacity` bytes per this configuration.
    pub(crate) fn allocate(&self, capacity: usize) -> PooledBuffer {
        match self.pool {
            Some(pool) => pool.rent(capacity),
            None => PooledBuffer::unpooled(capacity),
        }
    }
}

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

use std::fs::File;
use std::io;
use std::path::Path;

use log::debug;

use super::read_ahead::ReadAheadBuffer;
use super::{ensure_available, GenericReader};
use crate::config::ReaderConfig;
use crate::error::{Error, Result};

/// Positioned reads that do not move a shared cursor.
pub trait RandomAccess {
    /// Reads up to `buf.len()` bytes starting at `offset`. Returns 0 at end of data.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;

    /// Total size of the data source.
    fn size(&self) -> io::Result<u64>;
}

impl RandomAccess for File {
    #[cfg(unix)]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::read_at(self, buf, offset)
    }

    #[cfg(windows)]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_read(self, buf, offset)
    }

    #[cfg(not(any(unix, windows)))]
    fn read_at(&self, _buf: &mut [u8], _offset: u64) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "positioned file reads are not supported on this platform",
        ))
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }
}

impl RandomAccess for [u8] {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        let start = usize::try_from(offset).unwrap_or(usize::MAX).min(self.len());
        let n = buf.len().min(self.len() - start);
        buf[..n].copy_from_slice(&self[start..start + n]);
        Ok(n)
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.len() as u64)
    }
}

impl<T: RandomAccess + ?Sized> RandomAccess for &T {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        (**self).read_at(buf, offset)
    }

    fn size(&self) -> io::Result<u64> {
        (**self).size()
    }
}

/// Reads from a random-access source through a read-ahead buffer.
///
/// Small sequential reads are served from the cached region, so a run of
/// primitives costs one positioned read per buffer's worth of bytes. The
/// buffer is allocated on the first read and returned to its pool when the
/// reader drops.
///
/// ```no_run
/// use generic_reader::{FileReader, GenericReader};
///
/// let mut reader = FileReader::open("Engine.uasset")?;
/// let tag = reader.read::<u32>()?;
/// let name = reader.read_fstring()?;
/// # Ok::<(), generic_reader::Error>(())
/// ```
#[derive(Debug)]
pub struct FileReader<F: RandomAccess = File> {
    source: F,
    length: i64,
    position: i64,
    buffer: Option<ReadAheadBuffer>,
    config: ReaderConfig,
}

impl FileReader<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(file)
    }
}

impl<F: RandomAccess> FileReader<F> {
    pub fn new(source: F) -> Result<Self> {
        Self::with_config(source, ReaderConfig::default())
    }

    pub fn with_config(source: F, config: ReaderConfig) -> Result<Self> {
        let size = source.size()?;
        let length = i64::try_from(size)
            .map_err(|_| Error::corrupt_archive(format!("file size {size} exceeds i64")))?;
        debug!(
            "file reader over {} bytes, read-ahead {} ({})",
            length,
            config.get_read_ahead_capacity(),
            if config.is_pooled() { "pooled" } else { "private" }
        );
        Ok(FileReader {
            source,
            length,
            position: 0,
            buffer: None,
            config,
        })
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// The read-ahead buffer, once the first read has allocated it.
    pub fn read_ahead(&self) -> Option<&ReadAheadBuffer> {
        self.buffer.as_ref()
    }

    pub fn get_ref(&self) -> &F {
        &self.source
    }

    /// Returns the source. The read-ahead arena goes back to its pool first.
    pub fn into_inner(self) -> F {
        drop(self.buffer);
        self.source
    }
}

impl<F: RandomAccess> GenericReader for FileReader<F> {
    #[inline(always)]
    fn position(&self) -> i64 {
        self.position
    }

    #[inline(always)]
    fn set_position(&mut self, position: i64) {
        self.position = position;
    }

    #[inline(always)]
    fn length(&self) -> i64 {
        self.length
    }

    fn read_span(&mut self, len: usize) -> Result<&[u8]> {
        let position = self.position;
        let offset = ensure_available(position, len, self.length)? as u64;
        if len == 0 {
            return Ok(&[]);
        }
        let config = &self.config;
        let buffer = self.buffer.get_or_insert_with(|| {
            ReadAheadBuffer::new(config.allocate(config.get_read_ahead_capacity()))
        });
        if !buffer.covers(offset, len) {
            let cached = buffer.refill(&self.source, offset, len)?;
            if cached < len {
                return Err(Error::unexpected_end(len, position));
            }
        }
        self.position += len as i64;
        buffer
            .window(offset, len)
            .ok_or_else(|| Error::unexpected_end(len, position))
    }
}

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

use std::io::{self, Read, Seek, SeekFrom};

use log::{debug, trace};

use super::{ensure_available, GenericReader};
use crate::error::{Error, Result};

/// Reads until `buf` is full or the stream reports end of data.
pub(crate) fn read_fully<R: Read + ?Sized>(stream: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match stream.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Unbuffered reads from a seekable stream.
///
/// The position is tracked locally. The stream is only re-seeked before a
/// read when a [`seek`](GenericReader::seek) moved the position away from the
/// stream's cursor.
#[derive(Debug)]
pub struct StreamReader<S> {
    stream: S,
    length: i64,
    position: i64,
    /// Where the underlying stream's cursor is, or `None` after a failed
    /// seek or read left it somewhere unknown.
    cursor: Option<i64>,
    scratch: Vec<u8>,
}

impl<S: Read + Seek> StreamReader<S> {
    /// Wraps `stream`, starting at its current position.
    pub fn new(mut stream: S) -> Result<Self> {
        let start = stream.stream_position()?;
        let end = stream.seek(SeekFrom::End(0))?;
        if end != start {
            stream.seek(SeekFrom::Start(start))?;
        }
        let to_i64 = |v: u64| {
            i64::try_from(v).map_err(|_| Error::corrupt_archive(format!("stream offset {v} exceeds i64")))
        };
        let (position, length) = (to_i64(start)?, to_i64(end)?);
        debug!("stream reader over {} bytes at {}", length, position);
        Ok(StreamReader {
            stream,
            length,
            position,
            cursor: Some(position),
            scratch: Vec::new(),
        })
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Seek> GenericReader for StreamReader<S> {
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
        if self.cursor.take() != Some(position) {
            trace!("stream re-seek to {}", position);
            self.stream.seek(SeekFrom::Start(offset))?;
        }
        self.scratch.clear();
        self.scratch.resize(len, 0);
        let got = read_fully(&mut self.stream, &mut self.scratch)?;
        self.cursor = Some(position + got as i64);
        if got < len {
            return Err(Error::unexpected_end(len, position));
        }
        self.position += len as i64;
        Ok(&self.scratch)
    }
}

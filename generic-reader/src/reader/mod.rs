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

//! The reader contract and the I/O-backed implementations.
//!
//! A backend only has to say how to acquire `n` bytes at its current
//! position ([`GenericReader::read_span`]) and keep its position; every typed
//! read is a provided method built on the shared [`codec`](crate::codec).

mod file;
mod read_ahead;
mod stream;

pub use file::{FileReader, RandomAccess};
pub use read_ahead::ReadAheadBuffer;
pub use stream::StreamReader;

use std::mem;

use crate::codec::{self, FStringHeader};
use crate::error::{Error, Result};
use crate::types::{FixedLayout, SeekOrigin, StringEncoding};

/// Checks that `len` bytes are available at `position` in a source of
/// `length` bytes and returns `position` as an index.
#[inline(always)]
pub(crate) fn ensure_available(position: i64, len: usize, length: i64) -> Result<usize> {
    let end = i64::try_from(len)
        .ok()
        .and_then(|len| position.checked_add(len));
    match end {
        Some(end) if position >= 0 && end <= length => Ok(position as usize),
        _ => Err(Error::unexpected_end(len, position)),
    }
}

/// A source of native-order binary values.
///
/// Every read advances [`position`](Self::position) by the bytes it consumed.
/// Seeking never fails for being out of range; the next read does.
///
/// ```rust
/// use generic_reader::{GenericReader, SpanReader};
///
/// let mut bytes = Vec::new();
/// bytes.extend_from_slice(&42u32.to_ne_bytes());
/// bytes.extend_from_slice(&6i32.to_ne_bytes());
/// bytes.extend_from_slice(b"Hello\0");
///
/// let mut reader = SpanReader::new(&bytes);
/// assert_eq!(reader.read::<u32>().unwrap(), 42);
/// assert_eq!(reader.read_fstring().unwrap(), "Hello");
/// assert_eq!(reader.position(), 14);
/// ```
pub trait GenericReader {
    /// Current logical byte offset. May be negative or past the end after a seek.
    fn position(&self) -> i64;

    fn set_position(&mut self, position: i64);

    /// Total addressable bytes.
    fn length(&self) -> i64;

    /// Acquires exactly `len` bytes at the current position and advances past them.
    ///
    /// Fails with [`Error::UnexpectedEndOfData`] when the source cannot supply them.
    fn read_span(&mut self, len: usize) -> Result<&[u8]>;

    /// Bytes between the position and the end. A position before the start
    /// counts from zero and one past the end leaves nothing.
    fn remaining(&self) -> i64 {
        let length = self.length();
        length - self.position().clamp(0, length)
    }

    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<i64> {
        let base = match origin {
            SeekOrigin::Begin => 0,
            SeekOrigin::Current => self.position(),
            SeekOrigin::End => self.length(),
        };
        let target = base
            .checked_add(offset)
            .ok_or_else(|| Error::seek_overflow(offset, origin))?;
        self.set_position(target);
        Ok(target)
    }

    fn skip(&mut self, len: i64) -> Result<i64> {
        self.seek(len, SeekOrigin::Current)
    }

    fn read<T: FixedLayout>(&mut self) -> Result<T>
    where
        Self: Sized,
    {
        let position = self.position();
        let size = mem::size_of::<T>();
        let span = self.read_span(size)?;
        codec::decode_fixed(span).ok_or_else(|| Error::unexpected_end(size, position))
    }

    fn read_at<T: FixedLayout>(&mut self, offset: i64, origin: SeekOrigin) -> Result<T>
    where
        Self: Sized,
    {
        self.seek(offset, origin)?;
        self.read()
    }

    fn read_u8(&mut self) -> Result<u8>
    where
        Self: Sized,
    {
        self.read()
    }

    fn read_i8(&mut self) -> Result<i8>
    where
        Self: Sized,
    {
        self.read()
    }

    fn read_u16(&mut self) -> Result<u16>
    where
        Self: Sized,
    {
        self.read()
    }

    fn read_i16(&mut self) -> Result<i16>
    where
        Self: Sized,
    {
        self.read()
    }

    fn read_u32(&mut self) -> Result<u32>
    where
        Self: Sized,
    {
        self.read()
    }

    fn read_i32(&mut self) -> Result<i32>
    where
        Self: Sized,
    {
        self.read()
    }

    fn read_u64(&mut self) -> Result<u64>
    where
        Self: Sized,
    {
        self.read()
    }

    fn read_i64(&mut self) -> Result<i64>
    where
        Self: Sized,
    {
        self.read()
    }

    fn read_f32(&mut self) -> Result<f32>
    where
        Self: Sized,
    {
        self.read()
    }

    fn read_f64(&mut self) -> Result<f64>
    where
        Self: Sized,
    {
        self.read()
    }

    /// Reads a 4-byte integer; any nonzero value is `true`.
    fn read_bool(&mut self) -> Result<bool>
    where
        Self: Sized,
    {
        self.read::<i32>().map(codec::decode_bool)
    }

    /// Fills `dst` from the source.
    fn read_into(&mut self, dst: &mut [u8]) -> Result<()> {
        let span = self.read_span(dst.len())?;
        dst.copy_from_slice(span);
        Ok(())
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        self.read_span(len).map(<[u8]>::to_vec)
    }

    /// Reads `length` values with a single acquisition.
    ///
    /// A zero length returns an empty vector without touching the source.
    fn read_array<T: FixedLayout>(&mut self, length: usize) -> Result<Vec<T>>
    where
        Self: Sized,
    {
        if length == 0 {
            return Ok(Vec::new());
        }
        let position = self.position();
        let byte_len = codec::array_byte_len::<T>(length)?;
        let span = self.read_span(byte_len)?;
        codec::decode_array(span, length).ok_or_else(|| Error::unexpected_end(byte_len, position))
    }

    fn read_array_at<T: FixedLayout>(
        &mut self,
        length: usize,
        offset: i64,
        origin: SeekOrigin,
    ) -> Result<Vec<T>>
    where
        Self: Sized,
    {
        self.seek(offset, origin)?;
        self.read_array(length)
    }

    /// Calls `element` exactly `length` times, in index order, with this reader.
    ///
    /// The first failing element aborts the whole array.
    fn read_array_with<T, F>(&mut self, length: usize, mut element: F) -> Result<Vec<T>>
    where
        Self: Sized,
        F: FnMut(&mut Self) -> Result<T>,
    {
        let available = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        let mut values = Vec::with_capacity(length.min(available));
        for _ in 0..length {
            values.push(element(self)?);
        }
        Ok(values)
    }

    /// Reads an `i32` count, then that many values in bulk.
    fn read_prefixed_array<T: FixedLayout>(&mut self) -> Result<Vec<T>>
    where
        Self: Sized,
    {
        let length = codec::length_from_prefix(self.read()?)?;
        self.read_array(length)
    }

    /// Reads an `i32` count, then that many elements through `element`.
    fn read_prefixed_array_with<T, F>(&mut self, element: F) -> Result<Vec<T>>
    where
        Self: Sized,
        F: FnMut(&mut Self) -> Result<T>,
    {
        let length = codec::length_from_prefix(self.read()?)?;
        self.read_array_with(length, element)
    }

    /// Reads `length` raw bytes as text. Nothing is trimmed.
    fn read_string(&mut self, length: usize, encoding: StringEncoding) -> Result<String> {
        let span = self.read_span(length)?;
        Ok(codec::decode_string(span, encoding))
    }

    /// Reads an `i32` byte count, then [`read_string`](Self::read_string).
    fn read_prefixed_string(&mut self, encoding: StringEncoding) -> Result<String>
    where
        Self: Sized,
    {
        let length = codec::length_from_prefix(self.read()?)?;
        self.read_string(length, encoding)
    }

    /// Reads an FString: a signed length where positive means UTF-8 bytes and
    /// negative means UTF-16 units, both ending in a null terminator that is
    /// consumed but not returned.
    fn read_fstring(&mut self) -> Result<String>
    where
        Self: Sized,
    {
        let header = FStringHeader::parse(self.read()?)?;
        if header == FStringHeader::Empty {
            return Ok(String::new());
        }
        let payload = self.read_span(header.payload_len()?)?;
        Ok(header.decode(payload))
    }

    fn read_fstring_array(&mut self, length: usize) -> Result<Vec<String>>
    where
        Self: Sized,
    {
        self.read_array_with(length, |reader| reader.read_fstring())
    }

    fn read_prefixed_fstring_array(&mut self) -> Result<Vec<String>>
    where
        Self: Sized,
    {
        self.read_prefixed_array_with(|reader| reader.read_fstring())
    }
}

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

//! Error type shared by every reader backend.
//!
//! Error constructors sit on the hot path of every bounds check, so they are
//! marked `#[cold]` and `#[inline(always)]`: the failing branch stays out of the
//! way of the successful read.

use std::borrow::Cow;
use std::io;

use thiserror::Error;

use crate::types::SeekOrigin;

/// Set `GENERIC_READER_PANIC_ON_ERROR=1` at compile time to panic where an error is created.
pub const PANIC_ON_ERROR: bool = option_env!("GENERIC_READER_PANIC_ON_ERROR").is_some();

/// Check if `GENERIC_READER_PANIC_ON_ERROR` was set at compile time.
#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

/// A specialized `Result` for reader operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while acquiring or decoding bytes.
///
/// # Always use the constructor functions
///
/// Build errors through [`Error::unexpected_end`], [`Error::corrupt_archive`],
/// [`Error::invalid_seek_origin`] and [`Error::seek_overflow`] rather than the
/// variants. The constructors honour `GENERIC_READER_PANIC_ON_ERROR`, which
/// turns the creation site into a panic with a full backtrace:
///
/// ```bash
/// RUST_BACKTRACE=1 GENERIC_READER_PANIC_ON_ERROR=1 cargo test
/// ```
///
/// ```rust
/// use generic_reader::error::Error;
///
/// let err = Error::unexpected_end(4, 10);
/// assert_eq!(
///     err.to_string(),
///     "Unexpected end of data: requested 4 bytes at position 10"
/// );
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The source cannot supply the requested number of bytes.
    ///
    /// Do not construct this variant directly; use [`Error::unexpected_end`] instead.
    #[error("Unexpected end of data: requested {requested} bytes at position {position}")]
    UnexpectedEndOfData { requested: usize, position: i64 },

    /// The data describes an impossible encoding state.
    ///
    /// Do not construct this variant directly; use [`Error::corrupt_archive`] instead.
    #[error("Corrupt archive: {0}")]
    CorruptArchive(Cow<'static, str>),

    /// A raw seek origin outside `0..=2`.
    ///
    /// Do not construct this variant directly; use [`Error::invalid_seek_origin`] instead.
    #[error("Invalid seek origin: {0}")]
    InvalidSeekOrigin(i32),

    /// The seek target does not fit in an `i64`.
    ///
    /// Do not construct this variant directly; use [`Error::seek_overflow`] instead.
    #[error("Seek overflow: offset {offset} from {origin:?}")]
    SeekOverflow { offset: i64, origin: SeekOrigin },

    /// The underlying file or stream failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Creates a new [`Error::UnexpectedEndOfData`].
    ///
    /// If `GENERIC_READER_PANIC_ON_ERROR` is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unexpected_end(requested: usize, position: i64) -> Self {
        let err = Error::UnexpectedEndOfData {
            requested,
            position,
        };
        if should_panic_on_error() {
            panic!("GENERIC_READER_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::CorruptArchive`] from a string or static message.
    ///
    /// If `GENERIC_READER_PANIC_ON_ERROR` is set, this will panic with the error message.
    ///
    /// ```
    /// use generic_reader::error::Error;
    ///
    /// let err = Error::corrupt_archive("FString length is i32::MIN");
    /// let err = Error::corrupt_archive(format!("negative array length {}", -3));
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn corrupt_archive<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::CorruptArchive(s.into());
        if should_panic_on_error() {
            panic!("GENERIC_READER_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidSeekOrigin`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_seek_origin(origin: i32) -> Self {
        let err = Error::InvalidSeekOrigin(origin);
        if should_panic_on_error() {
            panic!("GENERIC_READER_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::SeekOverflow`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn seek_overflow(offset: i64, origin: SeekOrigin) -> Self {
        let err = Error::SeekOverflow { offset, origin };
        if should_panic_on_error() {
            panic!("GENERIC_READER_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Returns `true` for [`Error::UnexpectedEndOfData`].
    pub fn is_unexpected_end(&self) -> bool {
        matches!(self, Error::UnexpectedEndOfData { .. })
    }

    /// Returns `true` for [`Error::CorruptArchive`].
    pub fn is_corrupt_archive(&self) -> bool {
        matches!(self, Error::CorruptArchive(_))
    }
}

/// Ensures a condition is true; otherwise returns an [`enum@Error`].
///
/// A bare message becomes [`Error::CorruptArchive`].
///
/// ```
/// use generic_reader::ensure;
/// use generic_reader::error::Error;
///
/// fn check_count(n: i32) -> Result<(), Error> {
///     ensure!(n >= 0, "negative count {}", n);
///     Ok(())
/// }
/// assert!(check_count(-1).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal) => {
        if !$cond {
            return Err($crate::error::Error::corrupt_archive($msg));
        }
    };
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::error::Error::corrupt_archive(format!($fmt, $($arg)*)));
        }
    };
}

/// Returns early with an [`Error::CorruptArchive`].
///
/// ```
/// use generic_reader::bail;
/// use generic_reader::error::Error;
///
/// fn fail_fast() -> Result<(), Error> {
///     bail!("unknown chunk tag");
/// }
/// assert!(fail_fast().unwrap_err().is_corrupt_archive());
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::error::Error::corrupt_archive($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::corrupt_archive(format!($fmt, $($arg)*)))
    };
}

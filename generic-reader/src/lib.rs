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

//! # Generic Reader
//!
//! One reading API for native-order binary data, whatever holds the bytes.
//!
//! ## Architecture
//!
//! - **`reader`**: the [`GenericReader`] contract plus the file and stream backends
//! - **`buffer`**: in-memory backends, owned ([`MemoryReader`]) and borrowed ([`SpanReader`])
//! - **`codec`**: decoding of fixed-layout values, arrays and strings from acquired bytes
//! - **`pool`**: segmented pool of read-ahead arenas
//! - **`config`**: per-reader settings
//! - **`types`**: seek origins, string encodings and the [`FixedLayout`] bound
//! - **`error`**: error handling and result types
//!
//! ## Backends
//!
//! | Backend           | Source                      | Acquisition                           |
//! |-------------------|-----------------------------|---------------------------------------|
//! | [`MemoryReader`]  | shared `Arc<[u8]>`          | bounds-checked slice                  |
//! | [`SpanReader`]    | borrowed `&[u8]`            | bounds-checked slice, zero copy       |
//! | [`FileReader`]    | any [`RandomAccess`] source | positioned reads via a read-ahead buffer |
//! | [`StreamReader`]  | any `Read + Seek`           | direct reads into a scratch buffer    |
//!
//! Backends only acquire bytes; every typed read and every string rule is
//! shared, so all of them decode the same input identically.
//!
//! ## Strings
//!
//! An FString is an `i32` prefix followed by a null-terminated payload.
//! A positive prefix counts UTF-8 bytes, a negative one counts UTF-16 units,
//! zero is the empty string and `i32::MIN` is a corrupt archive.
//!
//! ```rust
//! use generic_reader::{GenericReader, MemoryReader, SeekOrigin};
//!
//! let mut bytes = Vec::new();
//! bytes.extend_from_slice(&(-3i32).to_ne_bytes());
//! for unit in "Hi\0".encode_utf16() {
//!     bytes.extend_from_slice(&unit.to_ne_bytes());
//! }
//!
//! let mut reader = MemoryReader::new(bytes);
//! assert_eq!(reader.read_fstring()?, "Hi");
//! assert_eq!(reader.remaining(), 0);
//!
//! reader.seek(0, SeekOrigin::Begin)?;
//! assert_eq!(reader.read::<i32>()?, -3);
//! # Ok::<(), generic_reader::Error>(())
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use generic_reader::config::ReaderConfig;
//! use generic_reader::{FileReader, GenericReader};
//!
//! let data: &[u8] = &[0u8; 64];
//! let config = ReaderConfig::new().read_ahead_capacity(16).pooled(false);
//! let mut reader = FileReader::with_config(data, config)?;
//! assert_eq!(reader.read_array::<u32>(4)?.len(), 4);
//! # Ok::<(), generic_reader::Error>(())
//! ```

pub mod buffer;
pub mod codec;
pub mod config;
pub mod error;
pub mod load;
pub mod pool;
pub mod reader;
pub mod types;

pub use buffer::{MemoryReader, SpanReader};
pub use codec::FStringHeader;
pub use config::ReaderConfig;
pub use error::{Error, Result};
pub use load::{load_whole_file, load_whole_stream};
pub use pool::{BufferPool, PooledBuffer};
pub use reader::{FileReader, GenericReader, RandomAccess, ReadAheadBuffer, StreamReader};
pub use types::{FixedLayout, SeekOrigin, StringEncoding};

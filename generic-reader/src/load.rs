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

use std::fs;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::buffer::MemoryReader;
use crate::error::Result;

/// Reads the whole file into memory.
pub fn load_whole_file<P: AsRef<Path>>(path: P) -> Result<MemoryReader> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!("loaded {} bytes from {}", bytes.len(), path.display());
    Ok(MemoryReader::new(bytes))
}

/// Drains `stream` into memory. The stream does not need to be seekable.
pub fn load_whole_stream<R: Read>(mut stream: R) -> Result<MemoryReader> {
    let mut bytes = Vec::new();
    stream.read_to_end(&mut bytes)?;
    debug!("loaded {} bytes from stream", bytes.len());
    Ok(MemoryReader::new(bytes))
}

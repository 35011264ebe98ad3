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

//! Decoding rules shared by every backend.
//!
//! Everything here works on byte spans that a backend has already acquired,
//! so the FString arithmetic, array sizing and text decoding exist exactly once
//! no matter where the bytes came from.

mod array;
mod primitive;
mod string;

pub use array::{array_byte_len, decode_array, length_from_prefix};
pub use primitive::{decode_bool, decode_fixed};
pub use string::{decode_ascii, decode_string, decode_utf16, decode_utf8, FStringHeader};

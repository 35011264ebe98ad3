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


use std::io::{Cursor, Write};

use generic_reader::config::ReaderConfig;
use generic_reader::{
    load_whole_file, load_whole_stream, BufferPool, FileReader, GenericReader, MemoryReader,
    SeekOrigin, StreamReader,
};
use test_helpers::{init_logger, private_config, CountingFile, Writer};

fn leaked_pool() -> &'static BufferPool {
    Box::leak(Box::new(BufferPool::new()))
}

#[test]
fn test_small_read_ahead_bounds_syscalls() {
    init_logger();
    let mut writer = Writer::new();
    writer.write_u32(1).write_u32(2).write_u32(3);
    let source = CountingFile::new(writer.dump());
    let mut reader = FileReader::with_config(&source, private_config(8)).unwrap();
    let values: Vec<u32> = (0..3).map(|_| reader.read_u32().unwrap()).collect();
    assert_eq!(values, [1, 2, 3]);
    assert!(source.calls() <= 2, "{} positioned reads", source.calls());
}

#[test]
fn test_default_read_ahead_single_syscall() {
    let source = CountingFile::new(vec![7; 1000]);
    let mut reader = FileReader::new(&source).unwrap();
    for _ in 0..250 {
        reader.read_u32().unwrap();
    }
    assert_eq!(source.calls(), 1);
    assert_eq!(reader.read_ahead().unwrap().cached_range(), 0..1000);
}

#[test]
fn test_out_of_range_never_touches_file() {
    let source = CountingFile::new(vec![0; 12]);
    let mut reader = FileReader::with_config(&source, private_config(8)).unwrap();
    reader.seek(1 << 40, SeekOrigin::Begin).unwrap();
    assert!(reader.read_u64().unwrap_err().is_unexpected_end());
    assert!(reader.read_ahead().is_none());
    assert_eq!(source.calls(), 0);
}

#[test]
fn test_real_file_backend() {
    init_logger();
    let mut writer = Writer::new();
    writer.write_u64(u64::MAX).write_fstring_utf16("Content/Maps").write_f32(0.5);
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(&writer.dump()).unwrap();
    tmp.flush().unwrap();

    let config = ReaderConfig::new().read_ahead_capacity(5).pooled(false);
    let file = std::fs::File::open(tmp.path()).unwrap();
    let mut reader = FileReader::with_config(file, config).unwrap();
    assert_eq!(reader.length(), writer.len() as i64);
    assert_eq!(reader.read_u64().unwrap(), u64::MAX);
    assert_eq!(reader.read_fstring().unwrap(), "Content/Maps");
    assert_eq!(reader.read_f32().unwrap(), 0.5);
    assert_eq!(reader.remaining(), 0);

    let mut reopened = FileReader::open(tmp.path()).unwrap();
    assert_eq!(reopened.read_at::<f32>(-4, SeekOrigin::End).unwrap(), 0.5);
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    match FileReader::open(dir.path().join("absent.uasset")) {
        Err(generic_reader::Error::Io(_)) => {}
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_pooled_arena_returned_once() {
    let pool = leaked_pool();
    let source = CountingFile::new(vec![1; 64]);
    let config = ReaderConfig::new().read_ahead_capacity(16).with_pool(pool);
    {
        let mut reader = FileReader::with_config(&source, config.clone()).unwrap();
        // nothing is rented before the first read
        assert!(reader.read_ahead().is_none());
        reader.read_u32().unwrap();
        assert_eq!(pool.idle_count(), 0);
    }
    assert_eq!(pool.idle_count(), 1);

    // the next reader on this thread reuses the arena
    let mut reader = FileReader::with_config(&source, config).unwrap();
    reader.read_u8().unwrap();
    assert_eq!(pool.idle_count(), 0);
    let source_back = reader.into_inner();
    assert_eq!(pool.idle_count(), 1);
    assert_eq!(source_back.calls(), 2);
}

#[test]
fn test_reader_dropped_after_error_returns_arena() {
    let pool = leaked_pool();
    let source = CountingFile::new(vec![0; 6]);
    let config = ReaderConfig::new().read_ahead_capacity(4).with_pool(pool);
    {
        let mut reader = FileReader::with_config(&source, config).unwrap();
        reader.read_u32().unwrap();
        assert!(reader.read_u32().unwrap_err().is_unexpected_end());
    }
    assert_eq!(pool.idle_count(), 1);
}

#[test]
fn test_stream_backend_lazy_reseek() {
    let mut writer = Writer::new();
    writer.write_i32(-1).write_fstring_utf8("stream").write_i64(99);
    let mut reader = StreamReader::new(Cursor::new(writer.dump())).unwrap();
    assert_eq!(reader.read_i32().unwrap(), -1);
    reader.skip(11).unwrap();
    assert_eq!(reader.read_i64().unwrap(), 99);
    assert_eq!(reader.read_at::<i32>(4, SeekOrigin::Begin).unwrap(), 7);
    assert_eq!(reader.read_string(6, Default::default()).unwrap(), "stream");
    let cursor = reader.into_inner();
    assert_eq!(cursor.position(), 14);
}

#[test]
fn test_load_whole_sources() {
    let mut writer = Writer::new();
    writer.write_u16(3).write_fstring_utf8("loaded");
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(&writer.dump()).unwrap();
    tmp.flush().unwrap();

    let mut from_file = load_whole_file(tmp.path()).unwrap();
    let mut from_stream = load_whole_stream(std::fs::File::open(tmp.path()).unwrap()).unwrap();
    for reader in [&mut from_file, &mut from_stream] {
        assert_eq!(reader.read_u16().unwrap(), 3);
        assert_eq!(reader.read_fstring().unwrap(), "loaded");
        assert_eq!(reader.remaining(), 0);
    }
}

#[test]
fn test_memory_slices_read_independently() {
    let mut writer = Writer::new();
    writer.write_u32(0xAAAA).write_u32(0xBBBB).write_u32(0xCCCC);
    let whole = MemoryReader::new(writer.dump());
    let mut middle = whole.slice(4, 8).unwrap();
    let mut last = middle.slice(4, 4).unwrap();
    assert_eq!(last.read_u32().unwrap(), 0xCCCC);
    assert_eq!(middle.read_u32().unwrap(), 0xBBBB);
    assert_eq!(middle.length(), 8);
    assert!(whole.slice(8, 8).unwrap_err().is_unexpected_end());
    assert!(whole.shares_storage(&last));
}

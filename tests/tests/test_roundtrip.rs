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


use generic_reader::{GenericReader, SeekOrigin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use test_helpers::{assert_at_end, Writer};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

#[derive(FromBytes, IntoBytes, Immutable, KnownLayout, Clone, Copy, Debug, PartialEq)]
#[repr(C)]
struct Vertex {
    x: f32,
    y: f32,
    z: f32,
    bone: u32,
}

#[derive(Debug, PartialEq)]
struct Sample {
    a: u8,
    b: i16,
    c: u32,
    d: i64,
    e: f32,
    f: f64,
}

fn random_sample(rng: &mut StdRng) -> Sample {
    Sample {
        a: rng.gen(),
        b: rng.gen(),
        c: rng.gen(),
        d: rng.gen(),
        // arbitrary bit patterns, NaNs included
        e: f32::from_bits(rng.gen()),
        f: f64::from_bits(rng.gen()),
    }
}

#[test]
fn test_primitives_bit_identical() {
    let mut rng = StdRng::seed_from_u64(7);
    let samples: Vec<Sample> = (0..32).map(|_| random_sample(&mut rng)).collect();
    let mut writer = Writer::new();
    for s in &samples {
        writer
            .write_u8(s.a)
            .write_i16(s.b)
            .write_u32(s.c)
            .write_i64(s.d)
            .write_f32(s.e)
            .write_f64(s.f);
    }
    for_each_backend!(writer.dump(), |reader| {
        for s in &samples {
            assert_eq!(reader.read_u8().unwrap(), s.a);
            assert_eq!(reader.read_i16().unwrap(), s.b);
            assert_eq!(reader.read_u32().unwrap(), s.c);
            assert_eq!(reader.read_i64().unwrap(), s.d);
            assert_eq!(reader.read_f32().unwrap().to_bits(), s.e.to_bits());
            assert_eq!(reader.read_f64().unwrap().to_bits(), s.f.to_bits());
        }
        assert_at_end(&reader);
    });
}

#[test]
fn test_struct_and_array_roundtrip() {
    let mut rng = StdRng::seed_from_u64(11);
    let vertices: Vec<Vertex> = (0..5)
        .map(|_| Vertex {
            x: rng.gen(),
            y: rng.gen(),
            z: rng.gen(),
            bone: rng.gen_range(0..64),
        })
        .collect();
    let mut writer = Writer::new();
    writer.write_u16(0xBEEF).write_bytes(vertices[0].as_bytes());
    writer.write_i32(vertices.len() as i32).write_bytes(vertices.as_slice().as_bytes());
    for_each_backend!(writer.dump(), |reader| {
        // the struct starts at an odd offset
        assert_eq!(reader.read::<u16>().unwrap(), 0xBEEF);
        assert_eq!(reader.read::<Vertex>().unwrap(), vertices[0]);
        assert_eq!(reader.read_prefixed_array::<Vertex>().unwrap(), vertices);
        assert_at_end(&reader);
        let again = reader
            .read_array_at::<Vertex>(2, 2 + 16 + 4, SeekOrigin::Begin)
            .unwrap();
        assert_eq!(again, &vertices[..2]);
    });
}

#[test]
fn test_bool_is_four_bytes() {
    let mut writer = Writer::new();
    writer.write_i32(1).write_i32(0).write_u8(9);
    for_each_backend!(writer.dump(), |reader| {
        assert!(reader.read_bool().unwrap());
        assert!(!reader.read_bool().unwrap());
        assert_eq!(reader.position(), 8);
        assert!(reader.read_bool().unwrap_err().is_unexpected_end());
    });
}

#[test]
fn test_bool_any_nonzero_is_true() {
    let mut writer = Writer::new();
    writer.write_i32(2).write_i32(-1).write_i32(0x0100).write_i32(0);
    for_each_backend!(writer.dump(), |reader| {
        let flags: Vec<bool> = (0..4).map(|_| reader.read_bool().unwrap()).collect();
        assert_eq!(flags, [true, true, true, false]);
    });
}

#[test]
fn test_zero_length_array_leaves_position() {
    let mut writer = Writer::new();
    writer.write_u32(5);
    for_each_backend!(writer.dump(), |reader| {
        reader.seek(2, SeekOrigin::Begin).unwrap();
        assert!(reader.read_array::<u64>(0).unwrap().is_empty());
        assert_eq!(reader.position(), 2);
        // no source access at all, even out of range
        reader.seek(100, SeekOrigin::Begin).unwrap();
        assert!(reader.read_array::<u32>(0).unwrap().is_empty());
        assert_eq!(reader.position(), 100);
    });
}

#[test]
fn test_array_longer_than_source() {
    let mut writer = Writer::new();
    writer.write_i32(3).write_u32(1).write_u32(2);
    for_each_backend!(writer.dump(), |reader| {
        assert!(reader.read_prefixed_array::<u32>().unwrap_err().is_unexpected_end());
    });
}

#[test]
fn test_negative_array_prefix() {
    let mut writer = Writer::new();
    writer.write_i32(-2);
    for_each_backend!(writer.dump(), |reader| {
        assert!(reader.read_prefixed_array::<u32>().unwrap_err().is_corrupt_archive());
    });
}

#[test]
fn test_factory_array_nested_reads() {
    // each element is a u16 id followed by its own prefixed u32 list
    let mut writer = Writer::new();
    writer.write_i32(3);
    for id in 0..3u16 {
        writer.write_u16(id).write_i32(id as i32);
        for v in 0..id as u32 {
            writer.write_u32(v * 10);
        }
    }
    for_each_backend!(writer.dump(), |reader| {
        let mut order = Vec::new();
        let entries = reader
            .read_prefixed_array_with(|r| {
                let id = r.read_u16()?;
                order.push(id);
                let values = r.read_prefixed_array::<u32>()?;
                Ok((id, values))
            })
            .unwrap();
        assert_eq!(order, [0, 1, 2]);
        assert_eq!(entries, vec![(0, vec![]), (1, vec![0]), (2, vec![0, 10])]);
        assert_at_end(&reader);
    });
}

#[test]
fn test_factory_error_aborts() {
    let mut writer = Writer::new();
    writer.write_u32(1).write_u32(2);
    for_each_backend!(writer.dump(), |reader| {
        let mut calls = 0;
        let err = reader
            .read_array_with(4, |r| {
                calls += 1;
                r.read_u32()
            })
            .unwrap_err();
        assert!(err.is_unexpected_end());
        assert_eq!(calls, 3);
    });
}

#[test]
fn test_read_into_and_bytes() {
    let data: Vec<u8> = (0..20).collect();
    for_each_backend!(data, |reader| {
        let mut head = [0u8; 4];
        reader.read_into(&mut head).unwrap();
        assert_eq!(head, [0, 1, 2, 3]);
        assert_eq!(reader.read_bytes(10).unwrap(), (4..14).collect::<Vec<u8>>());
        assert!(reader.read_bytes(7).unwrap_err().is_unexpected_end());
    });
}

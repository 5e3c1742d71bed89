//! Benchmarks for the stream codecs.
//!
//! Measures decode and encode throughput for:
//! - ULEB128 values of increasing encoded length
//! - SLEB128 values around the sign boundaries
//! - Fixed-width integers in little and big byte order
//! - Forward search over a larger buffer

extern crate datastream;

use criterion::{criterion_group, criterion_main, Criterion};
use datastream::{prelude::*, stream::leb128};
use std::{hint::black_box, io::SeekFrom};

/// Benchmark decoding single-byte ULEB128 values.
fn bench_uleb128_decode_short(c: &mut Criterion) {
    let data = leb128::encode_uleb128(0x7F, None);

    c.bench_function("uleb128_decode_1byte", |b| {
        b.iter(|| {
            let mut reader = StreamReader::new(black_box(data.as_slice()));
            black_box(reader.read_uleb128().unwrap())
        });
    });
}

/// Benchmark decoding the longest ULEB128 encoding of a 64-bit value.
fn bench_uleb128_decode_long(c: &mut Criterion) {
    let data = leb128::encode_uleb128(u64::MAX, None);

    c.bench_function("uleb128_decode_10bytes", |b| {
        b.iter(|| {
            let mut reader = StreamReader::new(black_box(data.as_slice()));
            black_box(reader.read_uleb128().unwrap())
        });
    });
}

/// Benchmark decoding a run of 1024 mixed-length ULEB128 values through the capped variant.
fn bench_uleb128_decode_run(c: &mut Criterion) {
    let mut writer = StreamWriter::default();
    for i in 0..1024u64 {
        writer.write_uleb128(i.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> (i % 64)).unwrap();
    }
    let data = writer.into_bytes().unwrap();

    c.bench_function("uleb128_decode_run_1024", |b| {
        b.iter(|| {
            let mut reader = StreamReader::new(black_box(data.as_slice()));
            let mut sum = 0u64;
            for _ in 0..1024 {
                sum = sum.wrapping_add(reader.read_uleb128_safe().unwrap());
            }
            black_box(sum)
        });
    });
}

/// Benchmark decoding SLEB128 values at the sign boundaries.
fn bench_sleb128_decode(c: &mut Criterion) {
    let mut writer = StreamWriter::default();
    for value in [-1i64, 63, -64, 64, -65, i64::MIN, i64::MAX] {
        writer.write_sleb128(value).unwrap();
    }
    let data = writer.into_bytes().unwrap();

    c.bench_function("sleb128_decode_boundaries", |b| {
        b.iter(|| {
            let mut reader = StreamReader::new(black_box(data.as_slice()));
            let mut sum = 0i64;
            for _ in 0..7 {
                sum = sum.wrapping_add(reader.read_sleb128().unwrap());
            }
            black_box(sum)
        });
    });
}

/// Benchmark encoding ULEB128 and SLEB128 values into a reused stream.
fn bench_leb128_encode(c: &mut Criterion) {
    let mut writer = StreamWriter::default();

    c.bench_function("leb128_encode_pair", |b| {
        b.iter(|| {
            writer.seek(SeekFrom::Start(0)).unwrap();
            writer.write_uleb128(black_box(624_485)).unwrap();
            writer.write_sleb128(black_box(-123_456)).unwrap();
        });
    });
}

/// Benchmark reading fixed-width integers in both byte orders.
fn bench_fixed_width_read(c: &mut Criterion) {
    let data = vec![0xA5u8; 15 * 64];

    for order in [ByteOrder::Little, ByteOrder::Big] {
        c.bench_function(&format!("fixed_width_read_{order}"), |b| {
            b.iter(|| {
                let mut reader =
                    StreamReader::with_config(black_box(data.as_slice()), StreamConfig::new(order));
                let mut sum = 0u64;
                for _ in 0..64 {
                    sum = sum.wrapping_add(u64::from(reader.read_u8().unwrap()));
                    sum = sum.wrapping_add(u64::from(reader.read_u16().unwrap()));
                    sum = sum.wrapping_add(u64::from(reader.read_u32().unwrap()));
                    sum = sum.wrapping_add(reader.read_u64().unwrap());
                }
                black_box(sum)
            });
        });
    }
}

/// Benchmark forward search for a pattern at the end of a 64 KiB buffer.
fn bench_search(c: &mut Criterion) {
    let mut data = vec![0u8; 64 * 1024];
    data.extend_from_slice(b"needle");
    let reader = StreamReader::new(data);

    c.bench_function("search_64k", |b| {
        b.iter(|| black_box(reader.search(black_box(b"needle")).unwrap()));
    });
}

criterion_group!(
    benches,
    // Varint decoding
    bench_uleb128_decode_short,
    bench_uleb128_decode_long,
    bench_uleb128_decode_run,
    bench_sleb128_decode,
    // Varint encoding
    bench_leb128_encode,
    // Fixed-width
    bench_fixed_width_read,
    // Search
    bench_search,
);
criterion_main!(benches);

//! Performance benchmarks for gbalz-lzss
//!
//! This benchmark suite evaluates:
//! - Compression/decompression speed for LZ10 and LZ11
//! - The cost of VRAM-safe encoding
//! - Performance with various data patterns
//! - Streaming decoder overhead against the one-shot decoder

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gbalz_core::traits::Decompressor;
use gbalz_lzss::{LzMode, LzssOptions, StreamingLzssDecoder, decode, encode};
use std::hint::black_box;

/// Type alias for pattern generator functions
type PatternGenerator = fn(usize) -> Vec<u8>;

/// Generate test data patterns for benchmarking
mod test_data {
    /// Uniform data - all bytes are the same (best compression)
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    /// Random data - no patterns (worst compression)
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Text-like data - scripts and dialogue tables
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. \
                     How vexingly quick daft zebras jump! ";
        text.iter().copied().cycle().take(size).collect()
    }

    /// Tile-like data - 8x8 4bpp tiles with a small palette
    pub fn tiles(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x0F0F_1234;
        while data.len() < size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            let tile = (seed >> 40) as u8 & 0x3;
            for row in 0..8u8 {
                for _ in 0..4 {
                    data.push(tile.wrapping_mul(0x11) ^ (row & 1));
                }
            }
        }
        data.truncate(size);
        data
    }
}

/// Standard data sizes for benchmarking
mod data_sizes {
    pub const SMALL: usize = 4 * 1024; // 4 KB
    pub const MEDIUM: usize = 32 * 1024; // 32 KB
    pub const LARGE: usize = 256 * 1024; // 256 KB
}

const MODES: [LzMode; 2] = [LzMode::Lz10, LzMode::Lz11];

/// Benchmark compression across modes and VRAM policy
fn bench_compression_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_modes");
    let data = test_data::tiles(data_sizes::MEDIUM);

    for mode in MODES {
        for vram in [false, true] {
            let id = format!("{}/vram={}", mode, vram);
            group.throughput(Throughput::Bytes(data.len() as u64));
            group.bench_with_input(BenchmarkId::from_parameter(&id), &data, |b, data| {
                b.iter(|| black_box(encode(black_box(data), mode, vram).unwrap()));
            });
        }
    }

    group.finish();
}

/// Benchmark compression speed for different data types
fn bench_compression_data_types(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_data_types");

    let patterns: [(&str, PatternGenerator); 4] = [
        ("uniform", test_data::uniform as PatternGenerator),
        ("random", test_data::random as PatternGenerator),
        ("text", test_data::text_like as PatternGenerator),
        ("tiles", test_data::tiles as PatternGenerator),
    ];

    for (name, generator) in patterns {
        let data = generator(data_sizes::SMALL);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &data, |b, data| {
            b.iter(|| black_box(encode(black_box(data), LzMode::Lz11, true).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark decompression for both modes
fn bench_decompression_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompression_modes");
    let data = test_data::text_like(data_sizes::LARGE);

    for mode in MODES {
        let compressed = encode(&data, mode, false).unwrap();
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(mode.name()),
            &compressed,
            |b, compressed| {
                b.iter(|| black_box(decode(black_box(compressed), mode, false).unwrap()));
            },
        );
    }

    group.finish();
}

/// Benchmark the streaming decoder against the one-shot decoder
fn bench_streaming_decoder(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming_decoder");
    let data = test_data::tiles(data_sizes::LARGE);
    let compressed = encode(&data, LzMode::Lz10, true).unwrap();
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("one_shot", |b| {
        b.iter(|| black_box(decode(black_box(&compressed), LzMode::Lz10, true).unwrap()));
    });

    for chunk in [64usize, 4096] {
        group.bench_with_input(BenchmarkId::new("chunked", chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let mut decoder = StreamingLzssDecoder::new(LzssOptions::new(LzMode::Lz10));
                let mut buf = vec![0u8; chunk];
                let mut pos = 0;
                let mut total = 0;
                while !decoder.is_finished() {
                    let end = (pos + chunk).min(compressed.len());
                    let (consumed, produced, _) =
                        decoder.decompress(&compressed[pos..end], &mut buf).unwrap();
                    pos += consumed;
                    total += produced;
                }
                black_box(total)
            });
        });
    }

    group.finish();
}

/// Print compression ratios once (not timed)
fn bench_compression_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_ratio");
    let data = test_data::text_like(data_sizes::SMALL);

    for mode in MODES {
        let compressed = encode(&data, mode, false).unwrap();
        println!(
            "{}: {} -> {} bytes ({:.1}%)",
            mode,
            data.len(),
            compressed.len(),
            compressed.len() as f64 * 100.0 / data.len() as f64
        );
        group.bench_with_input(BenchmarkId::from_parameter(mode.name()), &data, |b, data| {
            b.iter(|| black_box(encode(black_box(data), mode, false).unwrap().len()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compression_modes,
    bench_compression_data_types,
    bench_decompression_modes,
    bench_streaming_decoder,
    bench_compression_ratio,
);
criterion_main!(benches);

//! Benchmark suite for ART sprite decoding
//!
//! Measures RLE decoding, whole-file decoding and palette resolution on
//! synthetic sprites.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use isoart_benches::{encode_rle, generate_frame_pixels, generate_palette, generate_test_art_data, sizes};
use isoart_types::file::art::{File, rle};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hint::black_box;

/// Benchmark single-frame RLE decoding at several frame sizes
fn bench_rle_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("art_rle");
	let mut rng = SmallRng::seed_from_u64(42);

	for (name, (width, height)) in
		[("tiny", sizes::TINY), ("character", sizes::CHARACTER), ("large", sizes::LARGE), ("screen", sizes::SCREEN)]
	{
		let pixels = generate_frame_pixels(width, height, &mut rng);
		let payload = encode_rle(&pixels);
		let pixel_count = pixels.len();

		group.throughput(Throughput::Elements(pixel_count as u64));
		group.bench_with_input(BenchmarkId::new("decode", name), &payload, |b, payload| {
			b.iter(|| black_box(rle::decode(black_box(payload), pixel_count)));
		});
	}

	// stored frames are a plain copy
	let raw = vec![7u8; (sizes::CHARACTER.0 * sizes::CHARACTER.1) as usize];
	group.bench_function("stored_character", |b| {
		b.iter(|| black_box(rle::decode(black_box(&raw), raw.len())));
	});

	group.finish();
}

/// Benchmark decoding complete files
fn bench_file_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("art_file");

	let workloads = [
		("static_props", generate_test_art_data(false, 16, sizes::TINY, 1)),
		("walk_cycle", generate_test_art_data(true, 8, sizes::CHARACTER, 4)),
		("large_creature", generate_test_art_data(true, 12, sizes::LARGE, 4)),
	];

	for (name, data) in &workloads {
		group.throughput(Throughput::Bytes(data.len() as u64));
		group.bench_with_input(BenchmarkId::new("from_bytes", name), data, |b, data| {
			b.iter(|| black_box(File::from_bytes(black_box(data))));
		});
	}

	group.finish();
}

/// Benchmark palette resolution of decoded frames
fn bench_resolve(c: &mut Criterion) {
	let mut group = c.benchmark_group("art_resolve");

	let data = generate_test_art_data(true, 8, sizes::CHARACTER, 4);
	let Ok(art) = File::from_bytes(&data) else {
		eprintln!("Warning: Could not decode synthetic sprite for resolve benchmark");
		return;
	};

	let pixels_per_frame = u64::from(sizes::CHARACTER.0 * sizes::CHARACTER.1);
	group.throughput(Throughput::Elements(pixels_per_frame));
	group.bench_function("single_frame", |b| {
		b.iter(|| black_box(art.resolve_frame(black_box(17), 2)));
	});

	group.throughput(Throughput::Elements(pixels_per_frame * u64::from(art.frame_num())));
	group.bench_function("whole_sprite", |b| {
		b.iter(|| {
			for index in 0..art.frames().len() {
				black_box(art.resolve_frame(index, 2).ok());
			}
		});
	});

	let palette = generate_palette(9);
	let indices: Vec<u8> = (0..65536).map(|i| (i % 256) as u8).collect();
	group.throughput(Throughput::Elements(indices.len() as u64));
	group.bench_function("palette_64k", |b| {
		b.iter(|| black_box(palette.resolve(black_box(&indices))));
	});

	group.finish();
}

criterion_group!(benches, bench_rle_decode, bench_file_decode, bench_resolve);

criterion_main!(benches);

//! Benchmark suite for the sprite run-length codec
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml --bench rle_codec

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sprset_benches::{generate_bitmap, sizes};
use sprset_types::file::{BitDepth, Bitmap, PixelCodec, RleCodec};
use std::hint::black_box;

const DEPTHS: [BitDepth; 3] = [BitDepth::Indexed8, BitDepth::HighColor16, BitDepth::TrueColor32];

/// Benchmark compression across bit depths and run lengths
fn bench_compress(c: &mut Criterion) {
	let mut group = c.benchmark_group("rle_compress");

	for bpp in DEPTHS {
		for run_len in [1, 16] {
			let image = generate_bitmap(sizes::ROOM.0, sizes::ROOM.1, bpp, run_len);
			group.throughput(Throughput::Bytes(image.pixels().len() as u64));
			group.bench_with_input(
				BenchmarkId::new(format!("{bpp}"), format!("run{run_len}")),
				&image,
				|b, image| {
					let mut out = Vec::new();
					b.iter(|| {
						out.clear();
						RleCodec.compress(black_box(image), &mut out);
						black_box(out.len())
					});
				},
			);
		}
	}

	group.finish();
}

/// Benchmark decompression across bit depths and run lengths
fn bench_decompress(c: &mut Criterion) {
	let mut group = c.benchmark_group("rle_decompress");

	for bpp in DEPTHS {
		for run_len in [1, 16] {
			let image = generate_bitmap(sizes::ROOM.0, sizes::ROOM.1, bpp, run_len);
			let mut packed = Vec::new();
			RleCodec.compress(&image, &mut packed);

			group.throughput(Throughput::Bytes(image.pixels().len() as u64));
			group.bench_with_input(
				BenchmarkId::new(format!("{bpp}"), format!("run{run_len}")),
				&packed,
				|b, packed| {
					let mut target = Bitmap::new(image.width(), image.height(), bpp);
					b.iter(|| {
						RleCodec.decompress(black_box(packed), &mut target).unwrap();
						black_box(target.pixels()[0])
					});
				},
			);
		}
	}

	group.finish();
}

/// Benchmark a large background through the whole codec
fn bench_round_trip_hd(c: &mut Criterion) {
	let mut group = c.benchmark_group("rle_round_trip");
	let image = generate_bitmap(sizes::HD_ROOM.0, sizes::HD_ROOM.1, BitDepth::TrueColor32, 8);

	group.throughput(Throughput::Bytes(image.pixels().len() as u64));
	group.bench_function("hd_true_color", |b| {
		let mut packed = Vec::new();
		let mut target = Bitmap::new(image.width(), image.height(), image.bpp());
		b.iter(|| {
			packed.clear();
			RleCodec.compress(black_box(&image), &mut packed);
			RleCodec.decompress(&packed, &mut target).unwrap();
			black_box(target.pixels()[0])
		});
	});

	group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress, bench_round_trip_hd);

criterion_main!(benches);

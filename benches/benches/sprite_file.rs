//! Benchmark suite for sprite set containers
//!
//! Compares opening with and without a companion index, sequential and
//! random-order loading, and verbatim against re-encoding saves.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml --bench sprite_file

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sprset_benches::{generate_container, generate_sprite_set, sizes};
use sprset_types::file::spr::{File, SaveOptions, SpriteSet, write_sprite_file};
use sprset_types::file::{BitDepth, RleCodec};
use std::hint::black_box;
use std::io::Cursor;

/// Benchmark opening a container by scanning versus through its index
fn bench_open(c: &mut Criterion) {
	let mut group = c.benchmark_group("spr_open");
	let sprites = generate_sprite_set(2000, sizes::ICON, BitDepth::Indexed8);

	for compress in [false, true] {
		let (data, index) = generate_container(&sprites, compress);
		let index_bytes = index.to_bytes();
		let label = if compress { "compressed" } else { "raw" };

		group.bench_with_input(BenchmarkId::new("rebuild", label), &data, |b, data| {
			b.iter(|| black_box(File::from_reader(Cursor::new(data.as_slice())).unwrap().slot_count()));
		});
		group.bench_with_input(BenchmarkId::new("index", label), &data, |b, data| {
			b.iter(|| {
				let mut index_reader = index_bytes.as_slice();
				let file =
					File::from_reader_with_index(Cursor::new(data.as_slice()), &mut index_reader)
						.unwrap();
				black_box(file.slot_count())
			});
		});
	}

	group.finish();
}

/// Benchmark loading every sprite in key order and in reverse
fn bench_load_all(c: &mut Criterion) {
	let mut group = c.benchmark_group("spr_load_all");
	let sprites = generate_sprite_set(200, sizes::CHARACTER, BitDepth::HighColor16);
	let (data, _) = generate_container(&sprites, true);
	let mut file = File::from_reader(Cursor::new(data.as_slice())).unwrap();
	let topmost = file.topmost_sprite().unwrap_or_default();

	group.throughput(Throughput::Elements(u64::from(topmost) + 1));
	group.bench_function("sequential", |b| {
		b.iter(|| {
			for key in 0..=topmost {
				black_box(file.load_sprite(key).unwrap());
			}
		});
	});
	group.bench_function("reverse", |b| {
		b.iter(|| {
			for key in (0..=topmost).rev() {
				black_box(file.load_sprite(key).unwrap());
			}
		});
	});

	group.finish();
}

/// Benchmark resaving a container with and without a compression change
fn bench_resave(c: &mut Criterion) {
	let mut group = c.benchmark_group("spr_resave");
	let sprites = generate_sprite_set(200, sizes::CHARACTER, BitDepth::TrueColor32);
	let (data, _) = generate_container(&sprites, true);
	let no_changes = SpriteSet::new();

	for compress in [true, false] {
		let label = if compress { "verbatim" } else { "reencode" };
		group.bench_function(label, |b| {
			let mut source = File::from_reader(Cursor::new(data.as_slice())).unwrap();
			let options = SaveOptions::new(compress);
			let mut out = Cursor::new(Vec::with_capacity(data.len() * 2));
			b.iter(|| {
				out.set_position(0);
				let index =
					write_sprite_file(&mut out, &no_changes, Some(&mut source), &options, RleCodec)
						.unwrap();
				black_box(index.len())
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_open, bench_load_all, bench_resave);

criterion_main!(benches);

//! On-disk tests for sprite set files in `sprset-rs`

mod index;
mod roundtrip;

use std::path::Path;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sprset_rs::prelude::*;

/// Builds a sparse set of random sprites with short runs so both packet
/// kinds of the compressor are exercised.
fn random_set(seed: u64, topmost: SpriteKey) -> SpriteSet {
	let mut rng = SmallRng::seed_from_u64(seed);
	let depths = [BitDepth::Indexed8, BitDepth::HighColor16, BitDepth::TrueColor32];

	let mut set = SpriteSet::new();
	for key in 0..=topmost {
		if rng.random_bool(0.3) {
			continue;
		}
		let width = rng.random_range(1..=40);
		let height = rng.random_range(1..=24);
		let bpp = depths[rng.random_range(0..depths.len())];

		let len = usize::from(width) * usize::from(height) * bpp.bytes();
		let mut pixels = Vec::with_capacity(len);
		while pixels.len() < len {
			let value: u8 = rng.random();
			let run = rng.random_range(1..=9).min(len - pixels.len());
			pixels.extend(std::iter::repeat_n(value, run));
		}
		set.insert(key, Bitmap::from_pixels(width, height, bpp, pixels).unwrap());
	}
	set
}

/// Saves `set` to `path` without a source container.
fn save_fresh(path: &Path, set: &SpriteSet, options: &SaveOptions) -> SpriteFileIndex {
	save_sprite_file(path, set, None::<&mut SprFile<std::fs::File>>, options).unwrap()
}

/// Asserts that every key of `file` decodes to what `expected` holds.
fn assert_matches_set<R>(file: &mut SprFile<R>, expected: &SpriteSet)
where
	R: std::io::Read + std::io::Seek,
{
	for key in 0..file.slot_count() as SpriteKey {
		let loaded = file.load_sprite(key).unwrap();
		assert_eq!(loaded.as_ref(), expected.get(key), "key {key}");
	}
}

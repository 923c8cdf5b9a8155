//! Benchmark helper utilities for sprset-rs
//!
//! This module provides generators for synthetic sprites and sprite sets, so
//! the benchmarks do not depend on game data being present.

use sprset_types::file::spr::{SaveOptions, SpriteSet, write_sprite_set};
use sprset_types::file::{BitDepth, Bitmap, SpriteFileIndex};
use std::io::Cursor;

/// Generates a bitmap made of horizontal runs of `run_len` equal pixels.
///
/// A `run_len` of 1 gives a worst case for the run-length codec, larger
/// values approach typical flat-shaded game art.
pub fn generate_bitmap(width: u16, height: u16, bpp: BitDepth, run_len: usize) -> Bitmap {
	let unit = bpp.bytes();
	let run_len = run_len.max(1);
	let pixel_count = usize::from(width) * usize::from(height);

	let mut pixels = Vec::with_capacity(pixel_count * unit);
	for index in 0..pixel_count {
		let value = (index / run_len).wrapping_mul(31) as u32;
		pixels.extend_from_slice(&value.to_le_bytes()[..unit]);
	}

	Bitmap::from_pixels(width, height, bpp, pixels).expect("generated pixel count matches size")
}

/// Generates a set of `count` sprites with every fourth key left empty.
pub fn generate_sprite_set(count: u32, size: (u16, u16), bpp: BitDepth) -> SpriteSet {
	(0..count)
		.filter(|key| key % 4 != 3)
		.map(|key| (key, generate_bitmap(size.0, size.1, bpp, 1 + key as usize % 8)))
		.collect()
}

/// Serializes `sprites` into an in-memory container and its index.
pub fn generate_container(sprites: &SpriteSet, compress: bool) -> (Vec<u8>, SpriteFileIndex) {
	let mut out = Cursor::new(Vec::new());
	let options = SaveOptions::new(compress).with_file_id(0x5EED);
	let index = write_sprite_set(&mut out, sprites, &options).expect("in-memory write succeeds");
	(out.into_inner(), index)
}

/// Common benchmark sizes for synthetic sprites
pub mod sizes {
	/// Icon: 16x16 (256 pixels)
	pub const ICON: (u16, u16) = (16, 16);
	/// Character: 64x96 (6,144 pixels)
	pub const CHARACTER: (u16, u16) = (64, 96);
	/// Room background: 320x200 (64,000 pixels)
	pub const ROOM: (u16, u16) = (320, 200);
	/// HD background: 1280x720 (921,600 pixels)
	pub const HD_ROOM: (u16, u16) = (1280, 720);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_bitmap() {
		let bitmap = generate_bitmap(10, 2, BitDepth::HighColor16, 4);

		assert_eq!(bitmap.pixels().len(), 40);
		assert_eq!(&bitmap.pixels()[0..8], &[0, 0, 0, 0, 0, 0, 0, 0]);
		assert_eq!(&bitmap.pixels()[8..10], &[31, 0]);
	}

	#[test]
	fn test_generate_sprite_set() {
		let set = generate_sprite_set(8, sizes::ICON, BitDepth::Indexed8);

		assert_eq!(set.len(), 6);
		assert!(set.get(3).is_none());
		assert_eq!(set.topmost(), Some(6));
	}

	#[test]
	fn test_generate_container() {
		let set = generate_sprite_set(4, sizes::ICON, BitDepth::TrueColor32);
		let (data, index) = generate_container(&set, true);

		assert_eq!(&data[2..15], b" Sprite File ");
		assert_eq!(index.len(), 3);
	}
}

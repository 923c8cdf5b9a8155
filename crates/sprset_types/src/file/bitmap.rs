//! Minimal pixel buffer used by sprite set containers.
//!
//! Pixels are kept as little-endian bytes exactly as they are stored in an
//! uncompressed container, `width * height * bpp` bytes in row-major order.

use std::collections::TryReserveError;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::file::SpriteFileError;

/// Number of bytes used by one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum BitDepth {
	/// 8-bit palette indices
	Indexed8 = 1,

	/// 16-bit high color
	HighColor16 = 2,

	/// 32-bit true color
	TrueColor32 = 4,
}

impl BitDepth {
	/// Bytes per pixel.
	pub fn bytes(self) -> usize {
		self as usize
	}

	/// Raw tag value as stored in a slot header.
	pub fn tag(self) -> u16 {
		self as u16
	}

	/// Bits per pixel.
	pub fn bits(self) -> u32 {
		u32::from(self.tag()) * 8
	}
}

impl TryFrom<u16> for BitDepth {
	type Error = u16;

	fn try_from(value: u16) -> Result<Self, Self::Error> {
		match value {
			1 => Ok(Self::Indexed8),
			2 => Ok(Self::HighColor16),
			4 => Ok(Self::TrueColor32),
			other => Err(other),
		}
	}
}

impl Display for BitDepth {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}-bit", self.bits())
	}
}

/// A raster image with a fixed bit depth.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bitmap {
	width: u16,
	height: u16,
	bpp: BitDepth,
	pixels: Vec<u8>,
}

impl Bitmap {
	/// Creates a zero-filled bitmap.
	pub fn new(width: u16, height: u16, bpp: BitDepth) -> Self {
		Self {
			width,
			height,
			bpp,
			pixels: vec![0; Self::byte_len(width, height, bpp)],
		}
	}

	/// Creates a zero-filled bitmap, reporting allocation failure instead of
	/// aborting.
	pub fn try_new(width: u16, height: u16, bpp: BitDepth) -> Result<Self, TryReserveError> {
		let len = Self::byte_len(width, height, bpp);
		let mut pixels = Vec::new();
		pixels.try_reserve_exact(len)?;
		pixels.resize(len, 0);
		Ok(Self {
			width,
			height,
			bpp,
			pixels,
		})
	}

	/// Wraps existing pixel bytes.
	///
	/// # Errors
	///
	/// Returns [`SpriteFileError::PixelSizeMismatch`] if `pixels` is not
	/// exactly `width * height * bpp` bytes long.
	pub fn from_pixels(
		width: u16,
		height: u16,
		bpp: BitDepth,
		pixels: Vec<u8>,
	) -> Result<Self, SpriteFileError> {
		let expected = Self::byte_len(width, height, bpp);
		if pixels.len() != expected {
			return Err(SpriteFileError::PixelSizeMismatch {
				expected,
				actual: pixels.len(),
			});
		}
		Ok(Self {
			width,
			height,
			bpp,
			pixels,
		})
	}

	/// Width in pixels.
	pub fn width(&self) -> u16 {
		self.width
	}

	/// Height in pixels.
	pub fn height(&self) -> u16 {
		self.height
	}

	/// Pixel depth.
	pub fn bpp(&self) -> BitDepth {
		self.bpp
	}

	/// Raw pixel bytes.
	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}

	/// Mutable raw pixel bytes.
	pub fn pixels_mut(&mut self) -> &mut [u8] {
		&mut self.pixels
	}

	/// Number of bytes in one row.
	pub fn stride(&self) -> usize {
		usize::from(self.width) * self.bpp.bytes()
	}

	/// Iterates over pixel rows.
	pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
		self.pixels.chunks_exact(self.stride().max(1))
	}

	#[inline]
	fn byte_len(width: u16, height: u16, bpp: BitDepth) -> usize {
		usize::from(width) * usize::from(height) * bpp.bytes()
	}
}

impl Display for Bitmap {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}x{} {}", self.width, self.height, self.bpp)
	}
}

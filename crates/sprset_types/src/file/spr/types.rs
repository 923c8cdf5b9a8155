//! Data types shared by the sprite set reader, writer and recombiner.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::constants::NO_OFFSET;

/// Key of a sprite slot.
pub type SpriteKey = u32;

/// Location of one slot within the container stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SlotData {
	/// Absolute stream position of the slot header, [`NO_OFFSET`] if absent
	pub offset: u64,
}

impl SlotData {
	/// Returns `true` if the slot is known to the file.
	#[inline]
	pub fn is_present(&self) -> bool {
		self.offset != NO_OFFSET
	}
}

/// Dimensions of a stored sprite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteMetric {
	/// Width in pixels
	pub width: u16,
	/// Height in pixels
	pub height: u16,
}

impl SpriteMetric {
	/// Creates a new metric.
	pub fn new(width: u16, height: u16) -> Self {
		Self {
			width,
			height,
		}
	}
}

impl Display for SpriteMetric {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}x{}", self.width, self.height)
	}
}

/// Undecoded payload of one slot, as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawSprite {
	/// Sprite dimensions
	pub metric: SpriteMetric,
	/// Bit depth tag exactly as stored
	pub bpp: u16,
	/// Payload bytes, still compressed if the container is
	pub data: Vec<u8>,
}

/// Summary of a populated slot, built from the slot table alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotInfo {
	/// Sprite key
	pub key: SpriteKey,
	/// Absolute stream position of the slot header
	pub offset: u64,
	/// Sprite dimensions, zero for slots holding an empty marker
	pub metric: SpriteMetric,
}

/// Where a container's slot table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexSource {
	/// Loaded from a valid companion index file
	IndexFile,
	/// Reconstructed by scanning the container body
	Rebuilt,
}

impl Display for IndexSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			IndexSource::IndexFile => write!(f, "index file"),
			IndexSource::Rebuilt => write!(f, "rebuilt"),
		}
	}
}

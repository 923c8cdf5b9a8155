//! Error types for sprite set containers and their companion index files.

use std::path::PathBuf;

use thiserror::Error;

use crate::file::spr::SpriteKey;

/// Reasons for rejecting a companion index file.
///
/// A rejected index is never fatal: the container reader falls back to
/// scanning the container body instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IndexRejection {
	/// Index does not start with the `SPRINDEX` magic
	#[error("Invalid index magic: {0:02X?}")]
	BadMagic([u8; 8]),

	/// Index version is outside the supported range
	#[error("Unsupported index version {0}")]
	UnsupportedVersion(i32),

	/// Index was written for a different container
	#[error("Index file id {actual} does not match container file id {expected}")]
	FileIdMismatch {
		/// File id stored in the container header
		expected: i32,
		/// File id stored in the index
		actual: i32,
	},

	/// Stored count is not `topmost + 1`
	#[error("Index count {count} does not match topmost {topmost} + 1")]
	CountMismatch {
		/// Stored topmost key
		topmost: i32,
		/// Stored entry count
		count: i32,
	},

	/// Index topmost key disagrees with the container's
	#[error("Index holds {actual} slots, container holds {expected}")]
	TopmostMismatch {
		/// Slot count of the container
		expected: usize,
		/// Slot count of the index
		actual: usize,
	},
}

/// Errors raised by the pixel compression codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
	/// Stored payload length is zero
	#[error("Compressed payload is empty")]
	Empty,

	/// Compressed stream ended before the image was filled
	#[error("Compressed data ended early in row {row}")]
	Truncated {
		/// Row being decoded
		row: usize,
	},

	/// A packet would write past the end of a row
	#[error("Packet overruns row {row}")]
	RowOverrun {
		/// Row being decoded
		row: usize,
	},

	/// Bytes left over after the image was filled
	#[error("{0} trailing bytes after compressed image")]
	TrailingBytes(usize),
}

/// Errors that can occur when reading or writing sprite set files
#[derive(Debug, Error)]
pub enum SpriteFileError {
	/// Container, index or output stream could not be opened
	#[error("Failed to open '{}': {source}", path.display())]
	OpenFailed {
		/// Path that failed to open
		path: PathBuf,
		/// Underlying IO error
		#[source]
		source: std::io::Error,
	},

	/// Version tag outside the known range
	#[error("Unsupported sprite set version {version} (supported {min} - {max})")]
	UnsupportedVersion {
		/// Version read from the header
		version: u16,
		/// Lowest supported version
		min: u16,
		/// Highest supported version
		max: u16,
	},

	/// Signature after the version tag is not `" Sprite File "`
	#[error("Unknown sprite set signature: {0:02X?}")]
	BadSignature([u8; 13]),

	/// Key outside `0..count`
	#[error("Sprite {key} out of range (slot count {count})")]
	OutOfRange {
		/// Requested key
		key: SpriteKey,
		/// Number of slots in the container
		count: usize,
	},

	/// Decode target could not be allocated
	#[error("Failed to allocate bitmap for sprite {key} ({width}x{height}, {bpp} bytes per pixel)")]
	AllocationFailure {
		/// Sprite key
		key: SpriteKey,
		/// Sprite width
		width: u16,
		/// Sprite height
		height: u16,
		/// Bytes per pixel
		bpp: u16,
	},

	/// Header declares more slots than can be allocated
	#[error("Cannot allocate slot table for {count} sprites")]
	SlotTableAllocation {
		/// Declared slot count
		count: usize,
	},

	/// Stored payload is unusable
	#[error("Bad compressed data for sprite {key}: {reason}")]
	CorruptPayload {
		/// Sprite key
		key: SpriteKey,
		/// What was wrong with it
		#[source]
		reason: CodecError,
	},

	/// Pixel depth other than 1, 2 or 4 bytes
	#[error("Sprite {key} has unsupported bit depth {bpp}")]
	InvalidBitDepth {
		/// Sprite key
		key: SpriteKey,
		/// Stored bytes per pixel
		bpp: u16,
	},

	/// Pixel buffer length does not match the image dimensions
	#[error("Pixel data size mismatch: expected {expected} bytes, got {actual} bytes")]
	PixelSizeMismatch {
		/// Expected byte count
		expected: usize,
		/// Actual byte count
		actual: usize,
	},

	/// Compressed payload too long for the 32-bit length field
	#[error("Sprite payload of {len} bytes exceeds the 32-bit length field")]
	PayloadTooLarge {
		/// Payload length in bytes
		len: usize,
	},

	/// Topmost key does not fit the 32-bit header field
	#[error("Sprite key {0} exceeds the 32-bit topmost field")]
	KeyTooLarge(SpriteKey),

	/// Companion index was rejected
	#[error("Invalid sprite index: {0}")]
	IndexInvalid(#[from] IndexRejection),

	/// Container handle was closed
	#[error("Sprite file is closed")]
	Closed,

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

impl SpriteFileError {
	/// Integer status for callers that report save results numerically:
	/// `-1` when the destination could not be opened, `-2` for anything else.
	pub fn status_code(&self) -> i32 {
		match self {
			Self::OpenFailed { .. } => -1,
			_ => -2,
		}
	}

	/// Returns `true` for errors that only concern a single sprite and leave
	/// the container handle usable.
	pub fn is_per_sprite(&self) -> bool {
		matches!(
			self,
			Self::OutOfRange { .. }
				| Self::AllocationFailure { .. }
				| Self::CorruptPayload { .. }
				| Self::InvalidBitDepth { .. }
		)
	}
}

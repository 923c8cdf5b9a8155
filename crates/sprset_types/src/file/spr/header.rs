//! Container header and per-version layout rules.

use std::fmt::Display;
use std::io::{Read, Seek, SeekFrom};

use crate::file::SpriteFileError;
use crate::file::io::ReadLe;

use super::constants::{LEGACY_TOPMOST, PALETTE_SIZE, SIGNATURE};
use super::types::SpriteKey;

/// Lowest version tag the reader accepts
pub const MIN_VERSION: u16 = 1;

/// Version tag written by [`Writer`](super::Writer)
pub const CURRENT_VERSION: u16 = 11;

/// Historical layouts of the container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormatVersion {
	/// Versions 1-3: palette block, fixed 200 slots
	Legacy,

	/// Version 4: palette block, raw pixels
	Uncompressed,

	/// Version 5: every sprite is compressed
	Compressed,

	/// Versions 6-9: compression flag and file id
	Last32bit,

	/// Version 10: large file support
	Large,

	/// Version 11: 32-bit slot count
	HighSpriteLimit,
}

/// How a version declares whether sprites are compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionMode {
	/// Sprites are always raw
	Never,
	/// Sprites are always compressed
	Always,
	/// A one-byte flag in the header decides
	Flagged,
}

/// What a header of a given version contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionCaps {
	/// A 768-byte palette follows the signature
	pub palette: bool,
	/// Where the compression setting comes from
	pub compression: CompressionMode,
	/// A 32-bit file id follows the compression flag
	pub file_id: bool,
	/// The topmost key is stored in 32 bits instead of 16
	pub wide_topmost: bool,
	/// Topmost key used regardless of the stored value
	pub forced_topmost: Option<SpriteKey>,
}

impl FormatVersion {
	/// Every layout, oldest first.
	pub const ALL: [FormatVersion; 6] = [
		Self::Legacy,
		Self::Uncompressed,
		Self::Compressed,
		Self::Last32bit,
		Self::Large,
		Self::HighSpriteLimit,
	];

	/// Maps a raw version tag to its layout.
	pub fn from_raw(version: u16) -> Option<Self> {
		match version {
			1..=3 => Some(Self::Legacy),
			4 => Some(Self::Uncompressed),
			5 => Some(Self::Compressed),
			6..=9 => Some(Self::Last32bit),
			10 => Some(Self::Large),
			11 => Some(Self::HighSpriteLimit),
			_ => None,
		}
	}

	/// Header contents for this layout.
	pub const fn caps(self) -> VersionCaps {
		match self {
			Self::Legacy => VersionCaps {
				palette: true,
				compression: CompressionMode::Never,
				file_id: false,
				wide_topmost: false,
				forced_topmost: Some(LEGACY_TOPMOST),
			},
			Self::Uncompressed => VersionCaps {
				palette: true,
				compression: CompressionMode::Never,
				file_id: false,
				wide_topmost: false,
				forced_topmost: None,
			},
			Self::Compressed => VersionCaps {
				palette: false,
				compression: CompressionMode::Always,
				file_id: false,
				wide_topmost: false,
				forced_topmost: None,
			},
			Self::Last32bit | Self::Large => VersionCaps {
				palette: false,
				compression: CompressionMode::Flagged,
				file_id: true,
				wide_topmost: false,
				forced_topmost: None,
			},
			Self::HighSpriteLimit => VersionCaps {
				palette: false,
				compression: CompressionMode::Flagged,
				file_id: true,
				wide_topmost: true,
				forced_topmost: None,
			},
		}
	}
}

impl Display for FormatVersion {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Self::Legacy => "Legacy",
			Self::Uncompressed => "Uncompressed",
			Self::Compressed => "Compressed",
			Self::Last32bit => "Last32bit",
			Self::Large => "Large",
			Self::HighSpriteLimit => "HighSpriteLimit",
		};
		f.write_str(name)
	}
}

/// Parsed container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
	/// Raw version tag
	pub version: u16,
	/// Layout the tag maps to
	pub format: FormatVersion,
	/// Whether sprite payloads are compressed
	pub compressed: bool,
	/// File id, `0` for versions without one
	pub file_id: i32,
	/// Highest key, `None` for a container without slots
	pub topmost: Option<SpriteKey>,
}

impl Header {
	/// Reads a header, leaving the reader at the first slot.
	///
	/// # Errors
	///
	/// Returns [`SpriteFileError::UnsupportedVersion`] or
	/// [`SpriteFileError::BadSignature`] for unknown files, or an IO error
	/// if the header is truncated.
	pub fn from_reader<R: Read + Seek>(reader: &mut R) -> Result<Self, SpriteFileError> {
		let version = reader.read_u16_le()?;
		let signature: [u8; 13] = reader.read_bytes()?;

		let format = FormatVersion::from_raw(version).ok_or(SpriteFileError::UnsupportedVersion {
			version,
			min: MIN_VERSION,
			max: CURRENT_VERSION,
		})?;
		if &signature != SIGNATURE {
			return Err(SpriteFileError::BadSignature(signature));
		}

		let caps = format.caps();
		if caps.palette {
			reader.seek(SeekFrom::Current(PALETTE_SIZE as i64))?;
		}

		let compressed = match caps.compression {
			CompressionMode::Never => false,
			CompressionMode::Always => true,
			CompressionMode::Flagged => reader.read_u8()? == 1,
		};
		let file_id = if caps.file_id {
			reader.read_i32_le()?
		} else {
			0
		};

		let stored_topmost = if caps.wide_topmost {
			u32::try_from(reader.read_i32_le()?).ok()
		} else {
			Some(u32::from(reader.read_u16_le()?))
		};
		let topmost = caps.forced_topmost.or(stored_topmost);

		Ok(Self {
			version,
			format,
			compressed,
			file_id,
			topmost,
		})
	}

	/// Number of slots the header declares.
	pub fn slot_count(&self) -> usize {
		self.topmost.map_or(0, |topmost| topmost as usize + 1)
	}
}

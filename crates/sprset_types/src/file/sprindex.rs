//! Companion index files for sprite sets (`sprindex.dat`).
//!
//! An index caches the position and size of every slot in a sprite set so
//! that opening the container does not require walking its whole body.
//!
//! # File Structure
//!
//! | Size            | Field                                          |
//! |-----------------|------------------------------------------------|
//! | 8               | magic `"SPRINDEX"`                             |
//! | 4               | version                                        |
//! | 4               | file id of the matching container (version 2+) |
//! | 4               | topmost key                                    |
//! | 4               | entry count, always topmost + 1                |
//! | 2 × count       | widths                                         |
//! | 2 × count       | heights                                        |
//! | 4 or 8 × count  | offsets (32-bit up to version 2, then 64-bit)  |
//!
//! Offsets are relative to the position where the container starts in its
//! stream. Empty slots keep the offset of their empty marker, so the three
//! arrays stay aligned by key.
//!
//! # Examples
//!
//! ```no_run
//! use sprset_types::file::sprindex::SpriteFileIndex;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index = SpriteFileIndex::open("sprindex.dat")?;
//! println!("{} slots, file id {:?}", index.len(), index.file_id);
//! # Ok(())
//! # }
//! ```

use std::fs::File as FsFile;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::file::io::{ReadLe, WriteLe};
use crate::file::spr::{SpriteKey, SpriteMetric};
use crate::file::{IndexRejection, SpriteFileError};

/// Index file constants.
pub mod constants {
	/// Magic bytes at the start of every index file
	pub const MAGIC: &[u8; 8] = b"SPRINDEX";

	/// First index version
	pub const VERSION_INITIAL: i32 = 1;

	/// Last version with 32-bit offsets; first with a file id
	pub const VERSION_LAST_32BIT: i32 = 2;

	/// 64-bit offsets
	pub const VERSION_64BIT: i32 = 3;

	/// Matches the 32-bit slot count of the container
	pub const VERSION_HIGH_SPRITE_LIMIT: i32 = 4;

	/// Version written by this crate
	pub const CURRENT_VERSION: i32 = VERSION_HIGH_SPRITE_LIMIT;

	/// Upper bound on entries reserved before any are read
	pub(super) const MAX_PREALLOC: usize = 1 << 16;
}

/// Per-slot metrics and offsets of one sprite set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteFileIndex {
	/// File id of the container this index belongs to, `None` when read
	/// from an index version that does not store one
	pub file_id: Option<i32>,
	/// Sprite widths by key
	pub widths: Vec<u16>,
	/// Sprite heights by key
	pub heights: Vec<u16>,
	/// Slot offsets by key, relative to the container start
	pub offsets: Vec<u64>,
}

impl SpriteFileIndex {
	/// Creates an empty index for the container with the given file id.
	pub fn new(file_id: i32) -> Self {
		Self {
			file_id: Some(file_id),
			..Self::default()
		}
	}

	/// Reserves room for `additional` more entries.
	pub fn reserve(&mut self, additional: usize) {
		self.widths.reserve(additional);
		self.heights.reserve(additional);
		self.offsets.reserve(additional);
	}

	/// Appends the entry for the next key.
	pub fn push(&mut self, width: u16, height: u16, offset: u64) {
		self.widths.push(width);
		self.heights.push(height);
		self.offsets.push(offset);
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.offsets.len()
	}

	/// Returns `true` if no entries were recorded.
	pub fn is_empty(&self) -> bool {
		self.offsets.is_empty()
	}

	/// Highest key recorded, `None` for an empty index.
	pub fn topmost(&self) -> Option<SpriteKey> {
		self.len().checked_sub(1).map(|last| last as SpriteKey)
	}

	/// Highest key as stored on disk, `-1` for an empty index.
	pub fn last_slot(&self) -> i32 {
		self.len() as i32 - 1
	}

	/// Metrics recorded for `key`.
	pub fn metric(&self, key: SpriteKey) -> Option<SpriteMetric> {
		let key = key as usize;
		Some(SpriteMetric::new(*self.widths.get(key)?, *self.heights.get(key)?))
	}

	/// Offset recorded for `key`.
	pub fn offset(&self, key: SpriteKey) -> Option<u64> {
		self.offsets.get(key as usize).copied()
	}

	/// Checks that this index describes a container with the given file id
	/// and slot count.
	pub fn validate_for(&self, file_id: i32, slot_count: usize) -> Result<(), IndexRejection> {
		if let Some(actual) = self.file_id
			&& actual != file_id
		{
			return Err(IndexRejection::FileIdMismatch {
				expected: file_id,
				actual,
			});
		}
		if self.len() != slot_count {
			return Err(IndexRejection::TopmostMismatch {
				expected: slot_count,
				actual: self.len(),
			});
		}
		Ok(())
	}

	/// Opens and parses an index file.
	///
	/// # Errors
	///
	/// Returns [`SpriteFileError::OpenFailed`] if the file cannot be opened,
	/// or any error of [`SpriteFileIndex::from_reader`].
	pub fn open(path: impl AsRef<Path>) -> Result<Self, SpriteFileError> {
		let path = path.as_ref();
		let file = FsFile::open(path).map_err(|source| SpriteFileError::OpenFailed {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_reader(&mut BufReader::new(file))
	}

	/// Parses an index from any reader.
	///
	/// Only the self-consistency of the file is checked here; use
	/// [`SpriteFileIndex::validate_for`] to match it against a container.
	///
	/// # Errors
	///
	/// Returns [`SpriteFileError::IndexInvalid`] for a bad magic, an unknown
	/// version or a count that is not `topmost + 1`, and an IO error if the
	/// file is truncated.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, SpriteFileError> {
		let magic: [u8; 8] = reader.read_bytes()?;
		if &magic != constants::MAGIC {
			return Err(IndexRejection::BadMagic(magic).into());
		}

		let version = reader.read_i32_le()?;
		if !(constants::VERSION_INITIAL..=constants::CURRENT_VERSION).contains(&version) {
			return Err(IndexRejection::UnsupportedVersion(version).into());
		}

		let file_id = if version >= constants::VERSION_LAST_32BIT {
			Some(reader.read_i32_le()?)
		} else {
			None
		};

		let topmost = reader.read_i32_le()?;
		let count = reader.read_i32_le()?;
		if topmost.checked_add(1) != Some(count) || count < 0 {
			return Err(IndexRejection::CountMismatch {
				topmost,
				count,
			}
			.into());
		}
		let count = count as usize;
		let prealloc = count.min(constants::MAX_PREALLOC);

		let mut widths = Vec::with_capacity(prealloc);
		for _ in 0..count {
			widths.push(reader.read_u16_le()?);
		}
		let mut heights = Vec::with_capacity(prealloc);
		for _ in 0..count {
			heights.push(reader.read_u16_le()?);
		}
		let mut offsets = Vec::with_capacity(prealloc);
		for _ in 0..count {
			let offset = if version <= constants::VERSION_LAST_32BIT {
				u64::from(reader.read_u32_le()?)
			} else {
				reader.read_u64_le()?
			};
			offsets.push(offset);
		}

		Ok(Self {
			file_id,
			widths,
			heights,
			offsets,
		})
	}

	/// Writes the index in the current format.
	pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), SpriteFileError> {
		writer.write_all(constants::MAGIC)?;
		writer.write_i32_le(constants::CURRENT_VERSION)?;
		writer.write_i32_le(self.file_id.unwrap_or(0))?;
		writer.write_i32_le(self.last_slot())?;
		writer.write_i32_le(self.len() as i32)?;
		for &width in &self.widths {
			writer.write_u16_le(width)?;
		}
		for &height in &self.heights {
			writer.write_u16_le(height)?;
		}
		for &offset in &self.offsets {
			writer.write_u64_le(offset)?;
		}
		Ok(())
	}

	/// Serializes the index to bytes.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buffer = Vec::with_capacity(24 + self.len() * 12);
		// writing to a Vec cannot fail
		let _ = self.write_to(&mut buffer);
		buffer
	}

	/// Saves the index to the given path.
	///
	/// # Errors
	///
	/// Returns [`SpriteFileError::OpenFailed`] if the file cannot be created.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SpriteFileError> {
		let path = path.as_ref();
		let file = FsFile::create(path).map_err(|source| SpriteFileError::OpenFailed {
			path: path.to_path_buf(),
			source,
		})?;
		let mut writer = BufWriter::new(file);
		self.write_to(&mut writer)?;
		writer.flush()?;
		Ok(())
	}
}

/// Writes `index` to `path`.
///
/// # Errors
///
/// Returns [`SpriteFileError::OpenFailed`] if the destination cannot be
/// created, or an IO error if writing fails.
pub fn save_sprite_index(
	path: impl AsRef<Path>,
	index: &SpriteFileIndex,
) -> Result<(), SpriteFileError> {
	index.save(path)
}

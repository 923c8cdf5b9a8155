//! Core reader for sprite set files.
//!
//! This module contains the main `File` structure: opening a container,
//! establishing slot offsets from the companion index or a body scan, and
//! loading individual sprites on demand.

use std::fs::File as FsFile;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use log::{debug, warn};

use crate::file::io::ReadLe;
use crate::file::rle::{PixelCodec, RleCodec};
use crate::file::sprindex::SpriteFileIndex;
use crate::file::{BitDepth, Bitmap, CodecError, SpriteFileError};

use super::constants::EMPTY_SLOT_TAG;
use super::header::{FormatVersion, Header};
use super::iterator::SlotInfoIter;
use super::rebuild;
use super::types::{IndexSource, RawSprite, SlotData, SpriteKey, SpriteMetric};

/// An open sprite set container.
///
/// The handle owns its stream. Reads are cheapest in ascending key order,
/// where consecutive sprites are read without seeking.
#[derive(Debug)]
pub struct File<R, C = RleCodec> {
	/// Underlying stream, `None` once closed
	stream: Option<R>,

	/// Parsed container header
	header: Header,

	/// Stream position the container starts at
	base_offset: u64,

	/// Absolute offset of every slot
	slots: Vec<SlotData>,

	/// Dimensions of every slot
	metrics: Vec<SpriteMetric>,

	/// Key the stream is currently positioned at, if known
	cur_pos: Option<SpriteKey>,

	/// Where the slot table came from
	index_source: IndexSource,

	/// Pixel codec for compressed containers
	codec: C,
}

/// Slot header as stored in front of each sprite payload.
struct SlotHeader {
	bpp: u16,
	metric: SpriteMetric,
}

impl File<BufReader<FsFile>> {
	/// Opens a sprite set and, if it exists and matches, its companion index.
	///
	/// A missing or stale index is not an error: the container body is
	/// scanned instead.
	///
	/// # Errors
	///
	/// Returns [`SpriteFileError::OpenFailed`] if the container cannot be
	/// opened, or a header error for files that are not sprite sets.
	pub fn open(
		path: impl AsRef<Path>,
		index_path: impl AsRef<Path>,
	) -> Result<Self, SpriteFileError> {
		let path = path.as_ref();
		let file = FsFile::open(path).map_err(|source| SpriteFileError::OpenFailed {
			path: path.to_path_buf(),
			source,
		})?;

		let index = match SpriteFileIndex::open(index_path.as_ref()) {
			Ok(index) => Some(index),
			Err(e) => {
				debug!("No usable sprite index at {}: {}", index_path.as_ref().display(), e);
				None
			}
		};

		Self::with_parts(BufReader::new(file), index, RleCodec)
	}
}

impl<R: Read + Seek> File<R> {
	/// Reads a sprite set from the given stream, scanning its body for
	/// slot offsets.
	pub fn from_reader(reader: R) -> Result<Self, SpriteFileError> {
		Self::with_parts(reader, None, RleCodec)
	}

	/// Reads a sprite set from the given stream, taking slot offsets from
	/// `index` when it matches the container.
	pub fn from_reader_with_index<I: Read>(
		reader: R,
		index: &mut I,
	) -> Result<Self, SpriteFileError> {
		let index = match SpriteFileIndex::from_reader(index) {
			Ok(index) => Some(index),
			Err(e) => {
				warn!("Ignoring unreadable sprite index: {}", e);
				None
			}
		};
		Self::with_parts(reader, index, RleCodec)
	}
}

impl<R: Read + Seek, C: PixelCodec> File<R, C> {
	/// Reads a sprite set using a custom pixel codec.
	///
	/// `index` is used for slot offsets when it matches the container;
	/// otherwise the body is scanned.
	pub fn with_parts(
		mut reader: R,
		index: Option<SpriteFileIndex>,
		codec: C,
	) -> Result<Self, SpriteFileError> {
		let base_offset = reader.stream_position()?;
		let header = Header::from_reader(&mut reader)?;
		let slot_count = header.slot_count();

		let mut slots = Vec::new();
		let mut metrics = Vec::new();
		if slots.try_reserve_exact(slot_count).is_err()
			|| metrics.try_reserve_exact(slot_count).is_err()
		{
			return Err(SpriteFileError::SlotTableAllocation {
				count: slot_count,
			});
		}
		slots.resize(slot_count, SlotData::default());
		metrics.resize(slot_count, SpriteMetric::default());

		let mut file = Self {
			stream: None,
			header,
			base_offset,
			slots,
			metrics,
			cur_pos: None,
			index_source: IndexSource::Rebuilt,
			codec,
		};

		let index_applied = match index {
			Some(index) => match index.validate_for(header.file_id, slot_count) {
				Ok(()) => {
					file.apply_index(&index);
					true
				}
				Err(rejection) => {
					warn!("Sprite index rejected, rebuilding: {}", rejection);
					false
				}
			},
			None => false,
		};

		if index_applied {
			file.index_source = IndexSource::IndexFile;
		} else {
			let scanned = rebuild::scan(
				&mut reader,
				header.compressed,
				&mut file.slots,
				&mut file.metrics,
			)?;
			debug!("Rebuilt sprite index: scanned {} of {} slots", scanned, slot_count);
		}

		file.stream = Some(reader);
		Ok(file)
	}

	/// Copies offsets and metrics out of a validated index.
	fn apply_index(&mut self, index: &SpriteFileIndex) {
		let entries = index.offsets.iter().zip(index.widths.iter().zip(&index.heights));
		for ((slot, metric), (&offset, (&width, &height))) in
			self.slots.iter_mut().zip(self.metrics.iter_mut()).zip(entries)
		{
			if offset != 0 {
				slot.offset = offset + self.base_offset;
				*metric = SpriteMetric::new(width, height);
			}
		}
	}

	/// Loads and decodes the sprite at `key`.
	///
	/// Returns `Ok(None)` for slots that hold no sprite.
	///
	/// # Errors
	///
	/// - [`SpriteFileError::OutOfRange`] if `key` is past the last slot
	/// - [`SpriteFileError::InvalidBitDepth`] for depths other than 1, 2 or 4 bytes
	/// - [`SpriteFileError::AllocationFailure`] if the bitmap cannot be allocated
	/// - [`SpriteFileError::CorruptPayload`] if the compressed data is unusable
	///
	/// None of these affect later calls on other keys.
	pub fn load_sprite(&mut self, key: SpriteKey) -> Result<Option<Bitmap>, SpriteFileError> {
		let Some(slot) = self.locate(key)? else {
			return Ok(None);
		};
		let compressed = self.header.compressed;
		let stream = self.seek_to_sprite(key, slot)?;

		let Some(SlotHeader {
			bpp,
			metric,
		}) = read_slot_header(stream)?
		else {
			return Ok(None);
		};

		let depth = BitDepth::try_from(bpp).map_err(|bpp| SpriteFileError::InvalidBitDepth {
			key,
			bpp,
		})?;
		let mut image = Bitmap::try_new(metric.width, metric.height, depth).map_err(|_| {
			SpriteFileError::AllocationFailure {
				key,
				width: metric.width,
				height: metric.height,
				bpp,
			}
		})?;

		if compressed {
			let data_size = stream.read_u32_le()? as usize;
			if data_size == 0 {
				return Err(SpriteFileError::CorruptPayload {
					key,
					reason: CodecError::Empty,
				});
			}
			let data = read_payload(stream, data_size)?;
			self.codec.decompress(&data, &mut image).map_err(|reason| {
				SpriteFileError::CorruptPayload {
					key,
					reason,
				}
			})?;
		} else {
			stream.read_exact(image.pixels_mut())?;
		}

		self.cur_pos = Some(key + 1);
		Ok(Some(image))
	}

	/// Loads the stored payload of the sprite at `key` without decoding it.
	///
	/// The bytes are compressed if the container is. Returns `Ok(None)` for
	/// slots that hold no sprite.
	///
	/// # Errors
	///
	/// Returns [`SpriteFileError::OutOfRange`] if `key` is past the last slot.
	pub fn load_sprite_data(
		&mut self,
		key: SpriteKey,
	) -> Result<Option<RawSprite>, SpriteFileError> {
		let Some(slot) = self.locate(key)? else {
			return Ok(None);
		};
		let compressed = self.header.compressed;
		let stream = self.seek_to_sprite(key, slot)?;

		let Some(SlotHeader {
			bpp,
			metric,
		}) = read_slot_header(stream)?
		else {
			return Ok(None);
		};

		let data_size = if compressed {
			stream.read_u32_le()? as usize
		} else {
			usize::from(metric.width) * usize::from(metric.height) * usize::from(bpp)
		};
		let data = read_payload(stream, data_size)?;

		self.cur_pos = Some(key + 1);
		Ok(Some(RawSprite {
			metric,
			bpp,
			data,
		}))
	}

	/// Checks `key` against the slot table; `None` for absent slots.
	fn locate(&self, key: SpriteKey) -> Result<Option<SlotData>, SpriteFileError> {
		let slot = *self.slots.get(key as usize).ok_or(SpriteFileError::OutOfRange {
			key,
			count: self.slots.len(),
		})?;
		Ok(slot.is_present().then_some(slot))
	}

	/// Positions the stream at `slot`, skipping the seek when the previous
	/// read ended there. The position cache is left invalid until a read
	/// completes.
	fn seek_to_sprite(
		&mut self,
		key: SpriteKey,
		slot: SlotData,
	) -> Result<&mut R, SpriteFileError> {
		let cached = self.cur_pos.take();
		let stream = self.stream.as_mut().ok_or(SpriteFileError::Closed)?;
		if cached != Some(key) {
			stream.seek(SeekFrom::Start(slot.offset))?;
		}
		Ok(stream)
	}
}

impl<R, C> File<R, C> {
	/// Releases the underlying stream. Later loads fail with
	/// [`SpriteFileError::Closed`].
	pub fn close(&mut self) {
		self.stream = None;
		self.cur_pos = None;
	}

	/// Returns `true` until [`File::close`] is called.
	pub fn is_open(&self) -> bool {
		self.stream.is_some()
	}

	/// Whether sprite payloads are compressed.
	pub fn is_compressed(&self) -> bool {
		self.header.compressed
	}

	/// Raw version tag of the container.
	pub fn version(&self) -> u16 {
		self.header.version
	}

	/// Header layout of the container.
	pub fn format(&self) -> FormatVersion {
		self.header.format
	}

	/// File id used to match companion indexes, `0` for old versions.
	pub fn file_id(&self) -> i32 {
		self.header.file_id
	}

	/// Highest key of the container, `None` if it has no slots.
	pub fn topmost_sprite(&self) -> Option<SpriteKey> {
		self.slots.len().checked_sub(1).map(|last| last as SpriteKey)
	}

	/// Number of slots, populated or not.
	pub fn slot_count(&self) -> usize {
		self.slots.len()
	}

	/// Stream position the container starts at.
	pub fn base_offset(&self) -> u64 {
		self.base_offset
	}

	/// Absolute slot offsets, [`NO_OFFSET`](super::constants::NO_OFFSET) for
	/// absent slots.
	pub fn slots(&self) -> &[SlotData] {
		&self.slots
	}

	/// Dimensions of every slot.
	pub fn metrics(&self) -> &[SpriteMetric] {
		&self.metrics
	}

	/// Dimensions of the slot at `key`.
	pub fn metric(&self, key: SpriteKey) -> Option<SpriteMetric> {
		self.metrics.get(key as usize).copied()
	}

	/// Returns `true` if the slot at `key` is recorded in the file.
	///
	/// Slots holding an empty marker count as present; they load as `None`.
	pub fn does_sprite_exist(&self, key: SpriteKey) -> bool {
		self.slots.get(key as usize).is_some_and(SlotData::is_present)
	}

	/// Where the slot table came from.
	pub fn index_source(&self) -> IndexSource {
		self.index_source
	}

	/// Iterates over present slots without touching the stream.
	pub fn iter_info(&self) -> SlotInfoIter<'_> {
		SlotInfoIter {
			slots: &self.slots,
			metrics: &self.metrics,
			current_key: 0,
		}
	}
}

/// Reads a slot header; `None` for an empty slot marker.
fn read_slot_header<R: Read>(stream: &mut R) -> Result<Option<SlotHeader>, SpriteFileError> {
	let bpp = stream.read_u16_le()?;
	if bpp == EMPTY_SLOT_TAG {
		return Ok(None);
	}
	let width = stream.read_u16_le()?;
	let height = stream.read_u16_le()?;
	Ok(Some(SlotHeader {
		bpp,
		metric: SpriteMetric::new(width, height),
	}))
}

/// Reads `size` payload bytes without trusting `size` for preallocation.
fn read_payload<R: Read>(stream: &mut R, size: usize) -> Result<Vec<u8>, SpriteFileError> {
	let mut data = Vec::new();
	let read = stream.take(size as u64).read_to_end(&mut data)?;
	if read != size {
		return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
	}
	Ok(data)
}

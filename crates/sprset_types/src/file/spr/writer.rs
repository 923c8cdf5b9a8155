//! Streaming writer for sprite set files.
//!
//! The header of a sprite set stores the topmost key, which is only known
//! once every slot has been written. The writer therefore emits a
//! placeholder in [`Writer::begin`] and patches it in [`Writer::finalize`]:
//!
//! ```text
//! Idle --begin--> Begun --write_*--> Streaming --finalize--> Finalized
//! ```
//!
//! Slots must be written in ascending key order, one call per key, for the
//! accumulated [`SpriteFileIndex`] to line up with the file.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//! use sprset_types::file::{BitDepth, Bitmap};
//! use sprset_types::file::spr::Writer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut writer = Writer::new(Cursor::new(Vec::new()));
//! writer.begin(false, None)?;
//! writer.write_empty_slot()?;
//! writer.write_bitmap(&Bitmap::from_pixels(2, 2, BitDepth::Indexed8, vec![1, 2, 3, 4])?)?;
//! let out = writer.finalize()?.expect("stream released once");
//! assert_eq!(writer.index().topmost(), Some(1));
//! assert!(!out.get_ref().is_empty());
//! # Ok(())
//! # }
//! ```

use std::io::{Seek, SeekFrom, Write};

use log::{debug, warn};

use crate::file::io::WriteLe;
use crate::file::rle::{PixelCodec, RleCodec};
use crate::file::sprindex::SpriteFileIndex;
use crate::file::{Bitmap, SpriteFileError};

use super::constants::{EMPTY_SLOT_TAG, SIGNATURE, UNKNOWN_TOPMOST};
use super::header::CURRENT_VERSION;
use super::types::SpriteKey;

/// Upper bound on index entries reserved from a caller's hint
const MAX_HINT_RESERVE: usize = 1 << 16;

/// Progress of a [`Writer`] through its single save session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriterState {
	/// Constructed, nothing written yet
	Idle,
	/// Header written, no slots yet
	Begun,
	/// At least one slot written
	Streaming,
	/// Header patched and stream released
	Finalized,
}

/// Single-use writer producing one sprite set and its index.
#[derive(Debug)]
pub struct Writer<W, C = RleCodec> {
	/// Output stream, released by `finalize`
	out: Option<W>,

	/// Session state
	state: WriterState,

	/// Whether payloads are compressed
	compress: bool,

	/// File id to use instead of a time-derived one
	pinned_file_id: Option<i32>,

	/// Index entries accumulated so far
	index: SpriteFileIndex,

	/// Stream position of the header
	base_position: u64,

	/// Stream position of the topmost key placeholder
	last_slot_position: u64,

	/// Scratch buffer reused for compressed payloads
	membuf: Vec<u8>,

	/// Pixel codec for compressed payloads
	codec: C,
}

impl<W: Write + Seek> Writer<W> {
	/// Creates a writer using the run-length codec.
	pub fn new(out: W) -> Self {
		Self::with_codec(out, RleCodec)
	}
}

impl<W: Write + Seek, C: PixelCodec> Writer<W, C> {
	/// Creates a writer using a custom pixel codec.
	pub fn with_codec(out: W, codec: C) -> Self {
		Self {
			out: Some(out),
			state: WriterState::Idle,
			compress: false,
			pinned_file_id: None,
			index: SpriteFileIndex::default(),
			base_position: 0,
			last_slot_position: 0,
			membuf: Vec::new(),
			codec,
		}
	}

	/// Uses `file_id` instead of deriving one from the current time.
	pub fn with_file_id(mut self, file_id: i32) -> Self {
		self.pinned_file_id = Some(file_id);
		self
	}

	/// Writes the file header.
	///
	/// `last_slot` is written as a placeholder topmost key (`-1` if unknown)
	/// and sizes the index buffers; the real value is patched in by
	/// [`Writer::finalize`].
	pub fn begin(
		&mut self,
		compressed: bool,
		last_slot: Option<SpriteKey>,
	) -> Result<(), SpriteFileError> {
		if self.state != WriterState::Idle {
			warn!("Sprite writer already begun; ignoring begin");
			return Ok(());
		}
		let Some(out) = self.out.as_mut() else {
			return Ok(());
		};
		let placeholder = match last_slot {
			Some(key) => i32::try_from(key).map_err(|_| SpriteFileError::KeyTooLarge(key))?,
			None => UNKNOWN_TOPMOST,
		};

		let file_id = self.pinned_file_id.unwrap_or_else(fresh_file_id);
		self.index = SpriteFileIndex::new(file_id);
		self.compress = compressed;
		self.base_position = out.stream_position()?;

		out.write_u16_le(CURRENT_VERSION)?;
		out.write_all(SIGNATURE)?;
		out.write_u8(u8::from(compressed))?;
		out.write_i32_le(file_id)?;

		self.last_slot_position = out.stream_position()?;
		out.write_i32_le(placeholder)?;

		if let Some(last_slot) = last_slot {
			self.index.reserve((last_slot as usize + 1).min(MAX_HINT_RESERVE));
		}

		self.state = WriterState::Begun;
		Ok(())
	}

	/// Writes `image` as the next slot, compressing it if the file is
	/// compressed.
	pub fn write_bitmap(&mut self, image: &Bitmap) -> Result<(), SpriteFileError> {
		if !self.accepts_writes() {
			return Ok(());
		}

		if self.compress {
			let mut membuf = std::mem::take(&mut self.membuf);
			self.codec.compress(image, &mut membuf);
			let result = self.write_sprite_data(
				&membuf,
				image.width(),
				image.height(),
				image.bpp().tag(),
			);
			membuf.clear();
			self.membuf = membuf;
			result
		} else {
			self.write_sprite_data(image.pixels(), image.width(), image.height(), image.bpp().tag())
		}
	}

	/// Writes an already encoded payload as the next slot.
	///
	/// `data` must be compressed exactly when the file is. An empty payload
	/// writes the slot header alone.
	pub fn write_sprite_data(
		&mut self,
		data: &[u8],
		width: u16,
		height: u16,
		bpp: u16,
	) -> Result<(), SpriteFileError> {
		if !self.accepts_writes() {
			return Ok(());
		}
		let Some(out) = self.out.as_mut() else {
			return Ok(());
		};

		// raw payload sizes follow from the metrics
		let stored_len = if self.compress {
			let len = u32::try_from(data.len())
				.map_err(|_| SpriteFileError::PayloadTooLarge { len: data.len() })?;
			Some(len)
		} else {
			None
		};

		let offset = out.stream_position()? - self.base_position;
		out.write_u16_le(bpp)?;
		out.write_u16_le(width)?;
		out.write_u16_le(height)?;
		if let Some(len) = stored_len {
			out.write_u32_le(len)?;
		}
		if !data.is_empty() {
			out.write_all(data)?;
		}
		self.index.push(width, height, offset);

		self.state = WriterState::Streaming;
		Ok(())
	}

	/// Writes an empty marker as the next slot.
	pub fn write_empty_slot(&mut self) -> Result<(), SpriteFileError> {
		if !self.accepts_writes() {
			return Ok(());
		}
		let Some(out) = self.out.as_mut() else {
			return Ok(());
		};

		let offset = out.stream_position()? - self.base_position;
		out.write_u16_le(EMPTY_SLOT_TAG)?;
		self.index.push(0, 0, offset);

		self.state = WriterState::Streaming;
		Ok(())
	}

	/// Patches the topmost key into the header and releases the stream.
	///
	/// Returns the stream, positioned at the end of the file. Returns
	/// `Ok(None)` if the writer was never begun or is already finalized.
	pub fn finalize(&mut self) -> Result<Option<W>, SpriteFileError> {
		if !matches!(self.state, WriterState::Begun | WriterState::Streaming) {
			return Ok(None);
		}
		self.state = WriterState::Finalized;
		let Some(mut out) = self.out.take() else {
			return Ok(None);
		};

		let end = out.stream_position()?;
		out.seek(SeekFrom::Start(self.last_slot_position))?;
		out.write_i32_le(self.index.last_slot())?;
		out.seek(SeekFrom::Start(end))?;
		out.flush()?;

		debug!(
			"Finalized sprite set: {} slots, {} bytes, file id {}",
			self.index.len(),
			end - self.base_position,
			self.index.file_id.unwrap_or_default()
		);
		Ok(Some(out))
	}
}

impl<W, C> Writer<W, C> {
	/// Current session state.
	pub fn state(&self) -> WriterState {
		self.state
	}

	/// Whether payloads are compressed; meaningful after `begin`.
	pub fn is_compressed(&self) -> bool {
		self.compress
	}

	/// Index entries accumulated so far.
	pub fn index(&self) -> &SpriteFileIndex {
		&self.index
	}

	/// Consumes the writer, returning the accumulated index.
	pub fn into_index(self) -> SpriteFileIndex {
		self.index
	}

	/// Consumes the writer, returning the stream if it was not released.
	pub fn into_inner(self) -> Option<W> {
		self.out
	}

	fn accepts_writes(&self) -> bool {
		match self.state {
			WriterState::Idle => {
				warn!("Sprite writer used before begin; ignoring write");
				false
			}
			WriterState::Begun | WriterState::Streaming => self.out.is_some(),
			WriterState::Finalized => false,
		}
	}
}

/// File id derived from the current time.
fn fresh_file_id() -> i32 {
	chrono::Utc::now().timestamp() as i32
}

//! Saving sprite sets: combining in-memory images with an existing
//! container into a new file.

use std::fs;
use std::io::{self, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::file::rle::{PixelCodec, RleCodec};
use crate::file::sprindex::SpriteFileIndex;
use crate::file::{Bitmap, SpriteFileError};

use super::file::File;
use super::types::SpriteKey;
use super::writer::Writer;

/// Settings for writing a sprite set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveOptions {
	/// Compress sprite payloads
	pub compress: bool,
	/// File id to stamp into the header and index, fresh if `None`
	pub file_id: Option<i32>,
}

impl SaveOptions {
	/// Options with the given compression and a fresh file id.
	pub fn new(compress: bool) -> Self {
		Self {
			compress,
			file_id: None,
		}
	}

	/// Pins the file id.
	pub fn with_file_id(mut self, file_id: i32) -> Self {
		self.file_id = Some(file_id);
		self
	}
}

/// Sparse set of in-memory sprites keyed by slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteSet {
	sprites: Vec<Option<Bitmap>>,
}

impl SpriteSet {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Puts `image` at `key`, returning the image it replaces.
	pub fn insert(&mut self, key: SpriteKey, image: Bitmap) -> Option<Bitmap> {
		let index = key as usize;
		if index >= self.sprites.len() {
			self.sprites.resize(index + 1, None);
		}
		self.sprites[index].replace(image)
	}

	/// Takes the image at `key` out of the set.
	pub fn remove(&mut self, key: SpriteKey) -> Option<Bitmap> {
		let removed = self.sprites.get_mut(key as usize)?.take();
		while matches!(self.sprites.last(), Some(None)) {
			self.sprites.pop();
		}
		removed
	}

	/// Image at `key`, if any.
	pub fn get(&self, key: SpriteKey) -> Option<&Bitmap> {
		self.sprites.get(key as usize)?.as_ref()
	}

	/// Highest populated key.
	pub fn topmost(&self) -> Option<SpriteKey> {
		self.sprites.iter().rposition(Option::is_some).map(|key| key as SpriteKey)
	}

	/// Number of populated keys.
	pub fn len(&self) -> usize {
		self.sprites.iter().filter(|sprite| sprite.is_some()).count()
	}

	/// Returns `true` if no key is populated.
	pub fn is_empty(&self) -> bool {
		self.sprites.iter().all(Option::is_none)
	}

	/// Iterates over populated keys in ascending order.
	pub fn iter(&self) -> impl Iterator<Item = (SpriteKey, &Bitmap)> {
		self.sprites
			.iter()
			.enumerate()
			.filter_map(|(key, sprite)| sprite.as_ref().map(|image| (key as SpriteKey, image)))
	}
}

impl FromIterator<(SpriteKey, Bitmap)> for SpriteSet {
	fn from_iter<T: IntoIterator<Item = (SpriteKey, Bitmap)>>(iter: T) -> Self {
		let mut set = Self::new();
		for (key, image) in iter {
			set.insert(key, image);
		}
		set
	}
}

/// Writes a sprite set to `out`, taking each slot from `sprites` or, where
/// `sprites` has no image, from `source`.
///
/// Source slots are copied without decoding when the source's compression
/// matches `options.compress` and re-encoded with `codec` otherwise. Slots
/// found in neither are written as empty markers. The output covers keys up
/// to the highest of either input.
///
/// Returns the index of the written file, for [`save_sprite_index`].
///
/// [`save_sprite_index`]: crate::file::sprindex::save_sprite_index
///
/// # Errors
///
/// Stream failures and errors reading `source` abort the save.
pub fn write_sprite_file<W, R, C, E>(
	out: W,
	sprites: &SpriteSet,
	mut source: Option<&mut File<R, C>>,
	options: &SaveOptions,
	codec: E,
) -> Result<SpriteFileIndex, SpriteFileError>
where
	W: Write + Seek,
	R: Read + Seek,
	C: PixelCodec,
	E: PixelCodec,
{
	let source_topmost = match source.as_deref() {
		Some(file) => file.topmost_sprite(),
		None => Some(0),
	};
	let topmost = source_topmost.max(sprites.topmost());

	let mut writer = Writer::with_codec(out, codec);
	if let Some(file_id) = options.file_id {
		writer = writer.with_file_id(file_id);
	}
	writer.begin(options.compress, topmost)?;

	let (mut copied, mut reencoded) = (0usize, 0usize);
	let key_count = topmost.map_or(0, |topmost| topmost + 1);
	for key in 0..key_count {
		if let Some(image) = sprites.get(key) {
			writer.write_bitmap(image)?;
			continue;
		}

		let Some(file) = source.as_deref_mut().filter(|file| (key as usize) < file.slot_count())
		else {
			writer.write_empty_slot()?;
			continue;
		};

		if file.is_compressed() == options.compress {
			match file.load_sprite_data(key)? {
				Some(raw) => {
					let metric = raw.metric;
					writer.write_sprite_data(&raw.data, metric.width, metric.height, raw.bpp)?;
					copied += 1;
				}
				None => writer.write_empty_slot()?,
			}
		} else {
			match file.load_sprite(key)? {
				Some(image) => {
					writer.write_bitmap(&image)?;
					reencoded += 1;
				}
				None => writer.write_empty_slot()?,
			}
		}
	}

	writer.finalize()?;
	debug!("Saved sprite set: {} copied, {} re-encoded from source", copied, reencoded);
	Ok(writer.into_index())
}

/// Writes a sprite set from in-memory images alone.
pub fn write_sprite_set<W: Write + Seek>(
	out: W,
	sprites: &SpriteSet,
	options: &SaveOptions,
) -> Result<SpriteFileIndex, SpriteFileError> {
	write_sprite_file(out, sprites, None::<&mut File<Cursor<&[u8]>>>, options, RleCodec)
}

/// Writes a sprite set to `path`.
///
/// The set is written to a temporary file next to `path` and moved over it
/// once complete, so `source` may be the file at `path` itself and a failed
/// save leaves any existing file untouched. See [`write_sprite_file`].
///
/// # Errors
///
/// Returns [`SpriteFileError::OpenFailed`] if the file cannot be created or
/// moved into place.
pub fn save_sprite_file<R, C>(
	path: impl AsRef<Path>,
	sprites: &SpriteSet,
	source: Option<&mut File<R, C>>,
	options: &SaveOptions,
) -> Result<SpriteFileIndex, SpriteFileError>
where
	R: Read + Seek,
	C: PixelCodec,
{
	let path = path.as_ref();
	let open_failed = |error: io::Error| SpriteFileError::OpenFailed {
		path: path.to_path_buf(),
		source: error,
	};
	let dir = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};

	let mut staged = NamedTempFile::new_in(dir).map_err(open_failed)?;
	if let Ok(metadata) = fs::metadata(path) {
		staged.as_file().set_permissions(metadata.permissions())?;
	}

	let mut out = BufWriter::new(staged.as_file_mut());
	let index = write_sprite_file(&mut out, sprites, source, options, RleCodec)?;
	out.flush()?;
	drop(out);

	staged.persist(path).map_err(|error| open_failed(error.error))?;
	debug!("Moved saved sprite set into {}", path.display());
	Ok(index)
}

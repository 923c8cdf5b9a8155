//! Sprite set container support for `sprset-rs`.
//!
//! A sprite set (`acsprset.spr`) stores a sparse, key-addressed array of
//! bitmaps in one file. Each slot holds either a sprite or an empty marker.
//! Payloads are raw pixels or, in compressed files, the run-length format of
//! [`rle`](crate::file::rle).
//!
//! # File Structure
//!
//! | Size     | Field                                                   |
//! |----------|---------------------------------------------------------|
//! | 2        | version tag                                             |
//! | 13       | signature `" Sprite File "`                             |
//! | 768      | palette (versions 1-4 only, skipped)                    |
//! | 1        | compression flag (version 6+)                           |
//! | 4        | file id (version 6+)                                    |
//! | 2 or 4   | topmost key (32-bit from version 11, absent before 4)   |
//! | ...      | slots                                                   |
//!
//! Each slot is `u16 bpp`, `u16 width`, `u16 height`, a `u32` payload length
//! in compressed files, then the payload. A `bpp` of zero is an empty slot
//! with nothing after it.
//!
//! Slot offsets come from the companion [`sprindex`](crate::file::sprindex)
//! file when it matches the container, and from a scan of the body
//! otherwise.
//!
//! # Examples
//!
//! ## Reading sprites
//!
//! ```no_run
//! use sprset_types::file::spr::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut sprites = File::open("acsprset.spr", "sprindex.dat")?;
//! println!("{} slots, index {}", sprites.slot_count(), sprites.index_source());
//!
//! if let Some(image) = sprites.load_sprite(1)? {
//!     println!("sprite 1: {}", image);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Replacing a sprite and saving
//!
//! ```no_run
//! use sprset_types::file::{BitDepth, Bitmap};
//! use sprset_types::file::spr::{File, SaveOptions, SpriteSet, save_sprite_file};
//! use sprset_types::file::sprindex::save_sprite_index;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut source = File::open("acsprset.spr", "sprindex.dat")?;
//!
//! let mut changes = SpriteSet::new();
//! changes.insert(3, Bitmap::new(16, 16, BitDepth::TrueColor32));
//!
//! let options = SaveOptions::new(source.is_compressed());
//! let index = save_sprite_file("new.spr", &changes, Some(&mut source), &options)?;
//! save_sprite_index("new_index.dat", &index)?;
//! # Ok(())
//! # }
//! ```

pub mod constants;
mod file;
mod header;
mod iterator;
mod rebuild;
mod save;
mod types;
mod writer;

pub use self::file::File;
pub use self::header::{
	CURRENT_VERSION, CompressionMode, FormatVersion, Header, MIN_VERSION, VersionCaps,
};
pub use self::iterator::SlotInfoIter;
pub use self::save::{
	SaveOptions, SpriteSet, save_sprite_file, write_sprite_file, write_sprite_set,
};
pub use self::types::{IndexSource, RawSprite, SlotData, SlotInfo, SpriteKey, SpriteMetric};
pub use self::writer::{Writer, WriterState};

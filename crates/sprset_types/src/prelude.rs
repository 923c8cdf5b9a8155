//! Prelude module for `sprset_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use sprset_types::prelude::*;
//!
//! let image = Bitmap::new(16, 16, BitDepth::HighColor16);
//! let mut set = SpriteSet::new();
//! set.insert(0, image);
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Pixel data
	BitDepth,
	Bitmap,

	// Errors
	CodecError,
	IndexRejection,

	// Codec
	PixelCodec,
	RleCodec,

	// Saving
	SaveOptions,

	// Containers
	SprFile,
	SprWriter,
	SpriteFileError,
	SpriteFileIndex,
	SpriteKey,
	SpriteMetric,
	SpriteSet,
	save_sprite_index,
};

// Container details
#[doc(inline)]
pub use crate::file::spr::{
	FormatVersion, IndexSource, RawSprite, SlotInfo, WriterState, save_sprite_file,
	write_sprite_file,
};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;

//! File type support for `sprset-rs` project.

mod bitmap;
mod error;

pub mod io;
pub mod rle;
pub mod spr;
pub mod sprindex;

// Re-export unified error types
pub use error::{CodecError, IndexRejection, SpriteFileError};

// Re-export main file types
pub use bitmap::{BitDepth, Bitmap};
pub use rle::{PixelCodec, RleCodec};
pub use spr::{
	File as SprFile, SaveOptions, SpriteKey, SpriteMetric, SpriteSet, Writer as SprWriter,
};
pub use sprindex::{SpriteFileIndex, save_sprite_index};

//! This module is separated into its own crate to enable simple dynamic linking for `sprset`, and should not be used directly.

/// `use sprset::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export sprset_types for convenience
pub use sprset_types;

// Re-export commonly used types at crate root
pub use sprset_types::file::{
	BitDepth, Bitmap, SaveOptions, SprFile, SprWriter, SpriteFileError, SpriteFileIndex, SpriteSet,
};

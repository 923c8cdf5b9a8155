//! This crate provides the sprite set container format for the `sprset-rs` project.
//!
//! # File Formats
//!
//! - **SPR**: Sprite set containers holding a sparse, keyed array of bitmaps
//! - **SPRINDEX**: Companion index files caching slot offsets and sizes
//! - **RLE**: Per-row run-length compression of sprite pixels
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use sprset_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut sprites = SprFile::open("acsprset.spr", "sprindex.dat")?;
//! for info in sprites.iter_info() {
//!     println!("sprite {}: {}", info.key, info.metric);
//! }
//! let first = sprites.load_sprite(0)?;
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use sprset_types::file::spr::{SaveOptions, SpriteSet, save_sprite_file};
//! use sprset_types::file::{BitDepth, Bitmap, SprFile};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut set = SpriteSet::new();
//! set.insert(0, Bitmap::new(8, 8, BitDepth::Indexed8));
//! save_sprite_file("out.spr", &set, None::<&mut SprFile<std::fs::File>>, &SaveOptions::new(true))?;
//! # Ok(())
//! # }
//! ```

pub mod file;

/// `use sprset_types::prelude::*;` to import commonly used items.
pub mod prelude;

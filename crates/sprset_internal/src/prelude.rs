//! Prelude module for `sprset_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use sprset_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let mut set = SpriteSet::new();
//! set.insert(3, Bitmap::new(4, 4, BitDepth::TrueColor32));
//! assert_eq!(set.topmost(), Some(3));
//!
//! let options = SaveOptions::new(true);
//! assert!(options.file_id.is_none());
//! ```

// Re-export everything from sprset_types::prelude
#[doc(inline)]
pub use sprset_types::prelude::*;

// Re-export the entire sprset_types module for advanced usage
#[doc(inline)]
pub use sprset_types;

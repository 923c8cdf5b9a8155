//! Constants used in sprite set files

/// Signature following the version tag, stored without a terminator
pub const SIGNATURE: &[u8; 13] = b" Sprite File ";

/// Size of the palette block carried by uncompressed-era files (256 RGB triplets)
pub const PALETTE_SIZE: u64 = 256 * 3;

/// Topmost key forced on files older than the uncompressed format
pub const LEGACY_TOPMOST: u32 = 200;

/// Bit depth tag marking an empty slot
pub const EMPTY_SLOT_TAG: u16 = 0;

/// Offset value marking a slot that is not present in the file
pub const NO_OFFSET: u64 = 0;

/// Placeholder written for an unknown topmost key
pub const UNKNOWN_TOPMOST: i32 = -1;

/// Default file name of a sprite set
pub const DEFAULT_SPRITE_FILE_NAME: &str = "acsprset.spr";

/// Default file name of a sprite set's companion index
pub const DEFAULT_SPRITE_INDEX_NAME: &str = "sprindex.dat";

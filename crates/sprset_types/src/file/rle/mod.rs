//! Run-length pixel compression used by compressed sprite set containers.
//!
//! ## Format
//!
//! Each image row is packed independently. A row is a sequence of packets,
//! each starting with a signed control byte `c`:
//!
//! | Control        | Meaning                                              |
//! |----------------|------------------------------------------------------|
//! | `0..=127`      | literal: `c + 1` pixels follow verbatim              |
//! | `-127..=-1`    | run: one pixel follows, repeated `1 - c` times       |
//! | `-128`         | treated as `0` (a single literal pixel)              |
//!
//! A "pixel" is one unit of the image bit depth (1, 2 or 4 bytes), so runs
//! of 16- and 32-bit pixels compress as well as 8-bit ones. Packets never
//! span two rows, and a packet holds at most 127 pixels.

mod decode;
mod encode;

use crate::file::{Bitmap, CodecError};

pub use decode::decompress;
pub use encode::compress;

mod constants {
	/// Largest number of pixels in one packet
	pub const MAX_PACKET_PIXELS: usize = 127;
}

/// An encode/decode capability for sprite pixel data.
///
/// Container readers and writers only ever see compressed payloads as opaque
/// byte strings; this trait is the seam where the actual algorithm plugs in.
pub trait PixelCodec {
	/// Appends the compressed form of `image` to `out`.
	fn compress(&self, image: &Bitmap, out: &mut Vec<u8>);

	/// Fills `image` from `data`, which must describe exactly its pixels.
	fn decompress(&self, data: &[u8], image: &mut Bitmap) -> Result<(), CodecError>;
}

/// The run-length codec described in the module documentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RleCodec;

impl PixelCodec for RleCodec {
	fn compress(&self, image: &Bitmap, out: &mut Vec<u8>) {
		compress(image, out);
	}

	fn decompress(&self, data: &[u8], image: &mut Bitmap) -> Result<(), CodecError> {
		decompress(data, image)
	}
}

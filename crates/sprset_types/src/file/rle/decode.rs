//! Run-length decoder.

use crate::file::{Bitmap, CodecError};

/// Decompresses `data` into `image`.
///
/// The packets must fill every row of the image exactly and consume all of
/// `data`.
pub fn decompress(data: &[u8], image: &mut Bitmap) -> Result<(), CodecError> {
	let unit = image.bpp().bytes();
	let stride = image.stride();
	let mut pos = 0;

	if stride > 0 {
		for (row_index, row) in image.pixels_mut().chunks_exact_mut(stride).enumerate() {
			unpack_row(data, &mut pos, row, unit, row_index)?;
		}
	}

	if pos != data.len() {
		return Err(CodecError::TrailingBytes(data.len() - pos));
	}
	Ok(())
}

fn unpack_row(
	data: &[u8],
	pos: &mut usize,
	row: &mut [u8],
	unit: usize,
	row_index: usize,
) -> Result<(), CodecError> {
	let truncated = CodecError::Truncated {
		row: row_index,
	};
	let overrun = CodecError::RowOverrun {
		row: row_index,
	};

	let count = row.len() / unit;
	let mut n = 0;
	while n < count {
		let control = *data.get(*pos).ok_or(truncated)? as i8;
		*pos += 1;
		let control = if control == i8::MIN {
			0
		} else {
			control
		};

		if control < 0 {
			let len = (1 - i32::from(control)) as usize;
			if n + len > count {
				return Err(overrun);
			}
			let value = data.get(*pos..*pos + unit).ok_or(truncated)?;
			*pos += unit;
			for target in row[n * unit..(n + len) * unit].chunks_exact_mut(unit) {
				target.copy_from_slice(value);
			}
			n += len;
		} else {
			let len = control as usize + 1;
			if n + len > count {
				return Err(overrun);
			}
			let bytes = len * unit;
			let source = data.get(*pos..*pos + bytes).ok_or(truncated)?;
			row[n * unit..(n + len) * unit].copy_from_slice(source);
			*pos += bytes;
			n += len;
		}
	}
	Ok(())
}

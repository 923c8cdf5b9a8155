//! Run-length encoder.

use crate::file::Bitmap;

use super::constants::MAX_PACKET_PIXELS;

/// Compresses `image` row by row, appending packets to `out`.
pub fn compress(image: &Bitmap, out: &mut Vec<u8>) {
	let unit = image.bpp().bytes();
	if image.stride() == 0 {
		return;
	}
	for row in image.rows() {
		pack_row(row, unit, out);
	}
}

/// Packs one row of `unit`-byte pixels.
fn pack_row(row: &[u8], unit: usize, out: &mut Vec<u8>) {
	let count = row.len() / unit;
	let pixel = |i: usize| &row[i * unit..(i + 1) * unit];

	let mut i = 0;
	while i < count {
		// last pixel alone
		if i == count - 1 {
			out.push(0);
			out.extend_from_slice(pixel(i));
			break;
		}

		let limit = (i + MAX_PACKET_PIXELS - 1).min(count - 1);
		let mut j = i + 1;
		if pixel(i) == pixel(j) {
			while j < limit && pixel(j) == pixel(j + 1) {
				j += 1;
			}
			// run of j - i + 1 pixels, stored as -(j - i)
			out.push((-((j - i) as i8)) as u8);
			out.extend_from_slice(pixel(i));
		} else {
			while j < limit && pixel(j) != pixel(j + 1) {
				j += 1;
			}
			out.push((j - i) as u8);
			out.extend_from_slice(&row[i * unit..(j + 1) * unit]);
		}
		i = j + 1;
	}
}

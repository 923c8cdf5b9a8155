//! Slot table reconstruction by walking the container body.
//!
//! Used whenever no valid companion index is available.

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use log::debug;

use crate::file::SpriteFileError;
use crate::file::io::ReadLe;

use super::constants::EMPTY_SLOT_TAG;
use super::types::{SlotData, SpriteMetric};

/// Walks slots from the reader's current position, filling in absolute
/// offsets and metrics.
///
/// Scanning stops after the last slot of `slots` or at the end of the
/// stream, whichever comes first, so truncated files yield a partial table
/// instead of an error. Returns the number of slots visited.
pub fn scan<R: Read + Seek>(
	reader: &mut R,
	compressed: bool,
	slots: &mut [SlotData],
	metrics: &mut [SpriteMetric],
) -> Result<usize, SpriteFileError> {
	let start = reader.stream_position()?;
	let end = reader.seek(SeekFrom::End(0))?;
	reader.seek(SeekFrom::Start(start))?;

	let mut position = start;
	let mut visited = 0;
	for (slot, metric) in slots.iter_mut().zip(metrics.iter_mut()) {
		if position >= end {
			break;
		}
		slot.offset = position;
		visited += 1;

		match skip_slot(reader, compressed) {
			Ok(Some(found)) => *metric = found,
			Ok(None) => {}
			Err(SpriteFileError::IOError(e)) if e.kind() == ErrorKind::UnexpectedEof => {
				debug!("Sprite set body truncated at slot {}", visited - 1);
				break;
			}
			Err(e) => return Err(e),
		}
		position = reader.stream_position()?;
	}

	Ok(visited)
}

/// Reads one slot header and seeks past its payload.
fn skip_slot<R: Read + Seek>(
	reader: &mut R,
	compressed: bool,
) -> Result<Option<SpriteMetric>, SpriteFileError> {
	let bpp = reader.read_u16_le()?;
	if bpp == EMPTY_SLOT_TAG {
		return Ok(None);
	}
	let width = reader.read_u16_le()?;
	let height = reader.read_u16_le()?;
	let data_size = if compressed {
		i64::from(reader.read_u32_le()?)
	} else {
		i64::from(width) * i64::from(height) * i64::from(bpp)
	};
	reader.seek(SeekFrom::Current(data_size))?;
	Ok(Some(SpriteMetric::new(width, height)))
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use super::*;

	fn body() -> Vec<u8> {
		let mut data = vec![0xAA; 4]; // stands in for a header
		data.extend_from_slice(&0u16.to_le_bytes());
		data.extend_from_slice(&[1, 0, 2, 0, 2, 0, 9, 9, 9, 9]);
		data.extend_from_slice(&[2, 0, 1, 0, 1, 0, 7, 7]);
		data
	}

	#[test]
	fn test_scan_uncompressed() {
		let mut cursor = Cursor::new(body());
		cursor.set_position(4);
		let mut slots = vec![SlotData::default(); 3];
		let mut metrics = vec![SpriteMetric::default(); 3];

		let visited = scan(&mut cursor, false, &mut slots, &mut metrics).unwrap();
		assert_eq!(visited, 3);
		assert_eq!(slots.iter().map(|s| s.offset).collect::<Vec<_>>(), vec![4, 6, 16]);
		assert_eq!(metrics, vec![
			SpriteMetric::new(0, 0),
			SpriteMetric::new(2, 2),
			SpriteMetric::new(1, 1),
		]);
	}

	#[test]
	fn test_scan_stops_at_end_of_stream() {
		let mut cursor = Cursor::new(body());
		cursor.set_position(4);
		let mut slots = vec![SlotData::default(); 10];
		let mut metrics = vec![SpriteMetric::default(); 10];

		let visited = scan(&mut cursor, false, &mut slots, &mut metrics).unwrap();
		assert_eq!(visited, 3);
		assert!(slots[3..].iter().all(|s| !s.is_present()));
	}

	#[test]
	fn test_scan_truncated_header() {
		let mut data = body();
		data.extend_from_slice(&[4, 0, 8]); // half a slot header
		let mut cursor = Cursor::new(data);
		cursor.set_position(4);
		let mut slots = vec![SlotData::default(); 5];
		let mut metrics = vec![SpriteMetric::default(); 5];

		let visited = scan(&mut cursor, false, &mut slots, &mut metrics).unwrap();
		assert_eq!(visited, 4);
		assert_eq!(metrics[3], SpriteMetric::default());
	}

	#[test]
	fn test_scan_compressed_uses_stored_length() {
		let mut data = Vec::new();
		data.extend_from_slice(&[1, 0, 100, 0, 100, 0]);
		data.extend_from_slice(&2u32.to_le_bytes());
		data.extend_from_slice(&[0x81, 5]);
		data.extend_from_slice(&0u16.to_le_bytes());
		let mut cursor = Cursor::new(data);
		let mut slots = vec![SlotData::default(); 2];
		let mut metrics = vec![SpriteMetric::default(); 2];

		scan(&mut cursor, true, &mut slots, &mut metrics).unwrap();
		assert_eq!(slots[1].offset, 12);
		assert_eq!(metrics[0], SpriteMetric::new(100, 100));
	}
}

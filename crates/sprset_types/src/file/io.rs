//! Little-endian fixed-width helpers over `std::io` streams.

use std::io::{self, Read, Write};

/// Typed little-endian reads for any [`Read`].
pub trait ReadLe: Read {
	/// Reads one byte.
	fn read_u8(&mut self) -> io::Result<u8> {
		let mut buffer = [0u8; 1];
		self.read_exact(&mut buffer)?;
		Ok(buffer[0])
	}

	/// Reads a little-endian `u16`.
	fn read_u16_le(&mut self) -> io::Result<u16> {
		let mut buffer = [0u8; 2];
		self.read_exact(&mut buffer)?;
		Ok(u16::from_le_bytes(buffer))
	}

	/// Reads a little-endian `u32`.
	fn read_u32_le(&mut self) -> io::Result<u32> {
		let mut buffer = [0u8; 4];
		self.read_exact(&mut buffer)?;
		Ok(u32::from_le_bytes(buffer))
	}

	/// Reads a little-endian `i32`.
	fn read_i32_le(&mut self) -> io::Result<i32> {
		let mut buffer = [0u8; 4];
		self.read_exact(&mut buffer)?;
		Ok(i32::from_le_bytes(buffer))
	}

	/// Reads a little-endian `u64`.
	fn read_u64_le(&mut self) -> io::Result<u64> {
		let mut buffer = [0u8; 8];
		self.read_exact(&mut buffer)?;
		Ok(u64::from_le_bytes(buffer))
	}

	/// Reads a fixed-size byte array.
	fn read_bytes<const N: usize>(&mut self) -> io::Result<[u8; N]> {
		let mut buffer = [0u8; N];
		self.read_exact(&mut buffer)?;
		Ok(buffer)
	}
}

impl<R: Read + ?Sized> ReadLe for R {}

/// Typed little-endian writes for any [`Write`].
pub trait WriteLe: Write {
	/// Writes one byte.
	fn write_u8(&mut self, value: u8) -> io::Result<()> {
		self.write_all(&[value])
	}

	/// Writes a little-endian `u16`.
	fn write_u16_le(&mut self, value: u16) -> io::Result<()> {
		self.write_all(&value.to_le_bytes())
	}

	/// Writes a little-endian `u32`.
	fn write_u32_le(&mut self, value: u32) -> io::Result<()> {
		self.write_all(&value.to_le_bytes())
	}

	/// Writes a little-endian `i32`.
	fn write_i32_le(&mut self, value: i32) -> io::Result<()> {
		self.write_all(&value.to_le_bytes())
	}

	/// Writes a little-endian `u64`.
	fn write_u64_le(&mut self, value: u64) -> io::Result<()> {
		self.write_all(&value.to_le_bytes())
	}
}

impl<W: Write + ?Sized> WriteLe for W {}

//! Sequential little-endian reader shared by the importers.
//!
//! Both ART and BMP are consumed front to back, so the reader only ever moves
//! forward. It keeps track of how many bytes have been consumed, which makes
//! short-read errors report the offset at which the data ran out.

use std::io::{self, Read};

use crate::file::{FileType, IsoFileError};

/// Forward-only reader over any [`Read`] implementation.
#[derive(Debug)]
pub struct BinaryReader<R> {
	inner: R,
	position: u64,
	file_type: FileType,
}

impl<R: Read> BinaryReader<R> {
	/// Wraps `inner`; errors produced by this reader are tagged with `file_type`.
	pub fn new(inner: R, file_type: FileType) -> Self {
		Self {
			inner,
			position: 0,
			file_type,
		}
	}

	/// Number of bytes consumed so far.
	pub fn position(&self) -> u64 {
		self.position
	}

	/// Format this reader is decoding.
	pub fn file_type(&self) -> FileType {
		self.file_type
	}

	/// Unwraps the reader, returning the underlying stream.
	pub fn into_inner(self) -> R {
		self.inner
	}

	/// Reads exactly `buf.len()` bytes.
	///
	/// # Errors
	///
	/// Returns [`IsoFileError::InsufficientData`] if the stream ends early,
	/// or [`IsoFileError::IOError`] for any other stream failure.
	pub fn read_into(&mut self, buf: &mut [u8]) -> Result<(), IsoFileError> {
		let mut filled = 0;
		while filled < buf.len() {
			match self.inner.read(&mut buf[filled..]) {
				Ok(0) => break,
				Ok(n) => filled += n,
				Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
				Err(e) => return Err(e.into()),
			}
		}
		self.position += filled as u64;

		if filled < buf.len() {
			return Err(IsoFileError::insufficient_data(self.file_type, buf.len(), filled));
		}
		Ok(())
	}

	/// Reads a fixed-size array.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], IsoFileError> {
		let mut buf = [0u8; N];
		self.read_into(&mut buf)?;
		Ok(buf)
	}

	/// Reads `len` bytes into a freshly allocated buffer.
	///
	/// The buffer grows as data arrives, so a corrupt length cannot force a
	/// huge allocation up front.
	pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, IsoFileError> {
		let mut buf = Vec::new();
		let read = (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
		self.position += read as u64;

		if read < len {
			return Err(IsoFileError::insufficient_data(self.file_type, len, read));
		}
		Ok(buf)
	}

	/// Discards `len` bytes.
	pub fn skip(&mut self, len: usize) -> Result<(), IsoFileError> {
		let skipped = io::copy(&mut (&mut self.inner).take(len as u64), &mut io::sink())?;
		self.position += skipped;

		if skipped < len as u64 {
			return Err(IsoFileError::insufficient_data(self.file_type, len, skipped as usize));
		}
		Ok(())
	}

	/// Reads a little-endian `u16`.
	pub fn read_u16(&mut self) -> Result<u16, IsoFileError> {
		Ok(u16::from_le_bytes(self.read_array()?))
	}

	/// Reads a little-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32, IsoFileError> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Reads a little-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32, IsoFileError> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}
}

//! ART frame headers and decoded frames.

use std::fmt;
use std::io::Read;

use crate::file::reader::BinaryReader;
use crate::file::{FileType, IsoFileError};

use super::constants;

/// Fixed 28-byte per-frame record.
///
/// ```text
/// Offset  Size  Field   Description
/// ------  ----  ------  ---------------------------------------
/// 0x00    4     width   Width in pixels (u32)
/// 0x04    4     height  Height in pixels (u32)
/// 0x08    4     size    Compressed payload size in bytes (u32)
/// 0x0C    4     cx      Anchor X (i32)
/// 0x10    4     cy      Anchor Y (i32)
/// 0x14    4     dx      Extra centering offset X (i32)
/// 0x18    4     dy      Extra centering offset Y (i32)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameHeader {
	/// Width in pixels
	pub width: u32,
	/// Height in pixels
	pub height: u32,
	/// Size of the compressed payload in bytes
	pub size: u32,
	/// Anchor X
	pub cx: i32,
	/// Anchor Y
	pub cy: i32,
	/// Extra centering offset X
	pub dx: i32,
	/// Extra centering offset Y
	pub dy: i32,
}

impl FrameHeader {
	/// Size of the record in bytes
	pub const SIZE: usize = constants::FRAME_HEADER_SIZE;

	/// Number of pixels the frame decodes to.
	///
	/// # Errors
	///
	/// Returns [`IsoFileError::InvalidFormat`] if `width * height` overflows.
	pub fn pixel_count(&self) -> Result<usize, IsoFileError> {
		(self.width as usize).checked_mul(self.height as usize).ok_or_else(|| {
			IsoFileError::invalid_format(
				FileType::Art,
				format!("frame dimensions {}x{} overflow", self.width, self.height),
			)
		})
	}

	/// Reads a frame header.
	pub fn from_reader<R: Read>(reader: &mut BinaryReader<R>) -> Result<Self, IsoFileError> {
		Ok(Self {
			width: reader.read_u32()?,
			height: reader.read_u32()?,
			size: reader.read_u32()?,
			cx: reader.read_i32()?,
			cy: reader.read_i32()?,
			dx: reader.read_i32()?,
			dy: reader.read_i32()?,
		})
	}

	/// Serializes the frame header.
	pub fn to_bytes(&self) -> [u8; constants::FRAME_HEADER_SIZE] {
		let mut bytes = [0u8; constants::FRAME_HEADER_SIZE];
		bytes[0..4].copy_from_slice(&self.width.to_le_bytes());
		bytes[4..8].copy_from_slice(&self.height.to_le_bytes());
		bytes[8..12].copy_from_slice(&self.size.to_le_bytes());
		bytes[12..16].copy_from_slice(&self.cx.to_le_bytes());
		bytes[16..20].copy_from_slice(&self.cy.to_le_bytes());
		bytes[20..24].copy_from_slice(&self.dx.to_le_bytes());
		bytes[24..28].copy_from_slice(&self.dy.to_le_bytes());
		bytes
	}
}

/// A decoded frame: palette indices plus anchor offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
	width: u32,
	height: u32,
	pixels: Vec<u8>,
	cx: i32,
	cy: i32,
	dx: i32,
	dy: i32,
}

impl Frame {
	/// Creates a frame from its header and already decoded pixel indices.
	///
	/// `pixels` should hold `width * height` indices; [`super::File::from_parts`]
	/// rejects frames that don't.
	pub fn new(header: &FrameHeader, pixels: Vec<u8>) -> Self {
		Self {
			width: header.width,
			height: header.height,
			pixels,
			cx: header.cx,
			cy: header.cy,
			dx: header.dx,
			dy: header.dy,
		}
	}

	/// Width in pixels.
	#[inline]
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Height in pixels.
	#[inline]
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Palette indices, row-major, top to bottom.
	#[inline]
	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}

	/// Anchor point.
	pub fn anchor(&self) -> (i32, i32) {
		(self.cx, self.cy)
	}

	/// Additional centering offset.
	pub fn offset(&self) -> (i32, i32) {
		(self.dx, self.dy)
	}

	/// Display center, optionally shifted by the extra centering offset.
	pub fn center(&self, apply_offset: bool) -> (i32, i32) {
		if apply_offset {
			(self.cx.wrapping_add(self.dx), self.cy.wrapping_add(self.dy))
		} else {
			(self.cx, self.cy)
		}
	}

	/// Iterates over pixel rows.
	pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
		// chunks_exact panics on zero, and a zero-width frame has no rows anyway
		self.pixels.chunks_exact((self.width as usize).max(1))
	}
}

impl fmt::Display for Frame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}x{} (anchor: {}, {}; offset: {}, {})",
			self.width, self.height, self.cx, self.cy, self.dx, self.dy
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_header() -> FrameHeader {
		FrameHeader {
			width: 3,
			height: 2,
			size: 6,
			cx: -4,
			cy: 10,
			dx: 1,
			dy: -2,
		}
	}

	#[test]
	fn test_header_layout() {
		let bytes = sample_header().to_bytes();
		assert_eq!(bytes.len(), 28);
		assert_eq!(&bytes[12..16], &(-4i32).to_le_bytes());

		let parsed =
			FrameHeader::from_reader(&mut BinaryReader::new(&bytes[..], FileType::Art)).unwrap();
		assert_eq!(parsed, sample_header());
	}

	#[test]
	fn test_pixel_count() {
		assert_eq!(sample_header().pixel_count().unwrap(), 6);
		assert_eq!(FrameHeader::default().pixel_count().unwrap(), 0);
	}

	#[test]
	fn test_center() {
		let frame = Frame::new(&sample_header(), vec![0; 6]);
		assert_eq!(frame.center(false), (-4, 10));
		assert_eq!(frame.center(true), (-3, 8));
	}

	#[test]
	fn test_rows() {
		let frame = Frame::new(&sample_header(), vec![1, 2, 3, 4, 5, 6]);
		let rows: Vec<_> = frame.rows().collect();
		assert_eq!(rows, vec![&[1, 2, 3][..], &[4, 5, 6][..]]);
	}
}

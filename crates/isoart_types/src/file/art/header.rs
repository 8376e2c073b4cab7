//! ART file header.

use std::fmt;
use std::io::Read;

use crate::file::palette::Color;
use crate::file::reader::BinaryReader;
use crate::file::{FileType, IsoFileError};

use super::constants;

/// Fixed 132-byte record at the start of every ART file.
///
/// ```text
/// Offset  Size  Field            Description
/// ------  ----  ---------------  ------------------------------------------
/// 0x00    12    reserved         3 × u32; bit 0 of word 0 clear = animated
/// 0x0C    16    palette_markers  4 × BGRA; non-zero = palette present
/// 0x1C    4     key_frame        Playback rate divisor
/// 0x20    4     frame_count      Frames per direction (or total if static)
/// 0x24    96    legacy_colors    24 × BGRA, not used for decoding
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
	reserved: [u32; constants::RESERVED_WORDS],
	palette_markers: [Color; constants::PALETTE_SLOTS],
	key_frame: u32,
	frame_count: u32,
	legacy_colors: [Color; constants::LEGACY_COLOR_SLOTS],
}

impl Default for Header {
	fn default() -> Self {
		Self {
			reserved: [0; constants::RESERVED_WORDS],
			palette_markers: [Color::default(); constants::PALETTE_SLOTS],
			key_frame: 0,
			frame_count: 0,
			legacy_colors: [Color::default(); constants::LEGACY_COLOR_SLOTS],
		}
	}
}

impl Header {
	/// Size of the header in bytes
	pub const SIZE: usize = constants::HEADER_SIZE;

	/// Creates a header for a sprite with `frame_count` frames (per direction
	/// when `animated`) and `palettes` populated palette slots.
	///
	/// Palette markers are set to opaque white; only their non-zero-ness
	/// matters to the decoder.
	pub fn new(animated: bool, key_frame: u32, frame_count: u32, palettes: usize) -> Self {
		let mut header = Self {
			key_frame,
			frame_count,
			..Self::default()
		};
		if !animated {
			header.reserved[0] |= constants::STATIC_FLAG;
		}
		for marker in header.palette_markers.iter_mut().take(palettes) {
			*marker = Color::rgb(0xFF, 0xFF, 0xFF);
		}
		header
	}

	/// Reserved header words.
	pub fn reserved(&self) -> &[u32; constants::RESERVED_WORDS] {
		&self.reserved
	}

	/// Palette marker colors.
	pub fn palette_markers(&self) -> &[Color; constants::PALETTE_SLOTS] {
		&self.palette_markers
	}

	/// Overrides one palette marker; used to describe sparse palette slots.
	pub fn set_palette_marker(&mut self, slot: usize, color: Color) {
		if let Some(marker) = self.palette_markers.get_mut(slot) {
			*marker = color;
		}
	}

	/// Raw key frame value.
	pub fn key_frame(&self) -> u32 {
		self.key_frame
	}

	/// Frame count as stored in the header.
	pub fn frame_count(&self) -> u32 {
		self.frame_count
	}

	/// Number of palettes following the header.
	///
	/// This is the count of non-zero markers, wherever they sit among the four
	/// slots.
	pub fn palette_count(&self) -> usize {
		self.palette_markers.iter().filter(|c| c.is_set()).count()
	}

	/// True when the sprite stores one frame group per facing direction.
	pub fn is_animated(&self) -> bool {
		self.reserved[0] & constants::STATIC_FLAG == 0
	}

	/// Number of frame records in the file.
	///
	/// # Errors
	///
	/// Returns [`IsoFileError::InvalidFormat`] if the directional count
	/// overflows `u32`.
	pub fn total_frames(&self) -> Result<u32, IsoFileError> {
		if !self.is_animated() {
			return Ok(self.frame_count);
		}
		self.frame_count.checked_mul(constants::DIRECTION_COUNT).ok_or_else(|| {
			IsoFileError::invalid_format(
				FileType::Art,
				format!("frame count {} overflows when expanded to 8 directions", self.frame_count),
			)
		})
	}

	/// Reads the header from a reader.
	pub fn from_reader<R: Read>(reader: &mut BinaryReader<R>) -> Result<Self, IsoFileError> {
		let mut reserved = [0u32; constants::RESERVED_WORDS];
		for word in &mut reserved {
			*word = reader.read_u32()?;
		}

		let mut palette_markers = [Color::default(); constants::PALETTE_SLOTS];
		for marker in &mut palette_markers {
			*marker = Color::from_bgra(reader.read_array()?);
		}

		let key_frame = reader.read_u32()?;
		let frame_count = reader.read_u32()?;

		let mut legacy_colors = [Color::default(); constants::LEGACY_COLOR_SLOTS];
		for color in &mut legacy_colors {
			*color = Color::from_bgra(reader.read_array()?);
		}

		Ok(Self {
			reserved,
			palette_markers,
			key_frame,
			frame_count,
			legacy_colors,
		})
	}

	/// Parses the header from the start of `data`.
	pub fn from_bytes(data: &[u8]) -> Result<Self, IsoFileError> {
		if data.len() < Self::SIZE {
			return Err(IsoFileError::insufficient_data(FileType::Art, Self::SIZE, data.len()));
		}
		Self::from_reader(&mut BinaryReader::new(&data[..Self::SIZE], FileType::Art))
	}

	/// Serializes the header.
	pub fn to_bytes(&self) -> [u8; constants::HEADER_SIZE] {
		let mut bytes = [0u8; constants::HEADER_SIZE];
		let mut offset = 0;
		let mut put = |chunk: &[u8]| {
			bytes[offset..offset + chunk.len()].copy_from_slice(chunk);
			offset += chunk.len();
		};

		for word in &self.reserved {
			put(&word.to_le_bytes());
		}
		for marker in &self.palette_markers {
			put(&marker.to_bgra());
		}
		put(&self.key_frame.to_le_bytes());
		put(&self.frame_count.to_le_bytes());
		for color in &self.legacy_colors {
			put(&color.to_bgra());
		}

		bytes
	}
}

impl fmt::Display for Header {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"ART Header:\n\
			- Reserved: {:08X?}\n\
			- Animated: {}\n\
			- Palettes: {}\n\
			- Key frame: {}\n\
			- Frame count: {}",
			self.reserved,
			self.is_animated(),
			self.palette_count(),
			self.key_frame,
			self.frame_count,
		)
	}
}

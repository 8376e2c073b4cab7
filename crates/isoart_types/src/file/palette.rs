//! 256-entry color palettes and index-to-BGRA resolution.
//!
//! ART and BMP files both store colors as 4-byte B, G, R, X tuples. The fourth
//! byte is not a usable alpha channel in either format, so resolved pixels are
//! always emitted fully opaque in the `BGRA8` layout the renderer uploads.

use std::fmt;
use std::io::Read;

use crate::file::IsoFileError;
use crate::file::reader::BinaryReader;

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
	/// Alpha component as stored in the file
	pub a: u8,
}

impl Color {
	/// Creates a new RGBA color.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a new RGB color with full opacity.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::new(r, g, b, 0xFF)
	}

	/// Builds a color from its on-disk `[b, g, r, a]` layout.
	pub const fn from_bgra(bytes: [u8; 4]) -> Self {
		Self::new(bytes[2], bytes[1], bytes[0], bytes[3])
	}

	/// Returns the on-disk `[b, g, r, a]` layout.
	pub const fn to_bgra(self) -> [u8; 4] {
		[self.b, self.g, self.r, self.a]
	}

	/// Returns `[b, g, r, 0xFF]`, the layout uploaded to textures.
	pub const fn to_opaque_bgra(self) -> [u8; 4] {
		[self.b, self.g, self.r, 0xFF]
	}

	/// True if any of the four stored bytes is non-zero.
	///
	/// ART headers use this to mark which palette slots are populated.
	pub const fn is_set(&self) -> bool {
		(self.r | self.g | self.b | self.a) != 0
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// A 256-color lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
	colors: [Color; 256],
}

impl Palette {
	/// Number of entries in a palette
	pub const PALETTE_SIZE: usize = 256;

	/// Size of a serialized palette in bytes (256 colors × 4 bytes)
	pub const BYTE_SIZE: usize = Self::PALETTE_SIZE * 4;

	/// Creates a palette with every entry set to transparent black.
	pub fn new() -> Self {
		Self {
			colors: [Color::default(); 256],
		}
	}

	/// Creates a palette from 256 colors.
	pub fn from_colors(colors: [Color; 256]) -> Self {
		Self {
			colors,
		}
	}

	/// Reads 256 consecutive BGRA entries.
	pub fn from_reader<R: Read>(reader: &mut BinaryReader<R>) -> Result<Self, IsoFileError> {
		let table = reader.read_bytes(Self::BYTE_SIZE)?;
		Ok(Self::from_bgra_table(&table))
	}

	/// Builds a palette from a packed BGRA table.
	///
	/// Up to 256 entries are taken from `table`; missing entries stay
	/// transparent black and a trailing partial entry is ignored.
	pub fn from_bgra_table(table: &[u8]) -> Self {
		let mut palette = Self::new();
		for (slot, chunk) in palette.colors.iter_mut().zip(table.chunks_exact(4)) {
			*slot = Color::from_bgra([chunk[0], chunk[1], chunk[2], chunk[3]]);
		}
		palette
	}

	/// Gets a color by index.
	#[inline]
	pub fn get(&self, index: u8) -> Color {
		self.colors[usize::from(index)]
	}

	/// Sets a color at the specified index.
	#[inline]
	pub fn set(&mut self, index: u8, color: Color) {
		self.colors[usize::from(index)] = color;
	}

	/// Returns a reference to the color array.
	#[inline]
	pub fn colors(&self) -> &[Color; 256] {
		&self.colors
	}

	/// Serializes the palette back to its packed BGRA table.
	pub fn to_bytes(&self) -> Vec<u8> {
		self.colors.iter().flat_map(|c| c.to_bgra()).collect()
	}

	/// Resolves palette indices to opaque BGRA pixels, 4 bytes per index.
	pub fn resolve(&self, indices: &[u8]) -> Vec<u8> {
		let mut bgra = Vec::with_capacity(indices.len() * 4);
		for &index in indices {
			bgra.extend_from_slice(&self.get(index).to_opaque_bgra());
		}
		bgra
	}

	/// Returns an iterator over palette colors.
	pub fn iter(&self) -> impl Iterator<Item = &Color> {
		self.colors.iter()
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Display for Palette {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let used = self.colors.iter().filter(|c| c.is_set()).count();
		write!(f, "Palette: {} of {} entries set", used, Self::PALETTE_SIZE)
	}
}

impl std::ops::Index<u8> for Palette {
	type Output = Color;

	fn index(&self, index: u8) -> &Self::Output {
		&self.colors[usize::from(index)]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::file::FileType;

	fn ramp() -> Palette {
		let mut table = Vec::with_capacity(Palette::BYTE_SIZE);
		for i in 0..=255u8 {
			// b, g, r, and a deliberately non-opaque stored alpha
			table.extend_from_slice(&[i, i.wrapping_mul(3), i.wrapping_add(7), i / 2]);
		}
		Palette::from_bgra_table(&table)
	}

	#[test]
	fn test_color_layouts() {
		let color = Color::from_bgra([1, 2, 3, 4]);
		assert_eq!(color, Color::new(3, 2, 1, 4));
		assert_eq!(color.to_bgra(), [1, 2, 3, 4]);
		assert_eq!(color.to_opaque_bgra(), [1, 2, 3, 0xFF]);
	}

	#[test]
	fn test_is_set() {
		assert!(!Color::default().is_set());
		assert!(Color::new(0, 0, 0, 1).is_set());
		assert!(Color::rgb(0, 0, 0).is_set());
	}

	#[test]
	fn test_resolve_forces_opaque_alpha() {
		let palette = ramp();
		let indices: Vec<u8> = (0..=255).collect();
		let bgra = palette.resolve(&indices);

		assert_eq!(bgra.len(), 256 * 4);
		for (i, px) in bgra.chunks_exact(4).enumerate() {
			let c = palette.get(i as u8);
			assert_eq!(px, [c.b, c.g, c.r, 0xFF]);
		}
	}

	#[test]
	fn test_from_reader() {
		let palette = ramp();
		let bytes = palette.to_bytes();
		let mut reader = BinaryReader::new(&bytes[..], FileType::Art);
		assert_eq!(Palette::from_reader(&mut reader).unwrap(), palette);
		assert_eq!(reader.position(), Palette::BYTE_SIZE as u64);
	}

	#[test]
	fn test_short_table_leaves_rest_empty() {
		let palette = Palette::from_bgra_table(&[10, 20, 30, 0, 40, 50]);
		assert_eq!(palette[0], Color::new(30, 20, 10, 0));
		assert_eq!(palette[1], Color::default());
	}
}

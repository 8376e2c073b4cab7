//! `.BMP` file format support.
//!
//! Only the subset used for isometric tiles and UI art is supported:
//! uncompressed, 8 bits per pixel, with a color table.
//!
//! # File Structure
//!
//! ```text
//! Offset  Size  Field          Description
//! ------  ----  -------------  -------------------------------------------
//! 0x00    2     bfType         Magic "BM"
//! 0x0A    4     bfOffBits      Offset of the pixel array
//! 0x0E    4     biSize         Size of the info header
//! 0x12    4     biWidth        Width in pixels (i32)
//! 0x16    4     biHeight       Height (i32); positive means bottom-up rows
//! 0x1C    2     biBitCount     Must be 8
//! 0x1E    4     biCompression  Must be 0 (BI_RGB)
//! 0x2E    4     biClrUsed      Color table entries, 0 means 256
//! ```
//!
//! The color table (BGRX entries) starts right after the info header, at
//! `14 + biSize`. Every pixel row is padded to a multiple of 4 bytes.

use std::fmt;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;

use crate::file::palette::{Color, Palette};
use crate::file::reader::BinaryReader;
use crate::file::{FileType, IsoFileError};

mod constants {
	/// Magic bytes for `.BMP` files
	pub const MAGIC: [u8; 2] = *b"BM";

	/// Size of the file header preceding the info header
	pub const FILE_HEADER_SIZE: usize = 14;

	/// Size of the `BITMAPINFOHEADER` written by this crate
	pub const INFO_HEADER_SIZE: usize = 40;

	/// Bytes needed to reach the end of `biClrUsed`
	pub const MIN_HEADER_SIZE: usize = 0x32;

	/// The only supported bit depth
	pub const BITS_PER_PIXEL: u16 = 8;

	/// `BI_RGB`
	pub const COMPRESSION_NONE: u32 = 0;
}

/// Parsed BMP headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
	data_offset: u32,
	info_size: u32,
	width: u32,
	height: u32,
	bottom_up: bool,
	bits_per_pixel: u16,
	compression: u32,
	colors_used: u32,
}

impl Header {
	/// Parses and validates the file and info headers at the start of `data`.
	///
	/// # Errors
	///
	/// - [`IsoFileError::InsufficientData`] if `data` is shorter than the headers
	/// - [`IsoFileError::InvalidMagic`] if the file does not start with `BM`
	/// - [`IsoFileError::UnsupportedBitDepth`] unless the image is 8-bit
	/// - [`IsoFileError::UnsupportedCompression`] unless the image is uncompressed
	pub fn from_bytes(data: &[u8]) -> Result<Self, IsoFileError> {
		if data.len() < constants::MIN_HEADER_SIZE {
			return Err(IsoFileError::insufficient_data(
				FileType::Bmp,
				constants::MIN_HEADER_SIZE,
				data.len(),
			));
		}

		let mut reader = BinaryReader::new(&data[..constants::MIN_HEADER_SIZE], FileType::Bmp);

		let magic = reader.read_array::<2>()?;
		if magic != constants::MAGIC {
			return Err(IsoFileError::InvalidMagic {
				file_type: FileType::Bmp,
				magic,
			});
		}

		// bfSize, bfReserved1, bfReserved2
		reader.skip(8)?;
		let data_offset = reader.read_u32()?;
		let info_size = reader.read_u32()?;
		let raw_width = reader.read_i32()?;
		let raw_height = reader.read_i32()?;
		// biPlanes
		reader.skip(2)?;
		let bits_per_pixel = reader.read_u16()?;
		let compression = reader.read_u32()?;
		// biSizeImage, biXPelsPerMeter, biYPelsPerMeter
		reader.skip(12)?;
		let raw_colors_used = reader.read_u32()?;

		if bits_per_pixel != constants::BITS_PER_PIXEL {
			return Err(IsoFileError::UnsupportedBitDepth(bits_per_pixel));
		}
		if compression != constants::COMPRESSION_NONE {
			return Err(IsoFileError::UnsupportedCompression(compression));
		}

		if raw_width < 0 {
			return Err(IsoFileError::invalid_format(
				FileType::Bmp,
				format!("negative width {raw_width}"),
			));
		}

		let colors_used = match raw_colors_used {
			0 => Palette::PALETTE_SIZE as u32,
			n => n,
		};
		if colors_used as usize > Palette::PALETTE_SIZE {
			return Err(IsoFileError::invalid_format(
				FileType::Bmp,
				format!("{colors_used} color table entries, at most 256 allowed"),
			));
		}

		Ok(Self {
			data_offset,
			info_size,
			width: raw_width.unsigned_abs(),
			height: raw_height.unsigned_abs(),
			bottom_up: raw_height > 0,
			bits_per_pixel,
			compression,
			colors_used,
		})
	}

	/// Offset of the pixel array from the start of the file.
	pub fn data_offset(&self) -> u32 {
		self.data_offset
	}

	/// Width in pixels.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Height in pixels.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// True when rows are stored bottom row first.
	pub fn is_bottom_up(&self) -> bool {
		self.bottom_up
	}

	/// Number of color table entries.
	pub fn colors_used(&self) -> u32 {
		self.colors_used
	}

	/// Offset of the color table from the start of the file.
	pub fn color_table_offset(&self) -> usize {
		constants::FILE_HEADER_SIZE + self.info_size as usize
	}

	/// Bytes per stored row, padding included.
	pub fn stride(&self) -> usize {
		(self.width as usize + 3) & !3
	}
}

impl fmt::Display for Header {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"BMP Header:\n\
			- Size: {}x{} ({})\n\
			- Bit depth: {}\n\
			- Compression: {}\n\
			- Colors used: {}\n\
			- Pixel data offset: {} bytes",
			self.width,
			self.height,
			if self.bottom_up {
				"bottom-up"
			} else {
				"top-down"
			},
			self.bits_per_pixel,
			self.compression,
			self.colors_used,
			self.data_offset,
		)
	}
}

/// A decoded 8-bit BMP image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	header: Header,
	palette: Palette,
	indices: Vec<u8>,
}

impl File {
	/// Creates an image from top-to-bottom palette indices.
	///
	/// `colors` becomes the color table and must hold 1 to 256 entries.
	/// The image is written bottom-up by [`File::to_bytes`] unless changed with
	/// [`File::set_bottom_up`].
	///
	/// # Errors
	///
	/// Returns [`IsoFileError::InvalidFormat`] if `indices` does not hold
	/// `width × height` entries or the color table size is out of bounds, and
	/// [`IsoFileError::IndexOutOfRange`] if an index is past the color table.
	pub fn new(
		width: u32,
		height: u32,
		colors: &[Color],
		indices: Vec<u8>,
	) -> Result<Self, IsoFileError> {
		if colors.is_empty() || colors.len() > Palette::PALETTE_SIZE {
			return Err(IsoFileError::invalid_format(
				FileType::Bmp,
				format!("{} color table entries, expected 1 to 256", colors.len()),
			));
		}
		if indices.len() as u64 != u64::from(width) * u64::from(height) {
			return Err(IsoFileError::invalid_format(
				FileType::Bmp,
				format!("{} indices for a {width}x{height} image", indices.len()),
			));
		}

		let colors_used = colors.len() as u32;
		check_indices(&indices, colors_used)?;

		let mut palette = Palette::new();
		for (i, color) in colors.iter().enumerate() {
			palette.set(i as u8, *color);
		}

		let info_size = constants::INFO_HEADER_SIZE as u32;
		let header = Header {
			data_offset: (constants::FILE_HEADER_SIZE + constants::INFO_HEADER_SIZE) as u32
				+ colors_used * 4,
			info_size,
			width,
			height,
			bottom_up: true,
			bits_per_pixel: constants::BITS_PER_PIXEL,
			compression: constants::COMPRESSION_NONE,
			colors_used,
		};

		Ok(Self {
			header,
			palette,
			indices,
		})
	}

	/// Selects the row order used by [`File::to_bytes`].
	pub fn set_bottom_up(&mut self, bottom_up: bool) {
		self.header.bottom_up = bottom_up;
	}

	/// Serializes the image with a 40-byte info header.
	pub fn to_bytes(&self) -> Vec<u8> {
		let width = self.header.width as usize;
		let height = self.header.height as usize;
		let stride = self.header.stride();
		let colors_used = self.header.colors_used as usize;
		let data_offset = constants::FILE_HEADER_SIZE + constants::INFO_HEADER_SIZE + colors_used * 4;
		let file_size = data_offset + stride * height;

		let signed_height = if self.header.bottom_up {
			height as i32
		} else {
			-(height as i32)
		};

		let mut out = Vec::with_capacity(file_size);
		out.extend_from_slice(&constants::MAGIC);
		out.extend_from_slice(&(file_size as u32).to_le_bytes());
		out.extend_from_slice(&[0; 4]);
		out.extend_from_slice(&(data_offset as u32).to_le_bytes());

		out.extend_from_slice(&(constants::INFO_HEADER_SIZE as u32).to_le_bytes());
		out.extend_from_slice(&(width as i32).to_le_bytes());
		out.extend_from_slice(&signed_height.to_le_bytes());
		out.extend_from_slice(&1u16.to_le_bytes());
		out.extend_from_slice(&constants::BITS_PER_PIXEL.to_le_bytes());
		out.extend_from_slice(&constants::COMPRESSION_NONE.to_le_bytes());
		out.extend_from_slice(&((stride * height) as u32).to_le_bytes());
		out.extend_from_slice(&[0; 8]);
		out.extend_from_slice(&(colors_used as u32).to_le_bytes());
		out.extend_from_slice(&0u32.to_le_bytes());

		for color in self.palette.iter().take(colors_used) {
			out.extend_from_slice(&color.to_bgra());
		}

		let padding = stride - width;
		for row in 0..height {
			let source_row = if self.header.bottom_up {
				height - 1 - row
			} else {
				row
			};
			let start = source_row * width;
			out.extend_from_slice(&self.indices[start..start + width]);
			out.resize(out.len() + padding, 0);
		}
		out
	}

	/// Opens and decodes a BMP file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, IsoFileError> {
		let file = std::fs::File::open(path)?;
		Self::from_reader(BufReader::new(file))
	}

	/// Decodes a BMP file from any reader.
	///
	/// The headers point at absolute offsets, so the whole file is read into
	/// memory first.
	pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, IsoFileError> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Self::from_bytes(&data)
	}

	/// Decodes a BMP file held in memory.
	///
	/// # Errors
	///
	/// Besides header errors (see [`Header::from_bytes`]), returns
	/// [`IsoFileError::InsufficientData`] if the color table or pixel array is
	/// cut short and [`IsoFileError::IndexOutOfRange`] if a pixel refers past
	/// the end of the color table.
	pub fn from_bytes(data: &[u8]) -> Result<Self, IsoFileError> {
		let header = Header::from_bytes(data)?;
		debug!(
			"BMP header: {}x{}, {} colors, bottom_up={}",
			header.width, header.height, header.colors_used, header.bottom_up
		);

		let table_start = header.color_table_offset();
		let table_len = header.colors_used as usize * 4;
		let table = slice_at(data, table_start, table_len)?;
		let palette = Palette::from_bgra_table(table);

		let width = header.width as usize;
		let height = header.height as usize;
		let stride = header.stride();
		let pixel_data = slice_at(data, header.data_offset as usize, stride * height)?;

		let mut indices = Vec::with_capacity(width * height);
		for row in 0..height {
			let stored_row = if header.bottom_up {
				height - 1 - row
			} else {
				row
			};
			let start = stored_row * stride;
			indices.extend_from_slice(&pixel_data[start..start + width]);
		}

		check_indices(&indices, header.colors_used)?;

		Ok(Self {
			header,
			palette,
			indices,
		})
	}

	/// The parsed headers.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Width in pixels.
	pub fn width(&self) -> u32 {
		self.header.width
	}

	/// Height in pixels.
	pub fn height(&self) -> u32 {
		self.header.height
	}

	/// The color table; entries past `colors_used` are transparent black.
	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	/// Palette indices, row-major, top to bottom, unpadded.
	pub fn indices(&self) -> &[u8] {
		&self.indices
	}

	/// Opaque BGRA pixels, top to bottom.
	pub fn to_bgra(&self) -> Vec<u8> {
		self.palette.resolve(&self.indices)
	}

	/// Color of the pixel at `(x, y)`, with `y` counted from the top.
	pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
		if x >= self.header.width || y >= self.header.height {
			return None;
		}
		let index = y as usize * self.header.width as usize + x as usize;
		self.indices.get(index).map(|&i| self.palette.get(i))
	}
}

impl fmt::Display for File {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"BMP File: {}x{}, {} colors",
			self.header.width, self.header.height, self.header.colors_used
		)
	}
}

fn check_indices(indices: &[u8], colors_used: u32) -> Result<(), IsoFileError> {
	match indices.iter().find(|&&i| u32::from(i) >= colors_used) {
		Some(&bad) => Err(IsoFileError::index_out_of_range(
			FileType::Bmp,
			"color",
			usize::from(bad),
			colors_used as usize,
		)),
		None => Ok(()),
	}
}

fn slice_at(data: &[u8], start: usize, len: usize) -> Result<&[u8], IsoFileError> {
	start
		.checked_add(len)
		.and_then(|end| data.get(start..end))
		.ok_or_else(|| {
			IsoFileError::insufficient_data(
				FileType::Bmp,
				start.saturating_add(len),
				data.len(),
			)
		})
}

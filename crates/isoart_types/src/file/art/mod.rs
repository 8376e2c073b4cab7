//! `.ART` file format support.
//!
//! ART files are paletted sprite sheets. A single file carries up to four
//! palettes and a list of frames; animated sprites store one group of frames
//! per facing direction (eight groups).
//!
//! # File Structure
//!
//! The file is read strictly front to back:
//! - **Header (132 bytes):** see [`Header`]
//! - **Palettes:** one 1024-byte BGRA table per non-zero palette marker
//! - **Frame headers:** `frame_count` records of 28 bytes, `frame_count × 8`
//!   when the sprite is animated, see [`FrameHeader`]
//! - **Frame payloads:** one block of exactly `size` bytes per frame, in the
//!   same order as the headers, each RLE-compressed or stored raw
//!   (see [`rle`])
//!
//! # Usage Examples
//!
//! ## Loading an ART file
//!
//! ```no_run
//! use isoart_types::file::art::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let art = File::open("hmfc2xab.art")?;
//!
//! println!("Frames: {} ({} per direction)", art.frame_num(), art.frames_per_direction());
//! println!("Palettes: {}", art.palettes().len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Resolving a frame to BGRA
//!
//! ```no_run
//! use isoart_types::file::art::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let art = File::open("hmfc2xab.art")?;
//! let bgra = art.resolve_frame(0, 0)?;
//! let frame = art.frame(0).unwrap();
//! assert_eq!(bgra.len(), frame.width() as usize * frame.height() as usize * 4);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use log::debug;

use crate::file::palette::Palette;
use crate::file::reader::BinaryReader;
use crate::file::{FileType, IsoFileError};

pub mod constants;
pub mod frame;
pub mod header;
pub mod rle;

pub use frame::{Frame, FrameHeader};
pub use header::Header;

/// Limit on frame headers reserved up front; a corrupt count fails on the
/// short read instead of on allocation.
const MAX_PREALLOCATED_FRAMES: usize = 1024;

/// A fully decoded ART sprite.
///
/// Immutable once decoded. Entities that display the same sprite share it
/// behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	header: Header,
	palettes: Vec<Palette>,
	frames: Vec<Frame>,
}

impl File {
	/// Opens and decodes an ART file.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read or is not a valid ART file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, IsoFileError> {
		let file = std::fs::File::open(path)?;
		Self::from_reader(BufReader::new(file))
	}

	/// Decodes an ART file held in memory.
	pub fn from_bytes(data: &[u8]) -> Result<Self, IsoFileError> {
		Self::from_reader(Cursor::new(data))
	}

	/// Decodes an ART file from a sequential stream.
	///
	/// # Errors
	///
	/// - [`IsoFileError::InsufficientData`] if the stream ends early
	/// - [`IsoFileError::InvalidFormat`] if counts or sizes are inconsistent,
	///   or a frame's RLE stream cannot fill the frame
	pub fn from_reader<R: Read>(reader: R) -> Result<Self, IsoFileError> {
		let mut reader = BinaryReader::new(reader, FileType::Art);

		let header = Header::from_reader(&mut reader)?;
		let palette_count = header.palette_count();
		let frame_num = header.total_frames()?;
		debug!(
			"ART header: animated={}, key_frame={}, frames={}, palettes={}",
			header.is_animated(),
			header.key_frame(),
			frame_num,
			palette_count
		);

		let mut palettes = Vec::with_capacity(palette_count);
		for _ in 0..palette_count {
			palettes.push(Palette::from_reader(&mut reader)?);
		}

		let frame_num = frame_num as usize;
		let mut frame_headers = Vec::with_capacity(frame_num.min(MAX_PREALLOCATED_FRAMES));
		for _ in 0..frame_num {
			frame_headers.push(FrameHeader::from_reader(&mut reader)?);
		}

		let mut frames = Vec::with_capacity(frame_headers.len());
		for (index, frame_header) in frame_headers.iter().enumerate() {
			let payload = reader.read_bytes(frame_header.size as usize)?;
			let pixels = frame_header
				.pixel_count()
				.and_then(|pixel_count| rle::decode(&payload, pixel_count))
				.map_err(|e| match e {
					IsoFileError::InvalidFormat {
						file_type,
						message,
					} => IsoFileError::InvalidFormat {
						file_type,
						message: format!("frame {index}: {message}"),
					},
					other => other,
				})?;
			frames.push(Frame::new(frame_header, pixels));
		}

		debug!("ART decoded: {} frames, {} bytes consumed", frames.len(), reader.position());

		Ok(Self {
			header,
			palettes,
			frames,
		})
	}

	/// Assembles a sprite from already decoded parts.
	///
	/// # Errors
	///
	/// Returns [`IsoFileError::InvalidFormat`] if the number of frames does not
	/// match what `header` describes, or a frame's pixel buffer is not exactly
	/// `width * height` bytes.
	pub fn from_parts(
		header: Header,
		palettes: Vec<Palette>,
		frames: Vec<Frame>,
	) -> Result<Self, IsoFileError> {
		let expected = header.total_frames()? as usize;
		if frames.len() != expected {
			return Err(IsoFileError::invalid_format(
				FileType::Art,
				format!("header describes {} frames, got {}", expected, frames.len()),
			));
		}
		for (index, frame) in frames.iter().enumerate() {
			let area = u64::from(frame.width()) * u64::from(frame.height());
			if frame.pixels().len() as u64 != area {
				return Err(IsoFileError::invalid_format(
					FileType::Art,
					format!(
						"frame {index}: {}x{} needs {area} pixels, got {}",
						frame.width(),
						frame.height(),
						frame.pixels().len()
					),
				));
			}
		}
		Ok(Self {
			header,
			palettes,
			frames,
		})
	}

	/// The file header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Playback rate divisor copied from the header.
	pub fn key_frame(&self) -> u32 {
		self.header.key_frame()
	}

	/// True when frames are grouped by facing direction.
	pub fn is_animated(&self) -> bool {
		self.header.is_animated()
	}

	/// Total number of frames, all directions included.
	pub fn frame_num(&self) -> u32 {
		self.frames.len() as u32
	}

	/// Number of frames in one direction group.
	///
	/// Static sprites have a single group holding every frame.
	pub fn frames_per_direction(&self) -> u32 {
		if self.is_animated() {
			self.frame_num() / constants::DIRECTION_COUNT
		} else {
			self.frame_num()
		}
	}

	/// Palettes in file order.
	pub fn palettes(&self) -> &[Palette] {
		&self.palettes
	}

	/// Returns a palette by index.
	pub fn palette(&self, index: usize) -> Option<&Palette> {
		self.palettes.get(index)
	}

	/// Frames in file order.
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	/// Returns a frame by index.
	pub fn frame(&self, index: usize) -> Option<&Frame> {
		self.frames.get(index)
	}

	/// Returns an iterator over the frames.
	pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
		self.frames.iter()
	}

	/// Resolves one frame through one palette into opaque BGRA pixels.
	///
	/// The result holds `4 × width × height` bytes, rows top to bottom, no
	/// padding.
	///
	/// # Errors
	///
	/// Returns [`IsoFileError::IndexOutOfRange`] if either index is past the
	/// end of the sprite's frames or palettes.
	pub fn resolve_frame(
		&self,
		frame_index: usize,
		palette_index: usize,
	) -> Result<Vec<u8>, IsoFileError> {
		let frame = self.frames.get(frame_index).ok_or_else(|| {
			IsoFileError::index_out_of_range(FileType::Art, "frame", frame_index, self.frames.len())
		})?;
		let palette = self.palettes.get(palette_index).ok_or_else(|| {
			IsoFileError::index_out_of_range(
				FileType::Art,
				"palette",
				palette_index,
				self.palettes.len(),
			)
		})?;
		Ok(palette.resolve(frame.pixels()))
	}
}

impl fmt::Display for File {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"ART File: {} frames ({}), {} palettes, key frame {}",
			self.frame_num(),
			if self.is_animated() {
				"animated"
			} else {
				"static"
			},
			self.palettes.len(),
			self.key_frame()
		)
	}
}

impl<'a> IntoIterator for &'a File {
	type Item = &'a Frame;
	type IntoIter = std::slice::Iter<'a, Frame>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

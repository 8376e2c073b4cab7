//! Error types for file format parsing.

use std::fmt;

use thiserror::Error;

/// File formats handled by this crate, used to tag errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
	/// `.ART` animated sprite container
	Art,
	/// `.BMP` paletted bitmap
	Bmp,
}

impl fmt::Display for FileType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Art => write!(f, "ART"),
			Self::Bmp => write!(f, "BMP"),
		}
	}
}

/// Errors that can occur when decoding asset files
#[derive(Debug, Error)]
pub enum IsoFileError {
	/// The stream ended before the requested number of bytes could be read
	#[error("{file_type}: insufficient data, expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Format being decoded
		file_type: FileType,
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Structurally invalid data
	#[error("{file_type}: invalid format: {message}")]
	InvalidFormat {
		/// Format being decoded
		file_type: FileType,
		/// What was wrong
		message: String,
	},

	/// A frame, palette or color index beyond the available range
	#[error("{file_type}: {what} index {index} out of range (len {len})")]
	IndexOutOfRange {
		/// Format the index refers to
		file_type: FileType,
		/// Kind of index, e.g. "frame" or "palette"
		what: &'static str,
		/// Requested index
		index: usize,
		/// Number of available items
		len: usize,
	},

	/// Invalid magic number
	#[error("{file_type}: invalid magic number: {magic:02X?}")]
	InvalidMagic {
		/// Format being decoded
		file_type: FileType,
		/// Bytes found in place of the magic
		magic: [u8; 2],
	},

	/// Bits per pixel other than 8
	#[error("Unsupported bit depth: {0} bits per pixel")]
	UnsupportedBitDepth(u16),

	/// Compressed bitmap variants
	#[error("Unsupported compression type: {0}")]
	UnsupportedCompression(u32),

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

impl IsoFileError {
	/// Shorthand for [`IsoFileError::InsufficientData`].
	pub fn insufficient_data(file_type: FileType, expected: usize, actual: usize) -> Self {
		Self::InsufficientData {
			file_type,
			expected,
			actual,
		}
	}

	/// Shorthand for [`IsoFileError::InvalidFormat`].
	pub fn invalid_format(file_type: FileType, message: impl Into<String>) -> Self {
		Self::InvalidFormat {
			file_type,
			message: message.into(),
		}
	}

	/// Shorthand for [`IsoFileError::IndexOutOfRange`].
	pub fn index_out_of_range(
		file_type: FileType,
		what: &'static str,
		index: usize,
		len: usize,
	) -> Self {
		Self::IndexOutOfRange {
			file_type,
			what,
			index,
			len,
		}
	}

	/// Returns the file type this error refers to, if any.
	pub fn file_type(&self) -> Option<FileType> {
		match self {
			Self::InsufficientData {
				file_type,
				..
			}
			| Self::InvalidFormat {
				file_type,
				..
			}
			| Self::IndexOutOfRange {
				file_type,
				..
			}
			| Self::InvalidMagic {
				file_type,
				..
			} => Some(*file_type),
			Self::UnsupportedBitDepth(_) | Self::UnsupportedCompression(_) => Some(FileType::Bmp),
			Self::IOError(_) => None,
		}
	}
}

//! File type support for `isoart-rs` project.
//!
//! - **ART**: paletted, RLE-compressed sprite sheets with per-direction frame groups
//! - **BMP**: 8-bit paletted bitmaps

mod error;

pub mod art;
pub mod bmp;
pub mod palette;
pub mod reader;

// Re-export unified error type
pub use error::{FileType, IsoFileError};

// Re-export main file types
pub use art::{File as ArtFile, Frame as ArtFrame, FrameHeader, Header as ArtHeader};
pub use bmp::{File as BmpFile, Header as BmpHeader};
pub use palette::{Color, Palette};
pub use reader::BinaryReader;

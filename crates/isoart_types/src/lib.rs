//! This crate provides core data types and file format support for the `isoart-rs` project.
//!
//! # File Formats
//!
//! - **ART**: Paletted, run-length encoded sprite sheets, optionally holding one frame
//!   group per facing direction
//! - **BMP**: 8-bit paletted bitmaps used for tiles
//!
//! # Animation
//!
//! - [`anim::Direction`]: eight-way facing derived from a velocity
//! - [`anim::AnimationCursor`]: per-entity playback state stepping through a frame group
//! - [`sprite::SpriteInstance`]: an entity with standing and walking animations
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use isoart_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let art = ArtFile::open("hmfc2xab.art")?;
//! let bgra = art.resolve_frame(0, 0)?;
//!
//! let mut cursor = AnimationCursor::new();
//! let selection = cursor.tick(&art, 0, Direction::East, 1.0 / 60.0, &AnimationSettings::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use isoart_types::file::bmp::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tile = File::open("tile01.bmp")?;
//! let bgra = tile.to_bgra();
//! # Ok(())
//! # }
//! ```

pub mod anim;
pub mod file;
pub mod sprite;

/// `use isoart_types::prelude::*;` to import commonly used items.
pub mod prelude;

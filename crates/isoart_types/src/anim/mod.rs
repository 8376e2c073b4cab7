//! Sprite animation: facing directions, playback settings and per-entity
//! playback state.
//!
//! # Examples
//!
//! ```no_run
//! use isoart_types::anim::{AnimationCursor, AnimationSettings, Direction};
//! use isoart_types::file::ArtFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let art = ArtFile::open("hmfc2xab.art")?;
//! let settings = AnimationSettings::default();
//! let mut cursor = AnimationCursor::new();
//!
//! // velocity in normalized device coordinates, one tick of a 60 FPS loop
//! let facing = settings.classifier().classify(0.4, 0.3);
//! let selection = cursor.tick(&art, 0, facing, 1.0 / 60.0, &settings)?;
//! println!("draw texture {}", selection.texture_index);
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

pub mod cursor;
pub mod direction;
pub mod settings;

pub use cursor::{AnimationCursor, FrameSelection};
pub use direction::{Direction, DirectionClassifier};
pub use settings::AnimationSettings;

/// Errors raised while stepping an animation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
	/// The sprite has no frames to show for the requested direction
	#[error("sprite has no frames to animate")]
	NoFrames,

	/// The computed frame lies outside the sprite
	#[error("frame {index} out of range (sprite has {len} frames)")]
	FrameOutOfRange {
		/// Frame index within the sprite
		index: u64,
		/// Number of frames in the sprite
		len: usize,
	},
}

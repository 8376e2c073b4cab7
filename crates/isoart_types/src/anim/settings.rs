//! Animation playback settings.

use serde::{Deserialize, Serialize};

use super::direction::DirectionClassifier;

/// Tunables shared by every animation cursor.
///
/// Deserializes from the `[animation]` table of the settings file; missing
/// fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
	/// Frame rate that ART key frame values are expressed against.
	pub target_fps: f32,

	/// Multiplier applied to every elapsed time step.
	pub time_scale: f32,

	/// Dead zone used when turning velocities into facing directions.
	pub direction_epsilon: f32,

	/// Adds each frame's extra offset to its anchor when reporting the center.
	pub apply_center_offset: bool,
}

impl Default for AnimationSettings {
	fn default() -> Self {
		Self {
			target_fps: 60.0,
			time_scale: 1.0,
			direction_epsilon: DirectionClassifier::DEFAULT_EPSILON,
			apply_center_offset: false,
		}
	}
}

impl AnimationSettings {
	/// Seconds one frame stays on screen for a sprite with the given key frame.
	///
	/// A key frame of `k` shows each frame for `k + 1` ticks of the target
	/// frame rate.
	pub fn frame_lifetime(&self, key_frame: u32) -> f32 {
		(key_frame as f32 + 1.0) / self.target_fps
	}

	/// Direction classifier using the configured dead zone.
	pub fn classifier(&self) -> DirectionClassifier {
		DirectionClassifier::new(self.direction_epsilon)
	}
}

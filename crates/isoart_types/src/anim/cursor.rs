//! Per-entity animation playback state.

use log::trace;

use crate::file::art;

use super::direction::Direction;
use super::settings::AnimationSettings;
use super::AnimationError;

/// The frame to draw after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSelection {
	/// Texture to draw: the sprite's first texture plus the frame index
	pub texture_index: u32,
	/// Frame index within the sprite
	pub frame_index: usize,
	/// Frame width in pixels
	pub width: u32,
	/// Frame height in pixels
	pub height: u32,
	/// Display center of the frame
	pub center: (i32, i32),
}

/// Playback position of one animation.
///
/// Texture indices assume the sprite's frames were uploaded as consecutive
/// textures starting at the `texture_start` passed to [`AnimationCursor::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationCursor {
	direction: Option<Direction>,
	group_start: u32,
	current: u32,
	time_accumulated: f32,
}

impl AnimationCursor {
	/// Creates a cursor that has not picked a direction yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Direction of the current frame group, `None` before the first tick.
	pub fn direction(&self) -> Option<Direction> {
		self.direction
	}

	/// Texture index of the first frame in the current group.
	pub fn group_start(&self) -> u32 {
		self.group_start
	}

	/// Texture index of the current frame.
	pub fn current(&self) -> u32 {
		self.current
	}

	/// Seconds accumulated towards the next frame.
	pub fn time_accumulated(&self) -> f32 {
		self.time_accumulated
	}

	/// Forgets the direction so the next tick starts its group from the top.
	pub fn reset(&mut self) {
		*self = Self::default();
	}

	/// Advances playback by `dt` seconds while facing `direction`.
	///
	/// Changing direction, or being handed a different `texture_start`,
	/// restarts playback at the first frame of the new group. Time then
	/// accumulates and every full frame lifetime (see
	/// [`AnimationSettings::frame_lifetime`]) advances one frame, wrapping
	/// within the group.
	///
	/// Static sprites have a single group covering every frame, whatever the
	/// direction.
	///
	/// # Errors
	///
	/// - [`AnimationError::NoFrames`] if the sprite has no frames
	/// - [`AnimationError::FrameOutOfRange`] if the frame group does not fit
	///   in the sprite or in the texture index range
	pub fn tick(
		&mut self,
		sprite: &art::File,
		texture_start: u32,
		direction: Direction,
		dt: f32,
		settings: &AnimationSettings,
	) -> Result<FrameSelection, AnimationError> {
		let frame_count = sprite.frames().len();
		let group_len = sprite.frames_per_direction();
		if frame_count == 0 || group_len == 0 {
			return Err(AnimationError::NoFrames);
		}

		let group_offset = if sprite.is_animated() {
			u64::from(direction.index()) * u64::from(group_len)
		} else {
			0
		};
		if group_offset + u64::from(group_len) > frame_count as u64 {
			return Err(AnimationError::FrameOutOfRange {
				index: group_offset + u64::from(group_len) - 1,
				len: frame_count,
			});
		}
		let group_start = u32::try_from(u64::from(texture_start) + group_offset)
			.ok()
			.filter(|start| start.checked_add(group_len - 1).is_some())
			.ok_or(AnimationError::FrameOutOfRange {
				index: group_offset,
				len: frame_count,
			})?;

		if self.direction != Some(direction) || self.group_start != group_start {
			trace!("animation group change: {:?} -> {direction}, start {group_start}", self.direction);
			self.direction = Some(direction);
			self.group_start = group_start;
			self.current = group_start;
			self.time_accumulated = 0.0;
		}

		let lifetime = settings.frame_lifetime(sprite.key_frame());
		self.time_accumulated += dt * settings.time_scale;
		let steps = self.consume_lifetimes(lifetime);

		let position = u64::from(self.current - self.group_start) + steps % u64::from(group_len);
		// position < 2 * group_len, and group_start + group_len - 1 fits in u32
		self.current = self.group_start + (position % u64::from(group_len)) as u32;

		let frame_index = (self.current - texture_start) as usize;
		let frame = sprite.frame(frame_index).ok_or(AnimationError::FrameOutOfRange {
			index: frame_index as u64,
			len: frame_count,
		})?;

		Ok(FrameSelection {
			texture_index: self.current,
			frame_index,
			width: frame.width(),
			height: frame.height(),
			center: frame.center(settings.apply_center_offset),
		})
	}

	/// Removes whole frame lifetimes from the accumulator while it exceeds one
	/// lifetime, returning how many were removed.
	fn consume_lifetimes(&mut self, lifetime: f32) -> u64 {
		if !lifetime.is_finite() || lifetime <= 0.0 || !self.time_accumulated.is_finite() {
			self.time_accumulated = 0.0;
			return 0;
		}
		if self.time_accumulated <= lifetime {
			return 0;
		}

		// same result as subtracting one lifetime at a time, but bounded for huge dt
		let whole = (self.time_accumulated / lifetime).floor();
		let mut steps = whole;
		let mut rest = self.time_accumulated - whole * lifetime;
		if rest <= 0.0 {
			steps -= 1.0;
			rest += lifetime;
		}
		self.time_accumulated = rest.clamp(0.0, lifetime);
		steps as u64
	}
}

//! Sprite entities: a position plus optional standing and walking animations.
//!
//! Decoded ART files are shared between entities through [`Arc`]; each entity
//! keeps its own [`AnimationCursor`] per animation.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use isoart_types::anim::AnimationSettings;
//! use isoart_types::file::ArtFile;
//! use isoart_types::sprite::{AnimationKind, AnimationTrack, Animatable, SpriteInstance};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let name = "hmfc2xab";
//! let art = Arc::new(ArtFile::open(format!("{name}.art"))?);
//!
//! let mut hero = SpriteInstance::new();
//! if let Some(kind) = AnimationKind::from_art_name(name) {
//!     hero.set_track(kind, AnimationTrack::new(art, 0));
//! }
//!
//! let settings = AnimationSettings::default();
//! let frame = hero.update((0.5, 0.0), 1.0 / 60.0, &settings)?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use crate::anim::{AnimationCursor, AnimationError, AnimationSettings, Direction, FrameSelection};
use crate::file::art;

/// Position and uniform scale of an entity in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
	/// World position
	pub position: [f32; 3],
	/// Uniform scale
	pub scale: f32,
}

impl Default for Transform {
	fn default() -> Self {
		Self {
			position: [0.0; 3],
			scale: 1.0,
		}
	}
}

/// Something placed in the world.
pub trait Positionable {
	/// Current world position.
	fn position(&self) -> [f32; 3];

	/// Moves to an absolute world position.
	fn set_position(&mut self, position: [f32; 3]);

	/// Moves by a world-space offset.
	fn translate(&mut self, offset: [f32; 3]) {
		let [x, y, z] = self.position();
		self.set_position([x + offset[0], y + offset[1], z + offset[2]]);
	}
}

/// Something whose displayed frame changes over time.
pub trait Animatable {
	/// Steps the animation by `dt` seconds for an entity moving with
	/// `velocity` (screen space, `y` up).
	///
	/// Returns the frame to draw, or `None` if there is nothing to animate.
	fn update(
		&mut self,
		velocity: (f32, f32),
		dt: f32,
		settings: &AnimationSettings,
	) -> Result<Option<FrameSelection>, AnimationError>;
}

/// Which animation an ART file provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
	/// Idle loop
	Standing,
	/// Movement loop
	Walking,
}

impl AnimationKind {
	/// Infers the kind from the trailing character of an ART name.
	///
	/// Names ending in `a` are standing animations and names ending in `b`
	/// walking ones; a `.art` extension is ignored.
	///
	/// ```
	/// use isoart_types::sprite::AnimationKind;
	///
	/// assert_eq!(AnimationKind::from_art_name("hmfc2xaa"), Some(AnimationKind::Standing));
	/// assert_eq!(AnimationKind::from_art_name("hmfc2xab.art"), Some(AnimationKind::Walking));
	/// assert_eq!(AnimationKind::from_art_name("tile01"), None);
	/// ```
	pub fn from_art_name(name: &str) -> Option<Self> {
		let stem = match name.len().checked_sub(4) {
			Some(split)
				if name.is_char_boundary(split) && name[split..].eq_ignore_ascii_case(".art") =>
			{
				&name[..split]
			}
			_ => name,
		};
		match stem.chars().last()?.to_ascii_lowercase() {
			'a' => Some(Self::Standing),
			'b' => Some(Self::Walking),
			_ => None,
		}
	}
}

impl fmt::Display for AnimationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Standing => write!(f, "standing"),
			Self::Walking => write!(f, "walking"),
		}
	}
}

/// One animation of an entity: a shared sprite, where its frames live in the
/// texture atlas, and the entity's playback state.
#[derive(Debug, Clone)]
pub struct AnimationTrack {
	sprite: Arc<art::File>,
	texture_start: u32,
	cursor: AnimationCursor,
}

impl AnimationTrack {
	/// Creates a track for a sprite whose first frame was uploaded as texture
	/// `texture_start`.
	pub fn new(sprite: Arc<art::File>, texture_start: u32) -> Self {
		Self {
			sprite,
			texture_start,
			cursor: AnimationCursor::new(),
		}
	}

	/// The decoded sprite.
	pub fn sprite(&self) -> &Arc<art::File> {
		&self.sprite
	}

	/// Texture index of the sprite's first frame.
	pub fn texture_start(&self) -> u32 {
		self.texture_start
	}

	/// Playback state.
	pub fn cursor(&self) -> &AnimationCursor {
		&self.cursor
	}

	/// Advances playback facing `direction`.
	pub fn tick(
		&mut self,
		direction: Direction,
		dt: f32,
		settings: &AnimationSettings,
	) -> Result<FrameSelection, AnimationError> {
		self.cursor.tick(&self.sprite, self.texture_start, direction, dt, settings)
	}
}

/// A drawable entity.
#[derive(Debug, Clone, Default)]
pub struct SpriteInstance {
	transform: Transform,
	standing: Option<AnimationTrack>,
	walking: Option<AnimationTrack>,
	facing: Direction,
	selection: Option<FrameSelection>,
}

impl SpriteInstance {
	/// Creates an entity at the origin with no animations.
	pub fn new() -> Self {
		Self::default()
	}

	/// The entity's transform.
	pub fn transform(&self) -> &Transform {
		&self.transform
	}

	/// Mutable access to the transform.
	pub fn transform_mut(&mut self) -> &mut Transform {
		&mut self.transform
	}

	/// Installs an animation, returning the one it replaces.
	pub fn set_track(&mut self, kind: AnimationKind, track: AnimationTrack) -> Option<AnimationTrack> {
		let slot = match kind {
			AnimationKind::Standing => &mut self.standing,
			AnimationKind::Walking => &mut self.walking,
		};
		slot.replace(track)
	}

	/// Returns an installed animation.
	pub fn track(&self, kind: AnimationKind) -> Option<&AnimationTrack> {
		match kind {
			AnimationKind::Standing => self.standing.as_ref(),
			AnimationKind::Walking => self.walking.as_ref(),
		}
	}

	/// Direction the entity faced on the last update.
	pub fn facing(&self) -> Direction {
		self.facing
	}

	/// Frame chosen by the last successful update.
	pub fn selection(&self) -> Option<&FrameSelection> {
		self.selection.as_ref()
	}
}

impl Positionable for SpriteInstance {
	fn position(&self) -> [f32; 3] {
		self.transform.position
	}

	fn set_position(&mut self, position: [f32; 3]) {
		self.transform.position = position;
	}
}

impl Animatable for SpriteInstance {
	/// Walks while the velocity leaves the dead zone and stands otherwise,
	/// falling back to whichever animation is installed.
	///
	/// A resting entity keeps the direction it last moved in.
	fn update(
		&mut self,
		velocity: (f32, f32),
		dt: f32,
		settings: &AnimationSettings,
	) -> Result<Option<FrameSelection>, AnimationError> {
		let epsilon = settings.direction_epsilon;
		let moving = velocity.0.abs() > epsilon || velocity.1.abs() > epsilon;
		if moving {
			self.facing = settings.classifier().classify(velocity.0, velocity.1);
		}

		let (preferred, fallback) = if moving {
			(&mut self.walking, &mut self.standing)
		} else {
			(&mut self.standing, &mut self.walking)
		};
		let Some(track) = preferred.as_mut().or(fallback.as_mut()) else {
			self.selection = None;
			return Ok(None);
		};

		let selection = track.tick(self.facing, dt, settings)?;
		self.selection = Some(selection);
		Ok(Some(selection))
	}
}

//! Eight-way facing directions derived from a 2D velocity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Facing direction, clockwise from north.
///
/// The discriminant is the index of the direction's frame group inside an
/// animated ART file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
	/// Up; also the idle facing
	#[default]
	North = 0,
	/// Up and right
	NorthEast = 1,
	/// Right
	East = 2,
	/// Down and right
	SouthEast = 3,
	/// Down
	South = 4,
	/// Down and left
	SouthWest = 5,
	/// Left
	West = 6,
	/// Up and left
	NorthWest = 7,
}

impl Direction {
	/// All directions in frame group order.
	pub const ALL: [Direction; 8] = [
		Direction::North,
		Direction::NorthEast,
		Direction::East,
		Direction::SouthEast,
		Direction::South,
		Direction::SouthWest,
		Direction::West,
		Direction::NorthWest,
	];

	/// Frame group index, 0 to 7.
	#[inline]
	pub const fn index(self) -> u32 {
		self as u32
	}

	/// Direction for a frame group index.
	pub fn from_index(index: u32) -> Option<Self> {
		Self::ALL.get(index as usize).copied()
	}

	/// Classifies a velocity `(x, y)`, with `y` pointing up.
	///
	/// A component whose magnitude is at most `epsilon` counts as zero. A
	/// velocity with no horizontal component faces north unless it points
	/// down, so a resting entity faces north. NaN input also yields north.
	///
	/// ```
	/// use isoart_types::anim::Direction;
	///
	/// assert_eq!(Direction::classify(0.05, 0.5, 0.1), Direction::North);
	/// assert_eq!(Direction::classify(0.5, 0.5, 0.1), Direction::NorthEast);
	/// assert_eq!(Direction::classify(0.05, -0.5, 0.1), Direction::South);
	/// ```
	pub fn classify(x: f32, y: f32, epsilon: f32) -> Self {
		if x.is_nan() || y.is_nan() {
			return Self::North;
		}

		if x > epsilon {
			if y > epsilon {
				Self::NorthEast
			} else if y < -epsilon {
				Self::SouthEast
			} else {
				Self::East
			}
		} else if x < -epsilon {
			if y > epsilon {
				Self::NorthWest
			} else if y < -epsilon {
				Self::SouthWest
			} else {
				Self::West
			}
		} else if y < 0.0 {
			Self::South
		} else {
			Self::North
		}
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::North => "N",
			Self::NorthEast => "NE",
			Self::East => "E",
			Self::SouthEast => "SE",
			Self::South => "S",
			Self::SouthWest => "SW",
			Self::West => "W",
			Self::NorthWest => "NW",
		};
		f.pad(name)
	}
}

impl From<Direction> for u32 {
	fn from(direction: Direction) -> Self {
		direction.index()
	}
}

/// [`Direction::classify`] with a fixed dead zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionClassifier {
	epsilon: f32,
}

impl DirectionClassifier {
	/// Dead zone used when nothing else is configured
	pub const DEFAULT_EPSILON: f32 = 0.1;

	/// Creates a classifier with the given dead zone.
	pub fn new(epsilon: f32) -> Self {
		Self {
			epsilon,
		}
	}

	/// The dead zone.
	pub fn epsilon(&self) -> f32 {
		self.epsilon
	}

	/// Classifies a velocity.
	#[inline]
	pub fn classify(&self, x: f32, y: f32) -> Direction {
		Direction::classify(x, y, self.epsilon)
	}
}

impl Default for DirectionClassifier {
	fn default() -> Self {
		Self::new(Self::DEFAULT_EPSILON)
	}
}

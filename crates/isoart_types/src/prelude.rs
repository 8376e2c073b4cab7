//! Prelude module for `isoart_types`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```no_run
//! use isoart_types::prelude::*;
//!
//! // Now you can use all common types directly
//! let classifier = DirectionClassifier::default();
//! let facing = classifier.classify(0.5, 0.5);
//! let mut hero = SpriteInstance::new();
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// ART types
	ArtFile,
	ArtFrame,
	ArtHeader,

	// BMP types
	BmpFile,

	// Shared
	Color,
	FileType,
	IsoFileError,
	Palette,
};

// Animation types
#[doc(inline)]
pub use crate::anim::{
	AnimationCursor, AnimationError, AnimationSettings, Direction, DirectionClassifier,
	FrameSelection,
};

// Entity composition
#[doc(inline)]
pub use crate::sprite::{
	Animatable, AnimationKind, AnimationTrack, Positionable, SpriteInstance, Transform,
};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;

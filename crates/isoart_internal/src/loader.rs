//! Loading assets from a resource bundle and assembling sprite entities.

use std::collections::HashMap;
use std::sync::Arc;

use isoart_types::anim::AnimationError;
use isoart_types::file::{ArtFile, BmpFile, IsoFileError};
use isoart_types::sprite::{AnimationKind, AnimationTrack, SpriteInstance};
use isoart_vfs::{ResourceBundle, VfsError};
use log::{debug, info, warn};
use thiserror::Error;

use crate::settings::Settings;
use crate::texture::{TextureSink, upload_sprite};

/// Asset type of sprite files
pub const ART_KIND: &str = "art";

/// Asset type of bitmap files
pub const BMP_KIND: &str = "bmp";

/// Errors raised while loading assets
#[derive(Debug, Error)]
pub enum LoadError {
	/// The asset could not be located or opened
	#[error(transparent)]
	Vfs(#[from] VfsError),

	/// The asset could not be decoded
	#[error("failed to decode `{name}`: {source}")]
	File {
		/// Asset name
		name: String,
		/// Decoder error
		#[source]
		source: IsoFileError,
	},

	/// The sprite cannot be animated
	#[error(transparent)]
	Animation(#[from] AnimationError),

	/// The texture sink did not place frames side by side
	#[error("textures for `{name}` are not contiguous: expected index {expected}, got {actual}")]
	NonContiguousTextures {
		/// Asset name
		name: String,
		/// Index the frame should have received
		expected: u64,
		/// Index the sink returned
		actual: u32,
	},
}

/// Decodes assets from a [`ResourceBundle`], sharing sprites by name.
///
/// Uploaded textures are remembered by sprite name and palette, so a loader
/// should always be handed the same [`TextureSink`].
#[derive(Debug)]
pub struct AssetLoader {
	bundle: ResourceBundle,
	sprites: HashMap<String, Arc<ArtFile>>,
	texture_starts: HashMap<(String, usize), u32>,
}

impl AssetLoader {
	/// Creates a loader reading from `bundle`.
	pub fn new(bundle: ResourceBundle) -> Self {
		Self {
			bundle,
			sprites: HashMap::new(),
			texture_starts: HashMap::new(),
		}
	}

	/// Creates a loader reading from the configured asset root.
	pub fn from_settings(settings: &Settings) -> Self {
		Self::new(ResourceBundle::new(&settings.asset_root))
	}

	/// The underlying bundle.
	pub fn bundle(&self) -> &ResourceBundle {
		&self.bundle
	}

	/// Texture start of a sprite already uploaded through `palette_index`.
	pub fn texture_start(&self, name: &str, palette_index: usize) -> Option<u32> {
		self.texture_starts.get(&(name.to_owned(), palette_index)).copied()
	}

	/// Loads and decodes `<name>.art`.
	///
	/// A sprite is decoded once; later calls return the same shared value.
	pub fn load_art(&mut self, name: &str) -> Result<Arc<ArtFile>, LoadError> {
		if let Some(sprite) = self.sprites.get(name) {
			debug!("{name}: reusing decoded sprite");
			return Ok(Arc::clone(sprite));
		}

		let reader = self.bundle.open(name, ART_KIND)?;
		let sprite = ArtFile::from_reader(reader).map_err(|source| LoadError::File {
			name: name.to_owned(),
			source,
		})?;
		info!("loaded {name}.{ART_KIND}: {sprite}");

		let sprite = Arc::new(sprite);
		self.sprites.insert(name.to_owned(), Arc::clone(&sprite));
		Ok(sprite)
	}

	/// Loads and decodes `<name>.bmp`.
	pub fn load_bmp(&self, name: &str) -> Result<BmpFile, LoadError> {
		let reader = self.bundle.open(name, BMP_KIND)?;
		let bitmap = BmpFile::from_reader(reader).map_err(|source| LoadError::File {
			name: name.to_owned(),
			source,
		})?;
		info!("loaded {name}.{BMP_KIND}: {bitmap}");
		Ok(bitmap)
	}

	/// Loads a sprite, uploads its frames and wraps it in an animation track.
	///
	/// Frames are uploaded once per name and palette; later tracks for the same
	/// pair reuse the existing textures.
	pub fn load_track<S: TextureSink + ?Sized>(
		&mut self,
		name: &str,
		palette_index: usize,
		sink: &mut S,
	) -> Result<AnimationTrack, LoadError> {
		let sprite = self.load_art(name)?;
		let key = (name.to_owned(), palette_index);
		let texture_start = match self.texture_starts.get(&key).copied() {
			Some(start) => {
				debug!("{name}: reusing textures from index {start}");
				start
			}
			None => {
				let start = upload_sprite(name, &sprite, palette_index, sink)?;
				self.texture_starts.insert(key, start);
				start
			}
		};
		Ok(AnimationTrack::new(sprite, texture_start))
	}

	/// Builds an entity from ART names, installing each as the standing or
	/// walking animation according to its trailing letter.
	///
	/// Names that select neither animation are skipped with a warning.
	pub fn load_sprite_instance<S: TextureSink + ?Sized>(
		&mut self,
		names: &[&str],
		settings: &Settings,
		sink: &mut S,
	) -> Result<SpriteInstance, LoadError> {
		let mut instance = SpriteInstance::new();
		for &name in names {
			let Some(kind) = AnimationKind::from_art_name(name) else {
				warn!("{name}: name does not end in 'a' or 'b', skipping");
				continue;
			};
			let track = self.load_track(name, settings.default_palette, sink)?;
			debug!("{name}: installed as {kind} animation");
			if instance.set_track(kind, track).is_some() {
				warn!("{name}: replaced an earlier {kind} animation");
			}
		}
		Ok(instance)
	}
}

//! Turning decoded sprites into renderer textures.
//!
//! The renderer is reached through [`TextureSink`]. Every frame of a sprite is
//! resolved through one palette and uploaded in order; the index of the first
//! texture is the sprite's texture start, which animation cursors add frame
//! indices to.

use isoart_types::anim::AnimationError;
use isoart_types::file::ArtFile;
use log::{debug, trace};

use crate::loader::LoadError;

/// Receives BGRA textures and hands back their atlas index.
pub trait TextureSink {
	/// Stores one `width × height` texture of `4 × width × height` BGRA bytes
	/// and returns its index.
	fn create_texture(&mut self, name: &str, width: u32, height: u32, bgra: &[u8]) -> u32;
}

/// A texture kept in memory by [`TextureAtlas`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
	/// Asset the texture came from
	pub name: String,
	/// Width in pixels
	pub width: u32,
	/// Height in pixels
	pub height: u32,
	/// BGRA pixels, rows top to bottom
	pub bgra: Vec<u8>,
}

/// In-memory [`TextureSink`] assigning consecutive indices from zero.
#[derive(Debug, Clone, Default)]
pub struct TextureAtlas {
	textures: Vec<Texture>,
}

impl TextureAtlas {
	/// Creates an empty atlas.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of stored textures.
	pub fn len(&self) -> usize {
		self.textures.len()
	}

	/// True if nothing was uploaded yet.
	pub fn is_empty(&self) -> bool {
		self.textures.is_empty()
	}

	/// Returns a texture by index.
	pub fn get(&self, index: u32) -> Option<&Texture> {
		self.textures.get(index as usize)
	}

	/// All stored textures in upload order.
	pub fn textures(&self) -> &[Texture] {
		&self.textures
	}
}

impl TextureSink for TextureAtlas {
	fn create_texture(&mut self, name: &str, width: u32, height: u32, bgra: &[u8]) -> u32 {
		let index = self.textures.len() as u32;
		self.textures.push(Texture {
			name: name.to_owned(),
			width,
			height,
			bgra: bgra.to_vec(),
		});
		index
	}
}

/// Uploads every frame of `sprite` through palette `palette_index`.
///
/// Returns the texture index of frame 0. Frames must land at consecutive
/// indices so that `start + frame_index` addresses any frame.
///
/// # Errors
///
/// - [`LoadError::Animation`] with [`AnimationError::NoFrames`] if the
///   sprite is empty
/// - [`LoadError::File`] if `palette_index` is out of range
/// - [`LoadError::NonContiguousTextures`] if the sink returns indices out of
///   sequence
pub fn upload_sprite<S: TextureSink + ?Sized>(
	name: &str,
	sprite: &ArtFile,
	palette_index: usize,
	sink: &mut S,
) -> Result<u32, LoadError> {
	if sprite.frames().is_empty() {
		return Err(AnimationError::NoFrames.into());
	}

	let mut start = None;
	for (frame_index, frame) in sprite.iter().enumerate() {
		let bgra = sprite.resolve_frame(frame_index, palette_index).map_err(|source| {
			LoadError::File {
				name: name.to_owned(),
				source,
			}
		})?;
		let index = sink.create_texture(name, frame.width(), frame.height(), &bgra);
		trace!("{name}: frame {frame_index} -> texture {index}");

		let first = *start.get_or_insert(index);
		let expected = u64::from(first) + frame_index as u64;
		if u64::from(index) != expected {
			return Err(LoadError::NonContiguousTextures {
				name: name.to_owned(),
				expected,
				actual: index,
			});
		}
	}

	let start = start.unwrap_or_default();
	debug!("{name}: uploaded {} frames starting at texture {start}", sprite.frame_num());
	Ok(start)
}

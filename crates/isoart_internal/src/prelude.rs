//! Prelude module for `isoart_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```no_run
//! use isoart_internal::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load(None)?;
//! let mut loader = AssetLoader::from_settings(&settings);
//! let mut atlas = TextureAtlas::new();
//!
//! let mut hero = loader.load_sprite_instance(&["hmfc2xaa", "hmfc2xab"], &settings, &mut atlas)?;
//! let frame = hero.update((0.3, 0.0), 1.0 / 60.0, &settings.animation)?;
//! # Ok(())
//! # }
//! ```

// Re-export everything from isoart_types::prelude
#[doc(inline)]
pub use isoart_types::prelude::*;

#[doc(inline)]
pub use isoart_vfs::{ResourceBundle, VfsError};

#[doc(inline)]
pub use crate::loader::{AssetLoader, LoadError};
#[doc(inline)]
pub use crate::settings::{Settings, SettingsError};
#[doc(inline)]
pub use crate::texture::{Texture, TextureAtlas, TextureSink, upload_sprite};

// Re-export the entire isoart_types module for advanced usage
#[doc(inline)]
pub use isoart_types;

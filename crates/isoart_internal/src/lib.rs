//! Asset pipeline composition for `isoart-rs`: settings, asset loading and
//! texture upload on top of [`isoart_types`] and [`isoart_vfs`].
//!
//! This module is separated into its own crate so the decoders stay free of
//! configuration and filesystem concerns, and should not be used directly.

pub mod loader;
pub mod settings;
pub mod texture;

/// `use isoart_internal::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export member crates for convenience
pub use isoart_types;
pub use isoart_vfs;

// Re-export commonly used types at crate root
pub use loader::{AssetLoader, LoadError};
pub use settings::{Settings, SettingsError};
pub use texture::{Texture, TextureAtlas, TextureSink, upload_sprite};

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `isoart-rs` is the sprite asset pipeline of an isometric game client.
//!
//! It decodes paletted `.ART` sprite sheets and 8-bit `.BMP` tiles, resolves
//! their pixels to BGRA for the renderer, and drives per-entity directional
//! animation.
//!
//! ```no_run
//! use isoart_rs::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load(None)?;
//! let mut loader = AssetLoader::from_settings(&settings);
//! let sprite = loader.load_art("hmfc2xab")?;
//! println!("{sprite}");
//! # Ok(())
//! # }
//! ```
pub use isoart_internal::*;

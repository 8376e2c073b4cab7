//! Runtime settings, loaded from an optional TOML file and `ISOART__*`
//! environment variables.
//!
//! ```toml
//! asset_root = "assets"
//! default_palette = 2
//!
//! [animation]
//! target_fps = 60.0
//! time_scale = 1.0
//! direction_epsilon = 0.1
//! apply_center_offset = false
//! ```
//!
//! Environment variables override the file, with `__` separating nested keys:
//! `ISOART__ANIMATION__TIME_SCALE=2.0`.

use std::path::{Path, PathBuf};

use config::{Config, Environment, FileFormat};
use isoart_types::anim::AnimationSettings;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
	/// The file or environment could not be read or deserialized
	#[error(transparent)]
	Config(#[from] config::ConfigError),

	/// A value is outside its allowed range
	#[error("invalid setting `{key}`: {message}")]
	Invalid {
		/// Dotted key of the offending setting
		key: &'static str,
		/// What is wrong with it
		message: String,
	},
}

/// Settings for the asset pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Directory holding `.art` and `.bmp` assets
	pub asset_root: PathBuf,

	/// Palette used when turning sprite frames into textures
	pub default_palette: usize,

	/// Animation playback tunables
	pub animation: AnimationSettings,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			asset_root: PathBuf::from("assets"),
			default_palette: 2,
			animation: AnimationSettings::default(),
		}
	}
}

impl Settings {
	/// Prefix of environment overrides
	pub const ENV_PREFIX: &'static str = "ISOART";

	/// Loads settings from `path`, if given, then applies environment
	/// overrides and validates the result.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::Config`] if the file is missing or malformed and
	/// [`SettingsError::Invalid`] if a value is out of range.
	pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
		Self::load_with(path, Self::environment())
	}

	/// Parses settings from TOML text without consulting the environment.
	pub fn from_toml_str(toml: &str) -> Result<Self, SettingsError> {
		let settings: Self = Config::builder()
			.add_source(config::File::from_str(toml, FileFormat::Toml))
			.build()?
			.try_deserialize()?;
		settings.validate()?;
		Ok(settings)
	}

	/// Environment source for `ISOART__*` variables.
	pub fn environment() -> Environment {
		Environment::with_prefix(Self::ENV_PREFIX)
			.prefix_separator("__")
			.separator("__")
			.try_parsing(true)
	}

	fn load_with(path: Option<&Path>, environment: Environment) -> Result<Self, SettingsError> {
		let mut builder = Config::builder();
		if let Some(path) = path {
			debug!("loading settings from {}", path.display());
			builder = builder.add_source(config::File::from(path).format(FileFormat::Toml));
		}

		let settings: Self = builder.add_source(environment).build()?.try_deserialize()?;
		settings.validate()?;
		debug!("settings: {settings:?}");
		Ok(settings)
	}

	/// Checks value ranges.
	pub fn validate(&self) -> Result<(), SettingsError> {
		let animation = &self.animation;
		if !(animation.target_fps.is_finite() && animation.target_fps > 0.0) {
			return Err(SettingsError::Invalid {
				key: "animation.target_fps",
				message: format!("must be a positive number, got {}", animation.target_fps),
			});
		}
		if !(animation.time_scale.is_finite() && animation.time_scale >= 0.0) {
			return Err(SettingsError::Invalid {
				key: "animation.time_scale",
				message: format!("must not be negative, got {}", animation.time_scale),
			});
		}
		if !(animation.direction_epsilon.is_finite() && animation.direction_epsilon >= 0.0) {
			return Err(SettingsError::Invalid {
				key: "animation.direction_epsilon",
				message: format!("must not be negative, got {}", animation.direction_epsilon),
			});
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn env(vars: &[(&str, &str)]) -> Environment {
		Settings::environment()
			.source(Some(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()))
	}

	#[test]
	fn test_defaults() {
		let settings = Settings::load_with(None, env(&[])).unwrap();
		assert_eq!(settings, Settings::default());
		assert_eq!(settings.asset_root, PathBuf::from("assets"));
		assert_eq!(settings.default_palette, 2);
		assert_eq!(settings.animation.target_fps, 60.0);
		assert_eq!(settings.animation.time_scale, 1.0);
		assert_eq!(settings.animation.direction_epsilon, 0.1);
		assert!(!settings.animation.apply_center_offset);
	}

	#[test]
	fn test_partial_toml() {
		let settings = Settings::from_toml_str(
			r#"
			asset_root = "/srv/game"

			[animation]
			time_scale = 2.0
			"#,
		)
		.unwrap();
		assert_eq!(settings.asset_root, PathBuf::from("/srv/game"));
		assert_eq!(settings.default_palette, 2);
		assert_eq!(settings.animation.time_scale, 2.0);
		assert_eq!(settings.animation.target_fps, 60.0);
	}

	#[test_log::test]
	fn test_file_then_environment() {
		let path = std::env::temp_dir().join(format!("isoart_settings_{}.toml", std::process::id()));
		std::fs::write(&path, "default_palette = 0\n[animation]\ntarget_fps = 30\n").unwrap();

		let settings = Settings::load_with(
			Some(&path),
			env(&[("ISOART__ANIMATION__TARGET_FPS", "24"), ("ISOART__ANIMATION__APPLY_CENTER_OFFSET", "true")]),
		)
		.unwrap();
		std::fs::remove_file(&path).unwrap();

		assert_eq!(settings.default_palette, 0);
		assert_eq!(settings.animation.target_fps, 24.0);
		assert!(settings.animation.apply_center_offset);
	}

	#[test]
	fn test_missing_file() {
		let path = Path::new("/nonexistent/isoart.toml");
		assert!(matches!(Settings::load_with(Some(path), env(&[])), Err(SettingsError::Config(_))));
	}

	#[test]
	fn test_validation() {
		let invalid = [
			("[animation]\ntarget_fps = 0", "animation.target_fps"),
			("[animation]\ntime_scale = -1.0", "animation.time_scale"),
			("[animation]\ndirection_epsilon = -0.5", "animation.direction_epsilon"),
		];
		for (toml, expected) in invalid {
			match Settings::from_toml_str(toml) {
				Err(SettingsError::Invalid {
					key,
					..
				}) => assert_eq!(key, expected),
				other => panic!("{toml}: unexpected result {other:?}"),
			}
		}

		let paused = Settings::from_toml_str("[animation]\ntime_scale = 0.0").unwrap();
		assert_eq!(paused.animation.time_scale, 0.0);
	}
}

//! Resource bundle for `isoart-rs`: maps logical asset names to files under an
//! asset root.
//!
//! Assets are addressed by a `(name, kind)` pair, where `kind` is the file
//! extension, e.g. `("hmfc2xab", "art")` resolves to `<root>/hmfc2xab.art`.
//!
//! # Examples
//!
//! ```no_run
//! use std::io::Read;
//!
//! use isoart_vfs::ResourceBundle;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bundle = ResourceBundle::new("assets");
//! let mut reader = bundle.open("hmfc2xab", "art")?;
//!
//! let mut header = [0u8; 132];
//! reader.read_exact(&mut header)?;
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

/// Errors raised while locating or opening assets
#[derive(Debug, Error)]
pub enum VfsError {
	/// No file exists at the resolved path
	#[error("asset not found: {}", path.display())]
	NotFound {
		/// Path that was looked up
		path: PathBuf,
	},

	/// The file exists but could not be opened
	#[error("failed to open {}: {source}", path.display())]
	IOError {
		/// Path that was opened
		path: PathBuf,
		/// Underlying error
		#[source]
		source: io::Error,
	},
}

/// Resolves logical asset names against a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBundle {
	root: PathBuf,
}

impl ResourceBundle {
	/// Creates a bundle rooted at `root`.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
		}
	}

	/// The asset root.
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Path of asset `name` with extension `kind`.
	///
	/// Resolution is purely lexical; the file need not exist.
	pub fn absolute_path(&self, name: &str, kind: &str) -> PathBuf {
		if kind.is_empty() {
			self.root.join(name)
		} else {
			self.root.join(format!("{name}.{kind}"))
		}
	}

	/// True if the asset resolves to an existing file.
	pub fn contains(&self, name: &str, kind: &str) -> bool {
		self.absolute_path(name, kind).is_file()
	}

	/// Opens an asset for buffered sequential reading.
	///
	/// # Errors
	///
	/// Returns [`VfsError::NotFound`] if nothing exists at the resolved path
	/// and [`VfsError::IOError`] for any other failure to open it.
	pub fn open(&self, name: &str, kind: &str) -> Result<BufReader<File>, VfsError> {
		let path = self.absolute_path(name, kind);
		debug!("opening asset {}", path.display());

		match File::open(&path) {
			Ok(file) => Ok(BufReader::new(file)),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Err(VfsError::NotFound {
				path,
			}),
			Err(source) => Err(VfsError::IOError {
				path,
				source,
			}),
		}
	}

	/// Names of all assets of one kind directly under the root, sorted.
	///
	/// # Errors
	///
	/// Returns [`VfsError::NotFound`] if the root does not exist.
	pub fn list(&self, kind: &str) -> Result<Vec<String>, VfsError> {
		let entries = std::fs::read_dir(&self.root).map_err(|e| match e.kind() {
			io::ErrorKind::NotFound => VfsError::NotFound {
				path: self.root.clone(),
			},
			_ => VfsError::IOError {
				path: self.root.clone(),
				source: e,
			},
		})?;

		let mut names = Vec::new();
		for entry in entries {
			let path = entry
				.map_err(|source| VfsError::IOError {
					path: self.root.clone(),
					source,
				})?
				.path();
			let matches_kind = path
				.extension()
				.and_then(|ext| ext.to_str())
				.is_some_and(|ext| ext.eq_ignore_ascii_case(kind));
			if !matches_kind || !path.is_file() {
				continue;
			}
			if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
				names.push(stem.to_owned());
			}
		}
		names.sort();
		Ok(names)
	}
}

//! Loading 8-bit BMP tiles through the resource bundle

use isoart_rs::prelude::*;

use crate::common::AssetDir;

fn tile_colors() -> Vec<Color> {
	vec![Color::rgb(0, 0, 0), Color::rgb(200, 10, 10), Color::rgb(10, 200, 10)]
}

#[test_log::test]
fn load_bottom_up_tile() {
	let indices = vec![1, 1, 1, 2, 2, 2, 0, 0, 0];
	let tile = BmpFile::new(3, 3, &tile_colors(), indices.clone()).unwrap();

	let dir = AssetDir::new("tiles");
	dir.write("grass.bmp", &tile.to_bytes());

	let loader = AssetLoader::new(ResourceBundle::new(&dir.path));
	let loaded = loader.load_bmp("grass").unwrap();
	assert_eq!(loaded.indices(), indices.as_slice());

	let bgra = loaded.to_bgra();
	assert_eq!(bgra.len(), 3 * 3 * 4);
	// top row is color 1
	assert_eq!(&bgra[..4], &[10, 10, 200, 0xFF]);
	// bottom row is color 0
	assert_eq!(&bgra[24..28], &[0, 0, 0, 0xFF]);
}

#[test]
fn missing_tile_is_not_found() {
	let dir = AssetDir::new("no_tiles");
	let loader = AssetLoader::new(ResourceBundle::new(&dir.path));
	assert!(matches!(loader.load_bmp("grass"), Err(LoadError::Vfs(VfsError::NotFound { .. }))));
}

#[test]
fn non_paletted_tile_is_rejected() {
	let mut data = BmpFile::new(1, 1, &tile_colors(), vec![0]).unwrap().to_bytes();
	data[0x1C..0x1E].copy_from_slice(&24u16.to_le_bytes());

	let dir = AssetDir::new("rgb_tiles");
	dir.write("rgb.bmp", &data);

	let loader = AssetLoader::new(ResourceBundle::new(&dir.path));
	assert!(matches!(
		loader.load_bmp("rgb"),
		Err(LoadError::File {
			source: IsoFileError::UnsupportedBitDepth(24),
			..
		})
	));
}

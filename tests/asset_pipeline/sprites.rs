//! Decoding ART files from disk and resolving them to BGRA

use std::sync::Arc;

use isoart_rs::prelude::*;

use crate::common::{AssetDir, art_bytes, frame_pixels, palette};

#[test_log::test]
fn decode_animated_sprite_from_bundle() {
	let dir = AssetDir::new("animated");
	dir.write("hero_b.art", &art_bytes(true, 3, 10, 2));

	let mut loader = AssetLoader::new(ResourceBundle::new(&dir.path));
	let art = loader.load_art("hero_b").unwrap();

	assert!(art.is_animated());
	assert_eq!(art.key_frame(), 3);
	assert_eq!(art.frame_num(), 80);
	assert_eq!(art.frames_per_direction(), 10);
	assert_eq!(art.palettes().len(), 2);

	for (i, frame) in art.iter().enumerate() {
		assert_eq!(frame.pixels(), frame_pixels(i as u32).as_slice());
		assert_eq!(frame.anchor(), (2, 3 + i as i32));
	}
}

#[test]
fn decode_static_sprite() {
	let art = ArtFile::from_bytes(&art_bytes(false, 0, 10, 1)).unwrap();
	assert!(!art.is_animated());
	assert_eq!(art.frame_num(), 10);
	assert_eq!(art.frames_per_direction(), 10);
}

#[test]
fn resolve_through_each_palette() {
	let art = ArtFile::from_bytes(&art_bytes(false, 0, 3, 3)).unwrap();

	for palette_index in 0..3u8 {
		let expected_palette = palette(palette_index);
		let bgra = art.resolve_frame(2, palette_index as usize).unwrap();
		assert_eq!(bgra.len(), 4 * 4 * 3);

		for (px, &index) in bgra.chunks_exact(4).zip(frame_pixels(2).iter()) {
			let c = expected_palette.get(index);
			assert_eq!(px, [c.b, c.g, c.r, 0xFF]);
		}
	}

	assert!(matches!(
		art.resolve_frame(0, 3),
		Err(IsoFileError::IndexOutOfRange {
			what: "palette",
			..
		})
	));
}

#[test]
fn truncated_file_is_rejected() {
	let data = art_bytes(true, 0, 2, 1);
	for cut in [10, 132, 132 + 1024 + 5, data.len() - 1] {
		assert!(
			matches!(ArtFile::from_bytes(&data[..cut]), Err(IsoFileError::InsufficientData { .. })),
			"cut at {cut}"
		);
	}
}

#[test]
fn upload_builds_contiguous_textures() {
	let art = ArtFile::from_bytes(&art_bytes(true, 0, 2, 3)).unwrap();
	let mut atlas = TextureAtlas::new();
	atlas.create_texture("floor", 1, 1, &[0, 0, 0, 0xFF]);

	let start = upload_sprite("hero_b", &art, 2, &mut atlas).unwrap();
	assert_eq!(start, 1);
	assert_eq!(atlas.len(), 17);
	for (i, frame) in art.iter().enumerate() {
		let texture = atlas.get(start + i as u32).unwrap();
		assert_eq!((texture.width, texture.height), (frame.width(), frame.height()));
		assert_eq!(texture.bgra, art.resolve_frame(i, 2).unwrap());
	}
}

#[test]
fn sprites_are_shared_between_entities() {
	let dir = AssetDir::new("shared");
	dir.write("mana.art", &art_bytes(true, 0, 1, 3));
	dir.write("manb.art", &art_bytes(true, 0, 2, 3));

	let settings = Settings {
		asset_root: dir.path.clone(),
		..Settings::default()
	};
	let mut loader = AssetLoader::from_settings(&settings);
	let mut atlas = TextureAtlas::new();

	let first = loader.load_sprite_instance(&["mana", "manb"], &settings, &mut atlas).unwrap();
	let second = loader.load_sprite_instance(&["manb"], &settings, &mut atlas).unwrap();

	let walk_a = first.track(AnimationKind::Walking).unwrap();
	let walk_b = second.track(AnimationKind::Walking).unwrap();
	assert!(Arc::ptr_eq(walk_a.sprite(), walk_b.sprite()));
	assert!(second.track(AnimationKind::Standing).is_none());

	// 8 standing and 16 walking frames, uploaded once
	assert_eq!(atlas.len(), 24);
	assert_eq!(walk_a.texture_start(), 8);
	assert_eq!(walk_b.texture_start(), 8);
}

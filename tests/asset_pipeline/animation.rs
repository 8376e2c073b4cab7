//! Driving entities through the animation state machine

use isoart_rs::prelude::*;

use crate::common::art_bytes;

fn settings(toml: &str) -> Settings {
	Settings::from_toml_str(toml).unwrap()
}

#[test]
fn walk_cycle_wraps_within_direction() {
	// key frame 9: each frame shows for 10 ticks at 60 FPS
	let art = ArtFile::from_bytes(&art_bytes(true, 9, 4, 1)).unwrap();
	let settings = settings("");
	let mut cursor = AnimationCursor::new();

	let selection = cursor.tick(&art, 12, Direction::East, 0.9, &settings.animation).unwrap();
	assert_eq!(cursor.group_start(), 20);
	assert_eq!(selection.texture_index, 21);
	assert_eq!(selection.frame_index, 9);
}

#[test]
fn velocity_selects_direction_group() {
	let art = ArtFile::from_bytes(&art_bytes(true, 0, 3, 1)).unwrap();
	let settings = settings("");
	let classifier = settings.animation.classifier();

	let cases = [
		((0.05, 0.5), Direction::North),
		((0.5, 0.05), Direction::East),
		((0.5, 0.5), Direction::NorthEast),
		((0.05, -0.5), Direction::South),
		((-0.5, -0.5), Direction::SouthWest),
	];
	for ((x, y), expected) in cases {
		let direction = classifier.classify(x, y);
		assert_eq!(direction, expected, "velocity ({x}, {y})");

		let mut cursor = AnimationCursor::new();
		let selection = cursor.tick(&art, 0, direction, 0.0, &settings.animation).unwrap();
		assert_eq!(selection.frame_index as u32, expected.index() * 3);
	}
}

#[test]
fn configured_epsilon_widens_dead_zone() {
	let settings = settings("[animation]\ndirection_epsilon = 0.6");
	assert_eq!(settings.animation.classifier().classify(0.5, 0.5), Direction::North);
	assert_eq!(settings.animation.classifier().classify(0.5, -0.5), Direction::South);
}

#[test]
fn center_offset_follows_settings() {
	let art = ArtFile::from_bytes(&art_bytes(false, 0, 1, 1)).unwrap();

	let plain = settings("");
	let mut cursor = AnimationCursor::new();
	assert_eq!(cursor.tick(&art, 0, Direction::North, 0.0, &plain.animation).unwrap().center, (2, 3));

	let shifted = settings("[animation]\napply_center_offset = true");
	let mut cursor = AnimationCursor::new();
	assert_eq!(cursor.tick(&art, 0, Direction::North, 0.0, &shifted.animation).unwrap().center, (1, 4));
}

#[test_log::test]
fn entity_walks_then_stands() {
	let standing = std::sync::Arc::new(ArtFile::from_bytes(&art_bytes(true, 0, 2, 1)).unwrap());
	let walking = std::sync::Arc::new(ArtFile::from_bytes(&art_bytes(true, 0, 4, 1)).unwrap());
	let settings = settings("");

	let mut hero = SpriteInstance::new();
	hero.set_track(AnimationKind::Standing, AnimationTrack::new(standing, 0));
	hero.set_track(AnimationKind::Walking, AnimationTrack::new(walking, 16));

	let walk = hero.update((-0.7, 0.0), 1.5 / 60.0, &settings.animation).unwrap().unwrap();
	assert_eq!(hero.facing(), Direction::West);
	assert_eq!(walk.texture_index, 16 + 6 * 4 + 1);

	let stand = hero.update((0.0, 0.0), 0.0, &settings.animation).unwrap().unwrap();
	assert_eq!(stand.texture_index, 6 * 2);
	assert_eq!(hero.selection(), Some(&stand));
}

#[test]
fn empty_sprite_cannot_animate() {
	let art = ArtFile::from_bytes(&art_bytes(true, 0, 0, 0)).unwrap();
	let mut cursor = AnimationCursor::new();
	assert_eq!(
		cursor.tick(&art, 0, Direction::North, 0.1, &AnimationSettings::default()),
		Err(AnimationError::NoFrames)
	);
}

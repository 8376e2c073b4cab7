//! Benchmark helper utilities for isoart-rs
//!
//! This module generates synthetic ART sprites for the benchmark suite. Frames
//! look like typical character sprites: a transparent border (palette index 0)
//! around a body of short color runs with some per-pixel noise, which mixes
//! literal and repeat runs in the compressed payload.

use isoart_types::file::art::{FrameHeader, Header};
use isoart_types::file::palette::{Color, Palette};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Longest run a single RLE control byte can describe
const MAX_RUN: usize = 0x7F;

/// Run-length encodes palette indices in the ART frame format.
///
/// Runs of three or more equal bytes become repeat runs; everything else is
/// grouped into literal runs.
pub fn encode_rle(pixels: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(pixels.len() / 2);
	let mut literal_start = 0;
	let mut pos = 0;

	let flush_literal = |out: &mut Vec<u8>, literal: &[u8]| {
		for chunk in literal.chunks(MAX_RUN) {
			out.push(0x80 | chunk.len() as u8);
			out.extend_from_slice(chunk);
		}
	};

	while pos < pixels.len() {
		let value = pixels[pos];
		let run = pixels[pos..].iter().take(MAX_RUN).take_while(|&&p| p == value).count();
		if run >= 3 {
			flush_literal(&mut out, &pixels[literal_start..pos]);
			out.push(run as u8);
			out.push(value);
			pos += run;
			literal_start = pos;
		} else {
			pos += run;
		}
	}
	flush_literal(&mut out, &pixels[literal_start..]);
	out
}

/// Generates one sprite-like frame of palette indices.
pub fn generate_frame_pixels(width: u32, height: u32, rng: &mut SmallRng) -> Vec<u8> {
	let (width, height) = (width as usize, height as usize);
	let mut pixels = vec![0u8; width * height];
	let (margin_x, margin_y) = (width / 6, height / 8);

	for y in margin_y..height.saturating_sub(margin_y) {
		let row = &mut pixels[y * width..(y + 1) * width];
		let mut x = margin_x;
		while x < width.saturating_sub(margin_x) {
			let len = rng.random_range(1..12).min(width - margin_x - x);
			let color = rng.random_range(1..=255u8);
			row[x..x + len].fill(color);
			x += len;
		}
	}
	pixels
}

/// Generates a palette with a distinct color per index.
pub fn generate_palette(seed: u8) -> Palette {
	let mut palette = Palette::new();
	for i in 0..=255u8 {
		palette.set(i, Color::new(i, i.wrapping_mul(3), seed ^ i, 0));
	}
	palette
}

/// Generates a complete ART file.
///
/// `frame_count` is per direction when `animated` is set, as in the file header.
pub fn generate_test_art_data(
	animated: bool,
	frame_count: u32,
	(width, height): (u32, u32),
	palettes: usize,
) -> Vec<u8> {
	let mut rng = SmallRng::seed_from_u64(0x1507_A127);
	let header = Header::new(animated, 3, frame_count, palettes);
	let total = header.total_frames().unwrap_or(0);

	let payloads: Vec<Vec<u8>> =
		(0..total).map(|_| encode_rle(&generate_frame_pixels(width, height, &mut rng))).collect();

	let mut data = header.to_bytes().to_vec();
	for p in 0..palettes {
		data.extend_from_slice(&generate_palette(p as u8).to_bytes());
	}
	for payload in &payloads {
		let frame_header = FrameHeader {
			width,
			height,
			size: payload.len() as u32,
			cx: width as i32 / 2,
			cy: height as i32 - 4,
			dx: 0,
			dy: 0,
		};
		data.extend_from_slice(&frame_header.to_bytes());
	}
	for payload in &payloads {
		data.extend_from_slice(payload);
	}
	data
}

/// Common benchmark sizes for synthetic frames
pub mod sizes {
	/// Small prop: 32x32 (1,024 pixels)
	pub const TINY: (u32, u32) = (32, 32);
	/// Character frame: 64x96 (6,144 pixels)
	pub const CHARACTER: (u32, u32) = (64, 96);
	/// Large creature: 160x160 (25,600 pixels)
	pub const LARGE: (u32, u32) = (160, 160);
	/// Full-screen effect: 640x480 (307,200 pixels)
	pub const SCREEN: (u32, u32) = (640, 480);
}

#[cfg(test)]
mod tests {
	use super::*;
	use isoart_types::file::art::{File, rle};

	#[test]
	fn test_encode_rle_decodes_back() {
		let mut rng = SmallRng::seed_from_u64(7);
		let pixels = generate_frame_pixels(64, 96, &mut rng);
		let encoded = encode_rle(&pixels);
		assert!(encoded.len() < pixels.len());
		assert_eq!(rle::decode_runs(&encoded, pixels.len()).unwrap(), pixels);
	}

	#[test]
	fn test_encode_long_runs() {
		let pixels = vec![5u8; 300];
		assert_eq!(encode_rle(&pixels), [0x7F, 5, 0x7F, 5, 0x2E, 5]);
		assert_eq!(encode_rle(&[1, 2]), [0x82, 1, 2]);
	}

	#[test]
	fn test_generate_test_art_data() {
		let data = generate_test_art_data(true, 2, sizes::TINY, 4);
		let art = File::from_bytes(&data).unwrap();
		assert_eq!(art.frame_num(), 16);
		assert_eq!(art.palettes().len(), 4);
		assert_eq!(art.frame(0).unwrap().width(), 32);
	}
}

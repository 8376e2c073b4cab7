//! Synthetic assets shared by the pipeline tests

use std::path::PathBuf;

use isoart_rs::isoart_types::file::art::{FrameHeader, Header};
use isoart_rs::prelude::{Color, Palette};

/// Scratch directory under the system temp dir, removed on drop.
pub struct AssetDir {
	pub path: PathBuf,
}

impl AssetDir {
	pub fn new(name: &str) -> Self {
		let path = std::env::temp_dir().join(format!("isoart_it_{}_{name}", std::process::id()));
		let _ = std::fs::remove_dir_all(&path);
		std::fs::create_dir_all(&path).unwrap();
		Self {
			path,
		}
	}

	pub fn write(&self, file_name: &str, data: &[u8]) {
		std::fs::write(self.path.join(file_name), data).unwrap();
	}
}

impl Drop for AssetDir {
	fn drop(&mut self) {
		let _ = std::fs::remove_dir_all(&self.path);
	}
}

/// Palette `p` maps index `i` to `rgb(i, p, 0x80)` with a zero stored alpha.
pub fn palette(p: u8) -> Palette {
	let mut palette = Palette::new();
	for i in 0..=255u8 {
		palette.set(i, Color::new(i, p, 0x80, 0));
	}
	palette
}

/// Frame `i` of a synthetic sprite: `4 × 3` pixels, the first row a literal
/// run `[i, i+1, i+2, i+3]`, the rest a repeat run of `i`.
pub fn frame_pixels(i: u32) -> Vec<u8> {
	let i = i as u8;
	let mut pixels = vec![i, i.wrapping_add(1), i.wrapping_add(2), i.wrapping_add(3)];
	pixels.resize(12, i);
	pixels
}

fn frame_payload(i: u32) -> Vec<u8> {
	let pixels = frame_pixels(i);
	let mut payload = vec![0x84];
	payload.extend_from_slice(&pixels[..4]);
	payload.extend_from_slice(&[0x08, pixels[4]]);
	payload
}

/// Builds an ART file with `frame_count` frames (per direction when
/// `animated`), every frame RLE-compressed as described by [`frame_pixels`].
pub fn art_bytes(animated: bool, key_frame: u32, frame_count: u32, palettes: u8) -> Vec<u8> {
	let header = Header::new(animated, key_frame, frame_count, palettes as usize);
	let total = header.total_frames().unwrap();

	let mut data = header.to_bytes().to_vec();
	for p in 0..palettes {
		data.extend_from_slice(&palette(p).to_bytes());
	}

	let payloads: Vec<Vec<u8>> = (0..total).map(frame_payload).collect();
	for (i, payload) in payloads.iter().enumerate() {
		let frame_header = FrameHeader {
			width: 4,
			height: 3,
			size: payload.len() as u32,
			cx: 2,
			cy: 3 + i as i32,
			dx: -1,
			dy: 1,
		};
		data.extend_from_slice(&frame_header.to_bytes());
	}
	for payload in &payloads {
		data.extend_from_slice(payload);
	}
	data
}

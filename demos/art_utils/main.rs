//! ART (Sprite) CLI Utility
//!
//! A command-line tool for inspecting, extracting and validating `.ART` sprite files.
//!
//! # Features
//!
//! - **info**: Display header, palette and frame information (also accepts `.BMP` files)
//! - **extract-frame**: Extract a single frame to a PNG image
//! - **unpack**: Extract every frame to PNG images with JSON metadata
//! - **verify**: Decode every `.ART` file under a directory
//! - **animate**: Simulate the animation state machine and print the selected frames
//!
//! # Metadata Format
//!
//! ```json
//! {
//!   "source": "hmfc2xab.art",
//!   "animated": true,
//!   "key_frame": 3,
//!   "frames_per_direction": 10,
//!   "palette": 2,
//!   "frames": [
//!     { "index": 0, "direction": "N", "width": 48, "height": 96, "cx": 24, "cy": 90, "dx": 0, "dy": 0, "filename": "frame_000.png" }
//!   ]
//! }
//! ```
//!
//! # Usage
//!
//! ```bash
//! cargo run --example art_utils -- info assets/hmfc2xab.art
//! cargo run --example art_utils -- extract-frame assets/hmfc2xab.art 12 -p 2
//! cargo run --example art_utils -- unpack assets/hmfc2xab.art -o frames/
//! cargo run --example art_utils -- verify -d assets --recursive
//! cargo run --example art_utils -- animate assets/hmfc2xab.art --vx 0.5 --vy 0.5 --ticks 30
//! ```

use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::RgbaImage;
use isoart_rs::prelude::*;
use log::{debug, info, warn};
use serde::Serialize;
use walkdir::WalkDir;

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::Info(args) => run_info(args),
		Command::ExtractFrame(args) => run_extract_frame(args),
		Command::Unpack(args) => run_unpack(args),
		Command::Verify(args) => run_verify(args),
		Command::Animate(args) => run_animate(args),
	}
}

#[derive(Parser)]
#[command(name = "art_utils")]
#[command(author = "isoart-rs project")]
#[command(version)]
#[command(about = "ART sprite utility - inspect, extract, verify and animate ART files", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Display information about an ART or BMP file
	Info(InfoArgs),
	/// Extract a single frame to a PNG image
	ExtractFrame(ExtractFrameArgs),
	/// Extract every frame to PNG images plus a metadata.json
	Unpack(UnpackArgs),
	/// Decode every .ART file under a directory
	Verify(VerifyArgs),
	/// Simulate animation ticks and print the selected frames
	Animate(AnimateArgs),
}

#[derive(Args)]
struct InfoArgs {
	/// Path to an .ART or .BMP file
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// List every frame
	#[arg(short, long, default_value_t = false)]
	frames: bool,
}

#[derive(Args)]
struct ExtractFrameArgs {
	/// Input ART file path
	#[arg(value_name = "INPUT_ART")]
	input: PathBuf,

	/// Frame index
	#[arg(value_name = "INDEX")]
	index: usize,

	/// Palette index
	#[arg(short, long, value_name = "PALETTE", default_value_t = 0)]
	palette: usize,

	/// Output PNG path (optional, defaults to `<input>_frame_<index>.png`)
	#[arg(short, long, value_name = "OUTPUT_PNG")]
	output: Option<PathBuf>,
}

#[derive(Args)]
struct UnpackArgs {
	/// Input ART file path
	#[arg(value_name = "INPUT_ART")]
	input: PathBuf,

	/// Output directory path (optional, defaults to `<input>_frames/`)
	#[arg(short, long, value_name = "OUTPUT_DIR")]
	output: Option<PathBuf>,

	/// Palette index
	#[arg(short, long, value_name = "PALETTE", default_value_t = 0)]
	palette: usize,
}

#[derive(Args)]
struct VerifyArgs {
	/// Directory containing .ART files
	#[arg(short = 'd', long, value_name = "DIR", default_value = "assets")]
	root: PathBuf,

	/// Recurse into sub-directories while scanning
	#[arg(short, long, default_value_t = false)]
	recursive: bool,

	/// Also resolve every frame through every palette
	#[arg(long, default_value_t = false)]
	resolve: bool,
}

#[derive(Args)]
struct AnimateArgs {
	/// Input ART file path
	#[arg(value_name = "INPUT_ART")]
	input: PathBuf,

	/// Horizontal velocity in normalized device coordinates
	#[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
	vx: f32,

	/// Vertical velocity in normalized device coordinates (up is positive)
	#[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
	vy: f32,

	/// Number of ticks to simulate
	#[arg(short, long, default_value_t = 60)]
	ticks: u32,

	/// Seconds per tick
	#[arg(long, default_value_t = 1.0 / 60.0)]
	dt: f32,

	/// Texture index of the sprite's first frame
	#[arg(long, default_value_t = 0)]
	texture_start: u32,

	/// Settings file (TOML)
	#[arg(short, long, value_name = "CONFIG", env = "ISOART_CONFIG")]
	config: Option<PathBuf>,
}

#[derive(Serialize)]
struct ArtMetadata {
	source: String,
	animated: bool,
	key_frame: u32,
	frame_count: u32,
	frames_per_direction: u32,
	palette: usize,
	palette_count: usize,
	reserved: Vec<String>,
	frames: Vec<FrameMetadata>,
}

#[derive(Serialize)]
struct FrameMetadata {
	index: usize,
	direction: Option<String>,
	width: u32,
	height: u32,
	cx: i32,
	cy: i32,
	dx: i32,
	dy: i32,
	filename: String,
}

fn open_art(path: &Path) -> Result<ArtFile> {
	ArtFile::open(path).with_context(|| format!("Failed to decode {}", path.display()))
}

/// Direction group a frame belongs to, for animated sprites.
fn frame_direction(art: &ArtFile, index: usize) -> Option<Direction> {
	if !art.is_animated() || art.frames_per_direction() == 0 {
		return None;
	}
	Direction::from_index(index as u32 / art.frames_per_direction())
}

fn bgra_to_image(width: u32, height: u32, mut bgra: Vec<u8>) -> Result<RgbaImage> {
	for px in bgra.chunks_exact_mut(4) {
		px.swap(0, 2);
	}
	RgbaImage::from_raw(width, height, bgra).context("Pixel buffer does not match frame size")
}

fn save_frame(art: &ArtFile, index: usize, palette: usize, path: &Path) -> Result<()> {
	let frame = art.frame(index).with_context(|| format!("Frame {index} does not exist"))?;
	let bgra = art.resolve_frame(index, palette)?;
	if frame.width() == 0 || frame.height() == 0 {
		warn!("Frame {index} is empty, skipping {}", path.display());
		return Ok(());
	}
	bgra_to_image(frame.width(), frame.height(), bgra)?
		.save(path)
		.with_context(|| format!("Failed to write {}", path.display()))
}

fn default_output(input: &Path, suffix: &str) -> PathBuf {
	let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("sprite");
	input.with_file_name(format!("{stem}{suffix}"))
}

fn is_bmp(path: &Path) -> bool {
	path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("bmp"))
}

fn run_info(args: InfoArgs) -> Result<()> {
	if is_bmp(&args.file) {
		let bmp = BmpFile::open(&args.file)
			.with_context(|| format!("Failed to decode {}", args.file.display()))?;
		println!("{}", bmp.header());
		return Ok(());
	}

	let art = open_art(&args.file)?;
	let header = art.header();
	println!("{header}");
	println!(
		"- Reserved (hex): {}",
		header.reserved().iter().map(|w| hex::encode(w.to_le_bytes())).collect::<Vec<_>>().join(" ")
	);
	println!("- Frames decoded: {} ({} per direction)", art.frame_num(), art.frames_per_direction());
	for (i, palette) in art.palettes().iter().enumerate() {
		println!("- Palette {i}: {palette}");
	}

	if args.frames {
		println!("\nFrames:");
		for (i, frame) in art.iter().enumerate() {
			match frame_direction(&art, i) {
				Some(direction) => println!("  [{i:4}] {direction:>2} {frame}"),
				None => println!("  [{i:4}]    {frame}"),
			}
		}
	}
	Ok(())
}

fn run_extract_frame(args: ExtractFrameArgs) -> Result<()> {
	let art = open_art(&args.input)?;
	let output = args
		.output
		.unwrap_or_else(|| default_output(&args.input, &format!("_frame_{:03}.png", args.index)));

	save_frame(&art, args.index, args.palette, &output)?;
	info!("Frame {} written to {}", args.index, output.display());
	Ok(())
}

fn run_unpack(args: UnpackArgs) -> Result<()> {
	let art = open_art(&args.input)?;
	if args.palette >= art.palettes().len() {
		bail!("Palette {} does not exist ({} palettes)", args.palette, art.palettes().len());
	}

	let output = args.output.unwrap_or_else(|| default_output(&args.input, "_frames"));
	fs::create_dir_all(&output)
		.with_context(|| format!("Failed to create {}", output.display()))?;

	let mut frames = Vec::with_capacity(art.frames().len());
	for (index, frame) in art.iter().enumerate() {
		let filename = format!("frame_{index:03}.png");
		save_frame(&art, index, args.palette, &output.join(&filename))?;
		debug!("Wrote {filename}");

		let (cx, cy) = frame.anchor();
		let (dx, dy) = frame.offset();
		frames.push(FrameMetadata {
			index,
			direction: frame_direction(&art, index).map(|d| d.to_string()),
			width: frame.width(),
			height: frame.height(),
			cx,
			cy,
			dx,
			dy,
			filename,
		});
	}

	let metadata = ArtMetadata {
		source: args.input.display().to_string(),
		animated: art.is_animated(),
		key_frame: art.key_frame(),
		frame_count: art.frame_num(),
		frames_per_direction: art.frames_per_direction(),
		palette: args.palette,
		palette_count: art.palettes().len(),
		reserved: art.header().reserved().iter().map(|w| hex::encode(w.to_le_bytes())).collect(),
		frames,
	};
	let json = serde_json::to_string_pretty(&metadata)?;
	fs::write(output.join("metadata.json"), json)?;

	info!("Unpacked {} frames to {}", art.frame_num(), output.display());
	Ok(())
}

fn collect_art_files(root: &Path, recursive: bool) -> Vec<PathBuf> {
	let max_depth = if recursive {
		usize::MAX
	} else {
		1
	};
	let mut files = Vec::new();

	for entry in WalkDir::new(root).max_depth(max_depth).follow_links(false) {
		let entry = match entry {
			Ok(entry) => entry,
			Err(err) => {
				warn!("{err}");
				continue;
			}
		};

		let is_art = entry
			.path()
			.extension()
			.and_then(|e| e.to_str())
			.is_some_and(|e| e.eq_ignore_ascii_case("art"));
		if entry.file_type().is_file() && is_art {
			files.push(entry.into_path());
		}
	}

	files.sort();
	files
}

fn verify_file(path: &Path, resolve: bool) -> Result<ArtFile> {
	let art = open_art(path)?;
	if resolve {
		for frame_index in 0..art.frames().len() {
			for palette_index in 0..art.palettes().len() {
				art.resolve_frame(frame_index, palette_index)?;
			}
		}
	}
	Ok(art)
}

fn run_verify(args: VerifyArgs) -> Result<()> {
	if !args.root.is_dir() {
		bail!("{} is not a directory", args.root.display());
	}

	let files = collect_art_files(&args.root, args.recursive);
	if files.is_empty() {
		println!("No .ART files found under {}", args.root.display());
		return Ok(());
	}

	let mut failed = 0usize;
	for path in &files {
		match verify_file(path, args.resolve) {
			Ok(art) => println!("✓ {}: {art}", path.display()),
			Err(err) => {
				failed += 1;
				println!("✗ {}: {err:#}", path.display());
			}
		}
	}

	println!("\n{} files checked, {} failed", files.len(), failed);
	if failed > 0 {
		bail!("{failed} of {} files failed to decode", files.len());
	}
	Ok(())
}

fn run_animate(args: AnimateArgs) -> Result<()> {
	let settings = Settings::load(args.config.as_deref())?;
	let art = open_art(&args.input)?;

	let direction = settings.animation.classifier().classify(args.vx, args.vy);
	println!(
		"Velocity ({}, {}) faces {direction}; frame lifetime {:.4}s",
		args.vx,
		args.vy,
		settings.animation.frame_lifetime(art.key_frame())
	);

	let mut cursor = AnimationCursor::new();
	for tick in 0..args.ticks {
		let selection = cursor.tick(&art, args.texture_start, direction, args.dt, &settings.animation)?;
		println!(
			"tick {tick:4}: texture {:5} frame {:4} {}x{} center ({}, {})",
			selection.texture_index,
			selection.frame_index,
			selection.width,
			selection.height,
			selection.center.0,
			selection.center.1
		);
	}
	Ok(())
}

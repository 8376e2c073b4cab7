//! Run-length decoding of ART frame payloads.
//!
//! Each frame payload is either stored raw or as a sequence of runs introduced
//! by a control byte:
//!
//! | Control byte | Meaning                                              |
//! |--------------|------------------------------------------------------|
//! | `1nnnnnnn`   | Literal run: copy the next `n` bytes verbatim        |
//! | `0nnnnnnn`   | Repeat run: emit the single next byte `n` times      |
//!
//! A payload at least as long as the frame's pixel count is stored raw.
//!
//! Decoding stops at whichever comes first: the end of the payload or the
//! frame being full. A run that would write past the end of the frame is cut
//! short, and control bytes left over once the frame is full are ignored.
//! Running out of payload before the frame is full is an error. A frame larger
//! than the payload could ever describe is rejected before any pixel buffer is
//! allocated.

use log::{trace, warn};

use crate::file::{FileType, IsoFileError};

use super::constants::{RLE_COUNT_MASK, RLE_LITERAL_FLAG};

/// Decodes one frame payload into exactly `pixel_count` palette indices.
///
/// # Errors
///
/// Returns [`IsoFileError::InvalidFormat`] if a run refers to bytes past the
/// end of `payload`, or if the payload is exhausted before `pixel_count`
/// pixels were produced.
///
/// # Examples
///
/// ```
/// use isoart_types::file::art::rle;
///
/// // literal run of 3, then a repeat run of 4
/// let pixels = rle::decode(&[0x83, 1, 2, 3, 0x04, 9], 7)?;
/// assert_eq!(pixels, [1, 2, 3, 9, 9, 9, 9]);
/// # Ok::<(), isoart_types::file::IsoFileError>(())
/// ```
pub fn decode(payload: &[u8], pixel_count: usize) -> Result<Vec<u8>, IsoFileError> {
	if payload.len() >= pixel_count {
		return Ok(payload[..pixel_count].to_vec());
	}
	decode_runs(payload, pixel_count)
}

/// Decodes `payload` as a run sequence regardless of its length.
///
/// This is the compressed path of [`decode`] on its own; frame decoding
/// should go through [`decode`], which also handles stored payloads.
pub fn decode_runs(payload: &[u8], pixel_count: usize) -> Result<Vec<u8>, IsoFileError> {
	// every run spends at least one payload byte on at most 127 pixels
	let reachable = payload.len().saturating_mul(usize::from(RLE_COUNT_MASK));
	if pixel_count > reachable {
		return Err(IsoFileError::invalid_format(
			FileType::Art,
			format!(
				"RLE payload of {} bytes cannot fill {} pixels",
				payload.len(),
				pixel_count
			),
		));
	}

	let mut pixels = Vec::with_capacity(pixel_count);
	let mut pos = 0;

	while pos < payload.len() && pixels.len() < pixel_count {
		let control = payload[pos];
		let run_start = pos;
		pos += 1;

		let count = usize::from(control & RLE_COUNT_MASK);
		let room = pixel_count - pixels.len();
		if count > room {
			warn!(
				"RLE run at byte {run_start} writes {count} pixels with room for {room}, truncating"
			);
		}

		if control & RLE_LITERAL_FLAG != 0 {
			let Some(run) = payload.get(pos..pos + count) else {
				return Err(truncated_run(run_start, count, payload.len() - pos));
			};
			pixels.extend_from_slice(&run[..count.min(room)]);
			pos += count;
		} else {
			let Some(&value) = payload.get(pos) else {
				return Err(truncated_run(run_start, 1, 0));
			};
			pixels.resize(pixels.len() + count.min(room), value);
			pos += 1;
		}
	}

	if pixels.len() < pixel_count {
		return Err(IsoFileError::invalid_format(
			FileType::Art,
			format!(
				"RLE payload of {} bytes produced {} of {} pixels",
				payload.len(),
				pixels.len(),
				pixel_count
			),
		));
	}

	if pos < payload.len() {
		trace!("ignoring {} trailing RLE bytes", payload.len() - pos);
	}

	Ok(pixels)
}

fn truncated_run(offset: usize, wanted: usize, available: usize) -> IsoFileError {
	IsoFileError::invalid_format(
		FileType::Art,
		format!(
			"RLE run at byte {offset} needs {wanted} data bytes, only {available} remain"
		),
	)
}

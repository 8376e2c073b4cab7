//! ART file format constants.
//!
//! Offsets and sizes of the fixed records, plus the bit layout of RLE control
//! bytes.

/// Number of reserved `u32` words at the start of the header
pub const RESERVED_WORDS: usize = 3;

/// Number of palette marker colors in the header
pub const PALETTE_SLOTS: usize = 4;

/// Number of legacy 4-byte color slots trailing the header
pub const LEGACY_COLOR_SLOTS: usize = 24;

/// Size of the file header (132 bytes)
pub const HEADER_SIZE: usize = RESERVED_WORDS * 4 + PALETTE_SLOTS * 4 + 4 + 4 + LEGACY_COLOR_SLOTS * 4;

/// Size of each frame header (3 × u32 + 4 × i32 = 28 bytes)
pub const FRAME_HEADER_SIZE: usize = 28;

/// Number of facing directions stored by animated sprites
pub const DIRECTION_COUNT: u32 = 8;

/// Bit of the first reserved word that marks a static (non-animated) sprite
pub const STATIC_FLAG: u32 = 0x1;

/// Control byte flag selecting a literal run
pub const RLE_LITERAL_FLAG: u8 = 0x80;

/// Control byte mask extracting the run length
pub const RLE_COUNT_MASK: u8 = 0x7F;

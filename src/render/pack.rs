//! # Bit Packing
//!
//! Helpers for 1-bit-per-dot rows.
//!
//! - Bit 7 (MSB) = leftmost pixel
//! - Bit 0 (LSB) = rightmost pixel
//! - 1 = black (print dot), 0 = white (no dot)
//!
//! If the row width is not a multiple of 8, the unused low bits of the last
//! byte stay zero. Rows are allocated zeroed and only [`set_dot`] writes to
//! them, so padding is never inked.
//!
//! ```
//! use escraster::render::pack::{row_bytes, set_dot};
//!
//! let mut row = vec![0u8; row_bytes(12)];
//! for x in 0..12 {
//!     set_dot(&mut row, x);
//! }
//! assert_eq!(row, vec![0xFF, 0xF0]); // 11111111 11110000
//! ```

/// Bytes needed for a row of `width` dots.
#[inline]
pub fn row_bytes(width: usize) -> usize {
    width.div_ceil(8)
}

/// Ink the dot at column `x`.
#[inline]
pub fn set_dot(row: &mut [u8], x: usize) {
    row[x / 8] |= 0x80 >> (x % 8);
}

/// Whether the dot at column `x` is inked.
#[inline]
pub fn dot(row: &[u8], x: usize) -> bool {
    row[x / 8] & (0x80 >> (x % 8)) != 0
}

//! # ESC/POS Control Bytes
//!
//! Constants and small helpers shared by the command builders in
//! [`graphics`](super::graphics) and [`layout`](super::layout).
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

/// ESC (Escape) - Command prefix byte
///
/// Used by the alignment command (`ESC a n`).
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for raster graphics (`GS v 0`), left margin (`GS L`) and print area
/// width (`GS W`).
/// - Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

/// Split a `u16` into `[low, high]` bytes.
///
/// ## Example
///
/// ```
/// use escraster::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(500), [0xF4, 0x01]);
/// assert_eq!(u16_le(72), [72, 0]);
/// ```
#[inline]
pub fn u16_le(value: u16) -> [u8; 2] {
    value.to_le_bytes()
}

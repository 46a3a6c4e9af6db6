//! # ESC/POS Raster Graphics Command
//!
//! This module implements the "print raster bit image" command (`GS v 0`)
//! used by ESC/POS-family thermal and dot-matrix printers.
//!
//! ## Coordinate System
//!
//! ```text
//! (0,0) ──────────────────────► X (horizontal, print head)
//!   │
//!   │   ████████  ← Each dot is one bit
//!   │   ████████
//!   │   ████████
//!   ▼
//!   Y (vertical, paper feed direction)
//! ```
//!
//! ## Bit Packing
//!
//! Graphics data is packed as bytes where each bit represents one dot:
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```

use super::commands::{GS, u16_le};

/// Fixed tag that opens every raster command: `GS v 0 m` with `m = 0`
/// (normal density).
pub const RASTER_PREFIX: [u8; 4] = [GS, b'v', b'0', 0];

/// Length of the full command header (tag + xL xH yL yH).
pub const RASTER_HEADER_LEN: usize = RASTER_PREFIX.len() + 4;

/// Largest row byte-width or row count a header can declare.
pub const MAX_HEADER_VALUE: usize = u16::MAX as usize;

/// # Raster Command Header (GS v 0 m xL xH yL yH)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH |
/// | Hex     | 1D 76 30 m xL xH yL yH |
/// | Decimal | 29 118 48 m xL xH yL yH |
///
/// ## Parameters
///
/// - `m`: Density mode (0 = normal)
/// - `xL, xH`: Width in bytes, little-endian
/// - `yL, yH`: Height in rows, little-endian
///
/// ## Example
///
/// ```
/// use escraster::protocol::graphics::raster_header;
///
/// let header = raster_header(72, 500);
/// assert_eq!(header, [0x1D, 0x76, 0x30, 0x00, 72, 0, 0xF4, 0x01]);
/// ```
pub fn raster_header(width_bytes: u16, rows: u16) -> [u8; RASTER_HEADER_LEN] {
    let [xl, xh] = u16_le(width_bytes);
    let [yl, yh] = u16_le(rows);
    let [g, v, zero, m] = RASTER_PREFIX;
    [g, v, zero, m, xl, xh, yl, yh]
}

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// Builds a complete raster command for one chunk of an image.
///
/// ## Data Layout
///
/// Row-by-row, each byte is 8 horizontal dots:
///
/// ```text
/// Row 0:    d[0]      d[1]       ... d[width-1]
/// Row 1:    d[width]  d[width+1] ... d[2*width-1]
/// ...
/// Row h-1:  d[(h-1)*width] ... d[h*width-1]
/// ```
///
/// ## Example
///
/// ```
/// use escraster::protocol::graphics;
///
/// let data = vec![0xAA; 2 * 3];
/// let cmd = graphics::raster(2, 3, &data);
///
/// assert_eq!(&cmd[0..4], &[0x1D, 0x76, 0x30, 0x00]);
/// assert_eq!(&cmd[4..8], &[2, 0, 3, 0]);
/// assert_eq!(&cmd[8..], &data[..]);
/// ```
pub fn raster(width_bytes: u16, rows: u16, data: &[u8]) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(RASTER_HEADER_LEN + data.len());
    raster_into(&mut cmd, width_bytes, rows, data);
    cmd
}

/// Append a raster command to an existing command stream.
pub fn raster_into(out: &mut Vec<u8>, width_bytes: u16, rows: u16, data: &[u8]) {
    debug_assert!(
        data.len() == width_bytes as usize * rows as usize,
        "Raster data length mismatch. Expected {} ({} bytes × {} rows), got {}",
        width_bytes as usize * rows as usize,
        width_bytes,
        rows,
        data.len()
    );

    out.extend_from_slice(&raster_header(width_bytes, rows));
    out.extend_from_slice(data);
}

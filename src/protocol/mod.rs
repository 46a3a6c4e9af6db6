//! # ESC/POS Protocol Implementation
//!
//! Low-level command builders for the subset of ESC/POS that frames a raster
//! image: the raster bit image command itself and the layout commands that
//! position it on the paper.
//!
//! ## Module Structure
//!
//! - [`commands`]: Control bytes and little-endian helpers
//! - [`graphics`]: Raster bit image command (`GS v 0`)
//! - [`layout`]: Alignment, left margin and print area width
//!
//! ## Usage Example
//!
//! ```
//! use escraster::protocol::{graphics, layout};
//!
//! let mut data = Vec::new();
//! data.extend(layout::align(layout::Alignment::Center));
//! data.extend(graphics::raster(1, 2, &[0xFF, 0x81]));
//! assert_eq!(data.len(), 3 + 8 + 2);
//! ```

pub mod commands;
pub mod graphics;
pub mod layout;

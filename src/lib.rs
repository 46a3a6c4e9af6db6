//! # escraster - ESC/POS Raster Image Encoder
//!
//! escraster converts decoded RGBA images into the monochrome raster bitmap
//! commands (`GS v 0`) understood by ESC/POS thermal and dot-matrix
//! printers. It provides:
//!
//! - **Tone mapping**: luminance, alpha compositing over paper, gamma
//! - **Dithering**: single-pass error diffusion, or flat thresholding
//! - **Framing**: row chunking for small receive buffers, layout prefix
//! - **Orientation**: pre-rotated output for upside-down print mechanisms
//!
//! ## Quick Start
//!
//! ```no_run
//! use escraster::{DecodedImage, EncoderConfig, PrinterConfig, encode};
//!
//! let image = DecodedImage::open("logo.png")?;
//! let config = EncoderConfig {
//!     upside_down: true,
//!     ..EncoderConfig::for_printer(&PrinterConfig::GENERIC_58MM)
//! };
//!
//! let commands = encode(&image.pixels, image.width, image.height, &config)?;
//! std::fs::write("logo.bin", commands)?;
//!
//! # Ok::<(), escraster::EncodeError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`encoder`] | Configuration and the raster image encoder |
//! | [`raster`] | Pixel buffer validation, rasterization, chunking |
//! | [`render`] | Tone mapping, dithering, bit packing |
//! | [`protocol`] | ESC/POS command builders |
//! | [`printer`] | Printer presets |
//! | [`decode`] | Image decoding into RGBA buffers |
//! | [`error`] | Error types |

pub mod decode;
pub mod encoder;
pub mod error;
pub mod printer;
pub mod protocol;
pub mod raster;
pub mod render;

// Re-exports for convenience
pub use decode::DecodedImage;
pub use encoder::{EncoderConfig, EscPosImageEncoder, RasterImageEncoder, encode};
pub use error::{EncodeError, Result};
pub use printer::PrinterConfig;

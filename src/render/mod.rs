//! # Rendering
//!
//! Per-pixel conversion from RGBA to packed 1-bit rows.
//!
//! - [`tone`]: luminance, alpha compositing and gamma
//! - [`dither`]: error diffusion and flat thresholding
//! - [`pack`]: MSB-first bit packing

pub mod dither;
pub mod pack;
pub mod tone;

//! # Tone Mapping
//!
//! Converts an RGBA sample to the 0-255 lightness value the binarizer
//! compares against the threshold.
//!
//! ## Pipeline
//!
//! ```text
//! RGB ──► luminance Y ──► darkness (255 - Y) ──► × alpha ──► lightness L
//!                                                              │
//!                                       gamma table (1/gamma) ◄┘
//! ```
//!
//! Luminance uses the Rec. 601 weights (0.299, 0.587, 0.114), evaluated in
//! thousandths so the whole compositing step is exact integer arithmetic.
//! Darkness is scaled by alpha, which composites the pixel over white paper:
//! a fully transparent pixel has no darkness whatever its RGB values.
//!
//! ## Rounding
//!
//! Both steps truncate toward zero:
//!
//! ```text
//! L = floor((255·255000 − (255000 − Y₁₀₀₀)·alpha) / 255000)
//! T = floor(255 · (L / 255)^(1/gamma))
//! ```
//!
//! With `gamma = 1.0` the table is exactly the identity.

/// Luminance weights in thousandths (R, G, B).
pub const LUMA_WEIGHTS: [u32; 3] = [299, 587, 114];

/// Full-scale luminance in thousandths (white).
const WHITE_MILLI: u32 = 255 * 1000;

/// Luminance of an RGB triple, in thousandths of a level (0..=255000).
///
/// ```
/// use escraster::render::tone::luminance_milli;
///
/// assert_eq!(luminance_milli(0, 0, 0), 0);
/// assert_eq!(luminance_milli(255, 255, 255), 255_000);
/// assert_eq!(luminance_milli(255, 0, 0), 76_245);
/// ```
#[inline]
pub fn luminance_milli(r: u8, g: u8, b: u8) -> u32 {
    let [wr, wg, wb] = LUMA_WEIGHTS;
    wr * r as u32 + wg * g as u32 + wb * b as u32
}

/// Lightness of an RGBA sample composited over white, truncated to 0..=255.
///
/// ```
/// use escraster::render::tone::composite_lightness;
///
/// assert_eq!(composite_lightness([0, 0, 0, 255]), 0);
/// assert_eq!(composite_lightness([0, 0, 0, 0]), 255);
/// assert_eq!(composite_lightness([128, 128, 128, 255]), 128);
/// ```
#[inline]
pub fn composite_lightness([r, g, b, a]: [u8; 4]) -> u8 {
    let darkness = WHITE_MILLI - luminance_milli(r, g, b);
    let lightness = (WHITE_MILLI * 255 - darkness * a as u32) / WHITE_MILLI;
    lightness as u8
}

/// Gamma response of the print mechanism, precomputed for every lightness
/// level.
#[derive(Debug, Clone)]
pub struct ToneCurve {
    table: [u8; 256],
}

impl ToneCurve {
    /// Build the table for `gamma`. Callers validate `gamma > 0` first.
    pub fn new(gamma: f64) -> Self {
        let mut table = [0u8; 256];
        let exponent = 1.0 / gamma;

        for (level, slot) in table.iter_mut().enumerate() {
            *slot = if gamma == 1.0 {
                level as u8
            } else {
                let normalized = level as f64 / 255.0;
                (255.0 * normalized.powf(exponent)).clamp(0.0, 255.0) as u8
            };
        }

        Self { table }
    }

    /// Tone-mapped lightness of one RGBA sample (0 = black, 255 = white).
    #[inline]
    pub fn map(&self, rgba: [u8; 4]) -> u8 {
        self.level(composite_lightness(rgba))
    }

    /// Tone-mapped value of an already composited lightness level.
    #[inline]
    pub fn level(&self, lightness: u8) -> u8 {
        self.table[lightness as usize]
    }
}

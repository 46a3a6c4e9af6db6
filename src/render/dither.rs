//! # Error-Diffusion Dithering
//!
//! Converts tone-mapped lightness samples (0 = black, 255 = white) to ink
//! decisions for a 1-bit print head.
//!
//! ## Kernel
//!
//! A single-pass, one-row-of-state variant of error diffusion. The only
//! state is one `i32` slot per column (the error buffer `d`) plus the running
//! carry `e` of the current row:
//!
//! ```text
//!              x-1      x       x+1
//! this row      ·      [f]  ──► 5/16 (carry)
//! next row    1/16    10/16
//! ```
//!
//! For column `x`:
//!
//! 1. `f = tone + floor((d[x] + 5·e) / 16)`
//! 2. `f < threshold` → ink, `e = f`; otherwise no ink, `e = f − 255`
//! 3. `d[x−1] += e`, `d[x] = 3·e`, `d[x] += 7·e`
//!
//! The carry restarts at zero on every row, so error that would cross the
//! right edge is dropped.
//!
//! ## Bounds
//!
//! The taps sum to 16/16, so `|e| ≤ 255` and `|d[x]| ≤ 11 · 255` for any
//! 8-bit input. `i32` state cannot overflow however tall the image is.
//!
//! ## Usage Example
//!
//! ```
//! use escraster::render::dither::Binarizer;
//!
//! let mut binarizer = Binarizer::new(4, 128, true);
//! binarizer.begin_row();
//! assert!(binarizer.is_ink(0, 0));     // black
//! assert!(!binarizer.is_ink(1, 255));  // white
//! ```

/// Denominator of every diffusion weight.
pub const DIFFUSION_DIVISOR: i32 = 16;

/// Weight of the running carry on the next column of the same row.
pub const CARRY_WEIGHT: i32 = 5;

/// Weight added to the already-consumed slot on the left.
pub const BELOW_LEFT_WEIGHT: i32 = 1;

/// Straight-below weight, written in two steps: the slot is reset to
/// `BELOW_SEED_WEIGHT · e`, then `BELOW_WEIGHT · e` is accumulated.
pub const BELOW_SEED_WEIGHT: i32 = 3;
pub const BELOW_WEIGHT: i32 = 7;

/// Full-scale sample value (white, no ink).
const WHITE: i32 = 255;

/// Per-encode error-diffusion state.
///
/// One instance belongs to one encode call; it is never shared.
#[derive(Debug, Clone)]
pub struct ErrorDiffusion {
    errors: Vec<i32>,
    carry: i32,
    threshold: i32,
}

impl ErrorDiffusion {
    /// Zeroed state for rows of `width` columns.
    pub fn new(width: usize, threshold: u8) -> Self {
        Self {
            errors: vec![0; width],
            carry: 0,
            threshold: threshold as i32,
        }
    }

    /// Reset the intra-row carry. Call once before the first column of each
    /// row.
    #[inline]
    pub fn begin_row(&mut self) {
        self.carry = 0;
    }

    /// Decide column `x` of the current row and diffuse its error.
    ///
    /// Columns must be visited left to right.
    #[inline]
    pub fn quantize(&mut self, x: usize, tone: u8) -> bool {
        let pending = self.errors[x] + CARRY_WEIGHT * self.carry;
        let f = tone as i32 + pending.div_euclid(DIFFUSION_DIVISOR);

        let ink = f < self.threshold;
        let e = if ink { f } else { f - WHITE };

        if x > 0 {
            self.errors[x - 1] += BELOW_LEFT_WEIGHT * e;
        }
        self.errors[x] = BELOW_SEED_WEIGHT * e;
        self.errors[x] += BELOW_WEIGHT * e;
        self.carry = e;

        ink
    }

    /// Carry that the next column will see.
    pub fn carry(&self) -> i32 {
        self.carry
    }

    /// Error buffer as it stands (one slot per column).
    pub fn errors(&self) -> &[i32] {
        &self.errors
    }
}

/// Ink decision for one tone-mapped sample: either flat thresholding or
/// error diffusion.
#[derive(Debug, Clone)]
pub enum Binarizer {
    /// Ink iff `tone < threshold`, no state.
    Threshold(u8),
    /// Error diffusion with per-column state.
    Diffusion(ErrorDiffusion),
}

impl Binarizer {
    pub fn new(width: usize, threshold: u8, dithering: bool) -> Self {
        if dithering {
            Self::Diffusion(ErrorDiffusion::new(width, threshold))
        } else {
            Self::Threshold(threshold)
        }
    }

    #[inline]
    pub fn begin_row(&mut self) {
        if let Self::Diffusion(diffusion) = self {
            diffusion.begin_row();
        }
    }

    #[inline]
    pub fn is_ink(&mut self, x: usize, tone: u8) -> bool {
        match self {
            Self::Threshold(threshold) => tone < *threshold,
            Self::Diffusion(diffusion) => diffusion.quantize(x, tone),
        }
    }
}

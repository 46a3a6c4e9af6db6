//! # Error Types
//!
//! This module defines the error types used throughout the escraster library.
//!
//! The encoder does no I/O, so almost every variant describes a caller
//! mistake: a pixel buffer that does not match its declared dimensions, or a
//! configuration value the printer cannot honor. These are reported
//! immediately instead of producing a degraded bitmap, because a degraded
//! bitmap still prints, just wrongly.

use thiserror::Error;

/// Main error type for escraster operations
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height of zero
    #[error("Invalid dimensions: {width}x{height} (both must be > 0)")]
    InvalidDimensions { width: usize, height: usize },

    /// `width * height * 4` does not fit in `usize`
    #[error("Image too large: {width}x{height} pixels exceeds addressable memory")]
    ImageTooLarge { width: usize, height: usize },

    /// Pixel buffer length does not equal `width * height * 4`
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    PixelBufferSize { expected: usize, actual: usize },

    /// Image too wide for the 16-bit row byte-width header field
    #[error("Image too wide: {width_bytes} bytes per row exceeds {max}")]
    RowTooWide { width_bytes: usize, max: usize },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Image decoding error (external decoder collaborator)
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for escraster operations
pub type Result<T> = std::result::Result<T, EncodeError>;

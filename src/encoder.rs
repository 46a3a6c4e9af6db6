//! # Raster Image Encoder
//!
//! Turns a decoded RGBA image into the ESC/POS byte sequence that prints
//! it: an optional layout prefix followed by one `GS v 0` command per chunk.
//!
//! ## Output
//!
//! ```text
//! GS L nL nH  GS W nL nH  ESC a n        layout prefix (optional)
//! GS v 0 0 xL xH yL yH  d1 ... dk        chunk 1
//! GS v 0 0 xL xH yL yH  d1 ... dk        chunk 2
//! ...
//! ```
//!
//! Every chunk declares the same row byte-width `ceil(width / 8)`; the row
//! counts add up to the image height and none exceeds `max_chunk_rows`.
//!
//! ## Usage Example
//!
//! ```
//! use escraster::encoder::{self, EncoderConfig};
//!
//! // 16×1, opaque black
//! let pixels = [0u8, 0, 0, 255].repeat(16);
//! let config = EncoderConfig {
//!     gamma: 1.0,
//!     dithering: false,
//!     emit_layout: false,
//!     ..Default::default()
//! };
//!
//! let bytes = encoder::encode(&pixels, 16, 1, &config)?;
//! assert_eq!(bytes, vec![0x1D, 0x76, 0x30, 0x00, 2, 0, 1, 0, 0xFF, 0xFF]);
//! # Ok::<(), escraster::EncodeError>(())
//! ```

use std::num::NonZeroU16;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{EncodeError, Result};
use crate::printer::PrinterConfig;
use crate::protocol::graphics::{self, MAX_HEADER_VALUE};
use crate::protocol::layout::{Alignment, PrintArea};
use crate::raster::{Bitmap, Orientation, PixelBuffer, Rasterizer};

/// Per-call encoder settings
///
/// Every field has a default, so a JSON config only needs the fields it
/// changes. Unknown keys are rejected:
///
/// ```
/// use escraster::encoder::EncoderConfig;
///
/// let config = EncoderConfig::from_json_str(r#"{ "upsideDown": true, "threshold": 100 }"#)?;
/// assert!(config.upside_down);
/// assert_eq!(config.threshold, 100);
/// assert_eq!(config.print_width, 576);
/// # Ok::<(), escraster::EncodeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EncoderConfig {
    /// Physical print width in dots
    pub print_width: u16,
    /// Left margin in dots
    pub left_margin: u16,
    /// Right margin in dots
    pub right_margin: u16,
    /// Image alignment within the print area
    pub alignment: Alignment,
    /// Printer tone response; samples are mapped through `x^(1/gamma)`
    pub gamma: f64,
    /// Samples below this value are inked
    pub threshold: u8,
    /// Error diffusion on, or flat thresholding
    pub dithering: bool,
    /// Print mechanism is mounted rotated 180°
    pub upside_down: bool,
    /// Maximum rows per raster command
    pub max_chunk_rows: u16,
    /// Emit the margin/alignment prefix before the raster data
    pub emit_layout: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::for_printer(&PrinterConfig::default())
    }
}

impl EncoderConfig {
    /// Defaults for a given printer preset.
    pub fn for_printer(printer: &PrinterConfig) -> Self {
        Self {
            print_width: printer.width_dots,
            left_margin: 0,
            right_margin: 0,
            alignment: Alignment::Left,
            gamma: 1.8,
            threshold: 128,
            dithering: true,
            upside_down: false,
            max_chunk_rows: printer.max_chunk_rows,
            emit_layout: true,
        }
    }

    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_json_str_with(json, Self::default())
    }

    /// Parse a JSON config over `base`: fields present in `json` replace the
    /// ones in `base`, missing fields keep the base value.
    ///
    /// ```
    /// use escraster::{EncoderConfig, PrinterConfig};
    ///
    /// let base = EncoderConfig::for_printer(&PrinterConfig::GENERIC_58MM);
    /// let config = EncoderConfig::from_json_str_with(r#"{ "gamma": 2.0 }"#, base)?;
    /// assert_eq!(config.print_width, 384);
    /// assert_eq!(config.gamma, 2.0);
    /// # Ok::<(), escraster::EncodeError>(())
    /// ```
    pub fn from_json_str_with(json: &str, base: Self) -> Result<Self> {
        let invalid = |e: serde_json::Error| EncodeError::InvalidConfig(e.to_string());

        let overrides = match serde_json::from_str(json).map_err(invalid)? {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(EncodeError::InvalidConfig(format!(
                    "expected a JSON object, got {}",
                    other
                )));
            }
        };

        let mut merged = match serde_json::to_value(base).map_err(invalid)? {
            serde_json::Value::Object(map) => map,
            _ => return Err(EncodeError::InvalidConfig("base config is not an object".into())),
        };
        merged.extend(overrides);

        serde_json::from_value(serde_json::Value::Object(merged)).map_err(invalid)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_file_with(path, Self::default())
    }

    /// Read and parse a JSON config file over `base`.
    pub fn from_json_file_with(path: impl AsRef<Path>, base: Self) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str_with(&json, base)
    }

    /// Check the values a printer cannot honor.
    ///
    /// ```
    /// use escraster::encoder::EncoderConfig;
    ///
    /// let mut config = EncoderConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.gamma = 0.0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(EncodeError::InvalidConfig(format!(
                "gamma must be a positive number, got {}",
                self.gamma
            )));
        }
        if self.max_chunk_rows == 0 {
            return Err(EncodeError::InvalidConfig(
                "maxChunkRows must be at least 1".to_string(),
            ));
        }
        if self.print_area().area_width().is_none() {
            return Err(EncodeError::InvalidConfig(format!(
                "margins {} + {} leave no room in a {}-dot print width",
                self.left_margin, self.right_margin, self.print_width
            )));
        }
        Ok(())
    }

    /// Placement of the image as the reader sees it.
    pub fn print_area(&self) -> PrintArea {
        PrintArea {
            print_width: self.print_width,
            left: self.left_margin,
            right: self.right_margin,
            alignment: self.alignment,
        }
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_upside_down(self.upside_down)
    }

    /// Rasterizer for these tone and orientation settings.
    pub fn rasterizer(&self) -> Rasterizer {
        Rasterizer::new(
            self.gamma,
            self.threshold,
            self.dithering,
            self.orientation(),
        )
    }

    fn chunk_rows(&self) -> Result<NonZeroU16> {
        NonZeroU16::new(self.max_chunk_rows).ok_or_else(|| {
            EncodeError::InvalidConfig("maxChunkRows must be at least 1".to_string())
        })
    }
}

/// Capability: encode a decoded image as printer raster commands.
///
/// Text and barcode command families are separate capabilities; this one
/// covers the raster image sub-command only. The trait is object-safe so a
/// command-stream assembler can hold a `Box<dyn RasterImageEncoder>`.
pub trait RasterImageEncoder {
    fn encode_image(&self, image: &PixelBuffer<'_>, config: &EncoderConfig) -> Result<Vec<u8>>;
}

/// ESC/POS `GS v 0` implementation of [`RasterImageEncoder`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EscPosImageEncoder;

impl RasterImageEncoder for EscPosImageEncoder {
    fn encode_image(&self, image: &PixelBuffer<'_>, config: &EncoderConfig) -> Result<Vec<u8>> {
        config.validate()?;
        check_row_width(image.width())?;

        let bitmap = config.rasterizer().rasterize(image);
        frame(&bitmap, config)
    }
}

/// Encode `pixels` (RGBA8, row-major, `width * height * 4` bytes).
pub fn encode(pixels: &[u8], width: usize, height: usize, config: &EncoderConfig) -> Result<Vec<u8>> {
    let image = PixelBuffer::new(pixels, width, height)?;
    EscPosImageEncoder.encode_image(&image, config)
}

/// Frame an already rasterized bitmap: layout prefix, then one raster
/// command per chunk.
pub fn frame(bitmap: &Bitmap, config: &EncoderConfig) -> Result<Vec<u8>> {
    config.validate()?;
    if bitmap.width() == 0 || bitmap.height() == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: bitmap.width(),
            height: bitmap.height(),
        });
    }
    let width_bytes = check_row_width(bitmap.width())?;
    let max_rows = config.chunk_rows()?;

    let chunk_count = bitmap.height().div_ceil(max_rows.get() as usize);
    let mut out = Vec::with_capacity(
        16 + chunk_count * graphics::RASTER_HEADER_LEN + bitmap.data().len(),
    );

    if config.emit_layout {
        let area = config.print_area();
        if let Some(area_width) = area.area_width()
            && bitmap.width() > area_width as usize
        {
            warn!(
                image_width = bitmap.width(),
                area_width, "Image is wider than the print area and will be clipped"
            );
        }
        out.extend(area.commands(config.upside_down));
    }

    for chunk in bitmap.chunks(max_rows) {
        trace!(first_row = chunk.first_row, rows = chunk.rows, "Raster chunk");
        // rows ≤ max_chunk_rows, which is a u16
        graphics::raster_into(&mut out, width_bytes, chunk.rows as u16, chunk.data);
    }

    debug!(
        width = bitmap.width(),
        height = bitmap.height(),
        chunks = chunk_count,
        bytes = out.len(),
        upside_down = config.upside_down,
        "Encoded raster image"
    );

    Ok(out)
}

fn check_row_width(width: usize) -> Result<u16> {
    let width_bytes = width.div_ceil(8);
    u16::try_from(width_bytes).map_err(|_| EncodeError::RowTooWide {
        width_bytes,
        max: MAX_HEADER_VALUE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::graphics::RASTER_HEADER_LEN;

    fn plain() -> EncoderConfig {
        EncoderConfig {
            gamma: 1.0,
            dithering: false,
            emit_layout: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.print_width, 576);
        assert_eq!(config.max_chunk_rows, 256);
        assert_eq!(config.threshold, 128);
        assert!(config.dithering);
        assert!(!config.upside_down);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_gamma() {
        for gamma in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = EncoderConfig {
                gamma,
                ..plain()
            };
            assert!(
                matches!(config.validate(), Err(EncodeError::InvalidConfig(_))),
                "gamma {} should be rejected",
                gamma
            );
        }
    }

    #[test]
    fn test_validate_rejects_zero_chunk_rows() {
        let config = EncoderConfig {
            max_chunk_rows: 0,
            ..plain()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_margins() {
        let config = EncoderConfig {
            left_margin: 300,
            right_margin: 276,
            ..plain()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_encode_rejects_invalid_config_before_work() {
        let pixels = [0u8, 0, 0, 255].repeat(4);
        let config = EncoderConfig {
            gamma: -2.0,
            ..plain()
        };
        assert!(encode(&pixels, 2, 2, &config).is_err());
    }

    #[test]
    fn test_row_width_limit() {
        assert_eq!(check_row_width(8 * 65535).unwrap(), 65535);
        assert!(matches!(
            check_row_width(8 * 65535 + 1),
            Err(EncodeError::RowTooWide { width_bytes: 65536, .. })
        ));
    }

    #[test]
    fn test_frame_splits_chunks() {
        let bitmap = Bitmap::blank(8, 5);
        let config = EncoderConfig {
            max_chunk_rows: 2,
            ..plain()
        };
        let bytes = frame(&bitmap, &config).unwrap();

        // 3 chunks: 2 + 2 + 1 rows, one byte per row
        assert_eq!(bytes.len(), 3 * RASTER_HEADER_LEN + 5);
        assert_eq!(&bytes[4..8], &[1, 0, 2, 0]);
        assert_eq!(&bytes[14..18], &[1, 0, 2, 0]);
        assert_eq!(&bytes[24..28], &[1, 0, 1, 0]);
    }

    #[test]
    fn test_layout_prefix_precedes_raster() {
        let pixels = [255u8, 255, 255, 255].repeat(8);
        let config = EncoderConfig {
            emit_layout: true,
            alignment: Alignment::Center,
            left_margin: 8,
            ..plain()
        };
        let bytes = encode(&pixels, 8, 1, &config).unwrap();

        // GS L 8 0, GS W (568) , ESC a 1
        assert_eq!(
            &bytes[..11],
            &[0x1D, b'L', 8, 0, 0x1D, b'W', 0x38, 0x02, 0x1B, b'a', 1]
        );
        assert_eq!(&bytes[11..15], &[0x1D, 0x76, 0x30, 0x00]);
    }

    #[test]
    fn test_json_config_camel_case() {
        let config = EncoderConfig::from_json_str(
            r#"{
                "printWidth": 384,
                "leftMargin": 4,
                "rightMargin": 4,
                "alignment": "right",
                "gamma": 2.2,
                "dithering": false,
                "maxChunkRows": 64,
                "emitLayout": false
            }"#,
        )
        .unwrap();

        assert_eq!(config.print_width, 384);
        assert_eq!(config.alignment, Alignment::Right);
        assert_eq!(config.gamma, 2.2);
        assert!(!config.dithering);
        assert_eq!(config.max_chunk_rows, 64);
        assert_eq!(config.threshold, 128);
    }

    #[test]
    fn test_json_config_rejects_out_of_range_threshold() {
        let result = EncoderConfig::from_json_str(r#"{ "threshold": 300 }"#);
        assert!(matches!(result, Err(EncodeError::InvalidConfig(_))));
    }

    #[test]
    fn test_json_config_rejects_unknown_keys() {
        for json in [r#"{ "upside_down": true }"#, r#"{ "treshold": 10 }"#] {
            assert!(
                matches!(
                    EncoderConfig::from_json_str(json),
                    Err(EncodeError::InvalidConfig(_))
                ),
                "{} should be rejected",
                json
            );
        }
    }

    #[test]
    fn test_json_config_over_printer_preset() {
        let base = EncoderConfig::for_printer(&PrinterConfig::GENERIC_58MM);
        let config = EncoderConfig::from_json_str_with(r#"{ "gamma": 2.0 }"#, base).unwrap();

        assert_eq!(config.print_width, 384);
        assert_eq!(config.max_chunk_rows, 128);
        assert_eq!(config.gamma, 2.0);
        assert!(config.dithering);
    }

    #[test]
    fn test_json_config_overrides_preset_fields() {
        let base = EncoderConfig::for_printer(&PrinterConfig::GENERIC_58MM);
        let config = EncoderConfig::from_json_str_with(
            r#"{ "printWidth": 512, "upsideDown": true }"#,
            base,
        )
        .unwrap();

        assert_eq!(config.print_width, 512);
        assert_eq!(config.max_chunk_rows, 128);
        assert!(config.upside_down);
    }

    #[test]
    fn test_json_config_over_preset_still_rejects_unknown_keys() {
        let base = EncoderConfig::for_printer(&PrinterConfig::GENERIC_58MM);
        assert!(EncoderConfig::from_json_str_with(r#"{ "upside_down": true }"#, base).is_err());
    }

    #[test]
    fn test_json_config_must_be_object() {
        assert!(matches!(
            EncoderConfig::from_json_str("[1, 2]"),
            Err(EncodeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_encoder_is_object_safe() {
        let encoder: Box<dyn RasterImageEncoder> = Box::new(EscPosImageEncoder);
        let pixels = [0u8, 0, 0, 255].repeat(8);
        let image = PixelBuffer::new(&pixels, 8, 1).unwrap();
        let bytes = encoder.encode_image(&image, &plain()).unwrap();
        assert_eq!(bytes.last(), Some(&0xFF));
    }
}

//! # Printer Configuration
//!
//! Hardware presets for common ESC/POS printers. A preset seeds the
//! printer-imposed parts of an [`EncoderConfig`](crate::encoder::EncoderConfig):
//! the physical print width and the largest raster chunk the receive buffer
//! accepts.
//!
//! ## Presets
//!
//! | Preset | Width (dots) | Resolution | Chunk rows |
//! |--------|--------------|------------|------------|
//! | 80mm | 576 | 203 DPI | 256 |
//! | 58mm | 384 | 203 DPI | 128 |
//! | TM-T88 | 512 | 180 DPI | 256 |
//!
//! ## Usage
//!
//! ```
//! use escraster::printer::PrinterConfig;
//!
//! let config = PrinterConfig::GENERIC_80MM;
//! println!("Print width: {} dots ({} bytes)",
//!          config.width_dots,
//!          config.width_bytes());
//! ```

/// # Printer Configuration
///
/// ## Calculations
///
/// ```text
/// dots_per_mm = dpi / 25.4
/// width_mm = width_dots / dots_per_mm
///
/// For an 80mm printer:
///   dots_per_mm = 203 / 25.4 ≈ 8
///   width_mm = 576 / 8 = 72mm
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Printer model name
    pub name: &'static str,

    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Resolution in dots per inch
    pub dpi: u16,

    /// Maximum rows per raster chunk (receive buffer limit)
    pub max_chunk_rows: u16,
}

impl PrinterConfig {
    /// 80mm paper, 72mm printable.
    ///
    /// ```text
    /// ├── 4mm ──┼────── 72mm printable ──────┼── 4mm ──┤
    /// │ margin  │         576 dots           │ margin  │
    /// ```
    pub const GENERIC_80MM: Self = Self {
        name: "Generic 80mm",
        width_dots: 576,
        dpi: 203,
        max_chunk_rows: 256,
    };

    /// 58mm paper, 48mm printable. Usually small receive buffers.
    pub const GENERIC_58MM: Self = Self {
        name: "Generic 58mm",
        width_dots: 384,
        dpi: 203,
        max_chunk_rows: 128,
    };

    /// Epson TM-T88 series, 80mm paper at 180 DPI.
    pub const TM_T88: Self = Self {
        name: "Epson TM-T88",
        width_dots: 512,
        dpi: 180,
        max_chunk_rows: 256,
    };

    /// Print width in bytes, `ceil(width_dots / 8)`.
    #[inline]
    pub fn width_bytes(&self) -> u16 {
        self.width_dots.div_ceil(8)
    }

    /// Calculate dots per millimeter
    ///
    /// ```
    /// use escraster::printer::PrinterConfig;
    ///
    /// let config = PrinterConfig::GENERIC_80MM;
    /// assert!((config.dots_per_mm() - 8.0).abs() < 0.1);
    /// ```
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Calculate print width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.width_dots as f32 / self.dots_per_mm()
    }

    /// Parse a printer string (CLI args or config).
    ///
    /// Formats:
    /// - `"80mm"`, `"58mm"`, `"tm-t88"` → built-in preset
    /// - Any built-in preset's display name (e.g. `"Epson TM-T88"`)
    /// - `"custom:WIDTH"` or `"custom:WIDTHxROWS"` → 203 DPI printer with the
    ///   given width in dots and chunk row limit (default 256)
    pub fn parse(s: &str) -> Result<Self, String> {
        if let Some(preset) = Self::built_in().into_iter().find(|p| p.name == s) {
            return Ok(preset);
        }

        match s.to_lowercase().as_str() {
            "80mm" => Ok(Self::GENERIC_80MM),
            "58mm" => Ok(Self::GENERIC_58MM),
            "tm-t88" | "tmt88" => Ok(Self::TM_T88),
            other if other.starts_with("custom:") => {
                let dims = &other["custom:".len()..];
                let (w, rows) = match dims.split_once('x') {
                    Some((w, rows)) => (w, Some(rows)),
                    None => (dims, None),
                };
                let width_dots: u16 = w
                    .parse()
                    .ok()
                    .filter(|&w| w > 0)
                    .ok_or_else(|| format!("Invalid width: {}", w))?;
                let max_chunk_rows: u16 = match rows {
                    Some(rows) => rows
                        .parse()
                        .ok()
                        .filter(|&r| r > 0)
                        .ok_or_else(|| format!("Invalid chunk rows: {}", rows))?,
                    None => Self::GENERIC_80MM.max_chunk_rows,
                };
                Ok(Self {
                    name: "Custom",
                    width_dots,
                    dpi: 203,
                    max_chunk_rows,
                })
            }
            _ => Err(format!(
                "Unknown printer '{}'. Use '80mm', '58mm', 'tm-t88' or 'custom:WIDTH[xROWS]'",
                s
            )),
        }
    }

    /// List all built-in presets.
    pub fn built_in() -> Vec<Self> {
        vec![Self::GENERIC_80MM, Self::GENERIC_58MM, Self::TM_T88]
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::GENERIC_80MM
    }
}

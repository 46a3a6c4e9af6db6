//! # Raster Conversion
//!
//! Turns a validated RGBA [`PixelBuffer`] into a packed 1-bit [`Bitmap`]:
//! tone mapping, binarization and bit packing, row by row in print order.
//!
//! ## Print Order
//!
//! Rows come out in the order the print head lays them down. For an
//! upside-down mechanism that is the source buffer read backwards, last
//! sample first, which is the source image rotated 180°:
//!
//! ```text
//!   source          Normal          UpsideDown
//!   A B C           A B C           F E D
//!   D E F           D E F           C B A
//! ```

use std::num::NonZeroU16;

use crate::error::{EncodeError, Result};
use crate::render::dither::Binarizer;
use crate::render::pack;
use crate::render::tone::ToneCurve;

/// Bytes per RGBA sample.
pub const BYTES_PER_PIXEL: usize = 4;

/// Read-only view of a decoded RGBA8 image, row-major, checked against its
/// declared dimensions.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    pixels: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap `pixels`, which must hold exactly `width * height * 4` bytes.
    ///
    /// ```
    /// use escraster::raster::PixelBuffer;
    ///
    /// let pixels = vec![0u8; 3 * 2 * 4];
    /// assert!(PixelBuffer::new(&pixels, 3, 2).is_ok());
    /// assert!(PixelBuffer::new(&pixels, 2, 2).is_err());
    /// assert!(PixelBuffer::new(&[], 0, 0).is_err());
    /// ```
    pub fn new(pixels: &'a [u8], width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EncodeError::InvalidDimensions { width, height });
        }

        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(EncodeError::ImageTooLarge { width, height })?;
        if pixels.len() != expected {
            return Err(EncodeError::PixelBufferSize {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// RGBA sample at linear index `index` (row-major).
    #[inline]
    pub fn sample(&self, index: usize) -> [u8; 4] {
        let offset = index * BYTES_PER_PIXEL;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + BYTES_PER_PIXEL]);
        rgba
    }
}

/// Physical orientation of the print mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Normal,
    /// Mechanism rotated 180°; data is sent pre-rotated.
    UpsideDown,
}

impl Orientation {
    pub fn from_upside_down(upside_down: bool) -> Self {
        if upside_down {
            Self::UpsideDown
        } else {
            Self::Normal
        }
    }

    /// Linear source index of output dot `(x, y)`.
    #[inline]
    fn source_index(self, width: usize, height: usize, x: usize, y: usize) -> usize {
        let forward = y * width + x;
        match self {
            Self::Normal => forward,
            Self::UpsideDown => width * height - 1 - forward,
        }
    }
}

/// Packed 1-bit raster in print order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    width_bytes: usize,
    data: Vec<u8>,
}

/// Consecutive whole rows of a [`Bitmap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapChunk<'a> {
    /// Index of the first row in print order
    pub first_row: usize,
    pub rows: usize,
    pub data: &'a [u8],
}

impl Bitmap {
    /// All-white bitmap.
    pub fn blank(width: usize, height: usize) -> Self {
        let width_bytes = pack::row_bytes(width);
        Self {
            width,
            height,
            width_bytes,
            data: vec![0; width_bytes * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per packed row, `ceil(width / 8)`.
    pub fn width_bytes(&self) -> usize {
        self.width_bytes
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width_bytes;
        &self.data[start..start + self.width_bytes]
    }

    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.width_bytes;
        &mut self.data[start..start + self.width_bytes]
    }

    pub fn is_ink(&self, x: usize, y: usize) -> bool {
        pack::dot(self.row(y), x)
    }

    /// Split into groups of at most `max_rows` rows. Rows are never split.
    ///
    /// ```
    /// use std::num::NonZeroU16;
    /// use escraster::raster::Bitmap;
    ///
    /// let bitmap = Bitmap::blank(16, 5);
    /// let rows: Vec<usize> = bitmap
    ///     .chunks(NonZeroU16::new(2).unwrap())
    ///     .map(|chunk| chunk.rows)
    ///     .collect();
    /// assert_eq!(rows, vec![2, 2, 1]);
    /// ```
    pub fn chunks(&self, max_rows: NonZeroU16) -> impl Iterator<Item = BitmapChunk<'_>> + '_ {
        let max_rows = max_rows.get() as usize;
        let width_bytes = self.width_bytes;
        self.data
            .chunks(max_rows * width_bytes)
            .enumerate()
            .map(move |(i, data)| BitmapChunk {
                first_row: i * max_rows,
                rows: data.len() / width_bytes,
                data,
            })
    }
}

/// Tone mapping and binarization settings for one conversion
#[derive(Debug, Clone)]
pub struct Rasterizer {
    curve: ToneCurve,
    threshold: u8,
    dithering: bool,
    orientation: Orientation,
}

impl Rasterizer {
    /// `gamma` must already be validated as finite and positive.
    pub fn new(gamma: f64, threshold: u8, dithering: bool, orientation: Orientation) -> Self {
        Self {
            curve: ToneCurve::new(gamma),
            threshold,
            dithering,
            orientation,
        }
    }

    /// Convert `image` to a packed bitmap in print order.
    ///
    /// The error buffer lives only for the duration of this call.
    pub fn rasterize(&self, image: &PixelBuffer<'_>) -> Bitmap {
        let (width, height) = (image.width(), image.height());
        let mut bitmap = Bitmap::blank(width, height);
        let mut binarizer = Binarizer::new(width, self.threshold, self.dithering);

        for y in 0..height {
            binarizer.begin_row();
            let row = bitmap.row_mut(y);
            for x in 0..width {
                let index = self.orientation.source_index(width, height, x, y);
                let tone = self.curve.map(image.sample(index));
                if binarizer.is_ink(x, tone) {
                    pack::set_dot(row, x);
                }
            }
        }

        bitmap
    }
}

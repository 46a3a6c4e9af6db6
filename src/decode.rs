//! # Image Decoding
//!
//! Adapter around the `image` crate that produces the RGBA8 buffers the
//! encoder consumes. Container formats (PNG, JPEG, GIF, ...) are handled
//! entirely by `image`; this module only normalizes the result.
//!
//! Base64 payloads are accepted bare or as a `data:` URL, the way markup
//! documents usually embed receipt logos.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;

use crate::error::{EncodeError, Result};
use crate::raster::PixelBuffer;

/// A decoded image in RGBA8, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Decode an encoded image from memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| EncodeError::Image(format!("Failed to decode image: {}", e)))?;
        Ok(Self::from_dynamic(&image))
    }

    /// Decode a base64 payload, with or without a `data:<mime>;base64,`
    /// prefix. Whitespace inside the payload is ignored.
    pub fn from_base64(payload: &str) -> Result<Self> {
        let data = match payload.trim().split_once(";base64,") {
            Some((prefix, data)) if prefix.starts_with("data:") => data,
            _ => payload,
        };
        let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();

        let bytes = STANDARD
            .decode(compact)
            .map_err(|e| EncodeError::Image(format!("Invalid base64 payload: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Decode an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|e| {
            EncodeError::Image(format!("Failed to open {}: {}", path.display(), e))
        })?;
        Ok(Self::from_dynamic(&image))
    }

    pub fn from_dynamic(image: &DynamicImage) -> Self {
        let rgba = image.to_rgba8();
        Self {
            width: rgba.width() as usize,
            height: rgba.height() as usize,
            pixels: rgba.into_raw(),
        }
    }

    /// Validated view for the encoder.
    pub fn as_pixel_buffer(&self) -> Result<PixelBuffer<'_>> {
        PixelBuffer::new(&self.pixels, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn sample_image() -> RgbaImage {
        let mut image = RgbaImage::from_pixel(3, 2, Rgba([255, 255, 255, 255]));
        image.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        image.put_pixel(2, 1, Rgba([10, 20, 30, 0]));
        image
    }

    #[test]
    fn test_decode_png_to_rgba() {
        let decoded = DecodedImage::from_bytes(&png_bytes(&sample_image())).unwrap();

        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.pixels.len(), 3 * 2 * 4);
        assert_eq!(&decoded.pixels[0..4], &[0, 0, 0, 255]);
        assert_eq!(&decoded.pixels[20..24], &[10, 20, 30, 0]);
    }

    #[test]
    fn test_decode_base64_and_data_url() {
        let encoded = STANDARD.encode(png_bytes(&sample_image()));

        let bare = DecodedImage::from_base64(&encoded).unwrap();
        let url = DecodedImage::from_base64(&format!("data:image/png;base64,{}", encoded)).unwrap();
        assert_eq!(bare, url);

        let (head, tail) = encoded.split_at(10);
        let wrapped = DecodedImage::from_base64(&format!("{}\n  {}\n", head, tail)).unwrap();
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            DecodedImage::from_bytes(b"not an image"),
            Err(EncodeError::Image(_))
        ));
        assert!(matches!(
            DecodedImage::from_base64("!!!"),
            Err(EncodeError::Image(_))
        ));
    }

    #[test]
    fn test_pixel_buffer_view() {
        let decoded = DecodedImage::from_dynamic(&DynamicImage::ImageRgba8(sample_image()));
        let buffer = decoded.as_pixel_buffer().unwrap();
        assert_eq!(buffer.width(), 3);
        assert_eq!(buffer.sample(0), [0, 0, 0, 255]);
    }
}

//! # Raster Image
//!
//! Immutable RGBA raster decoded from PNG/JPEG bytes.

use std::io::Cursor;

use config::constants::{MAX_FILE_SIZE, MAX_IMAGE_PIXELS, OPAQUE_ALPHA};
use image::{
    ColorType, DynamicImage, GrayAlphaImage, GrayImage, ImageDecoder, ImageError, ImageReader,
    RgbImage, RgbaImage,
};
use tracing::warn;

use crate::error::TraceError;

/// An RGBA8 image that is never mutated after construction.
///
/// # Example
///
/// ```rust
/// use image_trace::RasterImage;
///
/// let raster = RasterImage::from_raw(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 0]).unwrap();
/// assert_eq!(raster.dimensions(), (2, 1));
/// assert!(raster.has_transparency());
/// ```
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixels: RgbaImage,
}

impl RasterImage {
    /// Decodes PNG/JPEG (or any enabled format) bytes.
    ///
    /// The format is sniffed from the content, not from a file name.
    pub fn decode(bytes: &[u8]) -> Result<Self, TraceError> {
        check_byte_len(bytes)?;
        let image = image::load_from_memory(bytes)?;
        Self::from_dynamic(image)
    }

    /// Wraps an already decoded image of any color type.
    pub fn from_dynamic(image: DynamicImage) -> Result<Self, TraceError> {
        Self::from_rgba(image.into_rgba8())
    }

    /// Wraps an RGBA8 buffer.
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self, TraceError> {
        let (width, height) = pixels.dimensions();
        check_dimensions(width, height)?;
        Ok(Self { pixels })
    }

    /// Builds an image from raw RGBA samples in row-major order.
    pub fn from_raw(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, TraceError> {
        let pixels = RgbaImage::from_raw(width, height, samples)
            .ok_or(TraceError::InvalidDimensions { width, height })?;
        Self::from_rgba(pixels)
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Returns (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Returns the RGBA sample at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels.get_pixel(x, y).0
    }

    /// Iterates all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.pixels.pixels().map(|p| p.0)
    }

    /// Returns true if any pixel is less than fully opaque.
    pub fn has_transparency(&self) -> bool {
        self.pixels().any(|p| p[3] < OPAQUE_ALPHA)
    }

    /// Borrows the underlying buffer.
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Decodes bytes to grayscale, keeping whatever part of a damaged file
/// can be read.
///
/// Decoder limits are lifted and a stream that ends early still yields the
/// rows decoded before the cut; the rest stays white. Only 8-bit color
/// types can be salvaged.
pub(crate) fn decode_gray_lenient(bytes: &[u8]) -> Result<GrayImage, TraceError> {
    check_byte_len(bytes)?;
    if let Ok(image) = image::load_from_memory(bytes) {
        check_dimensions(image.width(), image.height())?;
        return Ok(image.into_luma8());
    }

    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(ImageError::IoError)?;
    reader.no_limits();
    let decoder = reader.into_decoder()?;
    let (width, height) = decoder.dimensions();
    check_dimensions(width, height)?;
    let color = decoder.color_type();
    if !matches!(
        color,
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8
    ) {
        return Err(TraceError::UnsalvageableColor { color });
    }

    let len = usize::try_from(decoder.total_bytes())
        .map_err(|_| TraceError::TooManyPixels {
            count: u64::from(width) * u64::from(height),
            max: MAX_IMAGE_PIXELS,
        })?;
    let mut samples = vec![u8::MAX; len];
    if let Err(err) = decoder.read_image(&mut samples) {
        warn!(error = %err, width, height, "Image data cut short, keeping decoded rows");
    }

    let image = match color {
        ColorType::L8 => GrayImage::from_raw(width, height, samples).map(DynamicImage::ImageLuma8),
        ColorType::La8 => {
            GrayAlphaImage::from_raw(width, height, samples).map(DynamicImage::ImageLumaA8)
        }
        ColorType::Rgb8 => RgbImage::from_raw(width, height, samples).map(DynamicImage::ImageRgb8),
        ColorType::Rgba8 => {
            RgbaImage::from_raw(width, height, samples).map(DynamicImage::ImageRgba8)
        }
        other => return Err(TraceError::UnsalvageableColor { color: other }),
    };
    image
        .map(DynamicImage::into_luma8)
        .ok_or(TraceError::InvalidDimensions { width, height })
}

/// Rejects empty or oversized encoded input.
pub(crate) fn check_byte_len(bytes: &[u8]) -> Result<(), TraceError> {
    if bytes.is_empty() {
        return Err(TraceError::EmptyInput);
    }
    if bytes.len() > MAX_FILE_SIZE {
        return Err(TraceError::TooLarge {
            size: bytes.len(),
            max: MAX_FILE_SIZE,
        });
    }
    Ok(())
}

/// Rejects zero-sized or oversized decoded images.
pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<(), TraceError> {
    if width == 0 || height == 0 {
        return Err(TraceError::InvalidDimensions { width, height });
    }
    let count = u64::from(width) * u64::from(height);
    if count > MAX_IMAGE_PIXELS {
        return Err(TraceError::TooManyPixels {
            count,
            max: MAX_IMAGE_PIXELS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn encode_png(image: RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png() {
        let bytes = encode_png(RgbaImage::from_pixel(8, 4, Rgba([10, 20, 30, 255])));
        let raster = RasterImage::decode(&bytes).unwrap();
        assert_eq!(raster.dimensions(), (8, 4));
        assert_eq!(raster.pixel(3, 2), [10, 20, 30, 255]);
        assert!(!raster.has_transparency());
    }

    #[test]
    fn test_decode_detects_transparency() {
        let mut image = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        image.put_pixel(0, 0, Rgba([0, 0, 0, 254]));
        let raster = RasterImage::decode(&encode_png(image)).unwrap();
        assert!(raster.has_transparency());
    }

    #[test]
    fn test_decode_empty() {
        assert!(matches!(
            RasterImage::decode(&[]),
            Err(TraceError::EmptyInput)
        ));
    }

    #[test]
    fn test_decode_garbage() {
        let result = RasterImage::decode(b"definitely not an image");
        assert!(matches!(result, Err(TraceError::Decode(_))));
    }

    #[test]
    fn test_from_raw_wrong_length() {
        let result = RasterImage::from_raw(4, 4, vec![0; 10]);
        assert!(matches!(
            result,
            Err(TraceError::InvalidDimensions { width: 4, height: 4 })
        ));
    }

    #[test]
    fn test_lenient_decode_keeps_rows_before_a_cut() {
        let image = RgbaImage::from_fn(24, 24, |x, y| {
            if (6..18).contains(&x) && (6..18).contains(&y) {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let bytes = encode_png(image);
        // Drop the trailing IEND chunk.
        let cut = &bytes[..bytes.len() - 12];
        assert!(RasterImage::decode(cut).is_err());

        let gray = decode_gray_lenient(cut).unwrap();
        assert_eq!(gray.dimensions(), (24, 24));
        assert_eq!(gray.get_pixel(10, 10).0, [0]);
        assert_eq!(gray.get_pixel(0, 0).0, [255]);
    }

    #[test]
    fn test_lenient_decode_rejects_garbage() {
        assert!(matches!(
            decode_gray_lenient(b"garbage"),
            Err(TraceError::Decode(_))
        ));
        assert!(matches!(
            decode_gray_lenient(&[]),
            Err(TraceError::EmptyInput)
        ));
    }

    #[test]
    fn test_from_raw_zero_size() {
        let result = RasterImage::from_raw(0, 5, Vec::new());
        assert!(result.is_err());
    }
}

//! # Image Preprocessing
//!
//! Reduces an RGBA raster to a binary foreground/background mask.
//!
//! ## Classification
//!
//! The rule is chosen once per image:
//! - **Transparent images**: `alpha > ALPHA_THRESHOLD` is foreground
//! - **Opaque images**: `gray < LUMINANCE_THRESHOLD` is foreground
//!
//! Foreground pixels become raised geometry, background stays empty.

use config::constants::{ALPHA_THRESHOLD, LUMINANCE_THRESHOLD};
use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::raster::RasterImage;

/// Thresholds used to binarize an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreprocessParams {
    /// Alpha above which a pixel of a transparent image is foreground
    pub alpha_threshold: u8,
    /// Gray level below which a pixel of an opaque image is foreground
    pub luminance_threshold: u8,
}

impl Default for PreprocessParams {
    fn default() -> Self {
        Self {
            alpha_threshold: ALPHA_THRESHOLD,
            luminance_threshold: LUMINANCE_THRESHOLD,
        }
    }
}

/// Classification of a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelClass {
    /// Traced, becomes raised geometry
    Foreground,
    /// Not traced, stays empty
    Background,
}

/// Rule applied to every pixel of one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyMode {
    /// Opaque pixels of a transparent image are the object
    Alpha { threshold: u8 },
    /// Dark pixels of an opaque image are the object
    Luminance { threshold: u8 },
}

impl ClassifyMode {
    /// Picks the rule for an image: alpha if any pixel is transparent.
    pub fn for_image(image: &RasterImage, params: &PreprocessParams) -> Self {
        if image.has_transparency() {
            Self::Alpha {
                threshold: params.alpha_threshold,
            }
        } else {
            Self::Luminance {
                threshold: params.luminance_threshold,
            }
        }
    }
}

/// Rec. 709 luma of an RGBA sample, truncated to a byte.
#[inline]
pub fn luminance(pixel: [u8; 4]) -> u8 {
    let [r, g, b, _] = pixel;
    let gray = 0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b);
    gray.clamp(0.0, 255.0) as u8
}

/// Classifies one pixel. Pure: depends only on the sample and the mode.
///
/// # Example
///
/// ```rust
/// use image_trace::{classify, ClassifyMode, PixelClass};
///
/// let mode = ClassifyMode::Luminance { threshold: 180 };
/// assert_eq!(classify([0, 0, 0, 255], mode), PixelClass::Foreground);
/// assert_eq!(classify([255, 255, 255, 255], mode), PixelClass::Background);
/// ```
#[inline]
pub fn classify(pixel: [u8; 4], mode: ClassifyMode) -> PixelClass {
    let foreground = match mode {
        ClassifyMode::Alpha { threshold } => pixel[3] > threshold,
        ClassifyMode::Luminance { threshold } => luminance(pixel) < threshold,
    };
    if foreground {
        PixelClass::Foreground
    } else {
        PixelClass::Background
    }
}

/// A width × height grid of foreground flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl BinaryMask {
    /// Builds a mask by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Builds a mask from a grayscale image: pixels darker than `threshold`
    /// are foreground.
    pub fn from_gray(image: &GrayImage, threshold: u8) -> Self {
        Self::from_fn(image.width(), image.height(), |x, y| {
            image.get_pixel(x, y).0[0] < threshold
        })
    }

    /// Mask width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns true if (x, y) is foreground. Out-of-range cells are background.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return false;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Number of foreground cells.
    pub fn foreground_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Row-major cell flags.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Renders the mask as pure black (foreground) on white (background).
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.get(i64::from(x), i64::from(y)) {
                Luma([0])
            } else {
                Luma([255])
            }
        })
    }
}

/// Result of preprocessing a decoded image.
#[derive(Debug, Clone)]
pub struct Preprocessed {
    /// Binary foreground mask
    pub mask: BinaryMask,
    /// Rule that produced the mask
    pub mode: ClassifyMode,
}

impl Preprocessed {
    /// Source (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.mask.width(), self.mask.height())
    }
}

/// Binarizes a raster image.
pub fn preprocess(image: &RasterImage, params: &PreprocessParams) -> Preprocessed {
    let mode = ClassifyMode::for_image(image, params);
    let mask = BinaryMask::from_fn(image.width(), image.height(), |x, y| {
        classify(image.pixel(x, y), mode) == PixelClass::Foreground
    });

    debug!(
        width = image.width(),
        height = image.height(),
        ?mode,
        foreground = mask.foreground_count(),
        "Image preprocessed"
    );

    Preprocessed { mask, mode }
}

/// Input handed to the vectorizer.
#[derive(Debug, Clone)]
pub enum PreparedInput<'a> {
    /// Decoded and binarized image
    Mask(Preprocessed),
    /// Decoding failed; the original bytes are passed through untouched
    Raw {
        /// Original encoded bytes
        bytes: &'a [u8],
        /// Why preprocessing was skipped
        reason: String,
    },
}

impl PreparedInput<'_> {
    /// Returns true when preprocessing fell back to raw bytes.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Raw { .. })
    }

    /// Source dimensions, if the image was decoded.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self {
            Self::Mask(prepared) => Some(prepared.dimensions()),
            Self::Raw { .. } => None,
        }
    }
}

/// Decodes and binarizes image bytes.
///
/// Never fails: a decode error is downgraded to [`PreparedInput::Raw`] so the
/// vectorizer can attempt its own decode.
pub fn prepare<'a>(bytes: &'a [u8], params: &PreprocessParams) -> PreparedInput<'a> {
    match RasterImage::decode(bytes) {
        Ok(image) => PreparedInput::Mask(preprocess(&image, params)),
        Err(err) => {
            warn!(error = %err, "Preprocessing failed, using original image bytes");
            PreparedInput::Raw {
                bytes,
                reason: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn raster(image: RgbaImage) -> RasterImage {
        RasterImage::from_rgba(image).unwrap()
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(luminance([0, 0, 0, 255]), 0);
        assert!(luminance([255, 255, 255, 255]) >= 254);
    }

    #[test]
    fn test_luminance_weights_green_most() {
        assert!(luminance([0, 255, 0, 255]) > luminance([255, 0, 0, 255]));
        assert!(luminance([255, 0, 0, 255]) > luminance([0, 0, 255, 255]));
    }

    #[test]
    fn test_classify_alpha_mode() {
        let mode = ClassifyMode::Alpha { threshold: 128 };
        assert_eq!(classify([255, 255, 255, 129], mode), PixelClass::Foreground);
        assert_eq!(classify([0, 0, 0, 128], mode), PixelClass::Background);
        assert_eq!(classify([0, 0, 0, 0], mode), PixelClass::Background);
    }

    #[test]
    fn test_classify_luminance_mode_ignores_alpha() {
        let mode = ClassifyMode::Luminance { threshold: 180 };
        assert_eq!(classify([100, 100, 100, 0], mode), PixelClass::Foreground);
        assert_eq!(classify([200, 200, 200, 255], mode), PixelClass::Background);
    }

    #[test]
    fn test_mode_selected_once_per_image() {
        // A single translucent pixel switches the whole image to alpha mode,
        // so dark opaque-looking pixels are classified by alpha only.
        let mut image = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        image.put_pixel(0, 0, Rgba([0, 0, 0, 10]));
        let prepared = preprocess(&raster(image), &PreprocessParams::default());

        assert!(matches!(prepared.mode, ClassifyMode::Alpha { .. }));
        // White opaque pixels are now foreground, the translucent one is not
        assert_eq!(prepared.mask.foreground_count(), 15);
        assert!(!prepared.mask.get(0, 0));
    }

    #[test]
    fn test_opaque_image_dark_is_foreground() {
        let mut image = RgbaImage::from_pixel(3, 3, Rgba([250, 250, 250, 255]));
        image.put_pixel(1, 1, Rgba([20, 20, 20, 255]));
        let prepared = preprocess(&raster(image), &PreprocessParams::default());

        assert!(matches!(prepared.mode, ClassifyMode::Luminance { .. }));
        assert_eq!(prepared.mask.foreground_count(), 1);
        assert!(prepared.mask.get(1, 1));
    }

    #[test]
    fn test_mask_renders_pure_black_and_white() {
        let image = RgbaImage::from_fn(8, 8, |x, y| {
            let v = ((x * 32 + y * 8) % 256) as u8;
            Rgba([v, v, v, 255])
        });
        let prepared = preprocess(&raster(image), &PreprocessParams::default());
        let gray = prepared.mask.to_gray_image();
        assert!(gray.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let image = RgbaImage::from_fn(16, 16, |x, y| {
            Rgba([(x * 16) as u8, (y * 16) as u8, 90, 255])
        });
        let raster = raster(image);
        let first = preprocess(&raster, &PreprocessParams::default());
        let second = preprocess(&raster, &PreprocessParams::default());
        assert_eq!(first.mask, second.mask);
    }

    #[test]
    fn test_mask_out_of_range_is_background() {
        let mask = BinaryMask::from_fn(2, 2, |_, _| true);
        assert!(mask.get(0, 0));
        assert!(!mask.get(-1, 0));
        assert!(!mask.get(0, 2));
    }

    #[test]
    fn test_from_gray_round_trip() {
        let mask = BinaryMask::from_fn(5, 3, |x, y| (x + y) % 2 == 0);
        let rebuilt = BinaryMask::from_gray(&mask.to_gray_image(), 128);
        assert_eq!(mask, rebuilt);
    }

    #[test]
    fn test_prepare_degrades_on_garbage() {
        let bytes = b"not a png";
        let prepared = prepare(bytes, &PreprocessParams::default());
        assert!(prepared.is_degraded());
        assert_eq!(prepared.dimensions(), None);
        match prepared {
            PreparedInput::Raw { bytes: raw, reason } => {
                assert_eq!(raw, bytes);
                assert!(!reason.is_empty());
            }
            PreparedInput::Mask(_) => panic!("expected raw fallback"),
        }
    }
}

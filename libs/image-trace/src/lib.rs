//! # Image Trace
//!
//! Turns raster images into closed 2D outlines.
//!
//! ## Architecture
//!
//! ```text
//! bytes → RasterImage → (preprocess) BinaryMask → (vectorize) VectorPath
//! ```
//!
//! The preprocessor reduces an arbitrary RGBA image to a pure black/white
//! mask. The vectorizer follows pixel boundaries of that mask, drops speckles
//! and simplifies the resulting loops.
//!
//! ## Usage
//!
//! ```rust
//! use image::{Rgba, RgbaImage};
//! use image_trace::{preprocess, PreprocessParams, RasterImage, TraceParams, Vectorizer};
//!
//! let mut pixels = RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 255]));
//! for y in 4..12 {
//!     for x in 4..12 {
//!         pixels.put_pixel(x, y, Rgba([0, 0, 0, 255]));
//!     }
//! }
//! let raster = RasterImage::from_rgba(pixels).unwrap();
//! let prepared = preprocess(&raster, &PreprocessParams::default());
//!
//! let vectorizer = Vectorizer::new(TraceParams::default()).unwrap();
//! let paths = vectorizer.trace_mask(&prepared.mask);
//! assert_eq!(paths.outlines().count(), 1);
//! ```

pub mod error;
pub mod preprocess;
pub mod raster;
pub mod vectorize;

pub use error::TraceError;
pub use preprocess::{
    classify, prepare, preprocess, BinaryMask, ClassifyMode, PixelClass, PreparedInput,
    Preprocessed, PreprocessParams,
};
pub use raster::RasterImage;
pub use vectorize::{PathKind, SubPath, TraceParams, VectorPath, Vectorizer};

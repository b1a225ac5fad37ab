//! # Configuration Constants
//!
//! Centralized constants for the image-to-solid pipeline. Image thresholds,
//! tracing parameters, physical sizes and hole-carving values are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Preprocessing**: Alpha and luminance thresholds for binarization
//! - **Tracing**: Vectorizer defaults (threshold, speckle size, tolerance)
//! - **Geometry**: Plate size and decoration layering
//! - **Hole**: Keychain hole radius and tessellation
//! - **Limits**: Maximum values for safety bounds

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Area below which a polygon or triangle is treated as degenerate.
///
/// Used by the extruder to reject outlines that collapse to a line and by
/// mesh validation to flag zero-area triangles.
///
/// # Example
///
/// ```rust
/// use config::constants::DEGENERATE_AREA_EPSILON;
///
/// let area = 1e-12;
/// assert!(area < DEGENERATE_AREA_EPSILON);
/// ```
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-8;

// =============================================================================
// PREPROCESSING CONSTANTS
// =============================================================================

/// Alpha value above which a pixel of a transparent image is foreground.
///
/// Applied only when the image contains at least one pixel with alpha below
/// full opacity. Opaque pixels become the raised shape, transparent ones
/// become background.
///
/// # Example
///
/// ```rust
/// use config::constants::ALPHA_THRESHOLD;
///
/// let alpha: u8 = 200;
/// assert!(alpha > ALPHA_THRESHOLD);
/// ```
pub const ALPHA_THRESHOLD: u8 = 128;

/// Gray level below which a pixel of an opaque image is foreground.
///
/// Dark pixels are the object, light pixels are the background.
///
/// # Example
///
/// ```rust
/// use config::constants::LUMINANCE_THRESHOLD;
///
/// let gray: u8 = 40;
/// assert!(gray < LUMINANCE_THRESHOLD);
/// ```
pub const LUMINANCE_THRESHOLD: u8 = 180;

/// Alpha value of a fully opaque pixel.
pub const OPAQUE_ALPHA: u8 = 255;

// =============================================================================
// TRACING CONSTANTS
// =============================================================================

/// Intensity threshold used by the vectorizer.
///
/// Pixels darker than this value are traced. The preprocessor already emits
/// pure black and white, so any value in `1..=255` traces the same mask.
pub const TRACE_THRESHOLD: u8 = 128;

/// Speckle suppression size in pixels.
///
/// Traced paths enclosing this many pixels or fewer are dropped as noise.
///
/// # Example
///
/// ```rust
/// use config::constants::TURD_SIZE;
///
/// let single_pixel_area = 1;
/// assert!(single_pixel_area <= TURD_SIZE);
/// ```
pub const TURD_SIZE: u32 = 2;

/// Curve optimization tolerance in pixels.
///
/// Maximum distance a simplified outline may deviate from the smoothed
/// pixel boundary. Larger values give fewer, longer segments.
pub const OPT_TOLERANCE: f64 = 0.4;

/// Fallback image edge length when no size information is available.
///
/// Used when neither the preprocessor nor the vectorizer can report the
/// source dimensions. The plate then becomes square.
pub const DEFAULT_IMAGE_SIZE: u32 = 100;

// =============================================================================
// GEOMETRY CONSTANTS
// =============================================================================

/// Longest side of the generated model, in millimeters.
///
/// The base plate is scaled so that its largest dimension equals this value
/// while the other side follows the image aspect ratio.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_DIMENSION_MM;
///
/// assert_eq!(MAX_DIMENSION_MM, 50.0);
/// ```
pub const MAX_DIMENSION_MM: f64 = 50.0;

/// Depth of traced decorations as a fraction of the plate thickness.
///
/// Decorations sit on top of the base plate, so the total model height is
/// `thickness * (1.0 + DECORATION_DEPTH_RATIO)`.
pub const DECORATION_DEPTH_RATIO: f64 = 0.5;

/// Default plate thickness in millimeters for hosts that do not ask the user.
pub const DEFAULT_THICKNESS_MM: f64 = 3.0;

// =============================================================================
// HOLE CONSTANTS
// =============================================================================

/// Number of segments approximating the keychain hole circle.
///
/// The carved wall contributes `2 * HOLE_SEGMENTS` triangles.
///
/// # Example
///
/// ```rust
/// use config::constants::HOLE_SEGMENTS;
///
/// assert_eq!(2 * HOLE_SEGMENTS, 64);
/// ```
pub const HOLE_SEGMENTS: u32 = 32;

/// Smallest hole radius in millimeters.
///
/// Prevents unprintably small holes on tiny models.
pub const MIN_HOLE_RADIUS_MM: f64 = 1.5;

/// Hole radius as a fraction of the smaller horizontal model dimension.
pub const HOLE_RADIUS_RATIO: f64 = 0.08;

/// Hole position used when the caller does not specify one (percent).
///
/// 50 maps to the geometric center of the model.
pub const DEFAULT_HOLE_PERCENT: f64 = 50.0;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum accepted size of an input image in bytes (25 MB).
pub const MAX_FILE_SIZE: usize = 25 * 1024 * 1024;

/// Maximum decoded pixel count accepted by the preprocessor.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_IMAGE_PIXELS;
///
/// let (width, height) = (4096u64, 4096u64);
/// assert!(width * height <= MAX_IMAGE_PIXELS);
/// ```
pub const MAX_IMAGE_PIXELS: u64 = 64 * 1024 * 1024;

/// Maximum number of triangles in a generated mesh.
pub const MAX_TRIANGLES: usize = 10_000_000;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Computes the base plate size from source image dimensions.
///
/// The longest side is clamped to [`MAX_DIMENSION_MM`]; the other side keeps
/// the image aspect ratio. Landscape images (`width > height`) fix the width,
/// portrait and square images fix the height.
///
/// # Example
///
/// ```rust
/// use config::constants::plate_dimensions;
///
/// let (w, h) = plate_dimensions(100.0, 200.0);
/// assert_eq!(w, 25.0);
/// assert_eq!(h, 50.0);
/// ```
pub fn plate_dimensions(image_width: f64, image_height: f64) -> (f64, f64) {
    let aspect_ratio = image_width / image_height;
    if aspect_ratio > 1.0 {
        (MAX_DIMENSION_MM, MAX_DIMENSION_MM / aspect_ratio)
    } else {
        (MAX_DIMENSION_MM * aspect_ratio, MAX_DIMENSION_MM)
    }
}

/// Computes the keychain hole radius for a model footprint.
///
/// `max(MIN_HOLE_RADIUS_MM, HOLE_RADIUS_RATIO * min(size_x, size_y))`
///
/// # Example
///
/// ```rust
/// use config::constants::hole_radius;
///
/// assert_eq!(hole_radius(50.0, 50.0), 4.0);
/// assert_eq!(hole_radius(5.0, 5.0), 1.5);
/// ```
pub fn hole_radius(size_x: f64, size_y: f64) -> f64 {
    (HOLE_RADIUS_RATIO * size_x.min(size_y)).max(MIN_HOLE_RADIUS_MM)
}

/// Maps a percentage position onto one axis of a bounding box.
///
/// `center + size * (percent - 50) / 50`, so 50 is the box center and
/// 0/100 are offset by a full box size in either direction.
///
/// # Example
///
/// ```rust
/// use config::constants::percent_offset;
///
/// assert_eq!(percent_offset(10.0, 20.0, 50.0), 10.0);
/// assert_eq!(percent_offset(0.0, 20.0, 75.0), 10.0);
/// ```
#[inline]
pub fn percent_offset(center: f64, size: f64, percent: f64) -> f64 {
    center + (size * (percent - 50.0)) / 50.0
}

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

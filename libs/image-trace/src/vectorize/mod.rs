//! # Vectorization
//!
//! Traces a binary image into closed outline loops.
//!
//! ## Algorithm
//!
//! - **Decomposition**: potrace-style boundary following on pixel corners,
//!   with interior inversion so nested holes and islands are found in turn
//! - **Speckle removal**: loops enclosing `turd_size` pixels or fewer are dropped
//! - **Curve optimization**: staircase smoothing followed by Douglas–Peucker
//!
//! Coordinates are in pixel units with the origin at the top-left corner of
//! the image and Y pointing down.

mod decompose;
mod simplify;

#[cfg(test)]
mod tests;

use config::constants::{OPT_TOLERANCE, TRACE_THRESHOLD, TURD_SIZE};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TraceError;
use crate::preprocess::{BinaryMask, PreparedInput};
use crate::raster::decode_gray_lenient;

pub use decompose::{decompose, RawPath};
pub use simplify::{douglas_peucker_closed, smooth_staircase};

/// Vectorizer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TraceParams {
    /// Pixels darker than this are traced
    pub threshold: u8,
    /// Loops enclosing at most this many pixels are dropped
    pub turd_size: u32,
    /// Smooth and simplify loops
    pub opt_curve: bool,
    /// Maximum deviation of a simplified loop, in pixels
    pub opt_tolerance: f64,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            threshold: TRACE_THRESHOLD,
            turd_size: TURD_SIZE,
            opt_curve: true,
            opt_tolerance: OPT_TOLERANCE,
        }
    }
}

impl TraceParams {
    /// Checks that the parameters are usable.
    pub fn validate(&self) -> Result<(), TraceError> {
        if self.threshold == 0 {
            return Err(TraceError::invalid_params(
                "threshold must be at least 1, otherwise nothing is traced",
            ));
        }
        if !self.opt_tolerance.is_finite() || self.opt_tolerance < 0.0 {
            return Err(TraceError::invalid_params(format!(
                "opt_tolerance must be a non-negative number: {}",
                self.opt_tolerance
            )));
        }
        Ok(())
    }
}

/// Whether a loop bounds a filled region or a hole inside one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathKind {
    /// Outer boundary of a foreground region
    Outer,
    /// Boundary of a background hole inside a region
    Hole,
}

/// One closed loop of a [`VectorPath`].
///
/// The last point connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct SubPath {
    points: Vec<DVec2>,
    kind: PathKind,
    area: u64,
}

impl SubPath {
    /// Creates a loop. Returns `None` for fewer than 3 points.
    pub fn new(points: Vec<DVec2>, kind: PathKind, area: u64) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }
        Some(Self { points, kind, area })
    }

    /// Loop vertices in pixel coordinates.
    #[inline]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Outer boundary or hole.
    #[inline]
    pub fn kind(&self) -> PathKind {
        self.kind
    }

    /// Number of pixels enclosed by the unsimplified boundary.
    #[inline]
    pub fn area(&self) -> u64 {
        self.area
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a sub-path has at least 3 points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Traced outlines of one image.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorPath {
    width: u32,
    height: u32,
    paths: Vec<SubPath>,
}

impl VectorPath {
    /// Creates a path collection for a document of the given size.
    pub fn new(width: u32, height: u32, paths: Vec<SubPath>) -> Self {
        Self {
            width,
            height,
            paths,
        }
    }

    /// Document size the paths were traced in, if known.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some((self.width, self.height))
        }
    }

    /// All loops in trace order.
    pub fn paths(&self) -> &[SubPath] {
        &self.paths
    }

    /// Outer boundaries only.
    pub fn outlines(&self) -> impl Iterator<Item = &SubPath> {
        self.paths.iter().filter(|p| p.kind == PathKind::Outer)
    }

    /// Number of loops.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True if nothing survived tracing.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Traces binary images into [`VectorPath`]s.
#[derive(Debug, Clone)]
pub struct Vectorizer {
    params: TraceParams,
}

impl Default for Vectorizer {
    fn default() -> Self {
        Self {
            params: TraceParams::default(),
        }
    }
}

impl Vectorizer {
    /// Creates a vectorizer after validating its parameters.
    pub fn new(params: TraceParams) -> Result<Self, TraceError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Active parameters.
    pub fn params(&self) -> &TraceParams {
        &self.params
    }

    /// Traces whatever the preprocessor produced.
    pub fn trace_input(&self, input: &PreparedInput<'_>) -> Result<VectorPath, TraceError> {
        match input {
            PreparedInput::Mask(prepared) => Ok(self.trace_mask(&prepared.mask)),
            PreparedInput::Raw { bytes, .. } => self.trace_bytes(bytes),
        }
    }

    /// Traces a preprocessor mask.
    ///
    /// The mask is rendered to black/white and thresholded again, so the
    /// configured threshold applies to every input path the same way.
    pub fn trace_mask(&self, mask: &BinaryMask) -> VectorPath {
        let gray = mask.to_gray_image();
        self.trace_bitmap(&BinaryMask::from_gray(&gray, self.params.threshold))
    }

    /// Decodes arbitrary image bytes and traces them by luminance alone.
    ///
    /// Used when preprocessing could not run; transparency is ignored and a
    /// truncated file is traced from the rows that could be decoded.
    pub fn trace_bytes(&self, bytes: &[u8]) -> Result<VectorPath, TraceError> {
        let gray = decode_gray_lenient(bytes)?;
        Ok(self.trace_bitmap(&BinaryMask::from_gray(&gray, self.params.threshold)))
    }

    fn trace_bitmap(&self, bitmap: &BinaryMask) -> VectorPath {
        let raw_paths = decompose(bitmap);
        let found = raw_paths.len();

        let paths: Vec<SubPath> = raw_paths
            .into_iter()
            .filter(|raw| raw.area > u64::from(self.params.turd_size))
            .filter_map(|raw| self.finish_path(raw))
            .collect();

        debug!(
            width = bitmap.width(),
            height = bitmap.height(),
            found,
            kept = paths.len(),
            "Image traced"
        );

        VectorPath::new(bitmap.width(), bitmap.height(), paths)
    }

    fn finish_path(&self, raw: RawPath) -> Option<SubPath> {
        let corners: Vec<DVec2> = raw
            .corners
            .iter()
            .map(|&(x, y)| DVec2::new(x as f64, y as f64))
            .collect();

        let points = if self.params.opt_curve {
            let simplified =
                douglas_peucker_closed(&smooth_staircase(&raw.corners), self.params.opt_tolerance);
            if simplified.len() >= 3 {
                simplified
            } else {
                corners
            }
        } else {
            corners
        };

        SubPath::new(points, raw.kind, raw.area)
    }
}

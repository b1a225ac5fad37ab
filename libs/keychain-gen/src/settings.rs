//! # Generator Settings
//!
//! Pipeline tuning that stays fixed across requests. Every default comes
//! from the `config` crate.

use config::constants::{DECORATION_DEPTH_RATIO, HOLE_SEGMENTS};
use image_trace::{PreprocessParams, TraceParams};
use serde::{Deserialize, Serialize};
use solid_mesh::export::StlFormat;

use crate::error::GenerateError;

/// Name written after `solid`/`endsolid` in ASCII output.
pub const DEFAULT_SOLID_NAME: &str = "exported";

/// Tuning for a [`Generator`](crate::Generator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorSettings {
    /// Binarization thresholds
    pub preprocess: PreprocessParams,
    /// Vectorizer parameters
    pub trace: TraceParams,
    /// Decoration depth as a fraction of the plate thickness
    pub decoration_depth_ratio: f64,
    /// Segments approximating the hole circle
    pub hole_segments: u32,
    /// Output flavor
    pub stl_format: StlFormat,
    /// ASCII solid name
    pub solid_name: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            preprocess: PreprocessParams::default(),
            trace: TraceParams::default(),
            decoration_depth_ratio: DECORATION_DEPTH_RATIO,
            hole_segments: HOLE_SEGMENTS,
            stl_format: StlFormat::Ascii,
            solid_name: DEFAULT_SOLID_NAME.to_string(),
        }
    }
}

impl GeneratorSettings {
    /// Checks that the settings can produce geometry.
    pub fn validate(&self) -> Result<(), GenerateError> {
        self.trace
            .validate()
            .map_err(|err| GenerateError::invalid_options(err.to_string()))?;

        if !self.decoration_depth_ratio.is_finite() || self.decoration_depth_ratio <= 0.0 {
            return Err(GenerateError::invalid_options(format!(
                "decorationDepthRatio must be greater than 0, got {}",
                self.decoration_depth_ratio
            )));
        }
        if self.hole_segments < 3 {
            return Err(GenerateError::invalid_options(format!(
                "holeSegments must be at least 3, got {}",
                self.hole_segments
            )));
        }
        if self.solid_name.contains(['\n', '\r']) {
            return Err(GenerateError::invalid_options(
                "solidName must be a single line",
            ));
        }
        Ok(())
    }
}

//! # Generation Options
//!
//! The user-facing parameter record. Field names are camelCase on the wire.
//!
//! ## Example
//!
//! ```rust
//! use keychain_gen::GenerationOptions;
//!
//! let options = GenerationOptions::from_json(r#"{"thickness": 4, "hasHole": true, "holeX": 50}"#).unwrap();
//! assert_eq!(options.hole_position(), (50.0, 50.0));
//! assert!(options.validate().is_ok());
//! ```

use config::constants::{DEFAULT_HOLE_PERCENT, DEFAULT_THICKNESS_MM};
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

/// Physical parameters for one generation run.
///
/// `text`, `text_height` and `font_style` are accepted for forward
/// compatibility but never turned into geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    /// Base plate thickness in millimeters
    pub thickness: f64,
    /// Cut a keychain hole
    #[serde(default)]
    pub has_hole: bool,
    /// Hole X position, percent of the model width (default 50)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hole_x: Option<f64>,
    /// Hole Y position, percent of the model depth (default 50)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hole_y: Option<f64>,
    /// Raised text (not realized)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Raised text height in millimeters (not realized)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_height: Option<f64>,
    /// Font name (not realized)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::new(DEFAULT_THICKNESS_MM)
    }
}

impl GenerationOptions {
    /// Options with the given thickness and no hole.
    pub fn new(thickness: f64) -> Self {
        Self {
            thickness,
            has_hole: false,
            hole_x: None,
            hole_y: None,
            text: None,
            text_height: None,
            font_style: None,
        }
    }

    /// Requests a hole at the given percentage position.
    pub fn with_hole(mut self, hole_x: f64, hole_y: f64) -> Self {
        self.has_hole = true;
        self.hole_x = Some(hole_x);
        self.hole_y = Some(hole_y);
        self
    }

    /// Parses options from JSON.
    pub fn from_json(json: &str) -> Result<Self, GenerateError> {
        serde_json::from_str(json)
            .map_err(|err| GenerateError::invalid_options(format!("malformed options: {err}")))
    }

    /// Hole position in percent, defaults applied.
    pub fn hole_position(&self) -> (f64, f64) {
        (
            self.hole_x.unwrap_or(DEFAULT_HOLE_PERCENT),
            self.hole_y.unwrap_or(DEFAULT_HOLE_PERCENT),
        )
    }

    /// Returns true if non-blank text was requested.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    /// Checks every field that affects geometry or is range-constrained.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if !self.thickness.is_finite() || self.thickness <= 0.0 {
            return Err(GenerateError::invalid_options(format!(
                "thickness must be greater than 0, got {}",
                self.thickness
            )));
        }

        for (name, value) in [("holeX", self.hole_x), ("holeY", self.hole_y)] {
            if let Some(pct) = value {
                if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
                    return Err(GenerateError::invalid_options(format!(
                        "{name} must be between 0 and 100, got {pct}"
                    )));
                }
            }
        }

        if let Some(height) = self.text_height {
            if !height.is_finite() || height < 0.0 {
                return Err(GenerateError::invalid_options(format!(
                    "textHeight must not be negative, got {height}"
                )));
            }
        }

        Ok(())
    }
}

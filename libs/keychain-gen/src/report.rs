//! # Generation Report
//!
//! What a successful run produced, plus the recoverable problems it absorbed.

use std::fmt;

use serde::Serialize;
use solid_mesh::CarveStats;

/// A recoverable condition met during generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GenerationNote {
    /// The image could not be preprocessed; the raw bytes were traced
    DegradedInput { reason: String },
    /// One shape failed to extrude and was left out
    ShapeSkipped { shape: String, reason: String },
    /// The hole was not cut; the mesh is returned uncarved
    HoleCarveSkipped { reason: String },
    /// Text was requested but is not realized as geometry
    TextIgnored,
}

impl fmt::Display for GenerationNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegradedInput { reason } => {
                write!(f, "Image preprocessing failed, traced original image: {reason}")
            }
            Self::ShapeSkipped { shape, reason } => write!(f, "Skipped {shape}: {reason}"),
            Self::HoleCarveSkipped { reason } => write!(f, "Hole not created: {reason}"),
            Self::TextIgnored => write!(f, "Text is not supported yet and was ignored"),
        }
    }
}

/// Summary of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    /// Source size used for scaling, in pixels
    pub image_size: [u32; 2],
    /// Base plate footprint in millimeters
    pub plate_size: [f64; 2],
    /// Loops found by the vectorizer, holes included
    pub traced_paths: usize,
    /// Decorations that made it into the mesh
    pub decorations: usize,
    /// Triangles of the base plate
    pub base_triangles: usize,
    /// Triangles of all decorations together
    pub decoration_triangles: usize,
    /// Hole carve counts, when a hole was cut
    pub hole: Option<CarveStats>,
    /// Triangles in the final mesh
    pub triangle_count: usize,
    /// Recoverable problems, in the order they happened
    pub notes: Vec<GenerationNote>,
}

impl GenerationReport {
    /// Returns true if any note is present.
    pub fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_serializes_with_kind_tag() {
        let note = GenerationNote::HoleCarveSkipped {
            reason: "mesh is empty".into(),
        };
        let json = serde_json::to_string(&note).unwrap();
        assert_eq!(json, r#"{"kind":"holeCarveSkipped","reason":"mesh is empty"}"#);
        assert_eq!(
            serde_json::to_string(&GenerationNote::TextIgnored).unwrap(),
            r#"{"kind":"textIgnored"}"#
        );
    }

    #[test]
    fn test_note_display() {
        let note = GenerationNote::ShapeSkipped {
            shape: "outline 2".into(),
            reason: "Shape encloses no area".into(),
        };
        assert_eq!(note.to_string(), "Skipped outline 2: Shape encloses no area");
    }

    #[test]
    fn test_empty_report() {
        let report = GenerationReport::default();
        assert!(!report.has_notes());
        assert!(report.hole.is_none());
    }
}

//! # Generation Pipeline
//!
//! Runs the stages in order:
//!
//! ```text
//! validate → prepare → trace → base plate ─┐
//!                            → decorations ─┴→ merge → carve hole → STL
//! ```
//!
//! Stage failures that leave a usable model behind become
//! [`GenerationNote`]s; everything else aborts with a [`GenerateError`].

mod placement;

pub use placement::Placement;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use config::constants::{plate_dimensions, DEFAULT_IMAGE_SIZE};
use glam::{DVec2, DVec3};
use image_trace::{prepare, PreparedInput, VectorPath, Vectorizer};
use rayon::prelude::*;
use solid_mesh::export::to_stl;
use solid_mesh::{
    carve_hole, linear_extrude, merge_meshes, CarveOutcome, HoleSpec, LinearExtrudeParams, Mesh,
    MeshError, Shape2D,
};
use tracing::{debug, info, warn};

use crate::error::GenerateError;
use crate::options::GenerationOptions;
use crate::report::{GenerationNote, GenerationReport};
use crate::settings::GeneratorSettings;

/// Cooperative cancellation flag, checked between stages.
pub type CancelFlag = Arc<AtomicBool>;

/// Everything a successful run produces.
#[derive(Debug, Clone)]
pub struct GeneratedModel {
    /// Serialized STL
    pub stl: Vec<u8>,
    /// Final mesh, for previews
    pub mesh: Mesh,
    /// Counts and notes
    pub report: GenerationReport,
}

/// Image-to-solid generator.
///
/// Holds validated settings; one instance can serve any number of requests
/// and is safe to share between threads.
#[derive(Debug, Clone)]
pub struct Generator {
    settings: GeneratorSettings,
    vectorizer: Vectorizer,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            settings: GeneratorSettings::default(),
            vectorizer: Vectorizer::default(),
        }
    }
}

impl Generator {
    /// Creates a generator after validating its settings.
    pub fn new(settings: GeneratorSettings) -> Result<Self, GenerateError> {
        settings.validate()?;
        let vectorizer = Vectorizer::new(settings.trace)
            .map_err(|err| GenerateError::invalid_options(err.to_string()))?;
        Ok(Self {
            settings,
            vectorizer,
        })
    }

    /// Active settings.
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Turns image bytes into an STL solid.
    ///
    /// # Errors
    ///
    /// See [`GenerateError`]. Recoverable problems are reported in
    /// [`GenerationReport::notes`] instead.
    pub fn generate(
        &self,
        image: &[u8],
        options: &GenerationOptions,
    ) -> Result<GeneratedModel, GenerateError> {
        self.run(image, options, None)
    }

    /// Like [`generate`](Self::generate), but stops with
    /// [`GenerateError::Cancelled`] once `cancel` is set.
    pub fn generate_with_cancel(
        &self,
        image: &[u8],
        options: &GenerationOptions,
        cancel: &CancelFlag,
    ) -> Result<GeneratedModel, GenerateError> {
        self.run(image, options, Some(cancel))
    }

    fn run(
        &self,
        image: &[u8],
        options: &GenerationOptions,
        cancel: Option<&CancelFlag>,
    ) -> Result<GeneratedModel, GenerateError> {
        let check = |stage: &'static str| match cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(GenerateError::Cancelled { stage }),
            _ => Ok(()),
        };

        options.validate()?;
        if image.is_empty() {
            return Err(GenerateError::EmptyImage);
        }

        let mut report = GenerationReport::default();
        if options.has_text() {
            info!("Text requested but not supported, ignoring");
            report.notes.push(GenerationNote::TextIgnored);
        }

        // Preprocess
        check("preprocess")?;
        let prepared = prepare(image, &self.settings.preprocess);
        if let PreparedInput::Raw { reason, .. } = &prepared {
            warn!(%reason, "Tracing original image");
            report.notes.push(GenerationNote::DegradedInput {
                reason: reason.clone(),
            });
        }

        // Vectorize
        check("vectorize")?;
        let paths = self.vectorizer.trace_input(&prepared)?;
        report.traced_paths = paths.len();

        let image_size = source_size(&paths, &prepared);
        let (plate_width, plate_height) =
            plate_dimensions(f64::from(image_size.0), f64::from(image_size.1));
        report.image_size = [image_size.0, image_size.1];
        report.plate_size = [plate_width, plate_height];
        debug!(?image_size, plate_width, plate_height, "Plate sized");

        // Extrude
        check("extrude")?;
        let thickness = options.thickness;
        let mut parts = Vec::new();

        let plate = Shape2D::rectangle(DVec2::new(plate_width, plate_height), true);
        match linear_extrude(
            &plate,
            &LinearExtrudeParams {
                height: thickness,
                center: true,
            },
        ) {
            Ok(mesh) => {
                report.base_triangles = mesh.triangle_count();
                parts.push(mesh);
            }
            Err(err) => {
                warn!(error = %err, "Base plate extrusion failed");
                report.notes.push(GenerationNote::ShapeSkipped {
                    shape: "base plate".to_string(),
                    reason: err.to_string(),
                });
            }
        }

        let placement = Placement::new(image_size, plate_width);
        let decoration_params = LinearExtrudeParams {
            height: thickness * self.settings.decoration_depth_ratio,
            center: false,
        };
        let lift = DVec3::new(0.0, 0.0, thickness / 2.0);

        let shapes: Vec<Shape2D> = paths.outlines().map(|path| placement.shape(path)).collect();
        let (decorations, skipped) = extrude_decorations(&shapes, &decoration_params, lift);
        report.decorations = decorations.len();
        report.decoration_triangles = decorations.iter().map(Mesh::triangle_count).sum();
        report.notes.extend(skipped);
        parts.extend(decorations);

        if parts.is_empty() {
            return Err(GenerateError::EmptyGeometry);
        }

        // Merge
        check("merge")?;
        let mut mesh = merge_meshes(&parts);
        debug!(
            parts = parts.len(),
            triangles = mesh.triangle_count(),
            "Parts merged"
        );

        // Hole
        if options.has_hole {
            check("hole")?;
            let (hole_x, hole_y) = options.hole_position();
            let spec = HoleSpec {
                segments: self.settings.hole_segments,
                ..HoleSpec::from_percent(&mesh, hole_x, hole_y)
            };
            mesh = match carve_hole(mesh, &spec) {
                CarveOutcome::Carved { mesh, stats } => {
                    report.hole = Some(stats);
                    mesh
                }
                CarveOutcome::Skipped { mesh, reason } => {
                    warn!(%reason, "Hole carve skipped");
                    report.notes.push(GenerationNote::HoleCarveSkipped {
                        reason: reason.to_string(),
                    });
                    mesh
                }
            };
        }

        // Export
        check("export")?;
        let stl = to_stl(&mesh, self.settings.stl_format, &self.settings.solid_name)?;
        report.triangle_count = mesh.triangle_count();

        info!(
            triangles = report.triangle_count,
            decorations = report.decorations,
            hole = report.hole.is_some(),
            notes = report.notes.len(),
            bytes = stl.len(),
            "Model generated"
        );

        Ok(GeneratedModel { stl, mesh, report })
    }
}

/// Extrudes decoration outlines in parallel and lifts them onto the plate.
///
/// Output order follows `shapes`. A shape that fails to extrude is left out
/// and reported as a [`GenerationNote::ShapeSkipped`] named by its index.
fn extrude_decorations(
    shapes: &[Shape2D],
    params: &LinearExtrudeParams,
    lift: DVec3,
) -> (Vec<Mesh>, Vec<GenerationNote>) {
    let results: Vec<Result<Mesh, MeshError>> = shapes
        .par_iter()
        .map(|shape| {
            let mut mesh = linear_extrude(shape, params)?;
            mesh.translate(lift);
            Ok(mesh)
        })
        .collect();

    let mut meshes = Vec::with_capacity(results.len());
    let mut skipped = Vec::new();
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(mesh) => meshes.push(mesh),
            Err(err) => {
                warn!(outline = index, error = %err, "Decoration extrusion failed");
                skipped.push(GenerationNote::ShapeSkipped {
                    shape: format!("outline {index}"),
                    reason: err.to_string(),
                });
            }
        }
    }
    (meshes, skipped)
}

/// Source size used for scaling: traced document, then decoded image,
/// then a square fallback.
fn source_size(paths: &VectorPath, prepared: &PreparedInput<'_>) -> (u32, u32) {
    paths
        .dimensions()
        .or_else(|| prepared.dimensions())
        .unwrap_or((DEFAULT_IMAGE_SIZE, DEFAULT_IMAGE_SIZE))
}

/// Generates with default settings.
///
/// # Example
///
/// ```rust
/// use image::{ImageFormat, Rgba, RgbaImage};
/// use keychain_gen::{generate, GenerationOptions};
/// use std::io::Cursor;
///
/// let mut png = Vec::new();
/// RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]))
///     .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
///     .unwrap();
///
/// let model = generate(&png, &GenerationOptions::new(3.0)).unwrap();
/// assert_eq!(model.mesh.triangle_count(), 12);
/// assert!(model.stl.starts_with(b"solid exported"));
/// ```
pub fn generate(image: &[u8], options: &GenerationOptions) -> Result<GeneratedModel, GenerateError> {
    Generator::default().generate(image, options)
}

#[cfg(test)]
mod tests;

//! Pixel space to plate space mapping.

use glam::DVec2;
use image_trace::SubPath;
use solid_mesh::Shape2D;

/// Maps traced pixel coordinates onto the base plate.
///
/// The image center lands on the plate center and the image Y axis (down)
/// is flipped to the model Y axis (up). One uniform scale keeps the aspect
/// ratio, which `plate_dimensions` already preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    half_size: DVec2,
    scale: f64,
}

impl Placement {
    /// Creates a mapping for an image of `image_size` pixels onto a plate
    /// `plate_width` millimeters wide.
    pub fn new(image_size: (u32, u32), plate_width: f64) -> Self {
        let width = f64::from(image_size.0.max(1));
        let height = f64::from(image_size.1.max(1));
        Self {
            half_size: DVec2::new(width, height) / 2.0,
            scale: plate_width / width,
        }
    }

    /// Millimeters per pixel.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Maps one pixel-space point.
    #[inline]
    pub fn to_plate(&self, point: DVec2) -> DVec2 {
        DVec2::new(
            (point.x - self.half_size.x) * self.scale,
            (self.half_size.y - point.y) * self.scale,
        )
    }

    /// Maps a traced loop into a plate-space shape.
    pub fn shape(&self, path: &SubPath) -> Shape2D {
        Shape2D::new(path.points().iter().map(|&p| self.to_plate(p)).collect())
    }
}

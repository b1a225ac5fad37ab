//! # Extrusion Operations
//!
//! Turns closed 2D outlines into straight prisms along the Z axis.
//!
//! Only outer loops are extruded. Disjoint regions are separate shapes,
//! and inner loops (holes in a region) are not represented.

mod linear;


pub use linear::{linear_extrude, LinearExtrudeParams};

use config::constants::EPSILON;
use glam::DVec2;

/// A closed planar region bounded by one outer loop.
///
/// The last vertex connects back to the first. Either winding is accepted;
/// the extruder normalizes to counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape2D {
    /// Outer boundary vertices
    pub outer: Vec<DVec2>,
}

impl Shape2D {
    /// Creates a shape from its outer boundary.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec2;
    /// use solid_mesh::Shape2D;
    ///
    /// let triangle = Shape2D::new(vec![DVec2::ZERO, DVec2::X, DVec2::Y]);
    /// assert_eq!(triangle.vertex_count(), 3);
    /// ```
    pub fn new(outer: Vec<DVec2>) -> Self {
        Self { outer }
    }

    /// Creates an axis-aligned rectangle.
    ///
    /// # Arguments
    ///
    /// * `size` - Width and height
    /// * `center` - If true, center at origin
    pub fn rectangle(size: DVec2, center: bool) -> Self {
        let (x, y) = if center {
            (-size.x / 2.0, -size.y / 2.0)
        } else {
            (0.0, 0.0)
        };

        Self::new(vec![
            DVec2::new(x, y),
            DVec2::new(x + size.x, y),
            DVec2::new(x + size.x, y + size.y),
            DVec2::new(x, y + size.y),
        ])
    }

    /// Creates a regular polygon approximating a circle at the origin.
    pub fn circle(radius: f64, segments: u32) -> Self {
        let vertices = (0..segments)
            .map(|i| {
                let angle = std::f64::consts::TAU * f64::from(i) / f64::from(segments);
                DVec2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Self::new(vertices)
    }

    /// Returns the number of vertices in the outer boundary.
    pub fn vertex_count(&self) -> usize {
        self.outer.len()
    }

    /// Signed shoelace area; positive for counter-clockwise loops.
    pub fn signed_area(&self) -> f64 {
        let n = self.outer.len();
        (0..n)
            .map(|i| self.outer[i].perp_dot(self.outer[(i + 1) % n]))
            .sum::<f64>()
            / 2.0
    }

    /// Returns true if the loop winds counter-clockwise.
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Translates the shape by the given offset.
    pub fn translate(&mut self, offset: DVec2) {
        for vertex in &mut self.outer {
            *vertex += offset;
        }
    }

    /// Copy with repeated points removed, including a closing duplicate.
    pub fn deduplicated(&self) -> Self {
        let mut outer: Vec<DVec2> = Vec::with_capacity(self.outer.len());
        for &p in &self.outer {
            if outer.last().map_or(true, |last| last.distance(p) > EPSILON) {
                outer.push(p);
            }
        }
        while outer.len() > 1 && outer[0].distance(outer[outer.len() - 1]) <= EPSILON {
            outer.pop();
        }
        Self::new(outer)
    }

    /// Copy wound counter-clockwise.
    pub fn to_ccw(&self) -> Self {
        if self.signed_area() < 0.0 {
            Self::new(self.outer.iter().rev().copied().collect())
        } else {
            self.clone()
        }
    }
}

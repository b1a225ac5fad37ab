//! # Linear Extrusion
//!
//! Extrudes a 2D outline along the Z axis into a straight prism.
//!
//! Each face group owns its vertices, so normals are flat:
//! - bottom cap: `-Z`, top cap: `+Z`
//! - walls: outward edge normal in the XY plane
//!
//! Caps are triangulated with earcut, so concave outlines are supported.
//! UVs are world-space: caps use `(x, y)`, walls use the dominant horizontal
//! axis and `z`.

use super::Shape2D;
use crate::error::MeshError;
use crate::mesh::Mesh;
use config::constants::DEGENERATE_AREA_EPSILON;
use glam::{DVec2, DVec3};

/// Parameters for linear extrusion.
#[derive(Debug, Clone)]
pub struct LinearExtrudeParams {
    /// Extrusion height along Z axis
    pub height: f64,
    /// Center the extrusion around Z=0
    pub center: bool,
}

impl Default for LinearExtrudeParams {
    fn default() -> Self {
        Self {
            height: 1.0,
            center: false,
        }
    }
}

/// Triangulates a counter-clockwise outline; every triangle comes back CCW.
fn triangulate_cap(outer: &[DVec2]) -> Result<Vec<[u32; 3]>, MeshError> {
    let coords: Vec<f64> = outer.iter().flat_map(|p| [p.x, p.y]).collect();
    let indices = earcutr::earcut(&coords, &[], 2)
        .map_err(|err| MeshError::degenerate(format!("Cap triangulation failed: {err:?}")))?;

    if indices.is_empty() {
        return Err(MeshError::degenerate("Cap triangulation produced no triangles"));
    }

    Ok(indices
        .chunks_exact(3)
        .map(|tri| {
            let (a, b, c) = (tri[0], tri[1], tri[2]);
            let turn = (outer[b] - outer[a]).perp_dot(outer[c] - outer[a]);
            if turn < 0.0 {
                [a as u32, c as u32, b as u32]
            } else {
                [a as u32, b as u32, c as u32]
            }
        })
        .collect())
}

/// Extrudes a 2D shape along the Z axis.
///
/// Without `center` the prism spans `z ∈ [0, height]`.
///
/// # Errors
///
/// Returns [`MeshError::DegenerateGeometry`] if the height is not positive,
/// the outline has fewer than 3 distinct vertices, encloses no area, or
/// cannot be triangulated.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use solid_mesh::ops::extrude::{linear_extrude, LinearExtrudeParams, Shape2D};
///
/// let square = Shape2D::rectangle(DVec2::splat(10.0), false);
/// let params = LinearExtrudeParams { height: 2.0, ..Default::default() };
/// let mesh = linear_extrude(&square, &params).unwrap();
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn linear_extrude(shape: &Shape2D, params: &LinearExtrudeParams) -> Result<Mesh, MeshError> {
    if !params.height.is_finite() || params.height <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "Extrusion height must be positive, got {}",
            params.height
        )));
    }

    let shape = shape.deduplicated();
    if shape.vertex_count() < 3 {
        return Err(MeshError::degenerate("Shape must have at least 3 distinct vertices"));
    }
    if shape.signed_area().abs() < DEGENERATE_AREA_EPSILON {
        return Err(MeshError::degenerate("Shape encloses no area"));
    }

    let shape = shape.to_ccw();
    let outer = &shape.outer;
    let n = outer.len();
    let cap = triangulate_cap(outer)?;

    let z0 = if params.center { -params.height / 2.0 } else { 0.0 };
    let z1 = z0 + params.height;

    let vertex_count = 2 * n + 4 * n;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);
    let mut triangles = Vec::with_capacity(2 * cap.len() + 2 * n);

    // Bottom cap
    for p in outer {
        positions.push(p.extend(z0));
        normals.push(-DVec3::Z);
        uvs.push(*p);
    }
    triangles.extend(cap.iter().map(|&[a, b, c]| [a, c, b]));

    // Top cap
    let top = n as u32;
    for p in outer {
        positions.push(p.extend(z1));
        normals.push(DVec3::Z);
        uvs.push(*p);
    }
    triangles.extend(cap.iter().map(|&[a, b, c]| [top + a, top + b, top + c]));

    // Walls, one quad per edge
    for i in 0..n {
        let p0 = outer[i];
        let p1 = outer[(i + 1) % n];
        let edge = p1 - p0;
        let normal = DVec3::new(edge.y, -edge.x, 0.0).normalize_or_zero();

        let uv = |p: DVec2, z: f64| {
            if normal.x.abs() > normal.y.abs() {
                DVec2::new(p.y, z)
            } else {
                DVec2::new(p.x, z)
            }
        };

        let base = positions.len() as u32;
        for (p, z) in [(p0, z0), (p1, z0), (p1, z1), (p0, z1)] {
            positions.push(p.extend(z));
            normals.push(normal);
            uvs.push(uv(p, z));
        }
        triangles.push([base, base + 1, base + 2]);
        triangles.push([base, base + 2, base + 3]);
    }

    Mesh::from_parts(positions, triangles, Some(normals), Some(uvs))
}

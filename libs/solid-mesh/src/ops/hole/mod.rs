//! # Hole Carving
//!
//! Cuts a vertical cylindrical through-hole into a mesh by carve-and-stitch:
//!
//! 1. **Filter vertices**: drop every vertex within the hole radius (XY),
//!    recording a dense `old index → Option<new index>` table
//! 2. **Perimeter rings**: two rings of points on the hole circle, at the
//!    mesh's max Z and min Z
//! 3. **Filter triangles**: keep triangles whose three vertices all survived
//! 4. **Stitch**: two wall triangles per ring segment
//! 5. **Assemble** the new buffers
//!
//! Triangles straddling the hole boundary are dropped rather than clipped,
//! so the seam between the wall and the original surface is approximate.
//! This is not a boolean difference.


use std::fmt;

use config::constants::{hole_radius, percent_offset, HOLE_SEGMENTS};
use glam::{DVec2, DVec3};
use serde::Serialize;
use tracing::debug;

use crate::mesh::Mesh;

/// Where and how large to cut the hole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoleSpec {
    /// Hole axis position in the XY plane
    pub center: DVec2,
    /// Hole radius in millimeters
    pub radius: f64,
    /// Number of segments approximating the circle
    pub segments: u32,
}

impl HoleSpec {
    /// Creates a hole with the default tessellation.
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self {
            center,
            radius,
            segments: HOLE_SEGMENTS,
        }
    }

    /// Places a hole by percentage position within the mesh bounding box.
    ///
    /// The radius scales with the smaller horizontal extent and never drops
    /// below the printable minimum.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec2;
    /// use solid_mesh::{linear_extrude, HoleSpec, LinearExtrudeParams, Shape2D};
    ///
    /// let plate = Shape2D::rectangle(DVec2::new(50.0, 25.0), true);
    /// let mesh = linear_extrude(&plate, &LinearExtrudeParams::default()).unwrap();
    /// let spec = HoleSpec::from_percent(&mesh, 50.0, 50.0);
    /// assert_eq!(spec.center, DVec2::ZERO);
    /// assert!((spec.radius - 2.0).abs() < 1e-12);
    /// ```
    pub fn from_percent(mesh: &Mesh, hole_x: f64, hole_y: f64) -> Self {
        let (min, max) = mesh.bounding_box();
        let size = max - min;
        Self::new(hole_center(min, max, hole_x, hole_y), hole_radius(size.x, size.y))
    }
}

/// Maps percentage positions onto a bounding box.
///
/// `center + size * (pct - 50) / 50` per axis, so 50/50 is exactly the box
/// center.
pub fn hole_center(min: DVec3, max: DVec3, hole_x: f64, hole_y: f64) -> DVec2 {
    let center = (min + max) / 2.0;
    let size = max - min;
    DVec2::new(
        percent_offset(center.x, size.x, hole_x),
        percent_offset(center.y, size.y, hole_y),
    )
}

/// Counts describing one carve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarveStats {
    /// Original vertices outside the hole
    pub kept_vertices: usize,
    /// Original vertices inside the hole
    pub removed_vertices: usize,
    /// Original triangles with every vertex outside the hole
    pub kept_triangles: usize,
    /// Original triangles touching the hole
    pub removed_triangles: usize,
    /// Triangles added for the hole wall
    pub wall_triangles: usize,
}

/// Why a carve left the mesh untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The mesh has no vertices
    EmptyMesh,
    /// Radius not positive or fewer than 3 segments
    InvalidHole,
    /// The result would have fewer than 3 vertices or indices
    InsufficientGeometry,
    /// The input or assembled mesh failed validation
    InvalidMesh(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMesh => write!(f, "mesh is empty"),
            Self::InvalidHole => write!(f, "hole radius or segment count is invalid"),
            Self::InsufficientGeometry => write!(f, "carving would leave too little geometry"),
            Self::InvalidMesh(message) => write!(f, "mesh is invalid: {message}"),
        }
    }
}

/// Result of [`carve_hole`].
#[derive(Debug, Clone)]
pub enum CarveOutcome {
    /// The hole was cut
    Carved { mesh: Mesh, stats: CarveStats },
    /// The original mesh, unchanged
    Skipped { mesh: Mesh, reason: SkipReason },
}

impl CarveOutcome {
    /// Returns true if the hole was cut.
    pub fn is_carved(&self) -> bool {
        matches!(self, Self::Carved { .. })
    }

    /// The resulting mesh, carved or not.
    pub fn mesh(&self) -> &Mesh {
        match self {
            Self::Carved { mesh, .. } | Self::Skipped { mesh, .. } => mesh,
        }
    }

    /// Consumes the outcome, returning the mesh.
    pub fn into_mesh(self) -> Mesh {
        match self {
            Self::Carved { mesh, .. } | Self::Skipped { mesh, .. } => mesh,
        }
    }

    /// Carve counts, if the hole was cut.
    pub fn stats(&self) -> Option<&CarveStats> {
        match self {
            Self::Carved { stats, .. } => Some(stats),
            Self::Skipped { .. } => None,
        }
    }
}

/// Dense old → new vertex index table.
struct VertexRemap {
    table: Vec<Option<u32>>,
    survivors: Vec<u32>,
}

impl VertexRemap {
    #[inline]
    fn get(&self, old: u32) -> Option<u32> {
        self.table[old as usize]
    }
}

fn filter_vertices(positions: &[DVec3], center: DVec2, radius: f64) -> VertexRemap {
    let radius_sq = radius * radius;
    let mut table = Vec::with_capacity(positions.len());
    let mut survivors = Vec::new();

    for (old, p) in positions.iter().enumerate() {
        if p.truncate().distance_squared(center) > radius_sq {
            table.push(Some(survivors.len() as u32));
            survivors.push(old as u32);
        } else {
            table.push(None);
        }
    }

    VertexRemap { table, survivors }
}

fn filter_triangles(triangles: &[[u32; 3]], remap: &VertexRemap) -> Vec<[u32; 3]> {
    triangles
        .iter()
        .filter_map(|&[a, b, c]| {
            let (a, b, c) = (remap.get(a)?, remap.get(b)?, remap.get(c)?);
            (a != b && b != c && a != c).then_some([a, b, c])
        })
        .collect()
}

/// Top ring followed by bottom ring.
struct PerimeterRings {
    positions: Vec<DVec3>,
    normals: Vec<DVec3>,
    uvs: Vec<DVec2>,
}

fn perimeter_rings(spec: &HoleSpec, z_top: f64, z_bottom: f64) -> PerimeterRings {
    let n = spec.segments as usize;
    let mut rings = PerimeterRings {
        positions: Vec::with_capacity(2 * n),
        normals: Vec::with_capacity(2 * n),
        uvs: Vec::with_capacity(2 * n),
    };

    for z in [z_top, z_bottom] {
        for i in 0..spec.segments {
            let angle = std::f64::consts::TAU * f64::from(i) / f64::from(spec.segments);
            let radial = DVec2::new(angle.cos(), angle.sin());
            rings.positions.push((spec.center + radial * spec.radius).extend(z));
            rings.normals.push(radial.extend(0.0));
            rings.uvs.push(DVec2::splat(0.5) + radial * 0.5);
        }
    }

    rings
}

/// Wall triangles between the rings starting at vertex `base`.
///
/// The winding faces the hole axis, which is the outside of the material.
fn wall_triangles(base: u32, segments: u32) -> Vec<[u32; 3]> {
    let top = |i: u32| base + i % segments;
    let bottom = |i: u32| base + segments + i % segments;

    (0..segments)
        .flat_map(|i| {
            [
                [top(i), top(i + 1), bottom(i)],
                [top(i + 1), bottom(i + 1), bottom(i)],
            ]
        })
        .collect()
}

/// Cuts a through-hole and stitches its wall.
///
/// Never fails: when carving is impossible or would leave too little
/// geometry, the original mesh comes back as [`CarveOutcome::Skipped`].
///
/// Carving an already carved mesh again keeps every vertex off the circle.
/// Points of the earlier wall sit on the circle itself, so rounding decides
/// whether each is kept or dropped along with its wall triangles.
pub fn carve_hole(mesh: Mesh, spec: &HoleSpec) -> CarveOutcome {
    if mesh.is_empty() {
        return CarveOutcome::Skipped {
            mesh,
            reason: SkipReason::EmptyMesh,
        };
    }
    if spec.segments < 3 || !spec.radius.is_finite() || spec.radius <= 0.0 {
        return CarveOutcome::Skipped {
            mesh,
            reason: SkipReason::InvalidHole,
        };
    }
    if let Err(err) = mesh.validate() {
        return CarveOutcome::Skipped {
            mesh,
            reason: SkipReason::InvalidMesh(err.to_string()),
        };
    }

    let (min, max) = mesh.bounding_box();

    // Phase 1: vertices
    let remap = filter_vertices(mesh.positions(), spec.center, spec.radius);

    // Phase 2: triangles and wall
    let kept_triangles = filter_triangles(mesh.triangles(), &remap);
    let rings = perimeter_rings(spec, max.z, min.z);
    let walls = wall_triangles(remap.survivors.len() as u32, spec.segments);

    let vertex_count = remap.survivors.len() + rings.positions.len();
    let index_count = 3 * (kept_triangles.len() + walls.len());
    if vertex_count < 3 || index_count < 3 {
        return CarveOutcome::Skipped {
            mesh,
            reason: SkipReason::InsufficientGeometry,
        };
    }

    let stats = CarveStats {
        kept_vertices: remap.survivors.len(),
        removed_vertices: mesh.vertex_count() - remap.survivors.len(),
        kept_triangles: kept_triangles.len(),
        removed_triangles: mesh.triangle_count() - kept_triangles.len(),
        wall_triangles: walls.len(),
    };

    // Phase 3: assemble
    let carried = |old: &u32| mesh.vertex(*old);
    let mut positions: Vec<DVec3> = remap.survivors.iter().map(carried).collect();
    positions.extend_from_slice(&rings.positions);

    let mut triangles = kept_triangles;
    triangles.extend(walls);

    let normals = mesh.normals().map(|normals| {
        let mut out: Vec<DVec3> = remap.survivors.iter().map(|&old| normals[old as usize]).collect();
        out.extend_from_slice(&rings.normals);
        out
    });
    let uvs = mesh.uvs().map(|uvs| {
        let mut out: Vec<DVec2> = remap.survivors.iter().map(|&old| uvs[old as usize]).collect();
        out.extend_from_slice(&rings.uvs);
        out
    });
    let recompute = normals.is_none();

    let mut carved = match Mesh::from_parts(positions, triangles, normals, uvs) {
        Ok(carved) => carved,
        Err(err) => {
            return CarveOutcome::Skipped {
                mesh,
                reason: SkipReason::InvalidMesh(err.to_string()),
            }
        }
    };

    if recompute {
        carved.compute_normals();
        let mut normals = carved.normals().map(<[DVec3]>::to_vec).unwrap_or_default();
        let ring_start = remap.survivors.len();
        normals[ring_start..].copy_from_slice(&rings.normals);
        if let Err(err) = carved.set_normals(normals) {
            return CarveOutcome::Skipped {
                mesh,
                reason: SkipReason::InvalidMesh(err.to_string()),
            };
        }
    }

    debug!(
        center_x = spec.center.x,
        center_y = spec.center.y,
        radius = spec.radius,
        kept_vertices = stats.kept_vertices,
        removed_vertices = stats.removed_vertices,
        removed_triangles = stats.removed_triangles,
        wall_triangles = stats.wall_triangles,
        "Hole carved"
    );

    CarveOutcome::Carved {
        mesh: carved,
        stats,
    }
}

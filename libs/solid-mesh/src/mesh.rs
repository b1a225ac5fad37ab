//! # Mesh Data Structure
//!
//! Indexed triangle mesh with optional per-vertex normals and UVs.

use config::constants::{DEGENERATE_AREA_EPSILON, MAX_TRIANGLES};
use glam::{DVec2, DVec3};

use crate::error::MeshError;

/// A triangle mesh with positions, indices and optional attributes.
///
/// All geometry uses f64 in millimeters. Conversion to f32 only happens at
/// the export and WASM boundaries.
///
/// Triangles wind counter-clockwise when seen from outside, so the right-hand
/// normal of every triangle points away from the solid.
///
/// # Example
///
/// ```rust
/// use solid_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// assert_eq!(mesh.face_normal(0), DVec3::Z);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    /// Vertex positions
    positions: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
    /// Optional vertex normals
    normals: Option<Vec<DVec3>>,
    /// Optional texture coordinates
    uvs: Option<Vec<DVec2>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            normals: None,
            uvs: None,
        }
    }

    /// Builds a mesh from complete buffers and validates it.
    pub fn from_parts(
        positions: Vec<DVec3>,
        triangles: Vec<[u32; 3]>,
        normals: Option<Vec<DVec3>>,
        uvs: Option<Vec<DVec2>>,
    ) -> Result<Self, MeshError> {
        let mesh = Self {
            positions,
            triangles,
            normals,
            uvs,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the length of the flattened index buffer.
    #[inline]
    pub fn index_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Adds a vertex and returns its index.
    ///
    /// Attribute buffers are dropped, since they would no longer line up.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals = None;
        self.uvs = None;
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Vertex positions.
    #[inline]
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Triangle indices.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.positions[index as usize]
    }

    /// Returns the triangle at the given index.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        self.triangles[index]
    }

    /// Corner positions of a triangle.
    #[inline]
    pub fn triangle_positions(&self, index: usize) -> [DVec3; 3] {
        let [a, b, c] = self.triangles[index];
        [self.vertex(a), self.vertex(b), self.vertex(c)]
    }

    /// Sets vertex normals. The buffer must have one entry per vertex.
    pub fn set_normals(&mut self, normals: Vec<DVec3>) -> Result<(), MeshError> {
        if normals.len() != self.positions.len() {
            return Err(MeshError::invalid_topology(format!(
                "{} normals for {} vertices",
                normals.len(),
                self.positions.len()
            )));
        }
        self.normals = Some(normals);
        Ok(())
    }

    /// Returns the vertex normals.
    pub fn normals(&self) -> Option<&[DVec3]> {
        self.normals.as_deref()
    }

    /// Sets texture coordinates. The buffer must have one entry per vertex.
    pub fn set_uvs(&mut self, uvs: Vec<DVec2>) -> Result<(), MeshError> {
        if uvs.len() != self.positions.len() {
            return Err(MeshError::invalid_topology(format!(
                "{} UVs for {} vertices",
                uvs.len(),
                self.positions.len()
            )));
        }
        self.uvs = Some(uvs);
        Ok(())
    }

    /// Returns the texture coordinates.
    pub fn uvs(&self) -> Option<&[DVec2]> {
        self.uvs.as_deref()
    }

    /// Unit normal of a triangle from its winding.
    ///
    /// Degenerate triangles yield the zero vector.
    pub fn face_normal(&self, index: usize) -> DVec3 {
        let [v0, v1, v2] = self.triangle_positions(index);
        (v1 - v0).cross(v2 - v0).normalize_or_zero()
    }

    /// Computes smooth vertex normals from triangle geometry.
    ///
    /// Each vertex gets the normalized sum of the area-weighted normals of the
    /// triangles using it. Unused vertices get the zero vector.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![DVec3::ZERO; self.positions.len()];

        for tri in &self.triangles {
            let v0 = self.positions[tri[0] as usize];
            let v1 = self.positions[tri[1] as usize];
            let v2 = self.positions[tri[2] as usize];
            let normal = (v1 - v0).cross(v2 - v0);

            normals[tri[0] as usize] += normal;
            normals[tri[1] as usize] += normal;
            normals[tri[2] as usize] += normal;
        }

        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
        }

        self.normals = Some(normals);
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners, or zero vectors for an empty mesh.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.positions.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.positions[0];
        let mut max = self.positions[0];

        for v in &self.positions[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Translates the mesh by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.positions {
            *v += offset;
        }
    }

    /// Appends another mesh, offsetting its indices.
    ///
    /// An attribute survives only if both meshes carry it.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.positions.len() as u32;

        self.positions.extend_from_slice(&other.positions);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|tri| [tri[0] + offset, tri[1] + offset, tri[2] + offset]),
        );

        self.normals = match (self.normals.take(), &other.normals) {
            (Some(mut mine), Some(theirs)) => {
                mine.extend_from_slice(theirs);
                Some(mine)
            }
            _ => None,
        };
        self.uvs = match (self.uvs.take(), &other.uvs) {
            (Some(mut mine), Some(theirs)) => {
                mine.extend_from_slice(theirs);
                Some(mine)
            }
            _ => None,
        };
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are in range
    /// - Attribute buffers match the vertex count
    /// - The triangle count is within limits
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.positions.len();

        if self.triangles.len() > MAX_TRIANGLES {
            return Err(MeshError::TooManyTriangles {
                count: self.triangles.len(),
                max: MAX_TRIANGLES,
            });
        }

        if let Some((i, tri)) = self
            .triangles
            .iter()
            .enumerate()
            .find(|(_, tri)| tri.iter().any(|&v| v as usize >= vertex_count))
        {
            return Err(MeshError::validation(format!(
                "triangle {i} references {tri:?} but mesh has {vertex_count} vertices"
            )));
        }

        if let Some(normals) = &self.normals {
            if normals.len() != vertex_count {
                return Err(MeshError::validation(format!(
                    "{} normals for {vertex_count} vertices",
                    normals.len()
                )));
            }
        }

        if let Some(uvs) = &self.uvs {
            if uvs.len() != vertex_count {
                return Err(MeshError::validation(format!(
                    "{} UVs for {vertex_count} vertices",
                    uvs.len()
                )));
            }
        }

        Ok(())
    }

    /// Number of triangles with (near) zero area.
    pub fn degenerate_triangle_count(&self) -> usize {
        (0..self.triangles.len())
            .filter(|&i| {
                let [v0, v1, v2] = self.triangle_positions(i);
                (v1 - v0).cross(v2 - v0).length() < DEGENERATE_AREA_EPSILON
            })
            .count()
    }

    /// Exports positions as a flattened f32 array.
    pub fn positions_f32(&self) -> Vec<f32> {
        self.positions
            .iter()
            .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect()
    }

    /// Exports triangle indices as a flattened u32 array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Exports normals as a flattened f32 array.
    pub fn normals_f32(&self) -> Option<Vec<f32>> {
        self.normals.as_ref().map(|normals| {
            normals
                .iter()
                .flat_map(|n| [n.x as f32, n.y as f32, n.z as f32])
                .collect()
        })
    }

    /// Exports UVs as a flattened f32 array.
    pub fn uvs_f32(&self) -> Option<Vec<f32>> {
        self.uvs
            .as_ref()
            .map(|uvs| uvs.iter().flat_map(|uv| [uv.x as f32, uv.y as f32]).collect())
    }
}

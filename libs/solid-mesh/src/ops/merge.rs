//! # Mesh Merge
//!
//! Concatenates independently built meshes into one indexed mesh.
//!
//! Input order is kept, so the triangle order of the result is
//! reproducible. Normals and UVs survive only if every input has them.

use crate::mesh::Mesh;

/// Merges meshes in order, offsetting each index buffer by the vertices
/// already appended.
///
/// An empty list gives an empty mesh; a single mesh is cloned unchanged.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use solid_mesh::{linear_extrude, merge_meshes, LinearExtrudeParams, Shape2D};
///
/// let params = LinearExtrudeParams::default();
/// let a = linear_extrude(&Shape2D::rectangle(DVec2::ONE, false), &params).unwrap();
/// let b = linear_extrude(&Shape2D::circle(1.0, 8), &params).unwrap();
///
/// let merged = merge_meshes(&[a.clone(), b.clone()]);
/// assert_eq!(merged.triangle_count(), a.triangle_count() + b.triangle_count());
/// ```
pub fn merge_meshes(meshes: &[Mesh]) -> Mesh {
    match meshes {
        [] => Mesh::new(),
        [single] => single.clone(),
        [first, rest @ ..] => {
            let mut merged = first.clone();
            for mesh in rest {
                merged.merge(mesh);
            }
            merged
        }
    }
}

//! # STL Export
//!
//! Writes a mesh as stereolithography triangles, one facet per mesh triangle,
//! in mesh order. Facet normals come from the triangle winding; vertices are
//! neither deduplicated nor reordered.
//!
//! ## Formats
//!
//! - **ASCII**: tab-indented `solid`/`facet`/`outer loop` blocks
//! - **Binary**: 80-byte header, `u32` facet count, 50 bytes per facet,
//!   written by `stl_io`

use std::io::{Cursor, Write};

use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MeshError;
use crate::mesh::Mesh;

/// STL flavor to emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    /// Human-readable text
    #[default]
    Ascii,
    /// Compact little-endian records
    Binary,
}

fn check_exportable(mesh: &Mesh) -> Result<(), MeshError> {
    if mesh.triangle_count() == 0 {
        return Err(MeshError::EmptyMesh);
    }
    mesh.validate()
}

/// Writes ASCII STL.
pub fn write_ascii<W: Write>(mesh: &Mesh, name: &str, writer: &mut W) -> Result<(), MeshError> {
    check_exportable(mesh)?;

    writeln!(writer, "solid {name}")?;
    for i in 0..mesh.triangle_count() {
        let n = mesh.face_normal(i);
        writeln!(writer, "\tfacet normal {} {} {}", n.x, n.y, n.z)?;
        writeln!(writer, "\t\touter loop")?;
        for v in mesh.triangle_positions(i) {
            writeln!(writer, "\t\t\tvertex {} {} {}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "\t\tendloop")?;
        writeln!(writer, "\tendfacet")?;
    }
    writeln!(writer, "endsolid {name}")?;

    Ok(())
}

/// Writes binary STL.
pub fn write_binary<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<(), MeshError> {
    check_exportable(mesh)?;

    let to_f32 = |v: DVec3| [v.x as f32, v.y as f32, v.z as f32];
    let triangles: Vec<stl_io::Triangle> = (0..mesh.triangle_count())
        .map(|i| {
            let [v0, v1, v2] = mesh.triangle_positions(i);
            stl_io::Triangle {
                normal: stl_io::Normal::new(to_f32(mesh.face_normal(i))),
                vertices: [
                    stl_io::Vertex::new(to_f32(v0)),
                    stl_io::Vertex::new(to_f32(v1)),
                    stl_io::Vertex::new(to_f32(v2)),
                ],
            }
        })
        .collect();

    stl_io::write_stl(writer, triangles.iter())?;
    Ok(())
}

/// Serializes a mesh to an in-memory STL buffer.
///
/// # Errors
///
/// Returns [`MeshError::EmptyMesh`] if the mesh has no triangles, or a
/// validation error if its indices are out of range.
pub fn to_stl(mesh: &Mesh, format: StlFormat, name: &str) -> Result<Vec<u8>, MeshError> {
    let mut bytes = Vec::new();
    match format {
        StlFormat::Ascii => write_ascii(mesh, name, &mut bytes)?,
        StlFormat::Binary => write_binary(mesh, &mut bytes)?,
    }

    debug!(
        ?format,
        triangles = mesh.triangle_count(),
        bytes = bytes.len(),
        "Mesh serialized"
    );

    Ok(bytes)
}

/// What a parsed STL file contains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StlSummary {
    /// Number of facets
    pub triangle_count: usize,
    /// Number of distinct vertices after parsing
    pub vertex_count: usize,
    /// Bounding box minimum
    pub min: DVec3,
    /// Bounding box maximum
    pub max: DVec3,
}

/// Parses ASCII or binary STL bytes and summarizes them.
pub fn read_stl(bytes: &[u8]) -> Result<StlSummary, MeshError> {
    let mut cursor = Cursor::new(bytes);
    let stl = stl_io::read_stl(&mut cursor)?;

    let mut points = stl
        .vertices
        .iter()
        .map(|v| DVec3::new(f64::from(v.0[0]), f64::from(v.0[1]), f64::from(v.0[2])));
    let (min, max) = match points.next() {
        Some(first) => points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))),
        None => (DVec3::ZERO, DVec3::ZERO),
    };

    Ok(StlSummary {
        triangle_count: stl.faces.len(),
        vertex_count: stl.vertices.len(),
        min,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::extrude::{linear_extrude, LinearExtrudeParams, Shape2D};
    use crate::ops::hole::{carve_hole, HoleSpec};
    use approx::assert_relative_eq;
    use glam::DVec2;

    fn plate() -> Mesh {
        linear_extrude(
            &Shape2D::rectangle(DVec2::new(50.0, 25.0), true),
            &LinearExtrudeParams {
                height: 3.0,
                center: true,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_ascii_layout() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        mesh.add_triangle(0, 1, 2);

        let text = String::from_utf8(to_stl(&mesh, StlFormat::Ascii, "exported").unwrap()).unwrap();
        let expected = "solid exported\n\
            \tfacet normal 0 0 1\n\
            \t\touter loop\n\
            \t\t\tvertex 0 0 0\n\
            \t\t\tvertex 1 0 0\n\
            \t\t\tvertex 0 1 0\n\
            \t\tendloop\n\
            \tendfacet\n\
            endsolid exported\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_degenerate_triangle_gets_zero_normal() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::X * 3.0);
        mesh.add_triangle(0, 1, 2);

        let text = String::from_utf8(to_stl(&mesh, StlFormat::Ascii, "flat").unwrap()).unwrap();
        assert!(text.contains("facet normal 0 0 0"));
    }

    #[test]
    fn test_binary_size() {
        let mesh = plate();
        let bytes = to_stl(&mesh, StlFormat::Binary, "ignored").unwrap();
        assert_eq!(bytes.len(), 84 + 50 * mesh.triangle_count());
        assert_eq!(u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]), 12);
    }

    #[test]
    fn test_ascii_round_trip_count() {
        let mesh = plate();
        let summary = read_stl(&to_stl(&mesh, StlFormat::Ascii, "plate").unwrap()).unwrap();
        assert_eq!(summary.triangle_count, mesh.triangle_count());
        assert_relative_eq!(summary.min.x, -25.0);
        assert_relative_eq!(summary.max.y, 12.5);
        assert_relative_eq!(summary.max.z, 1.5);
    }

    #[test]
    fn test_binary_round_trip_count_after_carve() {
        let mesh = plate();
        let spec = HoleSpec::from_percent(&mesh, 20.0, 50.0);
        let carved = carve_hole(mesh, &spec).into_mesh();

        let bytes = to_stl(&carved, StlFormat::Binary, "carved").unwrap();
        let summary = read_stl(&bytes).unwrap();
        assert_eq!(summary.triangle_count, carved.triangle_count());
    }

    #[test]
    fn test_empty_mesh_is_error() {
        for format in [StlFormat::Ascii, StlFormat::Binary] {
            assert!(matches!(
                to_stl(&Mesh::new(), format, "empty"),
                Err(MeshError::EmptyMesh)
            ));
        }
    }

    #[test]
    fn test_vertices_only_is_error() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        assert!(matches!(
            to_stl(&mesh, StlFormat::Ascii, "points"),
            Err(MeshError::EmptyMesh)
        ));
    }

    #[test]
    fn test_read_garbage_fails() {
        assert!(read_stl(b"not an stl file at all").is_err());
    }

    #[test]
    fn test_format_default() {
        assert_eq!(StlFormat::default(), StlFormat::Ascii);
    }
}

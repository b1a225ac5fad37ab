//! # Solid Mesh
//!
//! Browser-safe triangle mesh construction for keychain-style solids.
//!
//! ## Architecture
//!
//! ```text
//! Shape2D → (extrude) Mesh ─┐
//! Shape2D → (extrude) Mesh ─┼→ (merge) Mesh → (carve hole) Mesh → (export) STL
//! Shape2D → (extrude) Mesh ─┘
//! ```
//!
//! ## Algorithms
//!
//! All algorithms are pure Rust:
//! - **Extrusion**: straight prisms, caps triangulated with earcut
//! - **Merge**: concatenation with index offsetting
//! - **Hole**: carve-and-stitch, no general boolean engine
//! - **Export**: ASCII STL writer, binary STL through `stl_io`
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec2;
//! use solid_mesh::ops::extrude::{linear_extrude, LinearExtrudeParams, Shape2D};
//! use solid_mesh::export::stl::{to_stl, StlFormat};
//!
//! let plate = Shape2D::rectangle(DVec2::new(50.0, 25.0), true);
//! let params = LinearExtrudeParams { height: 3.0, center: true };
//! let mesh = linear_extrude(&plate, &params).unwrap();
//! assert_eq!(mesh.triangle_count(), 12);
//!
//! let stl = to_stl(&mesh, StlFormat::Ascii, "plate").unwrap();
//! assert!(stl.starts_with(b"solid plate"));
//! ```

pub mod error;
pub mod export;
pub mod mesh;
pub mod ops;

pub use error::MeshError;
pub use mesh::Mesh;
pub use ops::extrude::{linear_extrude, LinearExtrudeParams, Shape2D};
pub use ops::hole::{carve_hole, hole_center, CarveOutcome, CarveStats, HoleSpec};
pub use ops::merge::merge_meshes;

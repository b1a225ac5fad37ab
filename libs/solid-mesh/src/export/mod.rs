//! # Mesh Export
//!
//! Serializers for finished meshes.

pub mod stl;

pub use stl::{read_stl, to_stl, StlFormat, StlSummary};

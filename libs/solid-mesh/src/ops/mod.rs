//! # Mesh Operations
//!
//! Extrusion, merging and the carve-and-stitch hole.

pub mod extrude;
pub mod hole;
pub mod merge;

pub use extrude::{linear_extrude, LinearExtrudeParams, Shape2D};
pub use hole::{carve_hole, CarveOutcome, HoleSpec};
pub use merge::merge_meshes;

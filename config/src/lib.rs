//! # Config Crate
//!
//! Centralized configuration constants for the image-to-solid pipeline.
//! Thresholds, physical dimensions and hole parameters are defined here so
//! that the tracing, meshing and generator crates agree on one set of values.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{plate_dimensions, MAX_DIMENSION_MM};
//!
//! // A 2:1 landscape image becomes a 50mm x 25mm plate
//! let (width, height) = plate_dimensions(200.0, 100.0);
//! assert_eq!(width, MAX_DIMENSION_MM);
//! assert_eq!(height, 25.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values
//! - **Millimeters**: Every physical length is in millimeters
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

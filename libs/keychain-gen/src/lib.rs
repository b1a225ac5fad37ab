//! # Keychain Generator
//!
//! Turns a raster image plus a few physical parameters into a printable STL
//! solid: a rectangular base plate, raised decorations traced from the image
//! and an optional through-hole for a key ring.
//!
//! ## Architecture
//!
//! ```text
//! image bytes ─→ image_trace::prepare ─→ Vectorizer ─→ outlines
//!                                                        │
//! options ─→ plate size ─→ base plate ──────┐            ↓
//!                                           ├─ merge ←─ decorations
//!                                           ↓
//!                                      carve hole ─→ STL bytes + report
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use image::{ImageFormat, Rgba, RgbaImage};
//! use keychain_gen::{Generator, GenerationOptions};
//! use std::io::Cursor;
//!
//! let mut image = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
//! for y in 20..40 {
//!     for x in 20..40 {
//!         image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
//!     }
//! }
//! let mut png = Vec::new();
//! image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png).unwrap();
//!
//! let options = GenerationOptions::new(3.0).with_hole(70.0, 70.0);
//! let model = Generator::default().generate(&png, &options).unwrap();
//!
//! assert_eq!(model.report.decorations, 1);
//! assert!(model.report.hole.is_some());
//! assert!(model.stl.starts_with(b"solid exported"));
//! ```

pub mod error;
pub mod options;
pub mod pipeline;
pub mod report;
pub mod settings;

pub use error::GenerateError;
pub use options::GenerationOptions;
pub use pipeline::{generate, CancelFlag, GeneratedModel, Generator, Placement};
pub use report::{GenerationNote, GenerationReport};
pub use settings::GeneratorSettings;

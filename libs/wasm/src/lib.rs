//! WASM-facing entry points for the keychain generator.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. Every exported function has an `*_internal` twin that
//! returns Rust error types, so native tests never need a JS host.
//!
//! Options cross the boundary as JSON with camelCase keys:
//!
//! ```
//! use image::{ImageFormat, Rgba, RgbaImage};
//! use std::io::Cursor;
//!
//! let mut png = Vec::new();
//! RgbaImage::from_pixel(40, 40, Rgba([255, 255, 255, 255]))
//!     .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
//!     .unwrap();
//!
//! let options = r#"{"thickness": 3, "hasHole": true}"#;
//! let stl = keychain_wasm::generate_stl_internal(&png, options).unwrap();
//! assert!(stl.starts_with(b"solid exported"));
//! ```

use config::constants::{DEFAULT_HOLE_PERCENT, DEFAULT_THICKNESS_MM};
use keychain_gen::{GenerateError, GenerationOptions, Generator, GeneratorSettings};
use solid_mesh::export::StlFormat;
use wasm_bindgen::prelude::*;

mod diagnostics;
mod model_handle;

pub use diagnostics::{Diagnostic, DiagnosticList, Severity};
pub use model_handle::ModelHandle;

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "keychain-wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Plate thickness used when the UI has no value yet, in millimeters.
///
/// # Examples
/// ```
/// assert_eq!(keychain_wasm::default_thickness(), 3.0);
/// ```
#[wasm_bindgen]
pub fn default_thickness() -> f64 {
    DEFAULT_THICKNESS_MM
}

/// Hole position used when none is given, in percent of the model size.
#[wasm_bindgen]
pub fn default_hole_percent() -> f64 {
    DEFAULT_HOLE_PERCENT
}

/// Generates an ASCII STL from image bytes and JSON options.
///
/// # Errors
/// Returns a JavaScript error value containing a human-readable message
/// when the options are malformed or generation fails.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const bytes = new Uint8Array(await file.arrayBuffer());
/// // const stl = generate_stl(bytes, JSON.stringify({ thickness: 3 }));
/// // download(new Blob([stl], { type: "model/stl" }));
/// ```
#[wasm_bindgen]
pub fn generate_stl(image: &[u8], options_json: &str) -> Result<Vec<u8>, JsValue> {
    generate_stl_internal(image, options_json).map_err(to_js_error)
}

/// Host-only helper behind [`generate_stl`].
pub fn generate_stl_internal(image: &[u8], options_json: &str) -> Result<Vec<u8>, GenerateError> {
    let options = GenerationOptions::from_json(options_json)?;
    Ok(Generator::default().generate(image, &options)?.stl)
}

/// Generates a model with preview buffers, STL bytes and diagnostics.
///
/// `binary` selects binary STL output instead of ASCII.
///
/// # Errors
/// Returns a JavaScript error value containing a human-readable message
/// when the options are malformed or generation fails.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const model = generate_model(bytes, JSON.stringify({ thickness: 3, hasHole: true }), false);
/// // geometry.setAttribute("position", new THREE.BufferAttribute(model.vertices(), 3));
/// // geometry.setIndex(new THREE.BufferAttribute(model.indices(), 1));
/// // for (let i = 0; i < model.diagnostics().len(); i++) console.warn(model.diagnostics().get(i).message());
/// ```
#[wasm_bindgen]
pub fn generate_model(image: &[u8], options_json: &str, binary: bool) -> Result<ModelHandle, JsValue> {
    generate_model_internal(image, options_json, binary).map_err(to_js_error)
}

/// Host-only helper behind [`generate_model`].
pub fn generate_model_internal(
    image: &[u8],
    options_json: &str,
    binary: bool,
) -> Result<ModelHandle, GenerateError> {
    let options = GenerationOptions::from_json(options_json)?;
    let settings = GeneratorSettings {
        stl_format: if binary {
            StlFormat::Binary
        } else {
            StlFormat::Ascii
        },
        ..Default::default()
    };
    let model = Generator::new(settings)?.generate(image, &options)?;
    Ok(ModelHandle::from_model(model))
}

fn to_js_error(err: GenerateError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

//! # Model Handle
//!
//! WASM-friendly wrapper for a generated model: STL bytes for download,
//! flat buffers for a preview renderer and the run's diagnostics.

use keychain_gen::{GeneratedModel, GenerationReport};
use wasm_bindgen::prelude::*;

use crate::diagnostics::{Diagnostic, DiagnosticList};

/// A handle to a generated model that can be accessed from JavaScript.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const model = generate_model(bytes, JSON.stringify({ thickness: 3 }), false);
///
/// // Preview with Three.js
/// const geometry = new THREE.BufferGeometry();
/// geometry.setAttribute('position', new THREE.BufferAttribute(model.vertices(), 3));
/// if (model.has_normals()) {
///     geometry.setAttribute('normal', new THREE.BufferAttribute(model.normals(), 3));
/// }
/// geometry.setIndex(new THREE.BufferAttribute(model.indices(), 1));
///
/// // Download
/// const blob = new Blob([model.stl()], { type: 'model/stl' });
/// ```
#[wasm_bindgen]
#[derive(Debug)]
pub struct ModelHandle {
    /// Serialized STL
    stl: Vec<u8>,
    /// Vertex positions as [x, y, z, x, y, z, ...]
    vertices: Vec<f32>,
    /// Triangle indices as [i0, i1, i2, i0, i1, i2, ...]
    indices: Vec<u32>,
    /// Optional vertex normals as [nx, ny, nz, ...]
    normals: Option<Vec<f32>>,
    /// Optional texture coordinates as [u, v, u, v, ...]
    uvs: Option<Vec<f32>>,
    vertex_count: u32,
    triangle_count: u32,
    report: GenerationReport,
}

#[wasm_bindgen]
impl ModelHandle {
    /// Returns the number of vertices.
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Returns the number of triangles.
    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> u32 {
        self.triangle_count
    }

    /// Returns the STL file as a Uint8Array.
    #[wasm_bindgen]
    pub fn stl(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(&self.stl[..])
    }

    /// Returns the vertex positions as a Float32Array.
    ///
    /// Length: vertex_count * 3
    #[wasm_bindgen]
    pub fn vertices(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.vertices[..])
    }

    /// Returns the triangle indices as a Uint32Array.
    ///
    /// Length: triangle_count * 3
    #[wasm_bindgen]
    pub fn indices(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(&self.indices[..])
    }

    /// Returns the vertex normals as a Float32Array, if available.
    #[wasm_bindgen]
    pub fn normals(&self) -> Option<js_sys::Float32Array> {
        self.normals
            .as_ref()
            .map(|n| js_sys::Float32Array::from(&n[..]))
    }

    /// Returns the texture coordinates as a Float32Array, if available.
    #[wasm_bindgen]
    pub fn uvs(&self) -> Option<js_sys::Float32Array> {
        self.uvs.as_ref().map(|uv| js_sys::Float32Array::from(&uv[..]))
    }

    /// Returns true if the mesh has normals.
    #[wasm_bindgen]
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Returns true if the mesh has texture coordinates.
    #[wasm_bindgen]
    pub fn has_uvs(&self) -> bool {
        self.uvs.is_some()
    }

    /// Returns the recoverable problems met during generation.
    #[wasm_bindgen]
    pub fn diagnostics(&self) -> DiagnosticList {
        DiagnosticList::new(self.report.notes.iter().map(Diagnostic::from).collect())
    }

    /// Returns the generation report as a JSON string.
    #[wasm_bindgen]
    pub fn report_json(&self) -> String {
        serde_json::to_string(&self.report).unwrap_or_default()
    }
}

impl ModelHandle {
    /// Creates a handle from a generated model.
    pub fn from_model(model: GeneratedModel) -> Self {
        let GeneratedModel { stl, mesh, report } = model;
        Self {
            stl,
            vertices: mesh.positions_f32(),
            indices: mesh.indices_u32(),
            normals: mesh.normals_f32(),
            uvs: mesh.uvs_f32(),
            vertex_count: u32::try_from(mesh.vertex_count()).unwrap_or(u32::MAX),
            triangle_count: u32::try_from(mesh.triangle_count()).unwrap_or(u32::MAX),
            report,
        }
    }

    /// STL bytes without crossing into JavaScript.
    pub fn stl_bytes(&self) -> &[u8] {
        &self.stl
    }

    /// Position buffer without crossing into JavaScript.
    pub fn vertex_buffer(&self) -> &[f32] {
        &self.vertices
    }

    /// Index buffer without crossing into JavaScript.
    pub fn index_buffer(&self) -> &[u32] {
        &self.indices
    }

    /// Normal buffer without crossing into JavaScript.
    pub fn normal_buffer(&self) -> Option<&[f32]> {
        self.normals.as_deref()
    }

    /// The full report.
    pub fn report(&self) -> &GenerationReport {
        &self.report
    }
}

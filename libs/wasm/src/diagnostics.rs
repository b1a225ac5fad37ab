//! WASM-compatible diagnostic types.
//!
//! This module provides JavaScript-compatible wrappers for generation notes.

use keychain_gen::GenerationNote;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Diagnostic severity for JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A diagnostic message for JavaScript.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const diag = model.diagnostics().get(0);
/// // console.log(diag.kind(), diag.message());
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    severity: Severity,
    kind: String,
    message: String,
}

#[wasm_bindgen]
impl Diagnostic {
    /// Returns the severity of the diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the note kind, e.g. `holeCarveSkipped`.
    pub fn kind(&self) -> String {
        self.kind.clone()
    }

    /// Returns the diagnostic message.
    pub fn message(&self) -> String {
        self.message.clone()
    }

    /// Converts this diagnostic to a plain JavaScript object.
    ///
    /// This is useful for passing data between the worker and main thread,
    /// as wasm-bindgen wrappers cannot be transferred.
    pub fn to_js_object(&self) -> Result<JsValue, JsValue> {
        use js_sys::{Object, Reflect};

        let obj = Object::new();
        Reflect::set(&obj, &JsValue::from_str("severity"), &JsValue::from(self.severity as i32))?;
        Reflect::set(&obj, &JsValue::from_str("kind"), &JsValue::from_str(&self.kind))?;
        Reflect::set(&obj, &JsValue::from_str("message"), &JsValue::from_str(&self.message))?;

        Ok(JsValue::from(obj))
    }
}

impl From<&GenerationNote> for Diagnostic {
    fn from(note: &GenerationNote) -> Self {
        let (severity, kind) = match note {
            GenerationNote::DegradedInput { .. } => (Severity::Warning, "degradedInput"),
            GenerationNote::ShapeSkipped { .. } => (Severity::Warning, "shapeSkipped"),
            GenerationNote::HoleCarveSkipped { .. } => (Severity::Warning, "holeCarveSkipped"),
            GenerationNote::TextIgnored => (Severity::Info, "textIgnored"),
        };
        Self {
            severity,
            kind: kind.to_string(),
            message: note.to_string(),
        }
    }
}

/// A collection of diagnostics.
#[wasm_bindgen]
pub struct DiagnosticList {
    diagnostics: Vec<Diagnostic>,
}

#[wasm_bindgen]
impl DiagnosticList {
    /// Returns the number of diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns true if there are no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns a diagnostic by index.
    pub fn get(&self, index: usize) -> Option<Diagnostic> {
        self.diagnostics.get(index).cloned()
    }

    /// Returns every diagnostic as a JSON array string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.diagnostics).unwrap_or_else(|_| "[]".to_string())
    }
}

impl DiagnosticList {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Borrows the diagnostics.
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

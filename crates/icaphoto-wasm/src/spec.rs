//! Photo specification bindings.
//!
//! JavaScript builds a [`JsPhotoSpec`] once and passes it to every call. The
//! constructor accepts an optional partial object in camelCase; missing
//! fields keep the ICA defaults.
//!
//! ```typescript
//! const spec = new JsPhotoSpec();                             // ICA table
//! const lenient = new JsPhotoSpec({ maxRotationDegrees: 12 }); // one override
//! ```

use icaphoto_core::PhotoSpec;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct JsPhotoSpec {
    inner: PhotoSpec,
}

#[wasm_bindgen]
impl JsPhotoSpec {
    /// Build a spec from an optional partial override object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object has fields of the wrong type or the
    /// resulting table is inconsistent (zero sizes, ratios outside (0, 1],
    /// inverted ranges).
    #[wasm_bindgen(constructor)]
    pub fn new(overrides: JsValue) -> Result<JsPhotoSpec, JsValue> {
        let inner: PhotoSpec = if overrides.is_undefined() || overrides.is_null() {
            PhotoSpec::default()
        } else {
            serde_wasm_bindgen::from_value(overrides)
                .map_err(|e| JsValue::from_str(&format!("Invalid photo spec: {}", e)))?
        };
        inner.check().map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    #[wasm_bindgen(getter)]
    pub fn target_width(&self) -> u32 {
        self.inner.target_width
    }

    #[wasm_bindgen(getter)]
    pub fn target_height(&self) -> u32 {
        self.inner.target_height
    }

    #[wasm_bindgen(getter)]
    pub fn sheet_width(&self) -> u32 {
        self.inner.sheet_width
    }

    #[wasm_bindgen(getter)]
    pub fn sheet_height(&self) -> u32 {
        self.inner.sheet_height
    }

    /// Whether the spectacle heuristic is active.
    #[wasm_bindgen(getter)]
    pub fn spectacles_enabled(&self) -> bool {
        self.inner.spectacles_enabled
    }

    /// The full table as a plain object.
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for JsPhotoSpec {
    fn default() -> Self {
        Self::from_spec(PhotoSpec::default())
    }
}

impl JsPhotoSpec {
    pub(crate) fn from_spec(inner: PhotoSpec) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &PhotoSpec {
        &self.inner
    }
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Serialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Partial {
        max_rotation_degrees: f64,
    }

    #[wasm_bindgen_test]
    fn test_undefined_gives_defaults() {
        let spec = JsPhotoSpec::new(JsValue::UNDEFINED).unwrap();
        assert_eq!(spec.inner(), &PhotoSpec::default());
    }

    #[wasm_bindgen_test]
    fn test_partial_override() {
        let js = serde_wasm_bindgen::to_value(&Partial {
            max_rotation_degrees: 12.0,
        })
        .unwrap();
        let spec = JsPhotoSpec::new(js).unwrap();
        assert_eq!(spec.inner().max_rotation_degrees, 12.0);
        assert_eq!(spec.inner().target_width, 400);
    }

    #[wasm_bindgen_test]
    fn test_wrong_type_rejected() {
        let js = serde_wasm_bindgen::to_value(&42).unwrap();
        assert!(JsPhotoSpec::new(js).is_err());
    }
}

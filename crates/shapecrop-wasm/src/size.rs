//! Size/aspect resolver bindings.
//!
//! These feed the crop widget: which aspect ratio to lock, which sizes the
//! picker lists, and how the crop window should look for a shape.
//!
//! # Example
//!
//! ```typescript
//! import { aspect_ratio, size_presets, cropper_shape } from '@shapecrop/wasm';
//!
//! cropper.setAspectRatio(aspect_ratio('oval', 'oval-large'));
//! const options = size_presets('oval'); // [{ key, label, width, height }, ...]
//! ```

use serde::Serialize;
use shapecrop_core::{size, CropperShape, OutputSize, Shape, SizePreset};
use wasm_bindgen::prelude::*;

use crate::types::to_js_error;

/// Output size for a shape and an optional preset, as `{ width, height }`.
///
/// Unknown shapes fall back to the rectangle default, unknown presets to the
/// shape default.
#[wasm_bindgen]
pub fn resolve_size(shape: &str, preset: Option<String>) -> Result<JsValue, JsValue> {
    to_js(&resolve(shape, preset.as_deref()))
}

/// Width divided by height of the resolved output size.
#[wasm_bindgen]
pub fn aspect_ratio(shape: &str, preset: Option<String>) -> f64 {
    size::aspect_ratio(Shape::from_tag(shape), preset.as_deref())
}

/// Presets the size picker offers for a shape, as `{ key, label, width, height }[]`.
#[wasm_bindgen]
pub fn size_presets(shape: &str) -> Result<JsValue, JsValue> {
    to_js(&presets(shape))
}

/// Crop window style for a shape: `"round"` or `"rect"`.
#[wasm_bindgen]
pub fn cropper_shape(shape: &str) -> String {
    match Shape::from_tag(shape).cropper_shape() {
        CropperShape::Round => "round",
        CropperShape::Rect => "rect",
    }
    .to_string()
}

/// Whether the crop widget should draw its rule-of-thirds grid.
#[wasm_bindgen]
pub fn shows_grid(shape: &str) -> bool {
    Shape::from_tag(shape).shows_grid()
}

fn resolve(shape: &str, preset: Option<&str>) -> OutputSize {
    size::resolve_size(Shape::from_tag(shape), preset)
}

fn presets(shape: &str) -> Vec<&'static SizePreset> {
    size::presets_for_shape(Shape::from_tag(shape))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults_and_presets() {
        assert_eq!(resolve("circle", None), OutputSize::new(600, 600));
        assert_eq!(
            resolve("parallelogram", Some("parallelogram-medium")),
            OutputSize::new(665, 931)
        );
        // Preset wins regardless of shape
        assert_eq!(resolve("circle", Some("square-large")), OutputSize::new(1080, 1080));
        assert_eq!(resolve("hexagon", None), OutputSize::new(375, 812));
        assert_eq!(resolve("oval", Some("nope")), OutputSize::new(350, 525));
    }

    #[test]
    fn test_aspect_ratio() {
        assert!((aspect_ratio("square", None) - 1.0).abs() < 1e-12);
        assert!((aspect_ratio("oval", Some("oval-large".to_string())) - 400.0 / 600.0).abs() < 1e-12);
    }

    #[test]
    fn test_presets_per_shape() {
        let keys: Vec<_> = presets("circle").iter().map(|p| p.key).collect();
        assert_eq!(keys, ["small", "medium", "large"]);

        let keys: Vec<_> = presets("portrait").iter().map(|p| p.key).collect();
        assert_eq!(
            keys,
            ["small", "medium", "large", "portrait-small", "portrait-medium", "portrait-large"]
        );
    }

    #[test]
    fn test_widget_hints() {
        assert_eq!(cropper_shape("circle"), "round");
        assert_eq!(cropper_shape("portrait-id"), "round");
        assert_eq!(cropper_shape("parallelogram"), "rect");
        assert_eq!(cropper_shape("unknown"), "rect");
        assert!(!shows_grid("parallelogram"));
        assert!(shows_grid("square"));
    }
}

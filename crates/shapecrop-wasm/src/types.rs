//! WASM-compatible wrapper types.

use shapecrop_core::decode::DecodedImage;
use wasm_bindgen::prelude::*;

/// A decoded source image held in WASM memory.
///
/// Decode once with `decode_source`, then pass the same handle to
/// `render_preview` on every crop change and to `render_download` at the end.
/// The pixels never cross into JavaScript.
#[wasm_bindgen]
pub struct JsSourceImage {
    inner: DecodedImage,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Wrap RGBA pixels that are already decoded, e.g. canvas `ImageData`.
    ///
    /// # Errors
    /// Returns an error if `pixels` is not `width * height * 4` bytes long,
    /// or if that length overflows.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsSourceImage, JsValue> {
        Self::from_rgba(width, height, pixels).map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer also releases it.
    pub fn free(self) {}
}

impl JsSourceImage {
    pub(crate) fn from_decoded(inner: DecodedImage) -> Self {
        Self { inner }
    }

    pub(crate) fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, String> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| format!("Image {width}x{height} is too large"))?;
        if pixels.len() != expected {
            return Err(format!(
                "Invalid pixel data: expected {expected} bytes for {width}x{height}, got {}",
                pixels.len()
            ));
        }
        Ok(Self::from_decoded(DecodedImage::new(width, height, pixels)))
    }

    pub(crate) fn image(&self) -> &DecodedImage {
        &self.inner
    }
}

/// Convert any error into a JavaScript `Error` object.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Treat `undefined` and `null` as an absent optional argument.
pub(crate) fn is_absent(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

//! Decode and render bindings.
//!
//! # Functions
//!
//! - [`decode_source`] - Decode uploaded bytes into a reusable source handle
//! - [`render_preview`] - Render a crop to a data URL for an `<img>`
//! - [`render_download`] - Render a crop to encoded bytes for a download
//! - [`download_filename`] - Name for the downloaded file
//! - [`output_mime_type`] - MIME type a render will produce
//!
//! # Example
//!
//! ```typescript
//! import { decode_source, render_preview, render_download, download_filename } from '@shapecrop/wasm';
//!
//! const source = decode_source(new Uint8Array(await file.arrayBuffer()));
//! const crop = { x: 120, y: 40, width: 800, height: 1200 };
//!
//! img.src = render_preview(source, crop, 'oval', 'oval-large');
//!
//! const bytes = render_download(source, crop, 'oval', 'oval-large', 'jpeg', { jpegQuality: 95 });
//! saveAs(new Blob([bytes]), download_filename(file.name, 'oval'));
//! ```

use shapecrop_core::decode::{decode_image, DecodedImage};
use shapecrop_core::{
    render, CropRect, OutputFormat, OutputImage, OutputSink, RenderError, RenderOptions, Shape,
};
use wasm_bindgen::prelude::*;

use crate::types::{is_absent, to_js_error, JsSourceImage};

/// Decode JPEG, PNG or WebP bytes, applying EXIF orientation.
///
/// # Errors
///
/// Returns an error if the bytes are empty, not a supported image format,
/// or corrupted.
#[wasm_bindgen]
pub fn decode_source(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    decode_image(bytes)
        .map(JsSourceImage::from_decoded)
        .map_err(to_js_error)
}

/// Render a crop to a `data:` URL.
///
/// # Arguments
///
/// * `source` - Handle from [`decode_source`]
/// * `crop` - `{ x, y, width, height }` in source pixels
/// * `shape` - Shape tag; unknown tags render as a rectangle
/// * `preset` - Optional size preset key
/// * `format` - Optional `jpeg` | `png` | `webp`; unknown values fall back to JPEG
/// * `options` - Optional `{ jpegQuality, antialias, filter, background }`
#[wasm_bindgen]
pub fn render_preview(
    source: &JsSourceImage,
    crop: JsValue,
    shape: &str,
    preset: Option<String>,
    format: Option<String>,
    options: JsValue,
) -> Result<String, JsValue> {
    let (crop, options) = parse_args(crop, options)?;
    let out = render_with(
        source.image(),
        &crop,
        shape,
        preset.as_deref(),
        format.as_deref(),
        &options,
        OutputSink::DataUrl,
    )
    .map_err(to_js_error)?;

    out.into_data_url()
        .ok_or_else(|| to_js_error("Preview render did not produce a data URL"))
}

/// Render a crop to encoded bytes, returned as a `Uint8Array`.
///
/// Arguments are the same as [`render_preview`].
#[wasm_bindgen]
pub fn render_download(
    source: &JsSourceImage,
    crop: JsValue,
    shape: &str,
    preset: Option<String>,
    format: Option<String>,
    options: JsValue,
) -> Result<Vec<u8>, JsValue> {
    let (crop, options) = parse_args(crop, options)?;
    let out = render_with(
        source.image(),
        &crop,
        shape,
        preset.as_deref(),
        format.as_deref(),
        &options,
        OutputSink::Bytes,
    )
    .map_err(to_js_error)?;

    out.into_bytes()
        .ok_or_else(|| to_js_error("Download render did not produce bytes"))
}

/// Filename for a download of `original` rendered in `shape`.
#[wasm_bindgen]
pub fn download_filename(original: &str, shape: &str) -> String {
    shapecrop_core::download_filename(original, Shape::from_tag(shape))
}

/// MIME type a render of `shape` with the requested format produces.
#[wasm_bindgen]
pub fn output_mime_type(shape: &str, format: Option<String>) -> String {
    negotiated_format(shape, format.as_deref())
        .mime_type()
        .to_string()
}

fn parse_args(crop: JsValue, options: JsValue) -> Result<(CropRect, RenderOptions), JsValue> {
    let crop: CropRect = serde_wasm_bindgen::from_value(crop)
        .map_err(|e| to_js_error(format!("Invalid crop rectangle: {e}")))?;

    let options = if is_absent(&options) {
        RenderOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| to_js_error(format!("Invalid render options: {e}")))?
    };

    Ok((crop, options))
}

fn negotiated_format(shape: &str, format: Option<&str>) -> OutputFormat {
    OutputFormat::negotiate(Shape::from_tag(shape), OutputFormat::parse_or_default(format))
}

fn render_with(
    source: &DecodedImage,
    crop: &CropRect,
    shape: &str,
    preset: Option<&str>,
    format: Option<&str>,
    options: &RenderOptions,
    sink: OutputSink,
) -> Result<OutputImage, RenderError> {
    render(
        source,
        crop,
        Shape::from_tag(shape),
        preset,
        OutputFormat::parse_or_default(format),
        options,
        sink,
    )
}

//! Shapecrop WASM - WebAssembly bindings for the shapecrop renderer
//!
//! # Module Structure
//!
//! - `render` - Decode uploads and render shaped crops (preview and download)
//! - `size` - Output size, aspect ratio and preset lookup for the crop widget
//! - `types` - WASM-compatible wrapper types
//! - `logger` - Routes core log records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_source, aspect_ratio, render_preview } from '@shapecrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const source = decode_source(new Uint8Array(await file.arrayBuffer()));
//! cropper.setAspectRatio(aspect_ratio('circle'));
//! preview.src = render_preview(source, cropper.getData(), 'circle');
//! ```

use wasm_bindgen::prelude::*;

mod logger;
mod render;
mod size;
mod types;

pub use render::{
    decode_source, download_filename, output_mime_type, render_download, render_preview,
};
pub use size::{aspect_ratio, cropper_shape, resolve_size, shows_grid, size_presets};
pub use types::JsSourceImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Warn);
}

/// Change how much the renderer logs to the console.
///
/// Accepts `off`, `error`, `warn`, `info`, `debug` or `trace`; anything else
/// means `warn`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::init(logger::parse_level(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

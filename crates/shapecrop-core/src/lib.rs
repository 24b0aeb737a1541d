//! Shapecrop Core - shape-clipped image crop rendering
//!
//! This crate turns a rectangular crop of an uploaded image into an encoded
//! image clipped to a shape (circle, oval, parallelogram, portrait, ID card,
//! square or plain rectangle), at a size chosen from a table of presets.
//!
//! - [`size`] resolves output sizes and aspect ratios
//! - [`shape`] holds the per-shape table (clip, fit, background)
//! - [`render`] draws and encodes the crop

pub mod clip;
pub mod decode;
pub mod encode;
pub mod filename;
pub mod render;
pub mod shape;
pub mod size;
pub mod transform;

pub use clip::ClipRegion;
pub use decode::{decode_image, DecodeError, DecodedImage};
pub use encode::{OutputFormat, UnsupportedFormatError};
pub use filename::download_filename;
pub use render::{
    render, render_bytes, render_surface, OutputImage, OutputSink, RenderError, RenderOptions,
};
pub use shape::{CropperShape, Shape};
pub use size::{
    aspect_ratio, presets_for_shape, resolve_size, OutputSize, SizePreset, SIZE_PRESETS,
};
pub use transform::{CropRect, InterpolationFilter};

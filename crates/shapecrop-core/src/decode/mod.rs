//! Source image decoding.
//!
//! This module turns the bytes of an uploaded file into an RGBA bitmap that
//! the renderer can sample from:
//! - JPEG, PNG and WebP are sniffed and decoded with the `image` crate
//! - EXIF orientation is applied, matching what browsers display
//!
//! All operations are synchronous and single-threaded within WASM.

mod source;
mod types;

pub use source::decode_image;
pub use types::{DecodeError, DecodedImage, Orientation};

//! Encoding of rendered surfaces.
//!
//! This module provides:
//! - [`OutputFormat`] and the shape-aware format negotiation
//! - Raster encoding to JPEG, PNG and WebP
//! - `data:` URLs for previews
//!
//! # Examples
//!
//! ```ignore
//! use shapecrop_core::encode::{encode_rgba, to_data_url, OutputFormat};
//!
//! let pixels = vec![255u8; 10 * 10 * 4];
//! let png = encode_rgba(&pixels, 10, 10, OutputFormat::Png, 92, [255, 255, 255]).unwrap();
//! let url = to_data_url(OutputFormat::Png, &png);
//! ```

mod data_url;
mod format;
mod raster;

pub use data_url::to_data_url;
pub use format::{OutputFormat, UnsupportedFormatError};
pub use raster::{encode_rgba, EncodeError};

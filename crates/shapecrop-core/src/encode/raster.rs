//! Raster encoding of the rendered surface.
//!
//! Uses the `image` crate's encoders:
//! - JPEG with configurable quality (alpha is flattened onto a background)
//! - PNG, lossless with alpha
//! - WebP, lossless with alpha (the `image` encoder has no lossy mode)

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use super::OutputFormat;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: OutputFormat,
        message: String,
    },
}

/// Encode straight RGBA pixel data.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `format` - Target format
/// * `quality` - JPEG quality (1-100); ignored for PNG and WebP
/// * `background` - Colour that translucent pixels are flattened onto for JPEG
pub fn encode_rgba(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: OutputFormat,
    quality: u8,
    background: [u8; 3],
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let failed = |e: image::ImageError| EncodeError::EncodingFailed {
        format,
        message: e.to_string(),
    };

    match format {
        OutputFormat::Jpeg => {
            let rgb = flatten_onto(pixels, background);
            JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(failed)?;
        }
        OutputFormat::Png => {
            PngEncoder::new(&mut buffer)
                .write_image(pixels, width, height, ExtendedColorType::Rgba8)
                .map_err(failed)?;
        }
        OutputFormat::WebP => {
            WebPEncoder::new_lossless(&mut buffer)
                .write_image(pixels, width, height, ExtendedColorType::Rgba8)
                .map_err(failed)?;
        }
    }

    Ok(buffer.into_inner())
}

/// Composite straight RGBA onto an opaque background, producing RGB.
fn flatten_onto(pixels: &[u8], background: [u8; 3]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(pixels.len() / 4 * 3);

    for px in pixels.chunks_exact(4) {
        let a = px[3] as u32;
        for c in 0..3 {
            let v = (px[c] as u32 * a + background[c] as u32 * (255 - a) + 127) / 255;
            rgb.push(v as u8);
        }
    }

    rgb
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn format_strategy() -> impl Strategy<Value = OutputFormat> {
        prop::sample::select(vec![OutputFormat::Jpeg, OutputFormat::Png, OutputFormat::WebP])
    }

    proptest! {
        /// Property: Valid input always encodes and decodes back to the same dimensions.
        #[test]
        fn prop_valid_input_round_trips_dimensions(
            (width, height) in (1u32..=40, 1u32..=40),
            format in format_strategy(),
            quality in 1u8..=100,
        ) {
            let pixels = [90u8, 160, 30, 255].repeat((width * height) as usize);
            let bytes = encode_rgba(&pixels, width, height, format, quality, [255, 255, 255]);
            prop_assert!(bytes.is_ok());

            let decoded = image::load_from_memory(&bytes.unwrap()).unwrap();
            prop_assert_eq!((decoded.width(), decoded.height()), (width, height));
        }

        /// Property: Mismatched pixel data length always returns an error.
        #[test]
        fn prop_invalid_pixel_length_returns_error(
            (width, height) in (1u32..=30, 1u32..=30),
            delta in 1usize..=10,
            shorter in any::<bool>(),
            format in format_strategy(),
        ) {
            let expected = (width * height * 4) as usize;
            let len = if shorter { expected.saturating_sub(delta) } else { expected + delta };
            prop_assume!(len != expected);

            let result = encode_rgba(&vec![0u8; len], width, height, format, 90, [0, 0, 0]);
            prop_assert!(
                matches!(result, Err(EncodeError::InvalidPixelData { .. })),
                "Mismatched pixel data should return InvalidPixelData error"
            );
        }
    }
}

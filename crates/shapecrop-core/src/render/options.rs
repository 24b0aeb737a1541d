//! Tunables for a render call.

use serde::{Deserialize, Serialize};

use crate::transform::InterpolationFilter;

/// Default JPEG quality, the canvas `toDataURL` default of 0.92.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Options accepted by a render call.
///
/// Every field has a default, so a partial (or empty) JS object is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// JPEG quality (1-100). Ignored for PNG and WebP.
    pub jpeg_quality: u8,
    /// Soft clip and crop edges; `false` gives hard pixel edges.
    pub antialias: bool,
    /// Filter used when scaling the crop onto the surface.
    pub filter: InterpolationFilter,
    /// Fill colour for shapes that paint a background, and for JPEG flattening.
    pub background: [u8; 3],
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            antialias: true,
            filter: InterpolationFilter::default(),
            background: [255, 255, 255],
        }
    }
}

impl RenderOptions {
    /// JPEG quality clamped to `1..=100`.
    pub fn quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }

    /// Opaque background as RGBA.
    pub fn background_rgba(&self) -> [u8; 4] {
        let [r, g, b] = self.background;
        [r, g, b, 255]
    }
}

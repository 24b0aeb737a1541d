//! Source pixels handed to the rasterizer.
//!
//! The crop is drawn as an image pattern. Only the pixels touched by the
//! visible crop are copied into the pattern, and the pattern pads its edge
//! outward, so scaling never blends in pixels from outside the crop.
//! Pixels are premultiplied on copy so filtering across a transparent edge
//! does not darken colours.

use serde::{Deserialize, Serialize};
use tiny_skia::{ColorU8, FilterQuality, Pixmap};

use super::CropRect;
use crate::decode::DecodedImage;

/// Interpolation filter for scaling the crop onto the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Nearest neighbour: blocky, matches a canvas with smoothing disabled.
    Nearest,
    /// Bilinear: smooth scaling, the canvas default.
    #[default]
    Bilinear,
}

impl InterpolationFilter {
    pub fn quality(self) -> FilterQuality {
        match self {
            InterpolationFilter::Nearest => FilterQuality::Nearest,
            InterpolationFilter::Bilinear => FilterQuality::Bilinear,
        }
    }
}

/// Premultiplied copy of the source pixels under a visible crop.
pub struct SourcePatch {
    pub pixmap: Pixmap,
    /// Source column of the patch's left edge.
    pub x: u32,
    /// Source row of the patch's top edge.
    pub y: u32,
}

impl SourcePatch {
    /// Copy the pixels a visible crop region touches.
    ///
    /// `visible` must already be clipped to the image (see
    /// [`CropRect::visible_in`]). Returns `None` for an empty image or when
    /// the patch cannot be allocated.
    pub fn extract(image: &DecodedImage, visible: &CropRect) -> Option<Self> {
        let max_x = image.width.checked_sub(1)?;
        let max_y = image.height.checked_sub(1)?;

        let x0 = (visible.x.floor() as u32).min(max_x);
        let y0 = (visible.y.floor() as u32).min(max_y);
        let x1 = (visible.right().ceil() as u32).saturating_sub(1).clamp(x0, max_x);
        let y1 = (visible.bottom().ceil() as u32).saturating_sub(1).clamp(y0, max_y);

        let width = x1 - x0 + 1;
        let mut pixmap = Pixmap::new(width, y1 - y0 + 1)?;
        let pixels = pixmap.pixels_mut();

        for y in y0..=y1 {
            let row = ((y - y0) * width) as usize;
            for x in x0..=x1 {
                let [r, g, b, a] = image.pixel(x, y);
                pixels[row + (x - x0) as usize] = ColorU8::from_rgba(r, g, b, a).premultiply();
            }
        }

        Some(Self {
            pixmap,
            x: x0,
            y: y0,
        })
    }
}

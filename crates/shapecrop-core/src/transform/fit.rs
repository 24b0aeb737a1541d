//! Placement of the crop rectangle on the output surface.
//!
//! Two fits are used:
//! - **Stretch**: the crop is scaled independently in x and y to exactly
//!   cover the surface. Aspect ratio is not preserved.
//! - **Cover**: the crop is scaled uniformly so it covers a target box that
//!   is narrower than the surface by an inset, then centred on the surface.
//!   Excess is cut off by the clip region instead of being squashed.

use serde::{Deserialize, Serialize};
use tiny_skia::{Rect, Transform};

use super::CropRect;
use crate::size::OutputSize;

/// How a crop rectangle is mapped onto the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FitMode {
    /// Non-uniform scale onto the full surface.
    Stretch,
    /// Uniform scale covering `(width - inset * width) x height`, centred.
    Cover {
        /// Fraction of the surface width excluded from the cover box.
        inset: f64,
    },
}

/// Destination rectangle of a draw on the surface, in surface pixels.
///
/// May extend past the surface edges (cover fit) or be offset negatively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    /// Transform taking source coordinates to surface coordinates.
    ///
    /// The crop's top-left corner lands on the placement's top-left corner
    /// and the crop's size is scaled to the placement's size.
    pub fn transform(&self, crop: &CropRect) -> Transform {
        let sx = self.width / crop.width;
        let sy = self.height / crop.height;
        Transform::from_row(
            sx as f32,
            0.0,
            0.0,
            sy as f32,
            (self.x - crop.x * sx) as f32,
            (self.y - crop.y * sy) as f32,
        )
    }

    /// Where a part of the crop lands on the surface.
    pub fn map_rect(&self, crop: &CropRect, part: &CropRect) -> Placement {
        let sx = self.width / crop.width;
        let sy = self.height / crop.height;
        Placement {
            x: self.x + (part.x - crop.x) * sx,
            y: self.y + (part.y - crop.y) * sy,
            width: part.width * sx,
            height: part.height * sy,
        }
    }

    /// The placement as a drawing rectangle, `None` if empty or non-finite.
    pub fn to_rect(&self) -> Option<Rect> {
        Rect::from_xywh(
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
        )
    }
}

impl FitMode {
    /// Compute where the crop lands on a surface of the given size.
    ///
    /// The crop must be drawable (finite, positive size).
    pub fn place(self, crop: &CropRect, surface: OutputSize) -> Placement {
        let w = surface.width as f64;
        let h = surface.height as f64;

        match self {
            FitMode::Stretch => Placement {
                x: 0.0,
                y: 0.0,
                width: w,
                height: h,
            },
            FitMode::Cover { inset } => {
                let inset_px = w * inset;
                let scale = ((w - inset_px) / crop.width).max(h / crop.height);

                let scaled_w = crop.width * scale;
                let scaled_h = crop.height * scale;

                Placement {
                    x: (w - scaled_w) / 2.0,
                    y: (h - scaled_h) / 2.0,
                    width: scaled_w,
                    height: scaled_h,
                }
            }
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

//! Crop rectangles in source pixel coordinates.
//!
//! The crop widget reports the selected area in pixels of the (oriented)
//! source image. Nothing guarantees the rectangle stays inside the image:
//! zooming out past the image edge produces crops that hang over it.
//!
//! # Out-of-range crops
//!
//! The renderer treats an overhanging crop the way a canvas `drawImage`
//! does: the crop keeps its full size for scaling and placement, and only
//! the part that overlaps the image is drawn. The overhang draws nothing,
//! so the surface background (or transparency) shows through.

use serde::{Deserialize, Serialize};

/// Axis-aligned crop region of the source image, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole of an image of the given size.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f64, height as f64)
    }

    /// Whether the rectangle can be scaled onto a surface at all.
    ///
    /// Non-finite coordinates and empty or negative sizes cannot.
    pub fn is_drawable(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// The part of this crop that overlaps an image of the given size.
    ///
    /// Returns `None` when the crop is not drawable or misses the image.
    pub fn visible_in(&self, image_width: u32, image_height: u32) -> Option<CropRect> {
        if !self.is_drawable() {
            return None;
        }

        let left = self.x.max(0.0);
        let top = self.y.max(0.0);
        let right = self.right().min(image_width as f64);
        let bottom = self.bottom().min(image_height as f64);

        if right <= left || bottom <= top {
            return None;
        }

        Some(CropRect::new(left, top, right - left, bottom - top))
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

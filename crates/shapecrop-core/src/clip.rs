//! Clip regions applied to the output surface before drawing.
//!
//! A clip region is plain geometry produced by the shape table. The surface
//! turns it into a `tiny_skia` path and rasterizes that into a coverage mask,
//! which gives the same soft edge a canvas clip produces.
//!
//! # Coordinate System
//! - Surface pixels, origin at the top-left corner
//! - Pixel `(px, py)` spans `[px, px + 1) x [py, py + 1)`

use serde::{Deserialize, Serialize};
use tiny_skia::{Path, PathBuilder, Transform};

/// Geometry of a shape's clip path, in surface pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ClipRegion {
    /// The whole surface is visible.
    Full,
    /// A disk.
    Disk { cx: f64, cy: f64, radius: f64 },
    /// An axis-aligned ellipse.
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
    /// A rectangle anchored at the origin with quadratic-curve corners.
    ///
    /// Each corner curve runs from `radius` before the corner to `radius`
    /// after it, with the corner itself as the control point.
    RoundedRect { width: f64, height: f64, radius: f64 },
    /// A closed polygon, vertices in drawing order.
    Polygon(Vec<(f64, f64)>),
}

impl ClipRegion {
    /// Whether this region leaves the whole surface visible.
    pub fn is_full(&self) -> bool {
        matches!(self, ClipRegion::Full)
    }

    /// Outline of the region as a closed path.
    ///
    /// Returns `None` for [`ClipRegion::Full`] and for degenerate geometry
    /// (zero radius, fewer than three vertices), which encloses nothing.
    pub fn to_path(&self) -> Option<Path> {
        match self {
            ClipRegion::Full => None,
            ClipRegion::Disk { cx, cy, radius } => ellipse_path(*cx, *cy, *radius, *radius),
            ClipRegion::Ellipse { cx, cy, rx, ry } => ellipse_path(*cx, *cy, *rx, *ry),
            ClipRegion::RoundedRect {
                width,
                height,
                radius,
            } => rounded_rect_path(*width as f32, *height as f32, *radius as f32),
            ClipRegion::Polygon(points) => polygon_path(points),
        }
    }
}

/// Unit circle stretched to the radii and moved to the centre.
fn ellipse_path(cx: f64, cy: f64, rx: f64, ry: f64) -> Option<Path> {
    if !(rx > 0.0 && ry > 0.0) {
        return None;
    }

    let unit = PathBuilder::from_circle(0.0, 0.0, 1.0)?;
    unit.transform(Transform::from_row(
        rx as f32, 0.0, 0.0, ry as f32, cx as f32, cy as f32,
    ))
}

/// Rounded rectangle whose corners are quadratic curves controlled by the corner.
fn rounded_rect_path(w: f32, h: f32, r: f32) -> Option<Path> {
    let r = r.clamp(0.0, w.min(h) / 2.0);

    let mut pb = PathBuilder::new();
    pb.move_to(r, 0.0);
    pb.line_to(w - r, 0.0);
    pb.quad_to(w, 0.0, w, r);
    pb.line_to(w, h - r);
    pb.quad_to(w, h, w - r, h);
    pb.line_to(r, h);
    pb.quad_to(0.0, h, 0.0, h - r);
    pb.line_to(0.0, r);
    pb.quad_to(0.0, 0.0, r, 0.0);
    pb.close();
    pb.finish()
}

fn polygon_path(points: &[(f64, f64)]) -> Option<Path> {
    if points.len() < 3 {
        return None;
    }

    let mut pb = PathBuilder::new();
    let (x0, y0) = points[0];
    pb.move_to(x0 as f32, y0 as f32);
    for &(x, y) in &points[1..] {
        pb.line_to(x as f32, y as f32);
    }
    pb.close();
    pb.finish()
}


// ============================================================================
// Property-Based Tests
// ============================================================================

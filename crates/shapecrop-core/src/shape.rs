//! Crop shapes and the per-shape rendering table.
//!
//! Every behaviour that depends on the shape lives in one `match` here:
//! the default output size, the clip region, how the crop is fitted into the
//! surface, whether the surface gets a background fill, and the hints the
//! interactive crop widget needs. Adding a shape means adding one arm to each
//! of these small tables.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clip::ClipRegion;
use crate::size::OutputSize;
use crate::transform::FitMode;

/// Horizontal inset of the parallelogram's top-left corner, as a fraction of width.
pub const PARALLELOGRAM_SKEW: f64 = 0.15;

/// Corner radius of the ID-card rounded rectangle, as a fraction of the shorter side.
pub const ID_CORNER_RADIUS: f64 = 0.2;

/// Output shape of a crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    /// Plain rectangle, mobile-screenshot proportions by default.
    #[default]
    Rectangle,
    /// Square, no clipping.
    Square,
    /// Disk inscribed in the output.
    Circle,
    /// Ellipse filling the output.
    Oval,
    /// Left-leaning parallelogram with a cover-fitted image.
    Parallelogram,
    /// Head-and-shoulders ellipse, shifted up and slightly taller.
    Portrait,
    /// Rounded-corner ID card.
    PortraitId,
}

/// Crop window style for the interactive crop widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropperShape {
    Rect,
    Round,
}

impl Shape {
    /// All shapes, in the order the shape picker lists them.
    pub const ALL: [Shape; 7] = [
        Shape::Rectangle,
        Shape::Square,
        Shape::Circle,
        Shape::Oval,
        Shape::Parallelogram,
        Shape::Portrait,
        Shape::PortraitId,
    ];

    /// Parse a shape tag, falling back to `Rectangle` for anything unknown.
    pub fn from_tag(tag: &str) -> Shape {
        match tag.trim() {
            "rectangle" => Shape::Rectangle,
            "square" => Shape::Square,
            "circle" => Shape::Circle,
            "oval" => Shape::Oval,
            "parallelogram" => Shape::Parallelogram,
            "portrait" => Shape::Portrait,
            "portrait-id" => Shape::PortraitId,
            other => {
                log::debug!("unknown shape {other:?}, using rectangle");
                Shape::Rectangle
            }
        }
    }

    /// The tag this shape is known by in the UI and in preset keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Rectangle => "rectangle",
            Shape::Square => "square",
            Shape::Circle => "circle",
            Shape::Oval => "oval",
            Shape::Parallelogram => "parallelogram",
            Shape::Portrait => "portrait",
            Shape::PortraitId => "portrait-id",
        }
    }

    /// Output size used when no preset is selected.
    pub fn default_size(self) -> OutputSize {
        match self {
            Shape::Circle => OutputSize::new(600, 600),
            Shape::Square => OutputSize::new(800, 800),
            Shape::Oval => OutputSize::new(350, 525),
            Shape::Parallelogram => OutputSize::new(375, 600),
            Shape::Portrait => OutputSize::new(375, 650),
            Shape::Rectangle | Shape::PortraitId => OutputSize::new(375, 812),
        }
    }

    /// Clip region for an output surface of the given size.
    pub fn clip_region(self, size: OutputSize) -> ClipRegion {
        let w = size.width as f64;
        let h = size.height as f64;

        match self {
            Shape::Rectangle | Shape::Square => ClipRegion::Full,
            Shape::Circle => ClipRegion::Disk {
                cx: w / 2.0,
                cy: h / 2.0,
                radius: w.min(h) / 2.0,
            },
            Shape::Oval => ClipRegion::Ellipse {
                cx: w / 2.0,
                cy: h / 2.0,
                rx: w / 2.0,
                ry: h / 2.0,
            },
            Shape::Portrait => ClipRegion::Ellipse {
                cx: w / 2.0,
                cy: h * 0.4,
                rx: w / 2.0 * 0.95,
                ry: h / 2.0 * 1.1,
            },
            Shape::PortraitId => ClipRegion::RoundedRect {
                width: w,
                height: h,
                radius: w.min(h) * ID_CORNER_RADIUS,
            },
            Shape::Parallelogram => {
                let skew = parallelogram_skew(size);
                ClipRegion::Polygon(vec![(skew, 0.0), (w, 0.0), (w - skew, h), (0.0, h)])
            }
        }
    }

    /// How the crop rectangle is mapped onto the output surface.
    pub fn fit_mode(self) -> FitMode {
        match self {
            Shape::Parallelogram => FitMode::Cover {
                inset: PARALLELOGRAM_SKEW,
            },
            _ => FitMode::Stretch,
        }
    }

    /// Whether the surface is painted with the background colour before drawing.
    pub fn paints_background(self) -> bool {
        self != Shape::Parallelogram
    }

    /// Whether the encoder must keep an alpha channel for this shape.
    pub fn requires_alpha(self) -> bool {
        self == Shape::Parallelogram
    }

    /// Crop window style for the interactive widget.
    pub fn cropper_shape(self) -> CropperShape {
        match self {
            Shape::Circle | Shape::Oval | Shape::Portrait | Shape::PortraitId => {
                CropperShape::Round
            }
            _ => CropperShape::Rect,
        }
    }

    /// Whether the crop widget draws its rule-of-thirds grid.
    pub fn shows_grid(self) -> bool {
        self != Shape::Parallelogram
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Shape {
    fn from(tag: &str) -> Self {
        Shape::from_tag(tag)
    }
}

/// Skew of the parallelogram's slanted edges for a given output size.
pub fn parallelogram_skew(size: OutputSize) -> f64 {
    size.width as f64 * PARALLELOGRAM_SKEW
}

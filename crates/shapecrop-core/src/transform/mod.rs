//! Geometry that maps a crop of the source image onto the output surface.
//!
//! # Pipeline Position
//!
//! For each render:
//! 1. The crop is clipped to the image, giving the visible part
//! 2. The pixels under the visible part are copied into a [`SourcePatch`]
//! 3. The shape's [`FitMode`] yields a [`Placement`], whose transform scales
//!    the patch onto the surface
//!
//! # Coordinate System
//!
//! - Crop coordinates are source pixels (not normalized)
//! - Placements are surface pixels and may extend past the surface
//! - Origin is top-left corner

mod crop;
mod fit;
mod sample;

pub use crop::CropRect;
pub use fit::{FitMode, Placement};
pub use sample::{InterpolationFilter, SourcePatch};

//! Output size presets and the size/aspect resolver.
//!
//! Presets are plain static data: a named key maps to a fixed pixel size.
//! Keys are shape-qualified (`oval-large`) except for the three generic
//! sizes, but nothing checks that a preset matches the shape it is used with.

use serde::{Deserialize, Serialize};

use crate::shape::Shape;

/// Output dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
}

impl OutputSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect_ratio(self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// A named output size offered by the size picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizePreset {
    /// Lookup key, e.g. `parallelogram-medium`.
    pub key: &'static str,
    /// Human-readable label for the picker.
    pub label: &'static str,
    #[serde(flatten)]
    pub size: OutputSize,
}

const fn preset(key: &'static str, label: &'static str, width: u32, height: u32) -> SizePreset {
    SizePreset {
        key,
        label,
        size: OutputSize::new(width, height),
    }
}

/// Every known preset.
pub static SIZE_PRESETS: &[SizePreset] = &[
    preset("small", "Small", 350, 560),
    preset("medium", "Medium (Mobile)", 375, 600),
    preset("large", "Large", 400, 640),
    preset("square-small", "Square Small", 500, 500),
    preset("square-medium", "Square Medium", 800, 800),
    preset("square-large", "Square Large", 1080, 1080),
    preset("oval-small", "Oval Small", 300, 450),
    preset("oval-medium", "Oval Medium", 350, 525),
    preset("oval-large", "Oval Large", 400, 600),
    preset("parallelogram-small", "Parallelogram Small", 375, 600),
    preset("parallelogram-medium", "Parallelogram Medium", 665, 931),
    preset("parallelogram-large", "Parallelogram Large", 700, 931),
    preset("portrait-small", "Portrait Small", 320, 480),
    preset("portrait-medium", "Portrait Medium", 375, 650),
    preset("portrait-large", "Portrait Large", 420, 720),
    preset("portrait-id-small", "ID Small", 150, 200),
    preset("portrait-id-medium", "ID Medium", 300, 400),
    preset("portrait-id-large", "ID Large", 600, 800),
];

/// Number of generic presets at the front of [`SIZE_PRESETS`].
const GENERIC_PRESETS: usize = 3;

/// Look up a preset by key.
pub fn find_preset(key: &str) -> Option<&'static SizePreset> {
    SIZE_PRESETS.iter().find(|p| p.key == key)
}

/// Resolve the output size for a shape and an optional preset key.
///
/// A known preset wins verbatim; otherwise the shape's default is used.
/// Unknown preset keys are ignored rather than reported.
pub fn resolve_size(shape: Shape, preset_key: Option<&str>) -> OutputSize {
    preset_key
        .and_then(find_preset)
        .map(|p| p.size)
        .unwrap_or_else(|| shape.default_size())
}

/// Aspect ratio (width / height) of the resolved output size.
///
/// This only configures the crop widget's fixed-aspect constraint.
pub fn aspect_ratio(shape: Shape, preset_key: Option<&str>) -> f64 {
    resolve_size(shape, preset_key).aspect_ratio()
}

/// Presets the size picker offers for a shape.
///
/// Every shape gets the generic sizes; shapes with their own presets get
/// those appended.
pub fn presets_for_shape(shape: Shape) -> Vec<&'static SizePreset> {
    let generic = SIZE_PRESETS[..GENERIC_PRESETS].iter();

    let specific = match shape {
        Shape::Rectangle | Shape::Circle => None,
        _ => Some(shape.as_str()),
    };

    let shape_presets = SIZE_PRESETS[GENERIC_PRESETS..].iter().filter(move |p| {
        specific.is_some_and(|tag| {
            p.key
                .strip_prefix(tag)
                .and_then(|rest| rest.strip_prefix('-'))
                .is_some_and(|suffix| !suffix.contains('-'))
        })
    });

    generic.chain(shape_presets).collect()
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn shape_strategy() -> impl Strategy<Value = Shape> {
        prop::sample::select(Shape::ALL.to_vec())
    }

    fn preset_strategy() -> impl Strategy<Value = Option<&'static str>> {
        prop::option::of(prop::sample::select(
            SIZE_PRESETS.iter().map(|p| p.key).collect::<Vec<_>>(),
        ))
    }

    proptest! {
        /// Property: A known preset is returned verbatim for every shape.
        #[test]
        fn prop_preset_returned_verbatim(
            shape in shape_strategy(),
            index in 0..SIZE_PRESETS.len(),
        ) {
            let preset = &SIZE_PRESETS[index];
            prop_assert_eq!(resolve_size(shape, Some(preset.key)), preset.size);
        }

        /// Property: Aspect ratio is exactly width / height of the resolved size.
        #[test]
        fn prop_aspect_ratio_matches_resolved_size(
            shape in shape_strategy(),
            preset in preset_strategy(),
        ) {
            let size = resolve_size(shape, preset);
            let expected = size.width as f64 / size.height as f64;
            prop_assert_eq!(aspect_ratio(shape, preset), expected);
        }

        /// Property: Arbitrary shape tags never panic and always resolve to a non-zero size.
        #[test]
        fn prop_any_tag_resolves(tag in ".{0,24}", preset in ".{0,24}") {
            let size = resolve_size(Shape::from_tag(&tag), Some(preset.as_str()));
            prop_assert!(size.width > 0 && size.height > 0);
        }

        /// Property: The picker always lists the generic sizes first.
        #[test]
        fn prop_picker_starts_with_generic(shape in shape_strategy()) {
            let presets = presets_for_shape(shape);
            prop_assert!(presets.len() == 3 || presets.len() == 6);
            prop_assert_eq!(presets[0].key, "small");
            prop_assert_eq!(presets[1].key, "medium");
            prop_assert_eq!(presets[2].key, "large");
        }
    }
}

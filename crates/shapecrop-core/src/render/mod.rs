//! Shape-clipped crop rendering.
//!
//! A render takes a decoded source image, a crop rectangle in source pixels
//! and a shape, and produces an encoded image at the resolved output size:
//!
//! 1. Allocate a transparent surface of the resolved size
//! 2. Paint the background unless the shape keeps transparent corners
//! 3. Rasterize the shape's clip into a mask, then draw the visible part of
//!    the crop through it as a scaled image pattern, placed by the shape's fit
//! 4. Negotiate the output format and encode to bytes or a data URL
//!
//! Preview and download share the same pixels; only the [`OutputSink`]
//! differs.

mod options;
mod surface;

pub use options::{RenderOptions, DEFAULT_JPEG_QUALITY};
pub use surface::{Surface, SurfaceError};

use thiserror::Error;

use crate::decode::{decode_image, DecodeError, DecodedImage};
use crate::encode::{encode_rgba, to_data_url, EncodeError, OutputFormat};
use crate::shape::Shape;
use crate::size::resolve_size;
use crate::transform::{CropRect, SourcePatch};

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Where the encoded result goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSink {
    /// Raw encoded bytes, for downloads.
    Bytes,
    /// A `data:` URL, for previews.
    DataUrl,
}

/// Encoded render result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputImage {
    Bytes { format: OutputFormat, data: Vec<u8> },
    DataUrl { format: OutputFormat, url: String },
}

impl OutputImage {
    /// Format that was actually encoded.
    pub fn format(&self) -> OutputFormat {
        match self {
            OutputImage::Bytes { format, .. } | OutputImage::DataUrl { format, .. } => *format,
        }
    }

    /// Encoded bytes, if this came from the bytes sink.
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            OutputImage::Bytes { data, .. } => Some(data),
            OutputImage::DataUrl { .. } => None,
        }
    }

    /// Data URL, if this came from the data URL sink.
    pub fn into_data_url(self) -> Option<String> {
        match self {
            OutputImage::DataUrl { url, .. } => Some(url),
            OutputImage::Bytes { .. } => None,
        }
    }
}

/// Draw a crop of `source` onto a fresh surface for `shape`.
///
/// The surface has exactly the size [`resolve_size`] gives for the shape
/// and preset, independent of the source and crop sizes.
pub fn render_surface(
    source: &DecodedImage,
    crop: &CropRect,
    shape: Shape,
    preset: Option<&str>,
    options: &RenderOptions,
) -> Result<Surface, RenderError> {
    let size = resolve_size(shape, preset);
    let mut surface = Surface::new(size)?;

    if shape.paints_background() {
        surface.fill(options.background_rgba());
    }

    let Some(visible) = crop.visible_in(source.width, source.height) else {
        log::warn!(
            "Crop {crop:?} does not overlap the {}x{} source, nothing drawn",
            source.width,
            source.height
        );
        return Ok(surface);
    };

    let placement = shape.fit_mode().place(crop, size);
    let Some(dest) = placement.map_rect(crop, &visible).to_rect() else {
        log::warn!("Crop {crop:?} maps to an empty area of the surface, nothing drawn");
        return Ok(surface);
    };

    let patch = SourcePatch::extract(source, &visible).ok_or(SurfaceError::TooLarge {
        width: source.width,
        height: source.height,
    })?;
    let mask = surface.clip_mask(&shape.clip_region(size), options.antialias)?;

    surface.draw_patch(
        &patch,
        placement.transform(crop),
        dest,
        options.filter,
        options.antialias,
        mask.as_ref(),
    );

    Ok(surface)
}

/// Render a crop and encode it.
///
/// `requested` is the caller's preferred format; the encoded format follows
/// [`OutputFormat::negotiate`].
pub fn render(
    source: &DecodedImage,
    crop: &CropRect,
    shape: Shape,
    preset: Option<&str>,
    requested: OutputFormat,
    options: &RenderOptions,
    sink: OutputSink,
) -> Result<OutputImage, RenderError> {
    let surface = render_surface(source, crop, shape, preset, options)?;
    let format = OutputFormat::negotiate(shape, requested);

    log::debug!(
        "Rendered {shape} crop at {}x{} as {format}",
        surface.width(),
        surface.height()
    );

    let data = encode_rgba(
        &surface.to_rgba(),
        surface.width(),
        surface.height(),
        format,
        options.quality(),
        options.background,
    )?;

    Ok(match sink {
        OutputSink::Bytes => OutputImage::Bytes { format, data },
        OutputSink::DataUrl => OutputImage::DataUrl {
            format,
            url: to_data_url(format, &data),
        },
    })
}

/// Decode `bytes` and render a crop of it in one call.
pub fn render_bytes(
    bytes: &[u8],
    crop: &CropRect,
    shape: Shape,
    preset: Option<&str>,
    requested: OutputFormat,
    options: &RenderOptions,
    sink: OutputSink,
) -> Result<OutputImage, RenderError> {
    let source = decode_image(bytes)?;
    render(&source, crop, shape, preset, requested, options, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::OutputSize;
    use crate::transform::InterpolationFilter;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn red_source() -> DecodedImage {
        DecodedImage::filled(10, 10, RED)
    }

    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];

    fn hard_edges() -> RenderOptions {
        RenderOptions {
            antialias: false,
            filter: InterpolationFilter::Nearest,
            ..Default::default()
        }
    }

    /// Source whose columns are coloured by a function of x.
    fn columns(width: u32, height: u32, colour: impl Fn(u32) -> [u8; 4]) -> DecodedImage {
        let mut pixels = Vec::new();
        for _y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&colour(x));
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn surface(shape: Shape, preset: Option<&str>) -> Surface {
        let source = red_source();
        let crop = CropRect::full(source.width, source.height);
        render_surface(&source, &crop, shape, preset, &hard_edges()).unwrap()
    }

    #[test]
    fn test_output_size_for_every_shape() {
        for shape in Shape::ALL {
            let s = surface(shape, Some("portrait-id-small"));
            assert_eq!(s.size(), OutputSize::new(150, 200), "{shape}");
        }
        assert_eq!(surface(Shape::Oval, None).size(), OutputSize::new(350, 525));
    }

    #[test]
    fn test_circle_default() {
        let s = surface(Shape::Circle, None);
        assert_eq!(s.size(), OutputSize::new(600, 600));

        assert_eq!(s.pixel(300, 300), RED);
        assert_eq!(s.pixel(0, 0), WHITE);
        assert_eq!(s.pixel(599, 599), WHITE);
        // Just inside and outside the radius along the horizontal axis
        assert_eq!(s.pixel(2, 300), RED);
        assert_eq!(s.pixel(300, 0), RED);
        assert_eq!(s.pixel(30, 30), WHITE);
    }

    #[test]
    fn test_parallelogram_corners_are_transparent() {
        let s = surface(Shape::Parallelogram, Some("parallelogram-medium"));
        assert_eq!(s.size(), OutputSize::new(665, 931));

        assert_eq!(s.pixel(0, 0)[3], 0);
        assert_eq!(s.pixel(664, 930)[3], 0);
        assert_eq!(s.pixel(332, 465), RED);
        // Left of the top-left vertex at x = 99.75
        assert_eq!(s.pixel(98, 0)[3], 0);
        assert_eq!(s.pixel(110, 0), RED);
    }

    #[test]
    fn test_square_small_has_no_clip() {
        let s = surface(Shape::Square, Some("square-small"));
        assert_eq!(s.size(), OutputSize::new(500, 500));
        for (x, y) in [(0, 0), (499, 0), (0, 499), (499, 499), (250, 250)] {
            assert_eq!(s.pixel(x, y), RED);
        }
    }

    #[test]
    fn test_unknown_shape_falls_back_to_rectangle() {
        let s = surface(Shape::from_tag("hexagon"), None);
        assert_eq!(s.size(), OutputSize::new(375, 812));
        assert_eq!(s.pixel(0, 0), RED);
        assert_eq!(s.pixel(374, 811), RED);
    }

    #[test]
    fn test_portrait_id_rounds_corners() {
        let s = surface(Shape::PortraitId, Some("portrait-id-medium"));
        assert_eq!(s.pixel(0, 0), WHITE);
        assert_eq!(s.pixel(150, 0), RED);
        assert_eq!(s.pixel(150, 200), RED);
    }

    #[test]
    fn test_antialiased_edge_is_blended() {
        let source = red_source();
        let crop = CropRect::full(10, 10);
        let s = render_surface(&source, &crop, Shape::Circle, None, &RenderOptions::default())
            .unwrap();

        // A pixel straddling the circle boundary on the diagonal
        let edge = (0..300u32)
            .map(|i| s.pixel(i, i))
            .find(|px| px[1] < 255)
            .unwrap();
        assert!(edge[1] > 0, "expected a partially covered pixel, got {edge:?}");
    }

    #[test]
    fn test_stretch_maps_crop_edges() {
        // Left half blue, right half red
        let source = columns(4, 4, |x| if x < 2 { BLUE } else { RED });
        let crop = CropRect::full(4, 4);
        let s = render_surface(&source, &crop, Shape::Square, Some("square-small"), &hard_edges())
            .unwrap();

        assert_eq!(s.pixel(10, 250), BLUE);
        assert_eq!(s.pixel(490, 250), RED);
    }

    #[test]
    fn test_parallelogram_cover_keeps_aspect() {
        // 20x10 source: green 0..5, blue 5..10, red 10..20.
        // Cover onto 375x600 scales by 60 and centres at x = -412.5, so the
        // blue/red boundary lands at x = 187.5 and the green band is cut off.
        // A stretch would put green on the left quarter instead.
        let source = columns(20, 10, |x| match x {
            0..=4 => GREEN,
            5..=9 => BLUE,
            _ => RED,
        });
        let s = render_surface(
            &source,
            &CropRect::full(20, 10),
            Shape::Parallelogram,
            None,
            &hard_edges(),
        )
        .unwrap();
        assert_eq!(s.size(), OutputSize::new(375, 600));

        assert_eq!(s.pixel(50, 300), BLUE);
        assert_eq!(s.pixel(186, 300), BLUE);
        assert_eq!(s.pixel(188, 300), RED);
        assert_eq!(s.pixel(300, 300), RED);
        assert!(s.to_rgba().chunks_exact(4).all(|px| px != GREEN));
    }

    #[test]
    fn test_overhanging_crop_keeps_full_crop_scale() {
        // Crop twice the image width, image on the right half
        let source = columns(10, 10, |x| if x < 5 { BLUE } else { RED });
        let crop = CropRect::new(-10.0, 0.0, 20.0, 10.0);
        let s = render_surface(&source, &crop, Shape::Square, Some("square-small"), &hard_edges())
            .unwrap();

        // Image starts at x = 250, blue/red boundary at x = 375
        assert_eq!(s.pixel(249, 250), WHITE);
        assert_eq!(s.pixel(251, 250), BLUE);
        assert_eq!(s.pixel(373, 250), BLUE);
        assert_eq!(s.pixel(377, 250), RED);
    }

    #[test]
    fn test_overhanging_crop_shows_background() {
        let source = red_source();
        // Left half of the crop hangs off the image
        let crop = CropRect::new(-10.0, 0.0, 20.0, 10.0);
        let s = render_surface(&source, &crop, Shape::Rectangle, Some("small"), &hard_edges())
            .unwrap();

        assert_eq!(s.pixel(10, 280), WHITE);
        assert_eq!(s.pixel(340, 280), RED);
    }

    #[test]
    fn test_crop_outside_image_draws_nothing() {
        let source = red_source();
        let crop = CropRect::new(50.0, 50.0, 10.0, 10.0);
        let s = render_surface(&source, &crop, Shape::Square, Some("square-small"), &hard_edges())
            .unwrap();
        assert!(s.to_rgba().chunks_exact(4).all(|px| px == WHITE));

        let crop = CropRect::new(0.0, 0.0, f64::NAN, 10.0);
        let s = render_surface(
            &source,
            &crop,
            Shape::Parallelogram,
            Some("parallelogram-small"),
            &hard_edges(),
        )
        .unwrap();
        assert!(s.to_rgba().chunks_exact(4).all(|px| px[3] == 0));
    }

    #[test]
    fn test_transparent_source_shows_fill() {
        let source = DecodedImage::filled(4, 4, [0, 0, 0, 0]);
        let crop = CropRect::full(4, 4);

        let s = render_surface(&source, &crop, Shape::Oval, Some("oval-small"), &hard_edges())
            .unwrap();
        assert_eq!(s.pixel(150, 225), WHITE);

        let s = render_surface(
            &source,
            &crop,
            Shape::Parallelogram,
            Some("parallelogram-small"),
            &hard_edges(),
        )
        .unwrap();
        assert_eq!(s.pixel(187, 300)[3], 0);
    }

    #[test]
    fn test_custom_background() {
        let source = DecodedImage::filled(4, 4, [0, 0, 0, 0]);
        let opts = RenderOptions {
            background: [10, 20, 30],
            ..hard_edges()
        };
        let s = render_surface(&source, &CropRect::full(4, 4), Shape::Circle, None, &opts).unwrap();
        assert_eq!(s.pixel(0, 0), [10, 20, 30, 255]);
    }

    fn render_small(shape: Shape, requested: OutputFormat, sink: OutputSink) -> OutputImage {
        let source = red_source();
        render(
            &source,
            &CropRect::full(10, 10),
            shape,
            Some("portrait-id-small"),
            requested,
            &hard_edges(),
            sink,
        )
        .unwrap()
    }

    #[test]
    fn test_parallelogram_is_png_when_jpeg_requested() {
        let out = render_small(Shape::Parallelogram, OutputFormat::Jpeg, OutputSink::Bytes);
        assert_eq!(out.format(), OutputFormat::Png);

        let bytes = out.into_bytes().unwrap();
        assert_eq!(&bytes[0..4], &[0x89, 0x50, 0x4E, 0x47]);

        let decoded = image::load_from_memory(&bytes).unwrap().into_rgba8();
        assert_eq!(decoded.dimensions(), (150, 200));
        assert_eq!(decoded.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn test_format_follows_request_for_other_shapes() {
        let out = render_small(Shape::Circle, OutputFormat::Jpeg, OutputSink::Bytes);
        assert_eq!(out.format(), OutputFormat::Jpeg);
        assert_eq!(&out.into_bytes().unwrap()[0..2], &[0xFF, 0xD8]);

        let out = render_small(Shape::Oval, OutputFormat::Png, OutputSink::Bytes);
        assert_eq!(out.format(), OutputFormat::Png);

        let out = render_small(Shape::Portrait, OutputFormat::WebP, OutputSink::Bytes);
        assert_eq!(out.format(), OutputFormat::WebP);
        assert_eq!(&out.into_bytes().unwrap()[8..12], b"WEBP");
    }

    #[test]
    fn test_webp_wins_for_parallelogram() {
        let out = render_small(Shape::Parallelogram, OutputFormat::WebP, OutputSink::Bytes);
        assert_eq!(out.format(), OutputFormat::WebP);
    }

    #[test]
    fn test_data_url_sink() {
        let out = render_small(Shape::Parallelogram, OutputFormat::Jpeg, OutputSink::DataUrl);
        assert_eq!(out.format().mime_type(), "image/png");

        let url = out.into_data_url().unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_render_bytes_decodes_source() {
        let img = image::RgbaImage::from_pixel(8, 6, image::Rgba(RED));
        let mut png = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut png, image::ImageFormat::Png)
            .unwrap();

        let out = render_bytes(
            png.get_ref(),
            &CropRect::full(8, 6),
            Shape::Square,
            Some("square-small"),
            OutputFormat::Png,
            &hard_edges(),
            OutputSink::Bytes,
        )
        .unwrap();

        let decoded = image::load_from_memory(&out.into_bytes().unwrap())
            .unwrap()
            .into_rgba8();
        assert_eq!(decoded.dimensions(), (500, 500));
        assert_eq!(decoded.get_pixel(250, 250).0, RED);
    }

    #[test]
    fn test_render_bytes_propagates_decode_error() {
        let result = render_bytes(
            &[0x00, 0x01, 0x02],
            &CropRect::full(1, 1),
            Shape::Circle,
            None,
            OutputFormat::Jpeg,
            &RenderOptions::default(),
            OutputSink::Bytes,
        );
        assert!(matches!(result, Err(RenderError::Decode(_))));

        let result = render_bytes(
            &[],
            &CropRect::full(1, 1),
            Shape::Circle,
            None,
            OutputFormat::Jpeg,
            &RenderOptions::default(),
            OutputSink::DataUrl,
        );
        assert!(matches!(result, Err(RenderError::Decode(DecodeError::Empty))));
    }
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
        prop::sample::select(vec![
            None,
            Some("portrait-id-small"),
            Some("oval-small"),
            Some("not-a-preset"),
        ])
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        /// Property: Surface size depends only on shape and preset.
        #[test]
        fn prop_surface_size_matches_resolver(
            shape in shape_strategy(),
            preset in preset_strategy(),
            x in -20.0f64..20.0,
            y in -20.0f64..20.0,
            w in 0.5f64..40.0,
            h in 0.5f64..40.0,
        ) {
            let source = DecodedImage::filled(16, 12, [0, 128, 255, 255]);
            let crop = CropRect::new(x, y, w, h);
            let opts = RenderOptions { antialias: false, ..Default::default() };

            let surface = render_surface(&source, &crop, shape, preset, &opts).unwrap();
            prop_assert_eq!(surface.size(), resolve_size(shape, preset));
        }

        /// Property: Opaque shapes stay fully opaque, whatever the crop.
        #[test]
        fn prop_background_shapes_are_opaque(
            shape in shape_strategy(),
            x in -20.0f64..20.0,
            w in 0.5f64..40.0,
        ) {
            prop_assume!(shape.paints_background());
            let source = DecodedImage::filled(16, 12, [0, 0, 0, 0]);
            let crop = CropRect::new(x, 0.0, w, 12.0);
            let opts = RenderOptions { antialias: false, ..Default::default() };

            let surface = render_surface(&source, &crop, shape, Some("portrait-id-small"), &opts)
                .unwrap();
            prop_assert!(surface.to_rgba().chunks_exact(4).all(|px| px[3] == 255));
        }
    }
}

//! The RGBA drawing surface a render writes into.
//!
//! Backed by a `tiny_skia` pixmap, which stores premultiplied RGBA.
//! Pixels read back through [`Surface::pixel`] and [`Surface::to_rgba`]
//! are straight (demultiplied) RGBA, ready for the encoders.

use thiserror::Error;
use tiny_skia::{
    Color, FillRule, Mask, Paint, Pattern, Pixmap, Rect, Shader, SpreadMode, Transform,
};

use crate::clip::ClipRegion;
use crate::size::OutputSize;
use crate::transform::{InterpolationFilter, SourcePatch};

/// Errors from allocating the output surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Width or height is zero
    #[error("Surface dimensions must be non-zero, got {width}x{height}")]
    ZeroSized { width: u32, height: u32 },

    /// Too many pixels for the rasterizer to address
    #[error("Surface {width}x{height} is too large")]
    TooLarge { width: u32, height: u32 },
}

/// RGBA8 surface, initially fully transparent.
#[derive(Debug, Clone)]
pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    /// Allocate a transparent surface.
    pub fn new(size: OutputSize) -> Result<Self, SurfaceError> {
        let OutputSize { width, height } = size;
        if width == 0 || height == 0 {
            return Err(SurfaceError::ZeroSized { width, height });
        }

        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::TooLarge { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> OutputSize {
        OutputSize::new(self.width(), self.height())
    }

    /// Fill every pixel with a colour.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        let [r, g, b, a] = rgba;
        self.pixmap.fill(Color::from_rgba8(r, g, b, a));
    }

    /// Rasterize a clip region into a coverage mask the size of the surface.
    ///
    /// [`ClipRegion::Full`] needs no mask and yields `None`. Degenerate
    /// geometry yields an empty mask, which hides every draw.
    pub fn clip_mask(
        &self,
        region: &ClipRegion,
        anti_alias: bool,
    ) -> Result<Option<Mask>, SurfaceError> {
        if region.is_full() {
            return Ok(None);
        }

        let (width, height) = (self.width(), self.height());
        let mut mask = Mask::new(width, height).ok_or(SurfaceError::TooLarge { width, height })?;
        if let Some(path) = region.to_path() {
            mask.fill_path(&path, FillRule::Winding, anti_alias, Transform::identity());
        }

        Ok(Some(mask))
    }

    /// Draw a source patch source-over into `dest`.
    ///
    /// `transform` maps source coordinates to surface coordinates. Only the
    /// part of `dest` inside `mask` (if any) is touched.
    pub fn draw_patch(
        &mut self,
        patch: &SourcePatch,
        transform: Transform,
        dest: Rect,
        filter: InterpolationFilter,
        anti_alias: bool,
        mask: Option<&Mask>,
    ) {
        // Pattern space starts at the patch's top-left source pixel
        let transform = transform.pre_translate(patch.x as f32, patch.y as f32);
        let shader: Shader = Pattern::new(
            patch.pixmap.as_ref(),
            SpreadMode::Pad,
            filter.quality(),
            1.0,
            transform,
        );

        let paint = Paint {
            shader,
            anti_alias,
            ..Default::default()
        };

        self.pixmap.fill_rect(dest, &paint, Transform::identity(), mask);
    }

    /// Straight RGBA value at a pixel.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize) * (self.width() as usize) + x as usize;
        let c = self.pixmap.pixels()[i].demultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }

    /// Straight RGBA bytes, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixmap.data().len());
        for px in self.pixmap.pixels() {
            let c = px.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        rgba
    }
}

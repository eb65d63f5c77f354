use std::sync::Arc;

use anyhow::Context;
use image::ImageEncoder;

use crate::foundation::core::Canvas;
use crate::foundation::error::{SvgBurstError, SvgBurstResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// Largest raster edge accepted, in pixels.
pub const MAX_RASTER_DIM: u32 = 16_384;

/// One rasterized frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Straight-alpha RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

/// SVG rasterizer holding the parse options (and the font database) across frames.
pub struct Rasterizer {
    options: usvg::Options<'static>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    /// Rasterizer with the system fonts loaded.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Self {
            options: usvg::Options {
                fontdb: Arc::new(db),
                ..Default::default()
            },
        }
    }

    /// Rasterizer without any fonts; text is not drawn.
    pub fn without_fonts() -> Self {
        Self {
            options: usvg::Options::default(),
        }
    }

    /// Render `svg` scaled to fill `canvas`.
    pub fn render(&self, svg: &str, canvas: Canvas) -> SvgBurstResult<FrameRGBA> {
        if canvas.width > MAX_RASTER_DIM || canvas.height > MAX_RASTER_DIM {
            return Err(SvgBurstError::export(format!(
                "raster size too large: {}x{} (max {MAX_RASTER_DIM}x{MAX_RASTER_DIM})",
                canvas.width, canvas.height
            )));
        }

        let tree = usvg::Tree::from_str(svg, &self.options).context("parse svg tree")?;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| SvgBurstError::export("failed to allocate svg pixmap"))?;

        let size = tree.size();
        let sx = canvas.width as f32 / size.width();
        let sy = canvas.height as f32 / size.height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        let mut data = pixmap.take();
        unpremultiply_rgba8_in_place(&mut data);
        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data,
        })
    }
}

/// Rasterize one document with a fresh [`Rasterizer`].
pub fn rasterize(svg: &str, canvas: Canvas) -> SvgBurstResult<FrameRGBA> {
    Rasterizer::new().render(svg, canvas)
}

/// Encode a frame as PNG, keeping its alpha channel.
pub fn encode_png(frame: &FrameRGBA) -> SvgBurstResult<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(SvgBurstError::export(format!(
            "frame data is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(
            &frame.data,
            frame.width,
            frame.height,
            image::ExtendedColorType::Rgba8,
        )
        .context("encode png")?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/export/raster.rs"]
mod tests;

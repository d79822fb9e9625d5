//! Glyph source backed by the `fontdue` rasterizer
//!
//! Metrics are reported in 1/64 pixel at the rasterization size, the same
//! fixed-point convention FreeType uses, so design-unit constants such as
//! the fallback box keep their proportions regardless of pixel size.

use std::path::Path;

use fontdue::{Font as FontdueFont, FontSettings, Metrics};

use super::{
    FontError, FontLoader, FontResult, GlyphBitmap, GlyphId, GlyphMetrics, GlyphSource,
};

/// Design units per rasterized pixel
pub const UNITS_PER_PIXEL: f32 = 64.0;

/// Default rasterization size in pixels
pub const DEFAULT_PIXEL_SIZE: f32 = 128.0;

/// A TrueType/OpenType face rasterized with `fontdue`
pub struct FontdueSource {
    font: FontdueFont,
    pixel_size: f32,
}

impl FontdueSource {
    /// Parse font file bytes and rasterize at `pixel_size`
    pub fn from_bytes(bytes: &[u8], pixel_size: f32) -> FontResult<Self> {
        let settings = FontSettings {
            scale: pixel_size,
            ..FontSettings::default()
        };
        let font = FontdueFont::from_bytes(bytes, settings)
            .map_err(|e| FontError::Parse(format!("fontdue error: {e}")))?;

        Ok(Self { font, pixel_size })
    }

    /// Rasterization size in pixels
    pub fn pixel_size(&self) -> f32 {
        self.pixel_size
    }
}

impl GlyphSource for FontdueSource {
    fn has_unicode_charmap(&self) -> bool {
        !self.font.chars().is_empty()
    }

    fn glyph_id(&self, character: char) -> Option<GlyphId> {
        match self.font.lookup_glyph_index(character) {
            0 => None,
            index => Some(GlyphId(index)),
        }
    }

    fn metrics(&self, glyph: GlyphId) -> GlyphMetrics {
        design_metrics(&self.font.metrics_indexed(glyph.0, self.pixel_size))
    }

    fn rasterize(&self, glyph: GlyphId) -> Option<GlyphBitmap> {
        let (m, coverage) = self.font.rasterize_indexed(glyph.0, self.pixel_size);
        if m.width == 0 || m.height == 0 {
            return None;
        }

        Some(GlyphBitmap {
            width: m.width as u32,
            height: m.height as u32,
            coverage,
        })
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> Option<f32> {
        self.font
            .horizontal_kern_indexed(left.0, right.0, self.pixel_size)
            .map(|kern| kern * UNITS_PER_PIXEL)
    }
}

/// Pixel metrics from the rasterizer converted to design units
///
/// `bearing_y` is the top of the ink box above the baseline, so a glyph
/// whose box starts on the baseline has `bearing_y == height`.
fn design_metrics(m: &Metrics) -> GlyphMetrics {
    let top = m.ymin + m.height as i32;

    GlyphMetrics {
        advance_x: m.advance_width * UNITS_PER_PIXEL,
        bearing_x: m.xmin as f32 * UNITS_PER_PIXEL,
        bearing_y: top as f32 * UNITS_PER_PIXEL,
        width: m.width as f32 * UNITS_PER_PIXEL,
        height: m.height as f32 * UNITS_PER_PIXEL,
    }
}

/// Loads font files from disk into [`FontdueSource`]s
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontdueLoader {
    pixel_size: f32,
}

impl FontdueLoader {
    /// Loader rasterizing at `pixel_size`
    pub fn new(pixel_size: f32) -> Self {
        Self { pixel_size }
    }
}

impl Default for FontdueLoader {
    fn default() -> Self {
        Self::new(DEFAULT_PIXEL_SIZE)
    }
}

impl FontLoader for FontdueLoader {
    fn load(&self, path: &Path) -> FontResult<Box<dyn GlyphSource>> {
        let bytes = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let source = FontdueSource::from_bytes(&bytes, self.pixel_size)?;
        log::debug!(
            "Read {} bytes of font data from {} (rasterizing at {} px)",
            bytes.len(),
            path.display(),
            source.pixel_size()
        );
        Ok(Box::new(source))
    }
}

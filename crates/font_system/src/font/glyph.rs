//! Glyph metrics and the per-font glyph table

use std::collections::HashMap;

use crate::render::TextureHandle;

/// Glyph index inside a font face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphId(pub u16);

/// Glyph metrics in font design units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphMetrics {
    /// Horizontal distance to the next glyph origin
    pub advance_x: f32,
    /// Distance from the origin to the left edge of the ink box
    pub bearing_x: f32,
    /// Distance from the baseline to the top edge of the ink box
    pub bearing_y: f32,
    /// Ink box width
    pub width: f32,
    /// Ink box height
    pub height: f32,
}

impl GlyphMetrics {
    /// Side of the placeholder box used for characters without a glyph
    pub const FALLBACK_EXTENT: f32 = 500.0;

    /// Placeholder metrics for characters the font cannot draw
    ///
    /// The box sits on the baseline and advances by its own width, so
    /// unsupported characters still take up room on the line.
    pub const fn fallback() -> Self {
        Self {
            advance_x: Self::FALLBACK_EXTENT,
            bearing_x: 0.0,
            bearing_y: 0.0,
            width: Self::FALLBACK_EXTENT,
            height: Self::FALLBACK_EXTENT,
        }
    }

    /// Whether the glyph sits on the baseline with no descender
    pub fn rests_on_baseline(&self) -> bool {
        (self.bearing_y - self.height).abs() <= f32::EPSILON
    }
}

/// 8-bit coverage bitmap produced by the rasterizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major coverage, top row first, exactly `width * height` bytes
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    /// Whether the buffer is tightly packed for the declared size
    pub fn is_tightly_packed(&self) -> bool {
        self.coverage.len() == self.width as usize * self.height as usize
    }
}

/// A glyph loaded into a font: metrics plus its uploaded texture
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Character the glyph was loaded for
    pub character: char,
    /// Index in the font face, used for kerning lookups
    pub id: GlyphId,
    /// Design-unit metrics
    pub metrics: GlyphMetrics,
    /// Texture for drawing, `None` for glyphs without ink (spaces)
    pub texture: Option<TextureHandle>,
}

/// Loaded glyphs of a font keyed by character
#[derive(Debug, Clone, Default)]
pub struct GlyphTable {
    glyphs: HashMap<char, Glyph>,
}

impl GlyphTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a glyph, replacing any glyph already loaded for its character
    pub fn insert(&mut self, glyph: Glyph) {
        self.glyphs.insert(glyph.character, glyph);
    }

    /// Glyph for a character, if the font loaded one
    pub fn get(&self, character: char) -> Option<&Glyph> {
        self.glyphs.get(&character)
    }

    /// Number of loaded glyphs
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether no glyph was loaded
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Iterate over all loaded glyphs
    pub fn iter(&self) -> impl Iterator<Item = &Glyph> {
        self.glyphs.values()
    }

    /// Textures owned by the glyphs in this table
    pub fn textures(&self) -> impl Iterator<Item = TextureHandle> + '_ {
        self.glyphs.values().filter_map(|glyph| glyph.texture)
    }

    /// Reference height for scaling: the tallest glyph resting on the baseline
    ///
    /// Descenders are excluded so the reference behaves like a cap height.
    /// Returns 0 when no glyph qualifies.
    pub fn line_height_metric(&self) -> f32 {
        self.glyphs
            .values()
            .filter(|glyph| glyph.metrics.rests_on_baseline())
            .map(|glyph| glyph.metrics.height)
            .fold(0.0, f32::max)
    }
}

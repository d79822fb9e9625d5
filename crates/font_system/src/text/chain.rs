//! Glyph chains: ordered placements for one run of text
//!
//! Each placement stores its offset from the previous placement's origin
//! (`dx`, `dy`) plus the position of its ink box relative to its own origin
//! (`x`, `y`). Walking a chain and accumulating `dx`/`dy` gives absolute
//! positions, which is what makes breaking and justification cheap: moving
//! one placement moves everything after it.

use crate::font::{GlyphId, GlyphMetrics, GlyphTable, KerningTable};
use crate::foundation::math::Vec2;
use crate::render::{GlyphQuad, TextureHandle};

/// One positioned glyph, in output units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    /// Character this placement was built from
    pub character: char,
    /// Loaded glyph, `None` when the fallback box is used
    pub glyph: Option<GlyphId>,
    /// Texture to draw, `None` for zero-ink glyphs and fallback boxes
    pub texture: Option<TextureHandle>,
    /// Horizontal offset from the previous placement's origin
    pub dx: f32,
    /// Vertical offset from the previous placement's origin
    pub dy: f32,
    /// Left edge of the ink box relative to this placement's origin
    pub x: f32,
    /// Bottom edge of the ink box relative to the baseline
    pub y: f32,
    /// Ink box width
    pub width: f32,
    /// Ink box height
    pub height: f32,
    /// Scaled advance, used to position the following placement
    pub advance: f32,
}

impl GlyphPlacement {
    /// Whether a real glyph (not the fallback box) backs this placement
    pub fn has_glyph(&self) -> bool {
        self.glyph.is_some()
    }

    /// Whether the placement is a whitespace character
    pub fn is_whitespace(&self) -> bool {
        self.character.is_whitespace()
    }

    /// Whether full justification may widen this placement
    ///
    /// Only whitespace backed by a real glyph; a fallback box keeps its place.
    pub fn is_stretchable(&self) -> bool {
        self.has_glyph() && self.is_whitespace()
    }

    /// Whether a line may be broken in front of this placement
    pub fn is_break_opportunity(&self) -> bool {
        !self.has_glyph() || self.is_whitespace()
    }

    /// Right edge of the ink box relative to this placement's origin
    pub fn right_edge(&self) -> f32 {
        self.x + self.width
    }
}

/// Ordered placements for one run of text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphChain {
    placements: Vec<GlyphPlacement>,
}

impl GlyphChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain for `text`, one placement per character
    ///
    /// Characters missing from `glyphs` get a fallback box so they still
    /// occupy space. `scale` converts design units to output units.
    /// Kerning is a separate pass, see [`Self::apply_kerning`].
    pub fn build(glyphs: &GlyphTable, text: &str, scale: f32) -> Self {
        let mut placements: Vec<GlyphPlacement> = Vec::with_capacity(text.len());

        for character in text.chars() {
            let glyph = glyphs.get(character);
            let metrics = glyph.map_or_else(GlyphMetrics::fallback, |g| g.metrics);

            let (dx, x) = match placements.last() {
                None => (0.0, 0.0),
                Some(previous) => (previous.advance, metrics.bearing_x * scale),
            };

            placements.push(GlyphPlacement {
                character,
                glyph: glyph.map(|g| g.id),
                texture: glyph.and_then(|g| g.texture),
                dx,
                dy: 0.0,
                x,
                y: (metrics.bearing_y - metrics.height) * scale,
                width: metrics.width * scale,
                height: metrics.height * scale,
                advance: metrics.advance_x * scale,
            });
        }

        Self { placements }
    }

    /// Add pair kerning to every placement that follows a kerned pair
    ///
    /// Pairs involving a fallback box are never kerned. Apply once per
    /// chain; a second pass would double the adjustments.
    pub fn apply_kerning(&mut self, kerning: &KerningTable, scale: f32) {
        if kerning.is_empty() || self.placements.len() < 2 {
            return;
        }

        for i in 1..self.placements.len() {
            let (Some(left), Some(right)) = (self.placements[i - 1].glyph, self.placements[i].glyph)
            else {
                continue;
            };
            if let Some(adjustment) = kerning.get(left, right) {
                self.placements[i].dx += adjustment * scale;
            }
        }
    }

    /// Distance from the first placement's origin to the last ink right edge
    ///
    /// The first placement's own `dx` is not counted, so a line shifted by
    /// justification still reports its natural length.
    pub fn measured_length(&self) -> f32 {
        let Some(last) = self.placements.last() else {
            return 0.0;
        };
        let offsets: f32 = self.placements.iter().skip(1).map(|p| p.dx).sum();
        offsets + last.right_edge()
    }

    /// Number of placements
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether the chain has no placements
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// All placements in order
    pub fn placements(&self) -> &[GlyphPlacement] {
        &self.placements
    }

    /// Mutable access to the placements
    pub fn placements_mut(&mut self) -> &mut [GlyphPlacement] {
        &mut self.placements
    }

    /// Iterate over placements in order
    pub fn iter(&self) -> std::slice::Iter<'_, GlyphPlacement> {
        self.placements.iter()
    }

    /// Characters of the chain as a string
    pub fn text(&self) -> String {
        self.placements.iter().map(|p| p.character).collect()
    }

    /// Number of placements full justification can widen
    pub fn stretchable_count(&self) -> usize {
        self.placements.iter().filter(|p| p.is_stretchable()).count()
    }

    /// Split the chain in two; `self` keeps `[0, at)`
    pub fn split_off(&mut self, at: usize) -> Self {
        Self {
            placements: self.placements.split_off(at),
        }
    }

    /// Remove `count` placements from the front
    pub fn drain_front(&mut self, count: usize) {
        self.placements.drain(..count.min(self.placements.len()));
    }

    /// Absolute ink quads, walking from `(0, baseline)`
    pub fn quads(&self, baseline: f32) -> Vec<GlyphQuad> {
        let mut origin = Vec2::new(0.0, baseline);

        self.placements
            .iter()
            .map(|p| {
                origin.x += p.dx;
                origin.y += p.dy;
                GlyphQuad {
                    texture: p.texture,
                    position: Vec2::new(origin.x + p.x, origin.y + p.y),
                    size: Vec2::new(p.width, p.height),
                }
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a GlyphChain {
    type Item = &'a GlyphPlacement;
    type IntoIter = std::slice::Iter<'a, GlyphPlacement>;

    fn into_iter(self) -> Self::IntoIter {
        self.placements.iter()
    }
}

impl FromIterator<GlyphPlacement> for GlyphChain {
    fn from_iter<I: IntoIterator<Item = GlyphPlacement>>(iter: I) -> Self {
        Self {
            placements: iter.into_iter().collect(),
        }
    }
}

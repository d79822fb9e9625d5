//! Pairwise kerning table

use std::collections::HashMap;

use super::{GlyphId, GlyphSource};

/// Sparse map from ordered glyph pairs to a horizontal adjustment
///
/// Built once per font from the glyphs it loaded. Adjustments are kept in
/// design units and scaled when applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KerningTable {
    pairs: HashMap<(GlyphId, GlyphId), f32>,
}

impl KerningTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Query every ordered pair of `glyphs` (self pairs included)
    ///
    /// Only pairs the source reports an adjustment for are stored.
    pub fn build(source: &dyn GlyphSource, glyphs: &[GlyphId]) -> Self {
        let mut table = Self::new();
        if !source.has_kerning() {
            return table;
        }

        for &left in glyphs {
            for &right in glyphs {
                if let Some(adjustment) = source.kerning(left, right) {
                    table.insert(left, right, adjustment);
                }
            }
        }

        log::debug!(
            "Kerning table: {} pairs from {} glyphs",
            table.len(),
            glyphs.len()
        );
        table
    }

    /// Store the adjustment for an ordered pair
    pub fn insert(&mut self, left: GlyphId, right: GlyphId, adjustment: f32) {
        self.pairs.insert((left, right), adjustment);
    }

    /// Adjustment between `left` followed by `right`
    pub fn get(&self, left: GlyphId, right: GlyphId) -> Option<f32> {
        self.pairs.get(&(left, right)).copied()
    }

    /// Number of stored pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the font has no kerning pairs
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

//! Synthetic fonts for tests
//!
//! [`MonoSource`] is a monospace face: every glyph of the default character
//! set is a 10×10 box advancing 10 units, except the space which has no ink.
//! With a line height of 10 the output scale is exactly 1.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::font::{
    FontError, FontLoader, FontResult, Glyph, GlyphBitmap, GlyphId, GlyphMetrics, GlyphSource,
    GlyphTable, KerningTable, DEFAULT_CHARACTER_SET,
};
use crate::render::TextureHandle;

pub const MONO_EXTENT: f32 = 10.0;

#[derive(Debug, Clone, Default)]
pub struct MonoSource {
    removed: HashSet<char>,
    descenders: HashMap<char, f32>,
    kerning: HashMap<(char, char), f32>,
    torn: HashSet<char>,
    no_charmap: bool,
}

impl MonoSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without(mut self, character: char) -> Self {
        self.removed.insert(character);
        self
    }

    pub fn with_descender(mut self, character: char, depth: f32) -> Self {
        self.descenders.insert(character, depth);
        self
    }

    pub fn with_kerning(mut self, left: char, right: char, adjustment: f32) -> Self {
        self.kerning.insert((left, right), adjustment);
        self
    }

    pub fn with_torn_bitmap(mut self, character: char) -> Self {
        self.torn.insert(character);
        self
    }

    pub fn without_charmap(mut self) -> Self {
        self.no_charmap = true;
        self
    }

    fn character(glyph: GlyphId) -> char {
        char::from_u32(u32::from(glyph.0)).unwrap_or('\0')
    }
}

impl GlyphSource for MonoSource {
    fn has_unicode_charmap(&self) -> bool {
        !self.no_charmap
    }

    fn glyph_id(&self, character: char) -> Option<GlyphId> {
        (DEFAULT_CHARACTER_SET.contains(character) && !self.removed.contains(&character))
            .then(|| GlyphId(character as u16))
    }

    fn metrics(&self, glyph: GlyphId) -> GlyphMetrics {
        let character = Self::character(glyph);
        if character == ' ' {
            return GlyphMetrics {
                advance_x: MONO_EXTENT,
                ..GlyphMetrics::default()
            };
        }

        let depth = self.descenders.get(&character).copied().unwrap_or(0.0);
        GlyphMetrics {
            advance_x: MONO_EXTENT,
            bearing_x: 0.0,
            bearing_y: MONO_EXTENT,
            width: MONO_EXTENT,
            height: MONO_EXTENT + depth,
        }
    }

    fn rasterize(&self, glyph: GlyphId) -> Option<GlyphBitmap> {
        let character = Self::character(glyph);
        if character == ' ' {
            return None;
        }

        let size = if self.torn.contains(&character) { 3 } else { 4 };
        Some(GlyphBitmap {
            width: 2,
            height: 2,
            coverage: vec![255; size],
        })
    }

    fn has_kerning(&self) -> bool {
        !self.kerning.is_empty()
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> Option<f32> {
        self.kerning
            .get(&(Self::character(left), Self::character(right)))
            .copied()
    }
}

/// Glyph and kerning tables for `source` without a backend
///
/// Inked glyphs get a made-up texture handle so quads carry one.
pub fn mono_tables(source: &MonoSource) -> (GlyphTable, KerningTable) {
    let mut glyphs = GlyphTable::new();
    let mut ids = Vec::new();

    for character in DEFAULT_CHARACTER_SET.chars() {
        let Some(id) = source.glyph_id(character) else {
            continue;
        };
        glyphs.insert(Glyph {
            character,
            id,
            metrics: source.metrics(id),
            texture: source
                .rasterize(id)
                .map(|_| TextureHandle(u64::from(id.0))),
        });
        ids.push(id);
    }

    let kerning = KerningTable::build(source, &ids);
    (glyphs, kerning)
}

/// Loader handing out [`MonoSource`]s and counting how often it was asked
pub struct MonoLoader {
    source: MonoSource,
    missing: HashSet<PathBuf>,
    loads: Rc<Cell<usize>>,
}

impl MonoLoader {
    pub fn new(source: MonoSource) -> Self {
        Self {
            source,
            missing: HashSet::new(),
            loads: Rc::new(Cell::new(0)),
        }
    }

    pub fn with_missing(mut self, path: impl Into<PathBuf>) -> Self {
        self.missing.insert(path.into());
        self
    }

    pub fn load_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.loads)
    }
}

impl FontLoader for MonoLoader {
    fn load(&self, path: &Path) -> FontResult<Box<dyn GlyphSource>> {
        self.loads.set(self.loads.get() + 1);

        if self.missing.contains(path) {
            return Err(FontError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such font"),
            });
        }
        Ok(Box::new(self.source.clone()))
    }
}

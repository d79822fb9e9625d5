//! Capability traits for the font rasterizer and font file loading

use std::path::{Path, PathBuf};

use super::{FontResult, GlyphBitmap, GlyphId, GlyphMetrics};

/// Per-glyph data supplied by a font rasterizer
///
/// Queried only while a font is being loaded; the results are cached in the
/// font's glyph and kerning tables.
pub trait GlyphSource {
    /// Whether the face has a Unicode character map
    fn has_unicode_charmap(&self) -> bool;

    /// Glyph index for a character, `None` if the face has no glyph for it
    fn glyph_id(&self, character: char) -> Option<GlyphId>;

    /// Design-unit metrics of a glyph
    fn metrics(&self, glyph: GlyphId) -> GlyphMetrics;

    /// Coverage bitmap of a glyph, `None` for glyphs without ink
    fn rasterize(&self, glyph: GlyphId) -> Option<GlyphBitmap>;

    /// Whether the face carries kerning data at all
    fn has_kerning(&self) -> bool {
        true
    }

    /// Horizontal kerning for an ordered glyph pair, in design units
    fn kerning(&self, left: GlyphId, right: GlyphId) -> Option<f32>;
}

/// Opens font files and produces glyph sources for them
pub trait FontLoader {
    /// Load the font file at `path`
    fn load(&self, path: &Path) -> FontResult<Box<dyn GlyphSource>>;
}

/// Maps a font name to the file it is loaded from
pub trait FontPathResolver {
    /// Resolve `font` (a file name such as `OpenSans-Regular.ttf`) to a path
    fn resolve(&self, font: &str) -> PathBuf;
}

/// Resolves font names relative to a fixed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryResolver {
    root: PathBuf,
}

impl DirectoryResolver {
    /// Directory used when none is configured
    pub const DEFAULT_ROOT: &'static str = "Fonts";

    /// Resolve fonts inside `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory fonts are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for DirectoryResolver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ROOT)
    }
}

impl FontPathResolver for DirectoryResolver {
    fn resolve(&self, font: &str) -> PathBuf {
        self.root.join(font)
    }
}

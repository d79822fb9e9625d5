//! Font loading
//!
//! A [`Font`] is built once from a [`GlyphSource`]: glyphs of the supported
//! character set are rasterized and uploaded, the kerning table is built,
//! and the line height reference metric is measured. After that the font is
//! read-only apart from its static text cache.

mod font_face;
mod fontdue_source;
mod glyph;
mod kerning;
mod source;

pub use font_face::{Font, FontError, FontResult};
pub use fontdue_source::{FontdueLoader, FontdueSource, DEFAULT_PIXEL_SIZE, UNITS_PER_PIXEL};
pub use glyph::{Glyph, GlyphBitmap, GlyphId, GlyphMetrics, GlyphTable};
pub use kerning::KerningTable;
pub use source::{DirectoryResolver, FontLoader, FontPathResolver, GlyphSource};

/// Characters loaded for every font unless configured otherwise
pub const DEFAULT_CHARACTER_SET: &str = concat!(
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789",
    "`~!@#$%^&*()_+-={}[],.<>/?'\";: ",
);

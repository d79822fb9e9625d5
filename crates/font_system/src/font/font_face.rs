//! An initialized font and its load procedure

use std::path::PathBuf;
use std::sync::Arc;

use super::{Glyph, GlyphId, GlyphSource, GlyphTable, KerningTable};
use crate::cache::LayoutCache;
use crate::render::{BackendError, GlyphImage, RenderedText, TextBackend, TextureHandle};
use crate::text::{layout_text, GlyphChain, LayoutParameters, TextLayout};

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur while loading a font
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Font file could not be read
    #[error("Failed to read font file {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Rasterizer rejected the font data
    #[error("Failed to parse font: {0}")]
    Parse(String),

    /// Face has no Unicode character map
    #[error("Font has no Unicode character map")]
    NoUnicodeCharmap,

    /// No glyph of the character set could be loaded, or none rests on the baseline
    #[error("Font has no usable glyphs in the supported character set")]
    NoUsableGlyphs,

    /// Rasterizer produced an unusable bitmap
    #[error("Failed to rasterize glyph '{0}': {1}")]
    Rasterize(char, String),

    /// Glyph texture upload failed
    #[error("Failed to upload glyph texture: {0}")]
    Upload(#[from] BackendError),
}

/// A loaded font ready for layout
///
/// Glyph, kerning and metric tables are immutable after [`Font::load`], so
/// layout and measurement take `&self` and may run concurrently. Static text
/// artifacts are memoized in a shared cache until [`Font::release`].
#[derive(Debug)]
pub struct Font {
    name: String,
    glyphs: GlyphTable,
    kerning: KerningTable,
    line_height_metric: f32,
    static_text: LayoutCache<RenderedText>,
}

impl Font {
    /// Load the glyphs of `character_set` from `source`
    ///
    /// Glyph images are uploaded to `backend`. On failure every texture
    /// uploaded so far is released again and no font is produced.
    pub fn load<B>(
        name: &str,
        source: &dyn GlyphSource,
        character_set: &str,
        backend: &mut B,
    ) -> FontResult<Self>
    where
        B: TextBackend + ?Sized,
    {
        if !source.has_unicode_charmap() {
            return Err(FontError::NoUnicodeCharmap);
        }

        let mut glyphs = GlyphTable::new();
        let mut ids: Vec<GlyphId> = Vec::new();

        for character in character_set.chars() {
            if glyphs.get(character).is_some() {
                continue;
            }
            let Some(id) = source.glyph_id(character) else {
                log::debug!("Font '{}' has no glyph for {:?}", name, character);
                continue;
            };

            let glyph = match load_glyph(source, character, id, backend) {
                Ok(glyph) => glyph,
                Err(e) => {
                    release_textures(backend, glyphs.textures());
                    return Err(e);
                }
            };

            glyphs.insert(glyph);
            ids.push(id);
        }

        let line_height_metric = glyphs.line_height_metric();
        if glyphs.is_empty() || line_height_metric <= 0.0 {
            release_textures(backend, glyphs.textures());
            return Err(FontError::NoUsableGlyphs);
        }

        let kerning = KerningTable::build(source, &ids);

        log::info!(
            "Loaded font '{}': {} glyphs, {} kerning pairs, reference height {}",
            name,
            glyphs.len(),
            kerning.len(),
            line_height_metric
        );

        Ok(Self {
            name: name.to_owned(),
            glyphs,
            kerning,
            line_height_metric,
            static_text: LayoutCache::new(),
        })
    }

    /// Release glyph textures and drop memoized text
    pub fn release<B>(self, backend: &mut B)
    where
        B: TextBackend + ?Sized,
    {
        self.static_text.clear();
        release_textures(backend, self.glyphs.textures());
        log::debug!("Released font '{}'", self.name);
    }

    /// Name the font was loaded under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Loaded glyphs
    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    /// Kerning pairs
    pub fn kerning(&self) -> &KerningTable {
        &self.kerning
    }

    /// Reference height in design units used to derive the output scale
    pub fn line_height_metric(&self) -> f32 {
        self.line_height_metric
    }

    /// Design-unit to output-unit factor for a given line height
    pub fn scale_for(&self, line_height: f32) -> f32 {
        line_height / self.line_height_metric
    }

    /// One unbroken, kerned chain for `text`
    pub fn build_chain(&self, text: &str, line_height: f32) -> GlyphChain {
        let scale = self.scale_for(line_height);
        let mut chain = GlyphChain::build(&self.glyphs, text, scale);
        chain.apply_kerning(&self.kerning, scale);
        chain
    }

    /// Lay out `text` with `params`
    pub fn layout(&self, text: &str, params: &LayoutParameters) -> TextLayout {
        layout_text(text, params, |paragraph| {
            self.build_chain(paragraph, params.line_height)
        })
    }

    /// Length of `text` on a single line, ignoring wrapping and justification
    pub fn measure_length(&self, text: &str, line_height: f32) -> f32 {
        self.build_chain(text, line_height).measured_length()
    }

    /// Whether a rendered artifact is memoized for `text`
    pub fn is_memoized(&self, text: &str) -> bool {
        self.static_text.contains(text)
    }

    /// Memoized artifact for `text`, laying it out with `params` on a miss
    ///
    /// The key is the literal text only; parameters changed after the
    /// first call do not affect an existing entry.
    pub fn render_static(&self, text: &str, params: &LayoutParameters) -> Arc<RenderedText> {
        self.static_text
            .get_or_insert_with(text, || self.layout(text, params).render())
    }

    /// Number of memoized texts
    pub fn memoized_count(&self) -> usize {
        self.static_text.len()
    }
}

fn load_glyph<B>(
    source: &dyn GlyphSource,
    character: char,
    id: GlyphId,
    backend: &mut B,
) -> FontResult<Glyph>
where
    B: TextBackend + ?Sized,
{
    let metrics = source.metrics(id);

    let texture = match source.rasterize(id) {
        None => None,
        Some(bitmap) => {
            if !bitmap.is_tightly_packed() {
                return Err(FontError::Rasterize(
                    character,
                    format!(
                        "{} coverage bytes for a {}x{} bitmap",
                        bitmap.coverage.len(),
                        bitmap.width,
                        bitmap.height
                    ),
                ));
            }
            let image = GlyphImage::from_coverage(bitmap.width, bitmap.height, &bitmap.coverage);
            Some(backend.upload_glyph(&image)?)
        }
    };

    Ok(Glyph {
        character,
        id,
        metrics,
        texture,
    })
}

fn release_textures<B>(backend: &mut B, textures: impl Iterator<Item = TextureHandle>)
where
    B: TextBackend + ?Sized,
{
    for texture in textures {
        if let Err(e) = backend.release_glyph(texture) {
            log::warn!("Failed to release glyph texture: {}", e);
        }
    }
}

//! Rendering collaborator boundary
//!
//! The layout engine never talks to a graphics API directly. Glyph bitmaps are
//! handed to a [`TextBackend`] once at font load, and finished layouts are
//! submitted to it as lists of textured quads.

mod recording;

pub use recording::{DrawCall, RecordingBackend};

pub use image::ImageError;

use crate::foundation::math::Vec2;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors reported by a rendering backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// No room left for another glyph texture
    #[error("Out of texture memory ({capacity} textures allocated)")]
    OutOfTextureMemory {
        /// Number of live textures when the upload was refused
        capacity: usize,
    },

    /// Handle does not refer to a live texture
    #[error("Unknown texture handle {0:?}")]
    UnknownTexture(TextureHandle),
}

/// Opaque handle to a glyph texture owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// RGBA8 image of a single glyph, ready for upload
///
/// Rows are stored top to bottom. Color channels are white and glyph
/// coverage lives in alpha, so the draw color can be applied by modulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphImage {
    /// Width in texels
    pub width: u32,
    /// Height in texels
    pub height: u32,
    /// Texel data, 4 bytes per texel
    pub data: Vec<u8>,
}

impl GlyphImage {
    /// Bytes per texel of the upload format
    pub const CHANNELS: usize = 4;

    /// Expand an 8-bit coverage bitmap into RGBA texels
    pub fn from_coverage(width: u32, height: u32, coverage: &[u8]) -> Self {
        let mut data = Vec::with_capacity(coverage.len() * Self::CHANNELS);
        for &alpha in coverage {
            data.extend_from_slice(&[255, 255, 255, alpha]);
        }
        Self { width, height, data }
    }

    /// Coverage value of the texel at (x, y)
    pub fn coverage_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y * self.width + x) as usize * Self::CHANNELS + 3;
        self.data.get(index).copied()
    }

    /// Write the image as a PNG file for debugging
    pub fn save_png(&self, path: impl AsRef<std::path::Path>) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.data,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )
    }
}

/// One positioned glyph quad in text-local output units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    /// Glyph texture, `None` for zero-ink glyphs and fallback boxes
    pub texture: Option<TextureHandle>,
    /// Lower-left corner
    pub position: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl GlyphQuad {
    /// Same quad moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            position: self.position + offset,
            ..*self
        }
    }
}

/// Immutable rendered result of a text, kept for static text
///
/// This is what gets memoized: replaying it only needs the backend,
/// not the font tables or a new layout pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedText {
    /// Quads of every line, in drawing order
    pub quads: Vec<GlyphQuad>,
    /// Number of lines the text was laid out into
    pub line_count: usize,
}

/// Rendering backend used by the font system
///
/// Implementations own the GPU (or other) resources behind texture handles.
/// Only one font system should drive a given backend since it keeps
/// textures alive for as long as their fonts are loaded.
pub trait TextBackend {
    /// Upload a glyph image and return a handle for drawing it
    fn upload_glyph(&mut self, image: &GlyphImage) -> BackendResult<TextureHandle>;

    /// Release a glyph texture previously returned by [`Self::upload_glyph`]
    fn release_glyph(&mut self, handle: TextureHandle) -> BackendResult<()>;

    /// Draw quads with their positions offset by `origin`
    ///
    /// A quad without texture is drawn as a solid box.
    fn draw_quads(&mut self, origin: Vec2, quads: &[GlyphQuad]) -> BackendResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_expansion() {
        let image = GlyphImage::from_coverage(2, 1, &[0, 200]);
        assert_eq!(image.data, vec![255, 255, 255, 0, 255, 255, 255, 200]);
        assert_eq!(image.coverage_at(1, 0), Some(200));
        assert_eq!(image.coverage_at(2, 0), None);
    }

    #[test]
    fn test_quad_translation() {
        let quad = GlyphQuad {
            texture: None,
            position: Vec2::new(1.0, 2.0),
            size: Vec2::new(3.0, 4.0),
        };
        let moved = quad.translated(Vec2::new(10.0, -10.0));
        assert_eq!(moved.position, Vec2::new(11.0, -8.0));
        assert_eq!(moved.size, quad.size);
    }
}

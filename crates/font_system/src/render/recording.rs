//! In-memory backend that keeps uploaded glyph images and records draw calls
//!
//! Used headless: by tests, by tools that want quads instead of pixels, and
//! by the demo binary.

use slotmap::{DefaultKey, Key, KeyData, SlotMap};

use super::{BackendError, BackendResult, GlyphImage, GlyphQuad, TextBackend, TextureHandle};
use crate::foundation::math::Vec2;

/// A recorded `draw_quads` submission
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Origin the quads were drawn at
    pub origin: Vec2,
    /// Quads as submitted (relative to `origin`)
    pub quads: Vec<GlyphQuad>,
}

/// Headless [`TextBackend`]
#[derive(Debug, Default)]
pub struct RecordingBackend {
    textures: SlotMap<DefaultKey, GlyphImage>,
    draw_calls: Vec<DrawCall>,
    texture_capacity: Option<usize>,
    uploads: usize,
}

impl RecordingBackend {
    /// Create a backend with unlimited texture storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that refuses uploads past `capacity` live textures
    pub fn with_texture_capacity(capacity: usize) -> Self {
        Self {
            texture_capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Number of live textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Total number of successful uploads since creation
    pub fn upload_count(&self) -> usize {
        self.uploads
    }

    /// Image behind a live texture handle
    pub fn texture(&self, handle: TextureHandle) -> Option<&GlyphImage> {
        self.textures.get(Self::key(handle))
    }

    /// All draw calls recorded so far
    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }

    fn key(handle: TextureHandle) -> DefaultKey {
        KeyData::from_ffi(handle.0).into()
    }
}

impl TextBackend for RecordingBackend {
    fn upload_glyph(&mut self, image: &GlyphImage) -> BackendResult<TextureHandle> {
        if let Some(capacity) = self.texture_capacity {
            if self.textures.len() >= capacity {
                return Err(BackendError::OutOfTextureMemory { capacity });
            }
        }

        let key = self.textures.insert(image.clone());
        self.uploads += 1;
        Ok(TextureHandle(key.data().as_ffi()))
    }

    fn release_glyph(&mut self, handle: TextureHandle) -> BackendResult<()> {
        self.textures
            .remove(Self::key(handle))
            .map(|_| ())
            .ok_or(BackendError::UnknownTexture(handle))
    }

    fn draw_quads(&mut self, origin: Vec2, quads: &[GlyphQuad]) -> BackendResult<()> {
        for quad in quads {
            if let Some(texture) = quad.texture {
                if !self.textures.contains_key(Self::key(texture)) {
                    return Err(BackendError::UnknownTexture(texture));
                }
            }
        }

        self.draw_calls.push(DrawCall {
            origin,
            quads: quads.to_vec(),
        });
        Ok(())
    }
}

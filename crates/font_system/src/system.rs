//! The font system façade
//!
//! [`FontSystem`] owns the rendering backend, the loaded fonts and the
//! current layout settings. Fonts are loaded lazily on first use and stay
//! cached by lowercase name until [`FontSystem::finalize`].

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::config::{ConfigError, FontSystemConfig};
use crate::font::{
    DirectoryResolver, Font, FontError, FontLoader, FontPathResolver, FontdueLoader,
    DEFAULT_CHARACTER_SET,
};
use crate::foundation::math::Vec2;
use crate::render::{BackendError, TextBackend};
use crate::text::{
    check_baseline_delta, check_line_height, check_line_width, Justification, LayoutParameters,
    ParameterError, TextLayout,
};

/// Errors returned by [`FontSystem`] operations
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The system has not been initialized
    #[error("Font system is not initialized")]
    NotInitialized,

    /// The system was initialized twice
    #[error("Font system is already initialized")]
    AlreadyInitialized,

    /// No font name is set
    #[error("No font selected")]
    NoFontSelected,

    /// The current font could not be loaded
    #[error("Font '{font}' is unavailable: {source}")]
    FontUnavailable {
        /// Name of the font
        font: String,
        /// Why loading failed
        #[source]
        source: FontError,
    },

    /// The backend rejected a draw
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Text layout and drawing on top of a [`TextBackend`]
pub struct FontSystem<B: TextBackend> {
    backend: B,
    resolver: Box<dyn FontPathResolver>,
    loader: Box<dyn FontLoader>,
    fonts: HashMap<String, Font>,
    font: String,
    character_set: String,
    params: LayoutParameters,
    initialized: bool,
}

impl<B: TextBackend> FontSystem<B> {
    /// Create an uninitialized system with default settings
    ///
    /// Fonts are read from the `Fonts` directory with [`FontdueLoader`].
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            resolver: Box::new(DirectoryResolver::default()),
            loader: Box::new(FontdueLoader::default()),
            fonts: HashMap::new(),
            font: FontSystemConfig::DEFAULT_FONT.to_string(),
            character_set: DEFAULT_CHARACTER_SET.to_string(),
            params: LayoutParameters::default(),
            initialized: false,
        }
    }

    /// Create an uninitialized system from validated settings
    pub fn from_config(backend: B, config: &FontSystemConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut system = Self::new(backend)
            .with_resolver(DirectoryResolver::new(&config.font_directory))
            .with_loader(FontdueLoader::new(config.pixel_size));
        system.font.clone_from(&config.font);
        system.character_set.clone_from(&config.character_set);
        system.params = config.layout;
        Ok(system)
    }

    /// Replace the font path resolver
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl FontPathResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Replace the font loader
    #[must_use]
    pub fn with_loader(mut self, loader: impl FontLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Make the system ready for layout
    pub fn initialize(&mut self) -> Result<(), LayoutError> {
        if self.initialized {
            return Err(LayoutError::AlreadyInitialized);
        }
        self.initialized = true;
        log::info!("Font system initialized (font '{}')", self.font);
        Ok(())
    }

    /// Release every loaded font and its memoized text
    ///
    /// The system can be initialized again afterwards.
    pub fn finalize(&mut self) {
        for (_, font) in self.fonts.drain() {
            font.release(&mut self.backend);
        }
        if self.initialized {
            log::info!("Font system finalized");
        }
        self.initialized = false;
    }

    /// Whether [`FontSystem::initialize`] has been called
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Select the font used by later calls
    ///
    /// Loading is deferred until the font is first needed.
    pub fn set_font(&mut self, font: impl Into<String>) {
        self.font = font.into();
    }

    /// Current font name
    pub fn font(&self) -> &str {
        &self.font
    }

    /// Set the characters loaded for fonts that are not loaded yet
    pub fn set_character_set(&mut self, character_set: impl Into<String>) {
        self.character_set = character_set.into();
    }

    /// Characters loaded for each font
    pub fn character_set(&self) -> &str {
        &self.character_set
    }

    /// Set the maximum line width; 0 disables wrapping and justification
    pub fn set_line_width(&mut self, width: f32) -> Result<(), ParameterError> {
        check_line_width(width)?;
        self.params.max_line_width = width;
        Ok(())
    }

    /// Maximum line width
    pub fn line_width(&self) -> f32 {
        self.params.max_line_width
    }

    /// Set the output glyph height
    ///
    /// Rejected if the current baseline delta would no longer span a line.
    pub fn set_line_height(&mut self, height: f32) -> Result<(), ParameterError> {
        check_line_height(height)?;
        check_baseline_delta(self.params.baseline_delta, height)?;
        self.params.line_height = height;
        Ok(())
    }

    /// Output glyph height
    pub fn line_height(&self) -> f32 {
        self.params.line_height
    }

    /// Set the vertical offset between consecutive baselines
    pub fn set_baseline_delta(&mut self, delta: f32) -> Result<(), ParameterError> {
        check_baseline_delta(delta, self.params.line_height)?;
        self.params.baseline_delta = delta;
        Ok(())
    }

    /// Vertical offset between consecutive baselines
    pub fn baseline_delta(&self) -> f32 {
        self.params.baseline_delta
    }

    /// Set horizontal alignment
    pub fn set_justification(&mut self, justification: Justification) {
        self.params.justification = justification;
    }

    /// Horizontal alignment
    pub fn justification(&self) -> Justification {
        self.params.justification
    }

    /// Enable or disable breaking at whitespace
    pub fn set_word_wrap(&mut self, word_wrap: bool) {
        self.params.word_wrap = word_wrap;
    }

    /// Whether lines break at whitespace
    pub fn word_wrap(&self) -> bool {
        self.params.word_wrap
    }

    /// All layout settings
    pub fn parameters(&self) -> &LayoutParameters {
        &self.params
    }

    /// Lay out `text` with the current font and settings
    pub fn layout(&mut self, text: &str) -> Result<TextLayout, LayoutError> {
        let params = self.params;
        let font = self.current_font()?;
        Ok(font.layout(text, &params))
    }

    /// Length of `text` on one line, ignoring wrapping and justification
    pub fn measure_length(&mut self, text: &str) -> Result<f32, LayoutError> {
        let line_height = self.params.line_height;
        let font = self.current_font()?;
        Ok(font.measure_length(text, line_height))
    }

    /// Whether the current font has a memoized artifact for `text`
    ///
    /// Never loads a font; an unloaded font has nothing memoized.
    pub fn is_memoized(&self, text: &str) -> bool {
        self.initialized
            && self
                .fonts
                .get(&font_key(&self.font))
                .is_some_and(|font| font.is_memoized(text))
    }

    /// Draw `text` at the origin
    pub fn draw_text(&mut self, text: &str, static_text: bool) -> Result<(), LayoutError> {
        self.draw_text_at(0.0, 0.0, text, static_text)
    }

    /// Draw `text` with its first baseline starting at (`x`, `y`)
    ///
    /// Static text is laid out once and replayed from the font's cache on
    /// later calls.
    pub fn draw_text_at(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        static_text: bool,
    ) -> Result<(), LayoutError> {
        let params = self.params;
        let font = self.current_font()?;

        if text.is_empty() {
            return Ok(());
        }

        let quads = if static_text {
            font.render_static(text, &params).quads.clone()
        } else {
            font.layout(text, &params).quads()
        };

        self.backend.draw_quads(Vec2::new(x, y), &quads)?;
        Ok(())
    }

    /// The loaded font for `name`, if any
    pub fn loaded_font(&self, name: &str) -> Option<&Font> {
        self.fonts.get(&font_key(name))
    }

    /// Number of loaded fonts
    pub fn loaded_font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Rendering backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable rendering backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Current font, loading and caching it on first use
    fn current_font(&mut self) -> Result<&Font, LayoutError> {
        if !self.initialized {
            return Err(LayoutError::NotInitialized);
        }
        if self.font.is_empty() {
            return Err(LayoutError::NoFontSelected);
        }

        match self.fonts.entry(font_key(&self.font)) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                let path = self.resolver.resolve(&self.font);
                log::debug!("Loading font '{}' from {}", self.font, path.display());

                let font = self
                    .loader
                    .load(&path)
                    .and_then(|source| {
                        Font::load(
                            &self.font,
                            source.as_ref(),
                            &self.character_set,
                            &mut self.backend,
                        )
                    })
                    .map_err(|source| {
                        log::warn!("Failed to load font '{}': {}", self.font, source);
                        LayoutError::FontUnavailable {
                            font: self.font.clone(),
                            source,
                        }
                    })?;

                Ok(&*entry.insert(font))
            }
        }
    }
}

impl<B: TextBackend> Drop for FontSystem<B> {
    fn drop(&mut self) {
        self.finalize();
    }
}

fn font_key(name: &str) -> String {
    name.to_lowercase()
}

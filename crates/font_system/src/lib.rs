//! # Font System
//!
//! Glyph-chain text layout on top of a pluggable rendering backend.
//!
//! ## Features
//!
//! - **Glyph chains**: per-character placements with kerning applied
//! - **Line breaking**: fixed line width, optional word wrap
//! - **Justification**: left, right, center and full
//! - **Static text caching**: rendered artifacts memoized per font
//! - **Configuration**: TOML and RON settings files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use font_system::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FontSystemConfig::load_from_file("text.toml")?;
//!     let mut fonts = FontSystem::from_config(RecordingBackend::new(), &config)?;
//!     fonts.initialize()?;
//!
//!     fonts.set_word_wrap(true);
//!     fonts.set_line_width(80.0)?;
//!     let layout = fonts.layout("The quick brown fox jumps over the lazy dog")?;
//!     for line in layout.line_texts() {
//!         println!("{line}");
//!     }
//!
//!     fonts.draw_text_at(10.0, 100.0, "Score", true)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod font;
pub mod text;
pub mod render;
pub mod cache;

mod system;

pub use system::{FontSystem, LayoutError};

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod tests;

/// Common imports for font system users
pub mod prelude {
    pub use crate::{
        FontSystem, LayoutError,
        cache::LayoutCache,
        config::{Config, ConfigError, FontSystemConfig},
        font::{Font, FontError, FontLoader, FontPathResolver, FontdueLoader, GlyphSource},
        foundation::math::{Bounds, Vec2},
        render::{GlyphQuad, RecordingBackend, RenderedText, TextBackend, TextureHandle},
        text::{Justification, LayoutParameters, ParameterError, TextLayout},
    };
}

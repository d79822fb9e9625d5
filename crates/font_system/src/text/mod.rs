//! Text layout engine
//!
//! Converts text into chains of positioned glyph placements, breaks them
//! into lines and aligns each line.
//!
//! # Architecture
//!
//! - [`GlyphChain`]: placements for one run of text, with kerning and length
//! - [`line_break`]: width-driven breaking at whitespace
//! - [`justify()`]: per-line alignment
//! - [`layout_text`]: the full pipeline producing a [`TextLayout`]
//! - [`vertex`]: quads to GPU triangles

mod chain;
pub mod justify;
mod layout;
pub mod line_break;
pub mod vertex;

pub use chain::{GlyphChain, GlyphPlacement};
pub use justify::{justify, Justification};
pub use layout::{
    check_baseline_delta, check_line_height, check_line_width, layout_text, LayoutLine,
    LayoutParameters, ParameterError, TextLayout,
};
pub use vertex::{quads_to_vertices, TextVertex};

//! Layout pipeline: text → chains → lines with baselines

use serde::{Deserialize, Serialize};

use super::{justify, line_break, GlyphChain, Justification};
use crate::foundation::math::Bounds;
use crate::render::{GlyphQuad, RenderedText};

/// Rejected layout parameter
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ParameterError {
    /// Baseline delta must be negative and at least one line height tall
    #[error("Baseline delta {delta} must be negative with magnitude >= line height {line_height}")]
    InvalidBaselineDelta {
        /// Rejected delta
        delta: f32,
        /// Line height in effect
        line_height: f32,
    },

    /// Line height must be positive
    #[error("Line height must be positive, got {0}")]
    InvalidLineHeight(f32),

    /// Line width must be zero (unbounded) or positive
    #[error("Line width must be >= 0, got {0}")]
    InvalidLineWidth(f32),
}

/// Parameters of a single layout call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParameters {
    /// Maximum line width in output units, 0 for unbounded
    pub max_line_width: f32,
    /// Height of a reference glyph in output units
    pub line_height: f32,
    /// Vertical distance from one baseline to the next (negative)
    pub baseline_delta: f32,
    /// Alignment within `max_line_width`
    pub justification: Justification,
    /// Break lines wider than `max_line_width`
    pub word_wrap: bool,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            max_line_width: 0.0,
            line_height: 5.0,
            baseline_delta: -7.0,
            justification: Justification::Left,
            word_wrap: false,
        }
    }
}

impl LayoutParameters {
    /// Set the maximum line width
    pub fn with_max_line_width(mut self, width: f32) -> Self {
        self.max_line_width = width;
        self
    }

    /// Set the line height
    pub fn with_line_height(mut self, height: f32) -> Self {
        self.line_height = height;
        self
    }

    /// Set the baseline delta
    pub fn with_baseline_delta(mut self, delta: f32) -> Self {
        self.baseline_delta = delta;
        self
    }

    /// Set the justification mode
    pub fn with_justification(mut self, justification: Justification) -> Self {
        self.justification = justification;
        self
    }

    /// Enable or disable word wrap
    pub fn with_word_wrap(mut self, word_wrap: bool) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    /// Whether a maximum line width is in effect
    pub fn is_bounded(&self) -> bool {
        self.max_line_width > 0.0
    }

    /// Check every constraint
    pub fn validate(&self) -> Result<(), ParameterError> {
        check_line_width(self.max_line_width)?;
        check_line_height(self.line_height)?;
        check_baseline_delta(self.baseline_delta, self.line_height)
    }
}

/// Line width must be finite and not negative
pub fn check_line_width(width: f32) -> Result<(), ParameterError> {
    if width.is_finite() && width >= 0.0 {
        Ok(())
    } else {
        Err(ParameterError::InvalidLineWidth(width))
    }
}

/// Line height must be finite and positive
pub fn check_line_height(height: f32) -> Result<(), ParameterError> {
    if height.is_finite() && height > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::InvalidLineHeight(height))
    }
}

/// Baseline delta must be negative and span at least one line height
pub fn check_baseline_delta(delta: f32, line_height: f32) -> Result<(), ParameterError> {
    if delta.is_finite() && delta < 0.0 && -delta >= line_height {
        Ok(())
    } else {
        Err(ParameterError::InvalidBaselineDelta { delta, line_height })
    }
}

/// One laid-out line
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLine {
    /// Placements of the line
    pub chain: GlyphChain,
    /// Vertical position of the line's baseline
    pub baseline: f32,
}

impl LayoutLine {
    /// Absolute quads of this line
    pub fn quads(&self) -> Vec<GlyphQuad> {
        self.chain.quads(self.baseline)
    }
}

/// Result of laying out a text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLayout {
    lines: Vec<LayoutLine>,
}

impl TextLayout {
    /// Lines in order, top line first
    pub fn lines(&self) -> &[LayoutLine] {
        &self.lines
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text of each line after breaking
    pub fn line_texts(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.chain.text()).collect()
    }

    /// Quads of every line in drawing order
    pub fn quads(&self) -> Vec<GlyphQuad> {
        self.lines.iter().flat_map(LayoutLine::quads).collect()
    }

    /// Union of all quads, or an empty box at the origin
    pub fn bounds(&self) -> Bounds {
        self.quads()
            .iter()
            .map(|quad| Bounds::from_rect(quad.position, quad.size))
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default()
    }

    /// Freeze into a replayable artifact
    pub fn render(&self) -> RenderedText {
        RenderedText {
            quads: self.quads(),
            line_count: self.line_count(),
        }
    }
}

/// Lay out `text`, building one kerned chain per paragraph with `build_chain`
///
/// Newlines always start a new line; a trailing `\r` on a paragraph is
/// ignored. Word wrap applies when `params` bounds the width and enables
/// it. Justification applies whenever the width is bounded. Line `n` sits
/// `n` baseline deltas below the first.
pub fn layout_text(
    text: &str,
    params: &LayoutParameters,
    mut build_chain: impl FnMut(&str) -> GlyphChain,
) -> TextLayout {
    if text.is_empty() {
        return TextLayout::default();
    }

    let mut chains = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let chain = build_chain(paragraph);

        if params.is_bounded() && params.word_wrap {
            chains.extend(line_break::wrap(chain, params.max_line_width));
        } else {
            chains.push(chain);
        }
    }

    if params.is_bounded() && params.justification != Justification::Left {
        for chain in &mut chains {
            justify::justify(chain, params.max_line_width, params.justification);
        }
    }

    let mut baseline = 0.0;
    let lines = chains
        .into_iter()
        .map(|chain| {
            let line = LayoutLine { chain, baseline };
            baseline += params.baseline_delta;
            line
        })
        .collect();

    TextLayout { lines }
}

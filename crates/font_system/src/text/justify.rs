//! Per-line justification

use serde::{Deserialize, Serialize};

use super::GlyphChain;

/// How slack on a line is distributed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Justification {
    /// Flush left (chains are built this way)
    #[default]
    Left,
    /// Flush right
    Right,
    /// Centered
    Center,
    /// Flush on both sides by widening whitespace
    LeftAndRight,
}

/// Align one line within `line_width`
///
/// Slack is `line_width - measured_length` and may be negative for lines
/// that overflow. Full justification spreads slack evenly over whitespace
/// glyphs without any clamping; a line without such glyphs stays left
/// aligned.
pub fn justify(chain: &mut GlyphChain, line_width: f32, mode: Justification) {
    if chain.is_empty() {
        return;
    }
    let slack = line_width - chain.measured_length();

    match mode {
        Justification::Left => {}
        Justification::Right => shift(chain, slack),
        Justification::Center => shift(chain, slack / 2.0),
        Justification::LeftAndRight => {
            let spaces = chain.stretchable_count();
            if spaces == 0 {
                return;
            }

            let per_space = slack / spaces as f32;
            for placement in chain.placements_mut() {
                if placement.is_stretchable() {
                    placement.dx += per_space;
                }
            }
        }
    }
}

fn shift(chain: &mut GlyphChain, amount: f32) {
    if let Some(first) = chain.placements_mut().first_mut() {
        first.dx += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{mono_tables, MonoSource};
    use approx::assert_relative_eq;

    fn chain(text: &str) -> GlyphChain {
        let (glyphs, _) = mono_tables(&MonoSource::new());
        GlyphChain::build(&glyphs, text, 1.0)
    }

    /// Right edge of the last placement with every `dx` accumulated
    fn right_edge(chain: &GlyphChain) -> f32 {
        let offsets: f32 = chain.iter().map(|p| p.dx).sum();
        offsets + chain.placements().last().map_or(0.0, |p| p.right_edge())
    }

    #[test]
    fn test_left_is_noop() {
        let original = chain("ab cd");
        let mut line = original.clone();
        justify(&mut line, 100.0, Justification::Left);
        assert_eq!(line, original);
    }

    #[test]
    fn test_right() {
        let mut line = chain("ab");
        justify(&mut line, 35.0, Justification::Right);

        assert_relative_eq!(line.placements()[0].dx, 15.0);
        assert_relative_eq!(right_edge(&line), 35.0);
        // The natural length is unchanged
        assert_relative_eq!(line.measured_length(), 20.0);
    }

    #[test]
    fn test_center() {
        let mut line = chain("ab");
        justify(&mut line, 35.0, Justification::Center);
        assert_relative_eq!(line.placements()[0].dx, 7.5);
    }

    #[test]
    fn test_left_and_right_spreads_over_spaces() {
        let mut line = chain("a b c");
        justify(&mut line, 70.0, Justification::LeftAndRight);

        let p = line.placements();
        // 50 long, 20 slack, 2 spaces
        assert_relative_eq!(p[1].dx, 20.0);
        assert_relative_eq!(p[3].dx, 20.0);
        assert_relative_eq!(p[2].dx, 10.0);
        assert_relative_eq!(right_edge(&line), 70.0);
    }

    #[test]
    fn test_left_and_right_without_spaces_matches_left() {
        let mut full = chain("abc");
        let mut left = full.clone();

        justify(&mut full, 70.0, Justification::LeftAndRight);
        justify(&mut left, 70.0, Justification::Left);
        assert_eq!(full, left);
    }

    #[test]
    fn test_left_and_right_ignores_glyphless_whitespace() {
        // The tab is outside the character set and becomes a fallback box
        let mut full = chain("a\tb");
        let mut left = full.clone();
        assert!(!full.placements()[1].has_glyph());

        justify(&mut full, 200.0, Justification::LeftAndRight);
        justify(&mut left, 200.0, Justification::Left);
        assert_eq!(full, left);
    }

    #[test]
    fn test_left_and_right_skips_fallback_but_uses_spaces() {
        let mut line = chain("a\tb c");
        let natural = line.measured_length();
        justify(&mut line, natural + 30.0, Justification::LeftAndRight);

        let p = line.placements();
        // Only the real space absorbs the slack
        assert_relative_eq!(p[1].dx, 10.0);
        assert_relative_eq!(p[3].dx, 40.0);
        assert_relative_eq!(right_edge(&line), natural + 30.0);
    }

    #[test]
    fn test_left_and_right_large_gap_is_not_clamped() {
        let mut line = chain("a b");
        justify(&mut line, 1000.0, Justification::LeftAndRight);

        // The single space absorbs all 970 units of slack
        assert_relative_eq!(line.placements()[1].dx, 980.0);
        assert_relative_eq!(right_edge(&line), 1000.0);
    }

    #[test]
    fn test_overflowing_line_shifts_left() {
        let mut line = chain("abcdefgh");
        justify(&mut line, 35.0, Justification::Right);
        assert_relative_eq!(line.placements()[0].dx, -45.0);
    }

    #[test]
    fn test_empty_line() {
        let mut line = GlyphChain::new();
        justify(&mut line, 35.0, Justification::Center);
        assert!(line.is_empty());
    }
}

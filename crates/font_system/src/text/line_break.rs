//! Width-driven line breaking on glyph chains
//!
//! Lines break only in front of whitespace or fallback placements. A token
//! with no break opportunity is never split, so such a line may end up wider
//! than the requested width.

use super::GlyphChain;

/// Index at which `chain` must be split to fit `max_width`, if any
///
/// Walks the chain until the first placement whose ink reaches `max_width`
/// and returns the last break opportunity seen before it. An opportunity at
/// index 0 has nothing in front of it and is not usable.
pub fn find_break(chain: &GlyphChain, max_width: f32) -> Option<usize> {
    let mut ox = 0.0;
    let mut opportunity = None;

    for (index, placement) in chain.iter().enumerate() {
        ox += placement.dx;

        if ox + placement.right_edge() >= max_width {
            return opportunity.filter(|&at| at > 0);
        }

        if placement.is_break_opportunity() {
            opportunity = Some(index);
        }
    }

    None
}

/// Split `chain` so the part it keeps fits `max_width`
///
/// Returns the remainder, starting with the break opportunity, or `None`
/// when the chain fits or cannot be broken.
pub fn break_at(chain: &mut GlyphChain, max_width: f32) -> Option<GlyphChain> {
    let at = find_break(chain, max_width)?;
    Some(chain.split_off(at))
}

/// Drop leading whitespace and make the first survivor the line origin
pub fn trim_line_start(chain: &mut GlyphChain) {
    let leading = chain.iter().take_while(|p| p.is_whitespace()).count();
    chain.drain_front(leading);

    if let Some(first) = chain.placements_mut().first_mut() {
        first.dx = 0.0;
    }
}

/// Break `chain` into lines no wider than `max_width` where possible
///
/// Always returns at least one line; an empty chain yields one empty line.
pub fn wrap(chain: GlyphChain, max_width: f32) -> Vec<GlyphChain> {
    let mut lines = Vec::new();
    let mut current = chain;

    while let Some(mut rest) = break_at(&mut current, max_width) {
        lines.push(current);

        trim_line_start(&mut rest);
        if rest.is_empty() {
            return lines;
        }
        current = rest;
    }

    lines.push(current);
    lines
}

use std::sync::Arc;
use std::thread;

use approx::assert_relative_eq;

use crate::font::{Font, DEFAULT_CHARACTER_SET};
use crate::render::RecordingBackend;
use crate::test_support::{MonoLoader, MonoSource};
use crate::text::{line_break, GlyphChain, Justification, LayoutParameters, TextLayout};
use crate::FontSystem;

const PROSE: &str = "a bb ccc dddd eeeee ffffffffff gg h";

fn system_with(source: MonoSource) -> FontSystem<RecordingBackend> {
    let mut system =
        FontSystem::new(RecordingBackend::new()).with_loader(MonoLoader::new(source));
    system.set_font("Mono.ttf");
    system.set_baseline_delta(-12.0).unwrap();
    system.set_line_height(10.0).unwrap();
    system.initialize().unwrap();
    system
}

fn system() -> FontSystem<RecordingBackend> {
    system_with(MonoSource::new())
}

fn right_edge(chain: &GlyphChain) -> f32 {
    let offsets: f32 = chain.iter().map(|p| p.dx).sum();
    offsets + chain.placements().last().map_or(0.0, |p| p.right_edge())
}

fn first_token_width(chain: &GlyphChain) -> f32 {
    let end = chain
        .iter()
        .skip(1)
        .position(|p| p.is_break_opportunity())
        .map_or(chain.len(), |i| i + 1);
    chain.iter().take(end).copied().collect::<GlyphChain>().measured_length()
}

fn wrapped(system: &mut FontSystem<RecordingBackend>, width: f32, text: &str) -> TextLayout {
    system.set_line_width(width).unwrap();
    system.set_word_wrap(true);
    system.layout(text).unwrap()
}

#[test]
fn test_one_placement_per_character() {
    let mut system = system();
    let text = "h\u{e9}llo w\u{f6}rld \u{2603}";

    let layout = system.layout(text).unwrap();
    let placements: usize = layout.lines().iter().map(|l| l.chain.len()).sum();
    assert_eq!(placements, text.chars().count());
}

#[test]
fn test_measure_grows_with_text() {
    let mut system = system();
    let text = "The quick brown fox, 42 times!";

    let mut previous = 0.0;
    for end in 1..=text.len() {
        let length = system.measure_length(&text[..end]).unwrap();
        assert!(length >= previous, "{:?} shrank to {}", &text[..end], length);
        previous = length;
    }
}

#[test]
fn test_layout_is_repeatable() {
    let mut system = system();
    system.set_justification(Justification::LeftAndRight);

    let first = wrapped(&mut system, 60.0, PROSE);
    let second = wrapped(&mut system, 60.0, PROSE);
    assert_eq!(first, second);
}

#[test]
fn test_unbounded_width_is_one_line() {
    let mut system = system();
    system.set_word_wrap(true);

    let layout = system.layout(PROSE).unwrap();
    assert_eq!(layout.line_texts(), [PROSE]);
}

#[test]
fn test_wrapped_lines_fit_unless_unbreakable() {
    let mut system = system();
    let width = 45.0;

    let layout = wrapped(&mut system, width, PROSE);
    assert_eq!(
        layout.line_texts(),
        ["a bb", "ccc", "dddd", "eeeee ffffffffff gg h"]
    );

    for line in layout.lines() {
        if line.chain.measured_length() > width {
            // Overflow only happens when the leading token alone is too wide
            assert!(first_token_width(&line.chain) >= width);
            assert_eq!(line_break::find_break(&line.chain, width), None);
        }
    }
}

#[test]
fn test_right_justified_lines_end_at_width() {
    let mut system = system();
    system.set_justification(Justification::Right);

    let layout = wrapped(&mut system, 60.0, PROSE);
    for line in layout.lines() {
        assert_relative_eq!(right_edge(&line.chain), 60.0, epsilon = 1e-4);
    }
}

#[test]
fn test_centered_lines_split_slack() {
    let mut system = system();
    system.set_justification(Justification::Center);

    let layout = wrapped(&mut system, 60.0, "ab cd");
    assert_eq!(layout.line_texts(), ["ab cd"]);
    assert_relative_eq!(layout.lines()[0].chain.placements()[0].dx, 5.0);
}

#[test]
fn test_full_justification_fills_width() {
    let mut system = system();
    system.set_justification(Justification::LeftAndRight);

    let layout = wrapped(&mut system, 80.0, "a bb ccc dd e");
    for line in layout.lines() {
        if line.chain.stretchable_count() > 0 {
            assert_relative_eq!(right_edge(&line.chain), 80.0, epsilon = 1e-4);
        }
    }
}

#[test]
fn test_full_justification_without_spaces_is_left() {
    let mut system = system();
    system.set_line_width(100.0).unwrap();

    system.set_justification(Justification::Left);
    let left = system.layout("abcdef").unwrap();
    system.set_justification(Justification::LeftAndRight);
    let full = system.layout("abcdef").unwrap();

    assert_eq!(left, full);
}

#[test]
fn test_full_justification_leaves_fallback_whitespace_alone() {
    let mut system = system();
    system.set_line_width(200.0).unwrap();

    system.set_justification(Justification::Left);
    let left = system.layout("a\tb").unwrap();
    system.set_justification(Justification::LeftAndRight);
    let full = system.layout("a\tb").unwrap();

    assert!(!full.lines()[0].chain.placements()[1].has_glyph());
    assert_eq!(left, full);
}

#[test]
fn test_two_word_wrap() {
    let mut system = system();

    let layout = wrapped(&mut system, 35.0, "ab cd");
    assert_eq!(layout.line_texts(), ["ab", "cd"]);
    assert_relative_eq!(system.measure_length("ab cd").unwrap(), 50.0);

    let quads = layout.quads();
    assert_eq!(quads.len(), 4);
    assert_relative_eq!(quads[2].position.x, 0.0);
    assert_relative_eq!(quads[2].position.y, -12.0);
}

#[test]
fn test_empty_text() {
    let mut system = system();
    assert!(system.layout("").unwrap().is_empty());
    assert!(wrapped(&mut system, 35.0, "").is_empty());
}

#[test]
fn test_kerning_tightens_pairs() {
    let mut system = system_with(MonoSource::new().with_kerning('A', 'V', -3.0));

    assert_relative_eq!(system.measure_length("AV").unwrap(), 17.0);
    assert_relative_eq!(system.measure_length("VA").unwrap(), 20.0);
}

#[test]
fn test_line_height_scales_output() {
    let mut system = system();
    let at_ten = system.measure_length("abc").unwrap();

    system.set_baseline_delta(-24.0).unwrap();
    system.set_line_height(20.0).unwrap();
    assert_relative_eq!(system.measure_length("abc").unwrap(), at_ten * 2.0);
}

#[test]
fn test_concurrent_memoization_keeps_one_entry() {
    let mut backend = RecordingBackend::new();
    let font = Font::load("Mono", &MonoSource::new(), DEFAULT_CHARACTER_SET, &mut backend)
        .unwrap();
    let params = LayoutParameters::default()
        .with_line_height(10.0)
        .with_baseline_delta(-12.0);

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| font.render_static("GAME OVER", &params)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(font.memoized_count(), 1);
    for rendered in &results {
        assert!(Arc::ptr_eq(rendered, &results[0]));
    }

    font.release(&mut backend);
    assert_eq!(backend.texture_count(), 0);
}

//! Text layout demo
//!
//! Lays out a few paragraphs with each justification mode against a
//! recording backend and logs the resulting lines and draw calls.
//!
//! ```text
//! text_demo [settings.toml|settings.ron] [--dump-glyphs <dir>]
//! ```

use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command};
use font_system::prelude::*;

const SAMPLE: &str = "The quick brown fox jumps over the lazy dog. \
Pack my box with five dozen liquor jugs!\n\
Sphinx of black quartz, judge my vow.";

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Invalid parameter: {0}")]
    Parameter(#[from] ParameterError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write glyph image: {0}")]
    Image(#[from] font_system::render::ImageError),
}

struct Args {
    config: Option<PathBuf>,
    dump_glyphs: Option<PathBuf>,
}

impl Args {
    fn command() -> Command {
        Command::new("text_demo")
            .about("Lays out sample text with each justification mode")
            .arg(
                Arg::new("config")
                    .value_name("SETTINGS")
                    .help("Settings file (.toml or .ron)")
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("dump-glyphs")
                    .long("dump-glyphs")
                    .value_name("DIR")
                    .help("Write every loaded glyph image as a PNG into DIR")
                    .value_parser(clap::value_parser!(PathBuf)),
            )
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            config: matches.get_one::<PathBuf>("config").cloned(),
            dump_glyphs: matches.get_one::<PathBuf>("dump-glyphs").cloned(),
        }
    }
}

fn run(args: &Args) -> Result<(), DemoError> {
    let config = match &args.config {
        Some(path) => {
            log::info!("Loading settings from {}", path.display());
            FontSystemConfig::load_from_file(path)?
        }
        None => FontSystemConfig::default(),
    };

    let mut fonts = FontSystem::from_config(RecordingBackend::new(), &config)?;
    fonts.initialize()?;

    let width = if config.layout.max_line_width > 0.0 {
        config.layout.max_line_width
    } else {
        120.0
    };
    fonts.set_line_width(width)?;
    fonts.set_word_wrap(true);

    log::info!(
        "Unwrapped sample length: {:.2}",
        fonts.measure_length(SAMPLE)?
    );

    for justification in [
        Justification::Left,
        Justification::Right,
        Justification::Center,
        Justification::LeftAndRight,
    ] {
        fonts.set_justification(justification);
        let layout = fonts.layout(SAMPLE)?;

        log::info!("{:?}, width {}: {} lines", justification, width, layout.line_count());
        for line in layout.lines() {
            log::info!(
                "  {:>8.2} | {}",
                line.baseline,
                line.chain.text()
            );
        }

        let bounds = layout.bounds();
        log::debug!(
            "  bounds {:.2} x {:.2}",
            bounds.width(),
            bounds.height()
        );
    }

    fonts.draw_text_at(10.0, 100.0, "GAME OVER", true)?;
    fonts.draw_text_at(10.0, 100.0, "GAME OVER", true)?;
    log::info!(
        "Static text memoized: {}, draw calls: {}",
        fonts.is_memoized("GAME OVER"),
        fonts.backend().draw_calls().len()
    );

    if let Some(dir) = &args.dump_glyphs {
        dump_glyphs(&fonts, dir)?;
    }

    fonts.finalize();
    Ok(())
}

fn dump_glyphs(fonts: &FontSystem<RecordingBackend>, dir: &std::path::Path) -> Result<(), DemoError> {
    let Some(font) = fonts.loaded_font(fonts.font()) else {
        return Ok(());
    };

    std::fs::create_dir_all(dir)?;

    let mut written = 0;
    for glyph in font.glyphs().iter() {
        let Some(image) = glyph.texture.and_then(|t| fonts.backend().texture(t)) else {
            continue;
        };
        let path = dir.join(format!("glyph_{:04x}.png", u32::from(glyph.character)));
        image.save_png(&path)?;
        written += 1;
    }

    log::info!("Wrote {} glyph images to {}", written, dir.display());
    Ok(())
}

fn main() {
    font_system::foundation::logging::init_with_default("info");

    log::info!("Starting text layout demo");

    let args = Args::from_matches(&Args::command().get_matches());
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

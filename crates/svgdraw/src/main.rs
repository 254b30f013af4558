// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;
use std::sync::Arc;

use svgdraw::svgtext;
use svgdraw::tiny_skia;

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

const HELP: &str = "\
svgdraw draws a single SVG text element into a PNG image.

USAGE:
  svgdraw [OPTIONS] <text> <out.png>

  svgdraw --font-size 32 \"Hello\" out.png
  svgdraw --text-length 200 --length-adjust spacingAndGlyphs \"Hello\" out.png

OPTIONS:
      --help                    Prints help information
  -V, --version                 Prints version information

  -w, --width NUM               Sets the image width in pixels [default: 400]
  -h, --height NUM              Sets the image height in pixels [default: 100]
      --dpi DPI                 Sets the resolution [default: 96]
                                [possible values: 10..4000 (inclusive)]

  --x LIST                      Sets the absolute x positions
  --y LIST                      Sets the absolute y positions [default: 1em]
  --dx LIST                     Sets the relative x offsets
  --dy LIST                     Sets the relative y offsets
  --rotate LIST                 Sets the per-character rotation in degrees
  --text-length LENGTH          Sets the target text length
  --length-adjust KEYWORD       Sets the text length adjustment
                                [possible values: spacing, spacingAndGlyphs]
  --baseline-shift VALUE        Sets the baseline shift
                                [possible values: baseline, sub, super, <length>]
  --alignment-baseline KEYWORD  Sets the alignment baseline
  --text-anchor KEYWORD         Sets the text anchor
                                [possible values: start, middle, end]
  --font-family FAMILY          Sets the font family [default: sans-serif]
  --font-size SIZE              Sets the font size [default: 12]
  --fill COLOR                  Sets the fill color [default: black]

  --font-file PATH              Load a specified font file into the fonts database.
                                Can be set multiple times.
  --system-fonts                Loads system fonts as well.
                                Implied when no font file is set.

  --quiet                       Disables warnings
  --verbose                     Enables debug logging

ARGS:
  <text>                        Text content
  <out.png>                     Output file
";

// (CLI flag, attribute name)
const TEXT_ATTRIBUTES: &[(&str, &str)] = &[
    ("--x", "x"),
    ("--dx", "dx"),
    ("--dy", "dy"),
    ("--rotate", "rotate"),
    ("--text-length", "textLength"),
    ("--length-adjust", "lengthAdjust"),
    ("--baseline-shift", "baseline-shift"),
    ("--alignment-baseline", "alignment-baseline"),
    ("--text-anchor", "text-anchor"),
    ("--font-family", "font-family"),
    ("--font-size", "font-size"),
    ("--fill", "fill"),
];

#[derive(Debug)]
struct Args {
    width: u32,
    height: u32,
    dpi: u32,
    y: String,
    attributes: Vec<(&'static str, String)>,
    font_files: Vec<PathBuf>,
    system_fonts: bool,
    quiet: bool,
    verbose: bool,
    text: String,
    output: PathBuf,
}

fn collect_args() -> Result<Args, pico_args::Error> {
    let mut input = pico_args::Arguments::from_env();

    if input.contains("--help") {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    let mut attributes = Vec::new();
    for (flag, name) in TEXT_ATTRIBUTES {
        if let Some(value) = input.opt_value_from_str::<_, String>(*flag)? {
            attributes.push((*name, value));
        }
    }

    Ok(Args {
        width: input.opt_value_from_str(["-w", "--width"])?.unwrap_or(400),
        height: input.opt_value_from_str(["-h", "--height"])?.unwrap_or(100),
        dpi: input.opt_value_from_fn("--dpi", parse_dpi)?.unwrap_or(96),
        y: input
            .opt_value_from_str("--y")?
            .unwrap_or_else(|| "1em".to_string()),
        attributes,
        font_files: input.values_from_str("--font-file")?,
        system_fonts: input.contains("--system-fonts"),
        quiet: input.contains("--quiet"),
        verbose: input.contains("--verbose"),
        text: input.free_from_str()?,
        output: input.free_from_str()?,
    })
}

fn parse_dpi(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid number")?;

    if (10..=4000).contains(&n) {
        Ok(n)
    } else {
        Err("DPI out of bounds".to_string())
    }
}

fn process() -> Result<(), String> {
    let args = collect_args().map_err(|e| e.to_string())?;

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            let level = if args.verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Warn
            };
            log::set_max_level(level);
        }
    }

    let mut fontdb = svgtext::fontdb::Database::new();
    if args.system_fonts || args.font_files.is_empty() {
        fontdb.load_system_fonts();
    }

    for path in &args.font_files {
        if let Err(e) = fontdb.load_font_file(path) {
            log::warn!("Failed to load '{}' cause {}.", path.display(), e);
        }
    }

    log::debug!("Loaded {} font faces.", fontdb.len());

    let opt = svgtext::Options {
        dpi: args.dpi as f32,
        viewport: tiny_skia::Size::from_wh(args.width as f32, args.height as f32)
            .ok_or("invalid image size")?,
        fontdb: Arc::new(fontdb),
        ..svgtext::Options::default()
    };

    let mut text = svgtext::Text::new();
    text.set_content(args.text.clone());
    text.set_attribute("y", &args.y).map_err(|e| e.to_string())?;
    for (name, value) in &args.attributes {
        text.set_attribute(name, value).map_err(|e| e.to_string())?;
    }

    let mut node = svgtext::Node::from(text);
    let mut ctx = svgtext::Context::new(opt);

    let mut pixmap =
        tiny_skia::Pixmap::new(args.width, args.height).ok_or("invalid image size")?;
    svgdraw::render(
        &mut node,
        &mut ctx,
        tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );

    svgdraw::save_png_with_dpi(&pixmap, &args.output, args.dpi).map_err(|e| e.to_string())?;

    Ok(())
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}

// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use once_cell::sync::Lazy;
use svgdraw::svgtext::{self, fontdb};
use svgdraw::tiny_skia;

static GLOBAL_FONTDB: Lazy<Arc<fontdb::Database>> = Lazy::new(|| {
    if let Ok(()) = log::set_logger(&LOGGER) {
        log::set_max_level(log::LevelFilter::Warn);
    }

    let mut fontdb = fontdb::Database::new();
    fontdb.load_font_data(include_bytes!("../../../svgtext/tests/fonts/DejaVuSans.ttf").to_vec());
    fontdb.set_sans_serif_family("DejaVu Sans");
    Arc::new(fontdb)
});

fn context() -> svgtext::Context {
    svgtext::Context::new(svgtext::Options {
        fontdb: GLOBAL_FONTDB.clone(),
        ..svgtext::Options::default()
    })
}

fn text_node(content: &str, attributes: &[(&str, &str)]) -> svgtext::Node {
    let mut text = svgtext::Text::new();
    text.set_content(content);
    for (name, value) in attributes {
        text.set_attribute(name, value).unwrap();
    }
    svgtext::Node::from(text)
}

fn render(node: &mut svgtext::Node, ctx: &mut svgtext::Context) -> tiny_skia::Pixmap {
    let mut pixmap = tiny_skia::Pixmap::new(100, 40).unwrap();
    svgdraw::render(
        node,
        ctx,
        tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );
    pixmap
}

fn painted_pixels(pixmap: &tiny_skia::Pixmap) -> usize {
    pixmap.pixels().iter().filter(|p| p.alpha() != 0).count()
}

#[test]
fn draws_text() {
    let mut ctx = context();
    let mut node = text_node("Hello", &[("y", "30"), ("fontSize", "20")]);
    let pixmap = render(&mut node, &mut ctx);

    assert!(painted_pixels(&pixmap) > 0);
    // Default fill is black.
    assert!(pixmap
        .pixels()
        .iter()
        .all(|p| p.red() == 0 && p.green() == 0 && p.blue() == 0));
}

#[test]
fn text_above_the_surface_is_clipped() {
    let mut ctx = context();
    // Baseline at y = 0, so every glyph is above the pixmap.
    let mut node = text_node("Hello", &[("fontSize", "20")]);
    let pixmap = render(&mut node, &mut ctx);
    assert_eq!(painted_pixels(&pixmap), 0);
}

#[test]
fn fill_is_inherited() {
    let mut ctx = context();

    let mut text = svgtext::Text::new();
    text.set_content("Hello");
    text.set_attribute("y", "30").unwrap();
    text.set_attribute("fontSize", "20").unwrap();

    let mut group = svgtext::Group::new();
    group.set_attribute("fill", "#ff0000").unwrap();
    group.append(text);

    let mut node = svgtext::Node::from(group);
    let pixmap = render(&mut node, &mut ctx);

    let opaque: Vec<_> = pixmap.pixels().iter().filter(|p| p.alpha() == 255).collect();
    assert!(!opaque.is_empty());
    assert!(opaque.iter().all(|p| p.red() == 255 && p.green() == 0));
}

#[test]
fn fill_none_draws_nothing() {
    let mut ctx = context();
    let mut node = text_node("Hello", &[("y", "30"), ("fill", "none")]);
    let pixmap = render(&mut node, &mut ctx);
    assert_eq!(painted_pixels(&pixmap), 0);
}

#[test]
fn group_transform_moves_text() {
    let mut ctx = context();

    let mut text = svgtext::Text::new();
    text.set_content("H");
    text.set_attribute("fontSize", "20").unwrap();

    let mut group = svgtext::Group::new();
    group.set_attribute("transform", "translate(0 30)").unwrap();
    group.append(text);

    let mut node = svgtext::Node::from(group);
    let pixmap = render(&mut node, &mut ctx);
    assert!(painted_pixels(&pixmap) > 0);
}

#[test]
fn missing_fonts_are_skipped() {
    let mut ctx = svgtext::Context::new(svgtext::Options::default());
    let mut node = text_node("Hello", &[("y", "30")]);
    let pixmap = render(&mut node, &mut ctx);
    assert_eq!(painted_pixels(&pixmap), 0);
}

#[test]
fn redraw_keeps_the_cached_path() {
    let mut ctx = context();
    let mut node = text_node("Hello", &[("y", "30")]);

    let a = render(&mut node, &mut ctx);
    let path = node.as_text_mut().unwrap().get_group_path(&mut ctx).unwrap();
    let b = render(&mut node, &mut ctx);
    let again = node.as_text_mut().unwrap().get_group_path(&mut ctx).unwrap();

    assert_eq!(a.data(), b.data());
    assert!(Arc::ptr_eq(&path.unwrap(), &again.unwrap()));
}

#[test]
fn png_with_dpi() {
    let mut ctx = context();
    let mut node = text_node("Hello", &[("y", "30"), ("fontSize", "20")]);
    let pixmap = render(&mut node, &mut ctx);

    let data = svgdraw::encode_png_with_dpi(&pixmap, 300).unwrap();

    let decoder = png::Decoder::new(std::io::Cursor::new(data));
    let mut reader = decoder.read_info().unwrap();
    let info = reader.info();
    assert_eq!(info.width, 100);
    assert_eq!(info.height, 40);

    let dims = info.pixel_dims.unwrap();
    assert_eq!(dims.unit, png::Unit::Meter);
    // 300 / 0.0254
    assert_eq!(dims.xppu, 11811);
    assert_eq!(dims.yppu, 11811);

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).unwrap();
    assert_eq!(frame.color_type, png::ColorType::Rgba);
    assert!(buf.chunks_exact(4).any(|p| p[3] == 255));
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            eprintln!("{} (in {}:{}): {}", record.level(), target, line, record.args());
        }
    }

    fn flush(&self) {}
}

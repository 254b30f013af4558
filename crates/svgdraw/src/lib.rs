// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/*!
`svgdraw` fills [`svgtext`] node trees onto a raster surface.

## Main functions

- [`render`] - Renders a node tree onto a pixmap
- [`encode_png_with_dpi`] - Encodes a pixmap as PNG with DPI metadata
- [`save_png_with_dpi`] - Saves a pixmap as PNG with DPI metadata

## Re-exports

This crate re-exports [`tiny_skia`] for pixmap handling and [`svgtext`] for the node model.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::uninlined_format_args)]

pub use svgtext;
pub use tiny_skia;

mod path;
mod render;

/// Renders a node tree onto the pixmap.
///
/// `transform` will be used as a root transform.
/// Text paths are memoized on the nodes, so redrawing an unchanged tree
/// does not lay the text out again.
///
/// Nodes that fail to lay out are logged and skipped.
pub fn render(
    node: &mut svgtext::Node,
    ctx: &mut svgtext::Context,
    transform: tiny_skia::Transform,
    pixmap: &mut tiny_skia::PixmapMut,
) {
    render::render_node(node, ctx, render::DEFAULT_FILL, transform, pixmap);
}

/// Encodes a pixmap as PNG with DPI metadata in the pHYs chunk.
///
/// # Example
///
/// ```no_run
/// let mut ctx = svgtext::Context::new(svgtext::Options::default());
/// let mut text = svgtext::Text::new();
/// text.set_attribute("content", "Hi").unwrap();
/// let mut node = svgtext::Node::from(text);
///
/// let mut pixmap = tiny_skia::Pixmap::new(100, 100).unwrap();
/// svgdraw::render(&mut node, &mut ctx, tiny_skia::Transform::default(), &mut pixmap.as_mut());
/// let png_data = svgdraw::encode_png_with_dpi(&pixmap, 96).unwrap();
/// ```
pub fn encode_png_with_dpi(
    pixmap: &tiny_skia::Pixmap,
    dpi: u32,
) -> Result<Vec<u8>, png::EncodingError> {
    // 1 inch = 0.0254 meters
    let pixels_per_meter = (dpi as f64 / 0.0254).round() as u32;

    // PNG stores straight alpha.
    let mut tmp_data = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        tmp_data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let mut data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut data, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: pixels_per_meter,
            yppu: pixels_per_meter,
            unit: png::Unit::Meter,
        }));
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&tmp_data)?;
    }

    Ok(data)
}

/// Saves a pixmap as a PNG file with DPI metadata.
pub fn save_png_with_dpi(
    pixmap: &tiny_skia::Pixmap,
    path: &std::path::Path,
    dpi: u32,
) -> Result<(), png::EncodingError> {
    let data = encode_png_with_dpi(pixmap, dpi)?;
    std::fs::write(path, data)?;
    Ok(())
}

pub(crate) trait OptionLog {
    fn log_none<F: FnOnce()>(self, f: F) -> Self;
}

impl<T> OptionLog for Option<T> {
    #[inline]
    fn log_none<F: FnOnce()>(self, f: F) -> Self {
        self.or_else(|| {
            f();
            None
        })
    }
}

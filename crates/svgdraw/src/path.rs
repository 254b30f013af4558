// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use svgtext::svgtypes::Color;

/// Fills a path using the nonzero rule.
pub fn fill_path(
    path: &tiny_skia::Path,
    color: Color,
    transform: tiny_skia::Transform,
    pixmap: &mut tiny_skia::PixmapMut,
) -> Option<()> {
    // Horizontal and vertical lines cannot be filled. Skip.
    if path.bounds().width() == 0.0 || path.bounds().height() == 0.0 {
        return None;
    }

    // `fill="none"`
    if color.alpha == 0 {
        return None;
    }

    let mut paint = tiny_skia::Paint::default();
    paint.set_color_rgba8(color.red, color.green, color.blue, color.alpha);
    paint.anti_alias = true;

    pixmap.fill_path(path, &paint, tiny_skia::FillRule::Winding, transform, None);

    Some(())
}

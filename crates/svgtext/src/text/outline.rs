// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use skrifa::{
    instance::{LocationRef, Size as SkrifaSize},
    outline::{DrawSettings, OutlinePen},
    FontRef, GlyphId, MetadataProvider,
};
use tiny_skia_path::{Path, PathBuilder, Transform};

use super::layout::PositionedGlyph;
use super::Context;

/// Looks up a character and returns its glyph and advance in font units.
pub(crate) fn glyph_info(data: &[u8], face_index: u32, c: char) -> Option<(GlyphId, f32)> {
    let font = FontRef::from_index(data, face_index).ok()?;
    let glyph = match font.charmap().map(c) {
        Some(id) => id,
        None => {
            log::debug!("No glyph for '{}'. Using .notdef.", c.escape_default());
            GlyphId::NOTDEF
        }
    };

    let advance = font
        .glyph_metrics(SkrifaSize::unscaled(), LocationRef::default())
        .advance_width(glyph)
        .unwrap_or(0.0);

    Some((glyph, advance))
}

/// Extracts an unhinted glyph outline in font units.
///
/// Returns `None` for empty glyphs, like a space.
pub(crate) fn load_outline(data: &[u8], face_index: u32, glyph_id: GlyphId) -> Option<Path> {
    let font = FontRef::from_index(data, face_index).ok()?;
    let outlines = font.outline_glyphs();
    let glyph = outlines.get(glyph_id)?;

    let mut pen = PathPen(PathBuilder::new());
    let settings = DrawSettings::unhinted(SkrifaSize::unscaled(), LocationRef::default());
    glyph.draw(settings, &mut pen).ok()?;
    pen.0.finish()
}

/// Converts positioned glyphs into a single path.
pub(crate) fn glyphs_to_path(glyphs: &[PositionedGlyph], ctx: &mut Context) -> Option<Path> {
    let mut builder = PathBuilder::new();

    for glyph in glyphs {
        let outline = match ctx.outline(glyph.font.id, glyph.id) {
            Some(outline) => outline,
            None => continue,
        };

        if let Some(path) = outline.transform(glyph.outline_transform()) {
            builder.push_path(&path);
        }
    }

    builder.finish()
}

impl PositionedGlyph {
    /// Maps font units to user space.
    ///
    /// Font outlines are y-up, so the vertical axis is flipped.
    pub(crate) fn outline_transform(&self) -> Transform {
        let scale = self.font.scale();
        self.transform
            .pre_translate(self.x, self.y)
            .pre_rotate(self.rotate)
            .pre_scale(scale * self.scale_x, -scale)
    }
}

/// Records outline segments into a path, in font units.
struct PathPen(PathBuilder);

impl OutlinePen for PathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}

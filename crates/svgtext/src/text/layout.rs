// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use skrifa::GlyphId;
use tiny_skia_path::Transform;

use super::Context;
use crate::font::ResolvedFont;
use crate::style::{AlignmentBaseline, LengthAdjust, TextAnchor};
use crate::units::Axis;
use crate::{Error, Node, Text};

/// A glyph placed in the text's user space.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PositionedGlyph {
    pub font: ResolvedFont,
    pub id: GlyphId,
    /// Glyph origin on the shifted baseline.
    pub x: f32,
    pub y: f32,
    /// Rotation around the origin in degrees.
    pub rotate: f32,
    /// Horizontal glyph stretch from `lengthAdjust="spacingAndGlyphs"`.
    pub scale_x: f32,
    /// Advance in user units, without spacing.
    pub advance: f32,
    pub anchor: TextAnchor,
    /// Set when the glyph starts a new text chunk.
    pub chunk_start: bool,
    /// Transforms of the nested nodes the glyph was laid out in.
    pub transform: Transform,
}

/// Lays out a text node and all of its descendants.
pub(crate) fn layout_text(
    text: &Text,
    ctx: &mut Context,
    glyphs: &mut Vec<PositionedGlyph>,
) -> Result<(), Error> {
    // The frame is pushed even when the baseline shift fails to resolve.
    let res = ctx
        .push_text(text.font(), text.attributes())
        .and_then(|()| layout_text_impl(text, ctx, glyphs));
    ctx.pop();
    res
}

fn layout_text_impl(
    text: &Text,
    ctx: &mut Context,
    glyphs: &mut Vec<PositionedGlyph>,
) -> Result<(), Error> {
    let start = glyphs.len();

    if let Some(content) = text.content() {
        layout_content(content, ctx, glyphs)?;
    }

    for child in text.children() {
        layout_node(child, ctx, glyphs)?;
    }

    if let Some(length) = text.attributes().text_length {
        let target = ctx.units().convert(length, Axis::Horizontal);
        adjust_length(&mut glyphs[start..], ctx, target, text.length_adjust());
    }

    Ok(())
}

fn layout_node(
    node: &Node,
    ctx: &mut Context,
    glyphs: &mut Vec<PositionedGlyph>,
) -> Result<(), Error> {
    let start = glyphs.len();
    match node {
        Node::Text(ref text) => layout_text(text, ctx, glyphs)?,
        Node::Group(ref group) => {
            ctx.push_font(group.font());
            let res = group
                .children()
                .iter()
                .try_for_each(|child| layout_node(child, ctx, glyphs));
            ctx.pop();
            res?;
        }
    }

    let ts = node.group().transform();
    if !ts.is_identity() {
        for glyph in &mut glyphs[start..] {
            glyph.transform = ts.pre_concat(glyph.transform);
        }
    }

    Ok(())
}

fn layout_content(
    content: &str,
    ctx: &mut Context,
    glyphs: &mut Vec<PositionedGlyph>,
) -> Result<(), Error> {
    if content.is_empty() {
        return Ok(());
    }

    let font = ctx.resolve_font()?;
    let spec = ctx.font().clone();

    let baseline = ctx.alignment_baseline().unwrap_or_default();
    let baseline_offset = alignment_offset(baseline, &font) - ctx.total_baseline_shift();

    for c in content.chars() {
        let (x, y, absolute_x) = ctx.next_origin();
        let rotate = ctx.rotate();
        let (id, advance) = ctx.glyph(&font, c);
        let advance = advance * font.scale();

        glyphs.push(PositionedGlyph {
            font,
            id,
            x,
            y: y + baseline_offset,
            rotate,
            scale_x: 1.0,
            advance,
            anchor: spec.text_anchor,
            chunk_start: absolute_x,
            transform: Transform::default(),
        });

        let mut spacing = spec.letter_spacing;
        if c == ' ' {
            spacing += spec.word_spacing;
        }

        ctx.advance(advance + spacing);
    }

    Ok(())
}

/// Returns how far the alphabetic baseline sits below the alignment point.
pub(crate) fn alignment_offset(baseline: AlignmentBaseline, font: &ResolvedFont) -> f32 {
    match baseline {
        AlignmentBaseline::Auto | AlignmentBaseline::Baseline | AlignmentBaseline::Alphabetic => {
            0.0
        }
        AlignmentBaseline::BeforeEdge
        | AlignmentBaseline::TextBeforeEdge
        | AlignmentBaseline::Top
        | AlignmentBaseline::TextTop => font.ascent(),
        AlignmentBaseline::Hanging => font.ascent() * 0.8,
        AlignmentBaseline::Middle | AlignmentBaseline::Center => font.x_height() * 0.5,
        AlignmentBaseline::Central => (font.ascent() + font.descent()) * 0.5,
        AlignmentBaseline::Mathematical => font.ascent() * 0.5,
        AlignmentBaseline::AfterEdge
        | AlignmentBaseline::TextAfterEdge
        | AlignmentBaseline::Bottom
        | AlignmentBaseline::TextBottom
        | AlignmentBaseline::Ideographic => font.descent(),
    }
}

/// Fits a run into `textLength`.
///
/// The run is measured from the origin of its first glyph to the cursor.
/// Runs that contain more than one text chunk are left as is.
fn adjust_length(
    glyphs: &mut [PositionedGlyph],
    ctx: &mut Context,
    target: f32,
    adjust: LengthAdjust,
) {
    let start_x = match glyphs.first() {
        Some(glyph) => glyph.x,
        None => return,
    };

    if glyphs.iter().skip(1).any(|glyph| glyph.chunk_start) {
        log::debug!("textLength on a run with several text chunks is ignored.");
        return;
    }

    let natural = ctx.cursor().0 - start_x;
    if !natural.is_finite() || natural <= 0.0 {
        return;
    }

    if target < 0.0 {
        log::warn!("Negative textLength is ignored.");
        return;
    }

    match adjust {
        LengthAdjust::Spacing => {
            if glyphs.len() > 1 {
                let extra = (target - natural) / (glyphs.len() - 1) as f32;
                for (i, glyph) in glyphs.iter_mut().enumerate() {
                    glyph.x += extra * i as f32;
                }
            }
        }
        LengthAdjust::SpacingAndGlyphs => {
            let k = target / natural;
            for glyph in glyphs.iter_mut() {
                glyph.x = start_x + (glyph.x - start_x) * k;
                glyph.scale_x *= k;
                glyph.advance *= k;
            }
        }
    }

    ctx.set_cursor_x(start_x + target);
}

/// Applies `text-anchor` to every text chunk.
pub(crate) fn align_chunks(glyphs: &mut [PositionedGlyph]) {
    let mut start = 0;
    while start < glyphs.len() {
        let mut end = start + 1;
        while end < glyphs.len() && !glyphs[end].chunk_start {
            end += 1;
        }

        let chunk = &mut glyphs[start..end];
        let first = chunk[0];
        let last = chunk[chunk.len() - 1];
        let width = last.x + last.advance - first.x;

        let shift = match first.anchor {
            TextAnchor::Start => 0.0,
            TextAnchor::Middle => -width / 2.0,
            TextAnchor::End => -width,
        };

        if shift != 0.0 {
            for glyph in chunk.iter_mut() {
                glyph.x += shift;
            }
        }

        start = end;
    }
}

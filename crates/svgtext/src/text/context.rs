// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use fontdb::ID;
use skrifa::GlyphId;
use tiny_skia_path::Path;

use super::outline;
use crate::cache::{hash_f32, hash_list, hash_option, GeometryHash, RunEnd};
use crate::font::{query_face, FontMetrics, FontProps, FontSpec, ResolvedFont};
use crate::style::{AlignmentBaseline, BaselineShift, FontStyle, TextAnchor};
use crate::units::{Axis, UnitContext};
use crate::{Error, Options, OptionLog, TextAttributes};

/// Per-text positioning state.
///
/// Lists are already converted to user units.
#[derive(Clone, Debug)]
struct TextFrame {
    x: Vec<f32>,
    y: Vec<f32>,
    dx: Vec<f32>,
    dy: Vec<f32>,
    rotate: Vec<f32>,
    // Index of the next addressable character inside this text.
    index: usize,
    alignment_baseline: Option<AlignmentBaseline>,
    baseline_shift: Option<BaselineShift>,
    // `baseline_shift` in user units, resolved with this text's font.
    shift: f32,
}

#[derive(Clone, Copy)]
enum List {
    X,
    Y,
    Dx,
    Dy,
}

impl TextFrame {
    fn value(&self, list: List) -> Option<f32> {
        let list = match list {
            List::X => &self.x,
            List::Y => &self.y,
            List::Dx => &self.dx,
            List::Dy => &self.dy,
        };

        list.get(self.index).copied()
    }
}

#[derive(Clone, Debug)]
struct Frame {
    font: FontSpec,
    text: Option<TextFrame>,
}

/// A drawing context.
///
/// Holds the state that is inherited while walking the node tree: the font
/// stack, the per-character positioning lists of the enclosing texts and the
/// glyph cursor. It also caches font metrics, character lookups and glyph
/// outlines between draw passes.
#[derive(Clone, Debug)]
pub struct Context {
    opt: Options,
    frames: Vec<Frame>,
    cursor: (f32, f32),
    metrics: HashMap<ID, Option<FontMetrics>>,
    glyphs: HashMap<(ID, char), (GlyphId, f32)>,
    outlines: HashMap<(ID, GlyphId), Option<Path>>,
}

impl Context {
    /// Creates a new context.
    pub fn new(opt: Options) -> Self {
        let root = FontSpec {
            families: opt.font_family.clone(),
            size: opt.font_size,
            weight: 400,
            style: FontStyle::Normal,
            letter_spacing: 0.0,
            word_spacing: 0.0,
            text_anchor: TextAnchor::Start,
        };

        Context {
            opt,
            frames: vec![Frame {
                font: root,
                text: None,
            }],
            cursor: (0.0, 0.0),
            metrics: HashMap::new(),
            glyphs: HashMap::new(),
            outlines: HashMap::new(),
        }
    }

    /// Returns the options the context was created with.
    pub fn options(&self) -> &Options {
        &self.opt
    }

    /// Returns the current font state.
    pub fn font(&self) -> &FontSpec {
        // The root frame is never popped.
        &self.frames[self.frames.len() - 1].font
    }

    /// Returns the units context for the current font state.
    pub fn units(&self) -> UnitContext {
        UnitContext {
            font_size: self.font().size,
            viewport: self.opt.viewport,
            dpi: self.opt.dpi,
        }
    }

    /// Enters a node that only carries font attributes.
    pub fn push_font(&mut self, props: &FontProps) {
        let font = self.font().inherit(props, &self.units());
        self.frames.push(Frame { font, text: None });
    }

    /// Enters a text node.
    ///
    /// The frame is pushed even on error, so it must always be followed by [`Context::pop`].
    pub(crate) fn push_text(
        &mut self,
        props: &FontProps,
        attrs: &TextAttributes,
    ) -> Result<(), Error> {
        let font = self.font().inherit(props, &self.units());
        let units = UnitContext {
            font_size: font.size,
            ..self.units()
        };

        let text = TextFrame {
            x: units.convert_list(&attrs.position_x, Axis::Horizontal),
            y: units.convert_list(&attrs.position_y, Axis::Vertical),
            dx: units.convert_list(&attrs.delta_x, Axis::Horizontal),
            dy: units.convert_list(&attrs.delta_y, Axis::Vertical),
            rotate: attrs.rotate.iter().map(|a| a.to_degrees() as f32).collect(),
            index: 0,
            alignment_baseline: attrs.alignment_baseline,
            baseline_shift: attrs.baseline_shift,
            shift: 0.0,
        };

        self.frames.push(Frame {
            font,
            text: Some(text),
        });

        let shift = match attrs.baseline_shift {
            Some(shift) => self.shift_to_user(shift)?,
            None => return Ok(()),
        };

        if let Some(text) = self.frames.last_mut().and_then(|f| f.text.as_mut()) {
            text.shift = shift;
        }

        Ok(())
    }

    /// Converts a baseline shift to user units using the current font.
    fn shift_to_user(&mut self, shift: BaselineShift) -> Result<f32, Error> {
        let shift = match shift {
            BaselineShift::Baseline => 0.0,
            BaselineShift::Subscript => -self.resolve_font()?.subscript_offset(),
            BaselineShift::Superscript => self.resolve_font()?.superscript_offset(),
            BaselineShift::Length(length) if length.unit == svgtypes::LengthUnit::Percent => {
                self.font().size * length.number as f32 / 100.0
            }
            BaselineShift::Length(length) => self.units().convert(length, Axis::Vertical),
        };

        Ok(shift)
    }

    /// Leaves the node entered last.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Checks that the context is inside a text node.
    pub fn in_text(&self) -> bool {
        self.frames.iter().any(|f| f.text.is_some())
    }

    fn text_frames(&self) -> impl DoubleEndedIterator<Item = &TextFrame> {
        self.frames.iter().filter_map(|f| f.text.as_ref())
    }

    fn text_frames_mut(&mut self) -> impl Iterator<Item = &mut TextFrame> {
        self.frames.iter_mut().filter_map(|f| f.text.as_mut())
    }

    /// Returns the `alignment-baseline` of the innermost enclosing text that sets one.
    pub fn alignment_baseline(&self) -> Option<AlignmentBaseline> {
        self.text_frames().rev().find_map(|f| f.alignment_baseline)
    }

    /// Returns the `baseline-shift` of the innermost enclosing text that sets one.
    pub fn baseline_shift(&self) -> Option<BaselineShift> {
        self.text_frames().rev().find_map(|f| f.baseline_shift)
    }

    /// Returns the accumulated upward baseline shift of all enclosing texts.
    pub(crate) fn total_baseline_shift(&self) -> f32 {
        self.text_frames().map(|f| f.shift).sum()
    }

    /// Returns the glyph cursor.
    pub fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    pub(crate) fn reset_cursor(&mut self) {
        self.cursor = (0.0, 0.0);
    }

    pub(crate) fn set_cursor_x(&mut self, x: f32) {
        self.cursor.0 = x;
    }

    /// Positions the cursor for the next character.
    ///
    /// Returns the glyph origin and whether an absolute `x` starts a new text chunk.
    pub(crate) fn next_origin(&mut self) -> (f32, f32, bool) {
        let lookup = |list| self.text_frames().rev().find_map(|f| f.value(list));

        let x = lookup(List::X);
        let y = lookup(List::Y);
        let dx = lookup(List::Dx).unwrap_or(0.0);
        let dy = lookup(List::Dy).unwrap_or(0.0);

        if let Some(x) = x {
            self.cursor.0 = x;
        }
        if let Some(y) = y {
            self.cursor.1 = y;
        }

        self.cursor.0 += dx;
        self.cursor.1 += dy;

        (self.cursor.0, self.cursor.1, x.is_some())
    }

    /// Returns the rotation of the next character in degrees.
    ///
    /// The last value of a `rotate` list applies to all the remaining characters.
    pub(crate) fn rotate(&self) -> f32 {
        self.text_frames()
            .rev()
            .find(|f| !f.rotate.is_empty())
            .and_then(|f| f.rotate.get(f.index).or(f.rotate.last()).copied())
            .unwrap_or(0.0)
    }

    /// Moves past a character.
    pub(crate) fn advance(&mut self, width: f32) {
        self.cursor.0 += width;
        for frame in self.text_frames_mut() {
            frame.index += 1;
        }
    }

    /// Moves past a run that was laid out before.
    pub(crate) fn replay(&mut self, end: RunEnd) {
        for frame in self.text_frames_mut() {
            frame.index += end.chars;
        }
        self.cursor = end.cursor;
    }

    /// Resolves the current font state against the font database.
    pub fn resolve_font(&mut self) -> Result<ResolvedFont, Error> {
        let spec = self.font().clone();
        let id = query_face(&self.opt.fontdb, &spec, &self.opt.font_family)?;

        let fontdb = &self.opt.fontdb;
        let metrics = *self.metrics.entry(id).or_insert_with(|| {
            fontdb
                .with_face_data(id, FontMetrics::load)
                .flatten()
                .log_none(|| log::warn!("Failed to load metrics for font face {}.", id))
        });

        match metrics {
            Some(metrics) => Ok(ResolvedFont {
                id,
                size: spec.size,
                metrics,
            }),
            None => Err(Error::FontNotFound(spec.families_to_string())),
        }
    }

    /// Maps a character to a glyph and its advance in font units.
    ///
    /// Unmapped characters use `.notdef`.
    pub(crate) fn glyph(&mut self, font: &ResolvedFont, c: char) -> (GlyphId, f32) {
        let fontdb = &self.opt.fontdb;
        *self.glyphs.entry((font.id, c)).or_insert_with(|| {
            fontdb
                .with_face_data(font.id, |data, index| outline::glyph_info(data, index, c))
                .flatten()
                .unwrap_or((GlyphId::NOTDEF, 0.0))
        })
    }

    /// Returns the glyph outline in font units.
    pub(crate) fn outline(&mut self, id: ID, glyph: GlyphId) -> Option<Path> {
        let fontdb = &self.opt.fontdb;
        self.outlines
            .entry((id, glyph))
            .or_insert_with(|| {
                fontdb
                    .with_face_data(id, |data, index| outline::load_outline(data, index, glyph))
                    .flatten()
            })
            .clone()
    }
}

impl GeometryHash for Context {
    fn hash_geometry<H: Hasher>(&self, state: &mut H) {
        // A different database can resolve to different faces.
        state.write_usize(Arc::as_ptr(&self.opt.fontdb) as usize);
        hash_f32(state, self.opt.dpi);
        hash_f32(state, self.opt.viewport.width());
        hash_f32(state, self.opt.viewport.height());

        self.font().hash_geometry(state);

        for frame in self.text_frames() {
            hash_list(state, &frame.x, hash_f32);
            hash_list(state, &frame.y, hash_f32);
            hash_list(state, &frame.dx, hash_f32);
            hash_list(state, &frame.dy, hash_f32);
            hash_list(state, &frame.rotate, hash_f32);
            state.write_usize(frame.index);
            frame.alignment_baseline.hash(state);
            hash_option(state, frame.baseline_shift, |state, shift| {
                shift.hash_geometry(state)
            });
            hash_f32(state, frame.shift);
        }

        hash_f32(state, self.cursor.0);
        hash_f32(state, self.cursor.1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgtypes::{Angle, AngleUnit, Length, LengthUnit};

    fn px(list: &[f64]) -> Vec<Length> {
        list.iter().map(|n| Length::new_number(*n)).collect()
    }

    #[test]
    fn lists_are_consumed_per_character() {
        let mut ctx = Context::new(Options::default());
        let attrs = TextAttributes {
            position_x: px(&[10.0]),
            delta_x: px(&[1.0, 2.0]),
            rotate: vec![
                Angle::new(5.0, AngleUnit::Degrees),
                Angle::new(15.0, AngleUnit::Degrees),
            ],
            ..TextAttributes::default()
        };

        ctx.push_text(&FontProps::default(), &attrs).unwrap();
        assert!(ctx.in_text());

        assert_eq!(ctx.next_origin(), (11.0, 0.0, true));
        assert_eq!(ctx.rotate(), 5.0);
        ctx.advance(4.0);

        assert_eq!(ctx.next_origin(), (17.0, 0.0, false));
        assert_eq!(ctx.rotate(), 15.0);
        ctx.advance(4.0);

        // Only `rotate` repeats its last value.
        assert_eq!(ctx.next_origin(), (21.0, 0.0, false));
        assert_eq!(ctx.rotate(), 15.0);

        ctx.pop();
        assert!(!ctx.in_text());
    }

    #[test]
    fn innermost_text_wins() {
        let mut ctx = Context::new(Options::default());
        let outer = TextAttributes {
            position_y: px(&[5.0, 6.0]),
            baseline_shift: Some(BaselineShift::Length(Length::new_number(3.0))),
            ..TextAttributes::default()
        };
        let inner = TextAttributes {
            position_y: px(&[50.0]),
            ..TextAttributes::default()
        };

        ctx.push_text(&FontProps::default(), &outer).unwrap();
        ctx.next_origin();
        ctx.advance(1.0);

        ctx.push_text(&FontProps::default(), &inner).unwrap();
        assert_eq!(ctx.next_origin().1, 50.0);
        assert_eq!(
            ctx.baseline_shift(),
            Some(BaselineShift::Length(Length::new_number(3.0)))
        );
        assert_eq!(ctx.alignment_baseline(), None);
        ctx.advance(1.0);

        // Both lists are exhausted, so y stays.
        assert_eq!(ctx.next_origin().1, 50.0);
        ctx.pop();
        ctx.pop();
    }

    #[test]
    fn baseline_shift_uses_the_declaring_font() {
        let mut ctx = Context::new(Options::default());
        let outer = TextAttributes {
            baseline_shift: Some(BaselineShift::Length(Length::new(50.0, LengthUnit::Percent))),
            ..TextAttributes::default()
        };
        let inner = TextAttributes {
            baseline_shift: Some(BaselineShift::Length(Length::new(1.0, LengthUnit::Em))),
            ..TextAttributes::default()
        };
        let large = FontProps {
            size: Some(Length::new_number(24.0)),
            ..FontProps::default()
        };

        ctx.push_text(&FontProps::default(), &outer).unwrap();
        assert_eq!(ctx.total_baseline_shift(), 6.0);

        ctx.push_text(&large, &TextAttributes::default()).unwrap();
        assert_eq!(ctx.total_baseline_shift(), 6.0);

        ctx.push_text(&FontProps::default(), &inner).unwrap();
        assert_eq!(ctx.total_baseline_shift(), 30.0);

        ctx.pop();
        ctx.pop();
        ctx.pop();
        assert_eq!(ctx.total_baseline_shift(), 0.0);
    }

    #[test]
    fn root_frame_is_never_popped() {
        let mut ctx = Context::new(Options::default());
        ctx.pop();
        ctx.pop();
        assert_eq!(ctx.font().size, 12.0);
    }
}

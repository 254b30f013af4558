// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use svgtypes::{Angle, Length};
use tiny_skia_path::Path;

use super::{Group, Node};
use crate::attributes::{
    angle_list_to_string, length_list_to_string, length_to_string, parse_angle,
    parse_angle_list, parse_keyword, parse_length, parse_length_list, parse_non_negative_length,
};
use crate::cache::{hash_angle, hash_length, hash_list, hash_option, new_hasher};
use crate::cache::{GeometryHash, PathCache, RunEnd};
use crate::font::{FontProps, ResolvedFont};
use crate::style::{AlignmentBaseline, BaselineShift, LengthAdjust};
use crate::text::{layout, outline};
use crate::{AId, Context, Error};

/// Text layout attributes.
///
/// Lists address characters index-for-index.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct TextAttributes {
    /// `textLength`
    pub text_length: Option<Length>,
    /// `baseline-shift`
    pub baseline_shift: Option<BaselineShift>,
    /// `lengthAdjust`
    pub length_adjust: Option<LengthAdjust>,
    /// `alignment-baseline`
    pub alignment_baseline: Option<AlignmentBaseline>,
    /// `dx`
    pub delta_x: Vec<Length>,
    /// `dy`
    pub delta_y: Vec<Length>,
    /// `x`
    pub position_x: Vec<Length>,
    /// `y`
    pub position_y: Vec<Length>,
    /// `rotate`
    pub rotate: Vec<Angle>,
}

impl TextAttributes {
    fn list_mut(&mut self, aid: AId) -> Option<&mut Vec<Length>> {
        match aid {
            AId::Dx => Some(&mut self.delta_x),
            AId::Dy => Some(&mut self.delta_y),
            AId::X => Some(&mut self.position_x),
            AId::Y => Some(&mut self.position_y),
            _ => None,
        }
    }

    fn list(&self, aid: AId) -> Option<&[Length]> {
        match aid {
            AId::Dx => Some(&self.delta_x),
            AId::Dy => Some(&self.delta_y),
            AId::X => Some(&self.position_x),
            AId::Y => Some(&self.position_y),
            _ => None,
        }
    }
}

impl GeometryHash for TextAttributes {
    fn hash_geometry<H: Hasher>(&self, state: &mut H) {
        hash_option(state, self.text_length, hash_length);
        hash_option(state, self.baseline_shift, |state, shift| {
            shift.hash_geometry(state)
        });
        self.length_adjust.hash(state);
        self.alignment_baseline.hash(state);
        hash_list(state, &self.delta_x, hash_length);
        hash_list(state, &self.delta_y, hash_length);
        hash_list(state, &self.position_x, hash_length);
        hash_list(state, &self.position_y, hash_length);
        hash_list(state, &self.rotate, hash_angle);
    }
}

/// A text element.
///
/// Composes a [`Group`] with text layout attributes and character data.
/// Character data is laid out before the children.
#[derive(Clone, Default, Debug)]
pub struct Text {
    group: Group,
    attributes: TextAttributes,
    content: Option<String>,
    cache: PathCache,
}

impl Text {
    /// Creates an empty text.
    pub fn new() -> Self {
        Text::default()
    }

    /// The group part of the text.
    pub fn group(&self) -> &Group {
        &self.group
    }

    /// The group part of the text.
    pub fn group_mut(&mut self) -> &mut Group {
        &mut self.group
    }

    /// Element's ID.
    pub fn id(&self) -> &str {
        self.group.id()
    }

    /// Font attributes set on this node.
    pub fn font(&self) -> &FontProps {
        self.group.font()
    }

    /// Child nodes.
    pub fn children(&self) -> &[Node] {
        self.group.children()
    }

    /// Appends a child node.
    pub fn append<T: Into<Node>>(&mut self, node: T) {
        self.group.append(node);
    }

    /// Character data.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Sets the character data.
    pub fn set_content<T: Into<String>>(&mut self, content: T) {
        self.content = Some(content.into());
    }

    /// Layout attributes.
    pub fn attributes(&self) -> &TextAttributes {
        &self.attributes
    }

    /// Layout attributes.
    ///
    /// Values are used as is, without validation.
    pub fn attributes_mut(&mut self) -> &mut TextAttributes {
        &mut self.attributes
    }

    /// `textLength` set on this node.
    pub fn text_length(&self) -> Option<Length> {
        self.attributes.text_length
    }

    /// `lengthAdjust` set on this node or the default one.
    pub fn length_adjust(&self) -> LengthAdjust {
        self.attributes.length_adjust.unwrap_or_default()
    }

    /// `alignment-baseline` set on this node or `baseline`.
    pub fn alignment_baseline(&self) -> AlignmentBaseline {
        self.attributes.alignment_baseline.unwrap_or_default()
    }

    /// `baseline-shift` set on this node or `baseline`.
    pub fn baseline_shift(&self) -> BaselineShift {
        self.attributes.baseline_shift.unwrap_or_default()
    }

    /// `alignment-baseline` set on this node, else on the nearest enclosing text,
    /// else `baseline`.
    pub fn resolve_alignment_baseline(&self, ctx: &Context) -> AlignmentBaseline {
        self.attributes
            .alignment_baseline
            .or_else(|| ctx.alignment_baseline())
            .unwrap_or_default()
    }

    /// `baseline-shift` set on this node, else on the nearest enclosing text,
    /// else `baseline`.
    pub fn resolve_baseline_shift(&self, ctx: &Context) -> BaselineShift {
        self.attributes
            .baseline_shift
            .or_else(|| ctx.baseline_shift())
            .unwrap_or_default()
    }

    /// Sets an attribute by its SVG or bridge name.
    ///
    /// List attributes accept an SVG list string, like `10 20 3em`.
    /// An invalid value is rejected and the previous one is kept.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), Error> {
        let aid = AId::from_name(name).ok_or_else(|| Error::UnknownAttribute(name.to_string()))?;
        match aid {
            AId::TextLength => {
                self.attributes.text_length = Some(parse_non_negative_length(aid, value)?);
            }
            AId::BaselineShift => {
                self.attributes.baseline_shift = Some(parse_keyword(aid, value)?);
            }
            AId::LengthAdjust => {
                self.attributes.length_adjust = Some(parse_keyword(aid, value)?);
            }
            AId::AlignmentBaseline => {
                self.attributes.alignment_baseline = Some(parse_keyword(aid, value)?);
            }
            AId::Rotate => self.attributes.rotate = parse_angle_list(aid, value)?,
            AId::Dx | AId::Dy | AId::X | AId::Y => {
                let list = parse_length_list(aid, value)?;
                if let Some(dst) = self.attributes.list_mut(aid) {
                    *dst = list;
                }
            }
            AId::Content => self.content = Some(value.to_string()),
            _ => self.group.set(aid, value)?,
        }

        Ok(())
    }

    /// Sets a list attribute from separate values.
    pub fn set_list_attribute(&mut self, name: &str, values: &[&str]) -> Result<(), Error> {
        let aid = AId::from_name(name).ok_or_else(|| Error::UnknownAttribute(name.to_string()))?;
        if !aid.is_list() {
            return Err(Error::NotAList(aid));
        }

        if aid == AId::Rotate {
            self.attributes.rotate = values
                .iter()
                .map(|v| parse_angle(aid, v))
                .collect::<Result<_, _>>()?;
            return Ok(());
        }

        let list = values
            .iter()
            .map(|v| parse_length(aid, v))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(dst) = self.attributes.list_mut(aid) {
            *dst = list;
        }

        Ok(())
    }

    /// Returns an attribute value formatted as SVG.
    ///
    /// Unset attributes and empty lists are `None`.
    pub fn get_attribute(&self, name: &str) -> Result<Option<String>, Error> {
        let aid = AId::from_name(name).ok_or_else(|| Error::UnknownAttribute(name.to_string()))?;
        let attrs = &self.attributes;
        let value = match aid {
            AId::TextLength => attrs.text_length.map(length_to_string),
            AId::BaselineShift => attrs.baseline_shift.map(|v| v.to_string()),
            AId::LengthAdjust => attrs.length_adjust.map(|v| v.to_string()),
            AId::AlignmentBaseline => attrs.alignment_baseline.map(|v| v.to_string()),
            AId::Rotate => {
                (!attrs.rotate.is_empty()).then(|| angle_list_to_string(&attrs.rotate))
            }
            AId::Dx | AId::Dy | AId::X | AId::Y => attrs
                .list(aid)
                .filter(|list| !list.is_empty())
                .map(length_list_to_string),
            AId::Content => self.content.clone(),
            _ => return self.group.get(aid),
        };

        Ok(value)
    }

    /// Resets an attribute to unset.
    pub fn remove_attribute(&mut self, name: &str) -> Result<(), Error> {
        let aid = AId::from_name(name).ok_or_else(|| Error::UnknownAttribute(name.to_string()))?;
        match aid {
            AId::TextLength => self.attributes.text_length = None,
            AId::BaselineShift => self.attributes.baseline_shift = None,
            AId::LengthAdjust => self.attributes.length_adjust = None,
            AId::AlignmentBaseline => self.attributes.alignment_baseline = None,
            AId::Rotate => self.attributes.rotate.clear(),
            AId::Dx | AId::Dy | AId::X | AId::Y => {
                if let Some(list) = self.attributes.list_mut(aid) {
                    list.clear();
                }
            }
            AId::Content => self.content = None,
            _ => self.group.remove(aid)?,
        }

        Ok(())
    }

    /// Checks that the node holds a memoized path.
    pub fn has_cached_path(&self) -> bool {
        !self.cache.is_empty()
    }

    /// Discards the memoized path of this node and all its descendants.
    ///
    /// The next [`Text::get_group_path`] call lays the text out again.
    pub fn release_cached_path(&mut self) {
        self.cache.release();
        self.group.release_cached_path();
    }

    /// Returns the geometry of this text and its children.
    ///
    /// The path is in the parent's coordinates, with the node transform applied.
    /// `None` means there is nothing to draw, like for an empty or whitespace-only text.
    ///
    /// The result is memoized. While neither the node subtree nor the context
    /// state change, the same handle is returned.
    pub fn get_group_path(&mut self, ctx: &mut Context) -> Result<Option<Arc<Path>>, Error> {
        let is_root = !ctx.in_text();
        if is_root {
            ctx.reset_cursor();
        }

        let key = {
            let mut state = new_hasher();
            self.hash_geometry(&mut state);
            ctx.hash_geometry(&mut state);
            state.finish()
        };

        if let Some((path, end)) = self.cache.get(key) {
            log::trace!("Text path cache hit for '{}'.", self.id());
            ctx.replay(end);
            return Ok(path);
        }

        log::trace!("Text path cache miss for '{}'.", self.id());

        let mut glyphs = Vec::new();
        layout::layout_text(self, ctx, &mut glyphs)?;

        let advance = glyphs
            .first()
            .map(|glyph| ctx.cursor().0 - glyph.x)
            .unwrap_or(0.0);

        // Chunks are anchored once the whole text is laid out.
        if is_root {
            layout::align_chunks(&mut glyphs);
        }

        let path = outline::glyphs_to_path(&glyphs, ctx)
            .and_then(|path| path.transform(self.group.transform()))
            .map(Arc::new);

        let end = RunEnd {
            chars: glyphs.len(),
            cursor: ctx.cursor(),
            advance,
        };
        self.cache.store(key, path.clone(), end);

        Ok(path)
    }

    /// Resolves the font of this node against the context font database.
    pub fn get_font_from_context(&self, ctx: &mut Context) -> Result<ResolvedFont, Error> {
        ctx.push_font(self.font());
        let font = ctx.resolve_font();
        ctx.pop();
        font
    }

    /// Returns the total advance of the laid out text.
    ///
    /// Measured from the first glyph origin and includes `textLength` adjustment.
    pub fn advance(&mut self, ctx: &mut Context) -> Result<f32, Error> {
        self.get_group_path(ctx)?;
        Ok(self.cache.run_end().map(|end| end.advance).unwrap_or(0.0))
    }
}

impl GeometryHash for Text {
    fn hash_geometry<H: Hasher>(&self, state: &mut H) {
        self.group.hash_geometry(state);
        self.attributes.hash_geometry(state);
        self.content.hash(state);
    }
}

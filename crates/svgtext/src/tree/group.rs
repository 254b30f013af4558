// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::hash::Hasher;
use std::str::FromStr;

use svgtypes::Color;
use tiny_skia_path::{Path, PathBuilder, Transform};

use super::Node;
use crate::attributes::{length_to_string, parse_keyword, parse_length, parse_non_negative_length};
use crate::cache::{hash_transform, GeometryHash};
use crate::font::FontProps;
use crate::{AId, Context, Error};

/// A group container.
///
/// Holds the state shared by every node: font attributes, paint and transform.
#[derive(Clone, Default, Debug)]
pub struct Group {
    id: String,
    font: FontProps,
    fill: Option<Color>,
    transform: Transform,
    children: Vec<Node>,
}

impl Group {
    /// Creates an empty group.
    pub fn new() -> Self {
        Group::default()
    }

    /// Element's ID.
    ///
    /// Can be empty.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Font attributes set on this node.
    pub fn font(&self) -> &FontProps {
        &self.font
    }

    /// Font attributes set on this node.
    pub fn font_mut(&mut self) -> &mut FontProps {
        &mut self.font
    }

    /// Fill color set on this node.
    ///
    /// `None` means inherited.
    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    /// Sets the fill color.
    pub fn set_fill(&mut self, fill: Option<Color>) {
        self.fill = fill;
    }

    /// Element's transform.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Sets the element's transform.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Group's children.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Group's children.
    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// Appends a child node.
    pub fn append<T: Into<Node>>(&mut self, node: T) {
        self.children.push(node.into());
    }

    /// Sets an attribute by its SVG or bridge name.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), Error> {
        let aid = AId::from_name(name).ok_or_else(|| Error::UnknownAttribute(name.to_string()))?;
        self.set(aid, value)
    }

    /// Returns an attribute value formatted as SVG.
    ///
    /// Unset attributes are `None`.
    pub fn get_attribute(&self, name: &str) -> Result<Option<String>, Error> {
        let aid = AId::from_name(name).ok_or_else(|| Error::UnknownAttribute(name.to_string()))?;
        self.get(aid)
    }

    /// Resets an attribute to unset.
    pub fn remove_attribute(&mut self, name: &str) -> Result<(), Error> {
        let aid = AId::from_name(name).ok_or_else(|| Error::UnknownAttribute(name.to_string()))?;
        self.remove(aid)
    }

    pub(crate) fn set(&mut self, aid: AId, value: &str) -> Result<(), Error> {
        match aid {
            AId::Id => self.id = value.to_string(),
            AId::Fill => self.fill = Some(parse_fill(value)?),
            AId::Transform => self.transform = parse_transform(value)?,
            AId::FontFamily => {
                let families = svgtypes::parse_font_families(value).map_err(|_| {
                    Error::InvalidValue {
                        attribute: aid,
                        value: value.to_string(),
                    }
                })?;
                self.font.family = Some(families);
            }
            AId::FontSize => self.font.size = Some(parse_non_negative_length(aid, value)?),
            AId::FontWeight => self.font.weight = Some(parse_keyword(aid, value)?),
            AId::FontStyle => self.font.style = Some(parse_keyword(aid, value)?),
            AId::LetterSpacing => self.font.letter_spacing = Some(parse_spacing(aid, value)?),
            AId::WordSpacing => self.font.word_spacing = Some(parse_spacing(aid, value)?),
            AId::TextAnchor => self.font.text_anchor = Some(parse_keyword(aid, value)?),
            _ => return Err(Error::UnknownAttribute(aid.to_str().to_string())),
        }

        Ok(())
    }

    pub(crate) fn get(&self, aid: AId) -> Result<Option<String>, Error> {
        let value = match aid {
            AId::Id => (!self.id.is_empty()).then(|| self.id.clone()),
            AId::Fill => self.fill.map(fill_to_string),
            AId::Transform => {
                (!self.transform.is_identity()).then(|| transform_to_string(self.transform))
            }
            AId::FontFamily => self.font.family.as_ref().map(|families| {
                families
                    .iter()
                    .map(|f| f.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            }),
            AId::FontSize => self.font.size.map(length_to_string),
            AId::FontWeight => self.font.weight.map(|v| v.to_string()),
            AId::FontStyle => self.font.style.map(|v| v.to_string()),
            AId::LetterSpacing => self.font.letter_spacing.map(length_to_string),
            AId::WordSpacing => self.font.word_spacing.map(length_to_string),
            AId::TextAnchor => self.font.text_anchor.map(|v| v.to_string()),
            _ => return Err(Error::UnknownAttribute(aid.to_str().to_string())),
        };

        Ok(value)
    }

    pub(crate) fn remove(&mut self, aid: AId) -> Result<(), Error> {
        match aid {
            AId::Id => self.id.clear(),
            AId::Fill => self.fill = None,
            AId::Transform => self.transform = Transform::default(),
            AId::FontFamily => self.font.family = None,
            AId::FontSize => self.font.size = None,
            AId::FontWeight => self.font.weight = None,
            AId::FontStyle => self.font.style = None,
            AId::LetterSpacing => self.font.letter_spacing = None,
            AId::WordSpacing => self.font.word_spacing = None,
            AId::TextAnchor => self.font.text_anchor = None,
            _ => return Err(Error::UnknownAttribute(aid.to_str().to_string())),
        }

        Ok(())
    }

    /// Returns the union of the children geometry with the group transform applied.
    pub fn path(&mut self, ctx: &mut Context) -> Result<Option<Path>, Error> {
        ctx.push_font(&self.font);
        let res = children_path(&mut self.children, ctx);
        ctx.pop();

        Ok(res?.and_then(|path| path.transform(self.transform)))
    }

    /// Discards memoized geometry of all descendants.
    pub fn release_cached_path(&mut self) {
        for child in &mut self.children {
            child.release_cached_path();
        }
    }
}

fn children_path(children: &mut [Node], ctx: &mut Context) -> Result<Option<Path>, Error> {
    let mut builder = PathBuilder::new();
    for child in children {
        if let Some(path) = child.path(ctx)? {
            builder.push_path(&path);
        }
    }

    Ok(builder.finish())
}

impl GeometryHash for Group {
    fn hash_geometry<H: Hasher>(&self, state: &mut H) {
        self.font.hash_geometry(state);
        hash_transform(state, self.transform);
        state.write_usize(self.children.len());
        for child in &self.children {
            child.hash_geometry(state);
        }
    }
}

fn parse_fill(value: &str) -> Result<Color, Error> {
    let value = value.trim();
    if value == "none" {
        return Ok(Color::new_rgba(0, 0, 0, 0));
    }

    Color::from_str(value).map_err(|_| Error::InvalidValue {
        attribute: AId::Fill,
        value: value.to_string(),
    })
}

fn fill_to_string(c: Color) -> String {
    match c.alpha {
        0 => "none".to_string(),
        255 => format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue),
        a => format!(
            "rgba({}, {}, {}, {})",
            c.red,
            c.green,
            c.blue,
            f32::from(a) / 255.0
        ),
    }
}

fn parse_transform(value: &str) -> Result<Transform, Error> {
    let ts = svgtypes::Transform::from_str(value).map_err(|_| Error::InvalidValue {
        attribute: AId::Transform,
        value: value.to_string(),
    })?;

    Ok(Transform::from_row(
        ts.a as f32,
        ts.b as f32,
        ts.c as f32,
        ts.d as f32,
        ts.e as f32,
        ts.f as f32,
    ))
}

fn transform_to_string(ts: Transform) -> String {
    format!(
        "matrix({} {} {} {} {} {})",
        ts.sx, ts.ky, ts.kx, ts.sy, ts.tx, ts.ty
    )
}

// `normal` spacing is zero.
fn parse_spacing(aid: AId, value: &str) -> Result<svgtypes::Length, Error> {
    if value.trim() == "normal" {
        return Ok(svgtypes::Length::zero());
    }

    parse_length(aid, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FontStyle, FontWeight, TextAnchor};
    use svgtypes::{FontFamily, Length, LengthUnit};

    #[test]
    fn font_attributes() {
        let mut group = Group::new();
        group.set_attribute("fontFamily", "'Noto Sans', serif").unwrap();
        group.set_attribute("font-size", "2em").unwrap();
        group.set_attribute("fontWeight", "bold").unwrap();
        group.set_attribute("font-style", "italic").unwrap();
        group.set_attribute("letterSpacing", "normal").unwrap();
        group.set_attribute("text-anchor", "middle").unwrap();

        let font = group.font();
        assert_eq!(
            font.family,
            Some(vec![FontFamily::Named("Noto Sans".to_string()), FontFamily::Serif])
        );
        assert_eq!(font.size, Some(Length::new(2.0, LengthUnit::Em)));
        assert_eq!(font.weight, Some(FontWeight::Bold));
        assert_eq!(font.style, Some(FontStyle::Italic));
        assert_eq!(font.letter_spacing, Some(Length::zero()));
        assert_eq!(font.text_anchor, Some(TextAnchor::Middle));

        assert_eq!(group.get_attribute("fontSize").unwrap().as_deref(), Some("2em"));
        assert_eq!(group.get_attribute("word-spacing").unwrap(), None);
    }

    #[test]
    fn fill_and_transform() {
        let mut group = Group::new();
        group.set_attribute("fill", "#ff0000").unwrap();
        assert_eq!(group.fill(), Some(Color::new_rgba(255, 0, 0, 255)));
        assert_eq!(group.get_attribute("fill").unwrap().as_deref(), Some("#ff0000"));

        group.set_attribute("fill", "none").unwrap();
        assert_eq!(group.get_attribute("fill").unwrap().as_deref(), Some("none"));

        group.set_attribute("transform", "translate(10 20)").unwrap();
        assert_eq!(group.transform(), Transform::from_translate(10.0, 20.0));
        assert_eq!(
            group.get_attribute("transform").unwrap().as_deref(),
            Some("matrix(1 0 0 1 10 20)")
        );

        group.remove_attribute("transform").unwrap();
        assert!(group.transform().is_identity());
    }

    #[test]
    fn invalid_values_keep_the_old_one() {
        let mut group = Group::new();
        group.set_attribute("fontSize", "10").unwrap();
        assert_eq!(
            group.set_attribute("fontSize", "-1"),
            Err(Error::NegativeValue {
                attribute: AId::FontSize,
                value: "-1".to_string(),
            })
        );
        assert_eq!(group.font().size, Some(Length::new_number(10.0)));

        assert!(group.set_attribute("fill", "reddish").is_err());
        assert_eq!(group.fill(), None);
    }

    #[test]
    fn text_attributes_are_rejected() {
        let mut group = Group::new();
        assert_eq!(
            group.set_attribute("deltaX", "1"),
            Err(Error::UnknownAttribute("dx".to_string()))
        );
        assert_eq!(
            group.set_attribute("stroke", "red"),
            Err(Error::UnknownAttribute("stroke".to_string()))
        );
    }
}

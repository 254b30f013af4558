// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::hash::{Hash, Hasher};
use std::num::NonZeroU16;

use fontdb::{Database, Family, Query, ID};
use skrifa::{
    instance::{LocationRef, Size as SkrifaSize},
    raw::TableProvider,
    FontRef, MetadataProvider,
};
use svgtypes::{FontFamily, Length};

use crate::cache::{hash_f32, hash_length, hash_option, GeometryHash};
use crate::style::{FontStyle, FontWeight, TextAnchor};
use crate::units::{Axis, UnitContext};
use crate::Error;

/// Font attributes of a node.
///
/// Every field is optional. Unset fields are inherited from the enclosing node.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct FontProps {
    /// `font-family`
    pub family: Option<Vec<FontFamily>>,
    /// `font-size`
    pub size: Option<Length>,
    /// `font-weight`
    pub weight: Option<FontWeight>,
    /// `font-style`
    pub style: Option<FontStyle>,
    /// `letter-spacing`
    pub letter_spacing: Option<Length>,
    /// `word-spacing`
    pub word_spacing: Option<Length>,
    /// `text-anchor`
    pub text_anchor: Option<TextAnchor>,
}

/// Fully inherited font state.
#[derive(Clone, PartialEq, Debug)]
pub struct FontSpec {
    /// Families in priority order.
    pub families: Vec<FontFamily>,
    /// Font size in user units.
    pub size: f32,
    /// Numeric font weight.
    pub weight: u16,
    /// Font style.
    pub style: FontStyle,
    /// Extra advance after every glyph, in user units.
    pub letter_spacing: f32,
    /// Extra advance after every space, in user units.
    pub word_spacing: f32,
    /// Text anchor of the chunks started inside this node.
    pub text_anchor: TextAnchor,
}

impl FontSpec {
    /// Applies node attributes on top of the inherited state.
    pub fn inherit(&self, props: &FontProps, units: &UnitContext) -> FontSpec {
        let size = match props.size {
            Some(length) => units.convert_font_size(length, self.size),
            None => self.size,
        };

        // Spacing `em` units are relative to the element's own font size.
        let units = UnitContext {
            font_size: size,
            ..*units
        };

        FontSpec {
            families: props
                .family
                .clone()
                .unwrap_or_else(|| self.families.clone()),
            size,
            weight: props
                .weight
                .map(|w| w.resolve(self.weight))
                .unwrap_or(self.weight),
            style: props.style.unwrap_or(self.style),
            letter_spacing: props
                .letter_spacing
                .map(|l| units.convert(l, Axis::Horizontal))
                .unwrap_or(self.letter_spacing),
            word_spacing: props
                .word_spacing
                .map(|l| units.convert(l, Axis::Horizontal))
                .unwrap_or(self.word_spacing),
            text_anchor: props.text_anchor.unwrap_or(self.text_anchor),
        }
    }

    pub(crate) fn families_to_string(&self) -> String {
        self.families
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl GeometryHash for FontProps {
    fn hash_geometry<H: Hasher>(&self, state: &mut H) {
        hash_option(state, self.family.as_ref(), |state, families| {
            hash_families(state, families)
        });
        hash_option(state, self.size, hash_length);
        hash_option(state, self.weight, |state, weight| weight.hash(state));
        self.style.hash(state);
        hash_option(state, self.letter_spacing, hash_length);
        hash_option(state, self.word_spacing, hash_length);
        self.text_anchor.hash(state);
    }
}

impl GeometryHash for FontSpec {
    fn hash_geometry<H: Hasher>(&self, state: &mut H) {
        hash_families(state, &self.families);
        hash_f32(state, self.size);
        state.write_u16(self.weight);
        self.style.hash(state);
        hash_f32(state, self.letter_spacing);
        hash_f32(state, self.word_spacing);
        self.text_anchor.hash(state);
    }
}

fn hash_families<H: Hasher>(state: &mut H, families: &[FontFamily]) {
    state.write_usize(families.len());
    for family in families {
        family.to_string().hash(state);
    }
}

/// Face metrics in font units.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FontMetrics {
    units_per_em: NonZeroU16,
    ascent: i16,
    descent: i16,
    x_height: NonZeroU16,
    subscript_offset: i16,
    superscript_offset: i16,
}

impl FontMetrics {
    /// Loads face metrics using skrifa.
    pub fn load(data: &[u8], face_index: u32) -> Option<Self> {
        let font = FontRef::from_index(data, face_index).ok()?;
        let metrics = font.metrics(SkrifaSize::unscaled(), LocationRef::default());

        let units_per_em = NonZeroU16::new(metrics.units_per_em)?;
        let ascent = metrics.ascent as i16;
        let descent = metrics.descent as i16;

        let x_height = metrics
            .x_height
            .and_then(|x| u16::try_from(x as i32).ok())
            .and_then(NonZeroU16::new);
        let x_height = match x_height {
            Some(height) => height,
            None => {
                // If not set - fallback to height * 45%.
                // 45% is what Firefox uses.
                u16::try_from((f32::from(ascent - descent) * 0.45) as i32)
                    .ok()
                    .and_then(NonZeroU16::new)?
            }
        };

        // 0.2em and 0.4em are the offsets Inkscape and librsvg fall back to.
        let upem = f32::from(units_per_em.get());
        let (subscript_offset, superscript_offset) = match font.os2() {
            Ok(os2) => (os2.y_subscript_y_offset(), os2.y_superscript_y_offset()),
            Err(_) => ((upem * 0.2).round() as i16, (upem * 0.4).round() as i16),
        };

        Some(FontMetrics {
            units_per_em,
            ascent,
            descent,
            x_height,
            subscript_offset,
            superscript_offset,
        })
    }

    /// Returns the units per em.
    pub fn units_per_em(&self) -> u16 {
        self.units_per_em.get()
    }

    #[cfg(test)]
    pub(crate) fn for_tests(units_per_em: u16, ascent: i16, descent: i16, x_height: u16) -> Self {
        FontMetrics {
            units_per_em: NonZeroU16::new(units_per_em).unwrap(),
            ascent,
            descent,
            x_height: NonZeroU16::new(x_height).unwrap(),
            subscript_offset: (units_per_em / 5) as i16,
            superscript_offset: (units_per_em * 2 / 5) as i16,
        }
    }
}

/// A font face resolved for a specific size.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ResolvedFont {
    /// Face ID in the font database.
    pub id: ID,
    /// Font size in user units.
    pub size: f32,
    /// Face metrics.
    pub metrics: FontMetrics,
}

impl ResolvedFont {
    /// Font units to user units factor.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.size / f32::from(self.metrics.units_per_em.get())
    }

    /// Ascent in user units. Positive.
    #[inline]
    pub fn ascent(&self) -> f32 {
        f32::from(self.metrics.ascent) * self.scale()
    }

    /// Descent in user units. Usually negative.
    #[inline]
    pub fn descent(&self) -> f32 {
        f32::from(self.metrics.descent) * self.scale()
    }

    /// x-height in user units.
    #[inline]
    pub fn x_height(&self) -> f32 {
        f32::from(self.metrics.x_height.get()) * self.scale()
    }

    /// Distance the subscript baseline is lowered by, in user units.
    #[inline]
    pub fn subscript_offset(&self) -> f32 {
        f32::from(self.metrics.subscript_offset) * self.scale()
    }

    /// Distance the superscript baseline is raised by, in user units.
    #[inline]
    pub fn superscript_offset(&self) -> f32 {
        f32::from(self.metrics.superscript_offset) * self.scale()
    }
}

/// Finds a face for the font state.
///
/// Tries the requested families, then the fallback family, then any face in the database.
pub(crate) fn query_face(
    fontdb: &Database,
    spec: &FontSpec,
    fallback: &[FontFamily],
) -> Result<ID, Error> {
    let query_families = |families: &[FontFamily]| -> Option<ID> {
        let families: Vec<Family> = families
            .iter()
            .map(|family| match family {
                FontFamily::Serif => Family::Serif,
                FontFamily::SansSerif => Family::SansSerif,
                FontFamily::Cursive => Family::Cursive,
                FontFamily::Fantasy => Family::Fantasy,
                FontFamily::Monospace => Family::Monospace,
                FontFamily::Named(name) => Family::Name(name.as_str()),
            })
            .collect();

        if families.is_empty() {
            return None;
        }

        fontdb.query(&Query {
            families: &families,
            weight: fontdb::Weight(spec.weight),
            stretch: fontdb::Stretch::Normal,
            style: spec.style.into(),
        })
    };

    if let Some(id) = query_families(&spec.families) {
        return Ok(id);
    }

    if let Some(id) = query_families(fallback) {
        log::warn!(
            "No match for '{}' font-family. Using the default one.",
            spec.families_to_string()
        );
        return Ok(id);
    }

    match fontdb.faces().next() {
        Some(face) => {
            log::warn!(
                "No match for '{}' font-family. Using '{}'.",
                spec.families_to_string(),
                face.post_script_name
            );
            Ok(face.id)
        }
        None => Err(Error::FontNotFound(spec.families_to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgtypes::LengthUnit;
    use tiny_skia_path::Size;

    fn units() -> UnitContext {
        UnitContext {
            font_size: 10.0,
            viewport: Size::from_wh(100.0, 100.0).unwrap(),
            dpi: 96.0,
        }
    }

    fn root() -> FontSpec {
        FontSpec {
            families: vec![FontFamily::SansSerif],
            size: 10.0,
            weight: 400,
            style: FontStyle::Normal,
            letter_spacing: 0.0,
            word_spacing: 0.0,
            text_anchor: TextAnchor::Start,
        }
    }

    #[test]
    fn unset_props_inherit_everything() {
        let spec = root().inherit(&FontProps::default(), &units());
        assert_eq!(spec, root());
    }

    #[test]
    fn props_override_and_resolve() {
        let props = FontProps {
            family: Some(vec![FontFamily::Named("Noto Sans".to_string())]),
            size: Some(Length::new(2.0, LengthUnit::Em)),
            weight: Some(FontWeight::Bolder),
            style: Some(FontStyle::Italic),
            letter_spacing: Some(Length::new(0.5, LengthUnit::Em)),
            word_spacing: None,
            text_anchor: Some(TextAnchor::End),
        };

        let spec = root().inherit(&props, &units());
        assert_eq!(spec.families, vec![FontFamily::Named("Noto Sans".to_string())]);
        assert_eq!(spec.size, 20.0);
        assert_eq!(spec.weight, 700);
        assert_eq!(spec.style, FontStyle::Italic);
        // Relative to the new font size.
        assert_eq!(spec.letter_spacing, 10.0);
        assert_eq!(spec.word_spacing, 0.0);
        assert_eq!(spec.text_anchor, TextAnchor::End);
    }

    #[test]
    fn empty_database_has_no_faces() {
        let db = Database::new();
        assert_eq!(
            query_face(&db, &root(), &[FontFamily::Serif]),
            Err(Error::FontNotFound("sans-serif".to_string()))
        );
    }
}

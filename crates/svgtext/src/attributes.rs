// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt::Write;
use std::str::FromStr;

use svgtypes::{Angle, AngleUnit, Length, LengthUnit};

use crate::Error;

/// An attribute ID.
///
/// Every attribute can be addressed either by its SVG name (`baseline-shift`, `dx`)
/// or by the camelCase name used by the native bridge (`baselineShift`, `deltaX`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[allow(missing_docs)]
pub enum AId {
    AlignmentBaseline,
    BaselineShift,
    Content,
    Dx,
    Dy,
    Fill,
    FontFamily,
    FontSize,
    FontStyle,
    FontWeight,
    Id,
    LengthAdjust,
    LetterSpacing,
    Rotate,
    TextAnchor,
    TextLength,
    Transform,
    WordSpacing,
    X,
    Y,
}

// (SVG name, bridge name)
static NAMES: &[(AId, &str, &str)] = &[
    (AId::AlignmentBaseline, "alignment-baseline", "alignmentBaseline"),
    (AId::BaselineShift, "baseline-shift", "baselineShift"),
    (AId::Content, "content", "content"),
    (AId::Dx, "dx", "deltaX"),
    (AId::Dy, "dy", "deltaY"),
    (AId::Fill, "fill", "fill"),
    (AId::FontFamily, "font-family", "fontFamily"),
    (AId::FontSize, "font-size", "fontSize"),
    (AId::FontStyle, "font-style", "fontStyle"),
    (AId::FontWeight, "font-weight", "fontWeight"),
    (AId::Id, "id", "name"),
    (AId::LengthAdjust, "lengthAdjust", "lengthAdjust"),
    (AId::LetterSpacing, "letter-spacing", "letterSpacing"),
    (AId::Rotate, "rotate", "rotate"),
    (AId::TextAnchor, "text-anchor", "textAnchor"),
    (AId::TextLength, "textLength", "textLength"),
    (AId::Transform, "transform", "transform"),
    (AId::WordSpacing, "word-spacing", "wordSpacing"),
    (AId::X, "x", "positionX"),
    (AId::Y, "y", "positionY"),
];

impl AId {
    /// Looks up an attribute by its SVG or bridge name.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .find(|(_, svg, bridge)| *svg == name || *bridge == name)
            .map(|(aid, _, _)| *aid)
    }

    /// Returns the SVG name of the attribute.
    pub fn to_str(self) -> &'static str {
        NAMES
            .iter()
            .find(|(aid, _, _)| *aid == self)
            .map(|(_, svg, _)| *svg)
            .unwrap_or("")
    }

    /// Checks that the attribute holds an ordered list of values.
    pub fn is_list(self) -> bool {
        matches!(self, AId::Dx | AId::Dy | AId::X | AId::Y | AId::Rotate)
    }
}

impl std::fmt::Display for AId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// A keyword-valued attribute type.
pub(crate) trait FromValue: Sized {
    fn parse(value: &str) -> Option<Self>;
}

pub(crate) fn parse_keyword<T: FromValue>(aid: AId, value: &str) -> Result<T, Error> {
    T::parse(value.trim()).ok_or_else(|| Error::InvalidKeyword {
        attribute: aid,
        value: value.to_string(),
    })
}

pub(crate) fn parse_length(aid: AId, value: &str) -> Result<Length, Error> {
    Length::from_str(value.trim()).map_err(|_| Error::InvalidLength {
        attribute: aid,
        value: value.to_string(),
    })
}

pub(crate) fn parse_non_negative_length(aid: AId, value: &str) -> Result<Length, Error> {
    let length = parse_length(aid, value)?;
    if length.number.is_sign_negative() && length.number != 0.0 {
        return Err(Error::NegativeValue {
            attribute: aid,
            value: value.to_string(),
        });
    }

    Ok(length)
}

/// Parses an SVG `<list-of-length>`, like `10 20% 3em` or `1,2`.
pub(crate) fn parse_length_list(aid: AId, value: &str) -> Result<Vec<Length>, Error> {
    svgtypes::LengthListParser::from(value)
        .map(|v| {
            v.map_err(|_| Error::InvalidLength {
                attribute: aid,
                value: value.to_string(),
            })
        })
        .collect()
}

pub(crate) fn parse_angle(aid: AId, value: &str) -> Result<Angle, Error> {
    Angle::from_str(value.trim()).map_err(|_| Error::InvalidAngle {
        attribute: aid,
        value: value.to_string(),
    })
}

/// Parses a whitespace and/or comma separated list of angles.
pub(crate) fn parse_angle_list(aid: AId, value: &str) -> Result<Vec<Angle>, Error> {
    value
        .split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| parse_angle(aid, s))
        .collect()
}

pub(crate) fn write_length(out: &mut String, length: Length) {
    let unit = match length.unit {
        LengthUnit::None => "",
        LengthUnit::Em => "em",
        LengthUnit::Ex => "ex",
        LengthUnit::Px => "px",
        LengthUnit::In => "in",
        LengthUnit::Cm => "cm",
        LengthUnit::Mm => "mm",
        LengthUnit::Pt => "pt",
        LengthUnit::Pc => "pc",
        LengthUnit::Percent => "%",
    };

    let _ = write!(out, "{}{}", length.number, unit);
}

pub(crate) fn length_to_string(length: Length) -> String {
    let mut s = String::new();
    write_length(&mut s, length);
    s
}

pub(crate) fn write_angle(out: &mut String, angle: Angle) {
    let unit = match angle.unit {
        AngleUnit::Degrees => "",
        AngleUnit::Gradians => "grad",
        AngleUnit::Radians => "rad",
        AngleUnit::Turns => "turn",
    };

    let _ = write!(out, "{}{}", angle.number, unit);
}

pub(crate) fn length_list_to_string(list: &[Length]) -> String {
    let mut s = String::new();
    for (i, length) in list.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        write_length(&mut s, *length);
    }
    s
}

pub(crate) fn angle_list_to_string(list: &[Angle]) -> String {
    let mut s = String::new();
    for (i, angle) in list.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        write_angle(&mut s, *angle);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_spellings_resolve_to_the_same_id() {
        assert_eq!(AId::from_name("deltaX"), Some(AId::Dx));
        assert_eq!(AId::from_name("dx"), Some(AId::Dx));
        assert_eq!(AId::from_name("baselineShift"), Some(AId::BaselineShift));
        assert_eq!(AId::from_name("baseline-shift"), Some(AId::BaselineShift));
        assert_eq!(AId::from_name("positionY"), Some(AId::Y));
        assert_eq!(AId::from_name("stroke"), None);

        assert_eq!(AId::AlignmentBaseline.to_str(), "alignment-baseline");
        assert_eq!(AId::TextLength.to_str(), "textLength");
    }

    #[test]
    fn every_id_has_a_name() {
        for (aid, _, _) in NAMES {
            assert_eq!(AId::from_name(aid.to_str()), Some(*aid));
        }
    }

    #[test]
    fn length_lists() {
        let list = parse_length_list(AId::X, "10 20%, 3em").unwrap();
        assert_eq!(
            list,
            vec![
                Length::new(10.0, LengthUnit::None),
                Length::new(20.0, LengthUnit::Percent),
                Length::new(3.0, LengthUnit::Em),
            ]
        );
        assert_eq!(length_list_to_string(&list), "10 20% 3em");

        assert!(parse_length_list(AId::X, "").unwrap().is_empty());
        assert_eq!(
            parse_length_list(AId::X, "10 foo"),
            Err(Error::InvalidLength {
                attribute: AId::X,
                value: "10 foo".to_string(),
            })
        );
    }

    #[test]
    fn angle_lists() {
        let list = parse_angle_list(AId::Rotate, "0, 45 1.5rad").unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[1].to_degrees(), 45.0);
        assert_eq!(list[2].unit, AngleUnit::Radians);
        assert_eq!(angle_list_to_string(&list), "0 45 1.5rad");

        assert!(parse_angle_list(AId::Rotate, "a").is_err());
    }

    #[test]
    fn negative_lengths() {
        assert!(parse_non_negative_length(AId::TextLength, "0").is_ok());
        assert!(parse_non_negative_length(AId::TextLength, "-0").is_ok());
        assert_eq!(
            parse_non_negative_length(AId::TextLength, "-1"),
            Err(Error::NegativeValue {
                attribute: AId::TextLength,
                value: "-1".to_string(),
            })
        );
    }
}

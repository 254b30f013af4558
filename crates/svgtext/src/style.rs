// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::hash::Hasher;

use svgtypes::Length;

use crate::attributes::{write_length, FromValue};
use crate::cache::{hash_length, GeometryHash};

macro_rules! keywords {
    ($name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        impl FromValue for $name {
            fn parse(value: &str) -> Option<Self> {
                match value {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl $name {
            /// Returns the SVG keyword.
            pub fn to_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.to_str())
            }
        }
    };
}

/// A `lengthAdjust` value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum LengthAdjust {
    /// Only the space between glyphs is adjusted.
    #[default]
    Spacing,
    /// Both the space between glyphs and the glyphs themselves are stretched.
    SpacingAndGlyphs,
}

keywords!(LengthAdjust {
    Spacing => "spacing",
    SpacingAndGlyphs => "spacingAndGlyphs",
});

/// An `alignment-baseline` value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[allow(missing_docs)]
pub enum AlignmentBaseline {
    #[default]
    Baseline,
    Auto,
    TextBottom,
    Alphabetic,
    Ideographic,
    Middle,
    Central,
    Mathematical,
    TextTop,
    Bottom,
    Center,
    Top,
    TextBeforeEdge,
    TextAfterEdge,
    BeforeEdge,
    AfterEdge,
    Hanging,
}

keywords!(AlignmentBaseline {
    Baseline => "baseline",
    Auto => "auto",
    TextBottom => "text-bottom",
    Alphabetic => "alphabetic",
    Ideographic => "ideographic",
    Middle => "middle",
    Central => "central",
    Mathematical => "mathematical",
    TextTop => "text-top",
    Bottom => "bottom",
    Center => "center",
    Top => "top",
    TextBeforeEdge => "text-before-edge",
    TextAfterEdge => "text-after-edge",
    BeforeEdge => "before-edge",
    AfterEdge => "after-edge",
    Hanging => "hanging",
});

/// A `text-anchor` value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[allow(missing_docs)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

keywords!(TextAnchor {
    Start => "start",
    Middle => "middle",
    End => "end",
});

/// A `font-style` value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[allow(missing_docs)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

keywords!(FontStyle {
    Normal => "normal",
    Italic => "italic",
    Oblique => "oblique",
});

impl From<FontStyle> for fontdb::Style {
    fn from(style: FontStyle) -> Self {
        match style {
            FontStyle::Normal => fontdb::Style::Normal,
            FontStyle::Italic => fontdb::Style::Italic,
            FontStyle::Oblique => fontdb::Style::Oblique,
        }
    }
}

/// A `font-weight` value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum FontWeight {
    /// Same as `400`.
    #[default]
    Normal,
    /// Same as `700`.
    Bold,
    /// One step bolder than the inherited weight.
    Bolder,
    /// One step lighter than the inherited weight.
    Lighter,
    /// A numeric weight in the `1..=1000` range.
    Number(u16),
}

impl FontWeight {
    /// Resolves the weight against the inherited one.
    ///
    /// Relative weights follow the CSS Fonts table.
    pub fn resolve(self, parent: u16) -> u16 {
        match self {
            FontWeight::Normal => 400,
            FontWeight::Bold => 700,
            FontWeight::Number(n) => n,
            FontWeight::Bolder => {
                if parent < 350 {
                    400
                } else if parent < 550 {
                    700
                } else {
                    900
                }
            }
            FontWeight::Lighter => {
                if parent < 550 {
                    100
                } else if parent < 750 {
                    400
                } else {
                    700
                }
            }
        }
    }
}

impl FromValue for FontWeight {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "normal" => Some(FontWeight::Normal),
            "bold" => Some(FontWeight::Bold),
            "bolder" => Some(FontWeight::Bolder),
            "lighter" => Some(FontWeight::Lighter),
            _ => {
                let n: u16 = value.parse().ok()?;
                if (1..=1000).contains(&n) {
                    Some(FontWeight::Number(n))
                } else {
                    None
                }
            }
        }
    }
}

impl std::fmt::Display for FontWeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            FontWeight::Normal => f.write_str("normal"),
            FontWeight::Bold => f.write_str("bold"),
            FontWeight::Bolder => f.write_str("bolder"),
            FontWeight::Lighter => f.write_str("lighter"),
            FontWeight::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A `baseline-shift` value.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum BaselineShift {
    /// No shift.
    #[default]
    Baseline,
    /// Lowered to the subscript position of the font.
    Subscript,
    /// Raised to the superscript position of the font.
    Superscript,
    /// Raised by a length. Percentages refer to the font size.
    Length(Length),
}

impl FromValue for BaselineShift {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "baseline" => Some(BaselineShift::Baseline),
            "sub" => Some(BaselineShift::Subscript),
            "super" => Some(BaselineShift::Superscript),
            _ => value.parse().ok().map(BaselineShift::Length),
        }
    }
}

impl GeometryHash for BaselineShift {
    fn hash_geometry<H: Hasher>(&self, state: &mut H) {
        match *self {
            BaselineShift::Baseline => state.write_u8(0),
            BaselineShift::Subscript => state.write_u8(1),
            BaselineShift::Superscript => state.write_u8(2),
            BaselineShift::Length(length) => {
                state.write_u8(3);
                hash_length(state, length);
            }
        }
    }
}

impl std::fmt::Display for BaselineShift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            BaselineShift::Baseline => f.write_str("baseline"),
            BaselineShift::Subscript => f.write_str("sub"),
            BaselineShift::Superscript => f.write_str("super"),
            BaselineShift::Length(length) => {
                let mut s = String::new();
                write_length(&mut s, length);
                f.write_str(&s)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgtypes::LengthUnit;

    #[test]
    fn keywords_round_trip() {
        for s in ["spacing", "spacingAndGlyphs"] {
            assert_eq!(LengthAdjust::parse(s).unwrap().to_str(), s);
        }

        for s in [
            "baseline",
            "auto",
            "text-bottom",
            "alphabetic",
            "ideographic",
            "middle",
            "central",
            "mathematical",
            "text-top",
            "bottom",
            "center",
            "top",
            "text-before-edge",
            "text-after-edge",
            "before-edge",
            "after-edge",
            "hanging",
        ] {
            assert_eq!(AlignmentBaseline::parse(s).unwrap().to_str(), s);
        }

        assert_eq!(LengthAdjust::parse("Spacing"), None);
        assert_eq!(AlignmentBaseline::parse("nope"), None);
    }

    #[test]
    fn baseline_shift_values() {
        assert_eq!(BaselineShift::parse("sub"), Some(BaselineShift::Subscript));
        assert_eq!(BaselineShift::parse("super"), Some(BaselineShift::Superscript));
        assert_eq!(
            BaselineShift::parse("-30%"),
            Some(BaselineShift::Length(Length::new(-30.0, LengthUnit::Percent)))
        );
        assert_eq!(BaselineShift::parse("high"), None);

        assert_eq!(BaselineShift::Length(Length::new(2.5, LengthUnit::Px)).to_string(), "2.5px");
        assert_eq!(BaselineShift::default().to_string(), "baseline");
    }

    #[test]
    fn font_weights() {
        assert_eq!(FontWeight::parse("bold"), Some(FontWeight::Bold));
        assert_eq!(FontWeight::parse("350"), Some(FontWeight::Number(350)));
        assert_eq!(FontWeight::parse("0"), None);
        assert_eq!(FontWeight::parse("heavy"), None);

        assert_eq!(FontWeight::Bolder.resolve(300), 400);
        assert_eq!(FontWeight::Bolder.resolve(400), 700);
        assert_eq!(FontWeight::Bolder.resolve(700), 900);
        assert_eq!(FontWeight::Lighter.resolve(400), 100);
        assert_eq!(FontWeight::Lighter.resolve(600), 400);
        assert_eq!(FontWeight::Lighter.resolve(900), 700);
    }
}

// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use svgtypes::{Length, LengthUnit as Unit};
use tiny_skia_path::Size;

/// The direction a length is measured in.
///
/// Only affects percentages.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    /// Percentages are relative to the viewport width.
    Horizontal,
    /// Percentages are relative to the viewport height.
    Vertical,
    /// Percentages are relative to the normalized viewport diagonal.
    Other,
}

/// Everything required to convert a length into user units.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct UnitContext {
    /// The font size `em` and `ex` units are relative to.
    pub font_size: f32,
    /// The size percentages are relative to.
    pub viewport: Size,
    /// Target DPI for absolute units.
    pub dpi: f32,
}

impl UnitContext {
    /// Converts a length into user units.
    pub fn convert(&self, length: Length, axis: Axis) -> f32 {
        let n = length.number as f32;
        match length.unit {
            Unit::None | Unit::Px => n,
            Unit::Em => n * self.font_size,
            Unit::Ex => n * self.font_size / 2.0,
            Unit::In => n * self.dpi,
            Unit::Cm => n * self.dpi / 2.54,
            Unit::Mm => n * self.dpi / 25.4,
            Unit::Pt => n * self.dpi / 72.0,
            Unit::Pc => n * self.dpi / 6.0,
            Unit::Percent => {
                let w = self.viewport.width();
                let h = self.viewport.height();
                let base = match axis {
                    Axis::Horizontal => w,
                    Axis::Vertical => h,
                    Axis::Other => ((w * w + h * h) / 2.0).sqrt(),
                };

                base * n / 100.0
            }
        }
    }

    /// Converts a list of lengths into user units.
    pub fn convert_list(&self, list: &[Length], axis: Axis) -> Vec<f32> {
        list.iter().map(|l| self.convert(*l, axis)).collect()
    }

    /// Resolves a `font-size` value against the parent font size.
    ///
    /// Unlike other lengths, `em` and `%` refer to the inherited font size.
    pub fn convert_font_size(&self, length: Length, parent_font_size: f32) -> f32 {
        let n = length.number as f32;
        match length.unit {
            Unit::Em => n * parent_font_size,
            Unit::Ex => n * parent_font_size / 2.0,
            Unit::Percent => n * parent_font_size / 100.0,
            _ => self.convert(length, Axis::Other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units() -> UnitContext {
        UnitContext {
            font_size: 10.0,
            viewport: Size::from_wh(200.0, 100.0).unwrap(),
            dpi: 96.0,
        }
    }

    #[test]
    fn absolute_units() {
        let u = units();
        assert_eq!(u.convert(Length::new(5.0, Unit::None), Axis::Other), 5.0);
        assert_eq!(u.convert(Length::new(5.0, Unit::Px), Axis::Other), 5.0);
        assert_eq!(u.convert(Length::new(1.0, Unit::In), Axis::Other), 96.0);
        assert_eq!(u.convert(Length::new(72.0, Unit::Pt), Axis::Other), 96.0);
        assert_eq!(u.convert(Length::new(6.0, Unit::Pc), Axis::Other), 96.0);
        assert!((u.convert(Length::new(2.54, Unit::Cm), Axis::Other) - 96.0).abs() < 1e-3);
        assert!((u.convert(Length::new(25.4, Unit::Mm), Axis::Other) - 96.0).abs() < 1e-3);
    }

    #[test]
    fn font_relative_units() {
        let u = units();
        assert_eq!(u.convert(Length::new(2.0, Unit::Em), Axis::Other), 20.0);
        assert_eq!(u.convert(Length::new(2.0, Unit::Ex), Axis::Other), 10.0);
    }

    #[test]
    fn percentages_follow_the_axis() {
        let u = units();
        let half = Length::new(50.0, Unit::Percent);
        assert_eq!(u.convert(half, Axis::Horizontal), 100.0);
        assert_eq!(u.convert(half, Axis::Vertical), 50.0);

        let diagonal = ((200.0f32 * 200.0 + 100.0 * 100.0) / 2.0).sqrt();
        assert_eq!(u.convert(Length::new(100.0, Unit::Percent), Axis::Other), diagonal);
    }

    #[test]
    fn font_size_is_relative_to_the_parent() {
        let u = units();
        assert_eq!(u.convert_font_size(Length::new(1.5, Unit::Em), 16.0), 24.0);
        assert_eq!(u.convert_font_size(Length::new(50.0, Unit::Percent), 16.0), 8.0);
        assert_eq!(u.convert_font_size(Length::new(12.0, Unit::None), 16.0), 12.0);
    }
}

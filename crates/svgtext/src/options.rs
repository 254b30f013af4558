// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use svgtypes::FontFamily;
use tiny_skia_path::Size;

/// Layout options.
#[derive(Clone, Debug)]
pub struct Options {
    /// Default font family.
    ///
    /// Will be used when no `font-family` attribute is set or none of the
    /// requested families is available.
    ///
    /// Default: sans-serif
    pub font_family: Vec<FontFamily>,

    /// Default font size to use when no `font-size` attribute is set.
    ///
    /// Default: 12
    pub font_size: f32,

    /// Target DPI.
    ///
    /// Impacts units conversion.
    ///
    /// Default: 96.0
    pub dpi: f32,

    /// The size percentage lengths are resolved against.
    ///
    /// Default: 100x100
    pub viewport: Size,

    /// Font database.
    ///
    /// The database is shared read-only between contexts.
    pub fontdb: Arc<fontdb::Database>,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            font_family: vec![FontFamily::SansSerif],
            font_size: 12.0,
            dpi: 96.0,
            viewport: Size::from_wh(100.0, 100.0).unwrap(),
            fontdb: Arc::new(fontdb::Database::new()),
        }
    }
}

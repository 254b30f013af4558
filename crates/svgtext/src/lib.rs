// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/*!
`svgtext` models SVG `<text>` elements as nodes of a small render tree
and turns them into vector paths.

A [`Text`] node carries the text layout attributes (`textLength`,
`baseline-shift`, `lengthAdjust`, `alignment-baseline` and the
per-character `x`, `y`, `dx`, `dy` and `rotate` lists). During a draw
pass [`Text::get_group_path`] resolves the font against a
[`fontdb::Database`], lays the characters out and returns the outlines
as a single [`tiny_skia_path::Path`]. The result is memoized until an
attribute that affects the geometry changes or the cache is released
with [`Text::release_cached_path`].

## Example

```no_run
use std::sync::Arc;

let mut fontdb = svgtext::fontdb::Database::new();
fontdb.load_system_fonts();

let opt = svgtext::Options {
    fontdb: Arc::new(fontdb),
    ..svgtext::Options::default()
};
let mut ctx = svgtext::Context::new(opt);

let mut text = svgtext::Text::new();
text.set_attribute("content", "Hello").unwrap();
text.set_attribute("fontSize", "24").unwrap();
text.set_list_attribute("rotate", &["0", "10", "20"]).unwrap();

let path = text.get_group_path(&mut ctx).unwrap();
```
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::uninlined_format_args)]

pub use fontdb;
pub use svgtypes;
pub use tiny_skia_path;

mod attributes;
mod cache;
mod error;
mod font;
mod options;
mod style;
mod text;
mod tree;
mod units;

pub use attributes::AId;
pub use error::Error;
pub use font::{FontMetrics, FontProps, FontSpec, ResolvedFont};
pub use options::Options;
pub use style::{
    AlignmentBaseline, BaselineShift, FontStyle, FontWeight, LengthAdjust, TextAnchor,
};
pub use text::Context;
pub use tree::{Group, Node, Text, TextAttributes};
pub use units::{Axis, UnitContext};

pub(crate) trait OptionLog {
    fn log_none<F: FnOnce()>(self, f: F) -> Self;
}

impl<T> OptionLog for Option<T> {
    #[inline]
    fn log_none<F: FnOnce()>(self, f: F) -> Self {
        self.or_else(|| {
            f();
            None
        })
    }
}

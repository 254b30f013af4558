// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use svgtext::svgtypes::Color;
use svgtext::{Context, Group, Node, Text};

use crate::OptionLog;

pub const DEFAULT_FILL: Color = Color {
    red: 0,
    green: 0,
    blue: 0,
    alpha: 255,
};

pub fn render_node(
    node: &mut Node,
    ctx: &mut Context,
    fill: Color,
    transform: tiny_skia::Transform,
    pixmap: &mut tiny_skia::PixmapMut,
) {
    let fill = node.group().fill().unwrap_or(fill);

    match node {
        Node::Group(ref mut group) => {
            render_group(group, ctx, fill, transform, pixmap);
        }
        Node::Text(ref mut text) => {
            render_text(text, ctx, fill, transform, pixmap);
        }
    }
}

fn render_group(
    group: &mut Group,
    ctx: &mut Context,
    fill: Color,
    transform: tiny_skia::Transform,
    pixmap: &mut tiny_skia::PixmapMut,
) {
    let transform = transform.pre_concat(group.transform());

    ctx.push_font(group.font());
    for child in group.children_mut() {
        render_node(child, ctx, fill, transform, pixmap);
    }
    ctx.pop();
}

// Nested texts are part of the root text path and share its fill.
fn render_text(
    text: &mut Text,
    ctx: &mut Context,
    fill: Color,
    transform: tiny_skia::Transform,
    pixmap: &mut tiny_skia::PixmapMut,
) -> Option<()> {
    let path = match text.get_group_path(ctx) {
        Ok(path) => path?,
        Err(e) => {
            log::warn!("Failed to draw text '{}': {}.", text.id(), e);
            return None;
        }
    };

    crate::path::fill_path(&path, fill, transform, pixmap)
        .log_none(|| log::debug!("Text '{}' has nothing to fill.", text.id()))
}

// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::hash::Hasher;

use tiny_skia_path::Path;

use crate::cache::GeometryHash;
use crate::{Context, Error};

mod group;
mod text;

pub use group::Group;
pub use text::{Text, TextAttributes};

/// Node's kind.
#[allow(missing_docs)]
#[derive(Clone, Debug)]
pub enum Node {
    Group(Box<Group>),
    Text(Box<Text>),
}

impl Node {
    /// Returns node's ID.
    pub fn id(&self) -> &str {
        self.group().id()
    }

    /// Returns the group part of the node.
    pub fn group(&self) -> &Group {
        match self {
            Node::Group(ref group) => group,
            Node::Text(ref text) => text.group(),
        }
    }

    /// Returns the group part of the node.
    pub fn group_mut(&mut self) -> &mut Group {
        match self {
            Node::Group(ref mut group) => group,
            Node::Text(ref mut text) => text.group_mut(),
        }
    }

    /// Returns the node as a text, if it is one.
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(ref text) => Some(text.as_ref()),
            Node::Group(_) => None,
        }
    }

    /// Returns the node as a text, if it is one.
    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Node::Text(ref mut text) => Some(text.as_mut()),
            Node::Group(_) => None,
        }
    }

    /// Sets an attribute by its SVG or bridge name.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), Error> {
        match self {
            Node::Group(ref mut group) => group.set_attribute(name, value),
            Node::Text(ref mut text) => text.set_attribute(name, value),
        }
    }

    /// Returns an attribute value formatted as SVG.
    pub fn get_attribute(&self, name: &str) -> Result<Option<String>, Error> {
        match self {
            Node::Group(ref group) => group.get_attribute(name),
            Node::Text(ref text) => text.get_attribute(name),
        }
    }

    /// Returns the node geometry in the parent's coordinates.
    pub fn path(&mut self, ctx: &mut Context) -> Result<Option<Path>, Error> {
        match self {
            Node::Group(ref mut group) => group.path(ctx),
            Node::Text(ref mut text) => Ok(text.get_group_path(ctx)?.map(|path| (*path).clone())),
        }
    }

    /// Discards memoized geometry of the node and all its descendants.
    pub fn release_cached_path(&mut self) {
        match self {
            Node::Group(ref mut group) => group.release_cached_path(),
            Node::Text(ref mut text) => text.release_cached_path(),
        }
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(Box::new(group))
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(Box::new(text))
    }
}

impl GeometryHash for Node {
    fn hash_geometry<H: Hasher>(&self, state: &mut H) {
        match self {
            Node::Group(ref group) => {
                state.write_u8(0);
                group.hash_geometry(state);
            }
            Node::Text(ref text) => {
                state.write_u8(1);
                text.hash_geometry(state);
            }
        }
    }
}

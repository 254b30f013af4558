// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::hash::Hasher;
use std::sync::Arc;

use siphasher::sip::SipHasher13;
use svgtypes::{Angle, Length};
use tiny_skia_path::{Path, Transform};

/// Types that contribute to the geometry of a text path.
///
/// Only state that changes the outline is hashed. Paint is not.
pub(crate) trait GeometryHash {
    fn hash_geometry<H: Hasher>(&self, state: &mut H);
}

pub(crate) fn hash_f32<H: Hasher>(state: &mut H, n: f32) {
    state.write_u32(n.to_bits());
}

pub(crate) fn hash_length<H: Hasher>(state: &mut H, length: Length) {
    state.write_u64(length.number.to_bits());
    state.write_u8(length.unit as u8);
}

pub(crate) fn hash_angle<H: Hasher>(state: &mut H, angle: Angle) {
    state.write_u64(angle.number.to_bits());
    state.write_u8(angle.unit as u8);
}

pub(crate) fn hash_transform<H: Hasher>(state: &mut H, ts: Transform) {
    for n in [ts.sx, ts.ky, ts.kx, ts.sy, ts.tx, ts.ty] {
        hash_f32(state, n);
    }
}

pub(crate) fn hash_option<H: Hasher, T, F>(state: &mut H, value: Option<T>, f: F)
where
    F: FnOnce(&mut H, T),
{
    match value {
        Some(v) => {
            state.write_u8(1);
            f(state, v);
        }
        None => state.write_u8(0),
    }
}

pub(crate) fn hash_list<H: Hasher, T: Copy, F>(state: &mut H, list: &[T], f: F)
where
    F: Fn(&mut H, T),
{
    state.write_usize(list.len());
    for v in list {
        f(state, *v);
    }
}

pub(crate) fn new_hasher() -> SipHasher13 {
    SipHasher13::new()
}

/// Where layout ended after a text run.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct RunEnd {
    /// Number of addressable characters the run consumed.
    pub chars: usize,
    /// The glyph cursor after the run.
    pub cursor: (f32, f32),
    /// Distance from the first glyph origin to the final cursor position.
    pub advance: f32,
}

#[derive(Clone, Debug)]
struct Entry {
    key: u64,
    path: Option<Arc<Path>>,
    end: RunEnd,
}

/// A memoized text path.
///
/// The entry is valid only for the key it was stored with.
#[derive(Clone, Default, Debug)]
pub(crate) struct PathCache {
    entry: Option<Entry>,
}

impl PathCache {
    pub fn get(&self, key: u64) -> Option<(Option<Arc<Path>>, RunEnd)> {
        let entry = self.entry.as_ref()?;
        if entry.key == key {
            Some((entry.path.clone(), entry.end))
        } else {
            None
        }
    }

    pub fn store(&mut self, key: u64, path: Option<Arc<Path>>, end: RunEnd) {
        self.entry = Some(Entry { key, path, end });
    }

    pub fn run_end(&self) -> Option<RunEnd> {
        self.entry.as_ref().map(|e| e.end)
    }

    pub fn release(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

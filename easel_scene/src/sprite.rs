// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sprite sequences: named animations over ordered bitmap frames.
//!
//! ## Overview
//!
//! A [`SpriteSet`] maps animation names to frame lists and tracks a current
//! animation plus a frame index. [`SpriteSet::step`] advances the index,
//! wrapping in both directions. Randomizing the frame lives in the surface
//! layer, which owns the RNG and the asset-readiness gate.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::shape::BitmapId;

/// A mapping from animation name to an ordered list of bitmap frames, plus
/// the current animation and frame pointers.
#[derive(Clone, Debug, Default)]
pub struct SpriteSet {
    animations: BTreeMap<String, Vec<BitmapId>>,
    current: Option<String>,
    frame: usize,
}

impl SpriteSet {
    /// Create an empty sprite set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an animation. The first non-empty animation registered
    /// becomes current.
    pub fn insert_animation(&mut self, name: impl Into<String>, frames: Vec<BitmapId>) {
        let name = name.into();
        if self.current.is_none() && !frames.is_empty() {
            self.current = Some(name.clone());
            self.frame = 0;
        }
        self.animations.insert(name, frames);
    }

    /// Switch the current animation, resetting the frame index. Returns
    /// false (leaving the pointers untouched) when the name is unknown.
    pub fn set_animation(&mut self, name: &str) -> bool {
        if self.animations.contains_key(name) {
            self.current = Some(String::from(name));
            self.frame = 0;
            true
        } else {
            false
        }
    }

    /// Name of the current animation, if one is selected.
    pub fn current_animation(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Frame count of the current animation.
    pub fn frame_count(&self) -> Option<usize> {
        let name = self.current.as_deref()?;
        self.animations.get(name).map(Vec::len)
    }

    /// Current frame index into the current animation.
    pub fn frame_index(&self) -> usize {
        self.frame
    }

    /// Bitmap for the current frame, if the pointers are initialized.
    pub fn current_frame(&self) -> Option<BitmapId> {
        let name = self.current.as_deref()?;
        self.animations.get(name)?.get(self.frame).copied()
    }

    /// True once an animation with at least one frame is selected. The
    /// surface layer's readiness polling gates `step`/`random` on this.
    pub fn is_ready(&self) -> bool {
        self.frame_count().is_some_and(|n| n > 0)
    }

    /// Advance the frame index by `n`, wrapping modulo the current
    /// animation's frame count in both directions. Returns the new index,
    /// or `None` when the set is not ready.
    pub fn step(&mut self, n: i64) -> Option<usize> {
        let count = self.frame_count().filter(|&c| c > 0)? as i64;
        let idx = (self.frame as i64 + n).rem_euclid(count);
        self.frame = idx as usize;
        Some(self.frame)
    }

    /// Set the frame index directly, wrapping into range. Used by the
    /// surface layer's random-frame operation.
    pub fn set_frame_index(&mut self, idx: usize) -> Option<usize> {
        let count = self.frame_count().filter(|&c| c > 0)?;
        self.frame = idx % count;
        Some(self.frame)
    }
}

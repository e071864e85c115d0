// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-shape event callbacks, stored as a side table keyed by [`ShapeId`].
//!
//! Keeping the callbacks out of the scene itself means dispatch can borrow
//! the scene mutably (to hand the callback its target shape) while the
//! handler table is borrowed separately.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use easel_scene::{Shape, ShapeId};

/// A callback over the shape the event landed on.
pub type ShapeCallback = Box<dyn FnMut(&mut Shape)>;

/// A key-press callback: the shape plus the full set of currently held keys.
pub type KeyPressCallback = Box<dyn FnMut(&mut Shape, &BTreeSet<String>)>;

/// A key-release callback: the shape plus the single key that went up.
pub type KeyReleaseCallback = Box<dyn FnMut(&mut Shape, &str)>;

/// Selector for one callback slot, so dispatch can take and restore a slot
/// without naming it.
pub(crate) type SlotPick = fn(&mut HandlerSlots) -> &mut Option<ShapeCallback>;

/// The callback slots one shape can have.
#[derive(Default)]
pub(crate) struct HandlerSlots {
    pub(crate) pointer_over: Option<ShapeCallback>,
    pub(crate) pointer_out: Option<ShapeCallback>,
    pub(crate) left_click: Option<ShapeCallback>,
    pub(crate) wheel_click: Option<ShapeCallback>,
    pub(crate) right_click: Option<ShapeCallback>,
    pub(crate) touch: Option<ShapeCallback>,
    pub(crate) key_press: Option<KeyPressCallback>,
    pub(crate) key_release: Option<KeyReleaseCallback>,
}

/// The handler table for one surface.
#[derive(Default)]
pub struct Handlers {
    slots: HashMap<ShapeId, HandlerSlots>,
    /// Hover latch: shapes the pointer was over last tick.
    pub(crate) hovered: HashSet<ShapeId>,
}

impl Handlers {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn slots_mut(&mut self, id: ShapeId) -> &mut HandlerSlots {
        self.slots.entry(id).or_default()
    }

    /// Take one slot out of the table so it can be invoked while the table
    /// is free; callers must [`restore`](Self::restore_slot) it afterwards.
    pub(crate) fn take_slot(&mut self, id: ShapeId, pick: SlotPick) -> Option<ShapeCallback> {
        self.slots.get_mut(&id).and_then(|s| pick(s).take())
    }

    pub(crate) fn restore_slot(&mut self, id: ShapeId, pick: SlotPick, cb: ShapeCallback) {
        *pick(self.slots_mut(id)) = Some(cb);
    }

    pub(crate) fn take_key_press(&mut self, id: ShapeId) -> Option<KeyPressCallback> {
        self.slots.get_mut(&id).and_then(|s| s.key_press.take())
    }

    pub(crate) fn restore_key_press(&mut self, id: ShapeId, cb: KeyPressCallback) {
        self.slots_mut(id).key_press = Some(cb);
    }

    pub(crate) fn take_key_release(&mut self, id: ShapeId) -> Option<KeyReleaseCallback> {
        self.slots.get_mut(&id).and_then(|s| s.key_release.take())
    }

    pub(crate) fn restore_key_release(&mut self, id: ShapeId, cb: KeyReleaseCallback) {
        self.slots_mut(id).key_release = Some(cb);
    }

    /// Drop all callbacks registered for `id`.
    pub fn forget(&mut self, id: ShapeId) {
        self.slots.remove(&id);
        self.hovered.remove(&id);
    }

    /// Whether any shape has a key handler registered.
    pub(crate) fn any_key_handlers(&self) -> bool {
        self.slots
            .values()
            .any(|s| s.key_press.is_some() || s.key_release.is_some())
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("shapes", &self.slots.len())
            .field("hovered", &self.hovered)
            .finish_non_exhaustive()
    }
}

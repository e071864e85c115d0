// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene container: a generational arena of shapes with parent/child links
//! and a scene-owned interactive registry.
//!
//! ## Overview
//!
//! Shapes attach under a group (or at the root), in insertion order; that
//! order is both paint order and dispatch precedence. Every attached
//! non-group shape is appended to the scene's interactive registry, which
//! the surface layer iterates (as a snapshot) on every frame. Detaching a
//! shape removes its whole subtree from the arena and the registry, so
//! long-running scenes do not accumulate dead registry entries.
//!
//! ## Identity
//!
//! [`ShapeId`] is a generational handle (slot index plus generation). Stale
//! ids never alias a later shape that reuses the slot; every query on a
//! stale id answers `None`.

use alloc::vec::Vec;

use kurbo::Point;

use crate::shape::Shape;

/// Identifier for a shape in a scene (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ShapeId(u32, u32);

impl ShapeId {
    const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<ShapeId>,
    children: Vec<ShapeId>,
    shape: Shape,
}

/// Container of shapes for one surface.
///
/// Owns the arena, the root child list, and the interactive registry. The
/// registry is scene-owned: two scenes never share dispatch state.
#[derive(Default)]
pub struct Scene {
    nodes: Vec<Option<Node>>, // generational slots
    free_list: Vec<usize>,
    roots: Vec<ShapeId>,
    interactive: Vec<ShapeId>,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("roots", &self.roots.len())
            .field("interactive", &self.interactive.len())
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a shape under `parent` (or at the root when `None`),
    /// registering it for dispatch if it is interactive.
    ///
    /// A stale `parent` falls back to the root rather than failing: the
    /// shape always ends up owned by exactly this scene.
    pub fn attach(&mut self, parent: Option<ShapeId>, shape: Shape) -> ShapeId {
        let interactive = shape.is_interactive();
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.nodes[idx].as_ref().map(|n| n.generation).unwrap_or(0) + 1;
            self.nodes[idx] = Some(Node {
                generation,
                parent: None,
                children: Vec::new(),
                shape,
            });
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ShapeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node {
                generation,
                parent: None,
                children: Vec::new(),
                shape,
            }));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ShapeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = ShapeId::new(idx, generation);
        match parent.filter(|&p| self.is_alive(p)) {
            Some(p) => {
                self.node_mut(p).children.push(id);
                self.node_mut(id).parent = Some(p);
            }
            None => self.roots.push(id),
        }
        if interactive {
            self.interactive.push(id);
        }
        id
    }

    /// Detach a shape and its subtree from the scene, pruning the registry.
    /// Stale ids are ignored.
    pub fn detach(&mut self, id: ShapeId) {
        if !self.is_alive(id) {
            return;
        }
        match self.node(id).parent {
            Some(parent) => self.node_mut(parent).children.retain(|c| *c != id),
            None => self.roots.retain(|c| *c != id),
        }
        self.free_subtree(id);
    }

    fn free_subtree(&mut self, id: ShapeId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.free_subtree(child);
        }
        self.interactive.retain(|c| *c != id);
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Whether `id` refers to a live shape in this scene.
    pub fn is_alive(&self, id: ShapeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Borrow a shape. `None` for stale ids.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.node_opt(id).map(|n| &n.shape)
    }

    /// Mutably borrow a shape. `None` for stale ids.
    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.node_opt_mut(id).map(|n| &mut n.shape)
    }

    /// Builder-style mutation helper; returns `id` for chaining.
    pub fn config(&mut self, id: ShapeId, f: impl FnOnce(&mut Shape)) -> ShapeId {
        if let Some(shape) = self.shape_mut(id) {
            f(shape);
        }
        id
    }

    /// Direct children of the root, in attach order.
    pub fn roots(&self) -> &[ShapeId] {
        &self.roots
    }

    /// Direct children of a group, in attach order. Empty for stale ids.
    pub fn children(&self, id: ShapeId) -> &[ShapeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Immediate parent group, or `None` when the parent is the surface
    /// itself (or the id is stale).
    pub fn parent(&self, id: ShapeId) -> Option<ShapeId> {
        self.node_opt(id)?.parent
    }

    /// Registration-order snapshot of the interactive registry.
    ///
    /// Dispatch iterates this copy, so shapes attached from inside a
    /// callback take effect on the next pass, never mid-iteration.
    pub fn registry(&self) -> Vec<ShapeId> {
        self.interactive.clone()
    }

    /// Absolute position: the shape's origin plus every group offset on the
    /// chain up to the root. `None` for stale ids.
    pub fn absolute_origin(&self, id: ShapeId) -> Option<Point> {
        let mut node = self.node_opt(id)?;
        let mut acc = node.shape.origin.to_vec2();
        while let Some(parent) = node.parent {
            node = self.node_opt(parent)?;
            acc += node.shape.origin.to_vec2();
        }
        Some(acc.to_point())
    }

    /// Increment every shape's staleness counter, saturating at its cap.
    /// Called from the surface's `clear` pass.
    pub fn age_all(&mut self) {
        for node in self.nodes.iter_mut().flatten() {
            node.shape.age();
        }
    }

    /// Reset a shape's staleness counter; called when it is drawn.
    pub fn mark_rendered(&mut self, id: ShapeId) {
        if let Some(node) = self.node_opt_mut(id) {
            node.shape.mark_rendered();
        }
    }

    // --- internals ---

    fn node(&self, id: ShapeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling ShapeId")
    }

    fn node_mut(&mut self, id: ShapeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling ShapeId")
    }

    fn node_opt(&self, id: ShapeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node_opt_mut(&mut self, id: ShapeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }
}

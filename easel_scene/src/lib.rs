// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Scene: a Kurbo-native 2D scene tree with pointer hit-testing.
//!
//! ## Overview
//!
//! This crate holds the data model of an Easel scene: a tree of shapes
//! (rectangles, arcs, text boxes, images, sprite sequences, and nested
//! groups) stored in a generational arena, plus the geometry predicates
//! that decide which shape is under the pointer and which shapes overlap.
//!
//! It does not draw and it does not read input devices. The surface layer
//! (`easel_surface`) feeds normalized pointer samples into the predicates
//! here and walks the tree to issue draw calls.
//!
//! ## Coordinates
//!
//! A shape's origin is relative to its enclosing [group](ShapeKind::Group).
//! [`Scene::absolute_origin`] resolves the chain of group offsets up to the
//! root; pointer samples are already surface-relative, so hit-testing always
//! compares absolute geometry.
//!
//! ## Sentinels
//!
//! Queries on a stale [`ShapeId`] answer `None` ("not applicable") rather
//! than `false`. [`hit::overlap`] in particular answers `None` when the two
//! shapes are not comparable; callers must not read that as "no collision".
//!
//! # Example
//!
//! ```rust
//! use easel_scene::{Scene, Shape, hit};
//! use easel_scene::hit::AxisPoint;
//!
//! let mut scene = Scene::new();
//!
//! // Surface → group (25, 25) → group (25, 25) → rect at local (0, 0).
//! let outer = scene.attach(None, Shape::group(25.0, 25.0));
//! let inner = scene.attach(Some(outer), Shape::group(25.0, 25.0));
//! let rect = scene.attach(Some(inner), Shape::rect(0.0, 0.0, 25.0, 25.0));
//!
//! let origin = scene.absolute_origin(rect).unwrap();
//! assert_eq!((origin.x, origin.y), (50.0, 50.0));
//!
//! let pointer = AxisPoint::at(60.0, 60.0);
//! assert_eq!(hit::is_under(&scene, rect, pointer, &hit::NoText), Some(true));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod hit;
pub mod scene;
pub mod shape;
pub mod sprite;

pub use scene::{Scene, ShapeId};
pub use shape::{
    Baseline, BitmapId, Direction, DrawMode, HoverEffect, ImageSource, Shape, ShapeKind, StartFrom,
    TextAlign,
};
pub use sprite::SpriteSet;

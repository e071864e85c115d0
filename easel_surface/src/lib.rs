// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Surface: the driver layer over an [`easel_scene`] tree.
//!
//! ## Overview
//!
//! A [`Surface`] owns one scene, the normalized pointer/keyboard state, the
//! per-shape callback table, and the frame-loop control flag. The host feeds
//! raw device events into [`Surface::handle_event`] and drives
//! [`Surface::frame`] from its display-refresh callback; the surface routes
//! clicks, hovers, touches, and key transitions to the registered shape
//! callbacks and walks the tree issuing draw calls.
//!
//! ## The draw boundary
//!
//! Drawing goes through the [`DrawTarget`] trait, an abstract 2D
//! immediate-mode context (clear, path primitives, measured text, bitmap
//! blits). Bitmaps stay host-owned behind [`BitmapStore`]; the surface only
//! forwards the enumerated accessors it needs (natural size, source URL).
//! [`RecordingTarget`] is a ready-made target that records calls instead of
//! painting, for tests and headless drivers.
//!
//! ## Frame protocol
//!
//! Everything is single-threaded and cooperative. Per display refresh the
//! host calls [`Surface::frame`], which runs the dispatch tick (hover,
//! keys), then clears (aging every shape's staleness counter), then renders
//! (resetting the counter for every shape actually drawn). Dispatch skips
//! shapes whose counter shows they were not rendered in the current or
//! previous frame. [`LoopHandle`] is the explicit stop switch: once stopped,
//! `frame` is a no-op and the host can cease re-scheduling.
//!
//! # Example
//!
//! ```rust
//! use easel_scene::Shape;
//! use easel_surface::{InputEvent, PointerButton, RecordingTarget, Surface};
//!
//! let mut surface = Surface::new(200.0, 200.0);
//! let mut ctx = RecordingTarget::new();
//!
//! let button = surface.attach(None, Shape::rect(10.0, 10.0, 50.0, 20.0));
//! surface.on_left_click(button, |shape| {
//!     shape.color = 0xFF0000;
//! });
//!
//! // One frame so the shape counts as rendered, then a click on it.
//! surface.frame(&mut ctx, &easel_surface::NoBitmaps);
//! surface.handle_event(
//!     InputEvent::PointerDown { x: 20.0, y: 15.0, button: PointerButton::Left, timestamp: 0.0 },
//!     &ctx,
//! );
//! surface.handle_event(
//!     InputEvent::PointerUp { x: 22.0, y: 15.0, button: PointerButton::Left, timestamp: 16.0 },
//!     &ctx,
//! );
//! assert_eq!(surface.scene().shape(button).unwrap().color, 0xFF0000);
//! ```

pub mod handlers;
pub mod input;
pub mod loop_control;
pub mod ready;
pub mod surface;
pub mod target;

pub use handlers::Handlers;
pub use input::{InputEvent, KeyState, PointerButton, PointerButtons, PointerDevice, PointerState};
pub use loop_control::LoopHandle;
pub use ready::{Readiness, ReadyError};
pub use surface::Surface;
pub use target::{BitmapStore, DrawCall, DrawTarget, ImageRef, NoBitmaps, RecordingTarget};

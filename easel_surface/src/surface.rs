// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The surface: event routing, per-frame dispatch, and render traversal
//! over one scene.
//!
//! ## Overview
//!
//! [`Surface`] folds normalized [`InputEvent`]s into pointer/keyboard state,
//! runs a per-frame dispatch tick (hover enter/exit, key press/release), and
//! walks the scene tree issuing [`DrawTarget`] calls with viewport culling
//! and hover tinting. Clicks dispatch eagerly from the release event itself;
//! everything else is tick-driven.
//!
//! ## Coordinate spaces
//!
//! Event coordinates arrive in on-screen (CSS) pixels. The surface rescales
//! them by `buffer_size / css_size` before storing them, so hit-testing and
//! rendering share one space. When no CSS size is set the two spaces
//! coincide.

use std::collections::HashMap;

use easel_color::Rgba;
use easel_scene::hit::{self, AxisPoint, TextMeasurer};
use easel_scene::{HoverEffect, ImageSource, Scene, Shape, ShapeId, ShapeKind};
use kurbo::{Rect, Size};
use rand::Rng;
use tracing::{trace, warn};

use crate::handlers::{Handlers, SlotPick};
use crate::input::{InputEvent, KeyState, PointerButton, PointerDevice, PointerState};
use crate::loop_control::LoopHandle;
use crate::ready::{DEFAULT_POLL_BUDGET, Readiness, ReadyError};
use crate::target::{BitmapStore, DrawTarget, ImageRef};

/// A scene plus everything needed to drive it: input state, callbacks,
/// readiness gates, and the frame-loop switch.
pub struct Surface {
    scene: Scene,
    width: f64,
    height: f64,
    /// On-screen size when it differs from the buffer size.
    css_size: Option<Size>,
    pointer: PointerState,
    keys: KeyState,
    handlers: Handlers,
    loop_handle: LoopHandle,
    /// Let the host show its context menu instead of swallowing the event.
    force_context_default: bool,
    gates: HashMap<ShapeId, Readiness>,
    poll_budget: u32,
}

impl core::fmt::Debug for Surface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Surface")
            .field("scene", &self.scene)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("css_size", &self.css_size)
            .field("running", &self.loop_handle.is_running())
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// A surface with a `width × height` drawing buffer and an empty scene.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scene: Scene::new(),
            width,
            height,
            css_size: None,
            pointer: PointerState::default(),
            keys: KeyState::default(),
            handlers: Handlers::new(),
            loop_handle: LoopHandle::new(),
            force_context_default: false,
            gates: HashMap::new(),
            poll_budget: DEFAULT_POLL_BUDGET,
        }
    }

    /// Buffer width in drawing pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Buffer height in drawing pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Resize the drawing buffer. Unless `preserve_css` is set, the
    /// on-screen size follows the buffer size again.
    pub fn set_size(&mut self, width: f64, height: f64, preserve_css: bool) {
        self.width = width;
        self.height = height;
        if !preserve_css {
            self.css_size = None;
        }
    }

    /// Declare the on-screen size; event coordinates rescale from it into
    /// the buffer space.
    pub fn set_css_size(&mut self, width: f64, height: f64) {
        self.css_size = Some(Size::new(width, height));
    }

    /// The scene this surface owns.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the scene.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Attach a shape; see [`Scene::attach`].
    pub fn attach(&mut self, parent: Option<ShapeId>, shape: Shape) -> ShapeId {
        self.scene.attach(parent, shape)
    }

    /// Detach a shape and its subtree, dropping any callbacks registered
    /// for the detached shapes.
    pub fn detach(&mut self, id: ShapeId) {
        for dead in self.collect_subtree(id) {
            self.handlers.forget(dead);
            self.gates.remove(&dead);
        }
        self.scene.detach(id);
    }

    fn collect_subtree(&self, id: ShapeId) -> Vec<ShapeId> {
        if !self.scene.is_alive(id) {
            return Vec::new();
        }
        let mut out = vec![id];
        let mut i = 0;
        while i < out.len() {
            out.extend_from_slice(self.scene.children(out[i]));
            i += 1;
        }
        out
    }

    /// Builder-style shape mutation; see [`Scene::config`].
    pub fn config(&mut self, id: ShapeId, f: impl FnOnce(&mut Shape)) -> ShapeId {
        self.scene.config(id, f)
    }

    /// A clone of the stop switch gating [`frame`](Self::frame).
    pub fn loop_handle(&self) -> LoopHandle {
        self.loop_handle.clone()
    }

    /// Current pointer state.
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Current keyboard state.
    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    /// Pass context-menu events through to the host instead of swallowing
    /// them.
    pub fn set_force_context_default(&mut self, force: bool) {
        self.force_context_default = force;
    }

    /// How many frames a readiness gate polls before timing out.
    pub fn set_poll_budget(&mut self, budget: u32) {
        self.poll_budget = budget;
    }

    // --- callback registration ---

    /// Run `cb` every tick the pointer is over the shape.
    pub fn on_pointer_over(&mut self, id: ShapeId, cb: impl FnMut(&mut Shape) + 'static) {
        self.handlers.slots_mut(id).pointer_over = Some(Box::new(cb));
    }

    /// Run `cb` every tick the pointer is not over the shape.
    pub fn on_pointer_out(&mut self, id: ShapeId, cb: impl FnMut(&mut Shape) + 'static) {
        self.handlers.slots_mut(id).pointer_out = Some(Box::new(cb));
    }

    /// Run `cb` when a left click completes on the shape.
    pub fn on_left_click(&mut self, id: ShapeId, cb: impl FnMut(&mut Shape) + 'static) {
        self.handlers.slots_mut(id).left_click = Some(Box::new(cb));
    }

    /// Run `cb` when a wheel (middle) click completes on the shape.
    pub fn on_wheel_click(&mut self, id: ShapeId, cb: impl FnMut(&mut Shape) + 'static) {
        self.handlers.slots_mut(id).wheel_click = Some(Box::new(cb));
    }

    /// Run `cb` when a right click completes on the shape.
    pub fn on_right_click(&mut self, id: ShapeId, cb: impl FnMut(&mut Shape) + 'static) {
        self.handlers.slots_mut(id).right_click = Some(Box::new(cb));
    }

    /// Run `cb` when a touch tap completes on the shape.
    pub fn on_touch(&mut self, id: ShapeId, cb: impl FnMut(&mut Shape) + 'static) {
        self.handlers.slots_mut(id).touch = Some(Box::new(cb));
    }

    /// Run `cb` every tick any key is held, with the full down-key set.
    pub fn on_key_press(
        &mut self,
        id: ShapeId,
        cb: impl FnMut(&mut Shape, &std::collections::BTreeSet<String>) + 'static,
    ) {
        self.handlers.slots_mut(id).key_press = Some(Box::new(cb));
    }

    /// Run `cb` once per physical key release, with the released key.
    pub fn on_key_release(&mut self, id: ShapeId, cb: impl FnMut(&mut Shape, &str) + 'static) {
        self.handlers.slots_mut(id).key_release = Some(Box::new(cb));
    }

    // --- event handling ---

    /// CSS-to-buffer scale factors.
    fn scale(&self) -> (f64, f64) {
        match self.css_size {
            Some(css) if css.width > 0.0 && css.height > 0.0 => {
                (self.width / css.width, self.height / css.height)
            }
            _ => (1.0, 1.0),
        }
    }

    fn scaled(&self, x: f64, y: f64) -> AxisPoint {
        let (sx, sy) = self.scale();
        AxisPoint::at(x * sx, y * sy)
    }

    /// Fold one normalized event into the surface state, running the click
    /// pass on releases. Returns whether the host should suppress its
    /// default handling of the event.
    pub fn handle_event(&mut self, event: InputEvent, measurer: &impl TextMeasurer) -> bool {
        match event {
            InputEvent::PointerDown {
                x,
                y,
                button,
                timestamp,
            } => {
                let pos = self.scaled(x, y);
                self.pointer.snapshot.initial = pos;
                self.pointer.snapshot.current = pos;
                self.pointer.pressed_at = Some(timestamp);
                self.pointer.device = PointerDevice::Mouse;
                if let Some(flag) = button.flag() {
                    self.pointer.buttons.insert(flag);
                }
                false
            }
            InputEvent::PointerMove { x, y } => {
                self.pointer.snapshot.current = self.scaled(x, y);
                false
            }
            InputEvent::PointerUp {
                x,
                y,
                button,
                timestamp,
            } => {
                let pos = self.scaled(x, y);
                self.pointer.snapshot.current = pos;
                self.pointer.snapshot.final_pos = pos;
                self.pointer.released_at = Some(timestamp);
                self.pointer.device = PointerDevice::Mouse;
                self.dispatch_click(button, measurer);
                // A finished click must not satisfy a later one.
                self.pointer.snapshot.initial.clear();
                self.pointer.snapshot.final_pos.clear();
                if let Some(flag) = button.flag() {
                    self.pointer.buttons.remove(flag);
                }
                false
            }
            InputEvent::PointerLeave => {
                self.pointer.snapshot.current.clear();
                false
            }
            InputEvent::TouchStart { x, y, timestamp } => {
                let pos = self.scaled(x, y);
                self.pointer.snapshot.initial = pos;
                self.pointer.snapshot.current = pos;
                self.pointer.pressed_at = Some(timestamp);
                self.pointer.device = PointerDevice::Touch;
                true
            }
            InputEvent::TouchMove { x, y } => {
                self.pointer.snapshot.current = self.scaled(x, y);
                true
            }
            InputEvent::TouchEnd { timestamp } => {
                self.pointer.snapshot.final_pos = self.pointer.snapshot.current;
                self.pointer.released_at = Some(timestamp);
                self.pointer.device = PointerDevice::Touch;
                self.dispatch_click(PointerButton::Left, measurer);
                self.pointer.snapshot.initial.clear();
                self.pointer.snapshot.final_pos.clear();
                // No hover without a contact.
                self.pointer.snapshot.current.clear();
                true
            }
            InputEvent::KeyDown { key } => {
                self.keys.key_down(key);
                // Keep the host from scrolling while a shape listens.
                self.handlers.any_key_handlers()
            }
            InputEvent::KeyUp { key } => {
                self.keys.key_up(key);
                self.handlers.any_key_handlers()
            }
            InputEvent::ContextMenu => !self.force_context_default,
        }
    }

    /// Fire the matching click callback for every live, recently-rendered
    /// shape the completed click landed on.
    fn dispatch_click(&mut self, button: PointerButton, measurer: &impl TextMeasurer) {
        let pick: SlotPick = if self.pointer.device == PointerDevice::Touch {
            |s| &mut s.touch
        } else {
            match button {
                PointerButton::Left => |s| &mut s.left_click,
                PointerButton::Wheel => |s| &mut s.wheel_click,
                PointerButton::Right => |s| &mut s.right_click,
                PointerButton::Other(code) => {
                    warn!(code, "unrecognized pointer button, skipping click dispatch");
                    return;
                }
            }
        };
        for id in self.scene.registry() {
            if !self.recently_rendered(id) {
                continue;
            }
            if hit::was_clicked(&self.scene, id, &self.pointer.snapshot, measurer) != Some(true) {
                continue;
            }
            self.invoke(id, pick);
        }
    }

    fn recently_rendered(&self, id: ShapeId) -> bool {
        self.scene.shape(id).is_some_and(Shape::recently_rendered)
    }

    fn invoke(&mut self, id: ShapeId, pick: SlotPick) {
        let Some(mut cb) = self.handlers.take_slot(id, pick) else {
            return;
        };
        if let Some(shape) = self.scene.shape_mut(id) {
            cb(shape);
        }
        self.handlers.restore_slot(id, pick, cb);
    }

    // --- the per-frame passes ---

    /// The dispatch pass: hover enter/exit and key press/release over a
    /// snapshot of the interactive registry.
    pub fn tick(&mut self, measurer: &impl TextMeasurer) {
        let registry = self.scene.registry();
        let sample = self.pointer.snapshot.current;
        for &id in &registry {
            if !self.recently_rendered(id) {
                continue;
            }
            // Enter/exit fire every tick the condition holds, so shapes can
            // drive continuous effects from either side.
            if hit::is_under(&self.scene, id, sample, measurer) == Some(true) {
                self.handlers.hovered.insert(id);
                self.invoke(id, |s| &mut s.pointer_over);
            } else {
                self.handlers.hovered.remove(&id);
                self.invoke(id, |s| &mut s.pointer_out);
            }
        }

        if self.keys.any_down() {
            for &id in &registry {
                if !self.recently_rendered(id) {
                    continue;
                }
                let Some(mut cb) = self.handlers.take_key_press(id) else {
                    continue;
                };
                if let Some(shape) = self.scene.shape_mut(id) {
                    cb(shape, self.keys.down_keys());
                }
                self.handlers.restore_key_press(id, cb);
            }
        }

        for key in self.keys.drain_released() {
            for &id in &registry {
                if !self.recently_rendered(id) {
                    continue;
                }
                let Some(mut cb) = self.handlers.take_key_release(id) else {
                    continue;
                };
                if let Some(shape) = self.scene.shape_mut(id) {
                    cb(shape, &key);
                }
                self.handlers.restore_key_release(id, cb);
            }
        }
    }

    /// Wipe the draw target and age every shape's staleness counter.
    pub fn clear(&mut self, ctx: &mut impl DrawTarget) {
        ctx.clear_rect(Rect::new(0.0, 0.0, self.width, self.height));
        self.scene.age_all();
    }

    /// Walk the tree in insertion order, drawing visible leaf shapes and
    /// resetting their staleness counters. Off-viewport shapes are culled
    /// and stay stale.
    pub fn render(&mut self, ctx: &mut impl DrawTarget, bitmaps: &impl BitmapStore) {
        let roots = self.scene.roots().to_vec();
        for id in roots {
            self.render_node(id, ctx, bitmaps);
        }
    }

    fn render_node(&mut self, id: ShapeId, ctx: &mut impl DrawTarget, bitmaps: &impl BitmapStore) {
        let is_group = self
            .scene
            .shape(id)
            .is_some_and(|s| matches!(s.kind, ShapeKind::Group));
        if is_group {
            let children = self.scene.children(id).to_vec();
            for child in children {
                self.render_node(child, ctx, bitmaps);
            }
            return;
        }
        let Some(bbox) = hit::bounding_box(&self.scene, id, &*ctx) else {
            return;
        };
        let viewport = Rect::new(0.0, 0.0, self.width, self.height);
        if bbox.x1 < viewport.x0
            || bbox.x0 > viewport.x1
            || bbox.y1 < viewport.y0
            || bbox.y0 > viewport.y1
        {
            trace!(?id, "culled off-viewport shape");
            return;
        }
        self.scene.mark_rendered(id);
        self.draw_shape(id, ctx, bitmaps);
    }

    fn draw_shape(&self, id: ShapeId, ctx: &mut impl DrawTarget, bitmaps: &impl BitmapStore) {
        let Some(origin) = self.scene.absolute_origin(id) else {
            return;
        };
        let Some(shape) = self.scene.shape(id) else {
            return;
        };
        let hovered = self.handlers.hovered.contains(&id);
        let color = effective_color(shape.color, shape.hover, hovered);

        ctx.save();
        match &shape.kind {
            ShapeKind::Rect => {
                ctx.begin_path();
                ctx.rect(Rect::from_origin_size(origin, shape.size));
                paint(ctx, shape, color);
            }
            ShapeKind::Arc {
                radius,
                start,
                end,
                start_from,
                line_to_center,
                close_path,
            } => {
                let offset = start_from.offset();
                // A filled arc reaches half a line width past the radius,
                // matching the hit annulus's outer edge.
                let draw_radius = match shape.mode {
                    easel_scene::DrawMode::Fill => radius + shape.line_width / 2.0,
                    easel_scene::DrawMode::Stroke => *radius,
                };
                ctx.begin_path();
                if *line_to_center {
                    ctx.line_to(origin);
                }
                ctx.arc(origin, draw_radius, start + offset, end + offset);
                if *close_path {
                    ctx.close_path();
                }
                paint(ctx, shape, color);
            }
            ShapeKind::Text {
                text,
                font_size,
                font_family,
                baseline,
                align,
                direction,
            } => {
                ctx.set_font(*font_size, font_family);
                ctx.set_text_style(*baseline, *align, *direction);
                match shape.mode {
                    easel_scene::DrawMode::Fill => {
                        ctx.set_fill_color(color);
                        ctx.fill_text(text, origin);
                    }
                    easel_scene::DrawMode::Stroke => {
                        ctx.set_stroke_color(color);
                        ctx.set_line_width(shape.line_width);
                        ctx.stroke_text(text, origin);
                    }
                }
            }
            ShapeKind::Image { source } => {
                let dest = Rect::from_origin_size(origin, shape.size);
                if hovered && let Some(b) = hover_brightness(shape.hover) {
                    ctx.set_brightness(b);
                }
                ctx.draw_image(image_ref(source, bitmaps), dest);
            }
            ShapeKind::Sprite(set) => {
                if let Some(frame) = set.current_frame() {
                    let dest = Rect::from_origin_size(origin, shape.size);
                    if hovered && let Some(b) = hover_brightness(shape.hover) {
                        ctx.set_brightness(b);
                    }
                    ctx.draw_image(ImageRef::Bitmap(frame), dest);
                }
            }
            // Groups are handled by the traversal.
            ShapeKind::Group => {}
        }
        ctx.restore();
    }

    /// One frame: dispatch tick, clear (aging), render (marking). Does
    /// nothing once the loop handle is stopped.
    pub fn frame(&mut self, ctx: &mut impl DrawTarget, bitmaps: &impl BitmapStore) {
        if !self.loop_handle.is_running() {
            return;
        }
        self.tick(&*ctx);
        self.clear(ctx);
        self.render(ctx, bitmaps);
    }

    // --- readiness ---

    /// Whether an image shape's bitmap has materialized in the store.
    /// Sprites report ready once their animation pointers are initialized.
    pub fn image_ready(&self, id: ShapeId, bitmaps: &impl BitmapStore) -> bool {
        match self.scene.shape(id).map(|s| &s.kind) {
            Some(ShapeKind::Image { source }) => bitmaps.natural_size(source).is_some(),
            Some(ShapeKind::Sprite(set)) => set.is_ready(),
            _ => false,
        }
    }

    /// One bounded readiness poll for an image or sprite shape. `Ok(true)`
    /// once ready, `Ok(false)` while waiting, `Err` when the per-shape poll
    /// budget is spent.
    pub fn poll_image_ready(
        &mut self,
        id: ShapeId,
        bitmaps: &impl BitmapStore,
    ) -> Result<bool, ReadyError> {
        let ready = self.image_ready(id, bitmaps);
        let budget = self.poll_budget;
        let gate = self.gates.entry(id).or_insert_with(|| Readiness::new(budget));
        let result = gate.poll(ready);
        if result != Ok(false) {
            self.gates.remove(&id);
        }
        result
    }

    /// Bounded poll that, once the sprite set is initialized, jumps it to a
    /// uniformly random frame of the active animation.
    pub fn sprite_random(
        &mut self,
        id: ShapeId,
        rng: &mut impl Rng,
        bitmaps: &impl BitmapStore,
    ) -> Result<bool, ReadyError> {
        if !self.poll_image_ready(id, bitmaps)? {
            return Ok(false);
        }
        if let Some(shape) = self.scene.shape_mut(id)
            && let ShapeKind::Sprite(set) = &mut shape.kind
            && let Some(count) = set.frame_count()
        {
            let frame = rng.random_range(0..count);
            set.set_frame_index(frame);
            trace!(?id, frame, "sprite jumped to random frame");
        }
        Ok(true)
    }
}

/// Resolve the paint color from the hover latch and the shape's policy.
fn effective_color(base: u32, hover: HoverEffect, hovered: bool) -> u32 {
    if !hovered {
        return base;
    }
    match hover {
        HoverEffect::None => base,
        HoverEffect::Darken => Rgba::from_packed(base)
            .darken(HoverEffect::DARKEN_DELTA)
            .to_packed(),
        HoverEffect::Color(replacement) => replacement,
    }
}

/// Bitmap shapes cannot recolor, so hover maps onto a brightness filter:
/// darkening halves it, an explicit color contributes its mean intensity.
fn hover_brightness(hover: HoverEffect) -> Option<f64> {
    match hover {
        HoverEffect::None => None,
        HoverEffect::Darken => Some(0.5),
        HoverEffect::Color(value) => {
            let c = Rgba::from_packed(value);
            Some(f64::from(c.red + c.green + c.blue) / (3.0 * 255.0))
        }
    }
}

fn image_ref<'a>(source: &'a ImageSource, bitmaps: &'a impl BitmapStore) -> ImageRef<'a> {
    match source {
        ImageSource::Bitmap(id) => ImageRef::Bitmap(*id),
        ImageSource::Url(_) => match bitmaps.source_url(source) {
            Some(url) => ImageRef::Url(url),
            // An unloadable URL still records where it should have come from.
            None => ImageRef::Url(""),
        },
    }
}

fn paint(ctx: &mut impl DrawTarget, shape: &Shape, color: u32) {
    match shape.mode {
        easel_scene::DrawMode::Fill => {
            ctx.set_fill_color(color);
            ctx.fill();
        }
        easel_scene::DrawMode::Stroke => {
            ctx.set_stroke_color(color);
            ctx.set_line_width(shape.line_width);
            ctx.stroke();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{DrawCall, NoBitmaps, RecordingTarget};
    use easel_scene::{DrawMode, SpriteSet};
    use kurbo::Point;
    use std::cell::Cell;
    use std::rc::Rc;

    fn down(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerDown {
            x,
            y,
            button: PointerButton::Left,
            timestamp: 0.0,
        }
    }

    fn up(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerUp {
            x,
            y,
            button: PointerButton::Left,
            timestamp: 16.0,
        }
    }

    fn rendered_rect(surface: &mut Surface, ctx: &mut RecordingTarget) -> ShapeId {
        let id = surface.attach(
            None,
            Shape::rect(10.0, 10.0, 50.0, 20.0).config(|s| s.color = 0x00FF00),
        );
        surface.frame(ctx, &NoBitmaps);
        id
    }

    #[test]
    fn completed_click_fires_left_callback() {
        let mut surface = Surface::new(200.0, 200.0);
        let mut ctx = RecordingTarget::new();
        let id = rendered_rect(&mut surface, &mut ctx);
        surface.on_left_click(id, |s| s.color = 0xFF0000);

        surface.handle_event(down(20.0, 15.0), &ctx);
        surface.handle_event(up(25.0, 15.0), &ctx);
        assert_eq!(surface.scene().shape(id).unwrap().color, 0xFF0000);
    }

    #[test]
    fn drag_off_cancels_the_click() {
        let mut surface = Surface::new(200.0, 200.0);
        let mut ctx = RecordingTarget::new();
        let id = rendered_rect(&mut surface, &mut ctx);
        surface.on_left_click(id, |s| s.color = 0xFF0000);

        surface.handle_event(down(20.0, 15.0), &ctx);
        surface.handle_event(up(150.0, 150.0), &ctx);
        assert_eq!(surface.scene().shape(id).unwrap().color, 0x00FF00);
    }

    #[test]
    fn unrendered_shape_ignores_clicks() {
        let mut surface = Surface::new(200.0, 200.0);
        let ctx = RecordingTarget::new();
        // No frame: the shape has never been drawn.
        let id = surface.attach(None, Shape::rect(10.0, 10.0, 50.0, 20.0));
        surface.on_left_click(id, |s| s.color = 0xFF0000);

        surface.handle_event(down(20.0, 15.0), &ctx);
        surface.handle_event(up(25.0, 15.0), &ctx);
        assert_eq!(surface.scene().shape(id).unwrap().color, 0);
    }

    #[test]
    fn second_release_needs_a_fresh_press() {
        let mut surface = Surface::new(200.0, 200.0);
        let mut ctx = RecordingTarget::new();
        let id = rendered_rect(&mut surface, &mut ctx);
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        surface.on_left_click(id, move |_| c.set(c.get() + 1));

        surface.handle_event(down(20.0, 15.0), &ctx);
        surface.handle_event(up(25.0, 15.0), &ctx);
        // Stray release without a new press.
        surface.handle_event(up(25.0, 15.0), &ctx);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn other_buttons_do_not_dispatch() {
        let mut surface = Surface::new(200.0, 200.0);
        let mut ctx = RecordingTarget::new();
        let id = rendered_rect(&mut surface, &mut ctx);
        surface.on_left_click(id, |s| s.color = 0xFF0000);

        surface.handle_event(
            InputEvent::PointerDown {
                x: 20.0,
                y: 15.0,
                button: PointerButton::Other(7),
                timestamp: 0.0,
            },
            &ctx,
        );
        surface.handle_event(
            InputEvent::PointerUp {
                x: 20.0,
                y: 15.0,
                button: PointerButton::Other(7),
                timestamp: 16.0,
            },
            &ctx,
        );
        assert_eq!(surface.scene().shape(id).unwrap().color, 0x00FF00);
    }

    #[test]
    fn css_coordinates_rescale_into_the_buffer() {
        let mut surface = Surface::new(200.0, 200.0);
        surface.set_css_size(400.0, 400.0);
        let mut ctx = RecordingTarget::new();
        let id = rendered_rect(&mut surface, &mut ctx);
        surface.on_left_click(id, |s| s.color = 0xFF0000);

        // On-screen (40, 30) lands on buffer (20, 15), inside the rect.
        surface.handle_event(down(40.0, 30.0), &ctx);
        surface.handle_event(up(40.0, 30.0), &ctx);
        assert_eq!(surface.scene().shape(id).unwrap().color, 0xFF0000);
    }

    #[test]
    fn touch_tap_uses_the_touch_slot() {
        let mut surface = Surface::new(200.0, 200.0);
        let mut ctx = RecordingTarget::new();
        let id = rendered_rect(&mut surface, &mut ctx);
        surface.on_left_click(id, |s| s.color = 0x111111);
        surface.on_touch(id, |s| s.color = 0x222222);

        assert!(surface.handle_event(
            InputEvent::TouchStart {
                x: 20.0,
                y: 15.0,
                timestamp: 0.0
            },
            &ctx,
        ));
        assert!(surface.handle_event(InputEvent::TouchEnd { timestamp: 16.0 }, &ctx));
        assert_eq!(surface.scene().shape(id).unwrap().color, 0x222222);
        // Contact gone: nothing left under a pointer.
        assert_eq!(surface.pointer().snapshot.current.resolved(), None);
    }

    #[test]
    fn hover_fires_over_then_out() {
        let mut surface = Surface::new(200.0, 200.0);
        let mut ctx = RecordingTarget::new();
        let id = rendered_rect(&mut surface, &mut ctx);
        let log = Rc::new(Cell::new((0, 0)));
        let l1 = log.clone();
        let l2 = log.clone();
        surface.on_pointer_over(id, move |_| {
            let (over, out) = l1.get();
            l1.set((over + 1, out));
        });
        surface.on_pointer_out(id, move |_| {
            let (over, out) = l2.get();
            l2.set((over, out + 1));
        });

        surface.handle_event(InputEvent::PointerMove { x: 20.0, y: 15.0 }, &ctx);
        surface.frame(&mut ctx, &NoBitmaps);
        assert_eq!(log.get(), (1, 0));

        surface.handle_event(InputEvent::PointerMove { x: 150.0, y: 150.0 }, &ctx);
        surface.frame(&mut ctx, &NoBitmaps);
        assert_eq!(log.get(), (1, 1));
    }

    #[test]
    fn key_press_sees_the_full_set_and_release_fires_once() {
        let mut surface = Surface::new(200.0, 200.0);
        let mut ctx = RecordingTarget::new();
        let id = rendered_rect(&mut surface, &mut ctx);
        let presses = Rc::new(Cell::new(0));
        let held = Rc::new(Cell::new(0));
        let released = Rc::new(Cell::new(false));
        let p = presses.clone();
        let h = held.clone();
        surface.on_key_press(id, move |_, keys| {
            p.set(p.get() + 1);
            h.set(keys.len());
        });
        let r = released.clone();
        surface.on_key_release(id, move |_, key| {
            assert_eq!(key, "w");
            r.set(true);
        });

        surface.handle_event(InputEvent::KeyDown { key: "w".into() }, &ctx);
        surface.handle_event(InputEvent::KeyDown { key: "a".into() }, &ctx);
        surface.frame(&mut ctx, &NoBitmaps);
        surface.frame(&mut ctx, &NoBitmaps);
        assert_eq!(presses.get(), 2, "press fires every tick keys are held");
        assert_eq!(held.get(), 2, "callback sees the full down-key set");

        surface.handle_event(InputEvent::KeyUp { key: "w".into() }, &ctx);
        surface.frame(&mut ctx, &NoBitmaps);
        assert!(released.get());
        assert_eq!(held.get(), 1, "only `a` remains held");
        assert_eq!(presses.get(), 3);
    }

    #[test]
    fn context_menu_is_swallowed_unless_forced() {
        let mut surface = Surface::new(100.0, 100.0);
        let ctx = RecordingTarget::new();
        assert!(surface.handle_event(InputEvent::ContextMenu, &ctx));
        surface.set_force_context_default(true);
        assert!(!surface.handle_event(InputEvent::ContextMenu, &ctx));
    }

    #[test]
    fn offscreen_shapes_are_culled_and_stay_stale() {
        let mut surface = Surface::new(100.0, 100.0);
        let mut ctx = RecordingTarget::new();
        let visible = surface.attach(None, Shape::rect(10.0, 10.0, 20.0, 20.0));
        let offscreen = surface.attach(None, Shape::rect(500.0, 500.0, 20.0, 20.0));
        surface.frame(&mut ctx, &NoBitmaps);
        assert!(surface.scene().shape(visible).unwrap().recently_rendered());
        assert!(!surface.scene().shape(offscreen).unwrap().recently_rendered());
    }

    #[test]
    fn render_emits_fill_calls_for_a_rect() {
        let mut surface = Surface::new(100.0, 100.0);
        let mut ctx = RecordingTarget::new();
        surface.attach(
            None,
            Shape::rect(10.0, 10.0, 20.0, 20.0).config(|s| {
                s.color = 0x123456;
                s.mode = DrawMode::Fill;
            }),
        );
        surface.frame(&mut ctx, &NoBitmaps);
        let calls = ctx.calls();
        assert!(calls.contains(&DrawCall::ClearRect(Rect::new(0.0, 0.0, 100.0, 100.0))));
        assert!(calls.contains(&DrawCall::Rect(Rect::new(10.0, 10.0, 30.0, 30.0))));
        assert!(calls.contains(&DrawCall::FillColor(0x123456)));
        assert!(calls.contains(&DrawCall::Fill));
    }

    #[test]
    fn hover_darkens_the_fill_color() {
        let mut surface = Surface::new(100.0, 100.0);
        let mut ctx = RecordingTarget::new();
        surface.attach(
            None,
            Shape::rect(10.0, 10.0, 20.0, 20.0).config(|s| {
                s.color = 0x808080;
                s.mode = DrawMode::Fill;
            }),
        );
        surface.frame(&mut ctx, &NoBitmaps);
        surface.handle_event(InputEvent::PointerMove { x: 15.0, y: 15.0 }, &ctx);
        ctx.reset();
        surface.frame(&mut ctx, &NoBitmaps);
        // 0x80 - 64 = 0x40 per channel.
        assert!(ctx.calls().contains(&DrawCall::FillColor(0x404040)));
    }

    #[test]
    fn group_offsets_shift_child_draw_calls() {
        let mut surface = Surface::new(200.0, 200.0);
        let mut ctx = RecordingTarget::new();
        let g = surface.attach(None, Shape::group(50.0, 50.0));
        surface.attach(
            Some(g),
            Shape::rect(10.0, 10.0, 20.0, 20.0).config(|s| s.mode = DrawMode::Fill),
        );
        surface.frame(&mut ctx, &NoBitmaps);
        assert!(ctx
            .calls()
            .contains(&DrawCall::Rect(Rect::new(60.0, 60.0, 80.0, 80.0))));
    }

    #[test]
    fn arc_draw_applies_compass_offset_and_pie_path() {
        use core::f64::consts::FRAC_PI_2;
        let mut surface = Surface::new(200.0, 200.0);
        let mut ctx = RecordingTarget::new();
        surface.attach(
            None,
            Shape::arc(100.0, 100.0, 30.0).config(|s| {
                s.set_angle(0.2, 5.9);
                if let ShapeKind::Arc { start_from, .. } = &mut s.kind {
                    *start_from = easel_scene::StartFrom::Bottom;
                }
            }),
        );
        surface.frame(&mut ctx, &NoBitmaps);
        let calls = ctx.calls();
        assert!(calls.contains(&DrawCall::LineTo(Point::new(100.0, 100.0))));
        assert!(calls.iter().any(|c| matches!(
            c,
            DrawCall::Arc { center, radius, start, end }
                if *center == Point::new(100.0, 100.0)
                    && *radius == 30.0
                    && (*start - (0.2 + FRAC_PI_2)).abs() < 1e-12
                    && (*end - (5.9 + FRAC_PI_2)).abs() < 1e-12
        )));
        assert!(calls.contains(&DrawCall::ClosePath));
    }

    #[test]
    fn stopped_loop_makes_frame_a_no_op() {
        let mut surface = Surface::new(100.0, 100.0);
        let mut ctx = RecordingTarget::new();
        surface.attach(None, Shape::rect(0.0, 0.0, 10.0, 10.0));
        surface.loop_handle().stop();
        surface.frame(&mut ctx, &NoBitmaps);
        assert!(ctx.calls().is_empty());
    }

    #[test]
    fn detach_drops_callbacks_with_the_subtree() {
        let mut surface = Surface::new(100.0, 100.0);
        let mut ctx = RecordingTarget::new();
        let g = surface.attach(None, Shape::group(0.0, 0.0));
        let child = surface.attach(Some(g), Shape::rect(10.0, 10.0, 20.0, 20.0));
        surface.frame(&mut ctx, &NoBitmaps);
        surface.on_left_click(child, |s| s.color = 0xFF0000);
        surface.detach(g);

        surface.handle_event(down(15.0, 15.0), &ctx);
        surface.handle_event(up(15.0, 15.0), &ctx);
        assert!(!surface.scene().is_alive(child));
    }

    #[test]
    fn image_readiness_times_out_on_an_empty_store() {
        let mut surface = Surface::new(100.0, 100.0);
        surface.set_poll_budget(3);
        let img = surface.attach(
            None,
            Shape::image(ImageSource::Url("sprite.png".into()), 0.0, 0.0, 16.0, 16.0),
        );
        assert_eq!(surface.poll_image_ready(img, &NoBitmaps), Ok(false));
        assert_eq!(surface.poll_image_ready(img, &NoBitmaps), Ok(false));
        assert_eq!(
            surface.poll_image_ready(img, &NoBitmaps),
            Err(ReadyError::TimedOut { attempts: 3 })
        );
    }

    #[test]
    fn sprite_random_lands_inside_the_active_animation() {
        use rand::SeedableRng;
        let mut surface = Surface::new(100.0, 100.0);
        let mut set = SpriteSet::new();
        set.insert_animation(
            "walk",
            vec![
                easel_scene::BitmapId(1),
                easel_scene::BitmapId(2),
                easel_scene::BitmapId(3),
            ],
        );
        let id = surface.attach(None, Shape::sprite(set, 0.0, 0.0, 16.0, 16.0));
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        assert_eq!(surface.sprite_random(id, &mut rng, &NoBitmaps), Ok(true));
        let Some(ShapeKind::Sprite(set)) = surface.scene().shape(id).map(|s| &s.kind) else {
            panic!("sprite survived");
        };
        assert!(set.frame_index() < 3);
    }
}

// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer hit-testing and shape/shape overlap queries.
//!
//! ## Overview
//!
//! Every predicate here resolves the shape's absolute position through its
//! group chain before comparing against pointer samples, which are already
//! surface-relative. Geometry is kind-aware: rectangles and bitmaps test
//! their box, arcs test a disk or an annulus, text boxes test a measured and
//! baseline-shifted box.
//!
//! ## Sentinels
//!
//! - A stale [`ShapeId`] answers `None`: the question is not applicable.
//! - An unset pointer axis answers `Some(false)`: the pointer is simply not
//!   there.
//!
//! [`overlap`] keeps the same split: `None` means the two shapes are not
//! comparable (one of them does not live in this scene), which callers must
//! not collapse into "no collision".
//!
//! ## Click policy
//!
//! [`was_clicked`] requires the pointer-down position, the pointer-up
//! position, and the current position to all pass the same geometric test:
//! dragging off a shape before releasing cancels the click.

use kurbo::{Point, Rect};

use crate::scene::{Scene, ShapeId};
use crate::shape::{Shape, ShapeKind};

/// Measure rendered text.
///
/// Text boxes have no intrinsic width; the draw target that will paint them
/// owns the font metrics, so hit-testing borrows them through this seam.
pub trait TextMeasurer {
    /// Width in surface pixels of `text` at `font_size` in `font_family`.
    fn measure_text(&self, text: &str, font_size: f64, font_family: &str) -> f64;
}

/// A measurer for scenes without text shapes; reports every string as
/// zero-width.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoText;

impl TextMeasurer for NoText {
    fn measure_text(&self, _text: &str, _font_size: f64, _font_family: &str) -> f64 {
        0.0
    }
}

/// A pointer position with each axis independently possibly unset.
///
/// Mirrors the surface's transient pointer fields: an axis is unset before
/// the first event that supplies it and after the surface clears it on
/// pointer-up or pointer-leave.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AxisPoint {
    /// Horizontal position in surface pixels.
    pub x: Option<f64>,
    /// Vertical position in surface pixels.
    pub y: Option<f64>,
}

impl AxisPoint {
    /// A fully-set sample.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Unset both axes.
    pub fn clear(&mut self) {
        self.x = None;
        self.y = None;
    }

    /// The sample as a point, when both axes are set.
    pub fn resolved(self) -> Option<Point> {
        Some(Point::new(self.x?, self.y?))
    }
}

/// The three pointer positions a click decision needs.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerSnapshot {
    /// Where the pointer went down.
    pub initial: AxisPoint,
    /// Where the pointer is now.
    pub current: AxisPoint,
    /// Where the pointer came up.
    pub final_pos: AxisPoint,
}

/// Is the pointer sample inside the shape?
///
/// `None` for stale ids, `Some(false)` when either axis of `sample` is
/// unset.
pub fn is_under(
    scene: &Scene,
    id: ShapeId,
    sample: AxisPoint,
    measurer: &impl TextMeasurer,
) -> Option<bool> {
    let shape = scene.shape(id)?;
    let origin = scene.absolute_origin(id)?;
    let Some(pt) = sample.resolved() else {
        return Some(false);
    };
    Some(contains(shape, origin, pt, measurer))
}

/// Did a click begin and end over the shape?
///
/// Requires the down, up, and current positions to all satisfy the shape's
/// geometric test. `None` for stale ids; `Some(false)` when any of the
/// positions is unset (no complete click has happened).
pub fn was_clicked(
    scene: &Scene,
    id: ShapeId,
    pointer: &PointerSnapshot,
    measurer: &impl TextMeasurer,
) -> Option<bool> {
    let shape = scene.shape(id)?;
    let origin = scene.absolute_origin(id)?;
    let (Some(down), Some(up), Some(cur)) = (
        pointer.initial.resolved(),
        pointer.final_pos.resolved(),
        pointer.current.resolved(),
    ) else {
        return Some(false);
    };
    Some(
        contains(shape, origin, cur, measurer)
            && contains(shape, origin, down, measurer)
            && contains(shape, origin, up, measurer),
    )
}

/// Do two shapes overlap?
///
/// Gameplay collision, separate from pointer routing: axis-aligned boxes
/// and arc disks compared on absolute geometry. Answers `None` when either
/// id is not alive in this scene — the shapes are not comparable, which is
/// distinct from "no collision".
pub fn overlap(scene: &Scene, a: ShapeId, b: ShapeId) -> Option<bool> {
    let ga = collision_geometry(scene, a)?;
    let gb = collision_geometry(scene, b)?;
    Some(match (ga, gb) {
        (Collider::Box(ra), Collider::Box(rb)) => boxes_overlap(ra, rb),
        (Collider::Circle(c, r), Collider::Box(rect))
        | (Collider::Box(rect), Collider::Circle(c, r)) => circle_box_overlap(c, r, rect),
        (Collider::Circle(ca, ra), Collider::Circle(cb, rb)) => {
            let d = ca - cb;
            d.hypot2() <= (ra + rb) * (ra + rb)
        }
    })
}

/// Absolute bounding box of a shape, including stroke width for arcs and
/// measured extents for text. Used by the surface's viewport cull.
pub fn bounding_box(
    scene: &Scene,
    id: ShapeId,
    measurer: &impl TextMeasurer,
) -> Option<Rect> {
    let shape = scene.shape(id)?;
    let origin = scene.absolute_origin(id)?;
    Some(shape_box(shape, origin, measurer))
}

enum Collider {
    Box(Rect),
    Circle(Point, f64),
}

fn collision_geometry(scene: &Scene, id: ShapeId) -> Option<Collider> {
    let shape = scene.shape(id)?;
    let origin = scene.absolute_origin(id)?;
    Some(match shape.kind {
        ShapeKind::Arc { radius, .. } => Collider::Circle(origin, radius),
        _ => Collider::Box(Rect::from_origin_size(origin, shape.size)),
    })
}

fn boxes_overlap(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

fn circle_box_overlap(center: Point, radius: f64, rect: Rect) -> bool {
    // Distance from the center to the nearest point of the box.
    let nearest = Point::new(
        center.x.clamp(rect.x0, rect.x1),
        center.y.clamp(rect.y0, rect.y1),
    );
    (center - nearest).hypot2() <= radius * radius
}

/// Kind-specific point containment at an already-resolved absolute origin.
fn contains(shape: &Shape, origin: Point, pt: Point, measurer: &impl TextMeasurer) -> bool {
    match &shape.kind {
        ShapeKind::Arc { radius, .. } => {
            let d2 = (pt - origin).hypot2();
            let outer = radius + shape.line_width / 2.0;
            let inner = radius - shape.line_width / 2.0;
            let within_outer = d2 < outer * outer;
            match shape.mode {
                // Filled arcs test the disk interior only.
                crate::shape::DrawMode::Fill => within_outer,
                // Stroked arcs test the annulus of half the line width.
                crate::shape::DrawMode::Stroke => within_outer && d2 > inner * inner,
            }
        }
        _ => box_contains(shape_box(shape, origin, measurer), pt),
    }
}

/// Inclusive box containment: both edges count, unlike `Rect::contains`.
fn box_contains(r: Rect, p: Point) -> bool {
    p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
}

/// The shape's effective absolute box.
fn shape_box(shape: &Shape, origin: Point, measurer: &impl TextMeasurer) -> Rect {
    match &shape.kind {
        ShapeKind::Arc { radius, .. } => {
            let reach = radius + shape.line_width / 2.0;
            Rect::new(
                origin.x - reach,
                origin.y - reach,
                origin.x + reach,
                origin.y + reach,
            )
        }
        ShapeKind::Text {
            text,
            font_size,
            font_family,
            baseline,
            align,
            direction,
        } => {
            let width = measurer.measure_text(text, *font_size, font_family);
            let height = *font_size;
            // Baseline shifts the vertical origin, alignment the horizontal.
            let left = origin.x - align.anchor_fraction(*direction) * width;
            let top = origin.y - baseline.anchor_fraction() * height;
            Rect::new(left, top, left + width, top + height)
        }
        _ => Rect::from_origin_size(origin, shape.size),
    }
}

// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape data model: the tagged union of drawable kinds and their shared
//! attributes.
//!
//! ## Overview
//!
//! Every node in a [`Scene`](crate::Scene) is a [`Shape`]: a parent-relative
//! origin, a size, a packed fill/stroke color, a staleness counter, and a
//! [`ShapeKind`] carrying kind-specific geometry. One struct and one enum
//! cover every drawable kind; interactive callback slots live in the
//! surface layer, keyed by [`ShapeId`](crate::ShapeId).

use alloc::string::String;

use kurbo::{Point, Size};

use crate::sprite::SpriteSet;

/// Whether a shape paints its interior or its outline.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DrawMode {
    /// Paint the interior.
    #[default]
    Fill,
    /// Paint the outline with the shape's line width.
    Stroke,
}

/// Hover tint applied while the pointer is over a shape.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum HoverEffect {
    /// No tint.
    None,
    /// Darken the fill by a fixed per-channel delta.
    #[default]
    Darken,
    /// Replace the fill with an explicit packed color.
    Color(u32),
}

impl HoverEffect {
    /// Per-channel delta used by [`HoverEffect::Darken`].
    pub const DARKEN_DELTA: i32 = 64;
}

/// Compass anchor for an arc's zero angle.
///
/// The 2D context measures angles from the positive x axis; `start_from`
/// rotates the arc's `start`/`end` pair so, for example, a pac-man mouth can
/// face any of the four compass directions without recomputing angles.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum StartFrom {
    /// Zero angle points right (the context default).
    #[default]
    Right,
    /// Zero angle points down.
    Bottom,
    /// Zero angle points left.
    Left,
    /// Zero angle points up.
    Top,
}

impl StartFrom {
    /// Angular offset added to the arc's start and end angles.
    pub fn offset(self) -> f64 {
        match self {
            Self::Right => 0.0,
            Self::Bottom => core::f64::consts::FRAC_PI_2,
            Self::Left => core::f64::consts::PI,
            Self::Top => 3.0 * core::f64::consts::FRAC_PI_2,
        }
    }
}

/// Vertical anchor of a text box relative to its origin.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Baseline {
    /// Origin at the top edge of the em box.
    Top,
    /// Origin at the hanging baseline, just under the top edge.
    Hanging,
    /// Origin at the vertical middle.
    Middle,
    /// Origin at the alphabetic baseline (the context default).
    #[default]
    Alphabetic,
    /// Origin at the ideographic baseline, just above the bottom edge.
    Ideographic,
    /// Origin at the bottom edge of the em box.
    Bottom,
}

impl Baseline {
    /// Fraction of the text height between the box top and the baseline
    /// anchor. `Top` is 0 (box top equals the origin), `Bottom` is 1 (box
    /// bottom equals the origin); the intermediate baselines use the common
    /// em-box approximations.
    pub fn anchor_fraction(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Hanging => 0.1,
            Self::Middle => 0.5,
            Self::Alphabetic => 0.8,
            Self::Ideographic => 0.9,
            Self::Bottom => 1.0,
        }
    }
}

/// Horizontal anchor of a text box relative to its origin.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum TextAlign {
    /// Leading edge for the text [`Direction`]: left under `Ltr`, right under `Rtl`.
    #[default]
    Start,
    /// Trailing edge for the text [`Direction`].
    End,
    /// Left edge regardless of direction.
    Left,
    /// Right edge regardless of direction.
    Right,
    /// Centered on the origin.
    Center,
}

/// Text direction; decides what `Start`/`End` alignment mean.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

impl TextAlign {
    /// Fraction of the measured width between the box's left edge and the
    /// origin, after resolving `Start`/`End` against `direction`.
    pub fn anchor_fraction(self, direction: Direction) -> f64 {
        match (self, direction) {
            (Self::Left, _) | (Self::Start, Direction::Ltr) | (Self::End, Direction::Rtl) => 0.0,
            (Self::Right, _) | (Self::End, Direction::Ltr) | (Self::Start, Direction::Rtl) => 1.0,
            (Self::Center, _) => 0.5,
        }
    }
}

/// Host handle for a decoded bitmap.
///
/// The scene never touches pixel data; bitmaps live in the host's store and
/// are referred to by this opaque id. Natural dimensions and source URLs are
/// resolved through the surface layer's bitmap store.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct BitmapId(pub u32);

/// Where an image shape's pixels come from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ImageSource {
    /// A URL the host is expected to load.
    Url(String),
    /// An already-registered bitmap.
    Bitmap(BitmapId),
}

/// Kind-specific geometry and state.
#[derive(Clone, Debug)]
pub enum ShapeKind {
    /// Axis-aligned box at the shape's origin.
    Rect,
    /// Circle or pie slice evaluated from a center point.
    Arc {
        /// Radius in surface pixels. The shape's width/height derive from
        /// `2 × radius`.
        radius: f64,
        /// Start angle in radians, before the [`StartFrom`] offset.
        start: f64,
        /// End angle in radians, before the [`StartFrom`] offset.
        end: f64,
        /// Compass rotation applied to both angles at draw time.
        start_from: StartFrom,
        /// Draw a line to the center first, producing a pie slice.
        line_to_center: bool,
        /// Close the path before painting.
        close_path: bool,
    },
    /// Measured text anchored at the origin by baseline and alignment.
    Text {
        /// The string to draw.
        text: String,
        /// Font size in pixels; also the text box height.
        font_size: f64,
        /// Font family passed through to the context.
        font_family: String,
        /// Vertical anchor.
        baseline: Baseline,
        /// Horizontal anchor.
        align: TextAlign,
        /// Direction resolving `Start`/`End` alignment.
        direction: Direction,
    },
    /// Bitmap blitted into the shape's box.
    Image {
        /// Pixel source, resolved through the surface's bitmap store.
        source: ImageSource,
    },
    /// Animated bitmap sequence blitted into the shape's box.
    Sprite(SpriteSet),
    /// Container establishing a nested coordinate offset; never drawn.
    Group,
}

/// A drawable, optionally interactive scene node.
#[derive(Clone, Debug)]
pub struct Shape {
    /// Position relative to the enclosing group (or the surface root).
    /// For arcs this is the center; for text it is the baseline/alignment
    /// anchor; for everything else the top-left corner.
    pub origin: Point,
    /// Width and height of the shape's box. Arcs keep this derived from the
    /// radius; text keeps it derived from measurement.
    pub size: Size,
    /// Packed `0xRRGGBB` fill/stroke color.
    pub color: u32,
    /// Paint the interior or the outline.
    pub mode: DrawMode,
    /// Outline width; also widens the arc hit annulus.
    pub line_width: f64,
    /// Hover tint policy.
    pub hover: HoverEffect,
    /// Kind-specific geometry.
    pub kind: ShapeKind,
    pub(crate) staleness: u32,
    /// Upper bound for the staleness counter.
    pub staleness_cap: u32,
}

/// Default bound on the staleness counter; roughly one second of frames.
pub(crate) const DEFAULT_STALENESS_CAP: u32 = 60;

impl Shape {
    fn base(origin: Point, size: Size, kind: ShapeKind) -> Self {
        Self {
            origin,
            size,
            color: 0,
            mode: DrawMode::Fill,
            line_width: 1.0,
            hover: HoverEffect::Darken,
            kind,
            // Starts at the cap: a shape is not dispatchable until it has
            // been rendered at least once.
            staleness: DEFAULT_STALENESS_CAP,
            staleness_cap: DEFAULT_STALENESS_CAP,
        }
    }

    /// An axis-aligned rectangle.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::base(Point::new(x, y), Size::new(width, height), ShapeKind::Rect)
    }

    /// A full circle centered at `(x, y)`. Stroked by default; callers set
    /// [`DrawMode::Fill`] for a disk.
    pub fn arc(x: f64, y: f64, radius: f64) -> Self {
        let mut s = Self::base(
            Point::new(x, y),
            Size::new(radius * 2.0, radius * 2.0),
            ShapeKind::Arc {
                radius,
                start: 0.0,
                end: core::f64::consts::TAU,
                start_from: StartFrom::Right,
                line_to_center: true,
                close_path: true,
            },
        );
        s.mode = DrawMode::Stroke;
        s
    }

    /// A text box anchored at `(x, y)`. Width is derived from measurement at
    /// hit-test and draw time; height is the font size.
    pub fn text(text: impl Into<String>, x: f64, y: f64, font_size: f64) -> Self {
        Self::base(
            Point::new(x, y),
            Size::new(0.0, font_size),
            ShapeKind::Text {
                text: text.into(),
                font_size,
                font_family: String::from("sans-serif"),
                baseline: Baseline::default(),
                align: TextAlign::default(),
                direction: Direction::default(),
            },
        )
    }

    /// A bitmap drawn into a fixed box.
    pub fn image(source: ImageSource, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::base(
            Point::new(x, y),
            Size::new(width, height),
            ShapeKind::Image { source },
        )
    }

    /// A sprite sequence drawn into a fixed box.
    pub fn sprite(set: SpriteSet, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::base(
            Point::new(x, y),
            Size::new(width, height),
            ShapeKind::Sprite(set),
        )
    }

    /// A container establishing a relative coordinate offset for its
    /// children.
    pub fn group(x: f64, y: f64) -> Self {
        Self::base(Point::new(x, y), Size::ZERO, ShapeKind::Group)
    }

    /// Builder-style configuration, mirroring attach-time setup chains.
    pub fn config(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    /// Move the shape (parent-relative).
    pub fn set_pos(&mut self, x: f64, y: f64) {
        self.origin = Point::new(x, y);
    }

    /// Resize the shape's box. Arcs re-derive their box from the radius at
    /// draw time, so this is a lower bound for them.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = Size::new(width, height);
    }

    /// Change an arc's angular span. No-op for other kinds.
    pub fn set_angle(&mut self, new_start: f64, new_end: f64) {
        if let ShapeKind::Arc { start, end, .. } = &mut self.kind {
            *start = new_start;
            *end = new_end;
        }
    }

    /// Replace a text box's contents. No-op for other kinds.
    pub fn set_text(&mut self, value: impl Into<String>) {
        if let ShapeKind::Text { text, .. } = &mut self.kind {
            *text = value.into();
        }
    }

    /// True when the shape was rendered in the current or immediately
    /// preceding frame. Dispatch uses this as its liveness filter.
    pub fn recently_rendered(&self) -> bool {
        self.staleness <= 1
    }

    /// Current staleness counter value.
    pub fn staleness(&self) -> u32 {
        self.staleness
    }

    pub(crate) fn age(&mut self) {
        self.staleness = self.staleness.saturating_add(1).min(self.staleness_cap);
    }

    pub(crate) fn mark_rendered(&mut self) {
        self.staleness = 0;
    }

    /// Whether this kind participates in the interactive registry.
    pub fn is_interactive(&self) -> bool {
        !matches!(self.kind, ShapeKind::Group)
    }
}

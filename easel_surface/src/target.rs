// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The draw boundary: abstract 2D context, bitmap store, and a recording
//! target for tests and headless drivers.
//!
//! ## Overview
//!
//! The surface never talks to a real canvas; it issues primitive calls
//! through [`DrawTarget`] and resolves bitmap metadata through
//! [`BitmapStore`]. Hosts implement both over whatever 2D context they own.
//! [`RecordingTarget`] implements the trait by appending every call to a
//! list, which is what the tests and demos assert against.

use easel_scene::hit::TextMeasurer;
use easel_scene::{Baseline, BitmapId, Direction, ImageSource, TextAlign};
use kurbo::{Point, Rect, Size};

/// What a bitmap blit draws from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImageRef<'a> {
    /// A URL the host has loaded (or is loading).
    Url(&'a str),
    /// A registered bitmap, e.g. one sprite frame.
    Bitmap(BitmapId),
}

/// An abstract 2D immediate-mode drawing context.
///
/// Covers path construction, fill/stroke with a packed color, measured
/// text, and bitmap blits with an optional brightness filter.
/// `save`/`restore` bracket every shape so style changes never leak.
pub trait DrawTarget: TextMeasurer {
    /// Push the current style state.
    fn save(&mut self);
    /// Pop the style state.
    fn restore(&mut self);
    /// Wipe a region to transparent.
    fn clear_rect(&mut self, rect: Rect);
    /// Start a fresh path.
    fn begin_path(&mut self);
    /// Close the current subpath.
    fn close_path(&mut self);
    /// Append an axis-aligned rectangle to the path.
    fn rect(&mut self, rect: Rect);
    /// Append a circular arc to the path. Angles are radians from the
    /// positive x axis.
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64);
    /// Append a line to the path.
    fn line_to(&mut self, to: Point);
    /// Fill the current path with the fill color.
    fn fill(&mut self);
    /// Stroke the current path with the stroke color and line width.
    fn stroke(&mut self);
    /// Set the fill color from a packed `0xRRGGBB` value.
    fn set_fill_color(&mut self, color: u32);
    /// Set the stroke color from a packed `0xRRGGBB` value.
    fn set_stroke_color(&mut self, color: u32);
    /// Set the stroke width.
    fn set_line_width(&mut self, width: f64);
    /// Set the font used by text draws and measurement.
    fn set_font(&mut self, size: f64, family: &str);
    /// Set baseline/alignment/direction for subsequent text draws.
    fn set_text_style(&mut self, baseline: Baseline, align: TextAlign, direction: Direction);
    /// Fill text at the anchor position.
    fn fill_text(&mut self, text: &str, at: Point);
    /// Stroke text at the anchor position.
    fn stroke_text(&mut self, text: &str, at: Point);
    /// Blit a bitmap into a destination rectangle.
    fn draw_image(&mut self, image: ImageRef<'_>, dest: Rect);
    /// Set a brightness filter for subsequent blits (1.0 = unchanged).
    fn set_brightness(&mut self, fraction: f64);
}

/// Host-side bitmap metadata, forwarded through an explicit, enumerated
/// accessor set (natural dimensions and source URL) rather than any
/// reflective property proxying.
pub trait BitmapStore {
    /// Natural (decoded) dimensions, or `None` until the asset has
    /// materialized. Readiness polling gates on this.
    fn natural_size(&self, source: &ImageSource) -> Option<Size>;
    /// The URL the bitmap came from, when known.
    fn source_url<'a>(&self, source: &'a ImageSource) -> Option<&'a str>;
}

/// A bitmap store with no bitmaps; every image reports unready.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoBitmaps;

impl BitmapStore for NoBitmaps {
    fn natural_size(&self, _source: &ImageSource) -> Option<Size> {
        None
    }

    fn source_url<'a>(&self, source: &'a ImageSource) -> Option<&'a str> {
        match source {
            ImageSource::Url(url) => Some(url),
            ImageSource::Bitmap(_) => None,
        }
    }
}

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs, reason = "Variants mirror the DrawTarget methods one to one.")]
pub enum DrawCall {
    Save,
    Restore,
    ClearRect(Rect),
    BeginPath,
    ClosePath,
    Rect(Rect),
    Arc {
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
    },
    LineTo(Point),
    Fill,
    Stroke,
    FillColor(u32),
    StrokeColor(u32),
    LineWidth(f64),
    Font {
        size: f64,
        family: String,
    },
    TextStyle {
        baseline: Baseline,
        align: TextAlign,
        direction: Direction,
    },
    FillText {
        text: String,
        at: Point,
    },
    StrokeText {
        text: String,
        at: Point,
    },
    DrawImage {
        url: Option<String>,
        bitmap: Option<BitmapId>,
        dest: Rect,
    },
    Brightness(f64),
}

/// A draw target that records calls instead of painting.
///
/// Text metrics are deterministic: half the font size per character, which
/// is close enough to a typical sans-serif for layout-shaped tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingTarget {
    calls: Vec<DrawCall>,
}

impl RecordingTarget {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, in call order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Forget recorded calls (typically between frames under test).
    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl TextMeasurer for RecordingTarget {
    fn measure_text(&self, text: &str, font_size: f64, _font_family: &str) -> f64 {
        text.chars().count() as f64 * font_size * 0.5
    }
}

impl DrawTarget for RecordingTarget {
    fn save(&mut self) {
        self.calls.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        self.calls.push(DrawCall::Restore);
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.calls.push(DrawCall::ClearRect(rect));
    }

    fn begin_path(&mut self) {
        self.calls.push(DrawCall::BeginPath);
    }

    fn close_path(&mut self) {
        self.calls.push(DrawCall::ClosePath);
    }

    fn rect(&mut self, rect: Rect) {
        self.calls.push(DrawCall::Rect(rect));
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        self.calls.push(DrawCall::Arc {
            center,
            radius,
            start,
            end,
        });
    }

    fn line_to(&mut self, to: Point) {
        self.calls.push(DrawCall::LineTo(to));
    }

    fn fill(&mut self) {
        self.calls.push(DrawCall::Fill);
    }

    fn stroke(&mut self) {
        self.calls.push(DrawCall::Stroke);
    }

    fn set_fill_color(&mut self, color: u32) {
        self.calls.push(DrawCall::FillColor(color));
    }

    fn set_stroke_color(&mut self, color: u32) {
        self.calls.push(DrawCall::StrokeColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.calls.push(DrawCall::LineWidth(width));
    }

    fn set_font(&mut self, size: f64, family: &str) {
        self.calls.push(DrawCall::Font {
            size,
            family: family.to_string(),
        });
    }

    fn set_text_style(&mut self, baseline: Baseline, align: TextAlign, direction: Direction) {
        self.calls.push(DrawCall::TextStyle {
            baseline,
            align,
            direction,
        });
    }

    fn fill_text(&mut self, text: &str, at: Point) {
        self.calls.push(DrawCall::FillText {
            text: text.to_string(),
            at,
        });
    }

    fn stroke_text(&mut self, text: &str, at: Point) {
        self.calls.push(DrawCall::StrokeText {
            text: text.to_string(),
            at,
        });
    }

    fn draw_image(&mut self, image: ImageRef<'_>, dest: Rect) {
        let (url, bitmap) = match image {
            ImageRef::Url(u) => (Some(u.to_string()), None),
            ImageRef::Bitmap(id) => (None, Some(id)),
        };
        self.calls.push(DrawCall::DrawImage { url, bitmap, dest });
    }

    fn set_brightness(&mut self, fraction: f64) {
        self.calls.push(DrawCall::Brightness(fraction));
    }
}

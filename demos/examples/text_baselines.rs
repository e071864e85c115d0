// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Every baseline and alignment anchored at the same origin, with the
//! effective hit box each one produces.
//!
//! Run:
//! - `cargo run -p easel_demos --example text_baselines`

use easel_scene::hit::{self, TextMeasurer};
use easel_scene::{Baseline, Direction, Shape, ShapeKind, TextAlign};
use easel_surface::{NoBitmaps, RecordingTarget, Surface};

fn main() {
    let mut surface = Surface::new(800.0, 400.0);
    let mut ctx = RecordingTarget::new();

    let baselines = [
        Baseline::Top,
        Baseline::Hanging,
        Baseline::Middle,
        Baseline::Alphabetic,
        Baseline::Ideographic,
        Baseline::Bottom,
    ];
    let mut shapes = Vec::new();
    for baseline in baselines {
        let id = surface.attach(
            None,
            Shape::text(format!("{baseline:?}"), 400.0, 200.0, 32.0).config(|s| {
                s.color = 0x222222;
                if let ShapeKind::Text { baseline: b, align, direction, .. } = &mut s.kind {
                    *b = baseline;
                    *align = TextAlign::Center;
                    *direction = Direction::Ltr;
                }
            }),
        );
        shapes.push((baseline, id));
    }

    surface.frame(&mut ctx, &NoBitmaps);

    for (baseline, id) in shapes {
        let bbox = hit::bounding_box(surface.scene(), id, &ctx).unwrap();
        let width = ctx.measure_text(&format!("{baseline:?}"), 32.0, "sans-serif");
        println!(
            "{baseline:?}: width {width:.0}, box y {:.1}..{:.1}",
            bbox.y0, bbox.y1
        );
    }
    println!("draw calls recorded: {}", ctx.calls().len());
}

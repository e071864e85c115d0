// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A clickable pac-man driven headlessly through a recording target.
//!
//! The mouth is an arc with a pie slice (`line_to_center` plus
//! `close_path`); clicking it snaps the mouth shut, the `w`/`a`/`s`/`d`
//! keys move it while held.
//!
//! Run:
//! - `cargo run -p easel_demos --example pacman`

use easel_scene::{DrawMode, Shape, ShapeKind, StartFrom};
use easel_surface::{InputEvent, NoBitmaps, PointerButton, RecordingTarget, Surface};

const MOUTH_OPEN: (f64, f64) = (0.6, 5.7);
const MOUTH_SHUT: (f64, f64) = (0.05, 6.25);

fn main() {
    let mut surface = Surface::new(400.0, 300.0);
    let mut ctx = RecordingTarget::new();

    let pacman = surface.attach(
        None,
        Shape::arc(120.0, 150.0, 40.0).config(|s| {
            s.mode = DrawMode::Fill;
            s.color = easel_color::from_components(255, 215, 0);
            s.set_angle(MOUTH_OPEN.0, MOUTH_OPEN.1);
            if let ShapeKind::Arc { start_from, .. } = &mut s.kind {
                *start_from = StartFrom::Right;
            }
        }),
    );

    // Click toggles the mouth between open and shut.
    surface.on_left_click(pacman, |shape| {
        let open = matches!(shape.kind, ShapeKind::Arc { start, .. } if start > 0.1);
        let (start, end) = if open { MOUTH_SHUT } else { MOUTH_OPEN };
        shape.set_angle(start, end);
    });

    // Held keys slide the pac-man around.
    surface.on_key_press(pacman, |shape, keys| {
        let step = 4.0;
        let mut pos = shape.origin;
        if keys.contains("w") {
            pos.y -= step;
        }
        if keys.contains("s") {
            pos.y += step;
        }
        if keys.contains("a") {
            pos.x -= step;
        }
        if keys.contains("d") {
            pos.x += step;
        }
        shape.set_pos(pos.x, pos.y);
    });

    // One frame to materialize the shape, then a click on it.
    surface.frame(&mut ctx, &NoBitmaps);
    surface.handle_event(
        InputEvent::PointerDown {
            x: 120.0,
            y: 150.0,
            button: PointerButton::Left,
            timestamp: 0.0,
        },
        &ctx,
    );
    surface.handle_event(
        InputEvent::PointerUp {
            x: 120.0,
            y: 150.0,
            button: PointerButton::Left,
            timestamp: 16.0,
        },
        &ctx,
    );

    // Hold `d` for a few frames: the pac-man drifts right.
    surface.handle_event(InputEvent::KeyDown { key: "d".into() }, &ctx);
    for _ in 0..10 {
        surface.frame(&mut ctx, &NoBitmaps);
    }
    surface.handle_event(InputEvent::KeyUp { key: "d".into() }, &ctx);

    let shape = surface.scene().shape(pacman).unwrap();
    println!("pac-man now at ({}, {})", shape.origin.x, shape.origin.y);
    if let ShapeKind::Arc { start, end, .. } = shape.kind {
        println!("mouth angles: {start:.2}..{end:.2} (shut after the click)");
    }
    println!("draw calls recorded: {}", ctx.calls().len());
}

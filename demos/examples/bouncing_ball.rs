// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A ball bouncing between two paddles, using `overlap` for the bounces.
//!
//! Run:
//! - `cargo run -p easel_demos --example bouncing_ball`

use easel_scene::hit;
use easel_scene::{DrawMode, Shape};
use easel_surface::{NoBitmaps, RecordingTarget, Surface};

fn main() {
    let mut surface = Surface::new(640.0, 360.0);
    let mut ctx = RecordingTarget::new();

    let left_wall = surface.attach(
        None,
        Shape::rect(10.0, 0.0, 10.0, 360.0).config(|s| {
            s.mode = DrawMode::Fill;
            s.color = 0x336699;
        }),
    );
    let right_wall = surface.attach(
        None,
        Shape::rect(620.0, 0.0, 10.0, 360.0).config(|s| {
            s.mode = DrawMode::Fill;
            s.color = 0x336699;
        }),
    );
    let ball = surface.attach(
        None,
        Shape::arc(320.0, 180.0, 12.0).config(|s| {
            s.mode = DrawMode::Fill;
            s.color = 0xCC3333;
        }),
    );

    let mut velocity = 9.0_f64;
    let mut bounces = 0;
    for frame in 0..240 {
        surface.config(ball, |s| {
            let p = s.origin;
            s.set_pos(p.x + velocity, p.y);
        });
        let scene = surface.scene();
        let hit_left = hit::overlap(scene, ball, left_wall) == Some(true);
        let hit_right = hit::overlap(scene, ball, right_wall) == Some(true);
        if hit_left || hit_right {
            velocity = -velocity;
            bounces += 1;
            println!(
                "frame {frame}: bounce #{bounces} off the {} wall",
                if hit_left { "left" } else { "right" }
            );
        }
        surface.frame(&mut ctx, &NoBitmaps);
        ctx.reset();
    }

    let resting = surface.scene().shape(ball).unwrap().origin;
    println!("{bounces} bounces; ball resting at ({:.0}, {:.0})", resting.x, resting.y);
}

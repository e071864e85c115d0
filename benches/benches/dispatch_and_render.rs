// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use easel_scene::hit::{self, AxisPoint, NoText};
use easel_scene::{DrawMode, Shape};
use easel_surface::{InputEvent, NoBitmaps, PointerButton, RecordingTarget, Surface};

/// A populated surface: `n × n` rects in a grid plus one arc per row.
fn grid_surface(n: usize, cell: f64) -> Surface {
    let mut surface = Surface::new(n as f64 * cell, n as f64 * cell);
    for y in 0..n {
        for x in 0..n {
            surface.attach(
                None,
                Shape::rect(x as f64 * cell, y as f64 * cell, cell, cell).config(|s| {
                    s.mode = DrawMode::Fill;
                    s.color = 0x446688;
                }),
            );
        }
        surface.attach(
            None,
            Shape::arc(cell / 2.0, y as f64 * cell + cell / 2.0, cell / 3.0),
        );
    }
    surface
}

fn bench_hit_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_queries");
    for n in [8_usize, 32] {
        let mut surface = grid_surface(n, 16.0);
        let mut ctx = RecordingTarget::new();
        surface.frame(&mut ctx, &NoBitmaps);
        let registry = surface.scene().registry();
        group.throughput(Throughput::Elements(registry.len() as u64));
        group.bench_function(format!("is_under_{n}x{n}"), |b| {
            let sample = AxisPoint::at(24.0, 24.0);
            b.iter(|| {
                let mut hits = 0_u32;
                for &id in &registry {
                    if hit::is_under(surface.scene(), id, sample, &NoText) == Some(true) {
                        hits += 1;
                    }
                }
                black_box(hits)
            });
        });
    }
    group.finish();
}

fn bench_click_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("click_dispatch");
    for n in [8_usize, 32] {
        group.bench_function(format!("full_click_{n}x{n}"), |b| {
            b.iter_batched(
                || {
                    let mut surface = grid_surface(n, 16.0);
                    let mut ctx = RecordingTarget::new();
                    surface.frame(&mut ctx, &NoBitmaps);
                    let target = surface.scene().registry()[0];
                    surface.on_left_click(target, |s| s.color = 0xFF0000);
                    (surface, ctx)
                },
                |(mut surface, ctx)| {
                    surface.handle_event(
                        InputEvent::PointerDown {
                            x: 4.0,
                            y: 4.0,
                            button: PointerButton::Left,
                            timestamp: 0.0,
                        },
                        &ctx,
                    );
                    surface.handle_event(
                        InputEvent::PointerUp {
                            x: 4.0,
                            y: 4.0,
                            button: PointerButton::Left,
                            timestamp: 16.0,
                        },
                        &ctx,
                    );
                    black_box(surface)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    for n in [8_usize, 32] {
        let mut surface = grid_surface(n, 16.0);
        let mut ctx = RecordingTarget::new();
        group.bench_function(format!("tick_clear_render_{n}x{n}"), |b| {
            b.iter(|| {
                ctx.reset();
                surface.frame(&mut ctx, &NoBitmaps);
                black_box(ctx.calls().len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hit_queries, bench_click_dispatch, bench_frame);
criterion_main!(benches);

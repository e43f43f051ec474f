// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for focus-tree navigation and registration churn.
//!
//! The synthetic scene is a TV-style home screen: `rows` horizontal shelves,
//! each holding `cols` equally sized tiles.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Rect;
use std::time::Duration;
use understory_focus_tree::{Direction, FocusManager, FocusableNode};

const TILE_W: f64 = 120.0;
const TILE_H: f64 = 80.0;
const GAP: f64 = 16.0;

fn shelf_rect(row: u32, cols: u32) -> Rect {
    let y = f64::from(row) * (TILE_H + GAP);
    Rect::new(0.0, y, f64::from(cols) * (TILE_W + GAP), y + TILE_H)
}

fn tile_rect(row: u32, col: u32) -> Rect {
    let x = f64::from(col) * (TILE_W + GAP);
    let y = f64::from(row) * (TILE_H + GAP);
    Rect::new(x, y, x + TILE_W, y + TILE_H)
}

fn build_shelves(rows: u32, cols: u32) -> FocusManager<u32> {
    let mut focus = FocusManager::new();
    for row in 0..rows {
        focus
            .register(&[], FocusableNode::new(row, shelf_rect(row, cols)))
            .unwrap();
        for col in 0..cols {
            focus
                .register(&[row], FocusableNode::new(col, tile_rect(row, col)))
                .unwrap();
        }
    }
    focus
}

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("focus_tree/move");
    group.measurement_time(Duration::from_secs(3));

    for (rows, cols) in [(4_u32, 8_u32), (8, 32), (16, 128)] {
        let label = format!("{rows}x{cols}");
        group.throughput(Throughput::Elements(u64::from(cols)));

        // Sweep one shelf left to right: sibling-level moves only.
        group.bench_function(BenchmarkId::new("sweep_right", &label), |b| {
            b.iter_batched(
                || build_shelves(rows, cols),
                |mut focus| {
                    while focus.move_focus(Direction::Right) {}
                    black_box(focus.focus_path().len());
                },
                BatchSize::LargeInput,
            );
        });

        // Down/up across shelves: every move climbs to the root and re-enters.
        group.bench_function(BenchmarkId::new("shelf_hops", &label), |b| {
            let mut focus = build_shelves(rows, cols);
            b.iter(|| {
                while focus.move_focus(Direction::Down) {}
                while focus.move_focus(Direction::Up) {}
                black_box(focus.focus_path().len());
            });
        });
    }
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("focus_tree/churn");

    for cols in [16_u32, 128, 1_024] {
        group.throughput(Throughput::Elements(u64::from(cols)));

        // Remount a whole shelf while focus sits inside it.
        group.bench_with_input(BenchmarkId::new("remount_shelf", cols), &cols, |b, &cols| {
            let mut focus = build_shelves(2, cols);
            b.iter(|| {
                focus.unregister(&[0]).unwrap();
                focus
                    .register(&[], FocusableNode::new(0, shelf_rect(0, cols)))
                    .unwrap();
                for col in 0..cols {
                    focus
                        .register(&[0], FocusableNode::new(col, tile_rect(0, col)))
                        .unwrap();
                }
                focus.set_focus(&[0]).unwrap();
                black_box(focus.tree().len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_moves, bench_churn);
criterion_main!(benches);

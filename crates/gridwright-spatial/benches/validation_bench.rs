//! Criterion benchmarks for footprint validation and overlay writes.

use criterion::{Criterion, criterion_group, criterion_main};
use gridwright_spatial::{Cell, Extent, OccupancyField, PlaceableFootprint, TileClass, evaluate};
use std::hint::black_box;

fn make_field() -> OccupancyField {
    let mut field = OccupancyField::with_empty_area(Cell::flat(0, 0), Extent::flat(128, 128));
    for i in 0..128 {
        field.paint_cell(Cell::flat(i, i), TileClass::Impossible);
    }
    field
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");
    group.sample_size(50);

    // Benchmark: evaluate an 8x8 footprint at 100 positions.
    group.bench_function("evaluate_8x8_sweep_100", |b| {
        let field = make_field();
        let fp = PlaceableFootprint::new(Cell::flat(0, 0), Extent::flat(8, 8));
        b.iter(|| {
            for step in 0..100 {
                let moved = fp.at(Cell::flat(step, 100 - step));
                black_box(evaluate(&moved, &field));
            }
        });
    });

    // Benchmark: the per-move clear/evaluate/write cycle a drag performs.
    group.bench_function("follow_cycle_4x4_drag_100", |b| {
        b.iter(|| {
            let mut field = make_field();
            let mut drawn: Option<PlaceableFootprint> = None;
            let fp = PlaceableFootprint::new(Cell::flat(0, 0), Extent::flat(4, 4));
            for step in 0..100 {
                if let Some(prev) = drawn.take() {
                    field.clear_overlay_block(prev.origin, prev.extent);
                }
                let moved = fp.at(Cell::flat(step, 10));
                let eval = evaluate(&moved, &field);
                field.set_overlay_block(moved.origin, moved.extent, &eval.overlay_tiles());
                drawn = Some(moved);
            }
            black_box(field);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_validation);
criterion_main!(benches);

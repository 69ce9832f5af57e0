//! Benchmarks for cascade propagation and tile distribution.
//!
//! Run with:
//! `cargo bench -p fold-widgets --bench cascade_bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fold_core::{FoldDirection, Rect, Size};
use fold_render::{PackedRgba, Raster, Renderable};
use fold_widgets::CascadeStack;
use std::hint::black_box;

const SWEEP_STEPS: usize = 200;

struct Solid(Size);

impl Renderable for Solid {
    fn size(&self) -> Size {
        self.0
    }

    fn draw(&self, target: &mut Raster, _scale: f64) {
        target.fill_rect(0, 0, target.width(), target.height(), PackedRgba::WHITE);
    }
}

fn bench_unfold_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade/unfold_sweep");
    group.throughput(Throughput::Elements(SWEEP_STEPS as u64));

    for folds in [1_usize, 3, 8] {
        let width = 320.0;
        let mut stack = CascadeStack::new(
            Rect::new(0.0, 0.0, width, 480.0),
            FoldDirection::HorizontalRightToLeft,
            folds,
            0.5,
        );
        group.bench_function(BenchmarkId::new("panels", folds), |b| {
            b.iter(|| {
                for step in 0..=SWEEP_STEPS {
                    let offset = -width * step as f64 / SWEEP_STEPS as f64;
                    black_box(stack.unfold(offset));
                }
                black_box(stack.visible_extent());
            });
        });
    }

    group.finish();
}

fn bench_set_content(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade/set_content");

    for folds in [2_usize, 6] {
        let size = Size::new(320.0, 480.0);
        let mut stack = CascadeStack::new(Rect::from_size(size), FoldDirection::Vertical, folds, 0.0);
        group.throughput(Throughput::Elements((size.width * size.height) as u64));
        group.bench_function(BenchmarkId::new("capture_and_slice", folds), |b| {
            b.iter(|| {
                stack.set_content(Box::new(Solid(size)));
                black_box(stack.last_raster().map(Raster::width));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_unfold_sweep, bench_set_content);
criterion_main!(benches);

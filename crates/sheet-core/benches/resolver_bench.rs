//! Benchmark: position resolution and settle curve evaluation.
//!
//! Run with: `cargo bench -p sheet-core --bench resolver_bench`
//!
//! Drag release runs the resolver once, but settle animations evaluate the
//! spring curve every frame, so both sit on the per-frame path.

use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sheet_core::animation::{Animation, AnimationConfig, OffsetAnimation};
use sheet_core::position::{CoverageConfig, Position, position_for_coverage, position_for_offset};

fn bench_resolver(c: &mut Criterion) {
    let config = CoverageConfig::default();
    let coverages: Vec<f64> = (0..1024).map(|i| f64::from(i) / 512.0 - 0.5).collect();

    c.bench_function("position_for_coverage/1024", |b| {
        b.iter(|| {
            for &coverage in &coverages {
                black_box(position_for_coverage(black_box(coverage), &config));
            }
        });
    });

    c.bench_function("position_for_offset/1024", |b| {
        b.iter(|| {
            for &coverage in &coverages {
                black_box(position_for_offset(black_box(coverage * 1000.0), 1000.0, &config));
            }
        });
    });
}

fn bench_settle_animation(c: &mut Criterion) {
    let config = AnimationConfig::default();
    let frame = Duration::from_millis(16);

    c.bench_function("offset_animation/settle_60fps", |b| {
        b.iter(|| {
            let mut anim = OffsetAnimation::new(1000.0, 500.0, Position::Collapsed, 1, &config);
            while !anim.is_complete() {
                anim.tick(frame);
                black_box(anim.value());
            }
        });
    });
}

criterion_group!(benches, bench_resolver, bench_settle_animation);
criterion_main!(benches);

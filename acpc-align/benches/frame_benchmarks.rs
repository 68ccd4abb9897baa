//! Benchmarks for ACPC frame construction

use acpc_align::{align_markups, AcpcLandmarks, AlignOptions, CoordinateFrameBuilder};
use acpc_core::Point3d;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sample_landmarks() -> AcpcLandmarks {
    AcpcLandmarks {
        ac: Point3d::new(0.8, 21.3, -4.1),
        pc: Point3d::new(-0.4, -4.9, -2.7),
        ih: Point3d::new(1.5, 8.0, 35.2),
    }
}

fn bench_build(c: &mut Criterion) {
    let builder = CoordinateFrameBuilder::default();
    let l = sample_landmarks();

    c.bench_function("build_acpc_transform", |b| {
        b.iter(|| builder.build(black_box(&l.ac), black_box(&l.pc), black_box(&l.ih)))
    });
}

fn bench_align_markups(c: &mut Criterion) {
    let list = sample_landmarks().to_point_cloud();
    let options = AlignOptions::default();

    c.bench_function("align_markups_harden", |b| {
        b.iter(|| {
            let mut markups = list.clone();
            align_markups(black_box(&mut markups), &options)
        })
    });
}

criterion_group!(benches, bench_build, bench_align_markups);
criterion_main!(benches);

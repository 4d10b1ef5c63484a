//! Benchmarks for transform precomputation and frame evaluation

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use acclaim_amc::parse_motion;
use acclaim_asf::parse_skeleton;
use acclaim_fk::{ForwardKinematics, static_pose};

const WALK_ASF: &str = include_str!("../../../test-data/walk.asf");
const WALK_AMC: &str = include_str!("../../../test-data/walk.amc");

fn bench_prepare(c: &mut Criterion) {
    let skeleton = parse_skeleton(WALK_ASF).unwrap();

    c.bench_function("prepare_transforms", |b| {
        b.iter(|| ForwardKinematics::new(black_box(skeleton.clone())).unwrap())
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let skeleton = parse_skeleton(WALK_ASF).unwrap();
    let motion = parse_motion(WALK_AMC, &skeleton).unwrap();
    let fk = ForwardKinematics::new(skeleton.clone()).unwrap();
    let frame = motion.frame(1).unwrap();

    let mut group = c.benchmark_group("evaluate");
    group.bench_function("single_frame", |b| {
        b.iter(|| fk.evaluate(black_box(frame)).unwrap())
    });
    group.bench_function("all_frames", |b| {
        b.iter(|| fk.evaluate_all(black_box(&motion)).unwrap())
    });
    group.bench_function("static_pose", |b| {
        b.iter(|| static_pose(black_box(&skeleton)))
    });
    group.finish();
}

criterion_group!(benches, bench_prepare, bench_evaluate);
criterion_main!(benches);

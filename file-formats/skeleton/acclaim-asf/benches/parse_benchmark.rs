//! Benchmarks for the ASF parser

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use acclaim_asf::{parse_skeleton, validate_skeleton};

const WALK_ASF: &str = include_str!("../../../../test-data/walk.asf");

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_asf", |b| {
        b.iter(|| parse_skeleton(black_box(WALK_ASF)).unwrap())
    });
}

fn bench_validate(c: &mut Criterion) {
    let skeleton = parse_skeleton(WALK_ASF).unwrap();

    c.bench_function("validate_asf", |b| {
        b.iter(|| validate_skeleton(black_box(&skeleton)))
    });
}

criterion_group!(benches, bench_parse, bench_validate);
criterion_main!(benches);

use criterion::{Criterion, criterion_group, criterion_main};
use latin_sat::cnf::dimacs::to_dimacs_string;
use latin_sat::latin::encode::{graeco_cnf, latin_cnf};
use std::hint::black_box;

fn bench_latin_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("latin_cnf");
    for n in [8, 16, 32] {
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| latin_cnf(black_box(n), &[]).unwrap());
        });
    }
    group.finish();
}

fn bench_graeco_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("graeco_cnf");
    for n in [4, 6, 8] {
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| graeco_cnf(black_box(n), &[]).unwrap());
        });
    }
    group.finish();
}

fn bench_dimacs_serialization(c: &mut Criterion) {
    let cnf = latin_cnf(16, &[]).unwrap();
    c.bench_function("dimacs n=16", |b| {
        b.iter(|| to_dimacs_string(black_box(&cnf)));
    });
}

criterion_group!(
    benches,
    bench_latin_encoding,
    bench_graeco_encoding,
    bench_dimacs_serialization
);
criterion_main!(benches);

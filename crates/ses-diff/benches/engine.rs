use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ses_diff::{diff, diff_lines};

fn near_identical(c: &mut Criterion) {
    let mut group = c.benchmark_group("near_identical");
    for size in [1_000usize, 10_000, 100_000] {
        let old: Vec<u32> = (0..size as u32).collect();
        let mut new = old.clone();
        for i in (0..size).step_by(97) {
            new[i] = u32::MAX;
        }
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| diff(black_box(old.as_slice()), black_box(new.as_slice())))
        });
    }
    group.finish();
}

fn disjoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("disjoint");
    for size in [100usize, 1_000] {
        let old = vec![0u8; size];
        let new = vec![1u8; size];
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| diff(black_box(old.as_slice()), black_box(new.as_slice())))
        });
    }
    group.finish();
}

fn source_lines(c: &mut Criterion) {
    let old: String = (0..2_000).map(|i| format!("let x{i} = {i};\n")).collect();
    let new: String = (0..2_000)
        .map(|i| {
            if i % 50 == 0 {
                format!("let y{i} = {i} * 2;\n")
            } else {
                format!("let x{i} = {i};\n")
            }
        })
        .collect();
    c.bench_function("lines_2000", |b| {
        b.iter(|| diff_lines(black_box(&old), black_box(&new), false))
    });
}

criterion_group!(benches, near_identical, disjoint, source_lines);
criterion_main!(benches);

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use orrery_angles::{normalize_deg, signed_diff_deg, unsigned_diff_deg};

fn angle_kernels_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("angles");
    group.bench_function("normalize_deg", |b| {
        b.iter(|| normalize_deg(black_box(-123456.789)))
    });
    group.bench_function("signed_diff_deg", |b| {
        b.iter(|| signed_diff_deg(black_box(359.9), black_box(0.1)))
    });
    group.bench_function("unsigned_diff_deg", |b| {
        b.iter(|| unsigned_diff_deg(black_box(12.25), black_box(301.5)))
    });
    group.finish();
}

criterion_group!(benches, angle_kernels_bench);
criterion_main!(benches);

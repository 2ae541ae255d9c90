use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use timeline_core::geometry::{cumulative_lengths, Point};
use timeline_core::{layout_milestones, LayoutParams, Milestone};

fn gen_milestones(n: usize) -> Vec<Milestone> {
    let origin = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
    (0..n)
        .map(|i| Milestone::new(origin + chrono::Duration::days((i * 37 % 11_000) as i64), "m"))
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for &n in &[100usize, 10_000usize] {
        let mut ms = gen_milestones(n);
        ms.sort_by_key(|m| m.date);
        let origin = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}")), &n, |b, _| {
            b.iter_batched(
                || ms.clone(),
                |mut m| {
                    layout_milestones(&mut m, |d| (d - origin).num_days() as f64 * 0.1, 350.0, &LayoutParams::default());
                    black_box(m)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_cumulative(c: &mut Criterion) {
    let pts: Vec<Point> = (0..100_000).map(|i| Point::new(i as f64, (i as f64 * 0.01).sin() * 50.0)).collect();
    c.bench_function("cumulative_lengths_100k", |b| b.iter(|| black_box(cumulative_lengths(&pts))));
}

criterion_group!(benches, bench_layout, bench_cumulative);
criterion_main!(benches);

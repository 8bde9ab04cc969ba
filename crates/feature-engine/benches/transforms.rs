use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use feature_engine::{prepare_customers, prepare_transactions};
use polars::prelude::*;
use rand::prelude::*;

fn synthetic_transactions(n_rows: usize) -> DataFrame {
    let mut rng = rand::thread_rng();

    let dates: Vec<String> = (0..n_rows)
        .map(|_| {
            format!(
                "{:04}-{:02}-{:02}",
                rng.gen_range(2018..=2020),
                rng.gen_range(1..=12),
                rng.gen_range(1..=28)
            )
        })
        .collect();
    let article_ids: Vec<i64> = (0..n_rows).map(|_| rng.gen_range(100_000_000..999_999_999)).collect();
    let prices: Vec<f64> = (0..n_rows).map(|_| rng.gen_range(0.01..0.5)).collect();

    DataFrame::new(vec![
        Series::new("t_dat".into(), dates).into(),
        Series::new("article_id".into(), article_ids).into(),
        Series::new("price".into(), prices).into(),
    ])
    .unwrap()
}

fn synthetic_customers(n_rows: usize) -> DataFrame {
    let mut rng = rand::thread_rng();

    let ids: Vec<String> = (0..n_rows).map(|i| format!("c-{i}")).collect();
    let status: Vec<Option<&str>> = (0..n_rows)
        .map(|_| if rng.gen_bool(0.9) { Some("ACTIVE") } else { None })
        .collect();
    let ages: Vec<Option<f64>> = (0..n_rows)
        .map(|_| {
            if rng.gen_bool(0.95) {
                Some(rng.gen_range(16.0..90.0))
            } else {
                None
            }
        })
        .collect();

    DataFrame::new(vec![
        Series::new("customer_id".into(), ids).into(),
        Series::new("club_member_status".into(), status).into(),
        Series::new("age".into(), ages).into(),
    ])
    .unwrap()
}

fn bench_transactions(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare_transactions");

    for n_rows in [1_000, 10_000, 100_000].iter() {
        let df = synthetic_transactions(*n_rows);
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &df, |b, df| {
            b.iter(|| prepare_transactions(black_box(df)).unwrap())
        });
    }

    group.finish();
}

fn bench_customers(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare_customers");

    for n_rows in [1_000, 10_000, 100_000].iter() {
        let df = synthetic_customers(*n_rows);
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &df, |b, df| {
            b.iter(|| prepare_customers(black_box(df)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transactions, bench_customers);
criterion_main!(benches);

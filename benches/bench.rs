// Criterion benchmarks for Hotel Recommender

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hotel_recommender::core::{generate_mock_hotels, hard_filter, Recommender};
use hotel_recommender::core::scoring::{compute_score, price_fit};
use hotel_recommender::models::{Hotel, Purpose, ScoringParams, UserInput};

fn create_input() -> UserInput {
    UserInput {
        district: "Quận 3".to_string(),
        budget_min: 900_000.0,
        budget_max: 1_400_000.0,
        purpose: Purpose::Business,
        check_in: NaiveDate::from_ymd_opt(2025, 11, 14).unwrap(),
        check_out: NaiveDate::from_ymd_opt(2025, 11, 15).unwrap(),
    }
}

fn bench_price_fit(c: &mut Criterion) {
    let params = ScoringParams::default();

    c.bench_function("price_fit", |b| {
        b.iter(|| {
            price_fit(
                black_box(1_550_000.0),
                black_box(900_000.0),
                black_box(1_400_000.0),
                black_box(&params),
            )
        });
    });
}

fn bench_compute_score(c: &mut Criterion) {
    let params = ScoringParams::default();
    let input = create_input();
    let hotel = Hotel::new(1, "Bench Hotel", "Quận 3", 1_250_000.0, 8.4);

    c.bench_function("compute_score", |b| {
        b.iter(|| {
            compute_score(
                black_box(&hotel),
                black_box(&input),
                input.budget_min,
                input.budget_max,
                &params,
            )
        });
    });
}

fn bench_recommend(c: &mut Criterion) {
    let recommender = Recommender::with_default_params();
    let input = create_input();

    let mut group = c.benchmark_group("recommend");

    for hotel_count in [10, 50, 100, 500, 1000].iter() {
        let hotels = generate_mock_hotels(*hotel_count, 42);

        group.bench_with_input(
            BenchmarkId::new("recommend", hotel_count),
            hotel_count,
            |b, _| {
                b.iter(|| recommender.recommend(black_box(&hotels), black_box(&input), black_box(5)));
            },
        );
    }

    group.finish();
}

fn bench_hard_filter(c: &mut Criterion) {
    let input = create_input();
    let hotels = generate_mock_hotels(1000, 42);

    c.bench_function("hard_filter_1000_hotels", |b| {
        b.iter(|| black_box(hard_filter(&hotels, &input)).len());
    });
}

criterion_group!(
    benches,
    bench_price_fit,
    bench_compute_score,
    bench_recommend,
    bench_hard_filter
);

criterion_main!(benches);

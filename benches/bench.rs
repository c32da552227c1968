// Criterion benchmarks for SmartSeek

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use geo::Point;
use smartseek::core::{NearbyFinder, distance::{bearing, haversine_distance}, ranker::rank_by_distance};
use smartseek::models::{GeoPoint, UserRecord};

fn create_candidate(id: usize, lat: f64, lon: f64) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        name: Some(format!("User {}", id)),
        headline: Some("Engineer".to_string()),
        profile_image: None,
        // Mix both storage conventions
        location: Some(format!("{},{}", lat, lon)),
        coords: if id % 2 == 0 { Some(GeoPoint::new(lon, lat)) } else { None },
        is_anonymous: Some(id % 5 == 0),
        last_location_update: None,
    }
}

fn create_candidates(count: usize) -> Vec<UserRecord> {
    (0..count)
        .map(|i| {
            let lat_offset = (i as f64 * 0.001) % 0.5;
            let lon_offset = (i as f64 * 0.0007) % 0.5;
            create_candidate(i, 40.7128 + lat_offset, -74.0060 + lon_offset)
        })
        .collect()
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(40.7128),
                black_box(-74.0060),
                black_box(40.72),
                black_box(-74.01),
            )
        });
    });
}

fn bench_bearing(c: &mut Criterion) {
    c.bench_function("bearing", |b| {
        b.iter(|| {
            bearing(
                black_box(40.7128),
                black_box(-74.0060),
                black_box(40.72),
                black_box(-74.01),
            )
        });
    });
}

fn bench_find_nearby(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_nearby");
    let finder = NearbyFinder::default();

    for candidate_count in [100, 500, 1000].iter() {
        let candidates = create_candidates(*candidate_count);

        group.bench_with_input(
            BenchmarkId::new("find_nearby", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    finder.find_nearby(
                        black_box(candidates.clone()),
                        black_box(40.7128),
                        black_box(-74.0060),
                        black_box(25.0),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_ranking_only(c: &mut Criterion) {
    let candidates = create_candidates(500);
    let reference = Point::new(-74.0060, 40.7128);

    c.bench_function("rank_by_distance_500_candidates", |b| {
        b.iter(|| {
            rank_by_distance(
                black_box(candidates.clone()),
                black_box(reference),
                black_box(25.0),
                false,
            )
        });
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_bearing,
    bench_find_nearby,
    bench_ranking_only
);

criterion_main!(benches);

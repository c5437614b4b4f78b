//! Criterion benchmarks for the ranking pipelines.
//!
//! Measures ranking time across batch sizes (50, 100, 200 candidates) to
//! track performance and detect regressions.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package huddle-ranker
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use geo::Coord;
use huddle_core::{GroupCandidate, MemoryGroupSource, MemoryInterestSource};
use huddle_ranker::{InterestRanker, InterestRequest, PopularityRanker, PopularityRequest};

/// Batch sizes to benchmark: 50, 100, 200 candidate groups.
const BATCH_SIZES: &[usize] = &[50, 100, 200];

/// Deterministic candidate batch clustered around the origin.
fn generate_groups(count: usize) -> Vec<GroupCandidate> {
    const TAG_POOL: &[&str] = &["java", "spring", "python", "rust", "algorithms", "statistics"];
    (1_u32..)
        .take(count)
        .zip(TAG_POOL.iter().cycle())
        .map(|(id, tag)| {
            let step = f64::from(id % 90) * 0.0002;
            GroupCandidate::new(
                u64::from(id),
                format!("group-{id}"),
                Coord { x: step, y: step },
            )
            .with_members(id % 40, 40)
            .with_tags([*tag, "study"])
        })
        .collect()
}

fn bench_popularity_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("popularity_ranking");
    for &size in BATCH_SIZES {
        group.throughput(Throughput::Elements(size as u64));
        let source = MemoryGroupSource::with_groups(generate_groups(size));
        let ranker = PopularityRanker::new(source);
        let request = PopularityRequest::new(Coord { x: 0.0, y: 0.0 })
            .with_radius_km(50.0)
            .with_limit(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &request, |b, request| {
            b.iter(|| ranker.rank(request).expect("rank benchmark batch"));
        });
    }
    group.finish();
}

fn bench_interest_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("interest_ranking");
    for &size in BATCH_SIZES {
        group.throughput(Throughput::Elements(size as u64));
        let source = MemoryGroupSource::with_groups(generate_groups(size));
        let interests = MemoryInterestSource::new().with_tags(1, ["java", "rust", "statistics"]);
        let ranker = InterestRanker::new(source, interests);
        let request = InterestRequest::new(1, Coord { x: 0.0, y: 0.0 }).with_radius_km(50.0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &request, |b, request| {
            b.iter(|| ranker.rank(request).expect("rank benchmark batch"));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_popularity_ranking, bench_interest_ranking);
criterion_main!(benches);

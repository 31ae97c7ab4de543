use centered_itree::IntervalTree;
use criterion::{
    measurement::Measurement, BatchSize, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};

use crate::Lfsr;

#[derive(Debug, Clone, Copy)]
struct BenchName {
    bench: &'static str,
    n_values: usize,
    n_lookups: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(
            format!("{}_values_{}_n_lookups", v.n_values, v.bench),
            v.n_lookups,
        )
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("query");

    // Tree size
    for n_values in [1_000, 10_000] {
        // Number of lookups
        for n_lookups in [100, 1_000] {
            bench_param(&mut g, n_values, n_lookups)
        }
    }
}

/// For a tree containing `n_values`, perform two benchmarks that each perform
/// `n_lookups`, one issuing stabbing queries and one issuing range queries.
fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize, n_lookups: usize)
where
    M: Measurement,
{
    let mut rand = Lfsr::default();
    let t = IntervalTree::build(rand.sorted_intervals(n_values)).unwrap();

    let bench_name = BenchName {
        bench: "point",
        n_values,
        n_lookups,
    };

    g.throughput(Throughput::Elements(n_lookups as _)); // Lookups per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            // Continue the LFSR sequence after generating the tree contents.
            || rand.clone(),
            |mut rand| {
                let mut hits = 0;
                for _ in 0..n_lookups {
                    let point = rand.next() as i64;
                    hits += t.query_point(point).map(|v| v.matches().len()).unwrap_or(0);
                }
                hits
            },
            BatchSize::SmallInput,
        )
    });

    let bench_name = BenchName {
        bench: "range",
        n_values,
        n_lookups,
    };

    g.throughput(Throughput::Elements(n_lookups as _)); // Lookups per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || rand.clone(),
            |mut rand| {
                let mut hits = 0;
                for _ in 0..n_lookups {
                    // Narrow ranges, so results are not dominated by merging
                    // the payloads of the whole tree.
                    let start = rand.next() as i64;
                    let end = start + (rand.next() % 64) as i64;
                    hits += t
                        .query_range(start, end)
                        .map(|v| v.matches().len())
                        .unwrap_or(0);
                }
                hits
            },
            BatchSize::SmallInput,
        )
    });
}

use centered_itree::IntervalTree;
use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};

use crate::Lfsr;

#[derive(Debug, Clone, Copy)]
struct BenchName {
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new("n_values", v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("build");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

/// Measure the time needed to build a tree from `n_values` randomly generated
/// intervals, pre-sorted by lower bound.
fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let input = Lfsr::default().sorted_intervals(n_values);

    let bench_name = BenchName { n_values };
    g.throughput(Throughput::Elements(n_values as _)); // Intervals indexed per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || input.clone(),
            |input| IntervalTree::build(input).unwrap(),
            criterion::BatchSize::SmallInput,
        );
    });
}

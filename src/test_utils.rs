use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::interval::Interval;

const BOUND_MAX: i64 = 40;

/// Generate arbitrary valid intervals with bounds from [-[`BOUND_MAX`],
/// [`BOUND_MAX`]) carrying a single small payload value.
///
/// A small payload domain encourages payload collisions between intervals.
pub(crate) fn arbitrary_interval() -> impl Strategy<Value = Interval<usize>> {
    (-BOUND_MAX..BOUND_MAX, -BOUND_MAX..BOUND_MAX, 0..50_usize).prop_map(|(a, b, v)| {
        Interval::new(a.min(b), a.max(b), v)
    })
}

/// Generate a query point or range bound within, and slightly beyond, the
/// bounds used by [`arbitrary_interval()`].
pub(crate) fn arbitrary_bound() -> impl Strategy<Value = i64> {
    -BOUND_MAX - 2..BOUND_MAX + 2
}

/// Compute the expected result of a range query over `values` by linear scan.
///
/// Returns [`None`] if no interval intersects `[start, end]`.
pub(crate) fn model_query(
    values: &[Interval<usize>],
    start: i64,
    end: i64,
) -> Option<(i64, i64, BTreeSet<usize>)> {
    values
        .iter()
        .filter(|v| !(v.end() < start || v.start() > end))
        .fold(None, |acc, v| {
            let (lo, hi, mut set) =
                acc.unwrap_or_else(|| (v.start(), v.end(), BTreeSet::new()));
            set.extend(v.matches().iter().copied());
            Some((lo.min(v.start()), hi.max(v.end()), set))
        })
}

/// Flatten a query result into a comparable tuple.
pub(crate) fn flatten(v: Option<Interval<usize>>) -> Option<(i64, i64, BTreeSet<usize>)> {
    v.map(|v| {
        (
            v.start(),
            v.end(),
            v.matches().iter().copied().collect::<BTreeSet<_>>(),
        )
    })
}

use std::fmt::Display;

use crate::payload::{Comparator, PayloadSet};

/// A closed interval `[start, end]` carrying a set of payload values.
///
/// An [`Interval`] is both the unit of input to an
/// [`IntervalTree`](crate::IntervalTree) and the merged result of a query,
/// where the bounds span every matched interval and the payload set is the
/// union of their payloads.
///
/// The caller must ensure `start <= end`; the tree rejects inverted intervals
/// at build time.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(deserialize = "T: serde::Deserialize<'de> + Ord"))
)]
pub struct Interval<T> {
    start: i64,
    end: i64,
    set: PayloadSet<T>,
}

impl<T> Interval<T>
where
    T: Ord,
{
    /// Construct an interval holding the single payload `value`, ordered by
    /// the natural [`Ord`] ordering of `T`.
    pub fn new(start: i64, end: i64, value: T) -> Self {
        Self::new_by(start, end, value, T::cmp)
    }

    /// Construct the degenerate interval `[index, index]`.
    pub fn point(index: i64, value: T) -> Self {
        Self::new(index, index, value)
    }
}

impl<T> Interval<T> {
    /// Construct an interval holding the single payload `value`, with the
    /// payload set ordered by `cmp`.
    pub fn new_by(start: i64, end: i64, value: T, cmp: Comparator<T>) -> Self {
        let mut set = PayloadSet::new_by(cmp);
        set.insert(value);
        Self { start, end, set }
    }

    pub fn from_set(start: i64, end: i64, set: PayloadSet<T>) -> Self {
        Self { start, end, set }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// The payload values associated with this interval.
    pub fn matches(&self) -> &PayloadSet<T> {
        &self.set
    }

    pub fn into_matches(self) -> PayloadSet<T> {
        self.set
    }

    /// Returns true if `index` lies within `[start, end]`.
    pub fn intersects_point(&self, index: i64) -> bool {
        self.intersects_range(index, index)
    }

    /// Returns true if `[start, end]` shares at least one point with this
    /// interval.
    pub fn intersects_range(&self, start: i64, end: i64) -> bool {
        !(end < self.start || start > self.end)
    }

    /// Return a copy of this interval if it contains `index`.
    pub fn query_point(&self, index: i64) -> Option<Self>
    where
        T: Ord + Clone,
    {
        self.query_point_by(index, T::cmp)
    }

    /// Return a copy of this interval, materialised under `cmp`, if it
    /// contains `index`.
    pub fn query_point_by(&self, index: i64, cmp: Comparator<T>) -> Option<Self>
    where
        T: Clone,
    {
        self.query_range_by(index, index, cmp)
    }

    /// Return a copy of this interval if it intersects `[start, end]`.
    pub fn query_range(&self, start: i64, end: i64) -> Option<Self>
    where
        T: Ord + Clone,
    {
        self.query_range_by(start, end, T::cmp)
    }

    /// Return a copy of this interval, materialised under `cmp`, if it
    /// intersects `[start, end]`.
    pub fn query_range_by(&self, start: i64, end: i64, cmp: Comparator<T>) -> Option<Self>
    where
        T: Clone,
    {
        self.intersects_range(start, end).then(|| self.copy_by(cmp))
    }

    /// Merge `other` into `self`.
    ///
    /// The bounds widen to span both intervals and the payload set becomes
    /// the union of both, ordered by the comparator of `self`.
    pub fn combine(&mut self, other: Self) -> &mut Self {
        self.start = self.start.min(other.start);
        self.end = self.end.max(other.end);
        self.set.union(other.set);
        self
    }

    /// Return an independent copy with the payload set ordered naturally.
    pub fn copy(&self) -> Self
    where
        T: Ord + Clone,
    {
        self.copy_by(T::cmp)
    }

    /// Return an independent copy with the payload set ordered by `cmp`.
    pub fn copy_by(&self, cmp: Comparator<T>) -> Self
    where
        T: Clone,
    {
        Self {
            start: self.start,
            end: self.end,
            set: self.set.reordered_by(cmp),
        }
    }
}

impl<T> PartialEq for Interval<T> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end && self.set == other.set
    }
}

impl<T> From<(i64, i64, T)> for Interval<T>
where
    T: Ord,
{
    fn from((start, end, value): (i64, i64, T)) -> Self {
        Self::new(start, end, value)
    }
}

impl<T> Display for Interval<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{} set=[", self.start, self.end)?;
        for (i, v) in self.set.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

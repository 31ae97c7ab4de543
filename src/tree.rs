use tracing::{debug, trace};

use crate::{error::Error, interval::Interval, iter::Iter, node::Node, payload::Comparator};

/// A static interval tree answering stabbing and range queries.
///
/// The tree is built once from a collection of [`Interval`] and is immutable
/// thereafter; any number of threads may query a shared reference to it
/// concurrently.
///
/// Queries return a single merged [`Interval`] spanning every match, with the
/// union of the matched payloads, or [`None`] when nothing matches.
#[derive(Debug, Clone)]
pub struct IntervalTree<T> {
    root: Option<Box<Node<T>>>,
    len: usize,
    depth: usize,
}

impl<T> Default for IntervalTree<T> {
    fn default() -> Self {
        Self {
            root: None,
            len: 0,
            depth: 0,
        }
    }
}

impl<T> IntervalTree<T> {
    /// Build a tree from `intervals`.
    ///
    /// An empty input produces an empty tree. Every interval must satisfy
    /// `start <= end` and carry at least one payload value, otherwise an
    /// [`Error`] naming the first offending input position is returned.
    ///
    /// Each tree node splits its intervals around the midpoint of the interval
    /// at the middle input position. Input ordered by lower bound produces a
    /// balanced tree; other orders produce correct but possibly deeper trees.
    pub fn build<I, V>(intervals: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = V>,
        V: Into<Interval<T>>,
    {
        let intervals = intervals
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Interval<T>>>();

        for (index, v) in intervals.iter().enumerate() {
            let (start, end) = (v.start(), v.end());

            let err = if start > end {
                Error::InvertedBounds { index, start, end }
            } else if v.matches().is_empty() {
                Error::EmptyPayload { index, start, end }
            } else {
                continue;
            };

            debug!(%err, "rejected interval tree input");
            return Err(err);
        }

        let len = intervals.len();
        let Some(built) = Node::build(intervals) else {
            debug!("built empty interval tree");
            return Ok(Self::default());
        };

        debug!(
            intervals = len,
            nodes = built.nodes,
            depth = built.depth,
            "built interval tree"
        );

        Ok(Self {
            root: Some(built.root),
            len,
            depth: built.depth,
        })
    }

    /// Stabbing query: merge every interval containing `index`.
    ///
    /// The payload set of the result uses the natural ordering of `T`.
    pub fn query_point(&self, index: i64) -> Option<Interval<T>>
    where
        T: Ord + Clone,
    {
        self.query_point_by(index, T::cmp)
    }

    /// Stabbing query: merge every interval containing `index`, with the
    /// payload set of the result ordered by `cmp`.
    ///
    /// `cmp` has no effect on which intervals match.
    pub fn query_point_by(&self, index: i64, cmp: Comparator<T>) -> Option<Interval<T>>
    where
        T: Clone,
    {
        let got = self.root.as_deref().and_then(|v| v.query_point_by(index, cmp));

        trace!(index, matched = got.is_some(), "stabbing query");
        got
    }

    /// Range query: merge every interval intersecting `[start, end]`.
    ///
    /// The payload set of the result uses the natural ordering of `T`.
    pub fn query_range(&self, start: i64, end: i64) -> Option<Interval<T>>
    where
        T: Ord + Clone,
    {
        self.query_range_by(start, end, T::cmp)
    }

    /// Range query: merge every interval intersecting `[start, end]`, with
    /// the payload set of the result ordered by `cmp`.
    ///
    /// An inverted query range (`start > end`) matches nothing.
    pub fn query_range_by(&self, start: i64, end: i64, cmp: Comparator<T>) -> Option<Interval<T>>
    where
        T: Clone,
    {
        if start > end {
            trace!(start, end, "inverted range query");
            return None;
        }

        let got = self.root.as_deref().and_then(|v| v.query_range_by(start, end, cmp));

        trace!(start, end, matched = got.is_some(), "range query");
        got
    }

    /// The number of intervals stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of nodes on the longest root-to-leaf path, or 0 for an empty
    /// tree.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Iterate over every stored interval.
    ///
    /// The yield order follows the tree structure and is stable for a given
    /// tree, but otherwise unspecified.
    pub fn iter(&self) -> impl Iterator<Item = &Interval<T>> {
        Iter::new(self.root.as_deref())
    }
}

use std::fmt::Display;

use crate::{
    interval::Interval,
    payload::{Comparator, PayloadSet},
};

/// A node of a centred interval tree.
///
/// Each node splits the intervals it was built from around a `center` point:
/// intervals strictly below the center live in the left subtree, intervals
/// strictly above in the right subtree, and every interval containing the
/// center is held by this node.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    /// Owned child subtrees.
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,

    center: i64,

    /// The intervals containing `center`, ordered by lower bound.
    ///
    /// Never empty.
    by_start: Vec<Interval<T>>,

    /// Indexes into `by_start`, ordered by upper bound.
    by_end: Vec<usize>,
}

/// The output of [`Node::build()`].
#[derive(Debug)]
pub(crate) struct Built<T> {
    pub(crate) root: Box<Node<T>>,
    pub(crate) nodes: usize,
    pub(crate) depth: usize,
}

/// Work items for the explicit-stack construction in [`Node::build()`].
enum Frame<T> {
    /// Split `intervals` around a new center.
    Partition {
        intervals: Vec<Interval<T>>,
        depth: usize,
    },

    /// Assemble a node from the overlap set and the subtrees built since the
    /// matching [`Frame::Partition`] was processed.
    Link {
        center: i64,
        overlap: Vec<Interval<T>>,
        has_left: bool,
        has_right: bool,
    },
}

impl<T> Node<T> {
    fn new(
        center: i64,
        mut overlap: Vec<Interval<T>>,
        left: Option<Box<Self>>,
        right: Option<Box<Self>>,
    ) -> Self {
        debug_assert!(!overlap.is_empty());
        debug_assert!(overlap.iter().all(|v| v.start() <= center && center <= v.end()));

        overlap.sort_by_key(|v| v.start());

        let mut by_end = (0..overlap.len()).collect::<Vec<_>>();
        by_end.sort_by_key(|&idx| overlap[idx].end());

        Self {
            left,
            right,
            center,
            by_start: overlap,
            by_end,
        }
    }

    /// Build a tree from `intervals`, returning [`None`] if `intervals` is
    /// empty.
    ///
    /// The pivot of each node is the interval at the midpoint position of its
    /// input, without sorting. Any input order produces a correct tree, but
    /// input sorted by lower bound produces a balanced one.
    pub(crate) fn build(intervals: Vec<Interval<T>>) -> Option<Built<T>> {
        if intervals.is_empty() {
            return None;
        }

        let mut work = vec![Frame::Partition {
            intervals,
            depth: 1,
        }];

        // Completed subtrees, consumed by the Link frame of their parent.
        let mut built: Vec<Box<Self>> = vec![];
        let mut nodes = 0;
        let mut max_depth = 0;

        while let Some(frame) = work.pop() {
            match frame {
                Frame::Partition { intervals, depth } => {
                    max_depth = max_depth.max(depth);

                    let pivot = &intervals[intervals.len() / 2];
                    let center = midpoint(pivot.start(), pivot.end());

                    let mut left = vec![];
                    let mut right = vec![];
                    let mut overlap = vec![];
                    for v in intervals {
                        if v.end() < center {
                            left.push(v);
                        } else if v.start() > center {
                            right.push(v);
                        } else {
                            overlap.push(v);
                        }
                    }

                    work.push(Frame::Link {
                        center,
                        overlap,
                        has_left: !left.is_empty(),
                        has_right: !right.is_empty(),
                    });

                    // The left subtree is pushed last so that it completes
                    // first, leaving the right subtree on top of "built" when
                    // the Link frame runs.
                    if !right.is_empty() {
                        work.push(Frame::Partition {
                            intervals: right,
                            depth: depth + 1,
                        });
                    }
                    if !left.is_empty() {
                        work.push(Frame::Partition {
                            intervals: left,
                            depth: depth + 1,
                        });
                    }
                }
                Frame::Link {
                    center,
                    overlap,
                    has_left,
                    has_right,
                } => {
                    let right = if has_right { built.pop() } else { None };
                    let left = if has_left { built.pop() } else { None };
                    debug_assert_eq!(left.is_some(), has_left);
                    debug_assert_eq!(right.is_some(), has_right);

                    nodes += 1;
                    built.push(Box::new(Self::new(center, overlap, left, right)));
                }
            }
        }

        debug_assert_eq!(built.len(), 1);

        Some(Built {
            root: built.pop()?,
            nodes,
            depth: max_depth,
        })
    }

    /// Stabbing query: merge every interval in this subtree containing
    /// `index`, materialising the result under `cmp`.
    ///
    /// Walks a single root-to-leaf path.
    pub(crate) fn query_point_by(&self, index: i64, cmp: Comparator<T>) -> Option<Interval<T>>
    where
        T: Clone,
    {
        self.collect_point(index).finish(cmp)
    }

    fn collect_point(&self, index: i64) -> Accumulator<T>
    where
        T: Clone,
    {
        let mut acc = Accumulator::default();
        let mut ptr = Some(self);

        while let Some(n) = ptr {
            if index < n.center() {
                // Every interval here ends at or after the center, so it
                // contains "index" iff it starts at or before it.
                for v in n.by_start.iter().take_while(|v| v.start() <= index) {
                    acc.push(v);
                }
                ptr = n.left();
            } else {
                // Symmetrically, visit the largest upper bounds first and stop
                // at the first interval ending before "index".
                for v in n.overlap_by_end().rev().take_while(|v| v.end() >= index) {
                    acc.push(v);
                }
                ptr = n.right();
            }
        }

        acc
    }

    /// Range query: merge every interval in this subtree intersecting
    /// `[start, end]`, materialising the result under `cmp`.
    pub(crate) fn query_range_by(
        &self,
        start: i64,
        end: i64,
        cmp: Comparator<T>,
    ) -> Option<Interval<T>>
    where
        T: Clone,
    {
        self.collect_range(start, end).finish(cmp)
    }

    fn collect_range(&self, start: i64, end: i64) -> Accumulator<T>
    where
        T: Clone,
    {
        let mut acc = Accumulator::default();
        let mut stack = vec![self];

        while let Some(n) = stack.pop() {
            for v in n
                .by_start
                .iter()
                .take_while(|v| v.start() <= end)
                .filter(|v| v.intersects_range(start, end))
            {
                acc.push(v);
            }

            // The left subtree holds only intervals ending before the center,
            // and the right only those starting after it.
            if start < n.center() {
                stack.extend(n.left());
            }
            if end >= n.center() {
                stack.extend(n.right());
            }
        }

        acc
    }

    pub(crate) fn center(&self) -> i64 {
        self.center
    }

    /// The intervals containing the center, ordered by lower bound.
    pub(crate) fn overlap_by_start(&self) -> &[Interval<T>] {
        &self.by_start
    }

    /// The intervals containing the center, ordered by upper bound.
    pub(crate) fn overlap_by_end(&self) -> impl DoubleEndedIterator<Item = &Interval<T>> + '_ {
        self.by_end.iter().map(|&idx| &self.by_start[idx])
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

impl<T> Display for Node<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Center={} Set=[", self.center)?;
        for (i, v) in self.by_start.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

/// The running result of a query.
///
/// Matched payloads are gathered unordered and materialised into a single
/// [`PayloadSet`] by [`Accumulator::finish()`], so a query costs one sort over
/// the matched payloads rather than one merge per matched interval.
#[derive(Debug)]
struct Accumulator<T> {
    bounds: Option<(i64, i64)>,
    values: Vec<T>,

    /// Number of intervals pushed.
    #[cfg(test)]
    hits: usize,
}

impl<T> Default for Accumulator<T> {
    fn default() -> Self {
        Self {
            bounds: None,
            values: vec![],
            #[cfg(test)]
            hits: 0,
        }
    }
}

impl<T> Accumulator<T> {
    /// Record `v` as a match.
    fn push(&mut self, v: &Interval<T>)
    where
        T: Clone,
    {
        self.bounds = Some(match self.bounds {
            Some((lo, hi)) => (lo.min(v.start()), hi.max(v.end())),
            None => (v.start(), v.end()),
        });
        self.values.extend(v.matches().iter().cloned());

        #[cfg(test)]
        {
            self.hits += 1;
        }
    }

    /// Merge all matches into one [`Interval`] with its payload set ordered by
    /// `cmp`, or [`None`] if nothing matched.
    fn finish(self, cmp: Comparator<T>) -> Option<Interval<T>> {
        let (start, end) = self.bounds?;
        Some(Interval::from_set(
            start,
            end,
            PayloadSet::from_vec_by(self.values, cmp),
        ))
    }
}

/// Compute `(a + b) / 2`, truncating toward zero, without overflow.
fn midpoint(a: i64, b: i64) -> i64 {
    // Correctness: the mean of two i64 values always fits in an i64.
    ((a as i128 + b as i128) / 2) as i64
}

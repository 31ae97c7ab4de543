//! A static, centred [interval tree] for stabbing and range queries.
//!
//! An [`IntervalTree`] is built once from a collection of closed integer
//! [`Interval`]s, each carrying a set of payload values, and answers:
//!
//! * "which intervals contain this point?" ([`IntervalTree::query_point()`])
//! * "which intervals intersect this range?" ([`IntervalTree::query_range()`])
//!
//! Rather than yielding matches one at a time, a query merges every match
//! into a single [`Interval`] spanning all matched bounds, whose
//! [`matches()`](Interval::matches) are the union of their payloads.
//!
//! ```
//! use centered_itree::IntervalTree;
//!
//! let t = IntervalTree::build([(1, 10, "p"), (5, 15, "q"), (20, 30, "r")]).unwrap();
//!
//! let got = t.query_point(7).unwrap();
//! assert_eq!(got.matches().as_slice(), &["p", "q"]);
//! assert_eq!((got.start(), got.end()), (1, 15));
//!
//! assert!(t.query_range(16, 19).is_none());
//! ```
//!
//! The ordering of a result's payload set can be chosen per query with the
//! `_by` query variants, without affecting which intervals match.
//!
//! [interval tree]: https://en.wikipedia.org/wiki/Interval_tree#Centered_interval_tree
#![forbid(unsafe_code)]

mod error;
mod interval;
mod iter;
mod node;
mod payload;
mod tree;

pub use error::Error;
pub use interval::Interval;
pub use payload::{Comparator, PayloadSet};
pub use tree::IntervalTree;

#[cfg(test)]
mod test_utils;

use std::fmt;

/// Errors returned when building an [`IntervalTree`](crate::IntervalTree)
/// from invalid input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The interval at input position `index` has a lower bound greater than
    /// its upper bound.
    InvertedBounds {
        /// Position of the interval in the input.
        index: usize,
        /// The interval lower bound.
        start: i64,
        /// The interval upper bound.
        end: i64,
    },

    /// The interval at input position `index` carries no payload values.
    EmptyPayload {
        /// Position of the interval in the input.
        index: usize,
        /// The interval lower bound.
        start: i64,
        /// The interval upper bound.
        end: i64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvertedBounds { index, start, end } => write!(
                f,
                "interval {index} has start {start} greater than end {end}"
            ),
            Error::EmptyPayload { index, start, end } => {
                write!(f, "interval {index} ({start}->{end}) has an empty payload set")
            }
        }
    }
}

impl std::error::Error for Error {}

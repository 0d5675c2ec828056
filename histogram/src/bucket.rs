//! Buckets represent a value range and a count of observations within that
//! range.

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Identifies which counter of a histogram a [`Bucket`] was read from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(rename_all = "snake_case"))]
pub enum BucketKind {
    /// Samples less than the histogram's `min`.
    Underflow,
    /// The finite bin with the given 1-based index.
    Bin(usize),
    /// Samples greater than the histogram's `max`.
    Overflow,
}

/// A bucket represents a range of values and a count of observations that
/// fall into that range.
///
/// Finite bins are half-open, `lower..upper`. The underflow bucket spans
/// `-inf..min` and the overflow bucket spans `max..inf`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Bucket {
    pub(crate) kind: BucketKind,
    pub(crate) count: u64,
    pub(crate) lower: f64,
    pub(crate) upper: f64,
}

impl Bucket {
    pub fn kind(&self) -> BucketKind {
        self.kind
    }

    /// Returns the number of observations within the bucket's range.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the range for the bucket.
    pub fn range(&self) -> std::ops::Range<f64> {
        self.lower..self.upper
    }

    /// Returns the lower bound for the bucket.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Returns the upper bound for the bucket.
    pub fn upper(&self) -> f64 {
        self.upper
    }
}

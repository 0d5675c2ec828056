//! This crate provides a fixed-width histogram: a value range split into
//! equal-width bins plus two extra counters for samples that fall below or
//! above the range.
//!
//! # Goals
//! * simple bucketing that is easy to reason about and to report
//! * constant time recording with no allocation
//! * a stable text report
//!
//! # Background
//! The range `min..max` is divided into `bins` buckets, each
//! `(max - min) / bins` wide. The histogram keeps `bins + 2` counters:
//!
//! * index `0` counts samples less than `min`
//! * index `i` in `1..=bins` counts samples in
//!   `min + interval * (i - 1)..min + interval * i`
//! * index `bins + 1` counts samples greater than `max`
//!
//! A sample exactly equal to `max` is, by default, counted in the same slot as
//! samples greater than `max`. This matches the historical report output.
//! Choose [`Boundary::Inclusive`] to count it in the last bin instead.
//!
//! # Example
//! ```
//! use fixed_histogram::Histogram;
//!
//! let mut histogram = Histogram::new(0.0, 10.0, 5).unwrap();
//!
//! for value in [-1.0, 0.0, 1.9, 10.0, 15.0] {
//!     histogram.record(value);
//! }
//!
//! assert_eq!(histogram.as_slice(), &[1, 2, 0, 0, 0, 0, 2]);
//! assert_eq!(
//!     histogram.render(),
//!     "<0.0 : 1\n\
//!      0.0 to 2.0 : 2\n\
//!      2.0 to 4.0 : 0\n\
//!      4.0 to 6.0 : 0\n\
//!      6.0 to 8.0 : 0\n\
//!      8.0 to 10.0 : 0\n\
//!      >10.0 : 2\n"
//! );
//! ```

mod atomic;
mod bucket;
mod builder;
mod config;
mod errors;
mod format;
mod parameters;
mod standard;

pub mod sink;

pub use atomic::AtomicHistogram;
pub use bucket::{Bucket, BucketKind};
pub use builder::Builder;
pub use config::{Boundary, Config, MAX_BINS};
pub use errors::{BuildError, Error};
pub use parameters::Parameters;
pub use sink::Sink;
pub use standard::{Histogram, Iter};

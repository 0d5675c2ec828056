use crate::format::Decimal;
use crate::{Bucket, BucketKind, BuildError, Builder, Config, Error};
use core::fmt;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A fixed-width histogram that uses plain 64bit counters for each bucket.
///
/// Recording requires exclusive access. Use [`crate::AtomicHistogram`] or wrap
/// the histogram in a lock when samples arrive from more than one thread.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-serialize",
    serde(try_from = "RawHistogram", into = "RawHistogram")
)]
pub struct Histogram {
    pub(crate) config: Config,
    pub(crate) buckets: Box<[u64]>,
}

impl Histogram {
    /// Construct a new histogram with `bins` equal-width bins spanning
    /// `min..max`. See [`crate::Config::new`] for the constraints on the
    /// parameters.
    pub fn new(min: f64, max: f64, bins: usize) -> Result<Self, BuildError> {
        let config = Config::new(min, max, bins)?;

        Ok(Self::with_config(&config))
    }

    /// Construct a new histogram without validating the parameters. See
    /// [`crate::Config::permissive`].
    pub fn permissive(min: f64, max: f64, bins: usize) -> Self {
        Self::with_config(&Config::permissive(min, max, bins))
    }

    /// Creates a new histogram using a provided [`crate::Config`].
    pub fn with_config(config: &Config) -> Self {
        let buckets: Box<[u64]> = vec![0; config.total_buckets()].into();

        Self {
            config: *config,
            buckets,
        }
    }

    /// Returns a [`crate::Builder`] for a histogram with the provided range
    /// and bin count.
    pub fn builder(min: f64, max: f64, bins: usize) -> Builder {
        Builder::new(min, max, bins)
    }

    /// Count one observation of `value`.
    ///
    /// Values below `min` go to the underflow counter and values above `max`
    /// go to the overflow counter. A value equal to `max` goes to the overflow
    /// counter unless the histogram uses [`crate::Boundary::Inclusive`]. NaN
    /// is counted as overflow; use [`Histogram::try_record`] to reject it.
    pub fn record(&mut self, value: f64) {
        self.add(value, 1)
    }

    /// Count one observation of `value`, returning an error instead if the
    /// value is NaN.
    pub fn try_record(&mut self, value: f64) -> Result<(), Error> {
        if value.is_nan() {
            return Err(Error::NotANumber);
        }

        self.record(value);
        Ok(())
    }

    /// Add some count to the counter for the bucket corresponding to the
    /// provided value.
    pub fn add(&mut self, value: f64, count: u64) {
        let index = self.config.value_to_index(value);
        self.buckets[index] = self.buckets[index].wrapping_add(count);
    }

    /// Reset every counter to zero.
    pub fn clear(&mut self) {
        self.buckets.fill(0);
    }

    /// Get a reference to the raw counters. Index `0` is the underflow
    /// counter and the last index is the overflow counter.
    pub fn as_slice(&self) -> &[u64] {
        &self.buckets
    }

    /// The number of observations below `min`.
    pub fn underflow(&self) -> u64 {
        self.buckets[0]
    }

    /// The number of observations counted in the overflow slot.
    pub fn overflow(&self) -> u64 {
        self.buckets[self.config.overflow_index()]
    }

    /// The total number of observations across all counters.
    pub fn total_count(&self) -> u128 {
        self.buckets.iter().map(|v| *v as u128).sum()
    }

    /// Produce the text report for this histogram.
    ///
    /// The report has one line for the underflow counter, one per bin, and
    /// one for the overflow counter, each ending in a newline:
    ///
    /// ```text
    /// <0.0 : 1
    /// 0.0 to 5.0 : 3
    /// 5.0 to 10.0 : 0
    /// >10.0 : 2
    /// ```
    ///
    /// Bin bounds are printed at single precision. This is the same text as
    /// the [`fmt::Display`] implementation.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Adds the other histogram to this histogram and returns the result as a
    /// new histogram.
    ///
    /// An error is returned if the two histograms have incompatible parameters
    /// or if there is an overflow.
    pub fn checked_add(&self, other: &Histogram) -> Result<Histogram, Error> {
        let mut result = self.clone();

        if self.config != other.config {
            return Err(Error::IncompatibleParameters);
        }

        for (this, other) in result.buckets.iter_mut().zip(other.buckets.iter()) {
            *this = this.checked_add(*other).ok_or(Error::Overflow)?;
        }

        Ok(result)
    }

    /// Subtracts the other histogram from this histogram and returns the result
    /// as a new histogram. Subtracting an earlier snapshot from a later one
    /// gives the observations recorded in between.
    ///
    /// An error is returned if the two histograms have incompatible parameters
    /// or if any counter in the other histogram is larger.
    pub fn checked_sub(&self, other: &Histogram) -> Result<Histogram, Error> {
        let mut result = self.clone();

        if self.config != other.config {
            return Err(Error::IncompatibleParameters);
        }

        for (this, other) in result.buckets.iter_mut().zip(other.buckets.iter()) {
            *this = this.checked_sub(*other).ok_or(Error::Overflow)?;
        }

        Ok(result)
    }

    /// Returns the bucket configuration of the histogram.
    pub fn config(&self) -> Config {
        self.config
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<{} : {}", Decimal(self.config.min()), self.underflow())?;

        for index in 1..=self.config.bins() {
            writeln!(
                f,
                "{} to {} : {}",
                Decimal(self.config.index_to_lower_bound(index) as f32),
                Decimal(self.config.index_to_upper_bound(index) as f32),
                self.buckets[index]
            )?;
        }

        writeln!(f, ">{} : {}", Decimal(self.config.max()), self.overflow())
    }
}

impl Extend<f64> for Histogram {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        for value in iter {
            self.record(value);
        }
    }
}

impl<'a> IntoIterator for &'a Histogram {
    type Item = Bucket;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            index: 0,
            histogram: self,
        }
    }
}

/// An iterator across the histogram buckets, from underflow to overflow.
pub struct Iter<'a> {
    index: usize,
    histogram: &'a Histogram,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Bucket;

    fn next(&mut self) -> Option<<Self as std::iter::Iterator>::Item> {
        if self.index >= self.histogram.buckets.len() {
            return None;
        }

        let config = &self.histogram.config;
        let kind = match self.index {
            0 => BucketKind::Underflow,
            i if i == config.overflow_index() => BucketKind::Overflow,
            i => BucketKind::Bin(i),
        };

        let bucket = Bucket {
            kind,
            count: self.histogram.buckets[self.index],
            lower: config.index_to_lower_bound(self.index),
            upper: config.index_to_upper_bound(self.index),
        };

        self.index += 1;

        Some(bucket)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.histogram.buckets.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// The serialized form of a histogram. Converting back validates that the
/// counter array matches the configuration.
#[cfg(feature = "serde-serialize")]
#[derive(Serialize, Deserialize)]
struct RawHistogram {
    config: Config,
    buckets: Vec<u64>,
}

#[cfg(feature = "serde-serialize")]
impl TryFrom<RawHistogram> for Histogram {
    type Error = Error;

    fn try_from(raw: RawHistogram) -> Result<Self, Error> {
        if raw.buckets.len() != raw.config.total_buckets() {
            return Err(Error::IncompatibleParameters);
        }

        Ok(Self {
            config: raw.config,
            buckets: raw.buckets.into(),
        })
    }
}

#[cfg(feature = "serde-serialize")]
impl From<Histogram> for RawHistogram {
    fn from(histogram: Histogram) -> Self {
        Self {
            config: histogram.config,
            buckets: histogram.buckets.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Boundary;

    #[test]
    fn size() {
        assert_eq!(std::mem::size_of::<Histogram>(), 56);
    }

    #[test]
    // Walks through recording samples on both sides of the range
    fn record() {
        let mut histogram = Histogram::new(0.0, 10.0, 5).unwrap();
        assert_eq!(histogram.config().interval(), 2.0);
        assert_eq!(histogram.as_slice().len(), 7);

        histogram.record(-1.0);
        assert_eq!(histogram.as_slice()[0], 1);

        histogram.record(0.0);
        assert_eq!(histogram.as_slice()[1], 1);

        histogram.record(1.9);
        assert_eq!(histogram.as_slice()[1], 2);

        histogram.record(10.0);
        assert_eq!(histogram.as_slice()[6], 1);

        histogram.record(15.0);
        assert_eq!(histogram.as_slice()[6], 2);

        assert_eq!(histogram.as_slice(), &[1, 2, 0, 0, 0, 0, 2]);
        assert_eq!(histogram.total_count(), 5);
        assert_eq!(histogram.underflow(), 1);
        assert_eq!(histogram.overflow(), 2);
    }

    #[test]
    fn single_bin() {
        let mut histogram = Histogram::new(0.0, 1.0, 1).unwrap();
        assert_eq!(histogram.config().interval(), 1.0);

        histogram.record(0.5);
        assert_eq!(histogram.as_slice()[1], 1);

        histogram.record(1.0);
        assert_eq!(histogram.as_slice()[2], 1);
    }

    #[test]
    fn inclusive_max() {
        let mut histogram = Histogram::builder(0.0, 1.0, 1)
            .boundary(Boundary::Inclusive)
            .build()
            .unwrap();

        histogram.record(1.0);
        assert_eq!(histogram.as_slice(), &[0, 1, 0]);

        histogram.record(1.5);
        assert_eq!(histogram.as_slice(), &[0, 1, 1]);
    }

    #[test]
    fn not_a_number() {
        let mut histogram = Histogram::new(0.0, 10.0, 5).unwrap();

        assert_eq!(histogram.try_record(f64::NAN), Err(Error::NotANumber));
        assert_eq!(histogram.total_count(), 0);

        histogram.record(f64::NAN);
        assert_eq!(histogram.overflow(), 1);
        assert_eq!(histogram.total_count(), 1);

        assert_eq!(histogram.try_record(f64::NEG_INFINITY), Ok(()));
        assert_eq!(histogram.underflow(), 1);
    }

    #[test]
    fn add_and_clear() {
        let mut histogram = Histogram::new(0.0, 10.0, 5).unwrap();
        histogram.add(3.0, 10);
        histogram.extend([4.0, 5.0, 6.0]);
        assert_eq!(histogram.as_slice(), &[0, 0, 10, 2, 1, 0, 0]);

        histogram.clear();
        assert_eq!(histogram.total_count(), 0);
        assert_eq!(histogram.config().bins(), 5);
    }

    #[test]
    fn render() {
        let mut histogram = Histogram::new(0.0, 10.0, 5).unwrap();
        for value in [-1.0, 0.0, 1.9, 10.0, 15.0] {
            histogram.record(value);
        }

        let expected = "<0.0 : 1\n\
                        0.0 to 2.0 : 2\n\
                        2.0 to 4.0 : 0\n\
                        4.0 to 6.0 : 0\n\
                        6.0 to 8.0 : 0\n\
                        8.0 to 10.0 : 0\n\
                        >10.0 : 2\n";

        assert_eq!(histogram.render(), expected);
        assert_eq!(histogram.render(), histogram.render());
        assert_eq!(format!("{histogram}"), expected);
    }

    #[test]
    // bin bounds are narrowed to single precision while min and max are not
    fn render_precision() {
        let histogram = Histogram::new(0.0, 1.0, 3).unwrap();
        assert_eq!(
            histogram.render(),
            "<0.0 : 0\n\
             0.0 to 0.33333334 : 0\n\
             0.33333334 to 0.6666667 : 0\n\
             0.6666667 to 1.0 : 0\n\
             >1.0 : 0\n"
        );

        let histogram = Histogram::new(0.0, 1e-4, 1).unwrap();
        assert_eq!(
            histogram.render(),
            "<0.0 : 0\n0.0 to 1.0E-4 : 0\n>1.0E-4 : 0\n"
        );
    }

    #[test]
    fn render_permissive() {
        let mut histogram = Histogram::permissive(0.0, 10.0, 0);
        histogram.record(5.0);
        assert_eq!(histogram.render(), "<0.0 : 0\n>10.0 : 1\n");
    }

    #[test]
    fn combine_permissive() {
        let mut histogram = Histogram::permissive(1.0, 1.0, 0);
        histogram.record(1.0);
        assert_eq!(
            histogram.checked_add(&histogram.clone()),
            Err(Error::IncompatibleParameters)
        );

        let histogram = Histogram::permissive(0.0, 10.0, 0);
        assert_eq!(histogram.checked_add(&histogram), Ok(histogram.clone()));
    }

    #[test]
    fn buckets() {
        let mut histogram = Histogram::new(-1.0, 1.0, 2).unwrap();
        histogram.extend([-2.0, -0.5, 0.5, 0.75]);

        let buckets: Vec<Bucket> = histogram.into_iter().collect();
        assert_eq!(buckets.len(), 4);

        assert_eq!(buckets[0].kind(), BucketKind::Underflow);
        assert_eq!(buckets[0].lower(), f64::NEG_INFINITY);
        assert_eq!(buckets[0].upper(), -1.0);
        assert_eq!(buckets[0].count(), 1);

        assert_eq!(buckets[1].kind(), BucketKind::Bin(1));
        assert_eq!(buckets[1].range(), -1.0..0.0);
        assert_eq!(buckets[1].count(), 1);

        assert_eq!(buckets[2].kind(), BucketKind::Bin(2));
        assert_eq!(buckets[2].range(), 0.0..1.0);
        assert_eq!(buckets[2].count(), 2);

        assert_eq!(buckets[3].kind(), BucketKind::Overflow);
        assert_eq!(buckets[3].range(), 1.0..f64::INFINITY);
        assert_eq!(buckets[3].count(), 0);
    }

    #[test]
    fn combine() {
        let mut a = Histogram::new(0.0, 10.0, 5).unwrap();
        let mut b = Histogram::new(0.0, 10.0, 5).unwrap();
        a.extend([1.0, 3.0, 11.0]);
        b.extend([1.0, -3.0]);

        let sum = a.checked_add(&b).unwrap();
        assert_eq!(sum.as_slice(), &[1, 2, 1, 0, 0, 0, 1]);
        assert_eq!(sum.checked_sub(&b), Ok(a.clone()));
        assert_eq!(a.checked_sub(&b), Err(Error::Overflow));

        let mut full = Histogram::new(0.0, 10.0, 5).unwrap();
        full.add(1.0, u64::MAX);
        assert_eq!(full.checked_add(&a), Err(Error::Overflow));

        let other = Histogram::new(0.0, 10.0, 4).unwrap();
        assert_eq!(a.checked_add(&other), Err(Error::IncompatibleParameters));

        let inclusive = Histogram::builder(0.0, 10.0, 5)
            .boundary(Boundary::Inclusive)
            .build()
            .unwrap();
        assert_eq!(
            a.checked_sub(&inclusive),
            Err(Error::IncompatibleParameters)
        );
    }
}

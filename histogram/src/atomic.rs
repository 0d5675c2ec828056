use crate::{BuildError, Config, Error, Histogram};
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// A fixed-width histogram that uses atomic 64bit counters for each bucket.
///
/// Samples can be recorded concurrently through a shared reference. Reading
/// the counts is done by taking a snapshot, which captures the state of the
/// histogram at a point in time as a plain [`crate::Histogram`].
pub struct AtomicHistogram {
    config: Config,
    buckets: Box<[AtomicU64]>,
}

impl AtomicHistogram {
    /// Construct a new atomic histogram with `bins` equal-width bins spanning
    /// `min..max`. See [`crate::Config::new`] for the constraints on the
    /// parameters.
    pub fn new(min: f64, max: f64, bins: usize) -> Result<Self, BuildError> {
        let config = Config::new(min, max, bins)?;

        Ok(Self::with_config(&config))
    }

    /// Construct a new atomic histogram without validating the parameters.
    /// See [`crate::Config::permissive`].
    pub fn permissive(min: f64, max: f64, bins: usize) -> Self {
        Self::with_config(&Config::permissive(min, max, bins))
    }

    /// Creates a new atomic histogram using a provided [`crate::Config`].
    pub fn with_config(config: &Config) -> Self {
        let mut buckets = Vec::with_capacity(config.total_buckets());
        buckets.resize_with(config.total_buckets(), || AtomicU64::new(0));

        Self {
            config: *config,
            buckets: buckets.into(),
        }
    }

    /// Count one observation of `value`. Classification is the same as
    /// [`crate::Histogram::record`].
    pub fn record(&self, value: f64) {
        self.add(value, 1)
    }

    /// Count one observation of `value`, returning an error instead if the
    /// value is NaN.
    pub fn try_record(&self, value: f64) -> Result<(), Error> {
        if value.is_nan() {
            return Err(Error::NotANumber);
        }

        self.record(value);
        Ok(())
    }

    /// Increment the bucket that contains the value by some count.
    pub fn add(&self, value: f64, count: u64) {
        let index = self.config.value_to_index(value);
        self.buckets[index].fetch_add(count, Ordering::Relaxed);
    }

    /// Reset every counter to zero.
    ///
    /// Counters are reset one at a time, so observations recorded
    /// concurrently may or may not survive the reset.
    pub fn clear(&self) {
        for bucket in self.buckets.iter() {
            bucket.store(0, Ordering::Relaxed);
        }
    }

    /// Produce a snapshot from this histogram.
    pub fn snapshot(&self) -> Histogram {
        let buckets: Vec<u64> = self
            .buckets
            .iter()
            .map(|bucket| bucket.load(Ordering::Relaxed))
            .collect();

        Histogram {
            config: self.config,
            buckets: buckets.into(),
        }
    }

    /// Produce the text report for a snapshot of this histogram. See
    /// [`crate::Histogram::render`].
    pub fn render(&self) -> String {
        self.snapshot().render()
    }

    /// Returns the bucket configuration of the histogram.
    pub fn config(&self) -> Config {
        self.config
    }
}

impl fmt::Display for AtomicHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}

impl fmt::Debug for AtomicHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicHistogram")
            .field("config", &self.config)
            .field("buckets", &self.snapshot().as_slice())
            .finish()
    }
}

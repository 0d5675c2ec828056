use crate::{BuildError, Parameters};
use log::{debug, warn};

#[cfg(feature = "schemars")]
use schemars::JsonSchema;
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The largest bin count whose counters, including both overflow slots, can
/// be allocated as a single slice of `u64`.
pub const MAX_BINS: usize = isize::MAX as usize / core::mem::size_of::<u64>() - 2;

/// Controls which slot a sample exactly equal to `max` is counted in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "schemars", derive(JsonSchema))]
pub enum Boundary {
    /// A sample equal to `max` lands one past the last bin, which is the same
    /// slot that counts samples greater than `max`. This is the historical
    /// behavior of the bucket index formula and is kept as the default so
    /// that reports stay comparable.
    #[default]
    Overflow,
    /// A sample equal to `max` is counted by the last finite bin, making the
    /// top bin a closed interval.
    Inclusive,
}

/// The bucketing of a fixed-width histogram.
///
/// There are `bins` equal-width buckets covering `min..max` plus two extra
/// slots: index `0` counts samples below `min` and index `bins + 1` counts
/// samples above `max`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-serialize",
    serde(try_from = "Parameters", into = "Parameters")
)]
pub struct Config {
    min: f64,
    max: f64,
    bins: usize,
    interval: f64,
    boundary: Boundary,
}

impl Config {
    /// Create a validated configuration with the default [`Boundary`].
    ///
    /// # Constraints:
    /// * `bins` must be in the range `1..=MAX_BINS`
    /// * `min` and `max` must be finite
    /// * `max` must be greater than `min`
    /// * `(max - min) / bins` must be a positive finite number
    pub fn new(min: f64, max: f64, bins: usize) -> Result<Self, BuildError> {
        if bins == 0 {
            return Err(BuildError::NoBins);
        }

        if bins > MAX_BINS {
            return Err(BuildError::TooManyBins);
        }

        if !min.is_finite() || !max.is_finite() {
            return Err(BuildError::NonFiniteBound);
        }

        if max <= min {
            return Err(BuildError::InvalidRange);
        }

        // a finite range can still overflow when subtracted, and a tiny range
        // split into many bins can underflow to zero
        let interval = (max - min) / bins as f64;
        if !interval.is_finite() || interval <= 0.0 {
            return Err(BuildError::DegenerateInterval);
        }

        debug!("histogram configured with {bins} bins of width {interval} over [{min}, {max}]");

        Ok(Self {
            min,
            max,
            bins,
            interval,
            boundary: Boundary::default(),
        })
    }

    /// Create a configuration without validating the parameters.
    ///
    /// Degenerate parameters produce a degenerate (but memory safe) histogram:
    /// with zero bins every in-range sample lands in the overflow slot, and
    /// with `max < min` nothing is ever counted by a finite bin. A bin count
    /// above [`MAX_BINS`] is clamped to it.
    ///
    /// Recording matches the historical unvalidated behavior except for NaN,
    /// which is counted in the overflow slot here rather than in the first
    /// bin.
    ///
    /// # Limitations:
    /// * a configuration that fails [`Config::new`] cannot be deserialized,
    ///   since deserialization validates the parameters
    /// * when `min` or `max` is NaN, or the interval is NaN (`min == max`
    ///   with zero bins),
    ///   the configuration does not compare equal to itself, so histograms
    ///   built from it cannot be combined with `checked_add` or `checked_sub`
    pub fn permissive(min: f64, max: f64, bins: usize) -> Self {
        if let Err(e) = Self::new(min, max, bins) {
            warn!("degenerate histogram configuration min: {min} max: {max} bins: {bins}: {e}");
        }

        let bins = bins.min(MAX_BINS);
        let interval = (max - min) / bins as f64;

        Self {
            min,
            max,
            bins,
            interval,
            boundary: Boundary::default(),
        }
    }

    /// Returns this configuration with the provided [`Boundary`] policy.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// The lower bound of the first bin.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The upper bound of the last bin.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// The number of finite bins, excluding the two overflow slots.
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// The width of each finite bin.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// The number of counters a histogram with this configuration holds.
    pub fn total_buckets(&self) -> usize {
        self.bins + 2
    }

    pub(crate) fn overflow_index(&self) -> usize {
        self.bins + 1
    }

    /// Returns the index of the counter which tracks the provided value.
    ///
    /// NaN maps to the overflow slot. The returned index is always less than
    /// [`Config::total_buckets`].
    pub fn value_to_index(&self, value: f64) -> usize {
        if value < self.min {
            return 0;
        }

        if value > self.max || value.is_nan() {
            return self.overflow_index();
        }

        // samples up to and including `max` stay in a finite bin when the top
        // bin is closed, even if the division rounds up to `bins`
        let last = match self.boundary {
            Boundary::Overflow => self.overflow_index(),
            Boundary::Inclusive => self.bins.max(1),
        };

        // float to int casts saturate, so a tiny interval cannot wrap here
        let offset = ((value - self.min) / self.interval).floor() as usize;

        offset.saturating_add(1).min(last)
    }

    /// Returns the lower bound of the finite bin at `index`, computed as
    /// `min + interval * (index - 1)`.
    pub(crate) fn index_to_lower_bound(&self, index: usize) -> f64 {
        match index {
            0 => f64::NEG_INFINITY,
            i if i > self.bins => self.max,
            i => self.min + self.interval * (i - 1) as f64,
        }
    }

    /// Returns the upper bound of the finite bin at `index`, computed as
    /// `min + interval * index`.
    pub(crate) fn index_to_upper_bound(&self, index: usize) -> f64 {
        match index {
            0 => self.min,
            i if i > self.bins => f64::INFINITY,
            i => self.min + self.interval * i as f64,
        }
    }
}

impl TryFrom<Parameters> for Config {
    type Error = BuildError;

    fn try_from(parameters: Parameters) -> Result<Self, BuildError> {
        Ok(Config::new(parameters.min, parameters.max, parameters.bins)?
            .with_boundary(parameters.boundary))
    }
}

impl From<Config> for Parameters {
    fn from(config: Config) -> Self {
        Parameters {
            min: config.min,
            max: config.max,
            bins: config.bins,
            boundary: config.boundary,
        }
    }
}

use crate::{AtomicHistogram, Boundary, BuildError, Config, Histogram, Parameters};

/// A builder that can be used to construct a histogram.
///
/// By using the `Builder` you can choose the [`Boundary`] policy for samples
/// that are exactly equal to `max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Builder {
    parameters: Parameters,
}

impl Builder {
    /// Create a new builder for a histogram with `bins` equal-width bins
    /// spanning `min..max`.
    pub fn new(min: f64, max: f64, bins: usize) -> Self {
        Self {
            parameters: Parameters {
                min,
                max,
                bins,
                boundary: Boundary::default(),
            },
        }
    }

    /// Specify which slot a sample equal to `max` is counted in.
    pub fn boundary(mut self, boundary: Boundary) -> Self {
        self.parameters.boundary = boundary;
        self
    }

    /// Validate the parameters and produce a [`Config`].
    pub fn config(&self) -> Result<Config, BuildError> {
        Config::try_from(self.parameters)
    }

    /// Consume the builder and produce a histogram.
    pub fn build(self) -> Result<Histogram, BuildError> {
        Ok(Histogram::with_config(&self.config()?))
    }

    /// Consume the builder and produce a histogram that uses atomic
    /// counters.
    pub fn build_atomic(self) -> Result<AtomicHistogram, BuildError> {
        Ok(AtomicHistogram::with_config(&self.config()?))
    }
}

impl From<Parameters> for Builder {
    fn from(parameters: Parameters) -> Self {
        Self { parameters }
    }
}

use thiserror::Error;

/// Errors returned when constructing a histogram configuration.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    #[error("bin count must be at least 1")]
    NoBins,
    #[error("bin count is too large, check that bins <= MAX_BINS")]
    TooManyBins,
    #[error("min and max must both be finite")]
    NonFiniteBound,
    #[error("max must be greater than min")]
    InvalidRange,
    #[error("bin width is not a positive finite number, check the range and bin count")]
    DegenerateInterval,
}

/// Errors returned for histogram operations.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("the value is not a number")]
    NotANumber,
    #[error("the histogram parameters are incompatible")]
    IncompatibleParameters,
    #[error("an overflow occurred")]
    Overflow,
}

use crate::Boundary;

#[cfg(feature = "schemars")]
use schemars::JsonSchema;
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The parameters that determine the histogram bucketing.
/// * `min` - the inclusive lower bound of the first bin. Smaller samples are
///   counted in the underflow slot.
/// * `max` - the upper bound of the last bin. Larger samples are counted in
///   the overflow slot.
/// * `bins` - the number of equal-width bins between `min` and `max`. Each
///   bin is `(max - min) / bins` wide.
/// * `boundary` - which slot a sample exactly equal to `max` is counted in.
///   Defaults to [`Boundary::Overflow`].
///
/// This is the plain-data form of a [`crate::Config`], suitable for loading
/// from a configuration file. It is validated when converted into a `Config`.
///
/// # Constraints:
/// * `bins` must be at least 1
/// * `min` and `max` must be finite
/// * `max` must be greater than `min`
#[derive(PartialEq, Debug, Copy, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "schemars", derive(JsonSchema))]
pub struct Parameters {
    pub min: f64,
    pub max: f64,
    pub bins: usize,
    #[cfg_attr(feature = "serde-serialize", serde(default))]
    pub boundary: Boundary,
}

//! Reduction of a finalized pointwise-error sequence to summary statistics.

use itertools::Itertools;
use itertools::MinMaxResult;

/// Summary statistics of a pointwise absolute-error sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorStats {
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    /// population standard deviation, sqrt(mean((e - mean)^2))
    pub std: f64,
}

/// Computes max, min, arithmetic mean and population standard deviation of
/// the error sequence in a single finalized pass.
///
/// A length-1 sequence yields `max = min = mean = e0` and `std = 0`.
///
/// # Panics
/// Panics on an empty sequence. Callers guarantee at least 2 points
/// upstream (the sampler rejects smaller domains), so this is a
/// precondition violation, never a NaN result.
pub fn aggregate(errors: &[f64]) -> ErrorStats {
    assert!(!errors.is_empty(), "error sequence must not be empty");
    let (min, max) = match errors.iter().copied().minmax() {
        MinMaxResult::NoElements => unreachable!(),
        MinMaxResult::OneElement(e) => (e, e),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    let n = errors.len() as f64;
    let mean = errors.iter().sum::<f64>() / n;
    let variance = errors.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / n;
    ErrorStats {
        max,
        min,
        mean,
        std: variance.sqrt(),
    }
}

//___________________________________TESTS____________________________________

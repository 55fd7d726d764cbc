use serde::{Deserialize, Serialize};

/// Posterior weight of one mechanism: Bayesian combination of the
/// literature prior with contextual covariates.
///
/// Immutable once computed; recomputation produces a new value that
/// supersedes this one, it never mutates in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PosteriorWeight {
    pub mean: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

impl PosteriorWeight {
    /// Standard deviation implied by the 95% interval.
    pub fn implied_sd(&self) -> f64 {
        (self.ci_upper - self.ci_lower) / (2.0 * crate::constants::Z_95)
    }

    /// A zero-width or inverted interval cannot be sampled from.
    pub fn is_degenerate(&self) -> bool {
        self.ci_upper <= self.ci_lower
    }
}

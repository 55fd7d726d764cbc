//! Bayesian weight engine: combines a literature prior (effect size +
//! 95% CI) with contextual covariates into a posterior weight.
//!
//! The closed-form path is fully deterministic. A hierarchical
//! simulation-based method exists behind [`WeightMethod`] and honors the
//! same `(mean, ci)` contract.

use std::collections::HashMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use causeweb_core::constants::{
    CONTEXT_ADJUSTMENT_MAX, CONTEXT_ADJUSTMENT_MIN, CONTEXT_UNCERTAINTY_RATE, Z_95,
};
use causeweb_core::models::PosteriorWeight;

use crate::stats;

/// Fraction of the population below the poverty line, 0.0–1.0.
pub const COVARIATE_POVERTY_RATE: &str = "poverty_rate";
/// Median housing stock age in years.
pub const COVARIATE_HOUSING_AGE: &str = "housing_age";

// Covariate baselines and slopes for the context adjustment. Values at
// baseline contribute nothing; deviations shift the adjustment linearly.
const POVERTY_RATE_BASELINE: f64 = 0.15;
const POVERTY_RATE_SLOPE: f64 = 0.8;
const HOUSING_AGE_BASELINE: f64 = 30.0;
const HOUSING_AGE_SLOPE: f64 = 0.002;

/// Contextual covariates keyed by name. Unrecognized keys are ignored.
pub type ContextData = HashMap<String, f64>;

/// Posterior computation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightMethod {
    /// Deterministic closed-form update. The default.
    ClosedForm,
    /// Seeded resampling of the prior; same `(mean, ci)` contract.
    Hierarchical { draws: usize, seed: u64 },
}

/// Converts literature priors into posterior mechanism weights.
#[derive(Debug, Clone)]
pub struct BayesianWeightEngine {
    prior_strength: f64,
    method: WeightMethod,
}

impl BayesianWeightEngine {
    /// `prior_strength` is the weight given to the literature prior vs.
    /// the context-adjusted estimate; clamped to 0.0–1.0.
    pub fn new(prior_strength: f64) -> Self {
        Self {
            prior_strength: prior_strength.clamp(0.0, 1.0),
            method: WeightMethod::ClosedForm,
        }
    }

    pub fn with_method(prior_strength: f64, method: WeightMethod) -> Self {
        Self {
            prior_strength: prior_strength.clamp(0.0, 1.0),
            method,
        }
    }

    pub fn prior_strength(&self) -> f64 {
        self.prior_strength
    }

    /// Posterior weight for one mechanism given its literature prior and
    /// the local context.
    pub fn calculate_weight(
        &self,
        prior_effect_size: f64,
        prior_ci: (f64, f64),
        context: &ContextData,
    ) -> PosteriorWeight {
        let adjustment = context_adjustment(context);
        let prior_se = (prior_ci.1 - prior_ci.0) / (2.0 * Z_95);

        match self.method {
            WeightMethod::Hierarchical { draws, seed } if prior_se > 0.0 && draws > 1 => {
                self.hierarchical(prior_effect_size, prior_se, adjustment, draws, seed)
            }
            // Degenerate priors fall back to the closed form.
            _ => self.closed_form(prior_effect_size, prior_se, adjustment),
        }
    }

    fn closed_form(&self, prior: f64, prior_se: f64, adjustment: f64) -> PosteriorWeight {
        let s = self.prior_strength;
        let mean = s * prior + (1.0 - s) * prior * adjustment;
        // Uncertainty grows with the magnitude of contextual deviation.
        let se = prior_se.max(0.0) * (1.0 + CONTEXT_UNCERTAINTY_RATE * (adjustment - 1.0).abs());
        PosteriorWeight {
            mean,
            ci_lower: mean - Z_95 * se,
            ci_upper: mean + Z_95 * se,
        }
    }

    fn hierarchical(
        &self,
        prior: f64,
        prior_se: f64,
        adjustment: f64,
        draws: usize,
        seed: u64,
    ) -> PosteriorWeight {
        let Ok(distribution) = Normal::new(prior, prior_se) else {
            return self.closed_form(prior, prior_se, adjustment);
        };
        let s = self.prior_strength;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut samples: Vec<f64> = (0..draws)
            .map(|_| {
                let effect = distribution.sample(&mut rng);
                s * effect + (1.0 - s) * effect * adjustment
            })
            .collect();
        let mean = stats::mean(&samples);
        samples.sort_by(|a, b| a.total_cmp(b));
        PosteriorWeight {
            mean,
            ci_lower: stats::percentile(&samples, 2.5),
            ci_upper: stats::percentile(&samples, 97.5),
        }
    }
}

/// Bounded multiplicative adjustment from recognized covariates: a
/// weighted linear combination of their deviations from baseline,
/// clipped to `[0.5, 1.5]`.
pub fn context_adjustment(context: &ContextData) -> f64 {
    let mut adjustment = 1.0;
    if let Some(poverty_rate) = context.get(COVARIATE_POVERTY_RATE) {
        adjustment += POVERTY_RATE_SLOPE * (poverty_rate - POVERTY_RATE_BASELINE);
    }
    if let Some(housing_age) = context.get(COVARIATE_HOUSING_AGE) {
        adjustment += HOUSING_AGE_SLOPE * (housing_age - HOUSING_AGE_BASELINE);
    }
    adjustment.clamp(CONTEXT_ADJUSTMENT_MIN, CONTEXT_ADJUSTMENT_MAX)
}

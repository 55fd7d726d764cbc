use serde::{Deserialize, Serialize};

use super::defaults;

/// Engine-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Weight given to the literature prior vs. the context-adjusted
    /// estimate (0.0–1.0).
    pub prior_strength: f64,
    /// Monte Carlo sample count per mechanism.
    pub n_simulations: usize,
    /// Maximum mechanism hops when enumerating pathways.
    pub max_pathway_depth: usize,
    /// Samples outside this multiplicative-effect range are clipped.
    pub plausible_effect_bounds: (f64, f64),
    /// Log-guard epsilon for geometric-mean aggregation.
    pub aggregation_epsilon: f64,
    /// Root seed for all derived random-number streams.
    pub random_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prior_strength: defaults::DEFAULT_PRIOR_STRENGTH,
            n_simulations: defaults::DEFAULT_N_SIMULATIONS,
            max_pathway_depth: defaults::DEFAULT_MAX_PATHWAY_DEPTH,
            plausible_effect_bounds: (
                defaults::DEFAULT_EFFECT_LOWER_BOUND,
                defaults::DEFAULT_EFFECT_UPPER_BOUND,
            ),
            aggregation_epsilon: defaults::DEFAULT_AGGREGATION_EPSILON,
            random_seed: defaults::DEFAULT_RANDOM_SEED,
        }
    }
}

impl EngineConfig {
    /// Clamp out-of-range fields to their valid domains.
    pub fn sanitized(mut self) -> Self {
        self.prior_strength = self.prior_strength.clamp(0.0, 1.0);
        if self.n_simulations == 0 {
            self.n_simulations = 1;
        }
        if self.plausible_effect_bounds.0 > self.plausible_effect_bounds.1 {
            self.plausible_effect_bounds = (
                self.plausible_effect_bounds.1,
                self.plausible_effect_bounds.0,
            );
        }
        self
    }
}

//! Default values for engine configuration.

/// Weight given to the literature prior vs. the context-adjusted estimate.
pub const DEFAULT_PRIOR_STRENGTH: f64 = 0.5;

/// Monte Carlo sample count per mechanism.
pub const DEFAULT_N_SIMULATIONS: usize = 1000;

/// Maximum number of mechanism hops in an enumerated pathway.
pub const DEFAULT_MAX_PATHWAY_DEPTH: usize = 5;

/// Plausible multiplicative-effect range samples are clipped to.
pub const DEFAULT_EFFECT_LOWER_BOUND: f64 = 0.1;
pub const DEFAULT_EFFECT_UPPER_BOUND: f64 = 10.0;

/// Guard added to samples before taking logs in geometric-mean aggregation.
pub const DEFAULT_AGGREGATION_EPSILON: f64 = 1e-10;

/// Seed for the root of all derived random-number streams.
pub const DEFAULT_RANDOM_SEED: u64 = 0;

use serde::{Deserialize, Serialize};

/// Summary statistics over one aggregated Monte Carlo sample vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub mean: f64,
    pub median: f64,
    /// `[2.5, 97.5]` percentile interval.
    pub ci95: (f64, f64),
    /// Fraction of draws > 1.0 (net amplification rather than attenuation).
    pub probability_strong: f64,
}

/// Per-pathway propagation output: the sole contract consumed by
/// reporting and API collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropagationResult {
    pub pathway_id: String,
    /// Mechanisms that actually contributed samples (degenerate ones excluded).
    pub mechanism_ids: Vec<String>,
    pub n_simulations: usize,
    /// Minimum across mechanisms per draw (bottleneck semantics).
    pub weakest_link: AggregateStats,
    /// `exp(mean(log(sample + ε)))` across mechanisms per draw.
    pub geometric_mean: AggregateStats,
    /// Product across mechanisms per draw (independence assumption).
    pub compound_effect: AggregateStats,
}

/// Fail-soft exclusions recorded while propagating a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PropagationWarning {
    /// A mechanism's interval was zero-width or inverted; it was left
    /// out of its pathway's computation.
    DegenerateDistribution {
        pathway_id: String,
        mechanism_id: String,
    },
    /// After exclusions the pathway had fewer than 2 eligible
    /// mechanisms and was skipped entirely.
    EmptyPathway {
        pathway_id: String,
        eligible: usize,
    },
}

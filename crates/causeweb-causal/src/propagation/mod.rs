//! Monte Carlo uncertainty propagation along pathways.
//!
//! Each mechanism's posterior weight becomes a normal distribution; per
//! pathway, per-draw samples are combined under three aggregation
//! semantics. Random streams are keyed by `(seed, pathway_id,
//! mechanism_id)`, so results are identical at any parallelism degree.

use std::collections::{BTreeMap, HashMap};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use tracing::warn;

use causeweb_core::models::{Pathway, PosteriorWeight, PropagationResult, PropagationWarning};
use causeweb_core::{CancelToken, EngineConfig};

use crate::stats;

/// Raw simulation output for one pathway, before summarization. Exposed
/// so callers can assert the exact per-draw identities (the compound
/// sample at draw `i` is the exact product of the per-mechanism samples
/// at draw `i`, and so on).
#[derive(Debug, Clone)]
pub struct PathwaySamples {
    pub pathway_id: String,
    /// Mechanisms that contributed samples, in pathway order.
    pub mechanism_ids: Vec<String>,
    /// One sample vector per mechanism, aligned with `mechanism_ids`.
    pub per_mechanism: Vec<Vec<f64>>,
    /// Minimum across mechanisms, per draw.
    pub weakest_link: Vec<f64>,
    /// `exp(mean(log(sample + ε)))` across mechanisms, per draw.
    pub geometric_mean: Vec<f64>,
    /// Product across mechanisms, per draw.
    pub compound_effect: Vec<f64>,
}

/// Propagation output: per-pathway results plus fail-soft warnings.
#[derive(Debug, Clone, Default)]
pub struct PropagationOutcome {
    pub results: BTreeMap<String, PropagationResult>,
    pub warnings: Vec<PropagationWarning>,
    /// True when the cancel flag stopped the batch early. Pathways that
    /// had already completed are still reported; none are partial.
    pub cancelled: bool,
}

/// Seeded Monte Carlo engine.
#[derive(Debug, Clone, Copy)]
pub struct UncertaintyPropagator {
    n_simulations: usize,
    effect_bounds: (f64, f64),
    epsilon: f64,
    seed: u64,
}

impl UncertaintyPropagator {
    pub fn new(n_simulations: usize, seed: u64) -> Self {
        let config = EngineConfig::default();
        Self {
            n_simulations: n_simulations.max(1),
            effect_bounds: config.plausible_effect_bounds,
            epsilon: config.aggregation_epsilon,
            seed,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            n_simulations: config.n_simulations.max(1),
            effect_bounds: config.plausible_effect_bounds,
            epsilon: config.aggregation_epsilon,
            seed: config.random_seed,
        }
    }

    pub fn n_simulations(&self) -> usize {
        self.n_simulations
    }

    /// Simulate every pathway, in parallel, against the weight table.
    ///
    /// Degenerate mechanisms are excluded with a warning; pathways left
    /// with fewer than 2 eligible mechanisms are skipped with a warning.
    /// The cancel flag is checked per pathway: a cancelled pathway is
    /// dropped whole, never reported partially.
    pub fn propagate(
        &self,
        weights: &HashMap<String, PosteriorWeight>,
        pathways: &BTreeMap<String, Pathway>,
        cancel: &CancelToken,
    ) -> PropagationOutcome {
        let simulated: Vec<Option<(Option<PathwaySamples>, Vec<PropagationWarning>)>> = pathways
            .par_iter()
            .map(|(_, pathway)| {
                if cancel.is_cancelled() {
                    return None;
                }
                Some(self.simulate_pathway(pathway, weights))
            })
            .collect();

        let mut outcome = PropagationOutcome::default();
        for entry in simulated {
            let Some((samples, warnings)) = entry else {
                outcome.cancelled = true;
                continue;
            };
            outcome.warnings.extend(warnings);
            if let Some(samples) = samples {
                outcome
                    .results
                    .insert(samples.pathway_id.clone(), self.summarize(&samples));
            }
        }
        outcome
    }

    /// Simulate one pathway. Returns the raw sample vectors (or `None`
    /// when the pathway is skipped) plus any exclusion warnings.
    pub fn simulate_pathway(
        &self,
        pathway: &Pathway,
        weights: &HashMap<String, PosteriorWeight>,
    ) -> (Option<PathwaySamples>, Vec<PropagationWarning>) {
        let mut warnings = Vec::new();
        let mut mechanism_ids = Vec::new();
        let mut per_mechanism = Vec::new();

        for mechanism_id in &pathway.mechanism_ids {
            let Some(weight) = weights.get(mechanism_id) else {
                // Enumeration only chains weighted mechanisms; a missing
                // entry here means the weight table changed underneath
                // us, which we treat like a degenerate distribution.
                warnings.push(PropagationWarning::DegenerateDistribution {
                    pathway_id: pathway.id.clone(),
                    mechanism_id: mechanism_id.clone(),
                });
                continue;
            };
            match self.sample_mechanism(&pathway.id, mechanism_id, weight) {
                Some(samples) => {
                    mechanism_ids.push(mechanism_id.clone());
                    per_mechanism.push(samples);
                }
                None => {
                    warn!(
                        pathway = %pathway.id,
                        mechanism = %mechanism_id,
                        "excluding mechanism with degenerate interval"
                    );
                    warnings.push(PropagationWarning::DegenerateDistribution {
                        pathway_id: pathway.id.clone(),
                        mechanism_id: mechanism_id.clone(),
                    });
                }
            }
        }

        if mechanism_ids.len() < 2 {
            warnings.push(PropagationWarning::EmptyPathway {
                pathway_id: pathway.id.clone(),
                eligible: mechanism_ids.len(),
            });
            return (None, warnings);
        }

        let draws = self.n_simulations;
        let mut weakest_link = Vec::with_capacity(draws);
        let mut geometric_mean = Vec::with_capacity(draws);
        let mut compound_effect = Vec::with_capacity(draws);
        let mechanism_count = per_mechanism.len() as f64;

        for draw in 0..draws {
            let mut minimum = f64::INFINITY;
            let mut log_sum = 0.0;
            let mut product = 1.0;
            for samples in &per_mechanism {
                let sample = samples[draw];
                minimum = minimum.min(sample);
                log_sum += (sample + self.epsilon).ln();
                product *= sample;
            }
            weakest_link.push(minimum);
            geometric_mean.push((log_sum / mechanism_count).exp());
            compound_effect.push(product);
        }

        (
            Some(PathwaySamples {
                pathway_id: pathway.id.clone(),
                mechanism_ids,
                per_mechanism,
                weakest_link,
                geometric_mean,
                compound_effect,
            }),
            warnings,
        )
    }

    /// Draw the sample vector for one mechanism on one pathway's stream.
    /// `None` when the interval is degenerate or otherwise unsampleable.
    pub fn sample_mechanism(
        &self,
        pathway_id: &str,
        mechanism_id: &str,
        weight: &PosteriorWeight,
    ) -> Option<Vec<f64>> {
        if weight.is_degenerate() {
            return None;
        }
        let distribution = Normal::new(weight.mean, weight.implied_sd()).ok()?;
        let mut rng = self.stream_rng(pathway_id, mechanism_id);
        let (lower, upper) = self.effect_bounds;
        Some(
            (0..self.n_simulations)
                .map(|_| distribution.sample(&mut rng).clamp(lower, upper))
                .collect(),
        )
    }

    /// Independent random stream keyed by `(seed, pathway_id,
    /// mechanism_id)` via a keyed blake3 digest.
    fn stream_rng(&self, pathway_id: &str, mechanism_id: &str) -> ChaCha8Rng {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.seed.to_le_bytes());
        hasher.update(&(pathway_id.len() as u64).to_le_bytes());
        hasher.update(pathway_id.as_bytes());
        hasher.update(mechanism_id.as_bytes());
        ChaCha8Rng::from_seed(*hasher.finalize().as_bytes())
    }

    fn summarize(&self, samples: &PathwaySamples) -> PropagationResult {
        PropagationResult {
            pathway_id: samples.pathway_id.clone(),
            mechanism_ids: samples.mechanism_ids.clone(),
            n_simulations: self.n_simulations,
            weakest_link: stats::summarize(&samples.weakest_link),
            geometric_mean: stats::summarize(&samples.geometric_mean),
            compound_effect: stats::summarize(&samples.compound_effect),
        }
    }
}

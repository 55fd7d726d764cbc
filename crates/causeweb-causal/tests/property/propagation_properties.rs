//! Property tests for weights and propagation.

use std::collections::{BTreeMap, HashMap};

use proptest::prelude::*;

use causeweb_causal::weights::{BayesianWeightEngine, ContextData};
use causeweb_causal::UncertaintyPropagator;
use causeweb_core::models::{Pathway, PosteriorWeight};
use causeweb_core::CancelToken;

fn weight_strategy() -> impl Strategy<Value = PosteriorWeight> {
    // mean in a plausible band, strictly positive interval width.
    (0.2_f64..5.0, 0.01_f64..1.0).prop_map(|(mean, half_width)| PosteriorWeight {
        mean,
        ci_lower: mean - half_width,
        ci_upper: mean + half_width,
    })
}

fn pathway_of(n: usize) -> Pathway {
    Pathway {
        id: "pw-0001".to_string(),
        node_ids: (0..=n).map(|i| format!("n{i}")).collect(),
        mechanism_ids: (0..n).map(|i| format!("m{i}")).collect(),
    }
}

// =============================================================================
// Every aggregate sample respects the per-draw identities and the bounds
// =============================================================================
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn per_draw_identities_and_bounds(
        weights in prop::collection::vec(weight_strategy(), 2..5),
        seed in 0_u64..1000,
    ) {
        let propagator = UncertaintyPropagator::new(64, seed);
        let pathway = pathway_of(weights.len());
        let table: HashMap<String, PosteriorWeight> = weights
            .iter()
            .enumerate()
            .map(|(i, w)| (format!("m{i}"), *w))
            .collect();

        let (samples, warnings) = propagator.simulate_pathway(&pathway, &table);
        prop_assert!(warnings.is_empty());
        let samples = samples.expect("all mechanisms are sampleable");

        for draw in 0..64 {
            let per_draw: Vec<f64> =
                samples.per_mechanism.iter().map(|v| v[draw]).collect();
            for &sample in &per_draw {
                prop_assert!((0.1..=10.0).contains(&sample));
            }
            let exact_min = per_draw.iter().copied().fold(f64::INFINITY, f64::min);
            let exact_product: f64 = per_draw.iter().product();
            prop_assert_eq!(samples.weakest_link[draw], exact_min);
            prop_assert_eq!(samples.compound_effect[draw], exact_product);
            // Weakest link can never exceed any single mechanism's draw.
            for &sample in &per_draw {
                prop_assert!(samples.weakest_link[draw] <= sample);
            }
        }
    }
}

// =============================================================================
// Propagation is seed-deterministic
// =============================================================================
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn propagation_deterministic(
        weights in prop::collection::vec(weight_strategy(), 2..4),
        seed in 0_u64..1000,
    ) {
        let propagator = UncertaintyPropagator::new(32, seed);
        let pathway = pathway_of(weights.len());
        let table: HashMap<String, PosteriorWeight> = weights
            .iter()
            .enumerate()
            .map(|(i, w)| (format!("m{i}"), *w))
            .collect();
        let pathways: BTreeMap<String, Pathway> =
            [(pathway.id.clone(), pathway)].into_iter().collect();

        let first = propagator.propagate(&table, &pathways, &CancelToken::new());
        let second = propagator.propagate(&table, &pathways, &CancelToken::new());
        prop_assert_eq!(first.results, second.results);
    }
}

// =============================================================================
// Posterior CI always brackets the posterior mean
// =============================================================================
proptest! {
    #[test]
    fn posterior_ci_brackets_mean(
        prior in 0.2_f64..5.0,
        half_width in 0.01_f64..1.0,
        strength in 0.0_f64..=1.0,
        poverty in 0.0_f64..1.0,
        housing_age in 0.0_f64..120.0,
    ) {
        let engine = BayesianWeightEngine::new(strength);
        let context: ContextData = [
            ("poverty_rate".to_string(), poverty),
            ("housing_age".to_string(), housing_age),
        ]
        .into_iter()
        .collect();
        let weight = engine.calculate_weight(prior, (prior - half_width, prior + half_width), &context);
        prop_assert!(weight.ci_lower < weight.mean);
        prop_assert!(weight.mean < weight.ci_upper);
        // Implied sd from a positive-width prior stays non-negative.
        prop_assert!(weight.implied_sd() >= 0.0);
    }
}

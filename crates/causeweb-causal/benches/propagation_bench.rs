use std::collections::{BTreeMap, HashMap};

use criterion::{criterion_group, criterion_main, Criterion};

use causeweb_causal::UncertaintyPropagator;
use causeweb_core::models::{Pathway, PosteriorWeight};
use causeweb_core::CancelToken;

/// 100 disjoint 4-hop pathways over 400 weighted mechanisms.
fn build_batch() -> (HashMap<String, PosteriorWeight>, BTreeMap<String, Pathway>) {
    let mut weights = HashMap::new();
    let mut pathways = BTreeMap::new();
    for p in 0..100 {
        let mechanism_ids: Vec<String> = (0..4).map(|m| format!("m{p}_{m}")).collect();
        for (m, id) in mechanism_ids.iter().enumerate() {
            let mean = 0.8 + 0.1 * (m as f64);
            weights.insert(
                id.clone(),
                PosteriorWeight {
                    mean,
                    ci_lower: mean - 0.2,
                    ci_upper: mean + 0.2,
                },
            );
        }
        let id = format!("pw-{p:04}");
        pathways.insert(
            id.clone(),
            Pathway {
                id,
                node_ids: (0..=4).map(|n| format!("n{p}_{n}")).collect(),
                mechanism_ids,
            },
        );
    }
    (weights, pathways)
}

fn bench_propagate_100_pathways(c: &mut Criterion) {
    let (weights, pathways) = build_batch();
    let propagator = UncertaintyPropagator::new(1000, 42);
    let cancel = CancelToken::new();

    c.bench_function("propagate_100_pathways_1k_draws", |b| {
        b.iter(|| propagator.propagate(&weights, &pathways, &cancel));
    });
}

fn bench_single_pathway(c: &mut Criterion) {
    let (weights, pathways) = build_batch();
    let propagator = UncertaintyPropagator::new(1000, 42);
    let pathway = pathways.values().next().unwrap();

    c.bench_function("simulate_single_pathway_1k_draws", |b| {
        b.iter(|| propagator.simulate_pathway(pathway, &weights));
    });
}

criterion_group!(benches, bench_propagate_100_pathways, bench_single_pathway);
criterion_main!(benches);

//! Engine facade: owns the taxonomy, the mechanism graph, and the
//! posterior weight table behind read/write locks, and orchestrates the
//! enumerate-then-propagate analysis.
//!
//! Structural taxonomy mutation is single-writer: mutating calls hold
//! the write guard for the whole check-then-cascade transaction, so a
//! partially-applied cascade is never observable. Reads take the read
//! guard and proceed concurrently.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

use causeweb_core::models::{
    IngestReport, Mechanism, Node, Pathway, PosteriorWeight, PropagationResult, PropagationWarning,
};
use causeweb_core::{CancelToken, EngineConfig, PropagationError, TaxonomyError};
use causeweb_taxonomy::{IntegrityReport, TaxonomyGraph, TaxonomySnapshot};

use crate::graph::sync::{to_snapshot, MechanismSnapshot};
use crate::graph::MechanismGraph;
use crate::pathways::PathwayEnumerator;
use crate::propagation::UncertaintyPropagator;
use crate::weights::{BayesianWeightEngine, ContextData};

/// End-to-end analysis output: the enumerated pathways, their
/// propagation results, and any fail-soft warnings.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOutcome {
    pub pathways: BTreeMap<String, Pathway>,
    pub results: BTreeMap<String, PropagationResult>,
    pub warnings: Vec<PropagationWarning>,
}

/// The causal mechanism graph engine.
pub struct MechanismEngine {
    taxonomy: RwLock<TaxonomyGraph>,
    mechanisms: RwLock<MechanismGraph>,
    weights: RwLock<HashMap<String, PosteriorWeight>>,
    config: EngineConfig,
    cancel: CancelToken,
}

impl MechanismEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            taxonomy: RwLock::new(TaxonomyGraph::new()),
            mechanisms: RwLock::new(MechanismGraph::new()),
            weights: RwLock::new(HashMap::new()),
            config: config.sanitized(),
            cancel: CancelToken::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Token for aborting in-flight bulk operations.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Admit node records from the catalog collaborator. Scale is
    /// range-checked at the type boundary, so admission cannot fail
    /// per-item; the report still carries the accepted count.
    pub fn ingest_nodes(&self, nodes: Vec<Node>) -> IngestReport {
        let mut taxonomy = self.taxonomy.write().unwrap_or_else(PoisonError::into_inner);
        let mut report = IngestReport::default();
        for node in nodes {
            taxonomy.insert_node(node);
            report.accept();
        }
        report
    }

    /// Single atomic taxonomy mutation.
    pub fn add_taxonomy_edge(&self, parent_id: &str, child_id: &str) -> Result<(), TaxonomyError> {
        self.taxonomy
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add_edge(parent_id, child_id)
    }

    /// Single atomic taxonomy mutation.
    pub fn remove_taxonomy_edge(
        &self,
        parent_id: &str,
        child_id: &str,
    ) -> Result<(), TaxonomyError> {
        self.taxonomy
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove_edge(parent_id, child_id)
    }

    /// Admit mechanism records from the evidence ingestion collaborator.
    /// Referential integrity and interval invariants are re-validated
    /// per item; rejections never abort the batch.
    pub fn ingest_mechanisms(&self, mechanisms: Vec<Mechanism>) -> IngestReport {
        let taxonomy = self.taxonomy.read().unwrap_or_else(PoisonError::into_inner);
        let mut graph = self
            .mechanisms
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut report = IngestReport::default();
        for mechanism in mechanisms {
            let id = mechanism.id.clone();
            match graph.add_mechanism(mechanism, &taxonomy) {
                Ok(()) => report.accept(),
                Err(error) => report.reject(id, error),
            }
        }
        report
    }

    /// Compute posterior weights for every mechanism carrying a full
    /// prior (effect size plus both CI bounds). `contexts` supplies
    /// per-mechanism covariates; mechanisms without an entry use an
    /// empty context. Returns the number of weights computed; prior
    /// values are superseded, not mutated.
    pub fn compute_weights(&self, contexts: &HashMap<String, ContextData>) -> usize {
        let engine = BayesianWeightEngine::new(self.config.prior_strength);
        let empty = ContextData::new();

        let graph = self
            .mechanisms
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut computed = HashMap::new();
        for mechanism in graph.mechanisms() {
            let (Some(effect), Some(ci)) =
                (mechanism.evidence.effect_size, mechanism.evidence.interval())
            else {
                continue;
            };
            let context = contexts.get(&mechanism.id).unwrap_or(&empty);
            computed.insert(
                mechanism.id.clone(),
                engine.calculate_weight(effect, ci, context),
            );
        }
        drop(graph);

        let count = computed.len();
        *self.weights.write().unwrap_or_else(PoisonError::into_inner) = computed;
        count
    }

    /// Enumerate pathways over the weighted mechanism graph and run
    /// Monte Carlo propagation on each.
    pub fn analyze(&self) -> Result<AnalysisOutcome, PropagationError> {
        let graph = self
            .mechanisms
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let weights = self.weights.read().unwrap_or_else(PoisonError::into_inner);

        let enumerator = PathwayEnumerator::new(self.config.max_pathway_depth);
        let pathways = enumerator.enumerate(&graph, &weights);
        drop(graph);

        let propagator = UncertaintyPropagator::from_config(&self.config);
        let outcome = propagator.propagate(&weights, &pathways, &self.cancel);

        if outcome.cancelled && outcome.results.is_empty() && !pathways.is_empty() {
            return Err(PropagationError::Cancelled);
        }
        Ok(AnalysisOutcome {
            pathways,
            results: outcome.results,
            warnings: outcome.warnings,
        })
    }

    /// Full cache integrity pass over the taxonomy.
    pub fn validate_integrity(&self) -> IntegrityReport {
        self.taxonomy
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .validate_integrity(&self.cancel)
    }

    /// Serializable exports for the persistence collaborator.
    pub fn taxonomy_snapshot(&self) -> TaxonomySnapshot {
        self.taxonomy
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
    }

    pub fn mechanism_snapshot(&self) -> MechanismSnapshot {
        let graph = self
            .mechanisms
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let weights = self.weights.read().unwrap_or_else(PoisonError::into_inner);
        let sorted: BTreeMap<_, _> = weights
            .iter()
            .map(|(id, weight)| (id.clone(), *weight))
            .collect();
        to_snapshot(&graph, &sorted)
    }
}

impl Default for MechanismEngine {
    fn default() -> Self {
        Self::new()
    }
}
